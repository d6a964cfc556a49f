//! Parsing of user-submitted GitHub repository URLs.

use tracing::debug;
use url::Url;

use crate::errors::ValidationError;
use crate::git_providers::types::{DEFAULT_BRANCH, RepositoryReference};

const GITHUB_HOST: &str = "github.com";

/// Extracts `{owner, repo, branch}` from a `https://github.com/owner/repo[/tree/branch]` URL.
///
/// The branch defaults to `main` unless the path carries `/tree/<branch>`.
/// A trailing `.git` on the repository segment is dropped.
pub fn parse_repository_url(input: &str) -> Result<RepositoryReference, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let url = Url::parse(input).map_err(|_| ValidationError::MalformedUrl(input.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ValidationError::UnsupportedScheme(other.to_string())),
    }

    let host = url.host_str().unwrap_or_default();
    if host != GITHUB_HOST {
        return Err(ValidationError::WrongHost(host.to_string()));
    }

    // `path_segments` keeps percent-escapes; decode once so the client can
    // encode every component the same way.
    let segments = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
        .map(|seg| {
            urlencoding::decode(seg)
                .map(|s| s.into_owned())
                .map_err(|_| ValidationError::MalformedUrl(input.to_string()))
        })
        .collect::<Result<Vec<String>, _>>()?;

    if segments.len() < 2 {
        return Err(ValidationError::MissingOwnerOrRepo(input.to_string()));
    }

    let owner = segments[0].clone();
    let repo = segments[1]
        .strip_suffix(".git")
        .unwrap_or(segments[1].as_str())
        .to_string();
    if repo.is_empty() {
        return Err(ValidationError::MissingOwnerOrRepo(input.to_string()));
    }

    let branch = match segments.as_slice() {
        [_, _, tree, branch, ..] if tree == "tree" => branch.clone(),
        _ => DEFAULT_BRANCH.to_string(),
    };

    debug!(%owner, %repo, %branch, "repository URL parsed");

    Ok(RepositoryReference {
        owner,
        repo,
        branch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_repository_url_defaults_to_main() {
        let r = parse_repository_url("https://github.com/octocat/hello-world").unwrap();
        assert_eq!(r.owner, "octocat");
        assert_eq!(r.repo, "hello-world");
        assert_eq!(r.branch, "main");
    }

    #[test]
    fn tree_segment_names_the_branch() {
        let r = parse_repository_url("https://github.com/octocat/hello-world/tree/dev/src").unwrap();
        assert_eq!(r.branch, "dev");
    }

    #[test]
    fn trailing_slash_and_git_suffix_are_tolerated() {
        let r = parse_repository_url("http://github.com/octocat/hello-world.git/").unwrap();
        assert_eq!(r.repo, "hello-world");
        assert_eq!(r.branch, "main");
    }

    #[test]
    fn written_out_main_still_counts_as_default_branch() {
        let explicit = parse_repository_url("https://github.com/octocat/hello-world/tree/main").unwrap();
        assert!(explicit.uses_default_branch());

        let dev = parse_repository_url("https://github.com/octocat/hello-world/tree/dev").unwrap();
        assert!(!dev.uses_default_branch());
    }

    #[test]
    fn escaped_branch_is_decoded_once() {
        let r = parse_repository_url("https://github.com/octocat/hello-world/tree/v1%2B").unwrap();
        assert_eq!(r.branch, "v1+");

        let r = parse_repository_url("https://github.com/octocat/hello-world/tree/feature%2Flogin")
            .unwrap();
        assert_eq!(r.branch, "feature/login");
    }

    #[test]
    fn blob_segment_does_not_change_branch() {
        let r = parse_repository_url("https://github.com/octocat/hello-world/blob/dev/README.md")
            .unwrap();
        assert_eq!(r.branch, "main");
    }

    #[test]
    fn invalid_inputs_are_rejected_distinctly() {
        assert_eq!(parse_repository_url("   "), Err(ValidationError::EmptyUrl));
        assert!(matches!(
            parse_repository_url("not a url"),
            Err(ValidationError::MalformedUrl(_))
        ));
        assert!(matches!(
            parse_repository_url("ftp://github.com/a/b"),
            Err(ValidationError::UnsupportedScheme(s)) if s == "ftp"
        ));
        assert!(matches!(
            parse_repository_url("https://gitlab.com/a/b"),
            Err(ValidationError::WrongHost(h)) if h == "gitlab.com"
        ));
        assert!(matches!(
            parse_repository_url("https://www.github.com/a/b"),
            Err(ValidationError::WrongHost(_))
        ));
        assert!(matches!(
            parse_repository_url("https://github.com/octocat"),
            Err(ValidationError::MissingOwnerOrRepo(_))
        ));
    }
}
