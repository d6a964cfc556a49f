use serde::Deserialize;

/// Body of `POST /review`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// Public GitHub URL, optionally with `/tree/<branch>`.
    pub repo_url: String,
    /// Language id from `GET /languages`, e.g. "python".
    pub language: String,
}
