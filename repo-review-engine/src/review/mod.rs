pub mod prompt;

pub use prompt::build_review_prompt;
