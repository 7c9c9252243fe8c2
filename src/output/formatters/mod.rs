//! Output formatter implementations

pub mod concise;
pub mod github;
pub mod json;
pub mod text;

pub use concise::ConciseFormatter;
pub use github::GitHubFormatter;
pub use json::format_all_as_json;
pub use text::TextFormatter;
