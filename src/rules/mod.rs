pub mod block_utils;
pub mod front_matter;

mod block_format;

pub use block_format::{BlockFormatChecker, BlockFormatConfig};
pub use front_matter::{FrontMatterChecker, HeaderIssue};
