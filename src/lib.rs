pub mod config;
pub mod exit_codes;
pub mod file_processor;
pub mod output;
pub mod rule;
pub mod rules;

pub use crate::config::Config;
pub use crate::rule::{LintError, Violation, ViolationKind};
pub use crate::rules::{BlockFormatChecker, BlockFormatConfig, FrontMatterChecker, HeaderIssue};

/// Split a document into lines, keeping each line's `\n` terminator.
///
/// The block format check relies on terminators being present: a bare `-\n`
/// is a list item while `-` on the last line of a file is not.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// Run the block format check over an already split document
pub fn check_lines(lines: &[&str], config: &Config) -> Vec<Violation> {
    BlockFormatChecker::from_config(config).check(lines)
}

/// Run the block format check over a whole document
pub fn check_content(content: &str, config: &Config) -> Vec<Violation> {
    check_lines(&split_lines(content), config)
}
