//! Concise output formatter for easy parsing by editors

use crate::output::OutputFormatter;
use crate::rule::Violation;
use crate::rules::HeaderIssue;

/// Concise formatter: file:line: [kind]
pub struct ConciseFormatter;

impl Default for ConciseFormatter {
    fn default() -> Self {
        Self
    }
}

impl ConciseFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for ConciseFormatter {
    fn format_violation(&self, _index: usize, file_path: &str, violation: &Violation) -> String {
        format!("{}:{}: [{}]", file_path, violation.line, violation.kind)
    }

    fn format_header_issue(&self, _index: usize, file_path: &str, issue: &HeaderIssue) -> String {
        format!("{}: [{}] {}", file_path, issue.kind(), issue)
    }
}
