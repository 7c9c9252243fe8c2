//! GitHub Actions annotation format

use crate::output::OutputFormatter;
use crate::rule::Violation;
use crate::rules::HeaderIssue;

/// GitHub Actions formatter
/// Outputs in the format: ::error file=<file>,line=<line>,title=<kind>::<message>
pub struct GitHubFormatter;

impl Default for GitHubFormatter {
    fn default() -> Self {
        Self
    }
}

impl GitHubFormatter {
    pub fn new() -> Self {
        Self
    }
}

/// Annotation messages are single-line; percent and newlines must be escaped
fn escape_data(text: &str) -> String {
    text.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// Property values (`file=`, `title=`) additionally delimit on `,` and `:`
fn escape_property(text: &str) -> String {
    escape_data(text).replace(',', "%2C").replace(':', "%3A")
}

impl OutputFormatter for GitHubFormatter {
    fn format_violation(&self, _index: usize, file_path: &str, violation: &Violation) -> String {
        format!(
            "::error file={},line={},title={}::{}",
            escape_property(file_path),
            violation.line,
            escape_property(violation.kind.as_str()),
            escape_data(&format!("{}{}", violation.previous_line, violation.current_line))
        )
    }

    fn format_header_issue(&self, _index: usize, file_path: &str, issue: &HeaderIssue) -> String {
        format!(
            "::error file={},title={}::{}",
            escape_property(file_path),
            escape_property(issue.kind()),
            escape_data(&issue.to_string())
        )
    }

    fn format_file_count(&self, file_path: &str, count: usize) -> String {
        format!("::error file={}::{count} errors", escape_property(file_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ViolationKind;

    #[test]
    fn test_format_violation_escapes_newlines() {
        let formatter = GitHubFormatter::new();
        let violation = Violation::new(2, "text\n", "* item\n", ViolationKind::ListError);
        assert_eq!(
            formatter.format_violation(1, "docs/post.md", &violation),
            "::error file=docs/post.md,line=2,title=list error::text%0A* item%0A"
        );
    }

    #[test]
    fn test_property_values_are_escaped() {
        let formatter = GitHubFormatter::new();
        let violation = Violation::new(5, "a\n", "b\n", ViolationKind::CodeError);
        assert_eq!(
            formatter.format_violation(1, "notes/a,b:c.md", &violation),
            "::error file=notes/a%2Cb%3Ac.md,line=5,title=code error::a%0Ab%0A"
        );
        assert_eq!(
            formatter.format_file_count("50%,done.md", 2),
            "::error file=50%25%2Cdone.md::2 errors"
        );

        let issue = HeaderIssue::InvalidTag { tag: "a,b".to_string() };
        let line = formatter.format_header_issue(1, "x,y.md", &issue);
        assert!(line.starts_with("::error file=x%2Cy.md,title=invalid tag::"), "{line}");
    }

    #[test]
    fn test_format_file_count() {
        let formatter = GitHubFormatter::new();
        assert_eq!(formatter.format_file_count("a.md", 4), "::error file=a.md::4 errors");
    }
}
