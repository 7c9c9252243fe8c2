//! Default text output formatter with colors and context

use crate::output::OutputFormatter;
use crate::rule::Violation;
use crate::rules::HeaderIssue;
use colored::*;

/// Human-readable formatter. Each finding is printed as
///
/// ```text
/// [error 1]:
/// [list error] at source/_posts/post.md:2:
/// some text
/// * item
/// ```
///
/// where the last two lines are the raw lines that triggered the finding.
pub struct TextFormatter {
    use_colors: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    fn heading(&self, index: usize) -> String {
        let heading = format!("[error {index}]:");
        if self.use_colors {
            heading.red().bold().to_string()
        } else {
            heading
        }
    }

    fn kind(&self, kind: &str) -> String {
        let kind = format!("[{kind}]");
        if self.use_colors { kind.yellow().to_string() } else { kind }
    }

    fn location(&self, location: String) -> String {
        if self.use_colors {
            location.blue().underline().to_string()
        } else {
            location
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_violation(&self, index: usize, file_path: &str, violation: &Violation) -> String {
        let context = format!("{}{}", violation.previous_line, violation.current_line);
        format!(
            "{}\n{} at {}: \n{}",
            self.heading(index),
            self.kind(violation.kind.as_str()),
            self.location(format!("{}:{}", file_path, violation.line)),
            context.trim_end_matches(['\r', '\n'])
        )
    }

    fn format_header_issue(&self, index: usize, file_path: &str, issue: &HeaderIssue) -> String {
        format!(
            "{}\n{} at {}: {}",
            self.heading(index),
            self.kind(issue.kind()),
            self.location(file_path.to_string()),
            issue
        )
    }

    fn format_summary(&self, files_processed: usize, total_findings: usize) -> Option<String> {
        if total_findings == 0 {
            let pass = "blogcheck: pass";
            return Some(if self.use_colors { pass.green().to_string() } else { pass.to_string() });
        }

        let file_word = if files_processed == 1 { "file" } else { "files" };
        Some(format!(
            "blogcheck: {total_findings} errors in {files_processed} {file_word} checked"
        ))
    }

    fn use_colors(&self) -> bool {
        self.use_colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ViolationKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_formatter_default() {
        let formatter = TextFormatter::default();
        assert!(formatter.use_colors());
    }

    #[test]
    fn test_text_formatter_without_colors() {
        let formatter = TextFormatter::without_colors();
        assert!(!formatter.use_colors());
    }

    #[test]
    fn test_format_violation_no_colors() {
        let formatter = TextFormatter::without_colors();
        let violation = Violation::new(2, "text\n", "* item\n", ViolationKind::ListError);
        assert_eq!(
            formatter.format_violation(1, "post.md", &violation),
            "[error 1]:\n[list error] at post.md:2: \ntext\n* item"
        );
    }

    #[test]
    fn test_format_violation_without_trailing_newline() {
        let formatter = TextFormatter::without_colors();
        let violation = Violation::new(2, "\n", "```", ViolationKind::CodeBoundaryEmptyLineError);
        assert_eq!(
            formatter.format_violation(12, "post.md", &violation),
            "[error 12]:\n[code boundary empty line error] at post.md:2: \n\n```"
        );
    }

    #[test]
    fn test_format_header_issue() {
        let formatter = TextFormatter::without_colors();
        let output = formatter.format_header_issue(3, "a/post.md", &HeaderIssue::EmptyTags);
        assert_eq!(output, "[error 3]:\n[empty tags] at a/post.md: Empty tags.");
    }

    #[test]
    fn test_summary() {
        let formatter = TextFormatter::without_colors();
        assert_eq!(formatter.format_summary(4, 0).unwrap(), "blogcheck: pass");
        assert_eq!(
            formatter.format_summary(1, 2).unwrap(),
            "blogcheck: 2 errors in 1 file checked"
        );
    }
}
