//! Output formatting module for blogcheck
//!
//! Formatters turn single findings into text; the [`Reporter`] decides what is
//! printed. It numbers findings across all files and, once more than
//! `max_shown` findings have been printed, falls back to one count line per
//! file so a badly broken blog does not flood the terminal.

use crate::file_processor::FileReport;
use crate::rule::Violation;
use crate::rules::HeaderIssue;
use std::io::{self, Write};

pub mod formatters;

// Re-export formatters
pub use formatters::*;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format one block format violation. `index` is 1-based across all files.
    fn format_violation(&self, index: usize, file_path: &str, violation: &Violation) -> String;

    /// Format one front matter issue. `index` is 1-based across all files.
    fn format_header_issue(&self, index: usize, file_path: &str, issue: &HeaderIssue) -> String;

    /// Line printed per file once detailed output has been cut off
    fn format_file_count(&self, file_path: &str, count: usize) -> String {
        format!("- {count} errors in {file_path}")
    }

    /// Format a summary of results across multiple files
    fn format_summary(&self, _files_processed: usize, _total_findings: usize) -> Option<String> {
        None
    }

    /// Whether this formatter should use colors
    fn use_colors(&self) -> bool {
        false
    }
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable format with the offending lines
    #[default]
    Text,
    /// Concise format: file:line: [kind]
    Concise,
    /// GitHub Actions annotation format
    #[value(name = "github")]
    GitHub,
    /// A single JSON array of all findings
    Json,
}

impl OutputFormat {
    /// Create a formatter instance for this format.
    ///
    /// JSON has no per-finding formatter: the whole run is emitted as one
    /// document by [`format_all_as_json`].
    pub fn create_formatter(&self, use_colors: bool) -> Option<Box<dyn OutputFormatter>> {
        match self {
            OutputFormat::Text if use_colors => Some(Box::new(TextFormatter::new())),
            OutputFormat::Text => Some(Box::new(TextFormatter::without_colors())),
            OutputFormat::Concise => Some(Box::new(ConciseFormatter::new())),
            OutputFormat::GitHub => Some(Box::new(GitHubFormatter::new())),
            OutputFormat::Json => None,
        }
    }
}

/// Prints findings file by file and keeps the running total
pub struct Reporter<W: Write> {
    formatter: Box<dyn OutputFormatter>,
    out: W,
    max_shown: usize,
    total: usize,
    files_processed: usize,
    show_details: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(formatter: Box<dyn OutputFormatter>, out: W, max_shown: usize) -> Self {
        Self {
            formatter,
            out,
            max_shown,
            total: 0,
            files_processed: 0,
            show_details: true,
        }
    }

    /// Print per-file counts only, from the first file on
    pub fn counts_only(mut self) -> Self {
        self.show_details = false;
        self
    }

    /// Total number of findings reported so far
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn report_file(&mut self, report: &FileReport) -> io::Result<()> {
        self.files_processed += 1;
        let count = report.finding_count();
        let path = report.display_path();

        if count > 0 {
            if self.show_details {
                for violation in &report.violations {
                    self.total += 1;
                    let text = self.formatter.format_violation(self.total, &path, violation);
                    writeln!(self.out, "{text}")?;
                }
                for issue in &report.header_issues {
                    self.total += 1;
                    let text = self.formatter.format_header_issue(self.total, &path, issue);
                    writeln!(self.out, "{text}")?;
                }
            } else {
                writeln!(self.out, "{}", self.formatter.format_file_count(&path, count))?;
                self.total += count;
            }
        }

        if self.show_details && self.total > self.max_shown {
            writeln!(self.out, "Too many errors...")?;
            self.show_details = false;
        }

        Ok(())
    }

    /// Print the summary line, if the formatter has one
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(summary) = self.formatter.format_summary(self.files_processed, self.total) {
            writeln!(self.out, "{summary}")?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ViolationKind;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn report(path: &str, count: usize) -> FileReport {
        FileReport {
            path: PathBuf::from(path),
            violations: (0..count)
                .map(|i| Violation::new(i + 2, "text\n", "- item\n", ViolationKind::ListError))
                .collect(),
            header_issues: Vec::new(),
        }
    }

    fn run(reports: &[FileReport], max_shown: usize) -> (String, usize) {
        let mut reporter = Reporter::new(Box::new(ConciseFormatter::new()), Vec::new(), max_shown);
        for report in reports {
            reporter.report_file(report).unwrap();
        }
        reporter.finish().unwrap();
        let total = reporter.total();
        (String::from_utf8(reporter.into_inner()).unwrap(), total)
    }

    #[test]
    fn test_clean_files_print_nothing() {
        let (output, total) = run(&[report("a.md", 0), report("b.md", 0)], 10);
        assert_eq!(output, "");
        assert_eq!(total, 0);
    }

    #[test]
    fn test_cutoff_after_threshold() {
        let reports = [report("a.md", 8), report("b.md", 5), report("c.md", 2)];
        let (output, total) = run(&reports, 10);
        let lines: Vec<&str> = output.lines().collect();

        // Every finding of the file that crosses the threshold is still shown
        assert_eq!(lines.len(), 8 + 5 + 1 + 1);
        assert_eq!(lines[13], "Too many errors...");
        assert_eq!(lines[14], "- 2 errors in c.md");
        assert_eq!(total, 15);
    }

    #[test]
    fn test_counts_only() {
        let mut reporter =
            Reporter::new(Box::new(ConciseFormatter::new()), Vec::new(), 10).counts_only();
        reporter.report_file(&report("a.md", 3)).unwrap();
        reporter.report_file(&report("b.md", 0)).unwrap();
        assert_eq!(reporter.total(), 3);
        assert_eq!(String::from_utf8(reporter.into_inner()).unwrap(), "- 3 errors in a.md\n");
    }

    #[test]
    fn test_output_format_parsing() {
        use clap::ValueEnum;
        assert_eq!(OutputFormat::from_str("github", true).unwrap(), OutputFormat::GitHub);
        assert_eq!(OutputFormat::from_str("json", true).unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("sarif", true).is_err());

        assert!(OutputFormat::Json.create_formatter(false).is_none());
        assert!(OutputFormat::Concise.create_formatter(false).is_some());
    }
}
