//! JSON output: every finding of the run in one array

use crate::file_processor::FileReport;
use crate::rule::Violation;
use crate::rules::HeaderIssue;
use serde_json::{Value, json};

fn violation_json(file_path: &str, violation: &Violation) -> Value {
    json!({
        "file": file_path,
        "line": violation.line,
        "kind": violation.kind,
        "previous_line": violation.previous_line,
        "current_line": violation.current_line,
    })
}

fn header_issue_json(file_path: &str, issue: &HeaderIssue) -> Value {
    json!({
        "file": file_path,
        "kind": issue.kind(),
        "message": issue.to_string(),
        "details": issue,
    })
}

/// Helper to format all findings from multiple files as a single JSON document
pub fn format_all_as_json(reports: &[FileReport]) -> String {
    let mut findings = Vec::new();

    for report in reports {
        let path = report.display_path();
        findings.extend(report.violations.iter().map(|v| violation_json(&path, v)));
        findings.extend(report.header_issues.iter().map(|i| header_issue_json(&path, i)));
    }

    serde_json::to_string_pretty(&findings).unwrap_or_default()
}
