/// Exit codes for blogcheck
///
/// CI scripts can tell a blog with problems apart from a run that could not
/// check the blog at all.
/// Success - No findings in any file
pub const SUCCESS: i32 = 0;

/// Findings - One or more violations or front matter issues detected
pub const VIOLATIONS_FOUND: i32 = 1;

/// Tool error - Configuration error, file access error, or internal error
pub const TOOL_ERROR: i32 = 2;

/// Exit code of a finished run. Files that could not be read take precedence
/// over findings in the files that could.
pub fn for_run(total_findings: usize, tool_errors: usize) -> i32 {
    if tool_errors > 0 {
        TOOL_ERROR
    } else if total_findings > 0 {
        VIOLATIONS_FOUND
    } else {
        SUCCESS
    }
}
