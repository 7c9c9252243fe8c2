//!
//! This module defines the records produced by blogcheck's checks: structural
//! violations found while scanning a document, and the errors that can stop a
//! single file from being checked at all.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("Failed to read {path}: {source}")]
    IoError { source: std::io::Error, path: PathBuf },
    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },
    #[error("{path} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern { source: regex::Error, pattern: String },
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidGlob { source: globset::Error, pattern: String },
}

/// The kind of structural problem found by the block format check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Opening and closing code fences are indented differently
    CodeError,
    /// A code fence is indented while indentation is disallowed
    CodeIndentError,
    /// The line right before a closing code fence is blank
    CodeBoundaryEmptyLineError,
    /// Opening and closing math fences are indented differently
    LatexError,
    /// A top-level list item directly follows running text
    ListError,
    /// A quote directly follows running text
    QuoteError,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::CodeError => "code error",
            ViolationKind::CodeIndentError => "code indent error",
            ViolationKind::CodeBoundaryEmptyLineError => "code boundary empty line error",
            ViolationKind::LatexError => "latex error",
            ViolationKind::ListError => "list error",
            ViolationKind::QuoteError => "quote error",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ViolationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single finding of the block format check.
///
/// `previous_line` and `current_line` are the raw lines (terminators included)
/// that give the finding its context. `line` is 1-based; for code fence
/// findings it points at the last line inside the block rather than at the
/// closing fence itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub line: usize,
    pub previous_line: String,
    pub current_line: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(line: usize, previous_line: &str, current_line: &str, kind: ViolationKind) -> Self {
        Self {
            line,
            previous_line: previous_line.to_string(),
            current_line: current_line.to_string(),
            kind,
        }
    }
}
