//! Front matter check: categories and tags of a post.
//!
//! Posts are filed under directories named after their categories, so a post at
//! `<root>/linux/kernel/post.md` must declare `categories: [linux, kernel]`.
//! Category and directory names, as well as tags, must match configurable
//! patterns.
use crate::config::FrontMatterConfig;
use crate::rule::LintError;
use regex::Regex;
use serde::Serialize;
use serde_yml::Value;
use std::fmt;
use std::path::Path;

/// A problem found in a post's front matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HeaderIssue {
    /// A category or directory name does not match the category pattern
    InvalidName { name: String },
    /// The directory path does not spell out the declared categories
    CategoryMismatch { categories: Vec<String>, path: String },
    /// A tag does not match the tag pattern
    InvalidTag { tag: String },
    /// `tags` is present but empty
    EmptyTags,
    /// The front matter is not valid YAML
    InvalidHeader { message: String },
}

impl HeaderIssue {
    pub fn kind(&self) -> &'static str {
        match self {
            HeaderIssue::InvalidName { .. } => "invalid name",
            HeaderIssue::CategoryMismatch { .. } => "category mismatch",
            HeaderIssue::InvalidTag { .. } => "invalid tag",
            HeaderIssue::EmptyTags => "empty tags",
            HeaderIssue::InvalidHeader { .. } => "invalid header",
        }
    }
}

impl fmt::Display for HeaderIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderIssue::InvalidName { name } => write!(
                f,
                "Invalid name '{name}'. Only lowercase letters and digits are allowed."
            ),
            HeaderIssue::CategoryMismatch { categories, path } => {
                write!(f, "Categories {categories:?} do not match the path '{path}'.")
            }
            HeaderIssue::InvalidTag { tag } => write!(
                f,
                "Invalid tag '{tag}'. Tags can only contain letters, numbers, hyphens, and underscores."
            ),
            HeaderIssue::EmptyTags => write!(f, "Empty tags."),
            HeaderIssue::InvalidHeader { message } => write!(f, "Front matter is not valid YAML: {message}"),
        }
    }
}

/// Returns the front matter text between the leading `---` line and the next
/// `---` line, or `None` if the document does not start with front matter.
///
/// An unterminated block extends to the end of the document.
pub fn extract_front_matter(lines: &[&str]) -> Option<String> {
    let (first, rest) = lines.split_first()?;
    if first.trim() != "---" {
        return None;
    }

    Some(
        rest.iter()
            .take_while(|line| line.trim() != "---")
            .copied()
            .collect::<String>(),
    )
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

/// A sequence yields its items, a lone scalar is a one-element list, null is empty
fn value_to_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().map(scalar_to_string).collect(),
        Value::Null => Vec::new(),
        other => {
            let single = scalar_to_string(other);
            if single.is_empty() { Vec::new() } else { vec![single] }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FrontMatterChecker {
    category_pattern: Regex,
    tag_pattern: Regex,
}

impl FrontMatterChecker {
    pub fn new(config: &FrontMatterConfig) -> Result<Self, LintError> {
        Ok(Self {
            category_pattern: compile(&config.category_pattern)?,
            tag_pattern: compile(&config.tag_pattern)?,
        })
    }

    pub fn name(&self) -> &'static str {
        "front-matter"
    }

    /// Check the front matter of one post.
    ///
    /// `relative_path` is the post's path relative to the posts root; its
    /// directory components are compared against the declared categories.
    pub fn check(&self, lines: &[&str], relative_path: &Path) -> Vec<HeaderIssue> {
        let Some(header_text) = extract_front_matter(lines) else {
            return Vec::new();
        };

        let header = match serde_yml::from_str::<Value>(&header_text) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("[{}] {}: {err}", self.name(), relative_path.display());
                return vec![HeaderIssue::InvalidHeader {
                    message: err.to_string(),
                }];
            }
        };

        let Value::Mapping(header) = header else {
            return Vec::new();
        };

        let mut issues = Vec::new();

        if let Some(categories) = header.get("categories") {
            self.check_categories(&value_to_list(categories), relative_path, &mut issues);
        }

        if let Some(tags) = header.get("tags") {
            let tags = value_to_list(tags);
            if tags.is_empty() {
                issues.push(HeaderIssue::EmptyTags);
            }
            for tag in tags {
                if !self.tag_pattern.is_match(&tag) {
                    issues.push(HeaderIssue::InvalidTag { tag });
                }
            }
        }

        issues
    }

    fn check_categories(&self, categories: &[String], relative_path: &Path, issues: &mut Vec<HeaderIssue>) {
        let path_parts: Vec<String> = relative_path
            .parent()
            .map(|dir| {
                dir.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        for name in path_parts.iter().chain(categories) {
            if !self.category_pattern.is_match(name) {
                issues.push(HeaderIssue::InvalidName { name: name.clone() });
            }
        }

        if path_parts != categories {
            issues.push(HeaderIssue::CategoryMismatch {
                categories: categories.to_vec(),
                path: relative_path.display().to_string(),
            });
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, LintError> {
    Regex::new(pattern).map_err(|source| LintError::InvalidPattern {
        source,
        pattern: pattern.to_string(),
    })
}
