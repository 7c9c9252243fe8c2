//! File discovery and per-file processing
//!
//! Discovery walks the given paths with the `ignore` crate, keeping Markdown
//! files only. Each file is then checked on its own; with the `parallel`
//! feature files are checked concurrently, and results come back in the same
//! order as the input.

use crate::config::Config;
use crate::rule::{LintError, Violation};
use crate::rules::{BlockFormatChecker, FrontMatterChecker, HeaderIssue};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A Markdown file selected for checking
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    /// Path used to open the file
    pub path: PathBuf,
    /// Path relative to the posts root; its directories name the post's categories
    pub relative: PathBuf,
}

/// Everything found in one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
    pub header_issues: Vec<HeaderIssue>,
}

impl FileReport {
    pub fn finding_count(&self) -> usize {
        self.violations.len() + self.header_issues.len()
    }

    pub fn is_clean(&self) -> bool {
        self.finding_count() == 0
    }

    pub fn display_path(&self) -> String {
        let path = self.path.to_string_lossy().into_owned();
        path.strip_prefix("./").unwrap_or(path.as_str()).to_string()
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet, LintError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| LintError::InvalidGlob {
            source,
            pattern: pattern.clone(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| LintError::InvalidGlob {
        source,
        pattern: patterns.join(", "),
    })
}

/// Path relative to the configured root, if `path` lives under it
fn strip_root(path: &Path, root: &Path) -> Option<PathBuf> {
    if let Ok(relative) = path.strip_prefix(root) {
        return Some(relative.to_path_buf());
    }
    let (canonical_path, canonical_root) = (path.canonicalize().ok()?, root.canonicalize().ok()?);
    canonical_path
        .strip_prefix(&canonical_root)
        .ok()
        .map(Path::to_path_buf)
}

/// Path of an explicitly named file relative to the configured root, or just
/// its file name when it lives elsewhere
fn relative_to_root(path: &Path, root: &Path) -> PathBuf {
    strip_root(path, root)
        .or_else(|| path.file_name().map(PathBuf::from))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Collect the Markdown files under `paths`.
///
/// Directories are walked recursively and yield `.md` files only, honoring
/// `.gitignore` when `respect-gitignore` is set. Files given explicitly are
/// always checked, whatever their extension. Paths are made relative to the
/// configured root, so walking a category directory keeps the category in the
/// path; files outside the root are taken relative to the walked directory.
/// Exclude patterns are matched against that relative path. The result is sorted
/// and free of duplicates.
pub fn discover_markdown_files(paths: &[PathBuf], config: &Config) -> Result<Vec<SourceFile>, LintError> {
    let excludes = build_exclude_set(&config.global.exclude)?;
    let use_gitignore = config.global.respect_gitignore;
    let mut files = Vec::new();

    for input in paths {
        if !input.exists() {
            return Err(LintError::PathNotFound { path: input.clone() });
        }

        if input.is_file() {
            let relative = relative_to_root(input, &config.global.root);
            if excludes.is_match(&relative) {
                log::warn!("{} ignored because of an exclude pattern", input.display());
                continue;
            }
            files.push(SourceFile {
                path: input.clone(),
                relative,
            });
            continue;
        }

        let mut walk_builder = WalkBuilder::new(input);
        walk_builder.ignore(use_gitignore); // Enable/disable .ignore
        walk_builder.git_ignore(use_gitignore); // Enable/disable .gitignore
        walk_builder.git_global(use_gitignore); // Enable/disable global gitignore
        walk_builder.git_exclude(use_gitignore); // Enable/disable .git/info/exclude
        walk_builder.parents(use_gitignore); // Enable/disable parent ignores
        walk_builder.require_git(false); // Process git ignores even if no repo detected

        for result in walk_builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Error walking {}: {err}", input.display());
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !is_markdown(path) {
                continue;
            }

            let relative = strip_root(path, &config.global.root)
                .unwrap_or_else(|| path.strip_prefix(input).unwrap_or(path).to_path_buf());
            if excludes.is_match(&relative) {
                log::debug!("Excluding {}", path.display());
                continue;
            }

            files.push(SourceFile {
                path: path.to_path_buf(),
                relative,
            });
        }
    }

    files.sort();
    files.dedup_by(|a, b| a.path == b.path);
    log::debug!("Discovered {} markdown files", files.len());
    Ok(files)
}

/// Runs every enabled check over a file
#[derive(Debug, Clone)]
pub struct FileProcessor {
    block_format: BlockFormatChecker,
    front_matter: Option<FrontMatterChecker>,
}

impl FileProcessor {
    pub fn from_config(config: &Config) -> Result<Self, LintError> {
        let front_matter = if config.front_matter.enabled {
            Some(FrontMatterChecker::new(&config.front_matter)?)
        } else {
            None
        };

        Ok(Self {
            block_format: BlockFormatChecker::from_config(config),
            front_matter,
        })
    }

    /// Check a document that is already in memory
    pub fn process_content(&self, content: &str, relative: &Path) -> (Vec<Violation>, Vec<HeaderIssue>) {
        let lines = crate::split_lines(content);
        let violations = self.block_format.check(&lines);
        let header_issues = self
            .front_matter
            .as_ref()
            .map(|checker| checker.check(&lines, relative))
            .unwrap_or_default();
        (violations, header_issues)
    }

    pub fn process_file(&self, file: &SourceFile) -> Result<FileReport, LintError> {
        let start = Instant::now();
        let bytes = fs::read(&file.path).map_err(|source| LintError::IoError {
            source,
            path: file.path.clone(),
        })?;
        let content = String::from_utf8(bytes).map_err(|_| LintError::InvalidUtf8 {
            path: file.path.clone(),
        })?;

        let (violations, header_issues) = self.process_content(&content, &file.relative);
        log::debug!(
            "Checked {} in {:?}: {} violations, {} header issues",
            file.path.display(),
            start.elapsed(),
            violations.len(),
            header_issues.len()
        );

        Ok(FileReport {
            path: file.path.clone(),
            violations,
            header_issues,
        })
    }

    /// Check many files. Results are returned in input order.
    #[cfg(feature = "parallel")]
    pub fn process_files(&self, files: &[SourceFile]) -> Vec<Result<FileReport, LintError>> {
        files.par_iter().map(|file| self.process_file(file)).collect()
    }

    /// Check many files. Results are returned in input order.
    #[cfg(not(feature = "parallel"))]
    pub fn process_files(&self, files: &[SourceFile]) -> Vec<Result<FileReport, LintError>> {
        files.iter().map(|file| self.process_file(file)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ViolationKind;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_discovers_markdown_recursively() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.md", "");
        write(dir.path(), "linux/b.md", "");
        write(dir.path(), "linux/notes.txt", "");

        let files = discover_markdown_files(&[dir.path().to_path_buf()], &Config::default()).unwrap();
        let relative: Vec<_> = files.iter().map(|f| f.relative.clone()).collect();
        assert_eq!(relative, vec![PathBuf::from("a.md"), PathBuf::from("linux/b.md")]);
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = tempdir().unwrap();
        write(dir.path(), "keep.md", "");
        write(dir.path(), "drafts/skip.md", "");

        let mut config = Config::default();
        config.global.exclude = vec!["drafts/**".to_string()];
        let files = discover_markdown_files(&[dir.path().to_path_buf()], &config).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, PathBuf::from("keep.md"));
    }

    #[test]
    fn test_respects_gitignore() {
        let dir = tempdir().unwrap();
        write(dir.path(), ".gitignore", "ignored/\n");
        write(dir.path(), "ignored/post.md", "");
        write(dir.path(), "post.md", "");

        let files = discover_markdown_files(&[dir.path().to_path_buf()], &Config::default()).unwrap();
        assert_eq!(files.len(), 1);

        let mut config = Config::default();
        config.global.respect_gitignore = false;
        let files = discover_markdown_files(&[dir.path().to_path_buf()], &config).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_explicit_file_is_kept() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "notes.markdown", "");
        let files = discover_markdown_files(std::slice::from_ref(&path), &Config::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, PathBuf::from("notes.markdown"));
    }

    #[test]
    fn test_missing_path() {
        let dir = tempdir().unwrap();
        let err = discover_markdown_files(&[dir.path().join("nope")], &Config::default()).unwrap_err();
        assert!(matches!(err, LintError::PathNotFound { .. }));
    }

    #[test]
    fn test_invalid_exclude_glob() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.global.exclude = vec!["[".to_string()];
        let err = discover_markdown_files(&[dir.path().to_path_buf()], &config).unwrap_err();
        assert!(matches!(err, LintError::InvalidGlob { .. }));
    }

    #[test]
    fn test_process_files_keeps_order() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.md", "text\n- item\n");
        write(dir.path(), "b.md", "clean\n");
        write(dir.path(), "c.md", "```\n\n```\n");

        let config = Config::default();
        let files = discover_markdown_files(&[dir.path().to_path_buf()], &config).unwrap();
        let processor = FileProcessor::from_config(&config).unwrap();
        let reports: Vec<FileReport> = processor
            .process_files(&files)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].violations[0].kind, ViolationKind::ListError);
        assert!(reports[1].is_clean());
        assert_eq!(reports[2].violations[0].kind, ViolationKind::CodeBoundaryEmptyLineError);
    }

    #[test]
    fn test_front_matter_uses_relative_path() {
        let dir = tempdir().unwrap();
        write(dir.path(), "rust/post.md", "---\ncategories: [rust]\ntags: [cargo]\n---\n");
        write(dir.path(), "misplaced/post.md", "---\ncategories: [rust]\n---\n");

        let config = Config::default();
        let files = discover_markdown_files(&[dir.path().to_path_buf()], &config).unwrap();
        let processor = FileProcessor::from_config(&config).unwrap();
        let reports: Vec<_> = processor.process_files(&files).into_iter().map(Result::unwrap).collect();

        // Sorted: misplaced/ before rust/
        assert_eq!(reports[0].header_issues.len(), 1);
        assert!(reports[1].is_clean());
    }

    #[test]
    fn test_walking_category_directory_keeps_root_relative_path() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("source/_posts");
        write(&root, "rust/a.md", "---\ncategories: [rust]\n---\n");

        let mut config = Config::default();
        config.global.root = root.clone();

        let processor = FileProcessor::from_config(&config).unwrap();
        for input in [root.clone(), root.join("rust"), root.join("rust/a.md")] {
            let files = discover_markdown_files(std::slice::from_ref(&input), &config).unwrap();
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].relative, PathBuf::from("rust/a.md"), "walking {}", input.display());

            let reports: Vec<_> = processor.process_files(&files).into_iter().map(Result::unwrap).collect();
            assert!(reports[0].is_clean(), "walking {}: {:?}", input.display(), reports[0]);
        }
    }

    #[test]
    fn test_front_matter_can_be_disabled() {
        let mut config = Config::default();
        config.front_matter.enabled = false;
        let processor = FileProcessor::from_config(&config).unwrap();
        let (violations, issues) = processor.process_content("---\ntags:\n---\n", Path::new("p.md"));
        assert!(violations.is_empty());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.md");
        fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

        let processor = FileProcessor::from_config(&Config::default()).unwrap();
        let err = processor
            .process_file(&SourceFile {
                path: path.clone(),
                relative: PathBuf::from("bad.md"),
            })
            .unwrap_err();
        assert!(matches!(err, LintError::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_display_path_strips_dot_prefix() {
        let report = FileReport {
            path: PathBuf::from("./source/_posts/a.md"),
            ..FileReport::default()
        };
        assert_eq!(report.display_path(), "source/_posts/a.md");
    }
}
