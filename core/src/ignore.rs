#![deny(missing_docs)]

//! # Ignore/Exclusion Matcher
//!
//! Decides whether a relative path is excluded from a tree copy. Matching is
//! segment-wise: a path is ignored when any segment exactly matches a
//! configured name, or when the final segment matches a `*.ext` suffix glob.
//! Directory matches prune the whole subtree during walks.
//!
//! One matcher serves both the zero-configuration default set and externally
//! supplied ignore files, with identical matching semantics.

use crate::error::AppResult;
use std::fs;
use std::path::Path;

/// Directories and file patterns excluded from every clone by default.
const DEFAULT_IGNORES: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "log",
    "logs",
    "tmp",
    "temp",
    ".idea",
    ".vscode",
    ".DS_Store",
    "*.log",
    "*.tmp",
    ".env.local",
    "coverage",
    "dist",
    "build",
];

/// A single ignore rule.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    /// Matches a path segment exactly (`target`, `.git`, `.DS_Store`).
    Exact(String),
    /// Matches a filename suffix (`*.log` stores `.log`).
    Suffix(String),
}

impl Pattern {
    fn parse(raw: &str) -> Option<Pattern> {
        // Trailing slash marks a directory rule in gitignore files; segment
        // matching already prunes directories, so it is equivalent here.
        let token = raw.trim().trim_end_matches('/');
        if token.is_empty() || token.starts_with('#') {
            return None;
        }
        if let Some(ext) = token.strip_prefix('*') {
            if ext.starts_with('.') {
                return Some(Pattern::Suffix(ext.to_string()));
            }
        }
        Some(Pattern::Exact(token.to_string()))
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            Pattern::Exact(name) => segment == name,
            Pattern::Suffix(ext) => segment.ends_with(ext.as_str()),
        }
    }
}

/// Set of path-segment patterns consulted by every tree-walk decision.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    patterns: Vec<Pattern>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        IgnoreSet::defaults()
    }
}

impl IgnoreSet {
    /// The built-in default set.
    pub fn defaults() -> Self {
        let patterns = DEFAULT_IGNORES
            .iter()
            .filter_map(|raw| Pattern::parse(raw))
            .collect();
        IgnoreSet { patterns }
    }

    /// Builds a set from gitignore-style lines (comments and blanks skipped).
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let patterns = lines.into_iter().filter_map(Pattern::parse).collect();
        IgnoreSet { patterns }
    }

    /// Unions the rules from an external ignore file into this set.
    ///
    /// A missing file is not an error: the built-in rules stay authoritative.
    pub fn extend_from_file(mut self, path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(self);
        }
        let content = fs::read_to_string(path)?;
        self.patterns
            .extend(content.lines().filter_map(Pattern::parse));
        Ok(self)
    }

    /// Returns true if any segment of `relative_path` matches a rule.
    pub fn should_ignore(&self, relative_path: &Path) -> bool {
        for component in relative_path.components() {
            let segment = component.as_os_str().to_string_lossy();
            if self
                .patterns
                .iter()
                .any(|pattern| pattern.matches(segment.as_ref()))
            {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_suffix_glob_matches_final_segment() {
        let set = IgnoreSet::defaults();
        assert!(set.should_ignore(&PathBuf::from("a/b/c.log")));
        assert!(!set.should_ignore(&PathBuf::from("a/b/c.rs")));
    }

    #[test]
    fn test_directory_segment_matches_anywhere() {
        let set = IgnoreSet::defaults();
        assert!(set.should_ignore(&PathBuf::from("target/x/y.rs")));
        assert!(set.should_ignore(&PathBuf::from("apps/demo/target")));
        assert!(!set.should_ignore(&PathBuf::from("src/targets.rs")));
    }

    #[test]
    fn test_idempotent() {
        let set = IgnoreSet::defaults();
        let p = PathBuf::from("logs/app.log");
        assert_eq!(set.should_ignore(&p), set.should_ignore(&p));
    }

    #[test]
    fn test_from_lines_skips_comments_and_blanks() {
        let set = IgnoreSet::from_lines(["# comment", "", "*.bak", "secrets/"]);
        assert!(set.should_ignore(&PathBuf::from("data/old.bak")));
        assert!(set.should_ignore(&PathBuf::from("secrets/key.pem")));
        assert!(!set.should_ignore(&PathBuf::from("src/main.rs")));
    }

    #[test]
    fn test_extend_from_missing_file_is_noop() {
        let set = IgnoreSet::defaults()
            .extend_from_file(&PathBuf::from("/nonexistent/.gitignore"))
            .unwrap();
        assert!(set.should_ignore(&PathBuf::from(".git/config")));
    }

    #[test]
    fn test_extend_from_file_unions_rules() {
        let dir = tempfile::tempdir().unwrap();
        let ignore_file = dir.path().join(".gitignore");
        std::fs::write(&ignore_file, "*.gen\nfixtures\n").unwrap();

        let set = IgnoreSet::defaults().extend_from_file(&ignore_file).unwrap();
        assert!(set.should_ignore(&PathBuf::from("src/out.gen")));
        assert!(set.should_ignore(&PathBuf::from("tests/fixtures/a.rs")));
        // Defaults still apply.
        assert!(set.should_ignore(&PathBuf::from(".git/HEAD")));
    }
}
