#![deny(missing_docs)]

//! # Path Rewriting
//!
//! Syntax-aware rewriting of crate references in Rust source text. The file
//! is parsed into a lossless syntax tree and replacement happens by splicing
//! the new identifier over the exact text ranges of matching path segments,
//! so formatting, comments, and string literals are preserved untouched.
//!
//! Matching is exact-segment, not substring: a `use` path component or a
//! qualified-path root must equal the old identifier in full. Bare
//! single-segment identifiers outside `use` items are left alone so locals
//! that happen to share the project name are never renamed.

use crate::error::AppResult;
use crate::syntax::parse_source;
use ra_ap_syntax::{AstNode, SyntaxKind, TextRange};
use std::path::Path;

/// Replaces every path component equal to `old` with `new` inside `use`
/// declarations, and every qualified-path root (`old::…`) elsewhere.
///
/// Returns the rewritten source. Fails with `AppError::Parse` when the input
/// does not parse; the input string is never partially modified.
pub fn rewrite_path_roots(source: &str, file: &Path, old: &str, new: &str) -> AppResult<String> {
    if old.is_empty() || old == new {
        return Ok(source.to_string());
    }

    let tree = parse_source(source, file)?;

    let mut ranges: Vec<TextRange> = Vec::new();
    for node in tree.syntax().descendants() {
        if node.kind() != SyntaxKind::NAME_REF || node.text() != old {
            continue;
        }
        let Some(segment) = node.parent().filter(|p| p.kind() == SyntaxKind::PATH_SEGMENT) else {
            continue;
        };
        let Some(path) = segment.parent().filter(|p| p.kind() == SyntaxKind::PATH) else {
            continue;
        };

        let in_use_decl = path.ancestors().any(|a| a.kind() == SyntaxKind::USE);
        let is_qualifier = path
            .parent()
            .is_some_and(|parent| parent.kind() == SyntaxKind::PATH);

        if in_use_decl || is_qualifier {
            ranges.push(node.text_range());
        }
    }

    // Splice back-to-front so earlier ranges stay valid.
    let mut out = source.to_string();
    for range in ranges.iter().rev() {
        let start: usize = range.start().into();
        let end: usize = range.end().into();
        out.replace_range(start..end, new);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn rewrite(source: &str) -> String {
        rewrite_path_roots(source, &PathBuf::from("t.rs"), "oldproj", "newproj").unwrap()
    }

    #[test]
    fn test_rewrites_use_declarations() {
        let src = "use oldproj::model::User;\nuse oldproj::dao;\n";
        assert_eq!(rewrite(src), "use newproj::model::User;\nuse newproj::dao;\n");
    }

    #[test]
    fn test_rewrites_single_segment_use() {
        assert_eq!(rewrite("use oldproj;\n"), "use newproj;\n");
    }

    #[test]
    fn test_rewrites_qualified_expressions_and_types() {
        let src = "fn f() -> oldproj::model::User {\n    oldproj::dao::fetch()\n}\n";
        let out = rewrite(src);
        assert_eq!(
            out,
            "fn f() -> newproj::model::User {\n    newproj::dao::fetch()\n}\n"
        );
    }

    #[test]
    fn test_leaves_strings_and_comments_alone() {
        let src = "// oldproj is great\nfn f() -> &'static str {\n    \"oldproj::x\"\n}\n";
        assert_eq!(rewrite(src), src);
    }

    #[test]
    fn test_leaves_bare_identifiers_alone() {
        let src = "fn f(oldproj: u32) -> u32 {\n    oldproj + 1\n}\n";
        assert_eq!(rewrite(src), src);
    }

    #[test]
    fn test_no_substring_matches() {
        let src = "use oldproject::model;\nuse my_oldproj::x;\n";
        assert_eq!(rewrite(src), src);
    }

    #[test]
    fn test_use_tree_groups() {
        let src = "use oldproj::{model::User, dao::UserDao};\n";
        assert_eq!(rewrite(src), "use newproj::{model::User, dao::UserDao};\n");
    }

    #[test]
    fn test_parse_error_surfaces() {
        let res = rewrite_path_roots("fn broken( {", &PathBuf::from("b.rs"), "a", "b");
        assert!(res.is_err());
    }
}
