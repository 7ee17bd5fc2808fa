//! Shared AST helpers: parsing with collected diagnostics and top-level
//! function lookup.

use crate::error::{AppError, AppResult};
use ra_ap_edition::Edition;
use ra_ap_syntax::ast::{self, HasModuleItem, HasName};
use ra_ap_syntax::SourceFile;
use std::path::Path;

/// Parses Rust source text, converting parser diagnostics into `AppError::Parse`.
pub(crate) fn parse_source(source: &str, file: &Path) -> AppResult<SourceFile> {
    let parse = SourceFile::parse(source, Edition::Edition2021);
    if !parse.errors().is_empty() {
        let detail: Vec<String> = parse.errors().into_iter().map(|e| e.to_string()).collect();
        return Err(AppError::Parse {
            file: file.to_path_buf(),
            detail: detail.join(", "),
        });
    }
    Ok(parse.tree())
}

/// Finds a function by name among the file's top-level items only.
pub(crate) fn find_top_level_fn(file: &SourceFile, name: &str) -> Option<ast::Fn> {
    file.items().find_map(|item| match item {
        ast::Item::Fn(f) if f.name().is_some_and(|n| n.text() == name) => Some(f),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_source_ok() {
        let file = parse_source("fn main() {}", &PathBuf::from("main.rs")).unwrap();
        assert!(find_top_level_fn(&file, "main").is_some());
    }

    #[test]
    fn test_parse_source_error() {
        let res = parse_source("fn main( {", &PathBuf::from("bad.rs"));
        assert!(matches!(res, Err(AppError::Parse { .. })));
    }

    #[test]
    fn test_find_top_level_fn_ignores_nested() {
        let code = "mod inner { pub fn hidden() {} }\nfn visible() {}";
        let file = parse_source(code, &PathBuf::from("lib.rs")).unwrap();
        assert!(find_top_level_fn(&file, "visible").is_some());
        assert!(find_top_level_fn(&file, "hidden").is_none());
    }
}
