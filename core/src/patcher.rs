#![deny(missing_docs)]

//! # Source Patcher
//!
//! Appends statements to the body of an existing top-level function via
//! position-preserving string splicing: the file is parsed losslessly, the
//! insertion offset is taken from the syntax tree, and everything outside the
//! splice point survives byte for byte.
//!
//! Repeated calls append again; callers decide whether a statement is due.

use crate::error::{AppError, AppResult};
use crate::syntax::{find_top_level_fn, parse_source};
use ra_ap_syntax::ast::AstNode;
use ra_ap_syntax::SyntaxKind;
use std::fs;
use std::path::{Path, PathBuf};

/// A patch destination: one function inside one file.
#[derive(Debug, Clone)]
pub struct PatchTarget {
    /// File holding the function.
    pub file: PathBuf,
    /// Name of the top-level function to extend.
    pub function: String,
}

/// Appends `statement` as the last statement of the named top-level function
/// in `path`, then rewrites the file.
///
/// The statement is validated by parsing before any splicing happens.
pub fn append_call_to_function(path: &Path, fn_name: &str, statement: &str) -> AppResult<()> {
    let probe = format!("fn __probe() {{ {} }}", statement);
    parse_source(&probe, path).map_err(|_| AppError::Parse {
        file: path.to_path_buf(),
        detail: format!("statement is not valid Rust: {}", statement),
    })?;

    let source = fs::read_to_string(path)?;
    let file = parse_source(&source, path)?;

    let function = find_top_level_fn(&file, fn_name).ok_or_else(|| AppError::FunctionNotFound {
        file: path.to_path_buf(),
        function: fn_name.to_string(),
    })?;
    let body = function.body().ok_or_else(|| AppError::FunctionNotFound {
        file: path.to_path_buf(),
        function: fn_name.to_string(),
    })?;

    let r_curly = body
        .syntax()
        .last_token()
        .filter(|t| t.kind() == SyntaxKind::R_CURLY)
        .ok_or_else(|| AppError::Parse {
            file: path.to_path_buf(),
            detail: format!("function {} has no closing brace", fn_name),
        })?;

    let insert_pos: usize = r_curly.text_range().start().into();
    let needs_newline = !source[..insert_pos].ends_with('\n');

    let mut patched = source.clone();
    let injected = if needs_newline {
        format!("\n    {}\n", statement)
    } else {
        format!("    {}\n", statement)
    };
    patched.insert_str(insert_pos, &injected);

    fs::write(path, patched)?;
    Ok(())
}

/// Convenience wrapper applying a statement to a [`PatchTarget`].
pub fn apply(target: &PatchTarget, statement: &str) -> AppResult<()> {
    append_call_to_function(&target.file, &target.function, statement)
}
