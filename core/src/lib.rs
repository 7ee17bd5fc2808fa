#![deny(missing_docs)]

//! # Appforge Core
//!
//! Engine for cloning Rust projects on disk and generating layered application
//! code (model / dao / service / api / router / error codes) from a relational
//! schema snapshot, including syntax-tree-level patching of existing source
//! files.

/// Shared error types.
pub mod error;

/// Naming transforms (snake_case ⇄ PascalCase/lowerCamel, prefix stripping).
pub mod naming;

/// Path exclusion rules for tree walks.
pub mod ignore;

/// Project and app identity discovery.
pub mod project;

/// Schema snapshot types and the schema source interface.
pub mod schema;

/// Physical column type to Rust type mapping.
pub mod type_mapping;

/// Generation config loaded from `codegen.yaml`.
pub mod config;

/// Schema-to-layer analysis.
pub mod analyzer;

/// Template rendering and file materialization.
pub mod render;

/// Tree cloning with reference rewriting.
pub mod cloner;

/// Syntax-aware path-root rewriting.
pub mod rewrite;

/// Statement injection into existing source files.
pub mod patcher;

pub(crate) mod syntax;

pub use analyzer::{analyze, FieldDescriptor, GenMode, GenRequest, LayerKind, LayerPlan};
pub use cloner::{clone_app, clone_project};
pub use config::GenConfig;
pub use error::{AppError, AppResult};
pub use ignore::IgnoreSet;
pub use patcher::append_call_to_function;
pub use project::{AppDescriptor, ProjectDescriptor};
pub use render::materialize;
pub use schema::{Column, SchemaSnapshot, SchemaSource, Table};
