#![deny(missing_docs)]

//! # Schema Source
//!
//! Snapshot types for relational schema introspection and the `SchemaSource`
//! interface the analyzer consumes. The live database driver is an external
//! collaborator; this crate ships a serde-loaded YAML snapshot as its
//! concrete source.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A physical column, the source of truth for generated field metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Physical column name (`user_name`).
    pub name: String,
    /// Physical column type (`varchar(64)`).
    #[serde(rename = "type")]
    pub column_type: String,
    /// Whether the column accepts NULL.
    #[serde(default)]
    pub nullable: bool,
    /// Declared default value, if any.
    #[serde(default)]
    pub default: Option<String>,
    /// Column comment.
    #[serde(default)]
    pub comment: String,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub primary_key: bool,
}

/// A physical table: name plus ordered columns. Fetched once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Physical table name (`iam_users`).
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
}

/// Interface the analyzer depends on: list tables, describe one.
pub trait SchemaSource {
    /// Names of all tables in the target schema.
    fn list_tables(&self) -> AppResult<Vec<String>>;

    /// Full column list for one table.
    ///
    /// Fails with `SchemaNotFound` when the table does not exist.
    fn describe_table(&self, name: &str) -> AppResult<Table>;
}

/// An immutable schema snapshot, typically loaded from a YAML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// Tables in the snapshot.
    pub tables: Vec<Table>,
}

impl SchemaSnapshot {
    /// Loads a snapshot from a YAML file.
    pub fn from_yaml_file(path: &Path) -> AppResult<SchemaSnapshot> {
        if !path.exists() {
            return Err(AppError::PathMissing(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        serde_yaml::from_str(&text)
            .map_err(|e| AppError::General(format!("invalid schema snapshot {:?}: {}", path, e)))
    }
}

impl SchemaSource for SchemaSnapshot {
    fn list_tables(&self) -> AppResult<Vec<String>> {
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    fn describe_table(&self, name: &str) -> AppResult<Table> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| AppError::SchemaNotFound(name.to_string()))
    }
}
