#![deny(missing_docs)]

//! # Schema-to-Layer Analyzer
//!
//! Given a table identifier and a generation mode, produces one `LayerPlan`
//! per configured layer: target directory, target filename, template, and a
//! field list carrying both the physical and the transformed identifiers for
//! every column.

use crate::config::GenConfig;
use crate::error::AppResult;
use crate::naming;
use crate::patcher::PatchTarget;
use crate::project::AppDescriptor;
use crate::schema::{Column, SchemaSource};
use crate::type_mapping::rust_type_for;
use serde::Serialize;
use std::path::PathBuf;

/// Nullability description carried into generated comments.
const NULLABLE_DEFAULT_DESC: &str = "not null";

/// One generated artifact category for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Data-model struct layer.
    Model,
    /// Persistence-access layer.
    Dao,
    /// Service-logic layer.
    Service,
    /// HTTP-handler layer.
    Handler,
    /// Router-registration layer.
    Router,
    /// Error-code registration layer.
    ErrorCode,
}

impl LayerKind {
    /// Stable key used for config overrides and template lookup.
    pub fn key(&self) -> &'static str {
        match self {
            LayerKind::Model => "model",
            LayerKind::Dao => "dao",
            LayerKind::Service => "service",
            LayerKind::Handler => "handler",
            LayerKind::Router => "router",
            LayerKind::ErrorCode => "codes",
        }
    }

    /// Parent directory under the app's `src/` when no override is set.
    pub fn default_parent_dir(&self) -> &'static str {
        match self {
            LayerKind::Model => "model",
            LayerKind::Dao => "dao",
            LayerKind::Service => "service",
            LayerKind::Handler => "api",
            LayerKind::Router => "router",
            LayerKind::ErrorCode => "codes",
        }
    }

    /// Append-capable layers accumulate content across generation runs
    /// instead of being created once.
    pub fn is_append(&self) -> bool {
        matches!(self, LayerKind::ErrorCode)
    }
}

/// Generation mode selecting the layer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    /// Model + dao layers.
    Model,
    /// All layers, including registrations.
    Module,
    /// Handler + router layers.
    Api,
}

impl GenMode {
    /// The layers generated by this mode.
    pub fn layers(&self) -> &'static [LayerKind] {
        match self {
            GenMode::Model => &[LayerKind::Model, LayerKind::Dao],
            GenMode::Module => &[
                LayerKind::Model,
                LayerKind::Dao,
                LayerKind::Service,
                LayerKind::Handler,
                LayerKind::Router,
                LayerKind::ErrorCode,
            ],
            GenMode::Api => &[LayerKind::Handler, LayerKind::Router],
        }
    }

    /// Whether this mode wires generated routes into the router entry file.
    pub fn patches_router(&self) -> bool {
        matches!(self, GenMode::Module | GenMode::Api)
    }

    /// Whether this mode wires generated error codes into the codes entry file.
    pub fn patches_codes(&self) -> bool {
        matches!(self, GenMode::Module)
    }
}

/// A generation request, independent of concrete CLI syntax.
#[derive(Debug, Clone)]
pub struct GenRequest {
    /// Selected mode.
    pub mode: GenMode,
    /// Physical table name.
    pub table_name: String,
    /// Optional table-name prefix to strip from derived identifiers.
    pub table_prefix: Option<String>,
    /// Overrides the derived package name.
    pub package_name: Option<String>,
    /// Overrides the derived struct name.
    pub struct_name: Option<String>,
    /// Human description carried into generated doc comments.
    pub description: Option<String>,
}

/// Per-field metadata derived from one column. Exactly one per column per
/// layer; the transformation is deterministic and total.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    /// Primary-key flag.
    pub is_primary_key: bool,
    /// PascalCase name with the `ID` special case (`UserName`, `ID`).
    pub field_name: String,
    /// lowerCamel variant (`userName`).
    pub field_lower_camel: String,
    /// Serialization tag (`userID` for `user_id`).
    pub json_tag: String,
    /// Rust type emitted into generated code.
    pub field_type: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Physical column name.
    pub column_name: String,
    /// Physical column type.
    pub column_type: String,
    /// `"not null"` or empty.
    pub nullable_desc: String,
    /// Default-value expression (`default 0`, `default ''`).
    pub default_value: String,
    /// Column comment text.
    pub comment: String,
}

impl FieldDescriptor {
    fn from_column(column: &Column) -> FieldDescriptor {
        let nullable_desc = if column.nullable {
            String::new()
        } else {
            NULLABLE_DEFAULT_DESC.to_string()
        };
        let default_value = match column.default.as_deref() {
            Some(d) if !d.is_empty() => format!("default {}", d),
            _ => "default ''".to_string(),
        };
        FieldDescriptor {
            is_primary_key: column.primary_key,
            field_name: naming::pascal_field_name(&column.name),
            field_lower_camel: naming::to_lower_camel(&column.name),
            json_tag: naming::to_json_tag(&column.name),
            field_type: rust_type_for(&column.column_type),
            nullable: column.nullable,
            column_name: column.name.clone(),
            column_type: column.column_type.clone(),
            nullable_desc,
            default_value,
            comment: column.comment.clone(),
        }
    }
}

/// The extra-parameters struct bound to every layer template.
#[derive(Debug, Clone, Serialize)]
pub struct RenderParams {
    /// Project directory name.
    pub project_name: String,
    /// Manifest-declared module identity.
    pub module_identity: String,
    /// App name.
    pub app_name: String,
    /// App path relative to the project root.
    pub app_path_in_project: String,
    /// Package (module) name for generated files.
    pub package_name: String,
    /// Physical table name.
    pub table_name: String,
    /// Human description for doc comments.
    pub description: String,
    /// Derived struct name (prefix already stripped).
    pub struct_name: String,
    /// lowerCamel variant of the struct name.
    pub struct_name_lower_camel: String,
    /// Resolved name of the model layer (after overrides).
    pub model_layer_name: String,
    /// Resolved name of the dao layer (after overrides).
    pub dao_layer_name: String,
    /// Name of the layer this template renders.
    pub layer_name: String,
    /// True when any field uses a chrono type.
    pub uses_chrono: bool,
    /// True when any field uses `serde_json::Value`.
    pub uses_json: bool,
    /// One descriptor per column.
    pub fields: Vec<FieldDescriptor>,
}

/// One plan per (table, layer): where to write, which template, with what
/// parameters. Constructed fresh per run and consumed by the renderer.
#[derive(Debug, Clone)]
pub struct LayerPlan {
    /// The layer this plan materializes.
    pub layer: LayerKind,
    /// Resolved layer name (after `layer_names` overrides).
    pub layer_name: String,
    /// Directory receiving the generated file.
    pub target_dir: PathBuf,
    /// Generated filename.
    pub target_file: String,
    /// Template key in the render environment.
    pub template: &'static str,
    /// Append instead of create-if-absent.
    pub append: bool,
    /// Template parameters.
    pub params: RenderParams,
}

/// Analyzes a table against the requested mode and produces one `LayerPlan`
/// per layer.
///
/// Fails with `SchemaNotFound` when the table does not exist in the schema
/// source.
pub fn analyze(
    schema: &dyn SchemaSource,
    app: &AppDescriptor,
    cfg: &GenConfig,
    req: &GenRequest,
) -> AppResult<Vec<LayerPlan>> {
    let table = schema.describe_table(&req.table_name)?;
    let prefix = req.table_prefix.as_deref().unwrap_or("");

    let struct_name = match &req.struct_name {
        Some(name) => name.clone(),
        None => {
            let derived = naming::to_struct_ident(&table.name);
            naming::strip_table_prefix(&derived, &table.name, prefix)
        }
    };
    let struct_name_lower_camel = naming::first_letter_to_lower(&struct_name);

    let file_name = naming::strip_table_prefix_from_filename(
        &format!("{}.rs", table.name),
        &table.name,
        prefix,
    );
    let table_stem = file_name.trim_end_matches(".rs").to_string();

    let package_name = req.package_name.clone().unwrap_or_else(|| table_stem.clone());

    let fields: Vec<FieldDescriptor> = table.columns.iter().map(FieldDescriptor::from_column).collect();
    let uses_chrono = fields.iter().any(|f| f.field_type.starts_with("Naive"));
    let uses_json = fields.iter().any(|f| f.field_type == "serde_json::Value");

    let layer_name = |kind: LayerKind| -> String {
        cfg.layer_names
            .get(kind.key())
            .cloned()
            .unwrap_or_else(|| kind.key().to_string())
    };
    let model_layer_name = layer_name(LayerKind::Model);
    let dao_layer_name = layer_name(LayerKind::Dao);

    let mut plans = Vec::new();
    for &kind in req.mode.layers() {
        let parent_dir = cfg
            .layer_parent_dirs
            .get(kind.key())
            .cloned()
            .unwrap_or_else(|| kind.default_parent_dir().to_string());

        // The error-code layer lands at the project root, keyed by package,
        // so repeated runs across tables accumulate into one place.
        let (target_dir, target_file) = if kind == LayerKind::ErrorCode {
            (
                app.project.root.join("src").join(&parent_dir),
                format!("{}.rs", package_name),
            )
        } else {
            (app.work_dir.join("src").join(&parent_dir), file_name.clone())
        };

        let params = RenderParams {
            project_name: app.project.name.clone(),
            module_identity: app.project.module_identity.clone(),
            app_name: app.app_name.clone(),
            app_path_in_project: app.app_path_in_project.to_string_lossy().into_owned(),
            package_name: package_name.clone(),
            table_name: table.name.clone(),
            description: req.description.clone().unwrap_or_default(),
            struct_name: struct_name.clone(),
            struct_name_lower_camel: struct_name_lower_camel.clone(),
            model_layer_name: model_layer_name.clone(),
            dao_layer_name: dao_layer_name.clone(),
            layer_name: layer_name(kind),
            uses_chrono,
            uses_json,
            fields: fields.clone(),
        };

        plans.push(LayerPlan {
            layer: kind,
            layer_name: layer_name(kind),
            target_dir,
            target_file,
            template: kind.key(),
            append: kind.is_append(),
            params,
        });
    }

    Ok(plans)
}

/// The router entry point receiving generated route registrations.
pub fn router_patch_target(app: &AppDescriptor) -> PatchTarget {
    PatchTarget {
        file: app.work_dir.join("src/router/mod.rs"),
        function: "register_routes".to_string(),
    }
}

/// Statement appended to the router entry function for a generated module.
pub fn router_statement(table_stem: &str) -> String {
    format!("{}::register_routes(cfg);", table_stem)
}

/// The error-code entry point receiving generated code registrations.
pub fn codes_patch_target(app: &AppDescriptor) -> PatchTarget {
    PatchTarget {
        file: app.project.root.join("src/codes/mod.rs"),
        function: "register_codes".to_string(),
    }
}

/// Statement appended to the codes entry function for a generated module.
pub fn codes_statement(table_stem: &str) -> String {
    format!("registry.extend({}_error_codes());", table_stem)
}
