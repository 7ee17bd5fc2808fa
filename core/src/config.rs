#![deny(missing_docs)]

//! # Generation Config
//!
//! Per-app configuration loaded from `apps/<app>/config/codegen.yaml`:
//! one section per generation mode plus shared layer overrides and the
//! schema snapshot location.

use crate::analyzer::GenMode;
use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one generation mode (`model`, `module`, or `api`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModeSection {
    /// Physical table to generate from.
    pub table_name: String,
    /// Optional table-name prefix stripped from derived identifiers.
    #[serde(default)]
    pub table_prefix: Option<String>,
    /// Overrides the derived package name.
    #[serde(default)]
    pub package_name: Option<String>,
    /// Overrides the derived struct name.
    #[serde(default)]
    pub struct_name: Option<String>,
    /// Human description carried into generated doc comments.
    #[serde(default)]
    pub description: Option<String>,
}

/// The full generation config for one app.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenConfig {
    /// Schema snapshot file, relative to the app directory.
    #[serde(default)]
    pub schema_snapshot: Option<PathBuf>,
    /// Layer key -> parent directory override.
    #[serde(default)]
    pub layer_parent_dirs: BTreeMap<String, String>,
    /// Layer key -> emitted layer-name override.
    #[serde(default)]
    pub layer_names: BTreeMap<String, String>,
    /// `model` mode settings.
    #[serde(default)]
    pub model: Option<ModeSection>,
    /// `module` mode settings.
    #[serde(default)]
    pub module: Option<ModeSection>,
    /// `api` mode settings.
    #[serde(default)]
    pub api: Option<ModeSection>,
}

impl GenConfig {
    /// Loads the config from a YAML file.
    pub fn load(path: &Path) -> AppResult<GenConfig> {
        if !path.exists() {
            return Err(AppError::PathMissing(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        serde_yaml::from_str(&text)
            .map_err(|e| AppError::General(format!("invalid config {:?}: {}", path, e)))
    }

    /// The section for a generation mode, if configured.
    pub fn section(&self, mode: GenMode) -> Option<&ModeSection> {
        match mode {
            GenMode::Model => self.model.as_ref(),
            GenMode::Module => self.module.as_ref(),
            GenMode::Api => self.api.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codegen.yaml");
        fs::write(
            &path,
            r#"
schema_snapshot: config/schema.yaml
layer_parent_dirs:
  handler: http
layer_names:
  dao: repository
module:
  table_name: iam_users
  table_prefix: iam_
  description: user accounts
"#,
        )
        .unwrap();

        let cfg = GenConfig::load(&path).unwrap();
        assert_eq!(
            cfg.schema_snapshot.as_deref(),
            Some(Path::new("config/schema.yaml"))
        );
        assert_eq!(cfg.layer_parent_dirs.get("handler").unwrap(), "http");
        assert_eq!(cfg.layer_names.get("dao").unwrap(), "repository");

        let section = cfg.section(GenMode::Module).unwrap();
        assert_eq!(section.table_name, "iam_users");
        assert_eq!(section.table_prefix.as_deref(), Some("iam_"));
        assert!(cfg.section(GenMode::Api).is_none());
    }

    #[test]
    fn test_missing_config_file() {
        let res = GenConfig::load(Path::new("/nonexistent/codegen.yaml"));
        assert!(matches!(res, Err(AppError::PathMissing(_))));
    }
}
