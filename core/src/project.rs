#![deny(missing_docs)]

//! # Project & App Identity
//!
//! Derives project and sub-application identity from the working directory
//! and the root manifest. Descriptors are computed once per run and are
//! read-only afterwards.

use crate::error::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Identity of a project root: directory name, manifest-declared module
/// identity, and filesystem root.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    /// Directory basename of the project root.
    pub name: String,
    /// `package.name` declared in the root `Cargo.toml`.
    pub module_identity: String,
    /// `package.repository`, when declared.
    pub repository: Option<String>,
    /// Absolute filesystem root.
    pub root: PathBuf,
}

impl ProjectDescriptor {
    /// Reads project identity from `root/Cargo.toml`.
    ///
    /// Fails with `NotAProject` when no manifest is present.
    pub fn discover(root: &Path) -> AppResult<ProjectDescriptor> {
        let manifest_path = root.join("Cargo.toml");
        if !manifest_path.exists() {
            return Err(AppError::NotAProject(root.to_path_buf()));
        }

        let text = fs::read_to_string(&manifest_path)?;
        let manifest: toml::Value = toml::from_str(&text)
            .map_err(|e| AppError::General(format!("invalid manifest {:?}: {}", manifest_path, e)))?;

        let dir_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let package = manifest.get("package");
        let module_identity = package
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or(dir_name.as_str())
            .to_string();
        let repository = package
            .and_then(|p| p.get("repository"))
            .and_then(|r| r.as_str())
            .map(str::to_string);

        Ok(ProjectDescriptor {
            name: dir_name,
            module_identity,
            repository,
            root: root.to_path_buf(),
        })
    }
}

/// Identity of a sub-application living at `<project_root>/apps/<app>`.
#[derive(Debug, Clone)]
pub struct AppDescriptor {
    /// The enclosing project.
    pub project: ProjectDescriptor,
    /// App directory name.
    pub app_name: String,
    /// Path of the app relative to the project root (`apps/<app>`).
    pub app_path_in_project: PathBuf,
    /// Absolute app directory (`<project_root>/apps/<app>`).
    pub work_dir: PathBuf,
}

impl AppDescriptor {
    /// Derives app identity from a working directory of the shape
    /// `<…>/<project>/apps/<app>[/…]`.
    pub fn from_work_dir(work_dir: &Path) -> AppResult<AppDescriptor> {
        let components: Vec<_> = work_dir.components().collect();

        let apps_idx = components
            .iter()
            .enumerate()
            .find(|(i, c)| c.as_os_str() == "apps" && *i + 1 < components.len())
            .map(|(i, _)| i)
            .ok_or_else(|| {
                AppError::General(format!(
                    "invalid structure: {:?} does not contain /apps/<app>",
                    work_dir
                ))
            })?;
        if apps_idx < 1 {
            return Err(AppError::General(
                "invalid structure: apps directory must have a parent directory".into(),
            ));
        }

        let app_name = components[apps_idx + 1]
            .as_os_str()
            .to_string_lossy()
            .into_owned();
        let root: PathBuf = components[..apps_idx].iter().collect();
        let project = ProjectDescriptor::discover(&root)?;

        let app_path_in_project = PathBuf::from("apps").join(&app_name);
        let work_dir = root.join(&app_path_in_project);

        Ok(AppDescriptor {
            project,
            app_name,
            app_path_in_project,
            work_dir,
        })
    }
}
