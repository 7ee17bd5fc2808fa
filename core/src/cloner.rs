#![deny(missing_docs)]

//! # Tree Cloner
//!
//! Clones a whole project, or one sub-application inside a project, to a new
//! name. Rust sources get syntax-aware path-root rewriting, manifests get
//! their declared identity updated, and other config formats get a plain
//! textual rename. A failed clone removes the partially written destination.

use crate::error::{AppError, AppResult};
use crate::ignore::IgnoreSet;
use crate::project::ProjectDescriptor;
use crate::rewrite::rewrite_path_roots;
use regex::Regex;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Derives the cloned identity from the source identity and the requested
/// new name.
///
/// A new name containing a separator is taken verbatim. Otherwise the source
/// identity's prefix up to its last separator is kept and only the final
/// segment is swapped, so `https://github.com/acme/oldproj` cloned as
/// `newproj` becomes `https://github.com/acme/newproj`.
pub fn derive_identity(old: &str, new: &str) -> String {
    if new.contains('/') {
        return new.to_string();
    }
    match old.rfind('/') {
        Some(idx) => format!("{}{}", &old[..=idx], new),
        None => new.to_string(),
    }
}

/// Rewrites a manifest's declared identity: the `name = "old"` declaration,
/// `old = { … path … }` path-dependency keys, and the `repository` URL via
/// [`derive_identity`].
fn rewrite_manifest(text: &str, old_name: &str, new_name: &str) -> AppResult<String> {
    let escaped = regex::escape(old_name);

    let name_re = Regex::new(&format!(r#"name\s*=\s*"{}""#, escaped))
        .map_err(|e| AppError::General(format!("manifest rewrite pattern: {}", e)))?;
    let mut out = name_re
        .replace_all(text, format!(r#"name = "{}""#, new_name).as_str())
        .into_owned();

    let dep_re = Regex::new(&format!(r#"(?m)^{}(\s*=\s*\{{.*path.*)$"#, escaped))
        .map_err(|e| AppError::General(format!("manifest rewrite pattern: {}", e)))?;
    out = dep_re
        .replace_all(&out, format!("{}$1", new_name).as_str())
        .into_owned();

    let repo_re = Regex::new(r#"(?m)^(repository\s*=\s*")([^"]+)(")"#)
        .map_err(|e| AppError::General(format!("manifest rewrite pattern: {}", e)))?;
    out = repo_re
        .replace_all(&out, |caps: &regex::Captures<'_>| {
            format!("{}{}{}", &caps[1], derive_identity(&caps[2], new_name), &caps[3])
        })
        .into_owned();

    Ok(out)
}

fn copy_file(src: &Path, dest: &Path, old: &str, new: &str) -> AppResult<()> {
    let file_name = src.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = src.extension().and_then(|e| e.to_str()).unwrap_or("");

    if file_name == "Cargo.toml" {
        let text = fs::read_to_string(src)?;
        fs::write(dest, rewrite_manifest(&text, old, new)?)?;
    } else if ext == "rs" {
        // Crate names surface in source paths with hyphens mapped to
        // underscores.
        let text = fs::read_to_string(src)?;
        let rewritten = rewrite_path_roots(
            &text,
            src,
            &old.replace('-', "_"),
            &new.replace('-', "_"),
        )?;
        fs::write(dest, rewritten)?;
    } else if matches!(ext, "toml" | "yaml" | "yml") {
        let text = fs::read_to_string(src)?;
        fs::write(dest, text.replace(old, new))?;
    } else {
        fs::copy(src, dest)?;
    }
    Ok(())
}

/// Copies `src` into `dest`, pruning ignored paths and rewriting references
/// from `old` to `new`. Ignore rules see paths prefixed with `rel_prefix` so
/// app clones match against their project-relative location.
fn copy_tree(
    src: &Path,
    dest: &Path,
    rel_prefix: &Path,
    ignores: &IgnoreSet,
    old: &str,
    new: &str,
) -> AppResult<()> {
    fs::create_dir_all(dest)?;

    let walker = WalkDir::new(src)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| {
            let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
            !ignores.should_ignore(&rel_prefix.join(rel))
        });

    for entry in walker {
        let entry = entry.map_err(|e| AppError::General(format!("walk failed: {}", e)))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| AppError::General(format!("walk escaped source tree: {}", e)))?;
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            copy_file(entry.path(), &target, old, new)?;
        }
    }
    Ok(())
}

fn cleanup_on_error<T>(dest: &Path, result: AppResult<T>) -> AppResult<T> {
    if result.is_err() && dest.exists() {
        let _ = fs::remove_dir_all(dest);
    }
    result
}

/// Clones the project at `src_root` to `dest`, renaming its identity from the
/// source directory name to the destination directory name.
///
/// The destination must not exist. On failure the partially written
/// destination is removed.
pub fn clone_project(src_root: &Path, dest: &Path, ignores: &IgnoreSet) -> AppResult<()> {
    let project = ProjectDescriptor::discover(src_root)?;
    if dest.exists() {
        return Err(AppError::PathExists(dest.to_path_buf()));
    }

    let new_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::General(format!("invalid destination {:?}", dest)))?;
    let old_name = project.module_identity.clone();

    let result = copy_tree(src_root, dest, Path::new(""), ignores, &old_name, &new_name);
    let result = result.and_then(|()| {
        // Version history never follows a clone.
        let git_dir = dest.join(".git");
        if git_dir.exists() {
            fs::remove_dir_all(&git_dir)?;
        }
        Ok(())
    });
    cleanup_on_error(dest, result)
}

/// Clones `apps/<src_app>` to `apps/<new_app>` inside one project, renaming
/// references from the old app name to the new one.
pub fn clone_app(
    project_root: &Path,
    src_app: &str,
    new_app: &str,
    ignores: &IgnoreSet,
) -> AppResult<()> {
    if src_app == new_app {
        return Err(AppError::General(format!(
            "source and destination app are both named {}",
            src_app
        )));
    }
    ProjectDescriptor::discover(project_root)?;

    let apps_dir = project_root.join("apps");
    if !apps_dir.exists() {
        return Err(AppError::PathMissing(apps_dir));
    }
    let src = apps_dir.join(src_app);
    if !src.exists() {
        return Err(AppError::PathMissing(src));
    }
    let dest = apps_dir.join(new_app);
    if dest.exists() {
        return Err(AppError::PathExists(dest));
    }

    let rel_prefix = Path::new("apps").join(src_app);
    let result = copy_tree(&src, &dest, &rel_prefix, ignores, src_app, new_app);
    cleanup_on_error(&dest, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture_project(dir: &Path, name: &str) -> std::path::PathBuf {
        let root = dir.join(name);
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("target/debug")).unwrap();
        fs::write(
            root.join("Cargo.toml"),
            format!(
                "[package]\nname = \"{name}\"\nversion = \"0.1.0\"\nrepository = \"https://github.com/acme/{name}\"\n"
            ),
        )
        .unwrap();
        fs::write(
            root.join("src/lib.rs"),
            format!("pub mod model;\n\npub use {name}::model as m;\n"),
        )
        .unwrap();
        fs::write(root.join("target/debug/junk.bin"), b"junk").unwrap();
        root
    }

    #[test]
    fn test_derive_identity() {
        assert_eq!(derive_identity("acme/oldproj", "newproj"), "acme/newproj");
        assert_eq!(
            derive_identity("https://github.com/acme/oldproj", "newproj"),
            "https://github.com/acme/newproj"
        );
        assert_eq!(derive_identity("oldproj", "newproj"), "newproj");
        assert_eq!(derive_identity("acme/oldproj", "org/newproj"), "org/newproj");
    }

    #[test]
    fn test_clone_project_rewrites_identity() {
        let dir = tempfile::tempdir().unwrap();
        let src = fixture_project(dir.path(), "oldproj");
        let dest = dir.path().join("newproj");

        clone_project(&src, &dest, &IgnoreSet::defaults()).unwrap();

        let manifest = fs::read_to_string(dest.join("Cargo.toml")).unwrap();
        assert!(manifest.contains(r#"name = "newproj""#), "{}", manifest);
        assert!(
            manifest.contains("https://github.com/acme/newproj"),
            "{}",
            manifest
        );

        let lib = fs::read_to_string(dest.join("src/lib.rs")).unwrap();
        assert!(lib.contains("pub use newproj::model as m;"), "{}", lib);
        assert!(!lib.contains("oldproj"), "{}", lib);
    }

    #[test]
    fn test_clone_project_prunes_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let src = fixture_project(dir.path(), "oldproj");
        let dest = dir.path().join("newproj");

        clone_project(&src, &dest, &IgnoreSet::defaults()).unwrap();
        assert!(!dest.join("target").exists());
    }

    #[test]
    fn test_clone_project_rejects_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = fixture_project(dir.path(), "oldproj");
        let dest = dir.path().join("taken");
        fs::create_dir_all(&dest).unwrap();

        let res = clone_project(&src, &dest, &IgnoreSet::defaults());
        assert!(matches!(res, Err(AppError::PathExists(_))));
    }

    #[test]
    fn test_clone_project_cleans_up_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let src = fixture_project(dir.path(), "oldproj");
        fs::write(src.join("src/broken.rs"), "fn broken( {").unwrap();
        let dest = dir.path().join("newproj");

        let res = clone_project(&src, &dest, &IgnoreSet::defaults());
        assert!(res.is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_clone_app() {
        let dir = tempfile::tempdir().unwrap();
        let root = fixture_project(dir.path(), "webapp");
        let app_src = root.join("apps/demoapp/src");
        fs::create_dir_all(&app_src).unwrap();
        fs::write(
            root.join("apps/demoapp/Cargo.toml"),
            "[package]\nname = \"demoapp\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        fs::write(app_src.join("main.rs"), "use demoapp::run;\n\nfn main() {\n    run();\n}\n")
            .unwrap();

        clone_app(&root, "demoapp", "adminapp", &IgnoreSet::defaults()).unwrap();

        let manifest = fs::read_to_string(root.join("apps/adminapp/Cargo.toml")).unwrap();
        assert!(manifest.contains(r#"name = "adminapp""#), "{}", manifest);
        let main = fs::read_to_string(root.join("apps/adminapp/src/main.rs")).unwrap();
        assert_eq!(main, "use adminapp::run;\n\nfn main() {\n    run();\n}\n");
    }

    #[test]
    fn test_cloned_project_yields_new_identity() {
        let dir = tempfile::tempdir().unwrap();
        let src = fixture_project(dir.path(), "oldproj");
        fs::create_dir_all(src.join("apps/demoapp")).unwrap();
        fs::write(src.join("apps/demoapp/lib.rs"), "pub fn run() {}\n").unwrap();
        let dest = dir.path().join("newproj");

        clone_project(&src, &dest, &IgnoreSet::defaults()).unwrap();

        let app = crate::project::AppDescriptor::from_work_dir(&dest.join("apps/demoapp")).unwrap();
        assert_eq!(app.project.name, "newproj");
        assert_eq!(app.project.module_identity, "newproj");
        assert_eq!(
            app.project.repository.as_deref(),
            Some("https://github.com/acme/newproj")
        );
    }

    #[test]
    fn test_clone_app_same_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = fixture_project(dir.path(), "webapp");
        fs::create_dir_all(root.join("apps/demoapp")).unwrap();

        let res = clone_app(&root, "demoapp", "demoapp", &IgnoreSet::defaults());
        assert!(matches!(res, Err(AppError::General(_))));
    }

    #[test]
    fn test_clone_app_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let root = fixture_project(dir.path(), "webapp");
        fs::create_dir_all(root.join("apps")).unwrap();

        let res = clone_app(&root, "ghost", "newapp", &IgnoreSet::defaults());
        assert!(matches!(res, Err(AppError::PathMissing(_))));
    }
}
