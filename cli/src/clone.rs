#![deny(missing_docs)]

//! # Clone Commands
//!
//! Clones a whole project, or one sub-application, to a new name. References
//! to the old name are rewritten in Rust sources and manifests; ignored
//! directories (build output, VCS metadata, editor state) are pruned, with
//! the source tree's `.gitignore` honored on top of the built-in rules.

use appforge_core::{clone_app, clone_project, AppResult, IgnoreSet};
use std::path::PathBuf;

/// Arguments for the clone command.
#[derive(clap::Args, Debug, Clone)]
pub struct CloneArgs {
    /// Source project directory.
    #[clap(long, default_value = ".")]
    pub src: PathBuf,

    /// Destination directory; its basename becomes the new project name.
    pub dest: PathBuf,
}

/// Arguments for the clone-app command.
#[derive(clap::Args, Debug, Clone)]
pub struct CloneAppArgs {
    /// Project root containing the `apps/` directory.
    #[clap(long, default_value = ".")]
    pub project: PathBuf,

    /// Name of the app to clone.
    pub src_app: String,

    /// Name of the new app.
    pub new_app: String,
}

fn ignore_set(root: &std::path::Path) -> AppResult<IgnoreSet> {
    IgnoreSet::defaults().extend_from_file(&root.join(".gitignore"))
}

/// Executes the project clone.
pub fn execute(args: &CloneArgs) -> AppResult<()> {
    println!("Cloning project {:?} -> {:?}...", args.src, args.dest);

    let ignores = ignore_set(&args.src)?;
    clone_project(&args.src, &args.dest, &ignores)?;

    println!("Clone completed successfully.");
    Ok(())
}

/// Executes the app clone.
pub fn execute_app(args: &CloneAppArgs) -> AppResult<()> {
    println!(
        "Cloning app {} -> {} in {:?}...",
        args.src_app, args.new_app, args.project
    );

    let ignores = ignore_set(&args.project)?;
    clone_app(&args.project, &args.src_app, &args.new_app, &ignores)?;

    println!("Clone completed successfully.");
    Ok(())
}
