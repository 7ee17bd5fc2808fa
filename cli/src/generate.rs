#![deny(missing_docs)]

//! # Generate Command
//!
//! Generates layered source files for one table from the app's schema
//! snapshot, then wires the new module into the existing router and
//! error-code entry points.
//!
//! 1. **Analyze**: Resolves the table against the snapshot into per-layer plans.
//! 2. **Materialize**: Renders templates to disk, never overwriting hand edits.
//! 3. **Register**: Appends registration statements to the entry functions.

use appforge_core::analyzer::{
    codes_patch_target, codes_statement, router_patch_target, router_statement, GenMode,
    GenRequest,
};
use appforge_core::patcher;
use appforge_core::{analyze, materialize, AppDescriptor, AppError, AppResult, GenConfig};
use appforge_core::schema::SchemaSnapshot;
use std::path::PathBuf;

/// Generation mode selected on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    /// Model + dao layers.
    Model,
    /// All layers plus registrations.
    Module,
    /// Handler + router layers.
    Api,
}

impl From<ModeArg> for GenMode {
    fn from(mode: ModeArg) -> GenMode {
        match mode {
            ModeArg::Model => GenMode::Model,
            ModeArg::Module => GenMode::Module,
            ModeArg::Api => GenMode::Api,
        }
    }
}

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Project root containing the `apps/` directory.
    #[clap(long, default_value = ".")]
    pub project: PathBuf,

    /// App to generate into (`apps/<app>`).
    pub app: String,

    /// Generation mode.
    #[clap(value_enum)]
    pub mode: ModeArg,

    /// Overrides the table name from the config section.
    #[clap(long)]
    pub table: Option<String>,
}

/// Executes the generation pipeline.
pub fn execute(args: &GenerateArgs) -> AppResult<()> {
    let work_dir = args.project.join("apps").join(&args.app);
    if !work_dir.exists() {
        return Err(AppError::PathMissing(work_dir));
    }
    let app = AppDescriptor::from_work_dir(&work_dir)?;
    let mode: GenMode = args.mode.into();

    let cfg = GenConfig::load(&app.work_dir.join("config/codegen.yaml"))?;
    let section = cfg.section(mode);

    let table_name = args
        .table
        .clone()
        .or_else(|| section.map(|s| s.table_name.clone()))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::General("no table configured: pass --table or fill the config section".into())
        })?;

    let request = GenRequest {
        mode,
        table_name,
        table_prefix: section.and_then(|s| s.table_prefix.clone()),
        package_name: section.and_then(|s| s.package_name.clone()),
        struct_name: section.and_then(|s| s.struct_name.clone()),
        description: section.and_then(|s| s.description.clone()),
    };

    let snapshot_rel = cfg
        .schema_snapshot
        .clone()
        .unwrap_or_else(|| PathBuf::from("config/schema.yaml"));
    let snapshot = SchemaSnapshot::from_yaml_file(&app.work_dir.join(snapshot_rel))?;

    println!(
        "Generating {} layers for table {} in app {}...",
        mode.layers().len(),
        request.table_name,
        app.app_name
    );

    let plans = analyze(&snapshot, &app, &cfg, &request)?;
    let package_name = plans
        .first()
        .map(|p| p.params.package_name.clone())
        .unwrap_or_default();

    let written = materialize(&plans)?;
    for path in &written {
        println!("  wrote {:?}", path);
    }

    if mode.patches_router() {
        register(&router_patch_target(&app), &router_statement(&package_name))?;
    }
    if mode.patches_codes() {
        register(&codes_patch_target(&app), &codes_statement(&package_name))?;
    }

    println!("Generation completed successfully.");
    Ok(())
}

/// Appends one registration statement into the entry function. A missing
/// entry file aborts the run; the generated module would otherwise never be
/// reachable.
fn register(target: &patcher::PatchTarget, statement: &str) -> AppResult<()> {
    if !target.file.exists() {
        return Err(AppError::PathMissing(target.file.clone()));
    }
    patcher::apply(target, statement)?;
    println!("  registered in {:?} fn {}", target.file, target.function);
    Ok(())
}
