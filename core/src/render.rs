#![deny(missing_docs)]

//! # Layer Rendering
//!
//! Renders layer plans through embedded minijinja templates and writes the
//! results to disk. Non-append layers are created once and never overwritten;
//! the error-code layer accumulates across runs.

use crate::analyzer::LayerPlan;
use crate::error::AppResult;
use minijinja::Environment;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

const MODEL_TEMPLATE: &str = include_str!("templates/model.rs.j2");
const DAO_TEMPLATE: &str = include_str!("templates/dao.rs.j2");
const SERVICE_TEMPLATE: &str = include_str!("templates/service.rs.j2");
const HANDLER_TEMPLATE: &str = include_str!("templates/handler.rs.j2");
const ROUTER_TEMPLATE: &str = include_str!("templates/router.rs.j2");
const CODES_TEMPLATE: &str = include_str!("templates/codes.rs.j2");

/// Fields maintained by the framework rather than callers.
const BUILT_IN_FIELDS: &[&str] = &["ID", "CreatedAt", "UpdatedAt", "DeletedAt"];

/// Audit fields, maintained by the system on top of the built-ins.
const SYS_FIELDS: &[&str] = &["CreatedBy", "UpdatedBy", "DeletedBy"];

fn is_built_in_field(name: String) -> bool {
    BUILT_IN_FIELDS.contains(&name.as_str())
}

fn is_sys_field(name: String) -> bool {
    BUILT_IN_FIELDS.contains(&name.as_str()) || SYS_FIELDS.contains(&name.as_str())
}

fn is_default_model_layer(name: String) -> bool {
    name == "model"
}

fn is_default_dao_layer(name: String) -> bool {
    name == "dao"
}

/// Builds the template environment with all layer templates and the
/// field-classification functions registered.
pub fn environment() -> AppResult<Environment<'static>> {
    let mut env = Environment::new();
    env.add_function("is_built_in_field", is_built_in_field);
    env.add_function("is_sys_field", is_sys_field);
    env.add_function("is_default_model_layer", is_default_model_layer);
    env.add_function("is_default_dao_layer", is_default_dao_layer);
    env.add_template("model", MODEL_TEMPLATE)?;
    env.add_template("dao", DAO_TEMPLATE)?;
    env.add_template("service", SERVICE_TEMPLATE)?;
    env.add_template("handler", HANDLER_TEMPLATE)?;
    env.add_template("router", ROUTER_TEMPLATE)?;
    env.add_template("codes", CODES_TEMPLATE)?;
    Ok(env)
}

/// Renders every plan and writes the results.
///
/// Existing non-append targets are skipped so hand edits survive re-runs.
/// Returns the paths actually written; the first failure aborts the batch.
pub fn materialize(plans: &[LayerPlan]) -> AppResult<Vec<PathBuf>> {
    let env = environment()?;
    let mut written = Vec::new();
    for plan in plans {
        let target = plan.target_dir.join(&plan.target_file);
        if !plan.append && target.exists() {
            continue;
        }

        let template = env.get_template(plan.template)?;
        let rendered = template.render(&plan.params)?;

        fs::create_dir_all(&plan.target_dir)?;
        if plan.append {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&target)?;
            file.write_all(rendered.as_bytes())?;
        } else {
            fs::write(&target, rendered)?;
        }
        written.push(target);
    }
    Ok(written)
}
