#![deny(missing_docs)]

//! # Appforge CLI
//!
//! Command Line Interface for project cloning and layered code generation.
//!
//! Supported Commands:
//! - `clone`: Clones a whole project to a new name, rewriting references.
//! - `clone-app`: Clones one sub-application inside a project.
//! - `generate`: Generates layered code from a schema snapshot.

use appforge_core::AppResult;
use clap::{Parser, Subcommand};

mod clone;
mod generate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Appforge project cloning and code generation")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clones a project directory to a new name, rewriting its identity.
    Clone(clone::CloneArgs),
    /// Clones one app under `apps/` inside the current project.
    CloneApp(clone::CloneAppArgs),
    /// Generates model/dao/service/api/router/code layers from a schema table.
    Generate(generate::GenerateArgs),
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Clone(args) => clone::execute(args)?,
        Commands::CloneApp(args) => clone::execute_app(args)?,
        Commands::Generate(args) => generate::execute(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
