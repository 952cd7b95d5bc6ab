//! # branch-lint
//!
//! Validates and fixes version-control branch names against a naming
//! convention. Pure string checks; never talks to git itself.
//!
//! ## Usage
//! ```bash
//! # Validate a name (exit 1 if invalid)
//! branch-lint validate feature/add-login
//!
//! # Validate against a different convention
//! branch-lint validate my_branch --convention snake-case
//!
//! # Suggest a corrected name
//! branch-lint suggest "My Feature Branch"
//! ```

mod convention;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use convention::{suggest, validate, Convention};

#[derive(Parser)]
#[command(name = "branch-lint")]
#[command(about = "Branch name linter - validate and fix branch names")]
struct Cli {
    /// Naming convention to check against
    #[arg(long, global = true, value_enum, default_value_t = Convention::Gitflow)]
    convention: Convention,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a branch name follows the convention
    Validate { name: String },
    /// Print a corrected version of a branch name
    Suggest { name: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { name } => match validate(&name, cli.convention) {
            Ok(()) => {
                println!("✓ '{name}' is valid");
                ExitCode::SUCCESS
            }
            Err(reason) => {
                println!("✗ '{name}' is invalid");
                println!("Error: {reason}");
                ExitCode::FAILURE
            }
        },
        Commands::Suggest { name } => {
            let fixed = suggest(&name, cli.convention);
            println!("Original:  {name}");
            println!("Suggested: {fixed}");
            ExitCode::SUCCESS
        }
    }
}
