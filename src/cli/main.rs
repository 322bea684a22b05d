//! schema-lint entry point
//!
//! Loads a schema document and reports implementation problems.

use clap::{Parser, Subcommand};
use plugin_schema::cli::commands::{ValidateArgs, handle_validate};
use std::process::ExitCode;

/// Lint plugin schema documents.
#[derive(Parser, Debug)]
#[command(name = "schema-lint", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a schema document's implementation.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Validate(args) => handle_validate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
