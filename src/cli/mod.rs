//! Command-line interface for wind-params
//!
//! Provides `show`, `info`, and `validate` subcommands plus shell
//! completion generation.

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::merge::MergeStrategy;

mod info;
mod show;
mod validate;

/// Load, merge, validate, and inspect wind-farm simulation parameter files
#[derive(Parser)]
#[command(name = "wind-params")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged parameter document
    Show(show::ShowArgs),

    /// Display parameter file information without rendering it
    Info(info::InfoArgs),

    /// Type-check a parameter file and run consistency checks
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Show(args) => show::run(args),
        Commands::Info(args) => info::run(args),
        Commands::Validate(args) => validate::run(args),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "wind-params", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Parse a `--merge` strategy flag value.
fn parse_merge_strategy(value: &str) -> Result<MergeStrategy> {
    match value {
        "merge-keys" => Ok(MergeStrategy::MergeKeys),
        "last-block" => Ok(MergeStrategy::LastBlock),
        other => bail!("Invalid merge strategy '{other}' (expected 'merge-keys' or 'last-block')"),
    }
}
