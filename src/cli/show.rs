//! Show command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use super::parse_merge_strategy;
use crate::loader::load_document;

#[derive(Args)]
pub struct ShowArgs {
    /// Parameter file to load
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format: 'yaml' or 'json'
    #[arg(short, long, value_name = "FORMAT", default_value = "yaml")]
    pub format: String,

    /// Duplicate-section strategy: 'merge-keys' or 'last-block'
    #[arg(long, value_name = "STRATEGY", default_value = "merge-keys")]
    pub merge: String,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let strategy = parse_merge_strategy(&args.merge)?;
    let format = args.format.as_str();
    if format != "yaml" && format != "json" {
        anyhow::bail!("Invalid format '{format}' (expected 'yaml' or 'json')");
    }

    let doc = load_document(&args.file, strategy)?;
    let rendered = if format == "yaml" { doc.to_yaml()? } else { doc.to_json_pretty()? };

    match args.output {
        Some(path) => fs::write(&path, rendered)
            .with_context(|| format!("Failed writing output file: {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}
