//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::parse_merge_strategy;
use crate::loader::{parse_blocks, read_params_file};
use crate::merge::merge_blocks;
use crate::schema::Params;

#[derive(Args)]
pub struct InfoArgs {
    /// Parameter file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Duplicate-section strategy: 'merge-keys' or 'last-block'
    #[arg(long, value_name = "STRATEGY", default_value = "merge-keys")]
    pub merge: String,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let strategy = parse_merge_strategy(&args.merge)?;

    let content = read_params_file(&args.file)?;
    let blocks = parse_blocks(&content)?;
    let total_blocks = blocks.len();

    // Count occurrences per section name before the stream is collapsed.
    let mut block_counts: Vec<(String, usize)> = Vec::new();
    for (name, _) in &blocks {
        match block_counts.iter_mut().find(|(n, _)| n == name) {
            Some((_, count)) => *count += 1,
            None => block_counts.push((name.clone(), 1)),
        }
    }

    let doc = merge_blocks(blocks, strategy);

    println!("Parameter file: {}", args.file.display());

    if !doc.is_empty() {
        println!("Sections:");
        for section in doc.sections() {
            println!("  {}: {} keys", section.name(), section.len());
        }
    }

    let duplicates: Vec<_> = block_counts.iter().filter(|(_, count)| *count > 1).collect();
    if !duplicates.is_empty() {
        println!("Duplicate sections:");
        for (name, count) in &duplicates {
            println!("  {}: {} blocks", name, count);
        }
    }

    let unknown: Vec<&str> =
        doc.names().filter(|name| !Params::KNOWN_SECTIONS.contains(name)).collect();
    if !unknown.is_empty() {
        println!("Unknown sections:");
        for name in &unknown {
            println!("  {}", name);
        }
    }

    println!("Statistics:");
    println!("  Total blocks: {}", total_blocks);
    println!("  Total sections: {}", doc.len());
    println!("  Total keys: {}", doc.sections().map(|s| s.len()).sum::<usize>());

    Ok(())
}
