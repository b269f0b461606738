use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use sokoban_core::{CorpusWriter, build_corpus};

/// Builds a level corpus and writes it as a hash-chained JSONL file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Total number of levels in the corpus
    #[arg(short, long, default_value_t = 1000)]
    count: usize,
    /// Output path for the JSONL corpus file
    #[arg(short, long)]
    out: String,
    /// Optional file of preserved levels, separated by blank lines
    #[arg(short, long)]
    preserved: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let preserved: Vec<String> = match &args.preserved {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read preserved levels file: {path}"))?;
            text.split("\n\n")
                .map(|chunk| chunk.trim_matches('\n').to_string())
                .filter(|chunk| !chunk.is_empty())
                .collect()
        }
        None => Vec::new(),
    };

    println!("Building {} levels from seed {}...", args.count, args.seed);
    let levels = build_corpus(args.seed, args.count, &preserved);

    let mut writer = CorpusWriter::create(Path::new(&args.out), args.seed, "dev", levels.len() as u64)
        .with_context(|| format!("Failed to create corpus file: {}", args.out))?;
    for level in &levels {
        writer.append(level).context("Failed to append corpus record")?;
    }

    println!("Wrote {} levels ({} preserved) to {}", levels.len(), preserved.len(), args.out);
    Ok(())
}
