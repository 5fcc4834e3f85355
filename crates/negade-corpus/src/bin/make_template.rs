//! Cut an unlabeled labeling template from the processed records.
//!
//! Samples messages from the processed table and writes them as a
//! blank-line-delimited token file, one token per line — the input
//! artifact the `label` tool walks through.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use negade_core::text::Tokenizer;
use negade_corpus::records::read_records;
use negade_corpus::sample::sample_indices;

/// CLI arguments
#[derive(Parser)]
#[command(name = "make_template")]
#[command(about = "Sample messages into an unlabeled token file")]
#[command(version)]
struct Cli {
    /// Processed records table
    #[arg(short, long, default_value = "data/processed/preprocessed_messages.tsv")]
    input: PathBuf,

    /// Unlabeled token file for the label tool
    #[arg(short, long, default_value = "data/labeled/unlabeled_conll.txt")]
    output: PathBuf,

    /// How many messages to sample
    #[arg(short, long, default_value_t = 40)]
    count: usize,

    /// RNG seed, fixed so a cut can be reproduced
    #[arg(short, long, default_value_t = 7)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let file = File::open(&cli.input)
        .with_context(|| format!("failed to open processed records {}", cli.input.display()))?;
    let records = read_records(BufReader::new(file))?;

    let picked = sample_indices(cli.count, records.len(), cli.seed);
    info!(
        sampled = picked.len(),
        population = records.len(),
        seed = cli.seed,
        "sampled messages"
    );

    if let Some(parent) = cli.output.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(
        File::create(&cli.output)
            .with_context(|| format!("failed to create {}", cli.output.display()))?,
    );

    let tokenizer = Tokenizer::new();
    let mut written = 0usize;
    for &idx in &picked {
        let tokens = tokenizer.tokenize(&records[idx].text);
        if tokens.is_empty() {
            continue;
        }
        for token in &tokens {
            writeln!(out, "{}", token.text)?;
        }
        writeln!(out)?;
        written += 1;
    }
    out.flush()?;

    println!("Wrote {written} messages to {}", cli.output.display());
    Ok(())
}
