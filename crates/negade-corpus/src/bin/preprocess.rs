//! Normalize raw channel messages into the processed records table.
//!
//! Reads the raw table written by `telegram-sync`, strips symbols and
//! collapses whitespace in each message, drops messages that normalize to
//! nothing, and writes the processed table `make_template` samples from.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use negade_core::text::{Normalizer, Tokenizer};
use negade_corpus::records::{MessageRecord, RecordWriter, read_records};

/// CLI arguments
#[derive(Parser)]
#[command(name = "preprocess")]
#[command(about = "Normalize raw channel messages for labeling")]
#[command(version)]
struct Cli {
    /// Raw records table from telegram-sync
    #[arg(short, long, default_value = "data/raw/telegram_messages.tsv")]
    input: PathBuf,

    /// Processed records table
    #[arg(short, long, default_value = "data/processed/preprocessed_messages.tsv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let file = File::open(&cli.input)
        .with_context(|| format!("failed to open raw records {}", cli.input.display()))?;
    let records = read_records(BufReader::new(file))?;
    info!(records = records.len(), "loaded raw records");

    let normalizer = Normalizer::new()?;
    let tokenizer = Tokenizer::new();

    if let Some(parent) = cli.output.parent() {
        fs::create_dir_all(parent)?;
    }
    let output = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    let mut writer = RecordWriter::new(BufWriter::new(output));
    writer.write_header()?;

    let mut token_total = 0usize;
    for record in &records {
        let normalized = normalizer.normalize(&record.text);
        if normalized.is_empty() {
            continue;
        }
        token_total += tokenizer.tokenize(&normalized).len();
        writer.write_record(&MessageRecord {
            text: normalized,
            ..record.clone()
        })?;
    }

    println!(
        "Preprocessed {} of {} messages ({token_total} tokens) to {}",
        writer.records_written(),
        records.len(),
        cli.output.display()
    );
    Ok(())
}
