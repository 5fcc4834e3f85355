//! Interactive CoNLL labeling for unlabeled token files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use negade_core::conll::{check_transitions, read_sequences};
use negade_core::error::NegadeError;
use negade_label::prompt::ConsolePrompter;
use negade_label::session::{LabelingSession, SessionOutcome};

/// CLI arguments
#[derive(Parser)]
#[command(name = "label")]
#[command(about = "Interactively label a token file into two-column CoNLL format")]
#[command(version)]
struct Cli {
    /// Unlabeled token file (one token per line, blank line between messages)
    #[arg(short, long, default_value = "data/labeled/unlabeled_conll.txt")]
    input: PathBuf,

    /// Output CoNLL file
    #[arg(short, long, default_value = "data/labeled/ner_conll_amharic.txt")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Confirm the input is readable before touching the output path, so a
    // mistyped input path cannot truncate an existing labeled file.
    let input = File::open(&cli.input).map_err(|e| match e.kind() {
        ErrorKind::NotFound => NegadeError::InputNotFound {
            path: cli.input.clone(),
        },
        _ => NegadeError::Io(e),
    })?;

    if let Some(parent) = cli.output.parent() {
        fs::create_dir_all(parent)?;
    }
    let output = File::create(&cli.output)
        .with_context(|| format!("failed to create output file {}", cli.output.display()))?;

    println!("Starting interactive labeling from '{}'.", cli.input.display());
    let prompter = ConsolePrompter::new();
    prompter.print_instructions();

    let session = LabelingSession::new(BufReader::new(input), BufWriter::new(output), prompter)?;
    match session.run()? {
        SessionOutcome::Completed { messages } => {
            println!(
                "\nLabeling session complete. {messages} messages saved to '{}'.",
                cli.output.display()
            );
        }
        SessionOutcome::Aborted { messages } => {
            println!(
                "\nSession ended early. {messages} messages saved to '{}'.",
                cli.output.display()
            );
        }
    }

    lint_output(&cli.output);

    Ok(())
}

/// Re-read the finished file and warn about BIO inconsistencies, so stray
/// `I-*` tags surface before the file reaches training.
fn lint_output(path: &Path) {
    let Ok(file) = File::open(path) else {
        return;
    };
    match read_sequences(BufReader::new(file)) {
        Ok(sequences) => {
            for (seq, sequence) in sequences.iter().enumerate() {
                for index in check_transitions(sequence) {
                    let tag = sequence[index].tag;
                    warn!(
                        sequence = seq + 1,
                        token = index + 1,
                        %tag,
                        "inside tag without a matching begin tag"
                    );
                }
            }
        }
        Err(e) => warn!(error = %e, "could not re-read output for consistency check"),
    }
}
