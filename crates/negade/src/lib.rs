//! # Negade
//!
//! Data preparation for Amharic e-commerce NER: fetched channel-message
//! records, normalization and word tokenization, template sampling, and
//! the interactive CoNLL labeling session.
//!
//! The workspace splits into `negade-core` (text primitives, tags and
//! CoNLL I/O), `negade-corpus` (record storage and sampling) and
//! `negade-label` (the labeling session and `label` binary); this crate
//! re-exports the lot under one roof.
//!
//! ## Quick Start
//!
//! ```rust
//! use negade::{EntityTag, Reconstructor};
//!
//! let reconstructor = Reconstructor::new().unwrap();
//! let context = reconstructor.render(&["ዋጋ", "500", "ብር", "!"]);
//! assert_eq!(context, "ዋጋ 500 ብር!");
//!
//! assert_eq!(EntityTag::parse("B-PRICE"), Some(EntityTag::BeginPrice));
//! ```

pub use negade_core::{
    ConllWriter, EntityKind, EntityTag, LabeledToken, NegadeError, Normalizer, Reconstructor,
    Result, Token, Tokenizer,
};
pub use negade_corpus::{MessageRecord, RecordWriter, read_records, sample_indices};
pub use negade_label::{ConsolePrompter, LabelingSession, PromptAction, Prompter, SessionOutcome};
