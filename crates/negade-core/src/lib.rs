//! # Negade Core
//!
//! Text-preparation and annotation primitives for the Negade NER corpus
//! pipeline: the closed entity-tag vocabulary, Amharic-aware normalization
//! and word tokenization, subword-token reconstruction for labeling
//! context, and CoNLL two-column I/O.
//!
//! ## Quick Start
//!
//! ```rust
//! use negade_core::text::{Normalizer, Tokenizer};
//!
//! let normalizer = Normalizer::new().unwrap();
//! let clean = normalizer.normalize("ሴቶች ጫማ ዋጋ፦ 2500 ብር !!!");
//!
//! let tokens = Tokenizer::new().tokenize(&clean);
//! assert_eq!(tokens[0].text, "ሴቶች");
//! ```
pub mod conll;
pub mod error;
pub mod reconstruct;
pub mod tags;
pub mod text;

// Re-export primary API
pub use conll::{ConllWriter, LabeledToken};
pub use error::{NegadeError, Result};
pub use reconstruct::Reconstructor;
pub use tags::{EntityKind, EntityTag};
pub use text::{Normalizer, Token, Tokenizer};
