//! # Text Preparation
//!
//! Normalization and word-level tokenization for raw channel messages.

pub mod normalize;
pub mod tokenize;

pub use normalize::Normalizer;
pub use tokenize::{Token, Tokenizer};
