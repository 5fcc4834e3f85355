//! Normalization of raw Amharic message text.

use regex::Regex;

use crate::error::Result;

/// Normalizes raw message text before tokenization.
///
/// Keeps Unicode word characters, whitespace, and the Ethiopic wordspace,
/// comma and full stop (`፡`, `፣`, `።`); every other character is removed.
/// Whitespace runs collapse to a single space.
pub struct Normalizer {
    re_disallowed: Regex,
    re_whitespace: Regex,
}

impl Normalizer {
    /// Constructs a new `Normalizer` with pre-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `NegadeError::RegexError` if a pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_disallowed: Regex::new(r"[^\w\s፡፣።]")?,
            re_whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Normalize one message.
    pub fn normalize(&self, text: &str) -> String {
        let stripped = self.re_disallowed.replace_all(text, "");
        self.re_whitespace
            .replace_all(&stripped, " ")
            .trim()
            .to_string()
    }
}
