//! Rebuilds readable message text from token sequences.

use regex::Regex;

use crate::error::Result;

/// Subword continuation prefix, as emitted by WordPiece-style tokenizers.
const CONTINUATION: &str = "##";

/// Punctuation tokens merged onto the preceding fragment with no space.
const MERGE_PUNCT: &[&str] = &[
    "#", ",", ".", ":", ";", "?", "!", "(", ")", "[", "]", "{", "}", "-", "/",
];

/// Renders an ordered token sequence into one display string.
///
/// The result approximates the original message and is only ever shown to
/// the operator as labeling context; it is never persisted and never used
/// for correctness of the labels themselves.
pub struct Reconstructor {
    re_space_before_punct: Regex,
    re_whitespace: Regex,
}

impl Reconstructor {
    /// Constructs a new `Reconstructor` with pre-compiled cleanup patterns.
    ///
    /// # Errors
    ///
    /// Returns `NegadeError::RegexError` if a pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_space_before_punct: Regex::new(r"\s+([.,:;?!])")?,
            re_whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Render a token sequence back into display text.
    ///
    /// Continuation-marked tokens join the previous word with no space,
    /// punctuation attaches to the fragment before it, and everything else
    /// is space-separated. Any input produces some string; an empty
    /// sequence produces the empty string.
    ///
    /// # Examples
    /// ```
    /// use negade_core::reconstruct::Reconstructor;
    ///
    /// let reconstructor = Reconstructor::new().unwrap();
    /// let text = reconstructor.render(&["process", "##ing", "fee", ":", "50"]);
    /// assert_eq!(text, "processing fee: 50");
    /// ```
    pub fn render<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let mut parts: Vec<String> = Vec::new();

        for token in tokens {
            let token = token.as_ref();
            if let Some(rest) = token.strip_prefix(CONTINUATION) {
                parts.push(rest.to_string());
            } else if MERGE_PUNCT.contains(&token) {
                match parts.last_mut() {
                    Some(last) => last.push_str(token),
                    None => parts.push(token.to_string()),
                }
            } else {
                if parts.last().is_some_and(|p| !p.ends_with([' ', '\n'])) {
                    parts.push(" ".to_string());
                }
                parts.push(token.to_string());
            }
        }

        let joined = parts.concat();
        let cleaned = self.re_space_before_punct.replace_all(&joined, "$1");
        self.re_whitespace
            .replace_all(&cleaned, " ")
            .trim()
            .to_string()
    }
}
