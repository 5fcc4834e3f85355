//! Word-level tokenizer for normalized message text.

/// A token extracted from a message with positional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text content
    pub text: String,
    /// Start byte position in the original string
    pub start: usize,
    /// End byte position in the original string
    pub end: usize,
    /// Token index in the sequence
    pub index: usize,
}

/// Punctuation characters emitted as standalone tokens.
const STANDALONE: &[char] = &[
    '#', ',', '.', ':', ';', '?', '!', '(', ')', '[', ']', '{', '}', '-', '/', '፡', '፣', '።',
];

/// Tokenizer for normalized channel messages.
///
/// Splits on whitespace and breaks punctuation out into its own tokens, so
/// `"ዋጋ 500 ብር።"` yields four tokens with the full stop standing alone.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a message into a sequence of tokens.
    ///
    /// # Examples
    /// ```
    /// use negade_core::text::Tokenizer;
    ///
    /// let tokenizer = Tokenizer::new();
    /// let tokens = tokenizer.tokenize("ሴቶች ጫማ ዋጋ 2500 ብር።");
    /// assert_eq!(tokens.last().unwrap().text, "።");
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current_start = 0;

        for (idx, c) in input.char_indices() {
            if c.is_whitespace() {
                if idx > current_start {
                    push_token(&mut tokens, &input[current_start..idx], current_start, idx);
                }
                current_start = idx + c.len_utf8();
            } else if STANDALONE.contains(&c) {
                if idx > current_start {
                    push_token(&mut tokens, &input[current_start..idx], current_start, idx);
                }
                let end = idx + c.len_utf8();
                push_token(&mut tokens, &input[idx..end], idx, end);
                current_start = end;
            }
        }

        // Emit final token if non-empty
        if current_start < input.len() {
            push_token(
                &mut tokens,
                &input[current_start..],
                current_start,
                input.len(),
            );
        }

        tokens
    }
}

fn push_token(tokens: &mut Vec<Token>, text: &str, start: usize, end: usize) {
    let index = tokens.len();
    tokens.push(Token {
        text: text.to_string(),
        start,
        end,
        index,
    });
}
