//! CoNLL two-column read/write for labeled token sequences.
//!
//! The on-disk form is `token<TAB>tag`, one token per line, with a single
//! blank line between messages — the traditional format consumed by NER
//! training pipelines.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{NegadeError, Result};
use crate::tags::EntityTag;

/// A token paired with its assigned tag — one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledToken {
    /// The token text.
    pub text: String,
    /// The tag assigned to it.
    pub tag: EntityTag,
}

impl LabeledToken {
    /// Create a labeled token.
    pub fn new(text: impl Into<String>, tag: EntityTag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }
}

/// Incremental writer for blank-line-delimited CoNLL output.
///
/// Every message is flushed to the underlying writer as soon as it is
/// written, so an interrupted session keeps all messages emitted before the
/// interruption point.
pub struct ConllWriter<W: Write> {
    out: W,
    messages: usize,
}

impl<W: Write> ConllWriter<W> {
    /// Wrap an output stream.
    pub fn new(out: W) -> Self {
        Self { out, messages: 0 }
    }

    /// Write one message's labeled tokens followed by a blank separator
    /// line, then flush. An empty slice writes nothing.
    pub fn write_message(&mut self, tokens: &[LabeledToken]) -> Result<()> {
        if tokens.is_empty() {
            return Ok(());
        }
        for token in tokens {
            writeln!(self.out, "{}\t{}", token.text, token.tag)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        self.messages += 1;
        Ok(())
    }

    /// Number of messages written so far.
    pub fn messages_written(&self) -> usize {
        self.messages
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Load labeled sequences from a CoNLL file.
///
/// Blank lines separate sequences; a trailing blank line is optional and
/// lines starting with `#` are skipped. Lines without a tab column or with
/// a tag outside the vocabulary are errors, not silently dropped.
pub fn read_sequences<R: BufRead>(reader: R) -> Result<Vec<Vec<LabeledToken>>> {
    let mut sequences = Vec::new();
    let mut current: Vec<LabeledToken> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            if !current.is_empty() {
                sequences.push(std::mem::take(&mut current));
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        let Some((text, tag_str)) = line.split_once('\t') else {
            return Err(NegadeError::MalformedRecord {
                line: idx + 1,
                reason: "expected token<TAB>tag".into(),
            });
        };
        let Some(tag) = EntityTag::parse(tag_str) else {
            return Err(NegadeError::UnknownTag {
                tag: tag_str.to_string(),
                line: idx + 1,
            });
        };
        current.push(LabeledToken::new(text, tag));
    }

    // Don't forget the last sequence
    if !current.is_empty() {
        sequences.push(current);
    }

    debug!(sequences = sequences.len(), "loaded CoNLL sequences");
    Ok(sequences)
}

/// Indices whose tag cannot follow its predecessor under the BIO scheme.
///
/// The first token is checked against an implicit `O` predecessor, so a
/// sequence opening with an `I-*` tag is flagged at index 0.
pub fn check_transitions(tokens: &[LabeledToken]) -> Vec<usize> {
    let mut flagged = Vec::new();
    let mut prev = EntityTag::Outside;
    for (i, token) in tokens.iter().enumerate() {
        if !EntityTag::is_valid_transition(prev, token.tag) {
            flagged.push(i);
        }
        prev = token.tag;
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tag(s: &str) -> EntityTag {
        EntityTag::parse(s).unwrap()
    }

    #[test]
    fn test_write_message_format() {
        let mut writer = ConllWriter::new(Vec::new());
        writer
            .write_message(&[
                LabeledToken::new("a", tag("O")),
                LabeledToken::new("b", tag("B-PRODUCT")),
            ])
            .unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "a\tO\nb\tB-PRODUCT\n\n");
    }

    #[test]
    fn test_write_empty_message_writes_nothing() {
        let mut writer = ConllWriter::new(Vec::new());
        writer.write_message(&[]).unwrap();
        assert_eq!(writer.messages_written(), 0);
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let messages = vec![
            vec![
                LabeledToken::new("ሴቶች", tag("B-PRODUCT")),
                LabeledToken::new("ጫማ", tag("I-PRODUCT")),
            ],
            vec![
                LabeledToken::new("2500", tag("B-PRICE")),
                LabeledToken::new("ብር", tag("I-PRICE")),
                LabeledToken::new("።", tag("O")),
            ],
        ];

        let mut writer = ConllWriter::new(Vec::new());
        for message in &messages {
            writer.write_message(message).unwrap();
        }
        assert_eq!(writer.messages_written(), 2);

        let loaded = read_sequences(Cursor::new(writer.into_inner())).unwrap();
        assert_eq!(loaded, messages);
    }

    #[test]
    fn test_read_without_trailing_blank_line() {
        let input = "a\tO\n\nb\tB-LOC";
        let loaded = read_sequences(Cursor::new(input)).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1][0].text, "b");
    }

    #[test]
    fn test_read_skips_comments() {
        let input = "# header\na\tO\n";
        let loaded = read_sequences(Cursor::new(input)).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].len(), 1);
    }

    #[test]
    fn test_read_rejects_unknown_tag() {
        let input = "a\tX-PRODUCT\n";
        let err = read_sequences(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, NegadeError::UnknownTag { line: 1, .. }));
    }

    #[test]
    fn test_read_rejects_missing_column() {
        let input = "a O\n";
        let err = read_sequences(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, NegadeError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_check_transitions() {
        let good = vec![
            LabeledToken::new("a", tag("B-LOC")),
            LabeledToken::new("b", tag("I-LOC")),
            LabeledToken::new("c", tag("O")),
        ];
        assert!(check_transitions(&good).is_empty());

        let orphan_inside = vec![
            LabeledToken::new("a", tag("I-PRICE")),
            LabeledToken::new("b", tag("O")),
            LabeledToken::new("c", tag("B-PRODUCT")),
            LabeledToken::new("d", tag("I-LOC")),
        ];
        assert_eq!(check_transitions(&orphan_inside), vec![0, 3]);
    }
}
