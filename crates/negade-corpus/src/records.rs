//! Flat tab-separated storage for raw channel messages.
//!
//! One record per line, `channel`, `id`, `sender_id`, `date` and `text`
//! columns; the text column is escaped so it stays on its line. Lines
//! starting with `#` are comments.

use std::io::{BufRead, Write};

use negade_core::error::{NegadeError, Result};

/// One fetched channel message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Username of the channel the message came from (without `@`).
    pub channel: String,
    /// Message identifier within the channel.
    pub id: i64,
    /// Sender identifier (the channel's own id for anonymous posts).
    pub sender_id: i64,
    /// Unix timestamp of the message.
    pub date: i64,
    /// Raw message text.
    pub text: String,
}

/// Header comment written at the top of a fresh records file.
pub const HEADER: &str = "# channel\tid\tsender_id\tdate\ttext";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Appending writer for the records table.
///
/// Flushes after every record, so an interrupted fetch keeps everything
/// written before the interruption.
pub struct RecordWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Wrap an output stream.
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Write the header comment; call once on a fresh file.
    pub fn write_header(&mut self) -> Result<()> {
        writeln!(self.out, "{HEADER}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Append one record and flush.
    pub fn write_record(&mut self, record: &MessageRecord) -> Result<()> {
        writeln!(
            self.out,
            "{}\t{}\t{}\t{}\t{}",
            record.channel,
            record.id,
            record.sender_id,
            record.date,
            escape(&record.text)
        )?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> usize {
        self.written
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn parse_i64(field: &str, name: &str, line: usize) -> Result<i64> {
    field.parse().map_err(|_| NegadeError::MalformedRecord {
        line,
        reason: format!("invalid {name} {field:?}"),
    })
}

/// Load every record, skipping blank and `#` comment lines.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<MessageRecord>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.splitn(5, '\t').collect();
        if parts.len() != 5 {
            return Err(NegadeError::MalformedRecord {
                line: idx + 1,
                reason: "expected 5 tab-separated fields".into(),
            });
        }

        records.push(MessageRecord {
            channel: parts[0].to_string(),
            id: parse_i64(parts[1], "message id", idx + 1)?,
            sender_id: parse_i64(parts[2], "sender id", idx + 1)?,
            date: parse_i64(parts[3], "date", idx + 1)?,
            text: unescape(parts[4]),
        });
    }

    Ok(records)
}
