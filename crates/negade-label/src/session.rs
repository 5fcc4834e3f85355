//! The interactive labeling session.
//!
//! Walks an operator through every token of every message in an unlabeled
//! token file: collect a message, show its reconstructed context, prompt
//! per token, flush the labeled message, repeat.

use std::io::{BufRead, Write};

use tracing::debug;

use negade_core::conll::{ConllWriter, LabeledToken};
use negade_core::error::Result;
use negade_core::reconstruct::Reconstructor;
use negade_core::tags::EntityTag;

use crate::prompt::{PromptAction, Prompter};

/// How a labeling session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every message in the input was labeled and written.
    Completed {
        /// Messages written to the output.
        messages: usize,
    },
    /// The operator typed `exit`; remaining input was never read.
    Aborted {
        /// Messages written to the output, counting a flushed partial one.
        messages: usize,
    },
}

/// Drives one operator through labeling a token stream into CoNLL output.
///
/// The input is one token per non-blank line with blank lines separating
/// messages; a final message needs no trailing blank line. Output is
/// written one message at a time, so an interrupted session keeps every
/// message flushed before the interruption.
pub struct LabelingSession<R: BufRead, W: Write, P: Prompter> {
    reader: R,
    writer: ConllWriter<W>,
    prompter: P,
    reconstructor: Reconstructor,
    ordinal: usize,
}

impl<R: BufRead, W: Write, P: Prompter> LabelingSession<R, W, P> {
    /// Create a session over a token reader and a CoNLL output stream.
    pub fn new(reader: R, out: W, prompter: P) -> Result<Self> {
        Ok(Self {
            reader,
            writer: ConllWriter::new(out),
            prompter,
            reconstructor: Reconstructor::new()?,
            ordinal: 0,
        })
    }

    /// Run the session to completion or until the operator exits.
    pub fn run(mut self) -> Result<SessionOutcome> {
        while let Some(tokens) = self.collect_message()? {
            self.ordinal += 1;
            if !self.label_message(&tokens)? {
                return Ok(SessionOutcome::Aborted {
                    messages: self.writer.messages_written(),
                });
            }
        }
        Ok(SessionOutcome::Completed {
            messages: self.writer.messages_written(),
        })
    }

    /// Collecting state: gather token lines until a blank line or the end
    /// of the input. Returns `None` once the input is exhausted. Leading
    /// and repeated blank lines are swallowed.
    fn collect_message(&mut self) -> Result<Option<Vec<String>>> {
        let mut tokens = Vec::new();
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                // EOF: a final message need not carry a trailing blank line
                return Ok((!tokens.is_empty()).then_some(tokens));
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                if tokens.is_empty() {
                    continue;
                }
                return Ok(Some(tokens));
            }
            tokens.push(trimmed.to_string());
        }
    }

    /// Labeling and Flushing states for one message. Returns `false` when
    /// the operator ended the session.
    fn label_message(&mut self, tokens: &[String]) -> Result<bool> {
        let context = self.reconstructor.render(tokens);
        self.prompter
            .begin_message(self.ordinal, &context, tokens.len())?;
        debug!(
            ordinal = self.ordinal,
            tokens = tokens.len(),
            "labeling message"
        );

        let mut labeled: Vec<LabeledToken> = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let raw = self.prompter.read_input(&tokens[i], i + 1, tokens.len())?;
            match PromptAction::parse(&raw) {
                PromptAction::Accepted(tag) => {
                    labeled.push(LabeledToken::new(tokens[i].clone(), tag));
                    i += 1;
                }
                PromptAction::Skip => {
                    self.prompter
                        .notify("Labeling the remainder of this message as 'O'.")?;
                    for token in &tokens[i..] {
                        labeled.push(LabeledToken::new(token.clone(), EntityTag::Outside));
                    }
                    break;
                }
                PromptAction::Exit => {
                    self.prompter
                        .notify("Exiting labeling session. Saving current progress.")?;
                    self.writer.write_message(&labeled)?;
                    return Ok(false);
                }
                PromptAction::Restart => {
                    self.prompter
                        .notify("Restarting this message; previous labels cleared.")?;
                    labeled.clear();
                    i = 0;
                    self.prompter
                        .begin_message(self.ordinal, &context, tokens.len())?;
                }
                PromptAction::Invalid => {
                    self.prompter.report_invalid(raw.trim())?;
                }
            }
        }

        self.writer.write_message(&labeled)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{self, Cursor};

    /// Prompter fed from a canned list of input lines.
    struct ScriptedPrompter {
        inputs: VecDeque<String>,
        begins: Vec<(usize, String, usize)>,
        invalid_reports: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                begins: Vec::new(),
                invalid_reports: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn begin_message(
            &mut self,
            ordinal: usize,
            context: &str,
            token_count: usize,
        ) -> io::Result<()> {
            self.begins.push((ordinal, context.to_string(), token_count));
            Ok(())
        }

        fn read_input(&mut self, _token: &str, _index: usize, _total: usize) -> io::Result<String> {
            self.inputs.pop_front().ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")
            })
        }

        fn report_invalid(&mut self, entered: &str) -> io::Result<()> {
            self.invalid_reports.push(entered.to_string());
            Ok(())
        }

        fn notify(&mut self, _text: &str) -> io::Result<()> {
            Ok(())
        }
    }

    fn run_session(input: &str, script: &[&str]) -> (String, SessionOutcome, ScriptedPrompter) {
        let mut out = Vec::new();
        let mut prompter = ScriptedPrompter::new(script);
        let session =
            LabelingSession::new(Cursor::new(input.to_string()), &mut out, &mut prompter).unwrap();
        let outcome = session.run().unwrap();
        (String::from_utf8(out).unwrap(), outcome, prompter)
    }

    #[test]
    fn test_label_two_tokens() {
        let (out, outcome, _) = run_session("a\nb\n", &["O", "B-PRODUCT"]);
        assert_eq!(out, "a\tO\nb\tB-PRODUCT\n\n");
        assert_eq!(outcome, SessionOutcome::Completed { messages: 1 });
    }

    #[test]
    fn test_skip_fills_remainder_with_outside() {
        let (out, outcome, _) = run_session("a\nb\nc\n", &["O", "skip"]);
        assert_eq!(out, "a\tO\nb\tO\nc\tO\n\n");
        assert_eq!(outcome, SessionOutcome::Completed { messages: 1 });
    }

    #[test]
    fn test_restart_discards_first_attempt() {
        let (out, _, _) = run_session("a\nb\n", &["O", "restart_message", "B-LOC", "O"]);
        assert_eq!(out, "a\tB-LOC\nb\tO\n\n");
    }

    #[test]
    fn test_restart_redisplays_context() {
        let (_, outcome, prompter) = run_session("a\n", &["restart_message", "O"]);
        assert_eq!(outcome, SessionOutcome::Completed { messages: 1 });
        assert_eq!(prompter.begins.len(), 2);
        assert_eq!(prompter.begins[0], prompter.begins[1]);
    }

    #[test]
    fn test_invalid_label_never_advances_or_leaks() {
        let (written, _, prompter) = run_session("a\n", &["X-PRODUCT", "B-PRICE"]);
        assert_eq!(written, "a\tB-PRICE\n\n");
        assert!(!written.contains("X-PRODUCT"));
        assert_eq!(prompter.invalid_reports, vec!["X-PRODUCT"]);
    }

    #[test]
    fn test_exit_mid_message_flushes_partial_and_halts() {
        let input = "a\nb\n\nc\nd\n";
        let (out, outcome, _) = run_session(input, &["O", "exit"]);
        assert_eq!(out, "a\tO\n\n");
        assert_eq!(outcome, SessionOutcome::Aborted { messages: 1 });
    }

    #[test]
    fn test_exit_before_any_label_writes_nothing() {
        let (out, outcome, _) = run_session("a\nb\n", &["exit"]);
        assert_eq!(out, "");
        assert_eq!(outcome, SessionOutcome::Aborted { messages: 0 });
    }

    #[test]
    fn test_multiple_messages_in_input_order() {
        let input = "a\n\nb\nc\n";
        let (out, outcome, _) = run_session(input, &["B-PRODUCT", "O", "B-LOC"]);
        assert_eq!(out, "a\tB-PRODUCT\n\nb\tO\nc\tB-LOC\n\n");
        assert_eq!(outcome, SessionOutcome::Completed { messages: 2 });
    }

    #[test]
    fn test_blank_line_runs_are_one_separator() {
        let input = "\n\na\n\n\n\nb\n\n";
        let (out, outcome, _) = run_session(input, &["O", "O"]);
        assert_eq!(out, "a\tO\n\nb\tO\n\n");
        assert_eq!(outcome, SessionOutcome::Completed { messages: 2 });
    }

    #[test]
    fn test_final_message_without_trailing_blank() {
        let (out, _, _) = run_session("a\n\nb", &["O", "O"]);
        assert_eq!(out, "a\tO\n\nb\tO\n\n");
    }

    #[test]
    fn test_commands_case_insensitive_in_session() {
        let (out, outcome, _) = run_session("a\nb\n", &["SKIP"]);
        assert_eq!(out, "a\tO\nb\tO\n\n");
        assert_eq!(outcome, SessionOutcome::Completed { messages: 1 });
    }

    #[test]
    fn test_context_shown_with_ordinal_and_count() {
        let (_, _, prompter) = run_session("hello\n,\nworld\n", &["O", "O", "O"]);
        assert_eq!(prompter.begins, vec![(1, "hello, world".to_string(), 3)]);
    }
}
