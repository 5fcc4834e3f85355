//! # Negade Label
//!
//! The interactive labeling session: walks an operator through every token
//! of every message in an unlabeled token file and writes two-column CoNLL
//! output one message at a time, so interrupted sessions lose nothing that
//! was already flushed.
pub mod prompt;
pub mod session;

// Re-export primary API
pub use prompt::{ConsolePrompter, PromptAction, Prompter};
pub use session::{LabelingSession, SessionOutcome};
