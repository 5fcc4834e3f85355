use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during Negade corpus operations.
#[derive(Debug, Error)]
pub enum NegadeError {
    /// The input artifact does not exist at the given path.
    #[error("input file not found: {}", path.display())]
    InputNotFound {
        /// The path that was tried.
        path: PathBuf,
    },

    /// A persisted line did not match the expected flat tab-separated shape.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the source file.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A tag string outside the closed vocabulary.
    #[error("unknown tag {tag:?} at line {line}")]
    UnknownTag {
        /// The offending tag column.
        tag: String,
        /// 1-based line number in the source file.
        line: usize,
    },

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// Underlying I/O failure while reading or writing an artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Negade operations.
pub type Result<T> = std::result::Result<T, NegadeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = NegadeError::InputNotFound {
            path: PathBuf::from("data/missing.txt"),
        };
        assert_eq!(err.to_string(), "input file not found: data/missing.txt");

        let err = NegadeError::UnknownTag {
            tag: "X-PRODUCT".into(),
            line: 12,
        };
        assert!(err.to_string().contains("X-PRODUCT"));
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NegadeError>();
    }
}
