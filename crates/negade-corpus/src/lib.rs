//! # Negade Corpus
//!
//! Raw-record storage and sampling for the Negade data pipeline: the flat
//! tab-separated records table produced by channel fetching, and the
//! seeded sampling used to cut labeling templates from it. The
//! `preprocess` and `make_template` binaries chain the two into the
//! unlabeled token file the `label` tool consumes.
pub mod records;
pub mod sample;

// Re-export primary API
pub use records::{MessageRecord, RecordWriter, read_records};
pub use sample::sample_indices;
