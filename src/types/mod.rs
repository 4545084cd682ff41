//! Types module
//!
//! Contains the data structures shared by the parser and the I/O adapters:
//! - `entry`: rendered lines and finalized transaction entries
//! - `profile`: statement layout configuration
//! - `error`: error types for conversion runs

pub mod entry;
pub mod error;
pub mod profile;

pub use entry::{EntryKind, Line, TransactionEntry};
pub use error::{FieldError, PartialParse, StatementError};
pub use profile::{
    FormatProfile, KindLabel, KindRule, Layout, SectionEntry, SequenceArtifact, SignConvention,
};
