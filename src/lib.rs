//! Bank statement to CSV converter
//! # Overview
//!
//! This library reconstructs transaction records from a bank statement that was
//! rendered from PDF into flat, tag-laden text (`pdftohtml -stdout`). The text
//! has no field delimiters: dates, descriptions and amounts each sit on their
//! own `<br/>`-terminated lines, descriptions wrap unpredictably, and headers
//! and totals are mixed in. A line-oriented state machine classifies each line
//! and assembles entries.
//!
//! # Architecture
//!
//! - [`types`] - Lines, entries, layout profiles and errors
//! - [`core`] - The parser:
//!   - [`core::classifier`] - What a line looks like
//!   - [`core::extract`] - Turning a line into a field value
//!   - [`core::assembler`] - The state machine
//!   - [`core::entry_store`] - Finalized entries of one run
//! - [`io`] - Renderer invocation and CSV output
//! - [`convert`] - The end-to-end pipeline
//! - [`cli`] - Command-line arguments
//!
//! # Layouts
//!
//! Statement layouts are described by a [`FormatProfile`] rather than by
//! separate parsers:
//!
//! - **Card activity**: unsigned amounts are charges and are negated
//! - **Checking detail**: signed amounts give Credit/Debit, each followed by
//!   the running balance
//!
//! # Example
//!
//! ```
//! use statement_csv::{Assembler, FormatProfile};
//!
//! let rendered = "$ Amount<br/>\n03/15<br/>\nAMAZON.COM&#160;&#160;PURCHASE<br/>\n1,234.56<br/>\n";
//! let entries = Assembler::new(FormatProfile::card_activity())
//!     .run_text(rendered)
//!     .unwrap();
//!
//! let entry = &entries.as_slice()[0];
//! assert_eq!(entry.date, "03/15/2023");
//! assert_eq!(entry.description, "AMAZON.COM PURCHASE");
//! assert_eq!(entry.amount.to_string(), "-1234.56");
//! ```

pub mod cli;
pub mod convert;
pub mod core;
pub mod io;
pub mod types;

pub use convert::{create_renderer, ConvertError, RendererKind, StatementConverter};
pub use crate::core::{Assembler, EntryStore, ParserState};
pub use io::{write_entries_csv, write_entries_file};
pub use types::{
    EntryKind, FieldError, FormatProfile, Layout, Line, PartialParse, StatementError,
    TransactionEntry,
};
