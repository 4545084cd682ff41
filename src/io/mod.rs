//! I/O module
//!
//! Adapters around the parser.
//!
//! # Components
//!
//! - `renderer` - Running the external PDF-to-text renderer
//! - `csv_format` - Output row formats and the output file

pub mod csv_format;
pub mod renderer;

pub use csv_format::{write_entries_csv, write_entries_file};
pub use renderer::{PdfToHtml, PreRendered, Renderer};
