//! Conversion pipeline
//!
//! Ties the pieces together for one statement:
//! renderer → line sequence → assembler → entry store → CSV file.
//!
//! The renderer is chosen at runtime, so the converter holds it as a trait
//! object built by [`create_renderer`].

use crate::core::{Assembler, EntryStore};
use crate::io::{write_entries_file, PdfToHtml, PreRendered, Renderer};
use crate::types::{FormatProfile, PartialParse, StatementError};
use log::info;
use std::path::Path;
use thiserror::Error;

/// Where the rendered text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererKind {
    /// Run an external `pdftohtml`-compatible program
    Program(String),
    /// The input file already holds rendered text
    PreRendered,
}

/// Build a renderer for the given kind
pub fn create_renderer(kind: RendererKind) -> Box<dyn Renderer> {
    match kind {
        RendererKind::Program(program) => Box::new(PdfToHtml::new(program)),
        RendererKind::PreRendered => Box::new(PreRendered),
    }
}

/// Failure of a whole conversion, by stage
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The statement could not be rendered to text
    #[error(transparent)]
    Render(StatementError),

    /// The rendered text did not parse; finalized entries are kept
    #[error(transparent)]
    Parse(#[from] PartialParse),

    /// The output file could not be written
    #[error(transparent)]
    Output(StatementError),
}

impl ConvertError {
    /// Entries parsed before the failure, if the parser got that far
    pub fn partial_entries(&self) -> Option<&EntryStore> {
        match self {
            ConvertError::Parse(partial) => Some(&partial.entries),
            _ => None,
        }
    }
}

pub struct StatementConverter {
    renderer: Box<dyn Renderer>,
    assembler: Assembler,
}

impl StatementConverter {
    pub fn new(renderer: Box<dyn Renderer>, profile: FormatProfile) -> Self {
        StatementConverter {
            renderer,
            assembler: Assembler::new(profile),
        }
    }

    pub fn profile(&self) -> &FormatProfile {
        self.assembler.profile()
    }

    /// Render and parse a statement without writing anything
    pub fn parse(&self, input: &Path) -> Result<EntryStore, ConvertError> {
        let rendered = self.renderer.render(input).map_err(ConvertError::Render)?;
        let entries = self.assembler.run_text(&rendered)?;
        info!("parsed {} entries from {}", entries.len(), input.display());
        Ok(entries)
    }

    /// Convert `input` and overwrite `output` with the CSV rows
    ///
    /// The output file is only touched once the whole statement parsed.
    ///
    /// # Returns
    ///
    /// The number of rows written.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<usize, ConvertError> {
        let entries = self.parse(input)?;
        write_entries_file(&entries, self.profile().layout, output).map_err(ConvertError::Output)?;
        info!("wrote {} rows to {}", entries.len(), output.display());
        Ok(entries.len())
    }
}
