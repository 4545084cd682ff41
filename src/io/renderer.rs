//! PDF-to-text rendering
//!
//! The parser works on the output of `pdftohtml -stdout`, which writes one
//! `<br/>`-terminated line per text run. The renderer is an external program
//! and is treated as a black box: it either returns the full text or fails.

use crate::types::StatementError;
use log::debug;
use std::path::Path;
use std::process::Command;

/// Turns a statement file into rendered markup text
pub trait Renderer {
    fn render(&self, path: &Path) -> Result<String, StatementError>;
}

/// Runs `pdftohtml -stdout <file>` (poppler-utils)
#[derive(Debug, Clone)]
pub struct PdfToHtml {
    program: String,
}

impl PdfToHtml {
    pub const DEFAULT_PROGRAM: &'static str = "pdftohtml";

    pub fn new(program: impl Into<String>) -> Self {
        PdfToHtml {
            program: program.into(),
        }
    }
}

impl Default for PdfToHtml {
    fn default() -> Self {
        PdfToHtml::new(Self::DEFAULT_PROGRAM)
    }
}

impl Renderer for PdfToHtml {
    fn render(&self, path: &Path) -> Result<String, StatementError> {
        debug!("rendering {} with {}", path.display(), self.program);

        let output = Command::new(&self.program)
            .arg("-stdout")
            .arg(path)
            .output()
            .map_err(|e| StatementError::renderer(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StatementError::renderer(format!(
                "{} failed ({}): {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| StatementError::renderer(format!("{} produced invalid UTF-8: {}", self.program, e)))
    }
}

/// Reads text that was already rendered, e.g. saved `pdftohtml` output
#[derive(Debug, Clone, Copy, Default)]
pub struct PreRendered;

impl Renderer for PreRendered {
    fn render(&self, path: &Path) -> Result<String, StatementError> {
        std::fs::read_to_string(path).map_err(|e| StatementError::Io {
            message: format!("failed to read '{}': {}", path.display(), e),
        })
    }
}
