//! Error types for statement conversion
//!
//! Errors come in two layers:
//!
//! - [`FieldError`] is produced by the field extractors, which only ever see a
//!   single line of text and know nothing about its position.
//! - [`StatementError`] is what a conversion run reports. The assembler wraps
//!   extractor failures with the 1-based line number they happened on.
//!
//! None of the parser errors are recoverable at the line level: the first one
//! aborts the run. See [`PartialParse`] for how already-finalized entries are
//! handed back alongside the error.

use crate::core::EntryStore;
use thiserror::Error;

/// Failure to extract a typed value from one rendered line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The line does not end with the renderer's `<br/>` terminator
    ///
    /// Every content line inside a transaction section carries the
    /// terminator, so its absence means the stream is out of sync.
    #[error("line '{text}' does not end with <br/>")]
    MissingTerminator { text: String },

    /// The line is not a `MM/DD` date
    #[error("line '{text}' is not a MM/DD date: {reason}")]
    MalformedDate { text: String, reason: String },

    /// The line is not a decimal amount
    #[error("line '{text}' is not a valid amount")]
    MalformedAmount { text: String },

    /// The line is not a decimal running balance
    #[error("line '{text}' is not a valid running total")]
    MalformedTotal { text: String },
}

impl FieldError {
    pub fn missing_terminator(text: &str) -> Self {
        FieldError::MissingTerminator {
            text: text.to_string(),
        }
    }

    pub fn malformed_date(text: &str, reason: &str) -> Self {
        FieldError::MalformedDate {
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed_amount(text: &str) -> Self {
        FieldError::MalformedAmount {
            text: text.to_string(),
        }
    }

    pub fn malformed_total(text: &str) -> Self {
        FieldError::MalformedTotal {
            text: text.to_string(),
        }
    }
}

/// Main error type for a conversion run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatementError {
    /// A line inside a transaction section could not be read as the field the
    /// parser expected at that point
    #[error("format error at line {line}: {source}")]
    Field {
        /// 1-based line number in the rendered text
        line: usize,
        #[source]
        source: FieldError,
    },

    /// The line stream ended or broke in a way no extractor reports,
    /// e.g. input running out in the middle of an entry
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A section did not have the structure its profile promises
    ///
    /// Raised for a header block with no following date, and for a wrapped
    /// description line that has no entry to attach to.
    #[error("section error at line {line}: {message}")]
    Section { line: usize, message: String },

    /// The external PDF-to-text renderer failed
    ///
    /// The renderer's own message is kept verbatim.
    #[error("renderer failed: {message}")]
    Renderer { message: String },

    /// I/O error while reading input or writing the output file
    #[error("I/O error: {message}")]
    Io { message: String },

    /// CSV serialization error while writing output rows
    #[error("CSV write error: {message}")]
    Csv { message: String },
}

impl From<std::io::Error> for StatementError {
    fn from(error: std::io::Error) -> Self {
        StatementError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for StatementError {
    fn from(error: csv::Error) -> Self {
        StatementError::Csv {
            message: error.to_string(),
        }
    }
}

impl StatementError {
    /// Attach a line number to an extractor failure
    pub fn field(line: usize, source: FieldError) -> Self {
        StatementError::Field { line, source }
    }

    pub fn format(line: usize, message: impl Into<String>) -> Self {
        StatementError::Format {
            line,
            message: message.into(),
        }
    }

    pub fn section(line: usize, message: impl Into<String>) -> Self {
        StatementError::Section {
            line,
            message: message.into(),
        }
    }

    pub fn renderer(message: impl Into<String>) -> Self {
        StatementError::Renderer {
            message: message.into(),
        }
    }
}

/// An aborted parse run
///
/// Carries every entry that was finalized before the failure so the caller can
/// dump them for manual inspection.
#[derive(Debug, Error)]
#[error("{error} ({} entries parsed before the failure)", .entries.len())]
pub struct PartialParse {
    /// Entries finalized before the failing line
    pub entries: EntryStore,
    /// The failure that stopped the run
    #[source]
    pub error: StatementError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::missing_terminator(
        StatementError::field(7, FieldError::missing_terminator("03/15")),
        "format error at line 7: line '03/15' does not end with <br/>"
    )]
    #[case::malformed_date(
        StatementError::field(3, FieldError::malformed_date("03", "expected two parts split by '/'")),
        "format error at line 3: line '03' is not a MM/DD date: expected two parts split by '/'"
    )]
    #[case::malformed_amount(
        StatementError::field(9, FieldError::malformed_amount("12.3x")),
        "format error at line 9: line '12.3x' is not a valid amount"
    )]
    #[case::truncated(
        StatementError::format(12, "input ended while reading a description"),
        "format error at line 12: input ended while reading a description"
    )]
    #[case::section(
        StatementError::section(4, "header is not followed by a date"),
        "section error at line 4: header is not followed by a date"
    )]
    #[case::renderer(
        StatementError::renderer("exit status 1: Syntax Error"),
        "renderer failed: exit status 1: Syntax Error"
    )]
    #[case::io(
        StatementError::Io { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    fn test_error_display(#[case] error: StatementError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: StatementError = io_error.into();
        assert!(matches!(error, StatementError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_partial_parse_display_counts_entries() {
        let partial = PartialParse {
            entries: EntryStore::new(),
            error: StatementError::section(2, "no date"),
        };
        assert_eq!(
            partial.to_string(),
            "section error at line 2: no date (0 entries parsed before the failure)"
        );
    }
}
