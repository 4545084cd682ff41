//! Tags and entities emitted by the PDF-to-HTML renderer
//!
//! The renderer emits one `<br/>`-terminated line per text run, wraps headers
//! and totals in `<b>...</b>`, and writes runs of spaces as `&#160;`.

use crate::types::FieldError;

/// End-of-line marker present on every content line
pub const TERMINATOR: &str = "<br/>";

/// Non-breaking space entity
pub const NBSP: &str = "&#160;";

/// Escaped ampersand entity
pub const AMP: &str = "&amp;";

pub const BOLD_OPEN: &str = "<b>";
pub const BOLD_CLOSE: &str = "</b>";

/// Remove the trailing `<br/>`, failing if it is absent
pub fn strip_terminator(text: &str) -> Result<&str, FieldError> {
    text.strip_suffix(TERMINATOR)
        .ok_or_else(|| FieldError::missing_terminator(text))
}

/// Remove the trailing `<br/>` if present
pub fn trim_terminator(text: &str) -> &str {
    text.strip_suffix(TERMINATOR).unwrap_or(text)
}

pub fn is_bold(text: &str) -> bool {
    text.starts_with(BOLD_OPEN)
}

/// Unwrap `<b>...</b>`; text without the opening tag is returned unchanged
pub fn strip_bold(text: &str) -> &str {
    match text.strip_prefix(BOLD_OPEN) {
        Some(inner) => inner.strip_suffix(BOLD_CLOSE).unwrap_or(inner),
        None => text,
    }
}

/// Drop thousands separators from a printed number
pub fn strip_thousands(text: &str) -> String {
    text.replace(',', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_strip_terminator() {
        assert_eq!(strip_terminator("12.00<br/>"), Ok("12.00"));
        assert_eq!(
            strip_terminator("12.00"),
            Err(FieldError::missing_terminator("12.00"))
        );
    }

    #[rstest]
    #[case("<b>1,000.00</b>", "1,000.00")]
    #[case("<b>Ending Balance", "Ending Balance")]
    #[case("15.00", "15.00")]
    fn test_strip_bold(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_bold(input), expected);
    }
}
