//! Field extractors
//!
//! Each extractor turns one rendered line into a typed field value. They are
//! strict: a line that does not carry the `<br/>` terminator, or whose text
//! is not the expected shape, is an error rather than a best guess.

use crate::core::markup::{self, AMP, NBSP};
use crate::types::{EntryKind, FieldError, SignConvention};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a `MM/DD` line into `MM/DD/YYYY` using the statement year
///
/// Non-breaking spaces and surrounding whitespace are ignored, single-digit
/// components are zero-padded.
pub fn parse_date(text: &str, year: i32) -> Result<String, FieldError> {
    let body = markup::strip_terminator(text)?.replace(NBSP, "");
    let parts: Vec<&str> = body.trim().split('/').collect();
    if parts.len() != 2 {
        return Err(FieldError::malformed_date(
            text,
            "expected two parts split by '/'",
        ));
    }

    let month: u32 = parts[0]
        .parse()
        .map_err(|_| FieldError::malformed_date(text, "invalid month"))?;
    let day: u32 = parts[1]
        .parse()
        .map_err(|_| FieldError::malformed_date(text, "invalid day"))?;

    if !(1..=12).contains(&month) {
        return Err(FieldError::malformed_date(text, "month out of range"));
    }
    if !(1..=31).contains(&day) {
        return Err(FieldError::malformed_date(text, "day out of range"));
    }

    Ok(format!("{:02}/{:02}/{}", month, day, year))
}

/// Decode a description line
///
/// Entities are decoded, whitespace runs collapse to one space, and the stray
/// `& ` the renderer leaves at the start of some lines is dropped.
pub fn parse_description(text: &str) -> Result<String, FieldError> {
    let body = markup::strip_terminator(text)?
        .replace(NBSP, " ")
        .replace(AMP, "&");

    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.strip_prefix("& ") {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(collapsed),
    }
}

/// Parse an amount line according to the profile's sign convention
///
/// Returns the signed amount and, for conventions that derive one, the entry
/// kind.
pub fn parse_amount(
    text: &str,
    convention: SignConvention,
) -> Result<(Decimal, Option<EntryKind>), FieldError> {
    let body = markup::strip_thousands(markup::strip_bold(markup::strip_terminator(text)?));
    let body = body.trim();
    let value = Decimal::from_str(body).map_err(|_| FieldError::malformed_amount(text))?;

    match convention {
        SignConvention::NegateCharges => Ok((-value, None)),
        SignConvention::SignedCreditDebit => {
            let kind = if body.starts_with('-') {
                EntryKind::Debit
            } else {
                EntryKind::Credit
            };
            Ok((value, Some(kind)))
        }
    }
}

/// Parse a running-balance line
pub fn parse_total(text: &str) -> Result<Decimal, FieldError> {
    let body = markup::strip_thousands(markup::strip_terminator(text)?);
    Decimal::from_str(body.trim()).map_err(|_| FieldError::malformed_total(text))
}
