//! Line classifier
//!
//! Rendered statements carry no field delimiters, so the assembler decides
//! what a line is from its shape. These predicates never fail: a line that
//! does not fit is simply classified as something else, and the extractor
//! that later consumes it reports any format problem.

use crate::core::extract;
use crate::core::markup::{self, NBSP};
use crate::types::FormatProfile;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Section markers a line can be checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
    Subheading,
}

pub fn is_section_boundary(text: &str, kind: Boundary, profile: &FormatProfile) -> bool {
    match kind {
        Boundary::Start => text.contains(&profile.section_start),
        Boundary::End => profile
            .section_end_markers
            .iter()
            .any(|marker| text.contains(marker.as_str())),
        Boundary::Subheading => profile
            .subheading_markers
            .iter()
            .any(|marker| text.contains(marker.as_str())),
    }
}

pub fn is_date_line(text: &str, profile: &FormatProfile) -> bool {
    extract::parse_date(text, profile.year).is_ok()
}

/// Text of a line with the terminator and bold wrapper removed
fn numeric_body(text: &str) -> &str {
    markup::strip_bold(markup::trim_terminator(text)).trim()
}

/// Whether the line holds a transaction amount
///
/// Bold numbers count. Anything above the profile's ceiling is taken to be a
/// balance or a total rather than an amount.
pub fn is_amount_line(text: &str, profile: &FormatProfile) -> bool {
    let body = markup::strip_thousands(numeric_body(text));
    match Decimal::from_str(&body) {
        Ok(value) => value.abs() <= profile.amount_ceiling,
        Err(_) => false,
    }
}

/// Whether the line continues the description above it
///
/// A `&#160;` always means text: the renderer never emits one inside a
/// number. Lines led by a numeric prefix (`-`, and `.` on some layouts) are
/// reserved for amounts.
pub fn is_description_continuation(text: &str, profile: &FormatProfile) -> bool {
    if text.contains(NBSP) {
        return true;
    }
    let body = numeric_body(text);
    if body
        .chars()
        .next()
        .is_some_and(|c| profile.numeric_prefixes.contains(&c))
    {
        return false;
    }
    !is_amount_line(text, profile)
}
