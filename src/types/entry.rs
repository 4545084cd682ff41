//! Transaction entries and the rendered lines they are assembled from

use rust_decimal::Decimal;
use std::fmt;

/// One line of the renderer's text output
///
/// Lines keep their 1-based position in the rendered blob so that errors can
/// point back at the offending line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Line { number, text }
    }

    /// Split a rendered blob into numbered lines
    ///
    /// Handles both `\n` and `\r\n` endings. The blob must be complete: the
    /// parser needs the whole sequence before it starts.
    pub fn split(blob: &'a str) -> Vec<Line<'a>> {
        blob.lines()
            .enumerate()
            .map(|(idx, text)| Line::new(idx + 1, text))
            .collect()
    }
}

/// Kind of a transaction as printed in the "Details" column of the
/// checking-account export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Money in
    Credit,
    /// Money out
    Debit,
    /// Deposit slip (remote or branch deposit)
    DepositSlip,
    /// Paid check
    Check,
}

impl EntryKind {
    /// Label used in the CSV "Details" column
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Credit => "CREDIT",
            EntryKind::Debit => "DEBIT",
            EntryKind::DepositSlip => "DSLIP",
            EntryKind::Check => "CHECK",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A finalized transaction
///
/// Entries are only constructed by the assembler once every field the
/// profile requires is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEntry {
    /// Posting date formatted `MM/DD/YYYY`
    pub date: String,

    /// Description with entities decoded and whitespace collapsed
    pub description: String,

    /// Signed amount, keeping the scale printed on the statement
    pub amount: Decimal,

    /// Details classification, for layouts that carry one
    pub kind: Option<EntryKind>,

    /// Running balance after this entry, for layouts that print one
    pub running_total: Option<Decimal>,
}
