//! Statement layout profiles
//!
//! A [`FormatProfile`] holds everything that differs between the statement
//! layouts the assembler understands: section markers, the year stamped onto
//! `MM/DD` dates, how amounts are signed, whether a running balance follows
//! each amount, and the handful of issuer-specific literals the text stream
//! forces on us.
//!
//! Two layouts are built in:
//!
//! - [`Layout::CardActivity`] (layout A): card activity listing. Amounts are
//!   printed unsigned for charges, so the sign is flipped. No running balance.
//! - [`Layout::CheckingDetail`] (layout B): checking account "transaction
//!   detail". Amounts carry their own sign, which decides Credit or Debit, and
//!   every amount is followed by the running balance.

use crate::core::markup;
use crate::types::EntryKind;
use rust_decimal::Decimal;

/// Row format and default profile family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `Date,Date,"Description",Amount,`
    CardActivity,
    /// `Type,Date,"Description",Amount,ACH_Type,Total,,`
    CheckingDetail,
}

/// How a printed amount maps to a signed value and an entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignConvention {
    /// Unsigned values are charges and get negated; `-x` becomes `x`.
    /// No kind is assigned.
    NegateCharges,
    /// The printed sign is kept. A leading minus is a Debit, anything else a
    /// Credit.
    SignedCreditDebit,
}

/// Where the section-start marker hands control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEntry {
    /// Entries start right after the marker
    Dates,
    /// A block of bold header lines precedes the first entry
    Header,
}

/// Line that sometimes follows a description and must not be read as part
/// of it
///
/// The checking layout prints a deposit sequence number (`1`, `11`, ...) on
/// its own line after "Remote Online Deposit". Without this exception it would
/// be taken for the amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceArtifact {
    /// Phrase that must appear in the description accumulated so far
    pub description_marker: String,
    /// Longest run of digits still read as a sequence number
    pub max_digits: usize,
}

impl SequenceArtifact {
    /// Whether `text` is a bare sequence number line such as `11<br/>`
    ///
    /// Amounts always carry a decimal point, so they never match.
    pub fn matches(&self, text: &str) -> bool {
        let Some(body) = text.trim().strip_suffix(markup::TERMINATOR) else {
            return false;
        };
        !body.is_empty()
            && body.len() <= self.max_digits
            && body.chars().all(|c| c.is_ascii_digit())
    }
}

/// Description prefix that overrides the sign-derived kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindRule {
    pub prefix: String,
    pub kind: EntryKind,
}

/// Type label printed on its own line ahead of the description text
///
/// Some entries open with a bare `CHECK` line before the payee. The label
/// sets the entry kind and is not part of the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindLabel {
    pub label: String,
    pub kind: EntryKind,
}

/// Parser configuration for one statement layout
#[derive(Debug, Clone, PartialEq)]
pub struct FormatProfile {
    pub layout: Layout,

    /// Marker (substring) that opens a transaction section
    pub section_start: String,

    /// What follows the section-start marker
    pub section_entry: SectionEntry,

    /// Markers (substrings) that close the section when seen where a date is
    /// expected
    pub section_end_markers: Vec<String>,

    /// Sub-headings printed between entries inside a section; skipped
    pub subheading_markers: Vec<String>,

    /// Year stamped onto every `MM/DD` date
    pub year: i32,

    pub sign_convention: SignConvention,

    /// Whether every amount is followed by a running-balance line
    pub has_running_total: bool,

    /// Numeric lines above this magnitude are balances or totals, never
    /// transaction amounts
    pub amount_ceiling: Decimal,

    /// Leading characters that mark a line as numeric
    pub numeric_prefixes: Vec<char>,

    pub sequence_artifact: Option<SequenceArtifact>,

    pub kind_rules: Vec<KindRule>,

    pub kind_labels: Vec<KindLabel>,
}

const DEFAULT_SEQUENCE_DIGITS: usize = 3;

fn check_label() -> KindLabel {
    KindLabel {
        label: "CHECK".to_string(),
        kind: EntryKind::Check,
    }
}

const DEFAULT_AMOUNT_CEILING: i64 = 100_000;

impl FormatProfile {
    /// Layout A: card activity listing
    pub fn card_activity() -> Self {
        FormatProfile {
            layout: Layout::CardActivity,
            section_start: "$ Amount<br/>".to_string(),
            section_entry: SectionEntry::Dates,
            section_end_markers: vec![
                "0000001<br/>".to_string(),
                "x&#160;0000001".to_string(),
                "Totals Year-to-Date</b><br/>".to_string(),
            ],
            subheading_markers: vec![
                "PAYMENTS AND OTHER CREDITS<br/>".to_string(),
                "PURCHASE<br/>".to_string(),
            ],
            year: 2023,
            sign_convention: SignConvention::NegateCharges,
            has_running_total: false,
            amount_ceiling: Decimal::from(DEFAULT_AMOUNT_CEILING),
            numeric_prefixes: vec!['-', '.'],
            sequence_artifact: None,
            kind_rules: Vec::new(),
            kind_labels: vec![check_label()],
        }
    }

    /// Layout B: checking account transaction detail
    pub fn checking_detail() -> Self {
        FormatProfile {
            layout: Layout::CheckingDetail,
            section_start: "*start*transactiondetail<br/>".to_string(),
            section_entry: SectionEntry::Header,
            section_end_markers: vec![
                "*end*transaction&#160;detail<br/>".to_string(),
                "<b>Ending&#160;Balance</b><br/>".to_string(),
            ],
            subheading_markers: Vec::new(),
            year: 2022,
            sign_convention: SignConvention::SignedCreditDebit,
            has_running_total: true,
            amount_ceiling: Decimal::from(DEFAULT_AMOUNT_CEILING),
            numeric_prefixes: vec!['-'],
            sequence_artifact: Some(SequenceArtifact {
                description_marker: "Remote Online Deposit".to_string(),
                max_digits: DEFAULT_SEQUENCE_DIGITS,
            }),
            kind_rules: vec![
                KindRule {
                    prefix: "Remote Online Deposit".to_string(),
                    kind: EntryKind::DepositSlip,
                },
                KindRule {
                    prefix: "Check #".to_string(),
                    kind: EntryKind::Check,
                },
            ],
            kind_labels: vec![check_label()],
        }
    }

    /// Built-in profile for a layout
    pub fn for_layout(layout: Layout) -> Self {
        match layout {
            Layout::CardActivity => Self::card_activity(),
            Layout::CheckingDetail => Self::checking_detail(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// End the section when the account holder's name is printed
    ///
    /// Card statements repeat the holder's name at the top of each page, which
    /// is where the activity listing breaks off.
    pub fn with_holder(mut self, name: &str) -> Self {
        self.section_end_markers.push(format!("{}<br/>", name));
        self
    }

    /// Kind for a finished entry: the first matching rule wins over the
    /// sign-derived kind
    pub fn resolve_kind(&self, description: &str, signed: Option<EntryKind>) -> Option<EntryKind> {
        self.kind_rules
            .iter()
            .find(|rule| description.starts_with(&rule.prefix))
            .map(|rule| rule.kind)
            .or(signed)
    }

    /// Kind named by a standalone label line, if `text` is one
    pub fn label_kind(&self, text: &str) -> Option<EntryKind> {
        self.kind_labels
            .iter()
            .find(|label| label.label == text)
            .map(|label| label.kind)
    }
}
