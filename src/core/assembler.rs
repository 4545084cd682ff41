//! Transaction assembler
//!
//! A state machine that walks the rendered line sequence and builds
//! transaction entries out of it:
//!
//! ```text
//! Idle ──start marker──▶ AwaitHeader ──first date──┐
//!   │                                              ▼
//!   └──start marker──▶ AwaitDate ──date──▶ AwaitDescription ──lookahead──▶ AwaitAmount
//!                        ▲   │                 ▲      │ continuation              │
//!                        │   └─end marker─▶ Idle      └──────┘                    │
//!                        │                                                        ▼
//!                        └──────────── finalize ◀── AwaitTotal ◀── (running total)
//! ```
//!
//! Which of the optional states are used is decided by the
//! [`FormatProfile`]. The first extractor failure aborts the run; entries
//! finalized before it are returned in the [`PartialParse`].

use crate::core::classifier::{self, Boundary};
use crate::core::entry_store::EntryStore;
use crate::core::extract;
use crate::core::markup;
use crate::types::{
    EntryKind, FormatProfile, Line, PartialParse, SectionEntry, StatementError, TransactionEntry,
};
use log::{debug, warn};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Outside any transaction section
    Idle,
    /// Skipping the bold header block after the section start
    AwaitHeader,
    /// Between entries
    AwaitDate,
    /// Collecting description lines of the open entry
    AwaitDescription,
    AwaitAmount,
    AwaitTotal,
}

/// Entry under construction
#[derive(Debug)]
struct PendingEntry {
    opened_at: usize,
    date: String,
    description: String,
    amount: Option<Decimal>,
    kind: Option<EntryKind>,
    /// Kind taken from a label line ahead of the description
    label_kind: Option<EntryKind>,
    running_total: Option<Decimal>,
}

impl PendingEntry {
    fn new(opened_at: usize, date: String) -> Self {
        PendingEntry {
            opened_at,
            date,
            description: String::new(),
            amount: None,
            kind: None,
            label_kind: None,
            running_total: None,
        }
    }

    fn append_description(&mut self, part: &str) {
        if part.is_empty() {
            return;
        }
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(part);
    }

    /// Turn into a stored entry once every field the profile needs is set
    fn finalize(self, profile: &FormatProfile, line: usize) -> Result<TransactionEntry, StatementError> {
        if self.description.is_empty() {
            return Err(StatementError::format(
                line,
                format!("entry opened at line {} has no description", self.opened_at),
            ));
        }
        let amount = self.amount.ok_or_else(|| {
            StatementError::format(
                line,
                format!("entry opened at line {} has no amount", self.opened_at),
            )
        })?;
        if profile.has_running_total && self.running_total.is_none() {
            return Err(StatementError::format(
                line,
                format!("entry opened at line {} has no running total", self.opened_at),
            ));
        }

        // Label line first, then description rules, then the sign
        let kind = self
            .label_kind
            .or_else(|| profile.resolve_kind(&self.description, self.kind));
        Ok(TransactionEntry {
            date: self.date,
            description: self.description,
            amount,
            kind,
            running_total: self.running_total,
        })
    }
}

/// Statement parser for one layout profile
#[derive(Debug, Clone)]
pub struct Assembler {
    profile: FormatProfile,
}

impl Assembler {
    pub fn new(profile: FormatProfile) -> Self {
        Assembler { profile }
    }

    pub fn profile(&self) -> &FormatProfile {
        &self.profile
    }

    /// Parse a complete line sequence
    ///
    /// Runs are independent: the same lines and profile always give the same
    /// store.
    ///
    /// # Arguments
    ///
    /// * `lines` - The rendered statement, one numbered line per element
    ///
    /// # Returns
    ///
    /// * `Ok(EntryStore)` - Every entry found, in line order
    /// * `Err(PartialParse)` - The first failure, with every entry finalized
    ///   before the failing line
    pub fn run(&self, lines: &[Line<'_>]) -> Result<EntryStore, PartialParse> {
        let mut run = Run {
            profile: &self.profile,
            lines,
            state: ParserState::Idle,
            current: None,
            store: EntryStore::new(),
        };

        match run.drive() {
            Ok(()) => Ok(run.store),
            Err(error) => Err(PartialParse {
                entries: run.store,
                error,
            }),
        }
    }

    /// Split a rendered blob into lines and parse it
    ///
    /// # Arguments
    ///
    /// * `rendered` - Renderer output, lines separated by newlines
    pub fn run_text(&self, rendered: &str) -> Result<EntryStore, PartialParse> {
        self.run(&Line::split(rendered))
    }
}

struct Run<'p, 'l, 'a> {
    profile: &'p FormatProfile,
    lines: &'l [Line<'a>],
    state: ParserState,
    current: Option<PendingEntry>,
    store: EntryStore,
}

impl Run<'_, '_, '_> {
    fn drive(&mut self) -> Result<(), StatementError> {
        let mut idx = 0;
        while idx < self.lines.len() {
            idx += self.step(idx)?;
        }
        self.finish()
    }

    /// Handle the line at `idx`; returns how many lines were consumed
    fn step(&mut self, idx: usize) -> Result<usize, StatementError> {
        let line = self.lines[idx];
        match self.state {
            ParserState::Idle => {
                // Everything outside a section is page furniture
                if classifier::is_section_boundary(line.text, Boundary::Start, self.profile) {
                    debug!("section starts at line {}", line.number);
                    self.state = match self.profile.section_entry {
                        SectionEntry::Dates => ParserState::AwaitDate,
                        SectionEntry::Header => ParserState::AwaitHeader,
                    };
                }
                Ok(1)
            }
            ParserState::AwaitHeader => {
                self.header(line)?;
                Ok(1)
            }
            ParserState::AwaitDate => {
                self.date_or_wrap(line)?;
                Ok(1)
            }
            ParserState::AwaitDescription => self.description(idx),
            ParserState::AwaitAmount => {
                self.amount(line)?;
                Ok(1)
            }
            ParserState::AwaitTotal => {
                self.total(line)?;
                Ok(1)
            }
        }
    }

    fn header(&mut self, line: Line<'_>) -> Result<(), StatementError> {
        // Column titles are bold
        if markup::is_bold(line.text) {
            return Ok(());
        }
        markup::strip_terminator(line.text).map_err(|e| StatementError::field(line.number, e))?;
        if !classifier::is_date_line(line.text, self.profile) {
            return Err(StatementError::section(
                line.number,
                format!("section header is followed by '{}' instead of a date", line.text),
            ));
        }
        let date = extract::parse_date(line.text, self.profile.year)
            .map_err(|e| StatementError::field(line.number, e))?;
        self.open(line.number, date);
        Ok(())
    }

    fn date_or_wrap(&mut self, line: Line<'_>) -> Result<(), StatementError> {
        // End markers win over everything else between entries
        if classifier::is_section_boundary(line.text, Boundary::End, self.profile) {
            debug!("section ends at line {}", line.number);
            self.state = ParserState::Idle;
            return Ok(());
        }
        if classifier::is_section_boundary(line.text, Boundary::Subheading, self.profile) {
            return Ok(());
        }

        // A date opens the next entry
        if let Ok(date) = extract::parse_date(line.text, self.profile.year) {
            self.open(line.number, date);
            return Ok(());
        }

        // Anything else is the tail of the previous description
        let part = extract::parse_description(line.text)
            .map_err(|e| StatementError::field(line.number, e))?;
        if !self.store.extend_last_description(&part) {
            return Err(StatementError::section(
                line.number,
                format!("wrapped line '{}' has no entry to attach to", line.text),
            ));
        }
        warn!("wrapped line {}: {}", line.number, line.text);
        Ok(())
    }

    fn description(&mut self, idx: usize) -> Result<usize, StatementError> {
        let line = self.lines[idx];
        let lines = self.lines;
        let profile = self.profile;
        let part = extract::parse_description(line.text)
            .map_err(|e| StatementError::field(line.number, e))?;
        let entry = self
            .current
            .as_mut()
            .ok_or_else(|| StatementError::format(line.number, "no open entry for description"))?;

        // A type label only counts when description text follows it
        if entry.description.is_empty() && entry.label_kind.is_none() {
            if let Some(kind) = profile.label_kind(&part) {
                let text_follows = lines
                    .get(idx + 1)
                    .is_some_and(|next| classifier::is_description_continuation(next.text, profile));
                if text_follows {
                    debug!("type label {} at line {}", kind, line.number);
                    entry.label_kind = Some(kind);
                    return Ok(1);
                }
            }
        }
        entry.append_description(&part);

        // Look past a sequence number printed under the description
        let mut next_idx = idx + 1;
        if let Some(artifact) = &profile.sequence_artifact {
            let follows = lines
                .get(next_idx)
                .is_some_and(|next| artifact.matches(next.text));
            if follows && entry.description.contains(&artifact.description_marker) {
                debug!("skipping sequence number at line {}", line.number + 1);
                next_idx += 1;
            }
        }

        let next = lines.get(next_idx).ok_or_else(|| {
            StatementError::format(line.number, "input ended while reading a description")
        })?;
        if classifier::is_description_continuation(next.text, profile) {
            warn!(
                "text wrapped line {}: {} -> {}",
                line.number, line.text, next.text
            );
        } else {
            self.state = ParserState::AwaitAmount;
        }
        Ok(next_idx - idx)
    }

    fn amount(&mut self, line: Line<'_>) -> Result<(), StatementError> {
        let (amount, kind) = extract::parse_amount(line.text, self.profile.sign_convention)
            .map_err(|e| StatementError::field(line.number, e))?;
        let entry = self
            .current
            .as_mut()
            .ok_or_else(|| StatementError::format(line.number, "no open entry for amount"))?;
        entry.amount = Some(amount);
        entry.kind = kind;

        // Card entries end at the amount; checking entries wait for the balance
        if self.profile.has_running_total {
            self.state = ParserState::AwaitTotal;
            Ok(())
        } else {
            self.close(line.number)
        }
    }

    fn total(&mut self, line: Line<'_>) -> Result<(), StatementError> {
        let total =
            extract::parse_total(line.text).map_err(|e| StatementError::field(line.number, e))?;
        let entry = self
            .current
            .as_mut()
            .ok_or_else(|| StatementError::format(line.number, "no open entry for total"))?;
        entry.running_total = Some(total);
        self.close(line.number)
    }

    fn open(&mut self, line: usize, date: String) {
        self.current = Some(PendingEntry::new(line, date));
        self.state = ParserState::AwaitDescription;
    }

    fn close(&mut self, line: usize) -> Result<(), StatementError> {
        let pending = self
            .current
            .take()
            .ok_or_else(|| StatementError::format(line, "no open entry to finalize"))?;
        let entry = pending.finalize(self.profile, line)?;
        // Stored entries are never touched again, except by a wrapped line
        self.store.push(entry);
        self.state = ParserState::AwaitDate;
        Ok(())
    }

    /// Check the state the input ended in
    fn finish(&self) -> Result<(), StatementError> {
        let last = self.lines.last().map_or(0, |line| line.number);
        match self.state {
            ParserState::Idle | ParserState::AwaitDate => Ok(()),
            ParserState::AwaitHeader => Err(StatementError::section(
                last,
                "input ended inside a section header",
            )),
            ParserState::AwaitDescription | ParserState::AwaitAmount | ParserState::AwaitTotal => {
                let opened_at = self.current.as_ref().map_or(last, |entry| entry.opened_at);
                Err(StatementError::format(
                    last,
                    format!("input ended before the entry opened at line {} was complete", opened_at),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldError, Layout};
    use rstest::rstest;

    fn card() -> Assembler {
        Assembler::new(FormatProfile::card_activity())
    }

    fn checking() -> Assembler {
        Assembler::new(FormatProfile::checking_detail())
    }

    fn rendered(lines: &[&str]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_single_entry_with_header() {
        let text = rendered(&[
            "<html>",
            "*start*transactiondetail<br/>",
            "<b>DATE</b><br/>",
            "<b>DESCRIPTION</b><br/>",
            "04/22<br/>",
            "Zelle&#160;Payment&#160;To&#160;Landlord<br/>",
            "-1,500.00<br/>",
            "2,053.70<br/>",
        ]);

        let store = checking().run_text(&text).unwrap();
        assert_eq!(store.len(), 1);
        let entry = &store.as_slice()[0];
        assert_eq!(entry.date, "04/22/2022");
        assert_eq!(entry.description, "Zelle Payment To Landlord");
        assert_eq!(entry.amount.to_string(), "-1500.00");
        assert_eq!(entry.kind, Some(EntryKind::Debit));
        assert_eq!(entry.running_total.map(|t| t.to_string()), Some("2053.70".to_string()));
    }

    #[test]
    fn test_card_entries_without_header() {
        let text = rendered(&[
            "<b>Date of</b><br/>",
            "$ Amount<br/>",
            "03/15<br/>",
            "AMAZON.COM&#160;&#160;PURCHASE<br/>",
            "1,234.56<br/>",
            "PAYMENTS AND OTHER CREDITS<br/>",
            "3/5<br/>",
            "PAYMENT&#160;THANK&#160;YOU<br/>",
            "-500.00<br/>",
            "Totals Year-to-Date</b><br/>",
            "trailing noise without terminator",
        ]);

        let store = card().run_text(&text).unwrap();
        let rows: Vec<(&str, &str, String)> = store
            .iter()
            .map(|e| (e.date.as_str(), e.description.as_str(), e.amount.to_string()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("03/15/2023", "AMAZON.COM PURCHASE", "-1234.56".to_string()),
                ("03/05/2023", "PAYMENT THANK YOU", "500.00".to_string()),
            ]
        );
        assert!(store.iter().all(|e| e.kind.is_none() && e.running_total.is_none()));
    }

    #[test]
    fn test_wrapped_description_lines() {
        let text = rendered(&[
            "$ Amount<br/>",
            "03/15<br/>",
            "CHECK<br/>",
            "DEPOSIT&#160;FROM<br/>",
            "CUSTOMER<br/>",
            "150.00<br/>",
        ]);

        let store = card().run_text(&text).unwrap();
        assert_eq!(store.len(), 1);
        let entry = &store.as_slice()[0];
        assert_eq!(entry.description, "DEPOSIT FROM CUSTOMER");
        assert_eq!(entry.amount.to_string(), "-150.00");
        assert_eq!(entry.kind, Some(EntryKind::Check));
    }

    #[test]
    fn test_type_label_alone_is_the_description() {
        let text = rendered(&["$ Amount<br/>", "03/15<br/>", "CHECK<br/>", "25.00<br/>"]);

        let store = card().run_text(&text).unwrap();
        let entry = &store.as_slice()[0];
        assert_eq!(entry.description, "CHECK");
        assert_eq!(entry.kind, None);
    }

    #[test]
    fn test_type_label_overrides_sign_kind() {
        let text = rendered(&[
            "*start*transactiondetail<br/>",
            "04/22<br/>",
            "CHECK<br/>",
            "Landlord&#160;Rent<br/>",
            "-900.00<br/>",
            "1,153.70<br/>",
        ]);

        let store = checking().run_text(&text).unwrap();
        let entry = &store.as_slice()[0];
        assert_eq!(entry.description, "Landlord Rent");
        assert_eq!(entry.amount.to_string(), "-900.00");
        assert_eq!(entry.kind, Some(EntryKind::Check));
    }

    #[test]
    fn test_wrap_after_amount_extends_previous_entry() {
        let text = rendered(&[
            "$ Amount<br/>",
            "03/15<br/>",
            "UBER&#160;TRIP<br/>",
            "12.40<br/>",
            "HELP.UBER.COM<br/>",
            "03/16<br/>",
            "COFFEE<br/>",
            "4.50<br/>",
        ]);

        let store = card().run_text(&text).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.as_slice()[0].description, "UBER TRIP HELP.UBER.COM");
        assert_eq!(store.as_slice()[1].description, "COFFEE");
    }

    #[test]
    fn test_wrap_with_no_previous_entry_is_section_error() {
        let text = rendered(&["$ Amount<br/>", "ORPHAN<br/>"]);

        let failure = card().run_text(&text).unwrap_err();
        assert!(failure.entries.is_empty());
        assert!(matches!(failure.error, StatementError::Section { line: 2, .. }));
    }

    #[test]
    fn test_header_without_date_is_section_error() {
        let text = rendered(&[
            "*start*transactiondetail<br/>",
            "<b>DATE</b><br/>",
            "Beginning&#160;Balance<br/>",
        ]);

        let failure = checking().run_text(&text).unwrap_err();
        assert!(matches!(failure.error, StatementError::Section { line: 3, .. }));
    }

    #[rstest]
    #[case::date(Layout::CardActivity, &["$ Amount<br/>", "03/15"], 2)]
    #[case::description(
        Layout::CardActivity,
        &["$ Amount<br/>", "03/15<br/>", "COFFEE", "4.50<br/>"],
        3
    )]
    #[case::amount(Layout::CardActivity, &["$ Amount<br/>", "03/15<br/>", "COFFEE<br/>", "4.50"], 4)]
    #[case::header(
        Layout::CheckingDetail,
        &["*start*transactiondetail<br/>", "<b>DATE</b><br/>", "04/22"],
        3
    )]
    #[case::total(
        Layout::CheckingDetail,
        &["*start*transactiondetail<br/>", "04/22<br/>", "Payroll<br/>", "100.00<br/>", "153.70"],
        5
    )]
    fn test_missing_terminator_is_format_error(
        #[case] layout: Layout,
        #[case] lines: &[&str],
        #[case] bad_line: usize,
    ) {
        let assembler = Assembler::new(FormatProfile::for_layout(layout));
        let failure = assembler.run_text(&rendered(lines)).unwrap_err();
        match failure.error {
            StatementError::Field { line, source } => {
                assert_eq!(line, bad_line);
                assert!(matches!(source, FieldError::MissingTerminator { .. }));
            }
            other => panic!("expected a field error, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_keeps_finalized_entries() {
        let text = rendered(&[
            "$ Amount<br/>",
            "03/15<br/>",
            "COFFEE<br/>",
            "4.50<br/>",
            "03/16<br/>",
            "BOOKS<br/>",
            "12.00",
            "03/17<br/>",
            "LUNCH<br/>",
            "9.00<br/>",
        ]);

        let failure = card().run_text(&text).unwrap_err();
        assert_eq!(failure.entries.len(), 1);
        assert_eq!(failure.entries.as_slice()[0].description, "COFFEE");
        assert!(matches!(failure.error, StatementError::Field { line: 7, .. }));
    }

    #[test]
    fn test_input_ending_mid_description() {
        let text = rendered(&["$ Amount<br/>", "03/15<br/>", "COFFEE<br/>"]);

        let failure = card().run_text(&text).unwrap_err();
        assert!(matches!(failure.error, StatementError::Format { line: 3, .. }));
    }

    #[test]
    fn test_input_ending_before_total() {
        let text = rendered(&[
            "*start*transactiondetail<br/>",
            "04/22<br/>",
            "Payroll<br/>",
            "100.00<br/>",
        ]);

        let failure = checking().run_text(&text).unwrap_err();
        assert!(failure.entries.is_empty());
        assert!(matches!(failure.error, StatementError::Format { line: 4, .. }));
    }

    #[test]
    fn test_remote_deposit_sequence_number_is_skipped() {
        let text = rendered(&[
            "*start*transactiondetail<br/>",
            "<b>DATE</b><br/>",
            "05/02<br/>",
            "Remote&#160;Online&#160;Deposit<br/>",
            "1<br/>",
            "250.00<br/>",
            "1,250.00<br/>",
            "*end*transaction&#160;detail<br/>",
        ]);

        let store = checking().run_text(&text).unwrap();
        assert_eq!(store.len(), 1);
        let entry = &store.as_slice()[0];
        assert_eq!(entry.description, "Remote Online Deposit");
        assert_eq!(entry.amount.to_string(), "250.00");
        assert_eq!(entry.kind, Some(EntryKind::DepositSlip));
        assert_eq!(entry.running_total.map(|t| t.to_string()), Some("1250.00".to_string()));
    }

    #[test]
    fn test_multi_digit_sequence_number_is_skipped() {
        let text = rendered(&[
            "*start*transactiondetail<br/>",
            "05/09<br/>",
            "Remote&#160;Online&#160;Deposit<br/>",
            "11<br/>",
            "80.00<br/>",
            "1,330.00<br/>",
            "*end*transaction&#160;detail<br/>",
        ]);

        let store = checking().run_text(&text).unwrap();
        let entry = &store.as_slice()[0];
        assert_eq!(entry.amount.to_string(), "80.00");
        assert_eq!(entry.running_total.map(|t| t.to_string()), Some("1330.00".to_string()));
    }

    #[test]
    fn test_sections_restart_after_end_marker() {
        let text = rendered(&[
            "*start*transactiondetail<br/>",
            "<b>DATE</b><br/>",
            "04/22<br/>",
            "Discover&#160;E-Payment<br/>",
            "-15.00<br/>",
            "53.70<br/>",
            "<b>Ending&#160;Balance</b><br/>",
            "page footer",
            "*start*transactiondetail<br/>",
            "<b>DATE</b><br/>",
            "04/23<br/>",
            "Payroll&#160;Acme&#160;Inc<br/>",
            "100.00<br/>",
            "153.70<br/>",
            "*end*transaction&#160;detail<br/>",
        ]);

        let store = checking().run_text(&text).unwrap();
        let kinds: Vec<Option<EntryKind>> = store.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![Some(EntryKind::Debit), Some(EntryKind::Credit)]);
    }

    #[test]
    fn test_over_ceiling_line_continues_description() {
        let text = rendered(&[
            "$ Amount<br/>",
            "03/15<br/>",
            "ACCOUNT<br/>",
            "123456.78<br/>",
            "10.00<br/>",
        ]);

        let store = card().run_text(&text).unwrap();
        assert_eq!(store.as_slice()[0].description, "ACCOUNT 123456.78");
        assert_eq!(store.as_slice()[0].amount.to_string(), "-10.00");
    }

    #[test]
    fn test_holder_name_ends_section() {
        let profile = FormatProfile::card_activity().with_holder("JANE Q PUBLIC");
        let text = rendered(&[
            "$ Amount<br/>",
            "03/15<br/>",
            "COFFEE<br/>",
            "4.50<br/>",
            "JANE Q PUBLIC<br/>",
            "Account number ending 1234",
        ]);

        let store = Assembler::new(profile).run_text(&text).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_no_section_yields_empty_store() {
        let store = card().run_text("<html>\n<body>\n</body>").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_runs_are_deterministic() {
        let text = rendered(&[
            "$ Amount<br/>",
            "03/15<br/>",
            "DEPOSIT&#160;FROM<br/>",
            "CUSTOMER<br/>",
            "150.00<br/>",
        ]);
        let assembler = card();
        assert_eq!(
            assembler.run_text(&text).unwrap(),
            assembler.run_text(&text).unwrap()
        );
    }
}
