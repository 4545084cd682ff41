//! CSV output for parsed entries
//!
//! Rows are written without a header and without CSV quoting: the description
//! column carries its own double quotes, matching the bank's own export
//! format. Quotes inside a description are not escaped.
//!
//! - Card activity: `Date,Date,"Description",Amount,`
//! - Checking detail: `Type,Date,"Description",Amount,ACH_Type,Total,,`

use crate::core::EntryStore;
use crate::types::{Layout, StatementError, TransactionEntry};
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
struct CardActivityRow<'a> {
    transaction_date: &'a str,
    posting_date: &'a str,
    description: String,
    amount: String,
    trailing: &'a str,
}

#[derive(Debug, Serialize)]
struct CheckingDetailRow<'a> {
    details: &'a str,
    posting_date: &'a str,
    description: String,
    amount: String,
    ach_type: String,
    balance: String,
    check_or_slip: &'a str,
    trailing: &'a str,
}

fn quoted(description: &str) -> String {
    format!("\"{}\"", description)
}

impl<'a> From<&'a TransactionEntry> for CardActivityRow<'a> {
    fn from(entry: &'a TransactionEntry) -> Self {
        CardActivityRow {
            transaction_date: &entry.date,
            posting_date: &entry.date,
            description: quoted(&entry.description),
            amount: entry.amount.to_string(),
            trailing: "",
        }
    }
}

impl<'a> From<&'a TransactionEntry> for CheckingDetailRow<'a> {
    fn from(entry: &'a TransactionEntry) -> Self {
        let details = entry.kind.map(|kind| kind.label()).unwrap_or_default();
        CheckingDetailRow {
            details,
            posting_date: &entry.date,
            description: quoted(&entry.description),
            amount: entry.amount.to_string(),
            ach_type: format!("ACH_{}", details),
            balance: entry
                .running_total
                .map(|total| total.to_string())
                .unwrap_or_default(),
            check_or_slip: "",
            trailing: "",
        }
    }
}

/// Write entries as CSV rows in the layout's format
///
/// # Arguments
///
/// * `entries` - Entries to write, in store order
/// * `layout` - Selects the row format
/// * `output` - Destination, e.g. stdout for a partial dump
///
/// # Returns
///
/// * `Ok(())` - All rows written and flushed
/// * `Err(StatementError::Csv)` - If a row cannot be written
pub fn write_entries_csv(
    entries: &EntryStore,
    layout: Layout,
    output: &mut dyn Write,
) -> Result<(), StatementError> {
    // Descriptions are pre-quoted, so the writer must not quote again
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(output);

    // One row per entry, shaped by the layout
    for entry in entries {
        match layout {
            Layout::CardActivity => writer.serialize(CardActivityRow::from(entry))?,
            Layout::CheckingDetail => writer.serialize(CheckingDetailRow::from(entry))?,
        }
    }

    writer.flush()?;
    Ok(())
}

/// Create (or overwrite) `path` and write the entries to it
///
/// # Arguments
///
/// * `entries` - Entries to write
/// * `layout` - Selects the row format
/// * `path` - Output file; truncated if it exists
///
/// # Returns
///
/// * `Ok(())` - The file holds exactly the given rows
/// * `Err(StatementError::Io)` - If the file cannot be created or flushed
/// * `Err(StatementError::Csv)` - If a row cannot be written
pub fn write_entries_file(
    entries: &EntryStore,
    layout: Layout,
    path: &Path,
) -> Result<(), StatementError> {
    let file = File::create(path).map_err(|e| StatementError::Io {
        message: format!("failed to create '{}': {}", path.display(), e),
    })?;
    let mut output = BufWriter::new(file);
    write_entries_csv(entries, layout, &mut output)?;
    // BufWriter only reports write errors on flush
    output.flush()?;
    Ok(())
}
