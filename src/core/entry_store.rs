//! Entry store
//!
//! Ordered collection of finalized transaction entries produced by one
//! assembler run. Order follows the rendered line order, which is not
//! necessarily chronological.
//!
//! The store is created by the run and handed to the caller, both on success
//! and inside [`PartialParse`](crate::types::PartialParse) on failure.

use crate::types::TransactionEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: Vec<TransactionEntry>,
}

impl EntryStore {
    /// Create an empty store
    ///
    /// # Returns
    ///
    /// A new EntryStore with no entries
    pub fn new() -> Self {
        EntryStore {
            entries: Vec::new(),
        }
    }

    /// Append a finalized entry
    ///
    /// # Arguments
    ///
    /// * `entry` - The entry to store after all existing ones
    pub(crate) fn push(&mut self, entry: TransactionEntry) {
        self.entries.push(entry);
    }

    /// Append a wrapped line to the description of the most recent entry
    ///
    /// Descriptions sometimes wrap past the amount column, so the tail of a
    /// description shows up after the entry was finalized.
    ///
    /// # Arguments
    ///
    /// * `part` - Decoded text of the wrapped line; empty text is ignored
    ///
    /// # Returns
    ///
    /// * `true` - If there was an entry to extend
    /// * `false` - If the store is empty
    pub(crate) fn extend_last_description(&mut self, part: &str) -> bool {
        match self.entries.last_mut() {
            Some(entry) => {
                // Separate with a space, as within an open entry
                if !part.is_empty() {
                    entry.description.push(' ');
                    entry.description.push_str(part);
                }
                true
            }
            None => false,
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionEntry> {
        self.entries.iter()
    }

    /// All entries in line order
    pub fn as_slice(&self) -> &[TransactionEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = &'a TransactionEntry;
    type IntoIter = std::slice::Iter<'a, TransactionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
