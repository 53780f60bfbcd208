//! Session-scoped invoice number generation.

use chrono::{Datelike, NaiveDate};

/// Owns the counter behind human-readable invoice numbers
/// (`INV<year>-<4-digit counter>`).
///
/// Starts at 0 and increments once per issued number. The counter lives as
/// long as the session that owns it; a new session starts over from its seed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceNumberSequence {
    counter: u64,
}

impl InvoiceNumberSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the counter; the next issued number uses `last_issued + 1`.
    pub fn with_start(last_issued: u64) -> Self {
        Self {
            counter: last_issued,
        }
    }

    /// Last issued counter value (0 if none issued yet).
    pub fn current(&self) -> u64 {
        self.counter
    }

    /// Issue the next invoice number for the year of `date`.
    pub fn next_number(&mut self, date: NaiveDate) -> String {
        self.counter += 1;
        format!("INV{}-{:04}", date.year(), self.counter)
    }
}
