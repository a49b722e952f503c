//! dompet-ingest: bank CSV ingestion. Normalizes fields, picks a row parser by
//! bank key, and categorizes every accepted row.
//!
//! Malformed rows are dropped, never fatal. The pipeline keeps no state
//! between calls.

pub mod bank;
pub mod normalize;
pub mod parsers;

use chrono::NaiveDate;
use dompet_core::DraftTransaction;
use dompet_finance::ImportSummary;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use bank::{BankKey, Layout, KNOWN_BANKS};
pub use normalize::{normalize_amount, normalize_date, normalize_locale_numeral, ParsedAmount};

/// Result of one import: accepted rows in input order plus their totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingested {
    pub records: Vec<DraftTransaction>,
    pub summary: ImportSummary,
}

/// Parse a CSV export using the local date as the fallback for unreadable dates.
pub fn ingest(raw_csv: &str, bank_key: &str) -> Ingested {
    ingest_at(raw_csv, bank_key, dompet_core::today())
}

/// Parse a CSV export with an explicit "today".
///
/// The first line is treated as a header. Each remaining non-blank line is
/// parsed on its own; lines the parser rejects are skipped.
pub fn ingest_at(raw_csv: &str, bank_key: &str, today: NaiveDate) -> Ingested {
    let bank = BankKey::parse(bank_key);
    debug!(bank = %bank, layout = ?bank.layout(), known = bank.is_known(), "selected row parser");

    let mut records = Vec::new();
    for (idx, line) in raw_csv.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parsers::parse_line(&bank, line, today) {
            Some(record) => records.push(record),
            None => debug!(line = idx + 1, "dropped row"),
        }
    }

    let summary = ImportSummary::from_drafts(&records);
    Ingested { records, summary }
}
