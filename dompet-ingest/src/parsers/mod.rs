//! Row parsers, one per CSV layout. Each turns a single line into at most one draft.

pub mod bca;
pub mod generic;
pub mod mandiri;

use chrono::NaiveDate;
use dompet_core::DraftTransaction;

use crate::bank::{BankKey, Layout};

/// Route one line to the parser registered for `bank`.
pub fn parse_line(bank: &BankKey, line: &str, today: NaiveDate) -> Option<DraftTransaction> {
    match bank.layout() {
        Layout::DebitCreditFlag => bca::parse_line(line, bank.as_str(), today),
        Layout::SignedAmount => mandiri::parse_line(line, bank.as_str(), today),
        Layout::Generic => generic::parse_line(line, bank.as_str(), today),
    }
}

/// Split a single CSV line on `delimiter`. Quoted fields may contain the delimiter.
///
/// The csv reader swallows the rest of the line after an unterminated quote,
/// so lines with an odd number of `"` get a plain split instead.
pub(crate) fn split_fields(line: &str, delimiter: u8) -> Vec<String> {
    if line.matches('"').count() % 2 == 1 {
        return plain_split(line, delimiter);
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(line.as_bytes());

    match rdr.records().next() {
        Some(Ok(record)) => record.iter().map(clean_field).collect(),
        Some(Err(_)) => plain_split(line, delimiter),
        None => Vec::new(),
    }
}

fn plain_split(line: &str, delimiter: u8) -> Vec<String> {
    line.split(delimiter as char).map(clean_field).collect()
}

/// Trim whitespace and any stray surrounding quotes.
pub(crate) fn clean_field(field: &str) -> String {
    field.trim().trim_matches('"').trim().to_string()
}

/// `Some(text)` unless the field is blank.
pub(crate) fn non_blank(field: &str) -> Option<&str> {
    let field = field.trim();
    if field.is_empty() { None } else { Some(field) }
}
