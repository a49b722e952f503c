//! Fallback parser for unknown or irregular exports.
//!
//! The delimiter is guessed only to pick a description out of column 1. The
//! amount is the first Indonesian-style numeral anywhere on the line
//! (`1.500.000,00`, `250.000`, `75`). The numeral pattern carries no sign, so
//! rows read here always come out as income. The date is always `today`.

use chrono::NaiveDate;
use dompet_core::{DraftTransaction, TransactionKind};
use dompet_finance::categorize;
use regex::Regex;
use std::sync::OnceLock;

use super::{non_blank, split_fields};
use crate::normalize::normalize_locale_numeral;

const DELIMITERS: [u8; 3] = [b',', b';', b'\t'];
const MIN_COLUMNS: usize = 3;
const DESCRIPTION: usize = 1;

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,3}(?:\.\d{3})*(?:,\d{2})?").expect("invalid amount regex"))
}

/// Description used when no column can be read, e.g. `Transaksi BNI`.
pub fn placeholder(bank: &str) -> String {
    if bank.trim().is_empty() {
        "Transaksi Bank".to_string()
    } else {
        format!("Transaksi {}", bank.trim().to_uppercase())
    }
}

pub fn parse_line(line: &str, bank: &str, today: NaiveDate) -> Option<DraftTransaction> {
    if line.trim().is_empty() {
        return None;
    }

    let description = DELIMITERS
        .iter()
        .map(|d| split_fields(line, *d))
        .find(|cols| cols.len() >= MIN_COLUMNS)
        .and_then(|cols| non_blank(&cols[DESCRIPTION]).map(str::to_string))
        .unwrap_or_else(|| placeholder(bank));

    let numeral = amount_re().find(line)?;
    let value = normalize_locale_numeral(numeral.as_str())?;
    if value == 0.0 {
        return None;
    }

    let kind = TransactionKind::from_sign(value);
    let category = categorize(&description, kind);

    let draft = DraftTransaction::new(kind, value.abs(), description, category, today);
    Some(draft.with_bank(bank))
}
