//! Mandiri CSV rows (semicolon separated, signed amount).
//!
//!   Tanggal;Ref;Keterangan;Kode;Jumlah
//!   16/01/2024;FT001;Transfer ke Budi;TRF;-250.000,00

use chrono::NaiveDate;
use dompet_core::DraftTransaction;
use dompet_finance::categorize;

use super::{non_blank, split_fields};
use crate::normalize::{normalize_amount, normalize_date};

pub const PLACEHOLDER: &str = "Transaksi Mandiri";

const DATE: usize = 0;
const DESCRIPTION: usize = 2;
const AMOUNT: usize = 4;
const MIN_COLUMNS: usize = 5;

pub fn parse_line(line: &str, bank: &str, today: NaiveDate) -> Option<DraftTransaction> {
    let cols = split_fields(line, b';');
    if cols.len() < MIN_COLUMNS {
        return None;
    }

    let amount = normalize_amount(&cols[AMOUNT])?;
    if amount.is_zero() {
        return None;
    }

    let kind = amount.kind();
    let description = non_blank(&cols[DESCRIPTION]).unwrap_or(PLACEHOLDER);
    let category = categorize(description, kind);
    let date = normalize_date(&cols[DATE], today);

    Some(DraftTransaction::new(kind, amount.magnitude, description, category, date).with_bank(bank))
}
