//! BCA internet-banking CSV rows.
//!
//! Expected row layout (comma separated, header skipped by the dispatcher):
//!   Tanggal,Keterangan,Cabang,Jumlah,DB/CR,Saldo
//!   15/01/2024,"Belanja Bulanan",Main,150000,D,999999
//!
//! The flag column marks credits with `C`, matched case-insensitively so the
//! `CR`/`cr` spellings some exports use also count. Anything else is a debit.

use chrono::NaiveDate;
use dompet_core::{DraftTransaction, TransactionKind};
use dompet_finance::categorize;

use super::{non_blank, split_fields};
use crate::normalize::{normalize_amount, normalize_date};

pub const PLACEHOLDER: &str = "Transaksi BCA";

const DATE: usize = 0;
const DESCRIPTION: usize = 1;
const AMOUNT: usize = 3;
const FLAG: usize = 4;
const MIN_COLUMNS: usize = 6;

pub fn parse_line(line: &str, bank: &str, today: NaiveDate) -> Option<DraftTransaction> {
    let cols = split_fields(line, b',');
    if cols.len() < MIN_COLUMNS {
        return None;
    }

    let amount = normalize_amount(&cols[AMOUNT])?;
    if amount.is_zero() {
        return None;
    }

    let kind = if cols[FLAG].to_uppercase().contains('C') {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };

    let description = non_blank(&cols[DESCRIPTION]).unwrap_or(PLACEHOLDER);
    let category = categorize(description, kind);
    let date = normalize_date(&cols[DATE], today);

    let draft = DraftTransaction::new(kind, amount.magnitude, description, category, date);
    Some(draft.with_bank(bank))
}
