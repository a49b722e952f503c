//! Simulated receipt OCR. Picks one of a few canned receipts based on the image bytes.

use chrono::NaiveDate;
use dompet_core::{DraftTransaction, TransactionKind};
use dompet_finance::categorize;

struct CannedReceipt {
    description: &'static str,
    amount: f64,
    kind: TransactionKind,
}

const CANNED_RECEIPTS: &[CannedReceipt] = &[
    CannedReceipt {
        description: "Makan siang di Warung Padang",
        amount: 45_000.0,
        kind: TransactionKind::Expense,
    },
    CannedReceipt {
        description: "Belanja Indomaret",
        amount: 87_500.0,
        kind: TransactionKind::Expense,
    },
    CannedReceipt {
        description: "Bensin Pertamina",
        amount: 150_000.0,
        kind: TransactionKind::Expense,
    },
    CannedReceipt {
        description: "Apotek Kimia Farma",
        amount: 62_000.0,
        kind: TransactionKind::Expense,
    },
    CannedReceipt {
        description: "Tiket Bioskop XXI",
        amount: 100_000.0,
        kind: TransactionKind::Expense,
    },
    CannedReceipt {
        description: "Token Listrik PLN",
        amount: 200_000.0,
        kind: TransactionKind::Expense,
    },
];

/// "Read" a receipt image. The same bytes always give the same result.
pub fn extract(image: &[u8], today: NaiveDate) -> DraftTransaction {
    let seed = image.iter().fold(0usize, |acc, b| acc.wrapping_add(*b as usize));
    let receipt = &CANNED_RECEIPTS[seed % CANNED_RECEIPTS.len()];

    DraftTransaction::new(
        receipt.kind,
        receipt.amount,
        receipt.description,
        categorize(receipt.description, receipt.kind),
        today,
    )
}
