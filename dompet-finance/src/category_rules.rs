//! Deterministic keyword rules mapping transaction descriptions to category labels.
//!
//! Rules are checked top to bottom and the first category with a matching
//! keyword wins, so table order is part of the behavior.

use dompet_core::TransactionKind;

/// Fallback label for unmatched income
pub const INCOME_FALLBACK: &str = "pendapatan";
/// Fallback label for unmatched expenses
pub const EXPENSE_FALLBACK: &str = "lainnya";

/// Ordered (category, keywords) pairs. Keywords are lower-case substrings.
pub const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("gaji", &["gaji", "salary", "payroll"]),
    (
        "investasi",
        &["investasi", "saham", "reksadana", "dividen", "deposito", "obligasi"],
    ),
    ("freelance", &["freelance", "proyek", "project", "honor", "komisi"]),
    (
        "makanan",
        &["restoran", "makan", "warung", "cafe", "food", "minum"],
    ),
    (
        "transportasi",
        &[
            "transport", "bensin", "grab", "gojek", "ojek", "taksi", "taxi", "parkir", "kereta",
            "pertamina",
        ],
    ),
    (
        "belanja",
        &[
            "belanja",
            "supermarket",
            "indomaret",
            "alfamart",
            "toko",
            "shopee",
            "tokopedia",
            "market",
        ],
    ),
    (
        "hiburan",
        &["hiburan", "bioskop", "film", "netflix", "spotify", "konser", "game"],
    ),
    (
        "kesehatan",
        &["kesehatan", "dokter", "apotek", "obat", "klinik", "rumah sakit", "bpjs"],
    ),
    (
        "utilitas",
        &["listrik", "pln", "pdam", "internet", "pulsa", "telepon", "wifi", "tagihan"],
    ),
];

/// Categorize a description. Unmatched text falls back on the transaction direction.
pub fn categorize(description: &str, kind: TransactionKind) -> &'static str {
    let desc = description.to_lowercase();

    for &(category, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|k| desc.contains(k)) {
            return category;
        }
    }

    match kind {
        TransactionKind::Income => INCOME_FALLBACK,
        TransactionKind::Expense => EXPENSE_FALLBACK,
    }
}

/// Every label `categorize` can return, in rule order followed by the fallbacks.
pub fn known_categories() -> Vec<&'static str> {
    CATEGORY_RULES
        .iter()
        .map(|(category, _)| *category)
        .chain([INCOME_FALLBACK, EXPENSE_FALLBACK])
        .collect()
}
