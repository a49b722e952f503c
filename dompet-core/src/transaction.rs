//! Transaction record types shared by the ingestion pipeline and the HTTP layer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Direction of a money movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    #[serde(rename = "pemasukan")]
    Income,
    #[serde(rename = "pengeluaran")]
    Expense,
}

impl TransactionKind {
    /// Wire name used by the HTTP API
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "pemasukan",
            TransactionKind::Expense => "pengeluaran",
        }
    }

    /// Income for non-negative values, expense otherwise
    pub fn from_sign(value: f64) -> Self {
        if value >= 0.0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, TransactionKind::Income)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized record produced by ingestion, before it gets an id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Magnitude only; direction lives in `kind`
    pub amount: f64,
    pub description: String,
    pub category: String,
    /// Serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Bank key of the import, absent for manual and receipt records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
}

impl DraftTransaction {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
            category: category.into(),
            date,
            bank: None,
        }
    }

    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.bank = Some(bank.into());
        self
    }

    /// Signed amount: positive for income, negative for expense
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// A stored transaction with identity and creation timestamp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(flatten)]
    pub draft: DraftTransaction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Promote a draft, assigning a fresh id and the current timestamp
    pub fn from_draft(draft: DraftTransaction) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            draft,
            receipt_image: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_receipt_image(mut self, name: impl Into<String>) -> Self {
        self.receipt_image = Some(name.into());
        self
    }

    pub fn kind(&self) -> TransactionKind {
        self.draft.kind
    }

    pub fn amount(&self) -> f64 {
        self.draft.amount
    }

    pub fn category(&self) -> &str {
        &self.draft.category
    }
}

/// Manual-entry request body. Form clients send `""` for untouched inputs,
/// so blank `category` and `date` read as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default, rename = "receiptImage")]
    pub receipt_image: Option<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match blank_as_none(deserializer)? {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
