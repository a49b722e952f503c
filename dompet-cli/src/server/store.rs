//! In-memory transaction store shared by the request handlers.
//!
//! Lives for the whole process and starts empty (or with the demo record)
//! on every restart.

use chrono::NaiveDate;
use dompet_core::{DraftTransaction, NewTransaction, Transaction, TransactionKind};
use dompet_finance::{categorize, Statistics};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::error::{ApiError, Result};

#[derive(Debug, Default)]
pub struct TransactionStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the sample salary record.
    pub fn with_demo_seed() -> Self {
        let salary = DraftTransaction::new(
            TransactionKind::Income,
            5_000_000.0,
            "Gaji Bulan Januari",
            "gaji",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default(),
        );
        Self {
            transactions: RwLock::new(vec![Transaction::from_draft(salary)]),
        }
    }

    pub async fn insert(&self, txn: Transaction) -> Transaction {
        self.transactions.write().await.push(txn.clone());
        txn
    }

    /// Newest date first; same-day records keep insertion order.
    pub async fn list(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let mut all: Vec<Transaction> = self
            .transactions
            .read()
            .await
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        all.sort_by(|a, b| b.draft.date.cmp(&a.draft.date));
        all
    }

    pub async fn remove(&self, id: &str) -> Option<Transaction> {
        let mut guard = self.transactions.write().await;
        let idx = guard.iter().position(|t| t.id == id)?;
        Some(guard.remove(idx))
    }

    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn statistics(&self) -> Statistics {
        let guard = self.transactions.read().await;
        Statistics::from_drafts(guard.iter().map(|t| &t.draft))
    }
}

/// List filters from the query string. Blank values mean "any".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionFilter {
    /// `pemasukan` or `pengeluaran`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// `YYYY-MM`
    #[serde(default)]
    pub month: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(kind) = wanted(&self.kind) {
            if txn.kind().as_str() != kind {
                return false;
            }
        }
        if let Some(category) = wanted(&self.category) {
            if txn.category() != category {
                return false;
            }
        }
        if let Some(month) = wanted(&self.month) {
            if txn.draft.date.format("%Y-%m").to_string() != month {
                return false;
            }
        }
        true
    }
}

fn wanted(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Validate a manual-entry body and promote it to a stored transaction.
pub fn accept_new(new: NewTransaction, today: NaiveDate) -> Result<Transaction> {
    if !new.amount.is_finite() || new.amount <= 0.0 {
        return Err(ApiError::Validation("Jumlah harus lebih dari 0".to_string()));
    }

    let description = new.description.trim();
    if description.is_empty() {
        return Err(ApiError::Validation("Keterangan tidak boleh kosong".to_string()));
    }

    let category = match new.category.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => categorize(description, new.kind).to_string(),
    };

    let mut draft = DraftTransaction::new(
        new.kind,
        new.amount,
        description,
        category,
        new.date.unwrap_or(today),
    );
    draft.bank = new.bank.filter(|b| !b.trim().is_empty());

    let txn = Transaction::from_draft(draft);
    Ok(match new.receipt_image {
        Some(name) => txn.with_receipt_image(name),
        None => txn,
    })
}
