//! Aggregates over transactions: the per-import summary and store-wide statistics.

use dompet_core::{DraftTransaction, TransactionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totals for one ingestion batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total: usize,
    pub income: f64,
    pub expense: f64,
}

impl ImportSummary {
    pub fn from_drafts<'a>(drafts: impl IntoIterator<Item = &'a DraftTransaction>) -> Self {
        let mut summary = Self::default();
        for d in drafts {
            summary.total += 1;
            match d.kind {
                TransactionKind::Income => summary.income += d.amount,
                TransactionKind::Expense => summary.expense += d.amount,
            }
        }
        summary
    }
}

/// Dashboard numbers over every stored transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Income minus expense
    pub balance: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub transaction_count: usize,
    /// Total amount per category label, regardless of direction
    pub by_category: BTreeMap<String, f64>,
}

impl Statistics {
    pub fn from_drafts<'a>(drafts: impl IntoIterator<Item = &'a DraftTransaction>) -> Self {
        let mut stats = Self::default();
        for d in drafts {
            stats.transaction_count += 1;
            match d.kind {
                TransactionKind::Income => stats.total_income += d.amount,
                TransactionKind::Expense => stats.total_expense += d.amount,
            }
            stats.balance += d.signed_amount();
            *stats.by_category.entry(d.category.clone()).or_insert(0.0) += d.amount;
        }
        stats
    }
}
