//! dompet-core: transaction record types and clock helpers for the Dompet finance tracker

pub mod time;
pub mod transaction;

pub use time::{parse_iso_date, today};
pub use transaction::{DraftTransaction, NewTransaction, Transaction, TransactionKind};
