//! dompet-finance: keyword category rules and transaction aggregates

pub mod category_rules;
pub mod summary;

pub use category_rules::{categorize, known_categories, CATEGORY_RULES};
pub use summary::{ImportSummary, Statistics};
