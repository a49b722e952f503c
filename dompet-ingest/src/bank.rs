//! Bank keys and the CSV layout each one uses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keys with a registered entry, in the order they are offered to users.
pub const KNOWN_BANKS: [&str; 4] = ["bca", "mandiri", "bni", "bri"];

/// Which row parser handles a bank's export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Comma separated, amount plus a debit/credit flag column
    DebitCreditFlag,
    /// Semicolon separated, signed amount column
    SignedAmount,
    /// Heuristic delimiter and amount detection
    Generic,
}

/// A bank-name hint supplied with an import. Unknown names are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BankKey {
    Bca,
    Mandiri,
    Bni,
    Bri,
    Other(String),
}

impl BankKey {
    /// Case-insensitive, whitespace-tolerant lookup. Never fails.
    pub fn parse(key: &str) -> Self {
        let key = key.trim().to_lowercase();
        match key.as_str() {
            "bca" => BankKey::Bca,
            "mandiri" => BankKey::Mandiri,
            "bni" => BankKey::Bni,
            "bri" => BankKey::Bri,
            _ => BankKey::Other(key),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BankKey::Bca => "bca",
            BankKey::Mandiri => "mandiri",
            BankKey::Bni => "bni",
            BankKey::Bri => "bri",
            BankKey::Other(key) => key,
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            BankKey::Bca => Layout::DebitCreditFlag,
            BankKey::Mandiri => Layout::SignedAmount,
            // BNI and BRI exports have no dedicated layout yet
            BankKey::Bni | BankKey::Bri => Layout::Generic,
            BankKey::Other(_) => Layout::Generic,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BankKey::Other(_))
    }
}

impl fmt::Display for BankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
