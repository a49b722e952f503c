//! Field normalizer: single raw amount and date tokens into canonical values.
//!
//! Neither function returns an error. Amounts that cannot be read are
//! reported as `None` so the caller can drop the row; dates that cannot be
//! read fall back to the supplied "today".

use chrono::NaiveDate;
use dompet_core::TransactionKind;
use regex::Regex;
use std::sync::OnceLock;

/// An amount token split into magnitude and sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedAmount {
    /// Absolute value
    pub magnitude: f64,
    /// True when the raw token carried a minus sign on a non-zero value
    pub negative: bool,
}

impl ParsedAmount {
    pub fn is_zero(&self) -> bool {
        self.magnitude == 0.0
    }

    /// Income unless the token was negative
    pub fn kind(&self) -> TransactionKind {
        if self.negative {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        }
    }
}

/// Thousands-dot, decimal-comma numeral with a comma fraction, e.g. `-1.234,56`
fn comma_decimal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?\d{1,3}(?:\.\d{3})*,\d{2}$").expect("invalid comma decimal regex")
    })
}

fn dmy_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{4})").expect("invalid dmy regex"))
}

fn ymd_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{4})[/-](\d{1,2})[/-](\d{1,2})").expect("invalid ymd regex"))
}

/// Normalize a raw amount token.
///
/// Everything except digits, `.` and `-` is stripped before parsing, so
/// `"Rp 150000"` reads as `150000` and `"1,500,000.00"` as `1500000`.
/// Tokens written in the Indonesian style with a comma fraction
/// (`"1.234,56"`) are read with [`normalize_locale_numeral`] instead.
pub fn normalize_amount(raw: &str) -> Option<ParsedAmount> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    let value = if comma_decimal_re().is_match(&kept) {
        normalize_locale_numeral(&kept)?
    } else {
        let stripped: String = kept.chars().filter(|c| *c != ',').collect();
        stripped.parse::<f64>().ok()?
    };

    if !value.is_finite() {
        return None;
    }

    Some(ParsedAmount {
        magnitude: value.abs(),
        negative: value < 0.0,
    })
}

/// Convert a thousands-dot, decimal-comma numeral (`"1.500.000,00"`) to a number.
pub fn normalize_locale_numeral(token: &str) -> Option<f64> {
    let converted = token.trim().replace('.', "").replace(',', ".");
    converted.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalize a raw date token, falling back to `today`.
///
/// `DD/MM/YYYY` is tried before `YYYY/MM/DD` (either separator `/` or `-`)
/// and the first pattern found anywhere in the token wins. A match that is
/// not a real calendar date (`"13/40/2024"`) also falls back to `today`.
pub fn normalize_date(raw: &str, today: NaiveDate) -> NaiveDate {
    if let Some(caps) = dmy_re().captures(raw) {
        return ymd(&caps[3], &caps[2], &caps[1]).unwrap_or(today);
    }

    if let Some(caps) = ymd_re().captures(raw) {
        return ymd(&caps[1], &caps[2], &caps[3]).unwrap_or(today);
    }

    today
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
