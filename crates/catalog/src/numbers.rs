// ABOUTME: Numeric and locale parsing for prices, ratings, and discount badges.
// ABOUTME: Every parser returns None on malformed input instead of failing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());
static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 5.0;

/// How a marketplace formats currency amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Currency markers removed before parsing, e.g. "Rp".
    #[serde(default = "default_currency_symbols")]
    pub currency_symbols: Vec<String>,
    /// Thousands grouping character, e.g. '.' in "1.299.000".
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: Option<char>,
}

fn default_currency_symbols() -> Vec<String> {
    vec!["Rp".to_string()]
}

fn default_thousands_separator() -> Option<char> {
    Some('.')
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            currency_symbols: default_currency_symbols(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

/// Parses a currency-formatted amount into an integer in the smallest unit.
///
/// Strips currency symbols, thousands separators, literal `&nbsp;` and all
/// whitespace; whatever remains must be a plain unsigned integer.
pub fn parse_price(text: &str, format: &NumberFormat) -> Option<u64> {
    let mut s = text.replace("&nbsp;", "");
    for symbol in &format.currency_symbols {
        if !symbol.is_empty() {
            s = s.replace(symbol.as_str(), "");
        }
    }
    if let Some(sep) = format.thousands_separator {
        s = s.replace(sep, "");
    }
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parses a star rating from text such as "4,8" or "4.8 (1rb)".
///
/// Comma decimals are read as dot decimals. Values outside [0, 5] are rejected.
pub fn parse_rating(text: &str) -> Option<f64> {
    let found = DECIMAL_RE.find(text)?;
    let value: f64 = found.as_str().replace(',', ".").parse().ok()?;
    if (0.0..=MAX_RATING).contains(&value) {
        Some(round2(value))
    } else {
        None
    }
}

/// Reads the first embedded integer of a promo badge ("Diskon 25%") as a percentage.
pub fn parse_badge_percentage(text: &str) -> Option<f64> {
    let found = INTEGER_RE.find(text)?;
    let value: f64 = found.as_str().parse().ok()?;
    if (0.0..=100.0).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// Derives the discount from the current and pre-discount price.
///
/// Returns `round2(100 * (original - price) / original)` clamped to [0, 100]
/// when both prices are known and `original > 0`, and 0 otherwise.
pub fn discount_percentage(price: Option<u64>, original: Option<u64>) -> f64 {
    match (price, original) {
        (Some(price), Some(original)) if original > 0 => {
            let pct = 100.0 * (original as f64 - price as f64) / original as f64;
            round2(pct).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

/// Rounds to two decimals, correctly rounded with exact ties going to the even digit.
///
/// `round2(0.125) == 0.12` because 0.125 is an exact binary tie, while
/// `round2(2.675) == 2.67` because the stored value sits just below the tie.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    let nearest = scaled.round();
    if (nearest - scaled).abs() != 0.5 {
        return nearest / 100.0;
    }
    // `scaled` is a tie only after rounding the product; the residual says which side `value` was on.
    let residual = value.mul_add(100.0, -scaled);
    let rounded = if residual == 0.0 {
        scaled.round_ties_even()
    } else if residual > 0.0 {
        scaled.ceil()
    } else {
        scaled.floor()
    };
    rounded / 100.0
}
