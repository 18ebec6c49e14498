// ABOUTME: Free-text normalization for product names and quantity/unit detection.
// ABOUTME: Provides extract_units() for the detail field and normalize_name() for titles.

//! Text normalization.
//!
//! `extract_units` pulls every quantity+unit token ("1000 ml", "2x200G") out
//! of a product name and joins them with single spaces. The number and unit
//! are glued together, the unit keeps its original casing, and tokens stay in
//! left-to-right order. Running it on its own output returns the same string.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Recognized unit abbreviations: volume, mass, then length.
pub const SUPPORTED_UNITS: &[&str] = &[
    "ml", "l", "oz", "cl", "cc", "gal", "qt", "pt", "kg", "g", "mg", "lb", "km", "m", "cm", "mm",
];

/// Characters dropped from every name regardless of marketplace.
pub const ZERO_WIDTH_CHARS: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

static UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    let units = SUPPORTED_UNITS.join("|");
    Regex::new(&format!(
        r"(?i)\b(?:\d+x)?\d+(?:\.\d+)?\s*(?:{})\b",
        units
    ))
    .unwrap()
});

/// Extracts all quantity+unit tokens from `text` as one space-separated string.
///
/// Returns an empty string when nothing matches.
pub fn extract_units(text: &str) -> String {
    UNIT_RE
        .find_iter(text)
        .map(|m| m.as_str().split_whitespace().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a raw product title.
///
/// Applies NFKC, removes zero-width characters plus any `extra_strip`
/// characters, and collapses whitespace. Returns `None` if nothing is left.
pub fn normalize_name(raw: &str, extra_strip: &[char]) -> Option<String> {
    let cleaned: String = raw
        .nfkc()
        .filter(|c| !ZERO_WIDTH_CHARS.contains(c) && !extra_strip.contains(c))
        .collect();
    let collapsed = collapse_whitespace(&cleaned);
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_units_in_order_with_original_case() {
        assert_eq!(
            extract_units("Indomilk Susu UHT Full Cream 1000 ml 2x200G"),
            "1000ml 2x200G"
        );
    }

    #[test]
    fn extraction_is_a_fixed_point() {
        let once = extract_units("Indomilk Susu UHT Full Cream 1000 ml 2x200G");
        assert_eq!(extract_units(&once), once);
    }

    #[test]
    fn decimals_and_multipliers() {
        assert_eq!(extract_units("Aqua Botol 1.5 L isi 12X600ml"), "1.5L 12X600ml");
        assert_eq!(extract_units("Minyak Goreng 2 Lt"), "");
    }

    #[test]
    fn prefers_longest_unit_at_word_boundary() {
        assert_eq!(extract_units("Kabel 5mm 10 M"), "5mm 10M");
        assert_eq!(extract_units("Vitamin C 500mg"), "500mg");
        assert_eq!(extract_units("Beras 5 KG"), "5KG");
    }

    #[test]
    fn ignores_units_glued_to_words() {
        assert_eq!(extract_units("Mie goreng 85gr"), "");
        assert_eq!(extract_units("Model X200G2"), "");
    }

    #[test]
    fn no_match_returns_empty() {
        assert_eq!(extract_units("Sabun Cuci Piring Lemon"), "");
        assert_eq!(extract_units(""), "");
    }

    #[test]
    fn normalize_name_collapses_and_strips_zero_width() {
        assert_eq!(
            normalize_name("  Teh\u{200B} Botol\n\t Sosro  ", &[]),
            Some("Teh Botol Sosro".to_string())
        );
    }

    #[test]
    fn normalize_name_applies_nfkc() {
        // Fullwidth digits and letters fold to ASCII, NBSP folds to a space.
        assert_eq!(
            normalize_name("Susu\u{00A0}ＵＨＴ　２５０ml", &[]),
            Some("Susu UHT 250ml".to_string())
        );
    }

    #[test]
    fn normalize_name_extra_strip_chars() {
        assert_eq!(
            normalize_name("Kopi ★ Kapal Api", &['★']),
            Some("Kopi Kapal Api".to_string())
        );
    }

    #[test]
    fn normalize_name_empty_is_none() {
        assert_eq!(normalize_name(" \u{200B} ", &[]), None);
    }
}
