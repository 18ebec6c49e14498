// ABOUTME: Card-scoped field lookup for locator selectors.
// ABOUTME: Returns the first non-empty text or attribute value matched inside one card.

//! Selector-based field lookup inside a card.
//!
//! Key behaviors:
//! - Selectors are tried in order; the first one yielding a non-empty value wins.
//! - Text lookup concatenates the element's text nodes and collapses whitespace.
//! - Attribute lookup returns the attribute value trimmed.
//! - Invalid selectors are skipped.

use scraper::ElementRef;

use crate::locators::compiled::get_or_compile;
use crate::locators::table::{FieldLocator, SelectorSpec};
use crate::units::collapse_whitespace;

/// Returns the first non-empty value the locator finds inside `card`.
pub fn first_value(card: ElementRef<'_>, locator: &FieldLocator) -> Option<String> {
    locator
        .selectors
        .iter()
        .find_map(|spec| value_from_spec(card, spec))
}

/// Returns the first element inside `card` matching `css`.
pub fn first_element<'a>(card: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = get_or_compile(css)?;
    card.select(&selector).next()
}

/// Text content of an element with whitespace collapsed.
pub fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

fn value_from_spec(card: ElementRef<'_>, spec: &SelectorSpec) -> Option<String> {
    let (css, attr) = spec.parts();
    let selector = get_or_compile(css)?;
    card.select(&selector).find_map(|el| {
        let value = match attr {
            Some(name) => el.value().attr(name)?.trim().to_string(),
            None => element_text(el),
        };
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
