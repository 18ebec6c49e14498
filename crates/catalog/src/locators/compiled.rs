// ABOUTME: Pre-compiled CSS selector cache shared by all extraction threads.
// ABOUTME: Eliminates repeated parsing of locator selectors for every card.

//! Selector caching for efficient repeated DOM queries.
//!
//! Every card of every document is queried with the same handful of locator
//! selectors, so each selector string is parsed once and reused.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::Selector;

/// Thread-safe cache of compiled CSS selectors; invalid selectors are cached as `None`.
static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` if the selector does not parse.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    let mut cache = SELECTOR_CACHE.write().unwrap_or_else(|e| e.into_inner());
    // Another thread may have inserted while we were compiling.
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }
    cache.insert(css.to_string(), compiled.clone());
    compiled
}

/// Precompiles a batch of selectors, returning the ones that failed to parse.
pub fn precompile_selectors<I, S>(selectors: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut invalid = Vec::new();
    let mut cache = SELECTOR_CACHE.write().unwrap_or_else(|e| e.into_inner());
    for css in selectors {
        let css = css.as_ref();
        let entry = cache
            .entry(css.to_string())
            .or_insert_with(|| Selector::parse(css).ok());
        if entry.is_none() {
            invalid.push(css.to_string());
        }
    }
    invalid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_selector_is_cached() {
        assert!(get_or_compile("div.product-list__card").is_some());
        assert!(get_or_compile("div.product-list__card").is_some());
    }

    #[test]
    fn test_invalid_selector_returns_none() {
        assert!(get_or_compile("[[[invalid").is_none());
        assert!(get_or_compile("[[[invalid").is_none());
    }

    #[test]
    fn test_attribute_selectors_with_odd_class_names() {
        assert!(get_or_compile(r#"span[class~="+tnoqZhn89+NHUA43BpiJg=="]"#).is_some());
        assert!(get_or_compile(r#"a[id^="product-card__"]"#).is_some());
        assert!(get_or_compile(r#"a[href*="/xpress/"]"#).is_some());
    }

    #[test]
    fn test_precompile_reports_invalid() {
        let invalid = precompile_selectors(["h1", "p.intro", "[[[bad", "a[href]"]);
        assert_eq!(invalid, vec!["[[[bad".to_string()]);
        assert!(get_or_compile("p.intro").is_some());
    }
}
