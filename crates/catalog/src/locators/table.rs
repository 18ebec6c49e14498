// ABOUTME: Per-marketplace structural locator definitions and the registry that holds them.
// ABOUTME: Describes which selector or attribute yields each product field inside a card.

//! Structural locator definitions.
//!
//! Site markup changes often, so the rules for finding each field live in
//! data (`data/marketplaces.json`) rather than in extraction code. A
//! [`MarketplaceLocators`] entry names the card selector, one
//! [`FieldLocator`] per field, the product identifier strategy and the
//! number format used by the marketplace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::marketplace::Marketplace;
use crate::numbers::NumberFormat;

/// Specifies how to select a value from inside a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorSpec {
    /// A CSS selector whose text content is used, e.g. "span.title"
    Css(String),
    /// A CSS selector plus attribute name, e.g. ["div.price", "data-value"]
    CssAttr(Vec<String>),
}

impl Default for SelectorSpec {
    fn default() -> Self {
        SelectorSpec::Css(String::new())
    }
}

impl SelectorSpec {
    /// Splits the selector into (css_selector, optional_attribute).
    pub fn parts(&self) -> (&str, Option<&str>) {
        match self {
            SelectorSpec::Css(css) => (css.as_str(), None),
            SelectorSpec::CssAttr(parts) => match parts.as_slice() {
                [css, attr, ..] => (css.as_str(), Some(attr.as_str())),
                [css] => (css.as_str(), None),
                [] => ("", None),
            },
        }
    }
}

/// Ordered list of selectors for one field; the first non-empty match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLocator {
    #[serde(default)]
    pub selectors: Vec<SelectorSpec>,
}

impl FieldLocator {
    /// Convenience constructor from plain CSS selectors.
    pub fn css<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selectors: selectors
                .into_iter()
                .map(|s| SelectorSpec::Css(s.into()))
                .collect(),
        }
    }
}

/// How the product identifier is read from a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum IdLocator {
    /// Find `image`, climb to the nearest `<a href>`, use the trailing path segment.
    ImageAnchor { image: String },
    /// Find `anchor` and use the trailing path segment of its href.
    LinkSlug { anchor: String },
    /// Find `anchor`, split attribute `attr` on `delimiter` and take part `index`.
    DelimitedAttr {
        anchor: String,
        attr: String,
        delimiter: String,
        #[serde(default = "default_part_index")]
        index: usize,
    },
    /// The marketplace exposes no identifier.
    #[default]
    None,
}

fn default_part_index() -> usize {
    1
}

impl IdLocator {
    /// The CSS selector this strategy starts from, if any.
    pub fn selector(&self) -> Option<&str> {
        match self {
            IdLocator::ImageAnchor { image } => Some(image.as_str()),
            IdLocator::LinkSlug { anchor } | IdLocator::DelimitedAttr { anchor, .. } => {
                Some(anchor.as_str())
            }
            IdLocator::None => None,
        }
    }
}

/// Complete locator table for one marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceLocators {
    pub marketplace: Marketplace,
    /// Selector matching one product card
    pub card: String,
    pub name: FieldLocator,
    pub price: FieldLocator,
    /// Pre-discount ("was") price
    #[serde(default)]
    pub original_price: Option<FieldLocator>,
    /// Promotional badge carrying the discount percentage
    #[serde(default)]
    pub discount: Option<FieldLocator>,
    #[serde(default)]
    pub rating: Option<FieldLocator>,
    #[serde(default)]
    pub product_id: IdLocator,
    #[serde(default)]
    pub number_format: NumberFormat,
    /// Characters removed from names in addition to zero-width characters
    #[serde(default)]
    pub strip_chars: Vec<char>,
}

impl MarketplaceLocators {
    /// Every CSS selector in this table, labelled with its field.
    pub fn selectors(&self) -> Vec<(&'static str, &str)> {
        let mut out = vec![("card", self.card.as_str())];
        let fields: [(&'static str, Option<&FieldLocator>); 5] = [
            ("name", Some(&self.name)),
            ("price", Some(&self.price)),
            ("original_price", self.original_price.as_ref()),
            ("discount", self.discount.as_ref()),
            ("rating", self.rating.as_ref()),
        ];
        for (field, locator) in fields {
            for spec in locator.map(|l| l.selectors.as_slice()).unwrap_or_default() {
                out.push((field, spec.parts().0));
            }
        }
        if let Some(css) = self.product_id.selector() {
            out.push(("product_id", css));
        }
        out
    }
}

/// Registry for looking up locator tables by marketplace.
#[derive(Debug, Default, Clone)]
pub struct LocatorRegistry {
    map: BTreeMap<Marketplace, MarketplaceLocators>,
}

impl LocatorRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table, replacing any previous one for the same marketplace.
    pub fn register(&mut self, locators: MarketplaceLocators) {
        self.map.insert(locators.marketplace, locators);
    }

    /// Looks up the table for a marketplace.
    pub fn get(&self, marketplace: Marketplace) -> Option<&MarketplaceLocators> {
        self.map.get(&marketplace)
    }

    /// Iterates over all registered tables in marketplace order.
    pub fn iter(&self) -> impl Iterator<Item = &MarketplaceLocators> {
        self.map.values()
    }

    /// Returns the number of registered marketplaces.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no tables are registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
