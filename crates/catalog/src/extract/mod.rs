// ABOUTME: Per-marketplace card extraction from listing page HTML.
// ABOUTME: Dispatches on the Marketplace enum and reads each field leniently via the locator table.

//! Source extraction.
//!
//! [`extract`] is the single entry point: given a marketplace and one HTML
//! document it returns one [`RawCard`] per matched card. Each field is read
//! independently; a missing or malformed field becomes `None` (or the
//! field's default) and never affects the other fields, sibling cards, or
//! the rest of the document.
//!
//! Submodules:
//! - `select`: card-scoped selector lookups.
//! - `product_id`: product identifier strategies.

pub mod product_id;
pub mod select;

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::error::CatalogError;
use crate::locators::compiled::get_or_compile;
use crate::locators::table::{FieldLocator, LocatorRegistry, MarketplaceLocators};
use crate::marketplace::Marketplace;
use crate::numbers::{parse_badge_percentage, parse_price, parse_rating};
use crate::units::normalize_name;

use self::product_id::extract_product_id;
use self::select::first_value;

/// Fields read from one card before assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCard {
    pub name: Option<String>,
    pub price: Option<u64>,
    /// Pre-discount price; equals `price` when no distinct one was found.
    pub original_price: Option<u64>,
    /// Discount stated on a promo badge, if any.
    pub discount_percentage: Option<f64>,
    pub rating: f64,
    pub product_master_id: Option<String>,
}

/// Extracts all cards of `marketplace` from one HTML document.
///
/// Fails only when the registry has no usable table for the marketplace;
/// everything inside a card degrades to defaults instead.
pub fn extract(
    marketplace: Marketplace,
    html: &str,
    registry: &LocatorRegistry,
) -> Result<Vec<RawCard>, CatalogError> {
    let locators = registry
        .get(marketplace)
        .ok_or(CatalogError::MissingMarketplace(marketplace))?;
    let doc = Html::parse_document(html);
    extract_document(&doc, locators)
}

/// Extracts all cards from an already parsed document.
pub fn extract_document(
    doc: &Html,
    locators: &MarketplaceLocators,
) -> Result<Vec<RawCard>, CatalogError> {
    let card_selector =
        get_or_compile(&locators.card).ok_or_else(|| CatalogError::InvalidSelector {
            marketplace: locators.marketplace,
            field: "card",
            selector: locators.card.clone(),
        })?;

    let cards: Vec<RawCard> = doc
        .select(&card_selector)
        .map(|card| extract_card(card, locators))
        .collect();

    debug!(
        marketplace = %locators.marketplace,
        cards = cards.len(),
        "extracted cards"
    );
    Ok(cards)
}

/// Reads every field of one card.
pub fn extract_card(card: ElementRef<'_>, locators: &MarketplaceLocators) -> RawCard {
    let format = &locators.number_format;

    let name = first_value(card, &locators.name)
        .and_then(|raw| normalize_name(&raw, &locators.strip_chars));

    let price = first_value(card, &locators.price).and_then(|text| parse_price(&text, format));

    let original_price = optional_value(card, locators.original_price.as_ref())
        .and_then(|text| parse_price(&text, format))
        .or(price);

    let discount_percentage = optional_value(card, locators.discount.as_ref())
        .and_then(|text| parse_badge_percentage(&text));

    let rating = optional_value(card, locators.rating.as_ref())
        .and_then(|text| parse_rating(&text))
        .unwrap_or(0.0);

    let product_master_id =
        extract_product_id(card, &locators.product_id, locators.marketplace);

    RawCard {
        name,
        price,
        original_price,
        discount_percentage,
        rating,
        product_master_id,
    }
}

fn optional_value(card: ElementRef<'_>, locator: Option<&FieldLocator>) -> Option<String> {
    locator.and_then(|l| first_value(card, l))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locators::load_builtin_registry;
    use pretty_assertions::assert_eq;

    #[test]
    fn blibli_card_all_fields() {
        let html = r#"<html><body>
            <div class="product-list__card">
                <a id="product-card__TEI-60036-00012" href="/p/teh-pucuk/ps--TEI-60036-00012">
                    <span class="els-product__title">Teh Pucuk\u{200B} Harum 350 ml</span>
                </a>
                <div class="els-product__fixed-price">Rp3.500</div>
                <span class="els-product__discount-price">5.000</span>
                <div class="els-promo-label__text">30%</div>
                <div class="els-product__rating-wrapper"> 4,8 </div>
            </div>
        </body></html>"#
            .replace("\\u{200B}", "\u{200B}");
        let registry = load_builtin_registry().unwrap();
        let cards = extract(Marketplace::Blibli, &html, &registry).unwrap();
        assert_eq!(
            cards,
            vec![RawCard {
                name: Some("Teh Pucuk Harum 350 ml".to_string()),
                price: Some(3_500),
                original_price: Some(5_000),
                discount_percentage: Some(30.0),
                rating: 4.8,
                product_master_id: Some("TEI-60036-00012".to_string()),
            }]
        );
    }

    #[test]
    fn missing_fields_degrade_independently() {
        let html = r#"<div class="product-list__card">
                <div class="els-product__fixed-price">harga tidak tersedia</div>
                <div class="els-product__rating-wrapper">Belum ada ulasan</div>
            </div>
            <div class="product-list__card">
                <span class="els-product__title">Kecap Manis 520 ml</span>
                <div class="els-product__fixed-price">Rp21.900</div>
            </div>"#;
        let registry = load_builtin_registry().unwrap();
        let cards = extract(Marketplace::Blibli, html, &registry).unwrap();
        assert_eq!(cards.len(), 2);

        assert_eq!(cards[0], RawCard::default());

        assert_eq!(cards[1].name.as_deref(), Some("Kecap Manis 520 ml"));
        assert_eq!(cards[1].price, Some(21_900));
        assert_eq!(cards[1].original_price, Some(21_900));
        assert_eq!(cards[1].discount_percentage, None);
        assert_eq!(cards[1].rating, 0.0);
    }

    #[test]
    fn unparsable_was_price_falls_back_to_price() {
        let html = r#"<div class="product-list__card">
                <span class="els-product__title">Gula Pasir 1 kg</span>
                <div class="els-product__fixed-price">Rp17.000</div>
                <span class="els-product__discount-price">-</span>
            </div>"#;
        let registry = load_builtin_registry().unwrap();
        let cards = extract(Marketplace::Blibli, html, &registry).unwrap();
        assert_eq!(cards[0].original_price, Some(17_000));
    }

    #[test]
    fn klikindomaret_slug_is_taken_verbatim_from_href() {
        let html = r#"<div class="card-product">
                <a href="https://www.klikindomaret.com/xpress/teh 250ml"><img src="t.jpg"></a>
                <h2 class="md-0 line-clamp-2 text-b1 text-neutral-70 des:mb-2">Teh Kotak 250 ml</h2>
                <div class="price">Rp4.000</div>
            </div>
            <div class="card-product">
                <a href="/xpress/kopi-susu-gula-aren-ñ"><img src="k.jpg"></a>
                <h2 class="md-0 line-clamp-2 text-b1 text-neutral-70 des:mb-2">Kopi Susu Gula Aren</h2>
                <div class="price">Rp8.000</div>
            </div>"#;
        let registry = load_builtin_registry().unwrap();
        let cards = extract(Marketplace::KlikIndomaret, html, &registry).unwrap();
        let ids: Vec<Option<&str>> = cards
            .iter()
            .map(|c| c.product_master_id.as_deref())
            .collect();
        assert_eq!(ids, vec![Some("teh 250ml"), Some("kopi-susu-gula-aren-ñ")]);
    }

    #[test]
    fn document_without_cards_is_empty() {
        let registry = load_builtin_registry().unwrap();
        let cards = extract(Marketplace::Tokopedia, "<p>captcha</p>", &registry).unwrap();
        assert!(cards.is_empty());
    }

    #[test]
    fn empty_registry_is_an_error() {
        let err = extract(Marketplace::Blibli, "", &LocatorRegistry::new()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingMarketplace(Marketplace::Blibli)));
    }
}
