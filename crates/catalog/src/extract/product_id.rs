// ABOUTME: Product identifier extraction strategies (image anchor, link slug, delimited attribute).
// ABOUTME: Missing anchors yield None with a warning; they never abort the card.

use scraper::ElementRef;
use tracing::warn;
use url::Url;

use crate::extract::select::first_element;
use crate::locators::table::IdLocator;
use crate::marketplace::Marketplace;

/// Reads the product master id from a card according to the locator strategy.
pub fn extract_product_id(
    card: ElementRef<'_>,
    locator: &IdLocator,
    marketplace: Marketplace,
) -> Option<String> {
    match locator {
        IdLocator::ImageAnchor { image } => {
            let Some(img) = first_element(card, image) else {
                warn!(%marketplace, selector = %image, "image anchor missing");
                return None;
            };
            let href = img
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "a")
                .and_then(|a| a.value().attr("href"));
            match href {
                Some(href) => slug_from_href(href, marketplace),
                None => {
                    warn!(%marketplace, "no parent anchor with href");
                    None
                }
            }
        }
        IdLocator::LinkSlug { anchor } => {
            let Some(link) = first_element(card, anchor) else {
                warn!(%marketplace, selector = %anchor, "product link missing");
                return None;
            };
            match link.value().attr("href") {
                Some(href) => slug_from_href(href, marketplace),
                None => {
                    warn!(%marketplace, "product link has no href");
                    None
                }
            }
        }
        IdLocator::DelimitedAttr {
            anchor,
            attr,
            delimiter,
            index,
        } => {
            let value = first_element(card, anchor)?.value().attr(attr)?;
            delimited_part(value, delimiter, *index)
        }
        IdLocator::None => None,
    }
}

/// Returns the trailing non-empty path segment of `href`, as written in the page.
///
/// The href must resolve against the marketplace host. Query strings,
/// fragments, and the scheme and authority of absolute links are ignored.
/// The segment is not percent-encoded or decoded.
pub fn slug_from_href(href: &str, marketplace: Marketplace) -> Option<String> {
    let href = href.trim();
    let base = Url::parse(&format!("https://{}/", marketplace.platform())).ok()?;
    base.join(href).ok()?;

    let end = href.find(|c| c == '?' || c == '#').unwrap_or(href.len());
    href_path(&href[..end])
        .split('/')
        .rev()
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

fn href_path(href: &str) -> &str {
    let after_scheme = match href.find("://") {
        Some(i) => &href[i + 3..],
        None => match href.strip_prefix("//") {
            Some(rest) => rest,
            None => return href,
        },
    };
    after_scheme.find('/').map_or("", |i| &after_scheme[i..])
}

/// Splits `value` on `delimiter` and returns part `index` if it is non-empty.
pub fn delimited_part(value: &str, delimiter: &str, index: usize) -> Option<String> {
    if delimiter.is_empty() {
        return None;
    }
    value
        .split(delimiter)
        .nth(index)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn with_card<F: FnOnce(ElementRef<'_>)>(html: &str, f: F) {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse("div.card").unwrap();
        let card = doc.select(&sel).next().unwrap();
        f(card);
    }

    fn image_anchor() -> IdLocator {
        IdLocator::ImageAnchor {
            image: r#"img[alt="product-image"]"#.to_string(),
        }
    }

    #[test]
    fn slug_from_absolute_and_relative_hrefs() {
        assert_eq!(
            slug_from_href(
                "https://www.tokopedia.com/indomilk/susu-uht-1000ml?extParam=x#top",
                Marketplace::Tokopedia
            ),
            Some("susu-uht-1000ml".to_string())
        );
        assert_eq!(
            slug_from_href("/xpress/indomie-goreng-85g/", Marketplace::KlikIndomaret),
            Some("indomie-goreng-85g".to_string())
        );
        assert_eq!(slug_from_href("/", Marketplace::KlikIndomaret), None);
        assert_eq!(slug_from_href("https://www.tokopedia.com", Marketplace::Tokopedia), None);
        assert_eq!(
            slug_from_href("//www.tokopedia.com/shop/gula-aren-1kg", Marketplace::Tokopedia),
            Some("gula-aren-1kg".to_string())
        );
    }

    #[test]
    fn slug_keeps_raw_characters() {
        assert_eq!(
            slug_from_href("/xpress/kopi-susu-gula-aren-ñ", Marketplace::KlikIndomaret),
            Some("kopi-susu-gula-aren-ñ".to_string())
        );
        assert_eq!(
            slug_from_href(
                "https://www.klikindomaret.com/xpress/teh 250ml?src=grid",
                Marketplace::KlikIndomaret
            ),
            Some("teh 250ml".to_string())
        );
        // Escapes already present in the page are left alone.
        assert_eq!(
            slug_from_href("/xpress/teh%20botol", Marketplace::KlikIndomaret),
            Some("teh%20botol".to_string())
        );
    }

    #[test]
    fn delimited_part_variants() {
        assert_eq!(
            delimited_part("product-card__ABC-60012-00001", "__", 1),
            Some("ABC-60012-00001".to_string())
        );
        assert_eq!(delimited_part("product-card", "__", 1), None);
        assert_eq!(delimited_part("product-card__", "__", 1), None);
        assert_eq!(delimited_part("a__b", "", 1), None);
    }

    #[test]
    fn image_anchor_uses_nearest_parent_link() {
        let html = r#"<div class="card">
            <a href="https://www.tokopedia.com/shop/kopi-kapal-api-165g">
                <div><img alt="product-image" src="x.jpg"></div>
            </a>
        </div>"#;
        with_card(html, |card| {
            assert_eq!(
                extract_product_id(card, &image_anchor(), Marketplace::Tokopedia),
                Some("kopi-kapal-api-165g".to_string())
            );
        });
    }

    #[test]
    fn image_anchor_missing_image_or_href_is_none() {
        with_card(r#"<div class="card"><a href="/p/x"><img alt="logo"></a></div>"#, |card| {
            assert_eq!(
                extract_product_id(card, &image_anchor(), Marketplace::Tokopedia),
                None
            );
        });
        with_card(r#"<div class="card"><a><img alt="product-image"></a></div>"#, |card| {
            assert_eq!(
                extract_product_id(card, &image_anchor(), Marketplace::Tokopedia),
                None
            );
        });
    }

    #[test]
    fn link_slug_missing_anchor_is_none() {
        let loc = IdLocator::LinkSlug {
            anchor: r#"a[href*="/xpress/"]"#.to_string(),
        };
        with_card(r#"<div class="card"><a href="/promo/x">promo</a></div>"#, |card| {
            assert_eq!(extract_product_id(card, &loc, Marketplace::KlikIndomaret), None);
        });
        with_card(
            r#"<div class="card"><a href="/xpress/beras-5kg">beli</a></div>"#,
            |card| {
                assert_eq!(
                    extract_product_id(card, &loc, Marketplace::KlikIndomaret),
                    Some("beras-5kg".to_string())
                );
            },
        );
    }

    #[test]
    fn delimited_attr_reads_anchor_id() {
        let loc = IdLocator::DelimitedAttr {
            anchor: r#"a[id^="product-card__"]"#.to_string(),
            attr: "id".to_string(),
            delimiter: "__".to_string(),
            index: 1,
        };
        with_card(
            r#"<div class="card"><a id="product-card__MTA-123" href="/p/mta-123"></a></div>"#,
            |card| {
                assert_eq!(
                    extract_product_id(card, &loc, Marketplace::Blibli),
                    Some("MTA-123".to_string())
                );
            },
        );
        with_card(r#"<div class="card"><a id="other"></a></div>"#, |card| {
            assert_eq!(extract_product_id(card, &loc, Marketplace::Blibli), None);
        });
    }

    #[test]
    fn none_strategy_is_none() {
        with_card(r#"<div class="card"></div>"#, |card| {
            assert_eq!(extract_product_id(card, &IdLocator::None, Marketplace::Blibli), None);
        });
    }
}
