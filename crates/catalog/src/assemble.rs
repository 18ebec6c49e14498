// ABOUTME: Turns raw card extractions into canonical ProductRecords.
// ABOUTME: Attaches platform, unit detail, and creation time; derives the discount when not stated.

use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::extract::RawCard;
use crate::marketplace::Marketplace;
use crate::numbers::discount_percentage;
use crate::record::ProductRecord;
use crate::units::extract_units;

/// Assembles a record stamped with the current local time.
pub fn assemble(card: RawCard, marketplace: Marketplace) -> ProductRecord {
    assemble_at(card, marketplace.platform(), now())
}

/// Assembles a record with an explicit creation time.
///
/// The id stays unset. A badge discount from the card is kept as is;
/// otherwise the discount is derived from the two prices.
pub fn assemble_at(card: RawCard, platform: &str, created_at: NaiveDateTime) -> ProductRecord {
    let detail = card.name.as_deref().map(extract_units).unwrap_or_default();
    let discount = card
        .discount_percentage
        .unwrap_or_else(|| discount_percentage(card.price, card.original_price));

    ProductRecord {
        id: None,
        name: card.name,
        price: card.price,
        original_price: card.original_price,
        discount_percentage: discount,
        rating: card.rating,
        detail,
        platform: platform.to_string(),
        product_master_id: card.product_master_id,
        created_at,
    }
}

/// Current local wall-clock time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}
