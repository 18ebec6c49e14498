// ABOUTME: Canonical ProductRecord shape shared by every marketplace.
// ABOUTME: Serializes with the flat lowercase keys of the products.json output.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One normalized product listing.
///
/// Every field except `id` is fixed at assembly; `id` is assigned once by
/// [`crate::catalog::CatalogBuilder::finish`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub price: Option<u64>,
    #[serde(rename = "originalprice")]
    pub original_price: Option<u64>,
    #[serde(rename = "discountpercentage")]
    pub discount_percentage: f64,
    pub rating: f64,
    /// Quantity/unit tokens found in the name, space separated.
    pub detail: String,
    pub platform: String,
    #[serde(rename = "productmasterid")]
    pub product_master_id: Option<String>,
    #[serde(rename = "createdat", with = "created_at_format")]
    pub created_at: NaiveDateTime,
}

/// `YYYY-MM-DDTHH:MM:SS`, no zone and no fractional seconds.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

mod created_at_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::CREATED_AT_FORMAT;

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&dt.format(CREATED_AT_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, CREATED_AT_FORMAT).map_err(serde::de::Error::custom)
    }
}
