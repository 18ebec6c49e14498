// ABOUTME: Closed enumeration of supported marketplaces and their fixed identities.
// ABOUTME: Maps each marketplace to its platform label and snapshot directory name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A marketplace whose listing pages can be extracted.
///
/// Adding a marketplace means adding a variant here and an entry to the
/// locator table; extraction dispatches on this enum only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    Tokopedia,
    Blibli,
    KlikIndomaret,
}

impl Marketplace {
    /// All marketplaces in processing order.
    pub const ALL: [Marketplace; 3] = [
        Marketplace::Tokopedia,
        Marketplace::Blibli,
        Marketplace::KlikIndomaret,
    ];

    /// Platform label written into every record from this marketplace.
    pub fn platform(self) -> &'static str {
        match self {
            Marketplace::Tokopedia => "www.tokopedia.com",
            Marketplace::Blibli => "www.blibli.com",
            Marketplace::KlikIndomaret => "www.klikindomaret.com",
        }
    }

    /// Directory under the input root holding this marketplace's snapshots.
    pub fn dir_name(self) -> &'static str {
        match self {
            Marketplace::Tokopedia => "tokopedia",
            Marketplace::Blibli => "blibli",
            Marketplace::KlikIndomaret => "klikindomaret",
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Marketplace {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let lowered = lowered.trim_start_matches("www.").trim_end_matches(".com");
        Marketplace::ALL
            .into_iter()
            .find(|m| m.dir_name() == lowered)
            .ok_or_else(|| CatalogError::UnknownMarketplace(s.to_string()))
    }
}
