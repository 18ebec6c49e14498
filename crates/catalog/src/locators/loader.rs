// ABOUTME: Loader for locator registries from embedded JSON data or a user-supplied file.
// ABOUTME: Validates that every selector compiles and every marketplace has a table.

//! Locator registry loader.
//!
//! The builtin table is compiled into the binary; a JSON file with the same
//! shape can replace it at runtime when a site changes its markup.

use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::locators::compiled::precompile_selectors;
use crate::locators::table::{LocatorRegistry, MarketplaceLocators};
use crate::marketplace::Marketplace;

/// Embedded JSON containing the builtin locator tables.
const BUILTIN_LOCATORS_JSON: &str = include_str!("../../data/marketplaces.json");

/// Loads the builtin locator registry.
pub fn load_builtin_registry() -> Result<LocatorRegistry, CatalogError> {
    registry_from_json(BUILTIN_LOCATORS_JSON)
}

/// Loads a locator registry from a JSON file on disk.
pub fn load_registry_from_path(path: &Path) -> Result<LocatorRegistry, CatalogError> {
    let json = fs::read_to_string(path)
        .map_err(|e| CatalogError::locators(format!("{}: {}", path.display(), e)))?;
    registry_from_json(&json)
}

/// Parses and validates a locator registry from a JSON array of tables.
///
/// Every marketplace must appear, and every selector must compile.
pub fn registry_from_json(json: &str) -> Result<LocatorRegistry, CatalogError> {
    let tables: Vec<MarketplaceLocators> =
        serde_json::from_str(json).map_err(|e| CatalogError::locators(e.to_string()))?;

    let mut registry = LocatorRegistry::new();
    for table in tables {
        validate(&table)?;
        registry.register(table);
    }

    if let Some(missing) = Marketplace::ALL
        .into_iter()
        .find(|m| registry.get(*m).is_none())
    {
        return Err(CatalogError::MissingMarketplace(missing));
    }

    Ok(registry)
}

fn validate(table: &MarketplaceLocators) -> Result<(), CatalogError> {
    for (field, css) in table.selectors() {
        if !precompile_selectors([css]).is_empty() {
            return Err(CatalogError::InvalidSelector {
                marketplace: table.marketplace,
                field,
                selector: css.to_string(),
            });
        }
    }
    Ok(())
}
