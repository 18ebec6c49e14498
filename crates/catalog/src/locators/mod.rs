// ABOUTME: Structural locator configuration for marketplace listing pages.
// ABOUTME: Groups the locator schema, the embedded/override loader, and the selector cache.

//! Locator configuration module.
//!
//! Submodules:
//! - `table`: per-marketplace locator tables and the registry.
//! - `loader`: builtin and file-based registry loading with validation.
//! - `compiled`: process-wide compiled selector cache.

pub mod compiled;
pub mod loader;
pub mod table;

pub use loader::{load_builtin_registry, load_registry_from_path, registry_from_json};
pub use table::{FieldLocator, IdLocator, LocatorRegistry, MarketplaceLocators, SelectorSpec};
