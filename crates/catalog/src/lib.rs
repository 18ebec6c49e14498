// ABOUTME: Library entry point for the marketplace catalog extractor.
// ABOUTME: Re-exports the pipeline, the record and catalog types, and the locator registry API.

//! Shelf catalog - turns saved marketplace listing pages into one product catalog.
//!
//! Each supported marketplace has a table of CSS locators describing where a
//! product card and its fields live in the page. Cards are extracted,
//! normalized into [`ProductRecord`]s, and collected into a [`Catalog`] whose
//! ids run `1..=N`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use shelf_catalog::{CatalogError, Marketplace, Pipeline};
//!
//! fn main() -> Result<(), CatalogError> {
//!     let pipeline = Pipeline::builtin()?;
//!     let output = pipeline.run_directory(Path::new("pages"), &Marketplace::ALL)?;
//!     output.catalog.write_json(Path::new("products.json"), false)?;
//!     Ok(())
//! }
//! ```

pub mod assemble;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod locators;
pub mod marketplace;
pub mod numbers;
pub mod pipeline;
pub mod record;
pub mod supply;
pub mod units;

pub use crate::assemble::{assemble, assemble_at};
pub use crate::catalog::{assign_ids, Catalog, CatalogBuilder};
pub use crate::error::{CatalogError, DocumentFailure};
pub use crate::extract::{extract, RawCard};
pub use crate::locators::{
    load_builtin_registry, load_registry_from_path, registry_from_json, LocatorRegistry,
    MarketplaceLocators,
};
pub use crate::marketplace::Marketplace;
pub use crate::numbers::NumberFormat;
pub use crate::pipeline::{Pipeline, PipelineOutput, PipelineStats};
pub use crate::record::ProductRecord;
pub use crate::supply::{discover, load, load_all, DocumentRef, SourceDocument};
pub use crate::units::{extract_units, normalize_name};
