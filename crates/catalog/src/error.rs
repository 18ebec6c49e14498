// ABOUTME: Error types for catalog extraction, locator loading, and document I/O.
// ABOUTME: Provides the CatalogError enum with convenience constructors and boolean helpers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::marketplace::Marketplace;

/// Errors that can surface from the catalog pipeline.
///
/// Field-level problems inside a card (missing elements, unparsable numbers)
/// never show up here; they degrade to null or default values instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A source document could not be read.
    #[error("failed to read document {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The locator table could not be read or deserialized.
    #[error("invalid locator table: {0}")]
    Locators(String),

    /// A selector in the locator table does not compile.
    #[error("invalid selector for {marketplace} {field}: {selector:?}")]
    InvalidSelector {
        marketplace: Marketplace,
        field: &'static str,
        selector: String,
    },

    /// The registry has no locators for a marketplace.
    #[error("no locators registered for {0}")]
    MissingMarketplace(Marketplace),

    /// A marketplace name did not match any known marketplace.
    #[error("unknown marketplace: {0:?}")]
    UnknownMarketplace(String),

    /// The catalog could not be serialized.
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The catalog could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A failure confined to one input document.
#[derive(Debug)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: CatalogError,
}

impl CatalogError {
    /// Creates a Document error for the given path.
    pub fn document(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CatalogError::Document {
            path: path.into(),
            source,
        }
    }

    /// Creates a Locators error with a custom message.
    pub fn locators(msg: impl Into<String>) -> Self {
        CatalogError::Locators(msg.into())
    }

    /// Creates a Write error for the given path.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CatalogError::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error is confined to one input document.
    pub fn is_document(&self) -> bool {
        matches!(self, CatalogError::Document { .. })
    }

    /// Returns true if this error comes from the locator configuration.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            CatalogError::Locators(_)
                | CatalogError::InvalidSelector { .. }
                | CatalogError::MissingMarketplace(_)
                | CatalogError::UnknownMarketplace(_)
        )
    }
}
