// ABOUTME: Aggregation context for records across all documents, and the final Catalog.
// ABOUTME: CatalogBuilder::finish is the single id-assignment pass; Catalog handles JSON output.

//! Catalog aggregation and output.
//!
//! Records from every marketplace and document are pushed into one
//! [`CatalogBuilder`]. Calling [`CatalogBuilder::finish`] consumes the
//! builder, numbers the records `1..=N` in their current order, and yields an
//! immutable [`Catalog`]. Because `finish` takes the builder by value, ids
//! can only be assigned once and only after all records have been collected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::record::ProductRecord;

/// Collects records before ids are assigned.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    records: Vec<ProductRecord>,
}

impl CatalogBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record.
    pub fn push(&mut self, record: ProductRecord) {
        self.records.push(record);
    }

    /// Appends records in iteration order.
    pub fn extend<I: IntoIterator<Item = ProductRecord>>(&mut self, records: I) {
        self.records.extend(records);
    }

    /// Number of records collected so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Assigns ids and freezes the collection.
    pub fn finish(mut self) -> Catalog {
        assign_ids(&mut self.records);
        Catalog {
            products: self.records,
        }
    }
}

/// Sets `id = position + 1` on every record. No other field is touched.
pub fn assign_ids(records: &mut [ProductRecord]) {
    for (i, record) in records.iter_mut().enumerate() {
        record.id = Some(i as u64 + 1);
    }
}

/// The finished product collection, serialized as `{"products": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<ProductRecord>,
}

impl Catalog {
    /// Records in output order.
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Serializes the catalog, pretty-printed with two-space indent unless `compact`.
    pub fn to_json_string(&self, compact: bool) -> Result<String, CatalogError> {
        let json = if compact {
            serde_json::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        Ok(json)
    }

    /// Writes the catalog to `path`, creating parent directories as needed.
    pub fn write_json(&self, path: &Path, compact: bool) -> Result<(), CatalogError> {
        let json = self.to_json_string(compact)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CatalogError::write(parent, e))?;
        }
        fs::write(path, json).map_err(|e| CatalogError::write(path, e))
    }
}
