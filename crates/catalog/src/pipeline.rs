// ABOUTME: End-to-end pipeline from source documents to a finished Catalog.
// ABOUTME: Extracts and assembles documents in parallel, then funnels them into one CatalogBuilder.

//! Pipeline orchestration.
//!
//! Documents are independent, so extraction and assembly run on the rayon
//! pool. Results are collected in input order and appended to a single
//! [`CatalogBuilder`]; ids are assigned only after every document is done.
//! A document that fails is logged and counted, and its siblings continue.

use std::collections::BTreeMap;
use std::path::Path;

use rayon::prelude::*;
use tracing::{info, info_span, warn};

use crate::assemble::assemble;
use crate::catalog::{Catalog, CatalogBuilder};
use crate::error::{CatalogError, DocumentFailure};
use crate::extract::extract;
use crate::locators::{load_builtin_registry, LocatorRegistry};
use crate::marketplace::Marketplace;
use crate::record::ProductRecord;
use crate::supply::{self, SourceDocument};

/// Counters collected during a run, for diagnostics and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineStats {
    /// Documents handed to the pipeline, including unreadable ones.
    pub documents_seen: usize,
    /// Documents that could not be read or extracted.
    pub documents_failed: usize,
    /// Records produced across all documents.
    pub cards_extracted: usize,
    /// Records produced per marketplace.
    pub per_marketplace: BTreeMap<Marketplace, usize>,
}

/// Result of a pipeline run.
#[derive(Debug)]
pub struct PipelineOutput {
    pub catalog: Catalog,
    pub stats: PipelineStats,
    /// Per-document failures: unreadable files first, then extraction failures.
    pub failures: Vec<DocumentFailure>,
}

/// Runs extraction and assembly with one locator registry.
#[derive(Debug, Clone)]
pub struct Pipeline {
    registry: LocatorRegistry,
}

impl Pipeline {
    /// Creates a pipeline over the given registry.
    pub fn new(registry: LocatorRegistry) -> Self {
        Self { registry }
    }

    /// Creates a pipeline over the builtin locator tables.
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::new(load_builtin_registry()?))
    }

    /// The registry this pipeline extracts with.
    pub fn registry(&self) -> &LocatorRegistry {
        &self.registry
    }

    /// Extracts and assembles every card of one document.
    pub fn process_document(&self, doc: &SourceDocument) -> Result<Vec<ProductRecord>, CatalogError> {
        let span = info_span!(
            "document",
            marketplace = %doc.marketplace,
            path = %doc.path.display()
        );
        let _guard = span.enter();

        let cards = extract(doc.marketplace, &doc.html, &self.registry)?;
        Ok(cards
            .into_iter()
            .map(|card| assemble(card, doc.marketplace))
            .collect())
    }

    /// Processes documents in parallel and appends their records to `builder` in input order.
    pub fn collect_into(
        &self,
        builder: &mut CatalogBuilder,
        docs: &[SourceDocument],
    ) -> (PipelineStats, Vec<DocumentFailure>) {
        let results: Vec<_> = docs
            .par_iter()
            .map(|doc| self.process_document(doc))
            .collect();

        let mut stats = PipelineStats {
            documents_seen: docs.len(),
            ..Default::default()
        };
        let mut failures = Vec::new();

        for (doc, result) in docs.iter().zip(results) {
            match result {
                Ok(records) => {
                    stats.cards_extracted += records.len();
                    *stats.per_marketplace.entry(doc.marketplace).or_default() += records.len();
                    builder.extend(records);
                }
                Err(e) => {
                    warn!(path = %doc.path.display(), error = %e, "document extraction failed");
                    stats.documents_failed += 1;
                    failures.push(DocumentFailure {
                        path: doc.path.clone(),
                        error: e,
                    });
                }
            }
        }

        (stats, failures)
    }

    /// Processes in-memory documents into a finished catalog.
    pub fn run(&self, docs: &[SourceDocument]) -> PipelineOutput {
        let mut builder = CatalogBuilder::new();
        let (stats, failures) = self.collect_into(&mut builder, docs);
        let catalog = builder.finish();
        info!(
            documents = stats.documents_seen,
            failed = stats.documents_failed,
            products = catalog.len(),
            "pipeline finished"
        );
        PipelineOutput {
            catalog,
            stats,
            failures,
        }
    }

    /// Discovers, loads, and processes `<root>/<marketplace>/*.html`.
    ///
    /// Unreadable files count as failed documents; only a failure to list a
    /// directory aborts the run.
    pub fn run_directory(
        &self,
        root: &Path,
        marketplaces: &[Marketplace],
    ) -> Result<PipelineOutput, CatalogError> {
        let refs = supply::discover(root, marketplaces)?;
        let (docs, load_failures) = supply::load_all(&refs);

        let mut output = self.run(&docs);
        output.stats.documents_seen += load_failures.len();
        output.stats.documents_failed += load_failures.len();

        let mut failures = load_failures;
        failures.append(&mut output.failures);
        output.failures = failures;
        Ok(output)
    }
}
