//! Sync pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Normalize**: Flatten the structured export and the scraped page
//! 2. **Merge**: Join structured fields onto scraped records by slug
//! 3. **Persist**: Write records with a slug to the table in batches
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use exitlist_ingest::{
    ScrapeOptions, normalize_scraped_bytes, normalize_structured, parse_structured,
};
use exitlist_model::{Record, SourceKind};
use exitlist_store::{PersistReport, TableStore, persist};

use crate::error::{PipelineError, Result};
use crate::merge::merge;

/// Raw bytes of both sources, as fetched or read from disk.
#[derive(Debug, Clone, Copy)]
pub struct SourceDocuments<'a> {
    /// Structured export JSON.
    pub structured: &'a [u8],
    /// Scraped page HTML.
    pub scraped: &'a [u8],
}

// ============================================================================
// Stage 1: Normalize
// ============================================================================

/// Records produced by the two normalizers.
#[derive(Debug, Clone, Default)]
pub struct NormalizedSources {
    pub structured: Vec<Record>,
    pub scraped: Vec<Record>,
}

/// Normalizes both sources; either failing aborts the whole run.
pub fn normalize_sources(
    documents: &SourceDocuments<'_>,
    options: &ScrapeOptions,
) -> Result<NormalizedSources> {
    let start = Instant::now();
    let structured = info_span!("normalize", source = %SourceKind::Structured).in_scope(|| {
        parse_structured(documents.structured)
            .and_then(|table| normalize_structured(&table))
            .map_err(PipelineError::Structured)
    })?;
    let scraped = info_span!("normalize", source = %SourceKind::Scraped).in_scope(|| {
        normalize_scraped_bytes(documents.scraped, options).map_err(PipelineError::Scraped)
    })?;
    info!(
        structured = structured.len(),
        scraped = scraped.len(),
        duration_ms = start.elapsed().as_millis(),
        "normalize complete"
    );
    Ok(NormalizedSources {
        structured,
        scraped,
    })
}

// ============================================================================
// Stage 2: Merge
// ============================================================================

/// Merged records plus how many of them found a structured match.
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub records: Vec<Record>,
    pub matched: usize,
}

pub fn reconcile(sources: &NormalizedSources) -> Reconciled {
    let records = merge(&sources.structured, &sources.scraped);
    let prefix = SourceKind::Structured.prefix();
    let matched = records
        .iter()
        .filter(|record| record.keys().any(|key| key.starts_with(prefix)))
        .count();
    info!(
        merged = records.len(),
        matched,
        unmatched = records.len() - matched,
        "merge complete"
    );
    Reconciled { records, matched }
}

// ============================================================================
// Stage 3: Persist
// ============================================================================

/// Counts reported back from a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub table: String,
    pub structured_records: usize,
    pub scraped_records: usize,
    pub merged_records: usize,
    pub matched_records: usize,
    pub persist: PersistReport,
}

/// Result of a complete sync run.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub summary: SyncSummary,
    pub records: Vec<Record>,
}

/// Runs every stage against `store`.
///
/// # Errors
///
/// Returns the first normalization failure. Batch write failures are not
/// errors; they are listed in the summary's persist report.
pub fn run_sync(
    documents: &SourceDocuments<'_>,
    options: &ScrapeOptions,
    store: &mut dyn TableStore,
) -> Result<SyncOutcome> {
    let span = info_span!("sync", table = %store.table_name());
    let _guard = span.enter();

    let sources = normalize_sources(documents, options)?;
    let Reconciled { records, matched } = reconcile(&sources);
    let report = persist(&records, store);

    Ok(SyncOutcome {
        summary: SyncSummary {
            table: store.table_name().to_string(),
            structured_records: sources.structured.len(),
            scraped_records: sources.scraped.len(),
            merged_records: records.len(),
            matched_records: matched,
            persist: report,
        },
        records,
    })
}
