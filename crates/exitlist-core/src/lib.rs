//! Reconciliation pipeline for the company exit list.
//!
//! Normalizes the structured export and the scraped page, joins them on
//! slug with the scraped list as the canonical set of companies, and writes
//! the result through a [`TableStore`](exitlist_store::TableStore).

pub mod error;
pub mod handler;
pub mod merge;
pub mod pipeline;

pub use error::{PipelineError, QueryError, Result};
pub use handler::{
    ApiResponse, InvocationResult, QueryRequest, ROUTE_GET_COMPANY, ROUTE_LIST_COMPANIES,
    STATUS_BAD_REQUEST, STATUS_FAILED, STATUS_OK, handle_query, handle_sync,
};
pub use merge::{merge, merge_on};
pub use pipeline::{
    NormalizedSources, Reconciled, SourceDocuments, SyncOutcome, SyncSummary, normalize_sources,
    reconcile, run_sync,
};
