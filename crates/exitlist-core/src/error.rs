//! Pipeline error types.

use thiserror::Error;

use exitlist_ingest::{ErrorKind, IngestError};
use exitlist_store::StoreError;

/// Fatal errors that abort a sync invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The structured export could not be normalized.
    #[error("structured source: {0}")]
    Structured(#[source] IngestError),

    /// The scraped page could not be normalized.
    #[error("scraped source: {0}")]
    Scraped(#[source] IngestError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Structured(err) | Self::Scraped(err) => err.kind(),
        }
    }
}

/// Errors surfaced by the read-side query handler.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Unsupported route: \"{0}\"")]
    UnsupportedRoute(String),

    #[error("missing path parameter 'slug'")]
    MissingSlug,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
