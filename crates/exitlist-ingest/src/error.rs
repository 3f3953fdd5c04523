//! Error types for source normalization.

use thiserror::Error;

/// Errors that can occur while normalizing a source.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Lookup Failures ===
    /// A single-select cell references a choice id missing from every column.
    #[error("unknown choice '{value}' in column '{column}' (row {row})")]
    UnknownChoice {
        column: String,
        value: String,
        row: usize,
    },

    /// A row references a column id missing from the column list.
    #[error("unknown column id '{column_id}' (row {row})")]
    UnknownColumn { column_id: String, row: usize },

    /// A field needed to derive the join key is absent.
    #[error("missing field '{field}' (row {row})")]
    MissingField { field: String, row: usize },

    // === Malformed Input ===
    /// The structured export is not valid JSON or has the wrong shape.
    #[error("malformed structured export: {source}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
    },

    /// The scraped document could not be read as markup.
    #[error("malformed HTML document: {reason}")]
    MalformedHtml { reason: String },

    /// The configured section selector does not parse.
    #[error("invalid section selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Broad classification of an [`IngestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A reference or expected field is absent from its mapping.
    LookupFailure,
    /// The input is not valid structured or markup data.
    MalformedInput,
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownChoice { .. } | Self::UnknownColumn { .. } | Self::MissingField { .. } => {
                ErrorKind::LookupFailure
            }
            Self::MalformedJson { .. } | Self::MalformedHtml { .. } | Self::InvalidSelector { .. } => {
                ErrorKind::MalformedInput
            }
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(source: serde_json::Error) -> Self {
        Self::MalformedJson { source }
    }
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, IngestError>;
