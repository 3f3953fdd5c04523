//! Invocation boundaries.
//!
//! Both handlers turn every failure into a structured response instead of
//! returning an error to the caller.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use exitlist_ingest::ScrapeOptions;
use exitlist_store::{TableStore, decode_item};

use crate::error::QueryError;
use crate::pipeline::{SourceDocuments, SyncSummary, run_sync};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_FAILED: u16 = 500;

/// Status/message pair returned by a sync invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    pub status_code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<SyncSummary>,
}

impl InvocationResult {
    pub fn success(summary: SyncSummary) -> Self {
        let persist = &summary.persist;
        let message = if persist.is_complete() {
            format!(
                "wrote {} of {} merged records to {}",
                persist.written, summary.merged_records, summary.table
            )
        } else {
            format!(
                "wrote {} of {} merged records to {}; {} batch(es) failed",
                persist.written,
                summary.merged_records,
                summary.table,
                persist.failed_batches.len()
            )
        };
        Self {
            status_code: STATUS_OK,
            message,
            report: Some(summary),
        }
    }

    pub fn failure(error: &dyn fmt::Display) -> Self {
        Self {
            status_code: STATUS_FAILED,
            message: error.to_string(),
            report: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    /// True when the run succeeded and every batch was written.
    pub fn is_complete(&self) -> bool {
        self.is_success()
            && self
                .report
                .as_ref()
                .is_none_or(|summary| summary.persist.is_complete())
    }
}

/// Runs the sync pipeline and reports the outcome.
pub fn handle_sync(
    documents: &SourceDocuments<'_>,
    options: &ScrapeOptions,
    store: &mut dyn TableStore,
) -> InvocationResult {
    match run_sync(documents, options, store) {
        Ok(outcome) => InvocationResult::success(outcome.summary),
        Err(err) => {
            error!(error = %err, kind = ?err.kind(), "sync failed");
            InvocationResult::failure(&err)
        }
    }
}

// ============================================================================
// Read-side routes
// ============================================================================

pub const ROUTE_GET_COMPANY: &str = "GET /companies/{slug}";
pub const ROUTE_LIST_COMPANIES: &str = "GET /companies";

/// A routed read request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub route_key: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl QueryRequest {
    pub fn get_company(slug: impl Into<String>) -> Self {
        Self {
            route_key: ROUTE_GET_COMPANY.to_string(),
            slug: Some(slug.into()),
        }
    }

    pub fn list_companies() -> Self {
        Self {
            route_key: ROUTE_LIST_COMPANIES.to_string(),
            slug: None,
        }
    }
}

/// HTTP-style response with a JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    fn json(status_code: u16, body: &serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }
}

/// Serves a single company or the whole table.
pub fn handle_query(request: &QueryRequest, store: &dyn TableStore) -> ApiResponse {
    match query(request, store) {
        Ok(body) => ApiResponse::json(STATUS_OK, &body),
        Err(err) => {
            warn!(route = %request.route_key, error = %err, "query failed");
            ApiResponse::json(STATUS_BAD_REQUEST, &json!(err.to_string()))
        }
    }
}

fn query(
    request: &QueryRequest,
    store: &dyn TableStore,
) -> std::result::Result<serde_json::Value, QueryError> {
    match request.route_key.as_str() {
        ROUTE_GET_COMPANY => {
            let slug = request.slug.as_deref().ok_or(QueryError::MissingSlug)?;
            Ok(match store.get(slug)? {
                Some(item) => json!({ "Item": decode_item(&item) }),
                None => json!({}),
            })
        }
        ROUTE_LIST_COMPANIES => {
            let items: Vec<_> = store.scan()?.iter().map(decode_item).collect();
            Ok(json!({
                "Items": items,
                "Count": items.len(),
                "ScannedCount": items.len(),
            }))
        }
        other => Err(QueryError::UnsupportedRoute(other.to_string())),
    }
}
