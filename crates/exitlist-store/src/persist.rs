//! Batched persistence of merged records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, warn};

use exitlist_model::Record;

use crate::item::{Item, encode_record, item_key};
use crate::table::{MAX_BATCH_ITEMS, TableStore};

/// A batch the table refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub batch_index: usize,
    pub item_count: usize,
    pub error: String,
}

/// Outcome of a [`persist`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistReport {
    /// Records with a slug that were sent to the table.
    pub attempted: usize,
    /// Records in batches the table accepted.
    pub written: usize,
    /// Records dropped for having no slug.
    pub skipped: usize,
    /// Records replaced by a later record with the same slug.
    #[serde(default)]
    pub duplicates: usize,
    pub failed_batches: Vec<BatchFailure>,
}

impl PersistReport {
    pub fn is_complete(&self) -> bool {
        self.failed_batches.is_empty()
    }

    pub fn failed_items(&self) -> usize {
        self.failed_batches.iter().map(|f| f.item_count).sum()
    }
}

/// Writes every record that has a slug, in batches of [`MAX_BATCH_ITEMS`].
///
/// Records sharing a slug collapse into one item before batching: the last
/// one wins and keeps the position of the first. A rejected batch is logged
/// and recorded in the report; the remaining batches are still attempted.
pub fn persist(records: &[Record], store: &mut dyn TableStore) -> PersistReport {
    let span = info_span!("persist", table = %store.table_name());
    let _guard = span.enter();

    let keyed: Vec<Item> = records
        .iter()
        .filter(|record| record.slug().is_some())
        .map(encode_record)
        .collect();
    let keyed_count = keyed.len();
    let items = collapse_duplicates(keyed);
    let duplicates = keyed_count - items.len();
    if duplicates > 0 {
        warn!(duplicates, "collapsed records sharing a slug");
    }
    let mut report = PersistReport {
        attempted: items.len(),
        skipped: records.len() - keyed_count,
        duplicates,
        ..PersistReport::default()
    };

    for (batch_index, batch) in items.chunks(MAX_BATCH_ITEMS).enumerate() {
        match store.write_batch(batch) {
            Ok(()) => {
                report.written += batch.len();
                debug!(batch_index, items = batch.len(), "batch written");
            }
            Err(err) => {
                error!(batch_index, items = batch.len(), error = %err, "batch write failed");
                report.failed_batches.push(BatchFailure {
                    batch_index,
                    item_count: batch.len(),
                    error: err.to_string(),
                });
            }
        }
    }

    info!(
        attempted = report.attempted,
        written = report.written,
        skipped = report.skipped,
        duplicates = report.duplicates,
        failed_batches = report.failed_batches.len(),
        "persist complete"
    );
    report
}

/// Keeps one item per key, in first-seen order, holding the last value.
fn collapse_duplicates(items: Vec<Item>) -> Vec<Item> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut unique: Vec<Item> = Vec::with_capacity(items.len());
    for item in items {
        let Some(key) = item_key(&item).map(str::to_string) else {
            continue;
        };
        match positions.get(&key) {
            Some(&position) => unique[position] = item,
            None => {
                positions.insert(key, unique.len());
                unique.push(item);
            }
        }
    }
    unique
}
