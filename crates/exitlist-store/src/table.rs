//! The table capability the persistence adapter writes through.

use std::collections::BTreeSet;

use crate::error::{Result, StoreError};
use crate::item::{Item, KEY_ATTRIBUTE, item_key};

/// Maximum number of items accepted by a single batch write.
pub const MAX_BATCH_ITEMS: usize = 25;

/// A named key-value table addressed by the `slug` attribute.
pub trait TableStore {
    fn table_name(&self) -> &str;

    /// Upserts every item of the batch.
    ///
    /// # Errors
    ///
    /// Rejects the whole batch when it is larger than [`MAX_BATCH_ITEMS`],
    /// an item lacks its key, or a key repeats; storage failures are
    /// returned as-is.
    fn write_batch(&mut self, items: &[Item]) -> Result<()>;

    fn get(&self, key: &str) -> Result<Option<Item>>;

    /// Returns every item in key order.
    fn scan(&self) -> Result<Vec<Item>>;
}

/// Checks the constraints every batch write enforces.
pub fn validate_batch(items: &[Item]) -> Result<()> {
    if items.len() > MAX_BATCH_ITEMS {
        return Err(StoreError::BatchTooLarge {
            count: items.len(),
            max: MAX_BATCH_ITEMS,
        });
    }
    let mut seen = BTreeSet::new();
    for (index, item) in items.iter().enumerate() {
        let key = item_key(item).ok_or(StoreError::MissingKey {
            index,
            key: KEY_ATTRIBUTE,
        })?;
        if !seen.insert(key) {
            return Err(StoreError::DuplicateKey {
                key: key.to_string(),
            });
        }
    }
    Ok(())
}
