//! In-memory table, used for dry runs and tests.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::item::{Item, item_key};
use crate::table::{TableStore, validate_batch};

#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    name: String,
    items: BTreeMap<String, Item>,
    batches_written: usize,
}

impl MemoryTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of batches accepted so far.
    pub fn batches_written(&self) -> usize {
        self.batches_written
    }
}

impl TableStore for MemoryTable {
    fn table_name(&self) -> &str {
        &self.name
    }

    fn write_batch(&mut self, items: &[Item]) -> Result<()> {
        validate_batch(items)?;
        for item in items {
            if let Some(key) = item_key(item) {
                self.items.insert(key.to_string(), item.clone());
            }
        }
        self.batches_written += 1;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Item>> {
        Ok(self.items.get(key).cloned())
    }

    fn scan(&self) -> Result<Vec<Item>> {
        Ok(self.items.values().cloned().collect())
    }
}
