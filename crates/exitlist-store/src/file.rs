//! Table kept as a single JSON document on disk.
//!
//! Each accepted batch is upserted in memory and the whole document is
//! rewritten atomically (temp file + rename), so a failed batch leaves the
//! previous contents in place.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::item::{Item, item_key};
use crate::table::{TableStore, validate_batch};

/// On-disk document layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDocument {
    pub table: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: BTreeMap<String, Item>,
}

#[derive(Debug)]
pub struct JsonFileTable {
    path: PathBuf,
    document: TableDocument,
}

impl JsonFileTable {
    /// Opens the table file, starting empty when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or holds another table.
    pub fn open(path: impl Into<PathBuf>, table: &str, region: &str) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let bytes = fs::read(&path).map_err(|e| StoreError::Io {
                operation: "read",
                path: path.clone(),
                source: e,
            })?;
            let document: TableDocument =
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Deserialization {
                    path: path.clone(),
                    source: e,
                })?;
            if document.table != table {
                return Err(StoreError::TableMismatch {
                    expected: table.to_string(),
                    found: document.table,
                    path,
                });
            }
            document
        } else {
            TableDocument {
                table: table.to_string(),
                region: region.to_string(),
                updated_at: None,
                items: BTreeMap::new(),
            }
        };
        tracing::debug!(
            path = %path.display(),
            items = document.items.len(),
            "opened table file"
        );
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &TableDocument {
        &self.document
    }

    fn save(&self, document: &TableDocument) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Serialization { source: e })?;
        let temp_path = self.path.with_extension("json.tmp");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(&bytes).map_err(|e| StoreError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: self.path.clone(),
            source: e,
        })
    }
}

impl TableStore for JsonFileTable {
    fn table_name(&self) -> &str {
        &self.document.table
    }

    fn write_batch(&mut self, items: &[Item]) -> Result<()> {
        validate_batch(items)?;
        let mut next = self.document.clone();
        for item in items {
            if let Some(key) = item_key(item) {
                next.items.insert(key.to_string(), item.clone());
            }
        }
        next.updated_at = Some(Utc::now());
        self.save(&next)?;
        self.document = next;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Item>> {
        Ok(self.document.items.get(key).cloned())
    }

    fn scan(&self) -> Result<Vec<Item>> {
        Ok(self.document.items.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use exitlist_model::Record;
    use tempfile::tempdir;

    use super::*;
    use crate::item::encode_record;

    fn item(slug: &str, status: &str) -> Item {
        let record: Record = [("slug", slug), ("orig_status", status)]
            .into_iter()
            .collect();
        encode_record(&record)
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempdir().unwrap();
        let table = JsonFileTable::open(dir.path().join("t.json"), "companies", "us-east-1").unwrap();
        assert!(table.scan().unwrap().is_empty());
        assert!(!table.path().exists());
    }

    #[test]
    fn batches_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("companies.json");

        let mut table = JsonFileTable::open(&path, "companies", "us-east-1").unwrap();
        table
            .write_batch(&[item("acme", "withdrawal"), item("globex", "digging_in")])
            .unwrap();
        table.write_batch(&[item("acme", "suspension")]).unwrap();

        let reopened = JsonFileTable::open(&path, "companies", "us-east-1").unwrap();
        assert_eq!(reopened.scan().unwrap().len(), 2);
        assert_eq!(reopened.get("acme").unwrap(), Some(item("acme", "suspension")));
        assert!(reopened.document().updated_at.is_some());
        assert_eq!(reopened.document().region, "us-east-1");
    }

    #[test]
    fn rejected_batch_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("companies.json");
        let mut table = JsonFileTable::open(&path, "companies", "us-east-1").unwrap();
        table.write_batch(&[item("acme", "withdrawal")]).unwrap();
        let before = fs::read(&path).unwrap();

        assert!(
            table
                .write_batch(&[item("globex", "x"), item("globex", "y")])
                .is_err()
        );
        assert_eq!(fs::read(&path).unwrap(), before);
        assert!(table.get("globex").unwrap().is_none());
    }

    #[test]
    fn refuses_other_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("companies.json");
        let mut table = JsonFileTable::open(&path, "companies", "us-east-1").unwrap();
        table.write_batch(&[item("acme", "withdrawal")]).unwrap();

        let err = JsonFileTable::open(&path, "other", "us-east-1").unwrap_err();
        assert!(matches!(err, StoreError::TableMismatch { .. }));
    }

    #[test]
    fn rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("companies.json");
        fs::write(&path, b"not json").unwrap();
        let err = JsonFileTable::open(&path, "companies", "us-east-1").unwrap_err();
        assert!(matches!(err, StoreError::Deserialization { .. }));
    }
}
