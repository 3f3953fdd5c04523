//! Integration tests for batched persistence.

use exitlist_model::Record;
use exitlist_store::{
    Item, MemoryTable, Result, StoreError, TableStore, decode_item, persist,
};

fn record(slug: &str) -> Record {
    [("slug", slug), ("orig_name", slug), ("orig_status", "withdrawal")]
        .into_iter()
        .collect()
}

/// Table that refuses one batch index and records every batch size.
struct FlakyTable {
    inner: MemoryTable,
    fail_on: usize,
    calls: usize,
    sizes: Vec<usize>,
}

impl TableStore for FlakyTable {
    fn table_name(&self) -> &str {
        self.inner.table_name()
    }

    fn write_batch(&mut self, items: &[Item]) -> Result<()> {
        let call = self.calls;
        self.calls += 1;
        self.sizes.push(items.len());
        if call == self.fail_on {
            return Err(StoreError::Io {
                operation: "write",
                path: "remote".into(),
                source: std::io::Error::other("throughput exceeded"),
            });
        }
        self.inner.write_batch(items)
    }

    fn get(&self, key: &str) -> Result<Option<Item>> {
        self.inner.get(key)
    }

    fn scan(&self) -> Result<Vec<Item>> {
        self.inner.scan()
    }
}

#[test]
fn splits_into_batches_of_25() {
    let records: Vec<Record> = (0..60).map(|i| record(&format!("company-{i}"))).collect();
    let mut table = FlakyTable {
        inner: MemoryTable::new("companies"),
        fail_on: usize::MAX,
        calls: 0,
        sizes: Vec::new(),
    };
    let report = persist(&records, &mut table);
    assert_eq!(table.sizes, vec![25, 25, 10]);
    assert_eq!(report.attempted, 60);
    assert_eq!(report.written, 60);
    assert!(report.is_complete());
    assert_eq!(table.inner.len(), 60);
}

#[test]
fn failed_batch_does_not_stop_the_rest() {
    let records: Vec<Record> = (0..60).map(|i| record(&format!("company-{i}"))).collect();
    let mut table = FlakyTable {
        inner: MemoryTable::new("companies"),
        fail_on: 1,
        calls: 0,
        sizes: Vec::new(),
    };
    let report = persist(&records, &mut table);
    assert_eq!(table.calls, 3);
    assert_eq!(report.written, 35);
    assert_eq!(report.failed_items(), 25);
    assert_eq!(report.failed_batches.len(), 1);
    assert_eq!(report.failed_batches[0].batch_index, 1);
    assert!(report.failed_batches[0].error.contains("write"));
    assert!(!report.is_complete());
}

#[test]
fn skips_records_without_slug() {
    let mut unslugged = record("");
    let no_key: Record = [("orig_name", "Газпром")].into_iter().collect();
    unslugged.insert("orig_name", "株式会社");
    let records = vec![record("acme"), unslugged, no_key];

    let mut table = MemoryTable::new("companies");
    let report = persist(&records, &mut table);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.written, 1);
    let stored = table.scan().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(decode_item(&stored[0]), record("acme"));
}

#[test]
fn duplicate_slugs_collapse_to_the_last_record() {
    let mut later = record("acme");
    later.insert("orig_status", "suspension");
    let records = vec![record("acme"), record("globex"), later.clone(), record("initech")];

    let mut table = MemoryTable::new("companies");
    let report = persist(&records, &mut table);
    assert!(report.is_complete());
    assert_eq!(report.attempted, 3);
    assert_eq!(report.written, 3);
    assert_eq!(report.duplicates, 1);

    let slugs: Vec<String> = table
        .scan()
        .unwrap()
        .iter()
        .map(|item| decode_item(item).slug().unwrap().to_string())
        .collect();
    assert_eq!(slugs, vec!["acme", "globex", "initech"]);
    let acme = table.get("acme").unwrap().unwrap();
    assert_eq!(decode_item(&acme), later);
}

#[test]
fn collapsed_batches_respect_the_limit() {
    let mut records: Vec<Record> = (0..25).map(|i| record(&format!("company-{i}"))).collect();
    records.extend((0..5).map(|i| record(&format!("company-{i}"))));
    let mut table = FlakyTable {
        inner: MemoryTable::new("companies"),
        fail_on: usize::MAX,
        calls: 0,
        sizes: Vec::new(),
    };
    let report = persist(&records, &mut table);
    assert_eq!(table.sizes, vec![25]);
    assert_eq!(report.duplicates, 5);
    assert_eq!(report.written, 25);
}
