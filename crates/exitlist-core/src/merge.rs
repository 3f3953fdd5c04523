//! Slug join of the two normalized record sets.

use std::collections::HashMap;

use exitlist_model::{Record, SLUG_FIELD};

/// Joins structured records onto scraped records by `slug`.
///
/// See [`merge_on`].
pub fn merge(structured: &[Record], scraped: &[Record]) -> Vec<Record> {
    merge_on(structured, scraped, SLUG_FIELD)
}

/// Right-anchored outer join on `key`.
///
/// Every scraped record appears exactly once and in order, overlaid with the
/// fields of the structured record sharing its key (structured values win on
/// collision). Structured records without a scraped counterpart are dropped.
/// Empty keys never match; among structured records with the same key the
/// last one wins.
pub fn merge_on(structured: &[Record], scraped: &[Record], key: &str) -> Vec<Record> {
    let mut index: HashMap<&str, &Record> = HashMap::with_capacity(structured.len());
    for record in structured {
        if let Some(value) = join_key(record, key) {
            index.insert(value, record);
        }
    }

    scraped
        .iter()
        .map(|record| {
            let mut merged = record.clone();
            if let Some(extra) = join_key(record, key).and_then(|value| index.get(value)) {
                merged.overlay(extra);
            }
            merged
        })
        .collect()
}

fn join_key<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, &str)]) -> Record {
        fields.iter().copied().collect()
    }

    #[test]
    fn joins_matching_slugs() {
        let structured = [record(&[("slug", "acme"), ("e_name", "Acme")])];
        let scraped = [record(&[
            ("slug", "acme"),
            ("orig_name", "Acme Corp"),
            ("orig_status", "withdrawal"),
        ])];
        let merged = merge(&structured, &scraped);
        assert_eq!(
            merged,
            vec![record(&[
                ("slug", "acme"),
                ("e_name", "Acme"),
                ("orig_name", "Acme Corp"),
                ("orig_status", "withdrawal"),
            ])]
        );
    }

    #[test]
    fn unmatched_structured_records_are_dropped() {
        let structured = [record(&[("slug", "globex"), ("e_name", "Globex")])];
        let scraped = [record(&[("slug", "acme"), ("orig_name", "Acme")])];
        let merged = merge(&structured, &scraped);
        assert_eq!(merged, scraped.to_vec());
    }

    #[test]
    fn last_structured_duplicate_wins() {
        let structured = [
            record(&[("slug", "acme"), ("e_grade", "A")]),
            record(&[("slug", "acme"), ("e_grade", "F")]),
        ];
        let scraped = [record(&[("slug", "acme")])];
        assert_eq!(merge(&structured, &scraped)[0].get("e_grade"), Some("F"));
    }

    #[test]
    fn structured_wins_on_collision() {
        let structured = [record(&[("id", "1"), ("shared", "structured")])];
        let scraped = [record(&[("id", "1"), ("shared", "scraped")])];
        let merged = merge_on(&structured, &scraped, "id");
        assert_eq!(merged[0].get("shared"), Some("structured"));
    }

    #[test]
    fn empty_slugs_never_join() {
        let structured = [record(&[("slug", ""), ("e_name", "???")])];
        let scraped = [
            record(&[("slug", ""), ("orig_name", "Газпром")]),
            record(&[("orig_name", "No slug")]),
        ];
        let merged = merge(&structured, &scraped);
        assert_eq!(merged, scraped.to_vec());
    }

    #[test]
    fn keeps_scraped_order_and_length() {
        let structured = [record(&[("slug", "b"), ("e_name", "B")])];
        let scraped = [
            record(&[("slug", "c")]),
            record(&[("slug", "b")]),
            record(&[("slug", "a")]),
            record(&[("slug", "b")]),
        ];
        let merged = merge(&structured, &scraped);
        let slugs: Vec<_> = merged.iter().map(|r| r.get("slug").unwrap()).collect();
        assert_eq!(slugs, vec!["c", "b", "a", "b"]);
        assert_eq!(merged[1].get("e_name"), Some("B"));
        assert_eq!(merged[3].get("e_name"), Some("B"));
    }
}
