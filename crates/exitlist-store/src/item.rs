//! Tagged-type wire format for table items.
//!
//! Every attribute is written as a single-key object naming its type, so
//! `{"slug": "acme"}` becomes `{"slug": {"S": "acme"}}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use exitlist_model::{Record, SLUG_FIELD};

/// Partition key attribute of the table.
pub const KEY_ATTRIBUTE: &str = SLUG_FIELD;

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// String attribute.
    S(String),
}

impl AttributeValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::S(value) => value,
        }
    }
}

/// One stored item, keyed by attribute name.
pub type Item = BTreeMap<String, AttributeValue>;

pub fn encode_record(record: &Record) -> Item {
    record
        .iter()
        .map(|(key, value)| (key.clone(), AttributeValue::S(value.clone())))
        .collect()
}

pub fn decode_item(item: &Item) -> Record {
    item.iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect()
}

/// Returns the item's key, treating an empty value as absent.
pub fn item_key(item: &Item) -> Option<&str> {
    item.get(KEY_ATTRIBUTE)
        .map(AttributeValue::as_str)
        .filter(|key| !key.is_empty())
}
