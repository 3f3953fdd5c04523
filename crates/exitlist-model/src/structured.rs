//! Raw shape of the structured (column/row JSON) export.
//!
//! The export stores each row as a map from internal column id to cell value.
//! Single-select cells hold an internal choice id instead of the display name,
//! and attachment cells hold a list of objects carrying a `url`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix marking a cell value as a single-select choice id.
pub const CHOICE_MARKER: &str = "sel";

/// Key wrapping the table in the export file.
pub const EXPORT_TABLE_KEY: &str = "table";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredTable {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl StructuredTable {
    /// Decodes an export document.
    ///
    /// The export file wraps the table as `{"table": {...}}`; bare tables are
    /// accepted as well. Shape errors name the offending field.
    pub fn from_export(mut document: Value) -> serde_json::Result<Self> {
        let table = match document
            .as_object_mut()
            .and_then(|object| object.remove(EXPORT_TABLE_KEY))
        {
            Some(table) => table,
            None => document,
        };
        serde_json::from_value(table)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub type_options: Option<TypeOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeOptions {
    #[serde(default)]
    pub choices: Option<BTreeMap<String, Choice>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub cell_values_by_column_id: Option<BTreeMap<String, Value>>,
}

impl Row {
    /// Cells of this row, or `None` when the row carries no cell map or an empty one.
    pub fn cells(&self) -> Option<&BTreeMap<String, Value>> {
        self.cell_values_by_column_id
            .as_ref()
            .filter(|cells| !cells.is_empty())
    }
}

/// One attachment object from an attachment cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: Option<String>,
}

/// A cell value classified by how it has to be resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Plain text, passed through.
    Text(String),
    /// Single-select choice id, resolved through the choice index.
    ChoiceRef(String),
    /// Attachment list; the first element's `url` stands in for the cell.
    Attachment(Vec<Attachment>),
    /// Any other JSON value.
    Raw(Value),
}

impl CellValue {
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::String(text) if text.starts_with(CHOICE_MARKER) => {
                Self::ChoiceRef(text.clone())
            }
            Value::String(text) => Self::Text(text.clone()),
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                Self::Attachment(
                    items
                        .iter()
                        .map(|item| Attachment {
                            url: item.get("url").and_then(Value::as_str).map(str::to_string),
                        })
                        .collect(),
                )
            }
            other => Self::Raw(other.clone()),
        }
    }
}
