//! Structured export normalization.
//!
//! Turns the column/row JSON export into flat `e_*` records:
//! 1. Index column ids to display names
//! 2. Index choice ids to choice names across every column
//! 3. Resolve each cell and key it by its normalized column name
//! 4. Derive the slug from the `e_name` field

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use exitlist_model::{
    Attachment, CellValue, Column, Record, SLUG_FIELD, SourceKind, StructuredTable,
};

use crate::error::{IngestError, Result};
use crate::slug::slugify;

/// Parses export bytes into a table.
pub fn parse_structured(bytes: &[u8]) -> Result<StructuredTable> {
    let document: Value = serde_json::from_slice(bytes)?;
    Ok(StructuredTable::from_export(document)?)
}

/// Normalizes every row that has cells into an `e_*` record with a slug.
///
/// # Errors
///
/// Fails on the first row that references an unknown column or choice, or
/// that has no `name` value to derive the slug from.
pub fn normalize_structured(table: &StructuredTable) -> Result<Vec<Record>> {
    let columns = column_index(&table.columns);
    let choices = choice_index(&table.columns);
    let name_field = SourceKind::Structured.name_field();

    let mut records = Vec::with_capacity(table.rows.len());
    for (row, raw_row) in table.rows.iter().enumerate() {
        let Some(cells) = raw_row.cells() else {
            continue;
        };
        let mut record = Record::new();
        for (column_id, raw) in cells {
            let column = columns
                .get(column_id.as_str())
                .ok_or_else(|| IngestError::UnknownColumn {
                    column_id: column_id.clone(),
                    row,
                })?;
            if let Some(value) = resolve_cell(raw, column, &choices, row)? {
                record.insert(normalize_column_name(&column.name), value);
            }
        }
        let name = record
            .get(&name_field)
            .ok_or_else(|| IngestError::MissingField {
                field: name_field.clone(),
                row,
            })?;
        let slug = slugify(name);
        record.insert(SLUG_FIELD, slug);
        records.push(record);
    }

    debug!(
        columns = columns.len(),
        choices = choices.len(),
        rows = table.rows.len(),
        records = records.len(),
        "normalized structured export"
    );
    Ok(records)
}

/// Converts `Market Cap` into `e_market_cap`.
pub fn normalize_column_name(name: &str) -> String {
    let header = name.trim().to_lowercase().replace(' ', "_");
    SourceKind::Structured.field_name(&header)
}

fn column_index(columns: &[Column]) -> HashMap<&str, &Column> {
    columns
        .iter()
        .map(|column| (column.id.as_str(), column))
        .collect()
}

fn choice_index(columns: &[Column]) -> HashMap<&str, &str> {
    let mut choices = HashMap::new();
    for column in columns {
        let Some(column_choices) = column
            .type_options
            .as_ref()
            .and_then(|options| options.choices.as_ref())
        else {
            continue;
        };
        for (id, choice) in column_choices {
            choices.insert(id.as_str(), choice.name.as_str());
        }
    }
    choices
}

/// Resolves a raw cell to its flat string value; JSON `null` yields no field.
fn resolve_cell(
    raw: &Value,
    column: &Column,
    choices: &HashMap<&str, &str>,
    row: usize,
) -> Result<Option<String>> {
    let value = match CellValue::classify(raw) {
        CellValue::Text(text) => text,
        CellValue::ChoiceRef(id) => match choices.get(id.as_str()) {
            Some(name) => (*name).to_string(),
            None => {
                return Err(IngestError::UnknownChoice {
                    column: column.name.clone(),
                    value: id,
                    row,
                });
            }
        },
        CellValue::Attachment(attachments) => match attachments.into_iter().next() {
            Some(Attachment { url: Some(url) }) => url,
            _ => raw.to_string(),
        },
        CellValue::Raw(Value::Null) => return Ok(None),
        CellValue::Raw(other) => other.to_string(),
    };
    Ok(Some(value))
}
