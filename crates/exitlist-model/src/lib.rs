//! Data model for the company exit list.
//!
//! - [`Record`]: flat string records produced by both normalizers
//! - [`SourceKind`]: field prefixes and reserved names per source
//! - [`StructuredTable`] and [`CellValue`]: raw structured export shape

pub mod record;
pub mod source;
pub mod structured;

pub use record::{Record, SLUG_FIELD};
pub use source::{NAME_HEADER, STATUS_FIELD, SourceKind};
pub use structured::{
    Attachment, CHOICE_MARKER, CellValue, Choice, Column, EXPORT_TABLE_KEY, Row, StructuredTable,
    TypeOptions,
};
