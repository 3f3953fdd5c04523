//! Key-value table storage for exit list records.
//!
//! # Architecture
//!
//! - `item.rs` - Tagged-type item format and record conversion
//! - `table.rs` - The [`TableStore`] capability and batch constraints
//! - `memory.rs` / `file.rs` - In-memory and JSON-file tables
//! - `persist.rs` - Batched, failure-isolated writes of merged records
//! - `error.rs` - Error types

mod error;
mod file;
mod item;
mod memory;
mod persist;
mod table;

pub use error::{Result, StoreError};
pub use file::{JsonFileTable, TableDocument};
pub use item::{AttributeValue, Item, KEY_ATTRIBUTE, decode_item, encode_record, item_key};
pub use memory::MemoryTable;
pub use persist::{BatchFailure, PersistReport, persist};
pub use table::{MAX_BATCH_ITEMS, TableStore, validate_batch};
