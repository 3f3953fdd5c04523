//! Source normalization for the company exit list.
//!
//! Both upstream tables are reduced to flat [`Record`](exitlist_model::Record)s
//! that share a `slug` join key:
//!
//! - **Structured export**: column/row JSON with choice ids and attachments,
//!   producing `e_*` fields
//! - **Scraped page**: sectioned HTML tables, producing `orig_*` fields and
//!   an `orig_status` taken from each section's `id`
//!
//! # Example
//!
//! ```ignore
//! use exitlist_ingest::{ScrapeOptions, normalize_scraped, normalize_structured, parse_structured};
//!
//! let table = parse_structured(&std::fs::read("extended-table.json")?)?;
//! let structured = normalize_structured(&table)?;
//! let scraped = normalize_scraped(&html, &ScrapeOptions::default())?;
//! ```

mod error;
mod scraped;
mod slug;
mod structured;

// === Error Types ===
pub use error::{ErrorKind, IngestError, Result};

// === Slug ===
pub use slug::slugify;

// === Structured Export ===
pub use structured::{normalize_column_name, normalize_structured, parse_structured};

// === Scraped Page ===
pub use scraped::{
    DEFAULT_SECTION_SELECTOR, ScrapeOptions, ScrapedSection, extract_sections, normalize_header,
    normalize_scraped, normalize_scraped_bytes, normalize_sections,
};
