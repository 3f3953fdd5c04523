//! Field naming rules for the two upstream sources.

use std::fmt;

use crate::record::SLUG_FIELD;

/// Header (before prefixing) that holds a company's name in both sources.
pub const NAME_HEADER: &str = "name";

/// Status field attached to every scraped row.
pub const STATUS_FIELD: &str = "orig_status";

/// Which upstream table a record was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The column/row JSON export ("extended" table).
    Structured,
    /// The HTML tables scraped from the public page ("original" table).
    Scraped,
}

impl SourceKind {
    /// Prefix applied to every field from this source.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Structured => "e_",
            Self::Scraped => "orig_",
        }
    }

    /// Builds the record key for an already-normalized header.
    ///
    /// `slug` is reserved and passes through without a prefix.
    pub fn field_name(self, header: &str) -> String {
        if header == SLUG_FIELD {
            return header.to_string();
        }
        format!("{}{}", self.prefix(), header)
    }

    /// Record key holding the company name for this source.
    pub fn name_field(self) -> String {
        self.field_name(NAME_HEADER)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Scraped => "scraped",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
