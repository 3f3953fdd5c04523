//! Scraped HTML table normalization.
//!
//! The public page lists companies in several `<section>` blocks, one table
//! per section. The section `id` is the status shared by every row in it, so
//! each row is tagged with `orig_status` before the sections are flattened in
//! document order.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use exitlist_model::{Record, SLUG_FIELD, STATUS_FIELD, SourceKind};

use crate::error::{IngestError, Result};
use crate::slug::slugify;

/// Selector for the sections that carry a company table.
pub const DEFAULT_SECTION_SELECTOR: &str = "section.layout.layout--one-column";

/// Options for locating tables in the scraped page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// CSS selector matching each table-bearing section.
    pub section_selector: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            section_selector: DEFAULT_SECTION_SELECTOR.to_string(),
        }
    }
}

impl ScrapeOptions {
    #[must_use]
    pub fn with_section_selector(mut self, selector: impl Into<String>) -> Self {
        self.section_selector = selector.into();
        self
    }
}

/// Raw table content of one section, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedSection {
    /// The section's `id` attribute; empty when absent.
    pub status: String,
    /// Text of every `<th>` in the section.
    pub headers: Vec<String>,
    /// Text of the `<td>` cells of every `<tr>` in the section.
    pub rows: Vec<Vec<String>>,
}

/// Normalizes raw page bytes.
///
/// # Errors
///
/// Returns [`IngestError::MalformedHtml`] when the bytes are not UTF-8.
pub fn normalize_scraped_bytes(bytes: &[u8], options: &ScrapeOptions) -> Result<Vec<Record>> {
    let html = std::str::from_utf8(bytes).map_err(|err| IngestError::MalformedHtml {
        reason: err.to_string(),
    })?;
    normalize_scraped(html, options)
}

/// Extracts and normalizes every section table into flat `orig_*` records.
pub fn normalize_scraped(html: &str, options: &ScrapeOptions) -> Result<Vec<Record>> {
    let sections = extract_sections(html, options)?;
    let records = normalize_sections(&sections);
    debug!(
        sections = sections.len(),
        records = records.len(),
        "normalized scraped document"
    );
    Ok(records)
}

/// Collects header and cell text from every matching section.
pub fn extract_sections(html: &str, options: &ScrapeOptions) -> Result<Vec<ScrapedSection>> {
    let section_selector = parse_selector(&options.section_selector)?;
    let th = parse_selector("th")?;
    let tr = parse_selector("tr")?;
    let td = parse_selector("td")?;

    let document = Html::parse_document(html);
    let sections = document
        .select(&section_selector)
        .map(|section| ScrapedSection {
            status: section.value().attr("id").unwrap_or_default().to_string(),
            headers: section.select(&th).map(element_text).collect(),
            rows: section
                .select(&tr)
                .map(|row| row.select(&td).map(element_text).collect())
                .collect(),
        })
        .collect();
    Ok(sections)
}

/// Flattens extracted sections into records, keeping document order.
pub fn normalize_sections(sections: &[ScrapedSection]) -> Vec<Record> {
    sections.iter().flat_map(normalize_section).collect()
}

/// Converts `\u{feff}Name` into `orig_name`.
pub fn normalize_header(raw: &str) -> String {
    let header = raw.replace('\u{feff}', "").trim().to_lowercase();
    SourceKind::Scraped.field_name(&header)
}

fn normalize_section(section: &ScrapedSection) -> Vec<Record> {
    let headers: Vec<String> = section
        .headers
        .iter()
        .map(|header| normalize_header(header))
        .collect();
    let name_field = SourceKind::Scraped.name_field();

    section
        .rows
        .iter()
        .filter_map(|cells| {
            // Rows shorter than the header list simply lack the trailing keys.
            let mut record: Record = headers
                .iter()
                .zip(cells)
                .map(|(header, cell)| (header.clone(), cell.trim().to_string()))
                .collect();
            if record.is_empty() {
                return None;
            }
            record.insert(STATUS_FIELD, section.status.clone());
            let slug = slugify(record.get(&name_field).unwrap_or_default());
            record.insert(SLUG_FIELD, slug);
            Some(record)
        })
        .collect()
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|err| IngestError::InvalidSelector {
        selector: selector.to_string(),
        reason: err.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(status: &str, headers: &[&str], rows: &[&[&str]]) -> ScrapedSection {
        ScrapedSection {
            status: status.to_string(),
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn normalizes_headers() {
        assert_eq!(normalize_header("\u{feff}Name"), "orig_name");
        assert_eq!(normalize_header("  Industry \n"), "orig_industry");
        assert_eq!(normalize_header("Slug"), "slug");
    }

    #[test]
    fn builds_status_and_slug() {
        let sections = [section("withdrawal", &["Name"], &[&[], &["Acme Corp"]])];
        let records = normalize_sections(&sections);
        assert_eq!(records.len(), 1);
        let expected: Record = [
            ("orig_name", "Acme Corp"),
            ("orig_status", "withdrawal"),
            ("slug", "acme-corp"),
        ]
        .into_iter()
        .collect();
        assert_eq!(records[0], expected);
    }

    #[test]
    fn short_rows_drop_trailing_keys() {
        let sections = [section(
            "suspension",
            &["Name", "Action", "Industry"],
            &[&["Acme", "Paused"]],
        )];
        let records = normalize_sections(&sections);
        assert_eq!(records[0].get("orig_action"), Some("Paused"));
        assert!(!records[0].contains_key("orig_industry"));
    }

    #[test]
    fn missing_name_gives_empty_slug() {
        let sections = [section("digging_in", &["Company"], &[&["Acme"]])];
        let records = normalize_sections(&sections);
        assert_eq!(records[0].get("slug"), Some(""));
        assert_eq!(records[0].slug(), None);
    }

    #[test]
    fn status_overrides_status_column() {
        let sections = [section("withdrawal", &["Name", "Status"], &[&["Acme", "Gone"]])];
        let records = normalize_sections(&sections);
        assert_eq!(records[0].get("orig_status"), Some("withdrawal"));
    }

    #[test]
    fn invalid_selector_is_malformed_input() {
        let options = ScrapeOptions::default().with_section_selector("section[");
        let err = extract_sections("<html></html>", &options).unwrap_err();
        assert!(matches!(err, IngestError::InvalidSelector { .. }));
    }
}
