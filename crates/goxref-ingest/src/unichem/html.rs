// UniChem sources page scraper

use crate::error::{IngestError, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Header row text that marks the sources table
const SOURCES_TABLE_MARKER: &str = "src_id";

/// Rows before the first source: the header and a column description row
const HEADER_ROWS: usize = 2;

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| IngestError::parse(format!("Invalid selector '{}': {}", css, e)))
}

fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Numeric source id -> source label, from the sources page HTML
///
/// Every table whose first row starts with `src_id` is read. The source id
/// is the first cell's text as is; the label is the second cell's text,
/// trimmed. A page without such a table gives an empty map.
pub fn parse_sources_page(html: &str) -> Result<BTreeMap<String, String>> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let mut sources = BTreeMap::new();

    for table in document.select(&table_selector) {
        let rows: Vec<ElementRef<'_>> = table.select(&row_selector).collect();

        let is_sources_table = rows
            .first()
            .is_some_and(|header| text(*header).trim().starts_with(SOURCES_TABLE_MARKER));
        if !is_sources_table {
            continue;
        }

        for (index, row) in rows.iter().enumerate().skip(HEADER_ROWS) {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();

            let [id, label, ..] = cells.as_slice() else {
                return Err(IngestError::parse(format!(
                    "UniChem sources table row {}: expected at least 2 cells, got {}",
                    index + 1,
                    cells.len()
                )));
            };

            sources.insert(text(*id), text(*label).trim().to_string());
        }
    }

    if sources.is_empty() {
        warn!("No UniChem sources table found");
    } else {
        debug!(sources = sources.len(), "Parsed UniChem sources page");
    }

    Ok(sources)
}
