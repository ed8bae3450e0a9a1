// GAF annotation parser: protein -> GO terms, per aspect

use crate::error::{IngestError, Result};
use crate::go::AnnotationTable;
use goxref_common::{Aspect, AspectMap};
use tracing::info;

/// Minimum number of columns in a GAF 2.x row
const GAF_MIN_COLUMNS: usize = 15;

pub struct GafParser;

impl GafParser {
    /// Parse GAF rows into per-aspect annotation tables
    ///
    /// GAF format: tab-delimited, 15 to 17 columns. Used here:
    /// Column 2: DB Object ID (e.g., "P01308")
    /// Column 5: GO ID
    /// Column 9: Aspect (P/F/C)
    ///
    /// Comment (`!`) and blank lines are skipped. A row with too few
    /// columns or an unknown aspect fails the whole parse.
    pub fn parse<I>(lines: I) -> Result<AspectMap<AnnotationTable>>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut tables: AspectMap<AnnotationTable> = AspectMap::default();
        let mut rows = 0usize;

        for (index, line) in lines.into_iter().enumerate() {
            let line = line?;
            if line.starts_with('!') || line.trim().is_empty() {
                continue;
            }

            let (object_id, go_id, aspect) = Self::parse_row(&line)
                .map_err(|e| IngestError::parse(format!("GAF line {}: {}", index + 1, e)))?;

            tables[aspect]
                .entry(object_id.to_string())
                .or_default()
                .insert(go_id.to_string());
            rows += 1;

            if rows % 1_000_000 == 0 {
                info!("Processed {} GAF rows", rows);
            }
        }

        info!(
            rows,
            cellular_component = tables[Aspect::CellularComponent].len(),
            molecular_function = tables[Aspect::MolecularFunction].len(),
            biological_process = tables[Aspect::BiologicalProcess].len(),
            "Parsed GO annotations"
        );

        Ok(tables)
    }

    fn parse_row(line: &str) -> std::result::Result<(&str, &str, Aspect), String> {
        let columns: Vec<&str> = line.split('\t').collect();

        if columns.len() < GAF_MIN_COLUMNS {
            return Err(format!(
                "expected {}+ columns, got {}",
                GAF_MIN_COLUMNS,
                columns.len()
            ));
        }

        let aspect = columns[8]
            .parse::<Aspect>()
            .map_err(|e| e.to_string())?;

        Ok((columns[1].trim(), columns[4].trim(), aspect))
    }
}
