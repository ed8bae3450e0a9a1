//! UniChem cross-references between chemical compound databases
//!
//! UniChem numbers the databases it covers ("ID types", e.g. `1` for
//! ChEMBL). [`UniChemClient::list_id_types`] reads the id -> label table
//! from the sources page and [`UniChemClient::build_mapping`] streams a
//! whole-source mapping file into a lookup table.

pub mod html;

use crate::config::SourceConfig;
use crate::error::{IngestError, Result};
use crate::fetch::Fetcher;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{error, info};

/// Source compound id -> target compound ids
pub type CrossReferences = HashMap<String, HashSet<String>>;

/// Resolve an ID type given as a numeric id or a label against an
/// id -> label table
///
/// The result must be a known numeric id. If several ids carry the same
/// label, the smallest id in string order wins, as the table is a
/// `BTreeMap` and keeps no page order.
pub fn resolve_id_type_with(id_types: &BTreeMap<String, String>, value: &str) -> Result<String> {
    let resolved = id_types
        .iter()
        .find(|(_, label)| label.as_str() == value)
        .map(|(id, _)| id.as_str())
        .unwrap_or(value);

    let numeric = !resolved.is_empty() && resolved.chars().all(|c| c.is_ascii_digit());
    if !numeric || !id_types.contains_key(resolved) {
        error!("No such ID type: `{}`.", value);
        return Err(IngestError::UnknownIdType(value.to_string()));
    }

    Ok(resolved.to_string())
}

pub struct UniChemClient<F: Fetcher> {
    fetcher: F,
    config: SourceConfig,
}

impl<F: Fetcher> UniChemClient<F> {
    pub fn new(fetcher: F, config: SourceConfig) -> Self {
        UniChemClient { fetcher, config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// All ID types: numeric id -> label
    pub fn list_id_types(&self) -> Result<BTreeMap<String, String>> {
        let url = &self.config.unichem_sources_url;
        info!("Downloading UniChem sources from: {}", url);

        let page = self.fetcher.fetch_text(url)?;
        html::parse_sources_page(&page)
    }

    /// Numeric id of an ID type given by id or label
    pub fn resolve_id_type(&self, value: &str) -> Result<String> {
        resolve_id_type_with(&self.list_id_types()?, value)
    }

    /// Compound id mapping from `id_type` to `target_id_type`
    ///
    /// Both may be numeric ids or labels. The first line of the mapping file
    /// is a header; every other line must hold exactly two tab separated ids.
    pub fn build_mapping(&self, id_type: &str, target_id_type: &str) -> Result<CrossReferences> {
        let id_types = self.list_id_types()?;
        let source = resolve_id_type_with(&id_types, id_type)?;
        let target = resolve_id_type_with(&id_types, target_id_type)?;

        let url = self.config.unichem_mapping_table_url(&source, &target);
        info!(source = %source, target = %target, "Downloading UniChem mapping from: {}", url);

        let mapping = parse_mapping(self.fetcher.fetch_lines(&url)?)?;

        info!(
            source = %source,
            target = %target,
            compounds = mapping.len(),
            "Built UniChem mapping"
        );

        Ok(mapping)
    }
}

/// Read a two column mapping file, header line first
///
/// A read error anywhere, the header included, fails the whole parse; a body
/// without even a header line is rejected too.
fn parse_mapping<I>(lines: I) -> Result<CrossReferences>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut lines = lines.into_iter();
    if lines.next().transpose()?.is_none() {
        return Err(IngestError::parse("UniChem mapping file is empty"));
    }

    let mut mapping = CrossReferences::new();

    for (index, line) in lines.enumerate() {
        let line = line?;
        let fields: Vec<&str> = line.trim().split('\t').collect();

        let [source_id, target_id] = fields.as_slice() else {
            return Err(IngestError::parse(format!(
                "UniChem mapping line {}: expected 2 tab separated fields, got {}",
                index + 2,
                fields.len()
            )));
        };

        mapping
            .entry(source_id.to_string())
            .or_default()
            .insert(target_id.to_string());
    }

    Ok(mapping)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fetch::tests::gzip;
    use crate::fetch::StaticFetcher;

    const SOURCES_URL: &str = "http://unichem.test/listSources";
    const MAPPING_URL: &str = "http://unichem.test/mapping";

    const SOURCES_PAGE: &str = r#"<table>
<tr><th>src_id</th><th>name</th></tr>
<tr><td>id</td><td>label</td></tr>
<tr><td>1</td><td>chembl</td></tr>
<tr><td>2</td><td>drugbank</td></tr>
<tr><td>7</td><td>chebi</td></tr>
</table>"#;

    fn id_types() -> BTreeMap<String, String> {
        [("1", "chembl"), ("2", "drugbank"), ("7", "chebi")]
            .into_iter()
            .map(|(id, label)| (id.to_string(), label.to_string()))
            .collect()
    }

    fn client(fetcher: StaticFetcher) -> UniChemClient<StaticFetcher> {
        let config = SourceConfig::builder()
            .unichem_sources_url(SOURCES_URL)
            .unichem_mapping_url(MAPPING_URL)
            .no_cache()
            .show_progress(false)
            .build();
        UniChemClient::new(fetcher, config)
    }

    #[test]
    fn test_resolve_label_and_id() {
        assert_eq!(resolve_id_type_with(&id_types(), "chembl").unwrap(), "1");
        assert_eq!(resolve_id_type_with(&id_types(), "1").unwrap(), "1");
        assert_eq!(resolve_id_type_with(&id_types(), "chebi").unwrap(), "7");
    }

    #[test]
    fn test_resolve_unknown() {
        for value in ["nonexistent", "99", "", "ChEMBL"] {
            let err = resolve_id_type_with(&id_types(), value).unwrap_err();
            assert!(matches!(err, IngestError::UnknownIdType(ref v) if v == value));
        }
        assert_eq!(
            resolve_id_type_with(&id_types(), "nonexistent")
                .unwrap_err()
                .to_string(),
            "No such ID type: `nonexistent`"
        );
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let mut id_types = id_types();
        id_types.insert("abc".to_string(), "odd".to_string());
        assert!(resolve_id_type_with(&id_types, "odd").is_err());
    }

    #[test]
    fn test_parse_mapping() {
        let lines = ["header", "A\tX", "A\tY", "B\tX"].map(|s| Ok(s.to_string()));
        let mapping = parse_mapping(lines).unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["A"], HashSet::from(["X".to_string(), "Y".to_string()]));
        assert_eq!(mapping["B"], HashSet::from(["X".to_string()]));
    }

    #[test]
    fn test_parse_mapping_header_only() {
        let mapping = parse_mapping([Ok("From src:'1'\tTo src:'2'".to_string())]).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_parse_mapping_header_read_error_is_fatal() {
        let lines = vec![
            Err(IngestError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "invalid gzip header",
            ))),
            Ok("A\tX".to_string()),
        ];
        assert!(matches!(parse_mapping(lines), Err(IngestError::Io(_))));
    }

    #[test]
    fn test_parse_mapping_empty_body_is_fatal() {
        let lines: Vec<Result<String>> = Vec::new();
        assert!(matches!(parse_mapping(lines), Err(IngestError::Parse(_))));
    }

    #[test]
    fn test_resolve_shared_label_picks_smallest_id() {
        let mut id_types = id_types();
        id_types.insert("10".to_string(), "chembl".to_string());
        assert_eq!(resolve_id_type_with(&id_types, "chembl").unwrap(), "1");
    }

    #[test]
    fn test_parse_mapping_rejects_malformed_line() {
        let lines = ["header", "A\tX", "B\tX\tZ"].map(|s| Ok(s.to_string()));
        let err = parse_mapping(lines).unwrap_err();
        assert!(err.to_string().contains("line 3"));

        let lines = ["header", "lonely"].map(|s| Ok(s.to_string()));
        assert!(parse_mapping(lines).is_err());
    }

    #[test]
    fn test_list_id_types() {
        let client = client(StaticFetcher::new().with(SOURCES_URL, SOURCES_PAGE));
        assert_eq!(client.list_id_types().unwrap(), id_types());
        assert_eq!(client.resolve_id_type("drugbank").unwrap(), "2");
    }

    #[test]
    fn test_build_mapping_by_label() {
        let fetcher = StaticFetcher::new()
            .with(SOURCES_URL, SOURCES_PAGE)
            .with(
                format!("{}/src_id1/src1src2.txt.gz", MAPPING_URL),
                gzip("From src:'1'\tTo src:'2'\nCHEMBL25\tDB00945\nCHEMBL25\tDB01234\n"),
            );

        let mapping = client(fetcher).build_mapping("chembl", "2").unwrap();
        assert_eq!(mapping["CHEMBL25"].len(), 2);
    }

    #[test]
    fn test_build_mapping_uncompressed_body_is_an_error() {
        let fetcher = StaticFetcher::new().with(SOURCES_URL, SOURCES_PAGE).with(
            format!("{}/src_id1/src1src2.txt.gz", MAPPING_URL),
            "<html>Service unavailable</html>\nA\tB\n",
        );

        assert!(client(fetcher).build_mapping("chembl", "drugbank").is_err());
    }

    #[test]
    fn test_build_mapping_unknown_type() {
        let client = client(StaticFetcher::new().with(SOURCES_URL, SOURCES_PAGE));
        assert!(matches!(
            client.build_mapping("chembl", "nonexistent"),
            Err(IngestError::UnknownIdType(_))
        ));
    }
}
