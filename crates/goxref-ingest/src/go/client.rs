// GO data source backed by the GO release ontology and GOA annotation files

use crate::config::SourceConfig;
use crate::error::{IngestError, Result};
use crate::fetch::Fetcher;
use crate::go::{AnnotationTable, GafParser, GoDataSource, OboParser, ParsedObo, RelationTable, TermNames};
use goxref_common::AspectMap;
use std::sync::OnceLock;
use tracing::info;

/// NCBI taxonomy id -> GOA organism short name
const GOA_ORGANISMS: &[(u32, &str)] = &[
    (9606, "human"),
    (10090, "mouse"),
    (10116, "rat"),
    (559292, "yeast"),
    (7227, "fly"),
    (6239, "worm"),
    (7955, "zebrafish"),
    (3702, "arabidopsis"),
    (9031, "chicken"),
    (9913, "cow"),
    (9823, "pig"),
    (9615, "dog"),
];

/// GOA short name of an organism, if GOA publishes a file for it
pub fn goa_organism_name(organism: u32) -> Option<&'static str> {
    GOA_ORGANISMS
        .iter()
        .find(|(taxid, _)| *taxid == organism)
        .map(|(_, name)| *name)
}

/// Downloads and parses GO files through a [`Fetcher`]
///
/// The ontology file is parsed on first use and kept for the lifetime of
/// the client; annotation files are fetched on every call.
pub struct GoClient<F: Fetcher> {
    fetcher: F,
    config: SourceConfig,
    ontology: OnceLock<ParsedObo>,
}

impl<F: Fetcher> GoClient<F> {
    pub fn new(fetcher: F, config: SourceConfig) -> Self {
        GoClient {
            fetcher,
            config,
            ontology: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The parsed ontology, downloading it on first call
    pub fn ontology(&self) -> Result<&ParsedObo> {
        if let Some(parsed) = self.ontology.get() {
            return Ok(parsed);
        }

        let url = &self.config.go_ontology_url;
        info!("Downloading GO ontology from: {}", url);
        let text = self.fetcher.fetch_text(url)?;
        info!("Downloaded GO ontology: {} KB", text.len() / 1024);

        let parsed = OboParser::parse(&text)?;
        Ok(self.ontology.get_or_init(|| parsed))
    }
}

impl<F: Fetcher> GoDataSource for GoClient<F> {
    fn go_terms(&self) -> Result<TermNames> {
        Ok(self.ontology()?.names())
    }

    fn go_ancestors(&self) -> Result<AspectMap<RelationTable>> {
        Ok(self.ontology()?.ancestors())
    }

    fn go_descendants(&self) -> Result<AspectMap<RelationTable>> {
        Ok(self.ontology()?.descendants())
    }

    fn go_annotations(&self, organism: u32) -> Result<AspectMap<AnnotationTable>> {
        let name = goa_organism_name(organism).ok_or(IngestError::UnknownOrganism(organism))?;
        let url = self.config.goa_organism_url(name);

        info!(organism, "Downloading GOA {} annotations from: {}", name, url);
        GafParser::parse(self.fetcher.fetch_lines(&url)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fetch::tests::gzip;
    use crate::fetch::StaticFetcher;
    use goxref_common::{Aspect, Relation};
    use std::io::Read;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const OBO: &str = "format-version: 1.2

[Term]
id: GO:0008150
name: biological_process
namespace: biological_process

[Term]
id: GO:0006915
name: apoptotic process
namespace: biological_process
is_a: GO:0008150 ! biological_process

[Term]
id: GO:0005634
name: nucleus
namespace: cellular_component
";

    const GAF: &str = "!gaf-version: 2.2
UniProtKB\tP04637\tTP53\t\tGO:0005634\tPMID:1\tIDA\t\tC\tp53\t\tprotein\ttaxon:9606\t20260101\tUniProt
UniProtKB\tP04637\tTP53\t\tGO:0006915\tPMID:1\tIDA\t\tP\tp53\t\tprotein\ttaxon:9606\t20260101\tUniProt
";

    fn config() -> SourceConfig {
        SourceConfig::builder()
            .go_ontology_url("http://go.test/go-basic.obo")
            .goa_base_url("http://goa.test")
            .no_cache()
            .show_progress(false)
            .build()
    }

    /// Counts how often each body is opened
    struct Counting {
        inner: StaticFetcher,
        opened: AtomicUsize,
    }

    impl Fetcher for Counting {
        fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            self.inner.open(url)
        }
    }

    #[test]
    fn test_goa_organism_name() {
        assert_eq!(goa_organism_name(9606), Some("human"));
        assert_eq!(goa_organism_name(559292), Some("yeast"));
        assert_eq!(goa_organism_name(1), None);
    }

    #[test]
    fn test_ontology_tables() {
        let fetcher = StaticFetcher::new().with("http://go.test/go-basic.obo", OBO);
        let client = GoClient::new(fetcher, config());

        let names = client.go_terms().unwrap();
        assert_eq!(
            names[Aspect::CellularComponent].get("GO:0005634").map(String::as_str),
            Some("nucleus")
        );

        let ancestors = client.go_ancestors().unwrap();
        assert!(ancestors[Aspect::BiologicalProcess]["GO:0006915"]
            .contains(&("GO:0008150".to_string(), Relation::IsA)));

        let descendants = client.go_descendants().unwrap();
        assert!(descendants[Aspect::BiologicalProcess]["GO:0008150"]
            .contains(&("GO:0006915".to_string(), Relation::IsA)));
    }

    #[test]
    fn test_ontology_downloaded_once() {
        let fetcher = Counting {
            inner: StaticFetcher::new().with("http://go.test/go-basic.obo", OBO),
            opened: AtomicUsize::new(0),
        };
        let client = GoClient::new(fetcher, config());

        client.go_terms().unwrap();
        client.go_ancestors().unwrap();
        client.go_descendants().unwrap();

        assert_eq!(client.fetcher().opened.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_annotations_from_goa_file() {
        let fetcher = StaticFetcher::new().with("http://goa.test/HUMAN/goa_human.gaf.gz", gzip(GAF));
        let client = GoClient::new(fetcher, config());

        let tables = client.go_annotations(9606).unwrap();
        assert!(tables[Aspect::CellularComponent]["P04637"].contains("GO:0005634"));
        assert!(tables[Aspect::BiologicalProcess]["P04637"].contains("GO:0006915"));
        assert!(tables[Aspect::MolecularFunction].is_empty());
    }

    #[test]
    fn test_unknown_organism() {
        let client = GoClient::new(StaticFetcher::new(), config());
        assert!(matches!(
            client.go_annotations(42),
            Err(IngestError::UnknownOrganism(42))
        ));
    }
}
