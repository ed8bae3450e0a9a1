//! goxref - Gene Ontology and UniChem lookup tool

use anyhow::{Context, Result};
use clap::Parser;
use goxref_common::logging::{init_logging, LogConfig, LogLevel};
use goxref_common::Aspect;
use goxref_ingest::cli::{Cli, Commands};
use goxref_ingest::config::SourceConfig;
use goxref_ingest::fetch::{DiskCache, HttpFetcher};
use goxref_ingest::go::{AnnotationIndex, GeneOntology, GoClient};
use goxref_ingest::unichem::UniChemClient;
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info};

fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("goxref")
        .build()
        .merge_env()?;

    init_logging(&log_config)?;

    let mut config = SourceConfig::from_env();
    if cli.no_cache {
        config.cache_dir = None;
    }
    if cli.quiet {
        config.show_progress = false;
    }
    debug!(?config, "Source configuration");

    if let Commands::ClearCache = cli.command {
        return clear_cache(&config);
    }

    let fetcher = HttpFetcher::new(config.clone()).context("Failed to set up HTTP client")?;
    let output = Output { json: cli.json };

    match cli.command {
        Commands::Ancestors { terms, relations } => {
            let go = load_ontology(&fetcher, &config)?;
            output.terms(go.all_ancestors(&terms, relations))?;
        },
        Commands::Descendants { terms, relations } => {
            let go = load_ontology(&fetcher, &config)?;
            output.terms(go.all_descendants(&terms, relations))?;
        },
        Commands::Name { term } => {
            let go = load_ontology(&fetcher, &config)?;
            let name = go
                .get_name(&term)
                .with_context(|| format!("Unknown GO term: {}", term))?;
            output.value(name)?;
        },
        Commands::Term { name } => {
            let go = load_ontology(&fetcher, &config)?;
            let term = go
                .get_term(&name)
                .with_context(|| format!("Unknown GO term name: {}", name))?;
            output.value(term)?;
        },
        Commands::Annotations {
            protein,
            aspect,
            organism,
        } => {
            let client = GoClient::new(&fetcher, config.clone());
            let index = AnnotationIndex::load(&client, organism, None)?;

            let aspects = match aspect {
                Some(aspect) => vec![aspect],
                None => Aspect::ALL.to_vec(),
            };
            output.annotations(&index, &protein, &aspects)?;
        },
        Commands::UnichemSources => {
            let client = UniChemClient::new(&fetcher, config.clone());
            output.table(client.list_id_types()?)?;
        },
        Commands::UnichemMap { from, to, limit } => {
            let client = UniChemClient::new(&fetcher, config.clone());
            let mapping = client.build_mapping(&from, &to)?;

            let sorted: BTreeMap<&String, BTreeSet<&String>> = mapping
                .iter()
                .map(|(source, targets)| (source, targets.iter().collect()))
                .collect();
            output.mapping(sorted.into_iter().take(limit.unwrap_or(usize::MAX)))?;
        },
        Commands::ClearCache => {},
    }

    info!("Done");
    Ok(())
}

fn load_ontology(fetcher: &HttpFetcher, config: &SourceConfig) -> Result<GeneOntology> {
    let client = GoClient::new(fetcher, config.clone());
    GeneOntology::load(&client).context("Failed to load Gene Ontology")
}

fn clear_cache(config: &SourceConfig) -> Result<()> {
    let Some(dir) = &config.cache_dir else {
        println!("Download cache is disabled");
        return Ok(());
    };

    let removed = DiskCache::new(dir, config.cache_max_age_days)?.clear()?;
    println!("Removed {} cached downloads from {}", removed, dir.display());
    Ok(())
}

/// Prints results as tab separated text or JSON
struct Output {
    json: bool,
}

impl Output {
    fn terms(&self, terms: HashSet<String>) -> Result<()> {
        let terms: BTreeSet<String> = terms.into_iter().collect();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&terms)?);
        } else {
            for term in terms {
                println!("{}", term);
            }
        }
        Ok(())
    }

    fn value(&self, value: &str) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(value)?);
        } else {
            println!("{}", value);
        }
        Ok(())
    }

    fn annotations(&self, index: &AnnotationIndex, protein: &str, aspects: &[Aspect]) -> Result<()> {
        let mut rows = Vec::new();
        for &aspect in aspects {
            let terms: BTreeSet<&String> = index.get_annotations(protein, aspect).iter().collect();
            for term in terms {
                rows.push((aspect, term, index.get_name(term)));
            }
        }

        if self.json {
            let rows: Vec<_> = rows
                .iter()
                .map(|(aspect, term, name)| {
                    json!({ "aspect": aspect.code().to_string(), "term": term, "name": name })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            for (aspect, term, name) in rows {
                println!("{}\t{}\t{}", aspect, term, name.unwrap_or("-"));
            }
        }
        Ok(())
    }

    fn table(&self, table: BTreeMap<String, String>) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&table)?);
        } else {
            for (key, value) in table {
                println!("{}\t{}", key, value);
            }
        }
        Ok(())
    }

    fn mapping<'a>(
        &self,
        rows: impl Iterator<Item = (&'a String, BTreeSet<&'a String>)>,
    ) -> Result<()> {
        if self.json {
            let rows: BTreeMap<&String, BTreeSet<&String>> = rows.collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            for (source, targets) in rows {
                for target in targets {
                    println!("{}\t{}", source, target);
                }
            }
        }
        Ok(())
    }
}
