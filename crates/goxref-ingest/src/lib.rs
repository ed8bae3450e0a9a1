//! goxref Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Retrieves and cross-references biological reference data.
//!
//! # Supported Data Sources
//!
//! - **Gene Ontology**: terms and relations from the GO release, per-organism
//!   annotations from GOA
//! - **UniChem**: compound identifier mappings between chemistry databases
//!
//! # Example
//!
//! ```no_run
//! use goxref_common::RelationSet;
//! use goxref_ingest::config::SourceConfig;
//! use goxref_ingest::fetch::HttpFetcher;
//! use goxref_ingest::go::{GeneOntology, GoClient};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = SourceConfig::from_env();
//!     let client = GoClient::new(HttpFetcher::new(config.clone())?, config);
//!
//!     let go = GeneOntology::load(&client)?;
//!     let ancestors = go.all_ancestors(["GO:0006915"], RelationSet::ALL);
//!     println!("{} ancestors", ancestors.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod go;
pub mod progress;
pub mod unichem;

pub use config::SourceConfig;
pub use error::{IngestError, Result};
pub use fetch::{Fetcher, HttpFetcher, StaticFetcher};
pub use go::{AnnotationIndex, GeneOntology, GoClient, GoDataSource};
pub use unichem::UniChemClient;
