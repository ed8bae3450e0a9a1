//! Command line definition of the `goxref` binary

use crate::go::DEFAULT_ORGANISM;
use clap::{Parser, Subcommand};
use goxref_common::{Aspect, RelationSet};

/// goxref - Gene Ontology and UniChem lookups
#[derive(Parser, Debug)]
#[command(name = "goxref")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Always download, bypassing the download cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Hide download progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// All ancestors of one or more GO terms
    Ancestors {
        /// GO term accessions (e.g. GO:0006915)
        #[arg(required = true)]
        terms: Vec<String>,

        /// Relation kinds to follow, comma separated, or "all"
        #[arg(short, long, default_value = "all")]
        relations: RelationSet,
    },

    /// All descendants of one or more GO terms
    Descendants {
        /// GO term accessions
        #[arg(required = true)]
        terms: Vec<String>,

        /// Relation kinds to follow, comma separated, or "all"
        #[arg(short, long, default_value = "all")]
        relations: RelationSet,
    },

    /// Name of a GO term
    Name {
        /// GO term accession
        term: String,
    },

    /// GO term accession of a term name
    Term {
        /// Exact term name
        name: String,
    },

    /// GO annotations of a protein
    Annotations {
        /// Protein identifier as used by GOA (UniProt accession)
        protein: String,

        /// Only this aspect: C, F, P or the namespace name
        #[arg(short, long)]
        aspect: Option<Aspect>,

        /// NCBI taxonomy id of the organism
        #[arg(short, long, env = "GOXREF_ORGANISM", default_value_t = DEFAULT_ORGANISM)]
        organism: u32,
    },

    /// List UniChem ID types
    UnichemSources,

    /// Compound id mapping between two UniChem ID types
    UnichemMap {
        /// Source ID type (numeric id or label)
        from: String,

        /// Target ID type (numeric id or label)
        to: String,

        /// Print at most this many source compounds
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete every file in the download cache
    ClearCache,
}
