//! Gene Ontology relation graph
//!
//! Holds the names of all terms and two adjacency tables, one pointing up
//! (term -> direct ancestors) and one pointing down (term -> direct
//! descendants). The per-aspect tables coming from a [`GoDataSource`] are
//! merged into a single namespace on construction; GO accessions are unique
//! across aspects.
//!
//! ```
//! use goxref_common::{Aspect, AspectMap, Relation, RelationSet};
//! use goxref_ingest::go::{Direction, GeneOntology, RelationTable};
//! use std::collections::HashMap;
//!
//! let mut up = RelationTable::new();
//! up.entry("GO:2".into()).or_default().insert(("GO:1".into(), Relation::IsA));
//! let mut down = RelationTable::new();
//! down.entry("GO:1".into()).or_default().insert(("GO:2".into(), Relation::IsA));
//!
//! let names = AspectMap::new(HashMap::new(), HashMap::new(), HashMap::new());
//! let go = GeneOntology::from_tables(
//!     names,
//!     AspectMap::new(RelationTable::new(), RelationTable::new(), up),
//!     AspectMap::new(RelationTable::new(), RelationTable::new(), down),
//! );
//!
//! assert!(go.all_ancestors(["GO:2"], RelationSet::ALL).contains("GO:1"));
//! assert!(go.transitive_closure(Direction::Descendants, ["GO:2"], RelationSet::ALL).is_empty());
//! ```

use crate::error::{IngestError, Result};
use crate::go::{GoDataSource, RelationTable, TermNames};
use goxref_common::{AspectMap, RelationSet};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Which adjacency a traversal follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards more general terms
    Ancestors,
    /// Towards more specific terms
    Descendants,
}

impl FromStr for Direction {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ancestors" => Ok(Direction::Ancestors),
            "descendants" => Ok(Direction::Descendants),
            _ => Err(IngestError::validation(format!("Unknown direction: {}", s))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ancestors => write!(f, "ancestors"),
            Direction::Descendants => write!(f, "descendants"),
        }
    }
}

/// Gene Ontology terms and relations, immutable after construction
#[derive(Debug, Clone, Default)]
pub struct GeneOntology {
    /// accession -> name
    name: HashMap<String, String>,
    /// name -> accession
    term: HashMap<String, String>,
    ancestors: RelationTable,
    descendants: RelationTable,
}

impl GeneOntology {
    /// Load names and both adjacency tables from a data source
    pub fn load(source: &impl GoDataSource) -> Result<Self> {
        let names = source.go_terms()?;
        let ancestors = source.go_ancestors()?;
        let descendants = source.go_descendants()?;

        let ontology = Self::from_tables(names, ancestors, descendants);
        info!(
            terms = ontology.name.len(),
            with_ancestors = ontology.ancestors.len(),
            with_descendants = ontology.descendants.len(),
            "Loaded Gene Ontology"
        );

        Ok(ontology)
    }

    /// Build from already fetched per-aspect tables
    pub fn from_tables(
        names: TermNames,
        ancestors: AspectMap<RelationTable>,
        descendants: AspectMap<RelationTable>,
    ) -> Self {
        let name: HashMap<String, String> = names
            .into_iter()
            .flat_map(|(_, per_aspect)| per_aspect)
            .collect();

        // On a name collision the last accession seen wins
        let term = name
            .iter()
            .map(|(accession, name)| (name.clone(), accession.clone()))
            .collect();

        GeneOntology {
            name,
            term,
            ancestors: merge_aspects(ancestors),
            descendants: merge_aspects(descendants),
        }
    }

    /// Name of a GO term
    pub fn get_name(&self, term: &str) -> Option<&str> {
        self.name.get(term).map(String::as_str)
    }

    /// GO accession of a term name
    pub fn get_term(&self, name: &str) -> Option<&str> {
        self.term.get(name).map(String::as_str)
    }

    pub fn term_count(&self) -> usize {
        self.name.len()
    }

    fn adjacency(&self, direction: Direction) -> &RelationTable {
        match direction {
            Direction::Ancestors => &self.ancestors,
            Direction::Descendants => &self.descendants,
        }
    }

    /// All terms reachable from `terms` in `direction` over `relations`
    ///
    /// Seed terms are only part of the result when another seed (or a cycle)
    /// leads back to them. Unknown terms have no edges. A term enters the
    /// result before its own edges are expanded, so cycles terminate.
    pub fn transitive_closure<I>(
        &self,
        direction: Direction,
        terms: I,
        relations: RelationSet,
    ) -> HashSet<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let graph = self.adjacency(direction);
        let mut subgraph: HashSet<String> = HashSet::new();

        if relations.is_empty() {
            return subgraph;
        }

        let mut stack: Vec<&str> = Vec::new();
        for term in terms {
            stack.push(match graph.get_key_value(term.as_ref()) {
                Some((key, _)) => key.as_str(),
                None => continue,
            });

            while let Some(current) = stack.pop() {
                let Some(edges) = graph.get(current) else {
                    continue;
                };

                for (related, relation) in edges {
                    if relations.contains(*relation) && subgraph.insert(related.clone()) {
                        stack.push(related.as_str());
                    }
                }
            }
        }

        debug!(%direction, size = subgraph.len(), "Computed GO subgraph");
        subgraph
    }

    /// All ancestors of one or more terms
    pub fn all_ancestors<I>(&self, terms: I, relations: RelationSet) -> HashSet<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.transitive_closure(Direction::Ancestors, terms, relations)
    }

    /// All descendants of one or more terms
    pub fn all_descendants<I>(&self, terms: I, relations: RelationSet) -> HashSet<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.transitive_closure(Direction::Descendants, terms, relations)
    }
}

/// Fold the cellular component and molecular function tables into the
/// biological process table; keys present in more than one extend the set
fn merge_aspects(tables: AspectMap<RelationTable>) -> RelationTable {
    let (cellular_component, molecular_function, mut merged) = tables.into_parts();

    for table in [cellular_component, molecular_function] {
        for (term, edges) in table {
            merged.entry(term).or_default().extend(edges);
        }
    }

    merged
}

// ============================================================================
// Tests
// ============================================================================
