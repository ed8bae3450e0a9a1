// Gene Ontology Module
//
// Loads GO terms, their relations and per-organism GOA annotations, and
// answers lookups over them:
// - Client: downloads the OBO ontology and GAF annotation files
// - Ontology: merged relation graph with transitive closure queries
// - Annotation: protein -> GO terms index for one organism
// - Annotate: copies annotations onto the vertices of a protein graph
//
// Data sources:
// - GO Ontology: http://purl.obolibrary.org/obo/go/go-basic.obo (~30MB)
// - GOA Annotations: https://ftp.ebi.ac.uk/pub/databases/GO/goa/{ORG}/goa_{org}.gaf.gz

pub mod annotate;
pub mod annotation;
pub mod client;
pub mod gaf;
pub mod obo;
pub mod ontology;

pub use annotate::{annotate, annotate_with_progress, AnnotatableGraph, AspectSelection, ProteinNode};
pub use annotation::{AnnotationIndex, DEFAULT_ORGANISM};
pub use client::{goa_organism_name, GoClient};
pub use gaf::GafParser;
pub use obo::{OboParser, ParsedObo};
pub use ontology::{Direction, GeneOntology};

use crate::error::Result;
use goxref_common::{AspectMap, Relation};
use std::collections::{HashMap, HashSet};

/// Term -> directly related terms, each with the relation kind
pub type RelationTable = HashMap<String, HashSet<(String, Relation)>>;

/// Protein identifier -> GO term accessions
pub type AnnotationTable = HashMap<String, HashSet<String>>;

/// Term names per aspect: accession -> name
pub type TermNames = AspectMap<HashMap<String, String>>;

/// Where ontology and annotation tables come from
pub trait GoDataSource {
    /// Term names, partitioned by aspect
    fn go_terms(&self) -> Result<TermNames>;

    /// Direct parents of every term, partitioned by aspect
    fn go_ancestors(&self) -> Result<AspectMap<RelationTable>>;

    /// Direct children of every term, partitioned by aspect
    fn go_descendants(&self) -> Result<AspectMap<RelationTable>>;

    /// Annotations of one organism (NCBI taxonomy id), partitioned by aspect
    fn go_annotations(&self, organism: u32) -> Result<AspectMap<AnnotationTable>>;
}

impl<T: GoDataSource + ?Sized> GoDataSource for &T {
    fn go_terms(&self) -> Result<TermNames> {
        (**self).go_terms()
    }

    fn go_ancestors(&self) -> Result<AspectMap<RelationTable>> {
        (**self).go_ancestors()
    }

    fn go_descendants(&self) -> Result<AspectMap<RelationTable>> {
        (**self).go_descendants()
    }

    fn go_annotations(&self, organism: u32) -> Result<AspectMap<AnnotationTable>> {
        (**self).go_annotations(organism)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::error::IngestError;
    use goxref_common::Aspect;

    /// In-memory data source built edge by edge
    #[derive(Default, Clone)]
    pub(crate) struct TableSource {
        pub names: TermNames,
        pub ancestors: AspectMap<RelationTable>,
        pub descendants: AspectMap<RelationTable>,
        pub annotations: HashMap<u32, AspectMap<AnnotationTable>>,
    }

    impl TableSource {
        pub fn term(mut self, aspect: Aspect, id: &str, name: &str) -> Self {
            self.names[aspect].insert(id.to_string(), name.to_string());
            self
        }

        /// `child -[relation]-> parent`, filed under `aspect` in both tables
        pub fn edge(mut self, aspect: Aspect, child: &str, relation: Relation, parent: &str) -> Self {
            self.ancestors[aspect]
                .entry(child.to_string())
                .or_default()
                .insert((parent.to_string(), relation));
            self.descendants[aspect]
                .entry(parent.to_string())
                .or_default()
                .insert((child.to_string(), relation));
            self
        }

        pub fn annotation(mut self, organism: u32, aspect: Aspect, protein: &str, term: &str) -> Self {
            self.annotations.entry(organism).or_default()[aspect]
                .entry(protein.to_string())
                .or_default()
                .insert(term.to_string());
            self
        }
    }

    impl GoDataSource for TableSource {
        fn go_terms(&self) -> Result<TermNames> {
            Ok(self.names.clone())
        }

        fn go_ancestors(&self) -> Result<AspectMap<RelationTable>> {
            Ok(self.ancestors.clone())
        }

        fn go_descendants(&self) -> Result<AspectMap<RelationTable>> {
            Ok(self.descendants.clone())
        }

        fn go_annotations(&self, organism: u32) -> Result<AspectMap<AnnotationTable>> {
            self.annotations
                .get(&organism)
                .cloned()
                .ok_or(IngestError::UnknownOrganism(organism))
        }
    }
}
