//! Protein -> GO term lookup for one organism

use crate::error::Result;
use crate::go::{AnnotationTable, GeneOntology, GoDataSource};
use goxref_common::{Aspect, AspectMap};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// NCBI taxonomy id used when no organism is given (human)
pub const DEFAULT_ORGANISM: u32 = 9606;

/// GO annotations of one organism, with the ontology for term names
#[derive(Debug, Clone)]
pub struct AnnotationIndex {
    organism: u32,
    ontology: Arc<GeneOntology>,
    annotations: AspectMap<AnnotationTable>,
    empty: HashSet<String>,
}

impl AnnotationIndex {
    /// Fetch the annotations of `organism`
    ///
    /// The ontology is loaded from the same source unless one is passed in.
    pub fn load<S: GoDataSource>(
        source: &S,
        organism: u32,
        ontology: Option<Arc<GeneOntology>>,
    ) -> Result<Self> {
        let ontology = match ontology {
            Some(ontology) => ontology,
            None => Arc::new(GeneOntology::load(source)?),
        };

        let annotations = source.go_annotations(organism)?;
        let index = Self::from_tables(organism, ontology, annotations);

        info!(
            organism,
            cellular_component = index.protein_count(Aspect::CellularComponent),
            molecular_function = index.protein_count(Aspect::MolecularFunction),
            biological_process = index.protein_count(Aspect::BiologicalProcess),
            "Loaded GO annotations"
        );

        Ok(index)
    }

    pub fn from_tables(
        organism: u32,
        ontology: Arc<GeneOntology>,
        annotations: AspectMap<AnnotationTable>,
    ) -> Self {
        AnnotationIndex {
            organism,
            ontology,
            annotations,
            empty: HashSet::new(),
        }
    }

    pub fn organism(&self) -> u32 {
        self.organism
    }

    pub fn ontology(&self) -> &Arc<GeneOntology> {
        &self.ontology
    }

    /// Number of proteins with at least one annotation in `aspect`
    pub fn protein_count(&self, aspect: Aspect) -> usize {
        self.annotations[aspect].len()
    }

    pub fn get_name(&self, term: &str) -> Option<&str> {
        self.ontology.get_name(term)
    }

    pub fn get_term(&self, name: &str) -> Option<&str> {
        self.ontology.get_term(name)
    }

    /// Terms annotated to `protein` in one aspect; empty if there are none
    pub fn get_annotations(&self, protein: &str, aspect: Aspect) -> &HashSet<String> {
        self.annotations[aspect].get(protein).unwrap_or(&self.empty)
    }

    /// Like [`get_annotations`](Self::get_annotations), with the aspect given
    /// as a letter or long name in any case (`"c"`, `"P"`,
    /// `"molecular_function"`)
    pub fn get_annotations_by_code(&self, protein: &str, aspect: &str) -> Result<&HashSet<String>> {
        let aspect: Aspect = aspect.parse()?;
        Ok(self.get_annotations(protein, aspect))
    }

    /// Terms annotated to `protein` in any aspect
    pub fn get_all_annotations(&self, protein: &str) -> HashSet<String> {
        Aspect::ALL
            .iter()
            .flat_map(|&aspect| self.get_annotations(protein, aspect))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use crate::go::fixtures::TableSource;
    use goxref_common::Relation;

    fn source() -> TableSource {
        TableSource::default()
            .term(Aspect::CellularComponent, "GO:0005634", "nucleus")
            .term(Aspect::BiologicalProcess, "GO:0006915", "apoptotic process")
            .edge(Aspect::BiologicalProcess, "GO:0006915", Relation::IsA, "GO:0008150")
            .annotation(9606, Aspect::CellularComponent, "P04637", "GO:0005634")
            .annotation(9606, Aspect::BiologicalProcess, "P04637", "GO:0006915")
            .annotation(9606, Aspect::MolecularFunction, "P04637", "GO:0003677")
            .annotation(9606, Aspect::BiologicalProcess, "P01308", "GO:0006006")
            .annotation(10090, Aspect::CellularComponent, "P02340", "GO:0005634")
    }

    #[test]
    fn test_get_annotations() {
        let index = AnnotationIndex::load(&source(), DEFAULT_ORGANISM, None).unwrap();

        assert_eq!(index.organism(), 9606);
        assert!(index
            .get_annotations("P04637", Aspect::CellularComponent)
            .contains("GO:0005634"));
        assert!(index
            .get_annotations("P01308", Aspect::CellularComponent)
            .is_empty());
        assert!(index
            .get_annotations("P02340", Aspect::CellularComponent)
            .is_empty());
        assert_eq!(index.protein_count(Aspect::BiologicalProcess), 2);
    }

    #[test]
    fn test_get_annotations_by_code() {
        let index = AnnotationIndex::load(&source(), DEFAULT_ORGANISM, None).unwrap();

        let lower = index.get_annotations_by_code("P04637", "c").unwrap();
        let upper = index.get_annotations_by_code("P04637", "C").unwrap();
        assert_eq!(lower, upper);
        assert!(index
            .get_annotations_by_code("P04637", "molecular_function")
            .unwrap()
            .contains("GO:0003677"));
        assert!(index.get_annotations_by_code("P04637", "X").is_err());
    }

    #[test]
    fn test_get_all_annotations_is_union() {
        let index = AnnotationIndex::load(&source(), DEFAULT_ORGANISM, None).unwrap();

        let all = index.get_all_annotations("P04637");
        let union: HashSet<String> = Aspect::ALL
            .iter()
            .flat_map(|&aspect| index.get_annotations("P04637", aspect).iter().cloned())
            .collect();
        assert_eq!(all, union);
        assert_eq!(all.len(), 3);
        assert!(index.get_all_annotations("Q00000").is_empty());
    }

    #[test]
    fn test_names_delegate_to_ontology() {
        let index = AnnotationIndex::load(&source(), DEFAULT_ORGANISM, None).unwrap();
        assert_eq!(index.get_name("GO:0005634"), Some("nucleus"));
        assert_eq!(index.get_term("apoptotic process"), Some("GO:0006915"));
    }

    #[test]
    fn test_shared_ontology() {
        let source = source();
        let ontology = Arc::new(GeneOntology::load(&source).unwrap());

        let human = AnnotationIndex::load(&source, 9606, Some(Arc::clone(&ontology))).unwrap();
        let mouse = AnnotationIndex::load(&source, 10090, Some(Arc::clone(&ontology))).unwrap();

        assert!(Arc::ptr_eq(human.ontology(), mouse.ontology()));
        assert!(mouse
            .get_annotations("P02340", Aspect::CellularComponent)
            .contains("GO:0005634"));
    }

    #[test]
    fn test_unknown_organism() {
        let err = AnnotationIndex::load(&source(), 1, None).unwrap_err();
        assert!(matches!(err, IngestError::UnknownOrganism(1)));
    }
}
