// Copy GO annotations onto the vertices of a protein graph

use crate::error::Result;
use crate::go::GoDataSource;
use crate::progress::{BarProgress, Progress};
use goxref_common::{Aspect, AspectMap};
use petgraph::graph::{Graph, IndexType, NodeIndex};
use petgraph::EdgeType;
use std::collections::HashSet;
use tracing::info;

/// Redraw the annotation progress bar every this many vertices
const PROGRESS_GRANULARITY: u64 = 9;

/// A vertex of a protein graph: the protein identifier and its GO terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProteinNode {
    pub name: String,
    pub go: AspectMap<HashSet<String>>,
}

impl ProteinNode {
    pub fn new(name: impl Into<String>) -> Self {
        ProteinNode {
            name: name.into(),
            go: AspectMap::default(),
        }
    }
}

/// Graph whose vertices carry a protein name and a per-aspect GO slot
///
/// Vertices are addressed by a dense index in `0..vertex_count()`.
pub trait AnnotatableGraph {
    fn vertex_count(&self) -> usize;

    fn vertex_name(&self, index: usize) -> Option<&str>;

    fn go_slot_mut(&mut self, index: usize) -> Option<&mut AspectMap<HashSet<String>>>;
}

impl<E, Ty: EdgeType, Ix: IndexType> AnnotatableGraph for Graph<ProteinNode, E, Ty, Ix> {
    fn vertex_count(&self) -> usize {
        self.node_count()
    }

    fn vertex_name(&self, index: usize) -> Option<&str> {
        self.node_weight(NodeIndex::new(index))
            .map(|node| node.name.as_str())
    }

    fn go_slot_mut(&mut self, index: usize) -> Option<&mut AspectMap<HashSet<String>>> {
        self.node_weight_mut(NodeIndex::new(index))
            .map(|node| &mut node.go)
    }
}

/// Which aspects [`annotate`] copies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectSelection(AspectMap<bool>);

impl AspectSelection {
    pub const ALL: AspectSelection = AspectSelection(AspectMap::new(true, true, true));
    pub const NONE: AspectSelection = AspectSelection(AspectMap::new(false, false, false));

    pub fn contains(&self, aspect: Aspect) -> bool {
        self.0[aspect]
    }

    pub fn iter(&self) -> impl Iterator<Item = Aspect> + '_ {
        Aspect::ALL.into_iter().filter(|&aspect| self.contains(aspect))
    }
}

impl Default for AspectSelection {
    fn default() -> Self {
        AspectSelection::ALL
    }
}

impl From<Aspect> for AspectSelection {
    fn from(aspect: Aspect) -> Self {
        std::iter::once(aspect).collect()
    }
}

impl FromIterator<Aspect> for AspectSelection {
    fn from_iter<I: IntoIterator<Item = Aspect>>(iter: I) -> Self {
        let mut selection = AspectSelection::NONE;
        for aspect in iter {
            selection.0[aspect] = true;
        }
        selection
    }
}

impl<const N: usize> From<[Aspect; N]> for AspectSelection {
    fn from(aspects: [Aspect; N]) -> Self {
        aspects.into_iter().collect()
    }
}

impl From<&[Aspect]> for AspectSelection {
    fn from(aspects: &[Aspect]) -> Self {
        aspects.iter().copied().collect()
    }
}

impl From<Vec<Aspect>> for AspectSelection {
    fn from(aspects: Vec<Aspect>) -> Self {
        aspects.into_iter().collect()
    }
}

impl From<HashSet<Aspect>> for AspectSelection {
    fn from(aspects: HashSet<Aspect>) -> Self {
        aspects.into_iter().collect()
    }
}

/// Set the GO slot of every vertex from the annotations of `organism`
///
/// Slots are reset to empty sets first; only the selected aspects are
/// filled in. Draws a progress bar over the vertices.
pub fn annotate<G, S>(
    graph: &mut G,
    source: &S,
    organism: u32,
    aspects: impl Into<AspectSelection>,
) -> Result<()>
where
    G: AnnotatableGraph + ?Sized,
    S: GoDataSource + ?Sized,
{
    let mut progress = BarProgress::new(
        graph.vertex_count() as u64,
        "Loading GO annotations",
        PROGRESS_GRANULARITY,
    );
    annotate_with_progress(graph, source, organism, aspects, &mut progress)
}

/// [`annotate`] reporting to a caller supplied [`Progress`]
pub fn annotate_with_progress<G, S>(
    graph: &mut G,
    source: &S,
    organism: u32,
    aspects: impl Into<AspectSelection>,
    progress: &mut dyn Progress,
) -> Result<()>
where
    G: AnnotatableGraph + ?Sized,
    S: GoDataSource + ?Sized,
{
    let aspects = aspects.into();

    for index in 0..graph.vertex_count() {
        if let Some(slot) = graph.go_slot_mut(index) {
            *slot = AspectMap::default();
        }
    }

    let tables = source.go_annotations(organism)?;
    let mut annotated = 0usize;

    for index in 0..graph.vertex_count() {
        let terms: Vec<(Aspect, HashSet<String>)> = match graph.vertex_name(index) {
            Some(name) => aspects
                .iter()
                .filter_map(|aspect| tables[aspect].get(name).map(|terms| (aspect, terms.clone())))
                .collect(),
            None => Vec::new(),
        };

        if !terms.is_empty() {
            annotated += 1;
        }

        if let Some(slot) = graph.go_slot_mut(index) {
            for (aspect, terms) in terms {
                slot[aspect] = terms;
            }
        }

        progress.step();
    }

    progress.terminate();
    info!(
        organism,
        vertices = graph.vertex_count(),
        annotated,
        "Annotated graph with GO terms"
    );

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::go::fixtures::TableSource;
    use crate::progress::CountingProgress;
    use petgraph::graph::UnGraph;

    fn graph() -> UnGraph<ProteinNode, ()> {
        let mut graph = UnGraph::new_undirected();
        let p1 = graph.add_node(ProteinNode::new("P1"));
        let p2 = graph.add_node(ProteinNode::new("P2"));
        graph.add_edge(p1, p2, ());
        graph
    }

    fn source() -> TableSource {
        TableSource::default()
            .annotation(9606, Aspect::CellularComponent, "P1", "GO:1")
            .annotation(9606, Aspect::BiologicalProcess, "P1", "GO:2")
            .annotation(9606, Aspect::MolecularFunction, "P2", "GO:3")
    }

    #[test]
    fn test_annotate_single_aspect() {
        let mut graph = graph();
        let source = TableSource::default().annotation(9606, Aspect::CellularComponent, "P1", "GO:1");
        let mut progress = CountingProgress::default();

        annotate_with_progress(&mut graph, &source, 9606, Aspect::CellularComponent, &mut progress)
            .unwrap();

        let p1 = &graph[NodeIndex::new(0)].go;
        let p2 = &graph[NodeIndex::new(1)].go;
        assert_eq!(p1[Aspect::CellularComponent], HashSet::from(["GO:1".to_string()]));
        assert!(p1[Aspect::MolecularFunction].is_empty());
        assert!(p1[Aspect::BiologicalProcess].is_empty());
        assert_eq!(p2, &AspectMap::default());

        assert_eq!(
            progress,
            CountingProgress {
                steps: 2,
                terminated: true
            }
        );
    }

    #[test]
    fn test_annotate_selected_aspects_only() {
        let mut graph = graph();
        annotate_with_progress(
            &mut graph,
            &source(),
            9606,
            [Aspect::BiologicalProcess, Aspect::MolecularFunction],
            &mut CountingProgress::default(),
        )
        .unwrap();

        let p1 = &graph[NodeIndex::new(0)].go;
        assert!(p1[Aspect::CellularComponent].is_empty());
        assert!(p1[Aspect::BiologicalProcess].contains("GO:2"));
        assert!(graph[NodeIndex::new(1)].go[Aspect::MolecularFunction].contains("GO:3"));
    }

    #[test]
    fn test_annotate_resets_stale_slots() {
        let mut graph = graph();
        graph[NodeIndex::new(1)].go[Aspect::CellularComponent].insert("GO:stale".to_string());

        annotate_with_progress(
            &mut graph,
            &source(),
            9606,
            AspectSelection::ALL,
            &mut CountingProgress::default(),
        )
        .unwrap();

        assert!(graph[NodeIndex::new(1)].go[Aspect::CellularComponent].is_empty());
        assert_eq!(graph[NodeIndex::new(0)].go[Aspect::BiologicalProcess].len(), 1);
    }

    #[test]
    fn test_annotate_unknown_organism() {
        let mut graph = graph();
        let result = annotate_with_progress(
            &mut graph,
            &source(),
            10090,
            AspectSelection::ALL,
            &mut CountingProgress::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_aspect_selection_conversions() {
        assert_eq!(AspectSelection::default(), AspectSelection::ALL);
        assert_eq!(AspectSelection::from(Aspect::ALL), AspectSelection::ALL);

        let selection = AspectSelection::from(vec![Aspect::CellularComponent]);
        assert!(selection.contains(Aspect::CellularComponent));
        assert!(!selection.contains(Aspect::BiologicalProcess));
        assert_eq!(selection.iter().count(), 1);
        assert_eq!(AspectSelection::from(HashSet::<Aspect>::new()), AspectSelection::NONE);
    }
}
