// OBO ontology parser: term names and direct relations per aspect

use crate::error::Result;
use crate::go::RelationTable;
use goxref_common::{Aspect, AspectMap, Relation};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// A direct relation read from a term stanza: `child -[relation]-> parent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OboEdge {
    pub child: String,
    pub parent: String,
    pub relation: Relation,
}

/// A `[Term]` stanza reduced to what the ontology graph needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OboTerm {
    pub id: String,
    pub name: String,
    pub aspect: Aspect,
    pub is_obsolete: bool,
}

/// Parsed ontology, still flat
#[derive(Debug, Default)]
pub struct ParsedObo {
    pub terms: Vec<OboTerm>,
    pub edges: Vec<OboEdge>,
}

impl ParsedObo {
    /// Term names partitioned by aspect
    pub fn names(&self) -> AspectMap<HashMap<String, String>> {
        let mut names: AspectMap<HashMap<String, String>> = AspectMap::default();
        for term in &self.terms {
            names[term.aspect].insert(term.id.clone(), term.name.clone());
        }
        names
    }

    /// Terms flagged `is_obsolete: true`; they stay in the name tables
    pub fn obsolete_count(&self) -> usize {
        self.terms.iter().filter(|term| term.is_obsolete).count()
    }

    /// `child -> {(parent, relation)}`, partitioned by the child's aspect
    pub fn ancestors(&self) -> AspectMap<RelationTable> {
        self.adjacency(|edge| (&edge.child, &edge.parent))
    }

    /// `parent -> {(child, relation)}`, partitioned by the parent's aspect
    pub fn descendants(&self) -> AspectMap<RelationTable> {
        self.adjacency(|edge| (&edge.parent, &edge.child))
    }

    fn adjacency<'a>(
        &'a self,
        orient: impl Fn(&'a OboEdge) -> (&'a String, &'a String),
    ) -> AspectMap<RelationTable> {
        let aspects: HashMap<&str, Aspect> = self
            .terms
            .iter()
            .map(|term| (term.id.as_str(), term.aspect))
            .collect();

        let mut tables: AspectMap<RelationTable> = AspectMap::default();
        let mut dangling = 0usize;

        for edge in &self.edges {
            let (from, to) = orient(edge);
            let Some(&aspect) = aspects.get(from.as_str()) else {
                dangling += 1;
                continue;
            };
            tables[aspect]
                .entry(from.clone())
                .or_default()
                .insert((to.clone(), edge.relation));
        }

        if dangling > 0 {
            debug!(dangling, "Skipped relations whose source term has no stanza");
        }

        tables
    }
}

pub struct OboParser;

impl OboParser {
    /// Parse an OBO document
    ///
    /// Only `[Term]` stanzas are read. Stanzas without an id, name or
    /// namespace are skipped with a warning; relation kinds other than the
    /// six supported ones are ignored.
    pub fn parse(content: &str) -> Result<ParsedObo> {
        let mut parsed = ParsedObo::default();
        let mut stanza: Option<StanzaBuilder> = None;
        let mut skipped = 0usize;

        for line in content.lines() {
            let line = line.trim();

            if line.starts_with('[') {
                if let Some(done) = stanza.take() {
                    skipped += usize::from(!done.finish_into(&mut parsed));
                }
                if line == "[Term]" {
                    stanza = Some(StanzaBuilder::default());
                }
                continue;
            }

            let Some(builder) = stanza.as_mut() else {
                continue;
            };

            if line.is_empty() || line.starts_with('!') {
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                builder.field(key.trim(), value.trim());
            }
        }

        if let Some(done) = stanza.take() {
            skipped += usize::from(!done.finish_into(&mut parsed));
        }

        info!(
            terms = parsed.terms.len(),
            relations = parsed.edges.len(),
            obsolete = parsed.obsolete_count(),
            skipped,
            "Parsed GO ontology"
        );

        Ok(parsed)
    }
}

#[derive(Default)]
struct StanzaBuilder {
    id: Option<String>,
    name: Option<String>,
    namespace: Option<String>,
    is_obsolete: bool,
    parents: Vec<(String, Relation)>,
}

impl StanzaBuilder {
    fn field(&mut self, key: &str, value: &str) {
        match key {
            "id" => self.id = Some(value.to_string()),
            "name" => self.name = Some(value.to_string()),
            "namespace" => self.namespace = Some(value.to_string()),
            "is_obsolete" => self.is_obsolete = value == "true",
            "is_a" => {
                // "GO:0008150 ! biological_process"
                if let Some(parent) = value.split_whitespace().next() {
                    self.parents.push((parent.to_string(), Relation::IsA));
                }
            },
            "relationship" => {
                // "part_of GO:0008150 ! biological_process"
                let mut parts = value.split_whitespace();
                let (Some(kind), Some(parent)) = (parts.next(), parts.next()) else {
                    return;
                };
                match kind.parse::<Relation>() {
                    Ok(relation) => self.parents.push((parent.to_string(), relation)),
                    Err(_) => debug!(kind, "Ignoring unsupported relation kind"),
                }
            },
            _ => {},
        }
    }

    /// Push the finished stanza; false if it was incomplete
    fn finish_into(self, parsed: &mut ParsedObo) -> bool {
        let (Some(id), Some(name), Some(namespace)) = (self.id, self.name, self.namespace) else {
            warn!("Skipping GO term stanza without id, name or namespace");
            return false;
        };

        let aspect = match namespace.parse::<Aspect>() {
            Ok(aspect) => aspect,
            Err(_) => {
                warn!(term = %id, namespace = %namespace, "Skipping GO term with unknown namespace");
                return false;
            },
        };

        parsed
            .edges
            .extend(self.parents.into_iter().map(|(parent, relation)| OboEdge {
                child: id.clone(),
                parent,
                relation,
            }));
        parsed.terms.push(OboTerm {
            id,
            name,
            aspect,
            is_obsolete: self.is_obsolete,
        });

        true
    }
}

// ============================================================================
// Tests
// ============================================================================
