//! Shared Gene Ontology domain types
//!
//! - [`Aspect`]: the three GO sub-ontologies
//! - [`AspectMap`]: fixed-size storage with one slot per aspect
//! - [`Relation`]: the relation kinds followed by ontology traversals
//! - [`RelationSet`]: an immutable set of relation kinds

use crate::error::GoxrefError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

// ============================================================================
// Aspect
// ============================================================================

/// GO aspect (sub-ontology)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    CellularComponent,
    MolecularFunction,
    BiologicalProcess,
}

impl Aspect {
    /// All aspects in `C`, `F`, `P` order
    pub const ALL: [Aspect; 3] = [
        Aspect::CellularComponent,
        Aspect::MolecularFunction,
        Aspect::BiologicalProcess,
    ];

    /// One-letter code used by GAF files (`C`, `F` or `P`)
    pub fn code(self) -> char {
        match self {
            Aspect::CellularComponent => 'C',
            Aspect::MolecularFunction => 'F',
            Aspect::BiologicalProcess => 'P',
        }
    }

    /// OBO namespace name
    pub fn as_str(self) -> &'static str {
        match self {
            Aspect::CellularComponent => "cellular_component",
            Aspect::MolecularFunction => "molecular_function",
            Aspect::BiologicalProcess => "biological_process",
        }
    }

    fn slot(self) -> usize {
        match self {
            Aspect::CellularComponent => 0,
            Aspect::MolecularFunction => 1,
            Aspect::BiologicalProcess => 2,
        }
    }
}

impl FromStr for Aspect {
    type Err = GoxrefError;

    /// Accepts the one-letter code or the namespace name, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "cellular_component" => Ok(Aspect::CellularComponent),
            "f" | "molecular_function" => Ok(Aspect::MolecularFunction),
            "p" | "biological_process" => Ok(Aspect::BiologicalProcess),
            _ => Err(GoxrefError::UnknownAspect(s.to_string())),
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// AspectMap
// ============================================================================

/// One value per aspect, indexed by [`Aspect`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectMap<T> {
    slots: [T; 3],
}

impl<T> AspectMap<T> {
    /// Build from the cellular component, molecular function and
    /// biological process values
    pub const fn new(cellular_component: T, molecular_function: T, biological_process: T) -> Self {
        Self {
            slots: [cellular_component, molecular_function, biological_process],
        }
    }

    pub fn from_fn(mut f: impl FnMut(Aspect) -> T) -> Self {
        Self::new(
            f(Aspect::CellularComponent),
            f(Aspect::MolecularFunction),
            f(Aspect::BiologicalProcess),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (Aspect, &T)> {
        Aspect::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn map<U>(self, mut f: impl FnMut(Aspect, T) -> U) -> AspectMap<U> {
        let [c, mf, p] = self.slots;
        AspectMap::new(
            f(Aspect::CellularComponent, c),
            f(Aspect::MolecularFunction, mf),
            f(Aspect::BiologicalProcess, p),
        )
    }

    /// Split into the three values in `C`, `F`, `P` order
    pub fn into_parts(self) -> (T, T, T) {
        let [c, f, p] = self.slots;
        (c, f, p)
    }
}

impl<T> Index<Aspect> for AspectMap<T> {
    type Output = T;

    fn index(&self, aspect: Aspect) -> &T {
        &self.slots[aspect.slot()]
    }
}

impl<T> IndexMut<Aspect> for AspectMap<T> {
    fn index_mut(&mut self, aspect: Aspect) -> &mut T {
        &mut self.slots[aspect.slot()]
    }
}

impl<T> IntoIterator for AspectMap<T> {
    type Item = (Aspect, T);
    type IntoIter = std::iter::Zip<std::array::IntoIter<Aspect, 3>, std::array::IntoIter<T, 3>>;

    fn into_iter(self) -> Self::IntoIter {
        Aspect::ALL.into_iter().zip(self.slots)
    }
}

// ============================================================================
// Relation
// ============================================================================

/// Relation kinds between GO terms that ontology traversals follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    IsA,
    PartOf,
    OccursIn,
    Regulates,
    PositivelyRegulates,
    NegativelyRegulates,
}

impl Relation {
    pub const ALL: [Relation; 6] = [
        Relation::IsA,
        Relation::PartOf,
        Relation::OccursIn,
        Relation::Regulates,
        Relation::PositivelyRegulates,
        Relation::NegativelyRegulates,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::IsA => "is_a",
            Relation::PartOf => "part_of",
            Relation::OccursIn => "occurs_in",
            Relation::Regulates => "regulates",
            Relation::PositivelyRegulates => "positively_regulates",
            Relation::NegativelyRegulates => "negatively_regulates",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl FromStr for Relation {
    type Err = GoxrefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "is_a" => Ok(Relation::IsA),
            "part_of" => Ok(Relation::PartOf),
            "occurs_in" => Ok(Relation::OccursIn),
            "regulates" => Ok(Relation::Regulates),
            "positively_regulates" => Ok(Relation::PositivelyRegulates),
            "negatively_regulates" => Ok(Relation::NegativelyRegulates),
            _ => Err(GoxrefError::UnknownRelation(s.to_string())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RelationSet
// ============================================================================

/// Immutable set of relation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RelationSet(u8);

impl RelationSet {
    pub const EMPTY: RelationSet = RelationSet(0);
    pub const ALL: RelationSet = RelationSet::of(&Relation::ALL);

    pub const fn of(relations: &[Relation]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < relations.len() {
            bits |= relations[i].bit();
            i += 1;
        }
        RelationSet(bits)
    }

    /// A copy of this set that also contains `relation`
    pub const fn with(self, relation: Relation) -> Self {
        RelationSet(self.0 | relation.bit())
    }

    pub const fn contains(self, relation: Relation) -> bool {
        self.0 & relation.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Relation> {
        Relation::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl FromIterator<Relation> for RelationSet {
    fn from_iter<I: IntoIterator<Item = Relation>>(iter: I) -> Self {
        iter.into_iter().fold(RelationSet::EMPTY, RelationSet::with)
    }
}

impl FromStr for RelationSet {
    type Err = GoxrefError;

    /// Comma separated relation names, or `all`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RelationSet::ALL);
        }

        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Relation::from_str)
            .collect()
    }
}

impl fmt::Display for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Relation::as_str).collect();
        write!(f, "{}", names.join(","))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_aspect_from_str_is_case_insensitive() {
        assert_eq!("c".parse::<Aspect>().unwrap(), Aspect::CellularComponent);
        assert_eq!("F".parse::<Aspect>().unwrap(), Aspect::MolecularFunction);
        assert_eq!("p".parse::<Aspect>().unwrap(), Aspect::BiologicalProcess);
        assert_eq!(
            "Biological_Process".parse::<Aspect>().unwrap(),
            Aspect::BiologicalProcess
        );
        assert!("X".parse::<Aspect>().is_err());
    }

    #[test]
    fn test_aspect_map_indexing() {
        let mut map: AspectMap<Vec<&str>> = AspectMap::default();
        map[Aspect::MolecularFunction].push("GO:0003674");

        assert!(map[Aspect::CellularComponent].is_empty());
        assert_eq!(map[Aspect::MolecularFunction], vec!["GO:0003674"]);

        let codes: Vec<char> = map.iter().map(|(aspect, _)| aspect.code()).collect();
        assert_eq!(codes, vec!['C', 'F', 'P']);
    }

    #[test]
    fn test_aspect_map_map_keeps_slots() {
        let lengths = AspectMap::new("a", "bb", "ccc").map(|_, s| s.len());
        assert_eq!(lengths.into_parts(), (1, 2, 3));
    }

    #[test]
    fn test_relation_from_str() {
        assert_eq!("is_a".parse::<Relation>().unwrap(), Relation::IsA);
        assert_eq!("occurs_in".parse::<Relation>().unwrap(), Relation::OccursIn);
        assert!("has_part".parse::<Relation>().is_err());
    }

    #[test]
    fn test_relation_set_constants() {
        assert_eq!(RelationSet::ALL.len(), 6);
        assert!(RelationSet::EMPTY.is_empty());
        for relation in Relation::ALL {
            assert!(RelationSet::ALL.contains(relation));
            assert!(!RelationSet::EMPTY.contains(relation));
        }
    }

    #[test]
    fn test_relation_set_from_str() {
        let set: RelationSet = "is_a, part_of".parse().unwrap();
        assert_eq!(set, RelationSet::of(&[Relation::IsA, Relation::PartOf]));
        assert_eq!("all".parse::<RelationSet>().unwrap(), RelationSet::ALL);
        assert_eq!("".parse::<RelationSet>().unwrap(), RelationSet::EMPTY);
        assert!("is_a,bogus".parse::<RelationSet>().is_err());
        assert_eq!(set.to_string(), "is_a,part_of");
    }

    proptest! {
        #[test]
        fn prop_relation_set_membership(mask in 0u8..64) {
            let chosen: Vec<Relation> = Relation::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, r)| r)
                .collect();
            let set = RelationSet::of(&chosen);

            prop_assert_eq!(set.len(), chosen.len());
            for relation in Relation::ALL {
                prop_assert_eq!(set.contains(relation), chosen.contains(&relation));
            }
        }
    }
}
