//! goxref Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the goxref workspace.
//!
//! # Overview
//!
//! - **Types**: Gene Ontology aspects, relation kinds and per-aspect storage
//! - **Error Handling**: Common error and result types
//! - **Checksums**: Content digests used to name download cache entries
//! - **Logging**: Centralized `tracing` subscriber setup
//!
//! # Example
//!
//! ```
//! use goxref_common::types::{Aspect, AspectMap, Relation, RelationSet};
//!
//! let mut counts: AspectMap<usize> = AspectMap::default();
//! counts[Aspect::BiologicalProcess] += 1;
//! assert_eq!(counts[Aspect::BiologicalProcess], 1);
//!
//! let structural = RelationSet::of(&[Relation::IsA, Relation::PartOf]);
//! assert!(structural.contains(Relation::PartOf));
//! assert!(!structural.contains(Relation::Regulates));
//! ```

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{GoxrefError, Result};
pub use types::{Aspect, AspectMap, Relation, RelationSet};
