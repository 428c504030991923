//! Dependency inference engine.
//!
//! Maintains probabilistic relations between resources (and between
//! resources and tables) from three evidence sources: shared table
//! bindings, textual similarity between POST payload definitions, and
//! fitness deltas observed after structural mutations. Relations only ever
//! strengthen; pairs shown to have no fitness interaction land in an
//! uncorrelated side-set.

mod compare;
mod detect;
mod error;
mod graph;
mod init;
mod relation;
mod update;

pub use compare::{compare_fitness, fitness_changed, fitness_of_call};
pub use detect::detect_after_structure_mutation;
pub use error::{DependencyError, DependencyResult};
pub use graph::DependencyGraph;
pub use init::{init_shared_table_relations, init_textual_relations, DERIVED_PROBABILITY};
pub use relation::{Relation, RelationKind};
pub use update::{update_resource_tables, CONFIRMED_PROBABILITY};
