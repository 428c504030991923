//! Structural mutation of resource test sequences, biased by the inferred
//! dependency graph, plus regeneration of the database actions a mutated
//! sequence needs.

mod dbgen;
mod mutator;

pub use dbgen::regenerate_db_actions;
pub use mutator::{MutationType, StructureMutator};
