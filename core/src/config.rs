//! Search configuration shared by the mutator and the dependency engine.

/// Tunables for the resource-based search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of REST actions in one test sequence.
    pub max_test_size: usize,
    /// Probability of letting the dependency graph guide a structural
    /// mutation instead of a uniform-random edit.
    pub dependency_heuristics_prob: f64,
    /// Below this row count a referenced table forces an insertion instead
    /// of reusing an existing row.
    pub min_rows_per_table: usize,
    /// Probability of selecting an existing row over inserting a fresh one
    /// when both are possible.
    pub select_from_db_prob: f64,
    /// Probability of applying a structural mutation to an individual.
    pub structure_mutation_prob: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_test_size: 30,
            dependency_heuristics_prob: 0.5,
            min_rows_per_table: 10,
            select_from_db_prob: 0.1,
            structure_mutation_prob: 0.5,
        }
    }
}

impl SearchConfig {
    /// Small configuration for unit tests.
    pub fn minimal() -> Self {
        Self {
            max_test_size: 6,
            dependency_heuristics_prob: 1.0,
            min_rows_per_table: 2,
            select_from_db_prob: 0.5,
            structure_mutation_prob: 1.0,
        }
    }
}
