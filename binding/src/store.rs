//! Ownership of all per-resource binding records.

use std::collections::HashMap;

use crate::matched::ResourceToTable;

/// All binding records of one search run, keyed by resource key. Owned and
/// passed explicitly; there is no ambient shared state.
#[derive(Debug, Clone, Default)]
pub struct BindingStore {
    records: HashMap<String, ResourceToTable>,
}

impl BindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, resource: &str) -> &mut ResourceToTable {
        self.records.entry(resource.to_string()).or_default()
    }

    pub fn get(&self, resource: &str) -> Option<&ResourceToTable> {
        self.records.get(resource)
    }

    pub fn resources(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    /// Keys of every resource whose record associates it with `table`,
    /// sorted for deterministic grouping.
    pub fn resources_bound_to(&self, table: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .records
            .iter()
            .filter(|(_, record)| record.is_bound_to(table))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Every table any record mentions, deduplicated and sorted.
    pub fn known_tables(&self) -> Vec<String> {
        let mut tables: Vec<String> = self
            .records
            .values()
            .flat_map(|r| r.derived_map.keys().cloned())
            .collect();
        tables.sort();
        tables.dedup();
        tables
    }
}
