//! An ordered test sequence of resource-call groups.

use restgen_core::{EvaluatedSequence, FitnessView};

use crate::calls::ResourceCalls;

#[derive(Debug, Clone, Default)]
pub struct ResourceSequence {
    pub calls: Vec<ResourceCalls>,
}

impl ResourceSequence {
    pub fn new(calls: Vec<ResourceCalls>) -> Self {
        Self { calls }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Total number of REST actions across all groups.
    pub fn total_actions(&self) -> usize {
        self.calls.iter().map(|c| c.actions.len()).sum()
    }

    pub fn resource_keys(&self) -> Vec<String> {
        self.calls.iter().map(|c| c.resource_key.clone()).collect()
    }

    pub fn contains_resource(&self, key: &str) -> bool {
        self.calls.iter().any(|c| c.resource_key == key)
    }

    pub fn insert(&mut self, position: usize, calls: ResourceCalls) {
        let position = position.min(self.calls.len());
        self.calls.insert(position, calls);
    }

    pub fn remove(&mut self, position: usize) -> Option<ResourceCalls> {
        if position < self.calls.len() {
            Some(self.calls.remove(position))
        } else {
            None
        }
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.calls.swap(a, b);
    }

    pub fn replace(&mut self, position: usize, calls: ResourceCalls) -> Option<ResourceCalls> {
        if position < self.calls.len() {
            Some(std::mem::replace(&mut self.calls[position], calls))
        } else {
            None
        }
    }

    /// Positions of groups that a structural mutation may remove.
    pub fn deletable_positions(&self) -> Vec<usize> {
        self.calls
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_deletable && c.structure_mutable)
            .map(|(i, _)| i)
            .collect()
    }

    /// Immutable snapshot paired with the fitness of its evaluation.
    pub fn snapshot(&self, fitness: FitnessView) -> EvaluatedSequence {
        EvaluatedSequence {
            calls: self.calls.iter().map(|c| c.snapshot()).collect(),
            fitness,
        }
    }
}
