//! The dependency graph: per-resource relations plus the uncorrelated
//! side-set. One owned object, passed explicitly to the mutator and the
//! inference code.

use std::collections::{HashMap, HashSet};

use crate::relation::{Relation, RelationKind};

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    dependencies: HashMap<String, Vec<Relation>>,
    uncorrelated: HashMap<String, HashSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relations_of(&self, resource: &str) -> &[Relation] {
        self.dependencies
            .get(resource)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All distinct dependency targets of `resource`, excluding itself.
    pub fn targets_of(&self, resource: &str) -> Vec<String> {
        let mut targets: Vec<String> = self
            .relations_of(resource)
            .iter()
            .flat_map(|r| r.targets().iter().cloned())
            .filter(|t| t != resource)
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// Highest probability asserted for the ordered pair, if any relation
    /// covers it.
    pub fn probability_of(&self, source: &str, target: &str) -> Option<f64> {
        self.relations_of(source)
            .iter()
            .filter(|r| r.involves(target))
            .map(|r| r.probability)
            .fold(None, |acc, p| Some(acc.map_or(p, |a: f64| a.max(p))))
    }

    pub fn is_uncorrelated(&self, a: &str, b: &str) -> bool {
        self.uncorrelated
            .get(a)
            .is_some_and(|set| set.contains(b))
    }

    pub fn uncorrelated_of(&self, resource: &str) -> Vec<&str> {
        self.uncorrelated
            .get(resource)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Record (or strengthen) a directed dependency from `source` onto
    /// `target`. Fresh positive evidence evicts any stale uncorrelated
    /// entry for the ordered pair.
    pub fn record_pair(
        &mut self,
        source: &str,
        target: &str,
        probability: f64,
        provenance: impl Into<String>,
    ) {
        let incoming = Relation::pair(
            source,
            vec![target.to_string()],
            probability,
            provenance,
        );
        let relations = self.dependencies.entry(source.to_string()).or_default();
        match relations.iter_mut().find(|r| {
            matches!(&r.kind, RelationKind::Pair { targets, .. } if targets.len() == 1 && targets[0] == target)
        }) {
            Some(existing) => existing.absorb(&incoming),
            None => relations.push(incoming),
        }
        if let Some(set) = self.uncorrelated.get_mut(source) {
            set.remove(target);
        }
    }

    /// Record (or regroup) a mutual relation grounded on `table`. Members
    /// are first unioned with any group already recorded for the table, and
    /// the result is stored under every member of the union, so a partial
    /// member list never leaves another member's copy stale.
    pub fn record_mutual(
        &mut self,
        table: &str,
        members: &[String],
        probability: f64,
        provenance: impl Into<String>,
    ) {
        if members.len() < 2 {
            return;
        }
        let mut group: Vec<String> = members.to_vec();
        for (resource, relations) in &self.dependencies {
            for relation in relations {
                if relation
                    .referred_tables()
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(table))
                {
                    group.extend(relation.targets().iter().cloned());
                    group.push(resource.clone());
                }
            }
        }
        group.sort();
        group.dedup();

        let incoming = Relation::mutual(group.clone(), table, probability, provenance.into());
        for member in &group {
            let relations = self.dependencies.entry(member.clone()).or_default();
            match relations.iter_mut().find(|r| {
                r.referred_tables()
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(table))
            }) {
                Some(existing) => existing.absorb(&incoming),
                None => relations.push(incoming.clone()),
            }
        }
        for a in &group {
            for b in &group {
                if a != b {
                    if let Some(set) = self.uncorrelated.get_mut(a) {
                        set.remove(b);
                    }
                }
            }
        }
    }

    pub fn record_self_loop(&mut self, resource: &str, probability: f64) {
        let incoming = Relation::self_loop(resource, probability);
        let relations = self.dependencies.entry(resource.to_string()).or_default();
        match relations
            .iter_mut()
            .find(|r| matches!(&r.kind, RelationKind::SelfLoop { .. }))
        {
            Some(existing) => existing.absorb(&incoming),
            None => relations.push(incoming),
        }
    }

    /// Record that `a` showed no fitness interaction with `b`. Skipped when
    /// a positive dependency already covers the pair, so newer positive
    /// evidence is never shadowed by an older negative observation.
    pub fn mark_uncorrelated(&mut self, a: &str, b: &str) {
        if self.probability_of(a, b).is_some() {
            return;
        }
        self.uncorrelated
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
    }

    pub fn resources(&self) -> Vec<&str> {
        self.dependencies.keys().map(String::as_str).collect()
    }
}
