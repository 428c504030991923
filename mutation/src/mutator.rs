//! The structural mutator: ADD / DELETE / SWAP / REPLACE / MODIFY over a
//! resource test sequence, biased by the dependency graph.

use rand::seq::SliceRandom;
use rand::Rng;

use restgen_core::SearchConfig;
use restgen_dependency::DependencyGraph;
use restgen_resource::{ResourceCluster, ResourceSequence};

/// Probability of considering a resource as a dependency target of itself
/// when picking an ADD anchor.
const SELF_RELATION_PROB: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationType {
    Add,
    Delete,
    Swap,
    Replace,
    Modify,
}

impl MutationType {
    /// Minimum number of deletable calls for the type to apply.
    fn min_deletable(&self) -> usize {
        match self {
            MutationType::Delete | MutationType::Swap => 2,
            _ => 1,
        }
    }
}

/// Applies one structural mutation per invocation. Owns nothing; the
/// cluster and config are borrowed for the mutator's lifetime, the
/// sequence and graph are passed per call.
pub struct StructureMutator<'a> {
    cluster: &'a ResourceCluster,
    config: &'a SearchConfig,
}

impl<'a> StructureMutator<'a> {
    pub fn new(cluster: &'a ResourceCluster, config: &'a SearchConfig) -> Self {
        Self { cluster, config }
    }

    /// Mutation types admissible for the current sequence.
    pub fn applicable_types(&self, sequence: &ResourceSequence) -> Vec<MutationType> {
        let deletable = sequence.deletable_positions().len();
        let all_present = self
            .cluster
            .keys()
            .iter()
            .all(|key| sequence.contains_resource(key));
        let at_budget = sequence.total_actions() >= self.config.max_test_size;

        let mut types = Vec::new();
        if !all_present && !at_budget {
            types.push(MutationType::Add);
        }
        if deletable >= MutationType::Delete.min_deletable() {
            types.push(MutationType::Delete);
            types.push(MutationType::Swap);
        }
        if !all_present && !at_budget && deletable >= 1 {
            types.push(MutationType::Replace);
        }
        if !sequence.is_empty() {
            types.push(MutationType::Modify);
        }
        types
    }

    /// Pick one admissible type uniformly and apply it. Returns the type
    /// applied, or `None` when nothing was applicable or every strategy of
    /// the chosen type came up empty.
    pub fn mutate(
        &self,
        sequence: &mut ResourceSequence,
        graph: &DependencyGraph,
        rng: &mut impl Rng,
    ) -> Option<MutationType> {
        let types = self.applicable_types(sequence);
        let chosen = *types.choose(rng)?;
        let applied = match chosen {
            MutationType::Add => self.apply_add(sequence, graph, rng),
            MutationType::Delete => self.apply_delete(sequence, graph, rng),
            MutationType::Swap => self.apply_swap(sequence, graph, rng),
            MutationType::Replace => self.apply_replace(sequence, graph, rng),
            MutationType::Modify => self.apply_modify(sequence, rng),
        };
        applied.then_some(chosen)
    }

    /// ADD: with the configured probability, anchor on an existing call
    /// whose dependency targets are not all present yet and insert one
    /// missing target in front of it; otherwise insert a uniformly chosen
    /// absent resource at a random position.
    fn apply_add(
        &self,
        sequence: &mut ResourceSequence,
        graph: &DependencyGraph,
        rng: &mut impl Rng,
    ) -> bool {
        if rng.gen_bool(self.config.dependency_heuristics_prob) {
            if self.add_dependency_anchored(sequence, graph, rng) {
                return true;
            }
        }
        let present = sequence.resource_keys();
        let Some(node) = self.cluster.random_absent(&present, rng) else {
            return false;
        };
        let Some(mut calls) = node.sample_any(rng) else {
            return false;
        };
        maintain_auth(sequence, &mut calls);
        let position = rng.gen_range(0..=sequence.len());
        sequence.insert(position, calls);
        true
    }

    fn add_dependency_anchored(
        &self,
        sequence: &mut ResourceSequence,
        graph: &DependencyGraph,
        rng: &mut impl Rng,
    ) -> bool {
        let mut positions: Vec<usize> = (0..sequence.len()).collect();
        positions.shuffle(rng);
        for position in positions {
            let anchor_key = sequence.calls[position].resource_key.clone();
            let mut missing: Vec<String> = graph
                .targets_of(&anchor_key)
                .into_iter()
                .filter(|t| !sequence.contains_resource(t))
                .filter(|t| self.cluster.node(t).is_ok())
                .collect();
            if missing.is_empty() && rng.gen_bool(SELF_RELATION_PROB) {
                missing.push(anchor_key.clone());
            }
            let Some(target) = missing.choose(rng) else {
                continue;
            };
            let Ok(node) = self.cluster.node(target) else {
                continue;
            };
            let Some(mut calls) = node.sample_any(rng) else {
                continue;
            };
            maintain_auth(sequence, &mut calls);
            calls.should_be_before.push(anchor_key);
            sequence.insert(position, calls);
            return true;
        }
        false
    }

    /// DELETE: with the configured probability, prefer calls with no
    /// unresolved dependents, then calls known uncorrelated with everything
    /// else; otherwise remove a uniformly chosen deletable call.
    fn apply_delete(
        &self,
        sequence: &mut ResourceSequence,
        graph: &DependencyGraph,
        rng: &mut impl Rng,
    ) -> bool {
        let position = if rng.gen_bool(self.config.dependency_heuristics_prob) {
            self.pick_removable(sequence, graph, rng)
        } else {
            sequence.deletable_positions().choose(rng).copied()
        };
        let Some(position) = position else {
            return false;
        };
        sequence.remove(position).is_some()
    }

    fn pick_removable(
        &self,
        sequence: &ResourceSequence,
        graph: &DependencyGraph,
        rng: &mut impl Rng,
    ) -> Option<usize> {
        let deletable = sequence.deletable_positions();
        let keys = sequence.resource_keys();

        let without_dependents: Vec<usize> = deletable
            .iter()
            .copied()
            .filter(|&p| {
                !keys.iter().enumerate().any(|(q, other)| {
                    q != p && graph.probability_of(other, &keys[p]).is_some()
                })
            })
            .collect();
        let uncorrelated: Vec<usize> = without_dependents
            .iter()
            .copied()
            .filter(|&p| {
                keys.iter()
                    .enumerate()
                    .all(|(q, other)| q == p || graph.is_uncorrelated(&keys[p], other))
            })
            .collect();

        if let Some(p) = uncorrelated.choose(rng) {
            return Some(*p);
        }
        if let Some(p) = without_dependents.choose(rng) {
            return Some(*p);
        }
        deletable.choose(rng).copied()
    }

    /// SWAP: with the configured probability, three dependency-guided
    /// strategies tried in random order; a uniformly chosen pair of movable
    /// calls otherwise, or when every strategy comes up empty.
    fn apply_swap(
        &self,
        sequence: &mut ResourceSequence,
        graph: &DependencyGraph,
        rng: &mut impl Rng,
    ) -> bool {
        let movable: Vec<usize> = (0..sequence.len())
            .filter(|&i| sequence.calls[i].structure_mutable)
            .collect();
        if movable.len() < 2 {
            return false;
        }
        let keys = sequence.resource_keys();

        if rng.gen_bool(self.config.dependency_heuristics_prob) {
            let mut strategies = [0, 1, 2];
            strategies.shuffle(rng);
            for strategy in strategies {
                let pair = match strategy {
                    // Provider ordered after its dependent; swap them closer.
                    0 => pick_pair(&movable, rng, |i, j| {
                        graph.probability_of(&keys[i], &keys[j]).is_some()
                    }),
                    // Weakly confirmed relation; test whether order matters.
                    1 => pick_pair(&movable, rng, |i, j| {
                        matches!(graph.probability_of(&keys[i], &keys[j]), Some(p) if p < 1.0)
                            || matches!(graph.probability_of(&keys[j], &keys[i]), Some(p) if p < 1.0)
                    }),
                    // Entirely unchecked pair.
                    _ => pick_pair(&movable, rng, |i, j| {
                        graph.probability_of(&keys[i], &keys[j]).is_none()
                            && graph.probability_of(&keys[j], &keys[i]).is_none()
                            && !graph.is_uncorrelated(&keys[i], &keys[j])
                            && !graph.is_uncorrelated(&keys[j], &keys[i])
                    }),
                };
                if let Some((i, j)) = pair {
                    sequence.swap(i, j);
                    return true;
                }
            }
        }

        let mut picks = movable;
        picks.shuffle(rng);
        sequence.swap(picks[0], picks[1]);
        true
    }

    /// REPLACE: with the configured probability, remove one call (same
    /// preference order as DELETE) and insert a dependency-linked
    /// replacement for the remaining calls; otherwise remove a uniformly
    /// chosen deletable call and insert an arbitrary absent resource.
    fn apply_replace(
        &self,
        sequence: &mut ResourceSequence,
        graph: &DependencyGraph,
        rng: &mut impl Rng,
    ) -> bool {
        let guided = rng.gen_bool(self.config.dependency_heuristics_prob);
        let position = if guided {
            self.pick_removable(sequence, graph, rng)
        } else {
            sequence.deletable_positions().choose(rng).copied()
        };
        let Some(position) = position else {
            return false;
        };
        let removed = match sequence.remove(position) {
            Some(call) => call,
            None => return false,
        };

        let present = sequence.resource_keys();
        let mut replacement = None;
        if guided {
            let linked: Vec<String> = present
                .iter()
                .flat_map(|key| graph.targets_of(key))
                .filter(|t| !present.contains(t) && *t != removed.resource_key)
                .filter(|t| self.cluster.node(t).is_ok())
                .collect();
            replacement = linked.choose(rng).and_then(|key| self.cluster.node(key).ok());
        }
        let replacement = replacement.or_else(|| {
            let mut excluded = present.clone();
            excluded.push(removed.resource_key.clone());
            self.cluster.random_absent(&excluded, rng)
        });
        let Some(node) = replacement else {
            // Nothing to replace with; keep the sequence intact.
            sequence.insert(position, removed);
            return false;
        };
        let Some(mut calls) = node.sample_any(rng) else {
            sequence.insert(position, removed);
            return false;
        };
        maintain_auth(sequence, &mut calls);
        sequence.insert(position, calls);
        true
    }

    /// MODIFY: regenerate one call from an alternative verb template, or
    /// from a fresh single action when the node offers no alternative,
    /// preserving its authentication.
    fn apply_modify(&self, sequence: &mut ResourceSequence, rng: &mut impl Rng) -> bool {
        let mutable: Vec<usize> = (0..sequence.len())
            .filter(|&i| sequence.calls[i].structure_mutable)
            .collect();
        let Some(&position) = mutable.choose(rng) else {
            return false;
        };
        let current = &sequence.calls[position];
        let Ok(node) = self.cluster.node(&current.resource_key) else {
            return false;
        };
        let auth = current.auth().map(str::to_string);
        let regenerated = node.generate_another(current, rng).or_else(|| {
            let mut calls = node.sample_one_action(rng)?;
            calls.set_auth(auth);
            Some(calls)
        });
        match regenerated {
            Some(calls) => sequence.replace(position, calls).is_some(),
            None => false,
        }
    }
}

/// Propagate the sequence's existing authentication to a freshly sampled
/// group, so mutations never strip auth from a test.
fn maintain_auth(sequence: &ResourceSequence, calls: &mut restgen_resource::ResourceCalls) {
    if calls.auth().is_some() {
        return;
    }
    if let Some(auth) = sequence.calls.iter().find_map(|c| c.auth()) {
        calls.set_auth(Some(auth.to_string()));
    }
}

fn pick_pair(
    movable: &[usize],
    rng: &mut impl Rng,
    accept: impl Fn(usize, usize) -> bool,
) -> Option<(usize, usize)> {
    let mut pairs = Vec::new();
    for (a, &i) in movable.iter().enumerate() {
        for &j in &movable[a + 1..] {
            if accept(i, j) {
                pairs.push((i, j));
            }
        }
    }
    pairs.choose(rng).copied()
}
