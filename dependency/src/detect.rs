//! Post-mutation dependency detection.
//!
//! Pure reconciliation over two immutable evaluated-sequence snapshots:
//! classify which single-step structural mutation turned `prev` into
//! `curr`, then walk every downstream call comparing its fitness before
//! and after. A fitness change records a dependency edge onto the
//! implicated resource(s); no change records the pair as uncorrelated.

use restgen_core::EvaluatedSequence;

use crate::compare::{compare_fitness, fitness_changed, fitness_of_call};
use crate::error::{DependencyError, DependencyResult};
use crate::graph::DependencyGraph;
use crate::update::CONFIRMED_PROBABILITY;

/// Classify the structural diff and dispatch to the per-shape detection.
/// Fails with [`DependencyError::InconsistentMutation`] when the diff
/// matches no single-step mutation shape.
pub fn detect_after_structure_mutation(
    graph: &mut DependencyGraph,
    prev: &EvaluatedSequence,
    curr: &EvaluatedSequence,
) -> DependencyResult<()> {
    let p = prev.calls.len();
    let c = curr.calls.len();

    if c == p + 1 {
        let position = first_divergence(prev, curr);
        if !suffix_matches(prev, position, curr, position + 1) {
            return Err(DependencyError::inconsistent(
                "added sequence diverges beyond one position",
            ));
        }
        detect_after_add(graph, prev, curr, position);
        return Ok(());
    }
    if p == c + 1 {
        let position = first_divergence(prev, curr);
        if !suffix_matches(curr, position, prev, position + 1) {
            return Err(DependencyError::inconsistent(
                "deleted sequence diverges beyond one position",
            ));
        }
        detect_after_delete(graph, prev, curr, position);
        return Ok(());
    }
    if p != c {
        return Err(DependencyError::inconsistent(format!(
            "sizes {p} -> {c} match no single-step mutation"
        )));
    }

    let diffs: Vec<usize> = (0..p)
        .filter(|&i| prev.calls[i].instance_key != curr.calls[i].instance_key)
        .collect();
    match diffs.as_slice() {
        [] => Err(DependencyError::inconsistent("no structural difference")),
        [position] => {
            if prev.calls[*position].resource_key == curr.calls[*position].resource_key {
                detect_after_modify(graph, prev, curr, *position);
            } else {
                detect_after_replace(graph, prev, curr, *position);
            }
            Ok(())
        }
        [i, j]
            if prev.calls[*i].instance_key == curr.calls[*j].instance_key
                && prev.calls[*j].instance_key == curr.calls[*i].instance_key =>
        {
            detect_after_swap(graph, prev, curr, *i, *j);
            Ok(())
        }
        _ => Err(DependencyError::inconsistent(
            "diff positions match no single-step mutation",
        )),
    }
}

fn first_divergence(prev: &EvaluatedSequence, curr: &EvaluatedSequence) -> usize {
    let shared = prev.calls.len().min(curr.calls.len());
    (0..shared)
        .find(|&i| prev.calls[i].instance_key != curr.calls[i].instance_key)
        .unwrap_or(shared)
}

fn suffix_matches(
    shorter: &EvaluatedSequence,
    from_shorter: usize,
    longer: &EvaluatedSequence,
    from_longer: usize,
) -> bool {
    let a = &shorter.calls[from_shorter..];
    let b = &longer.calls[from_longer..];
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| x.instance_key == y.instance_key)
}

fn detect_after_add(
    graph: &mut DependencyGraph,
    prev: &EvaluatedSequence,
    curr: &EvaluatedSequence,
    position: usize,
) {
    let added = &curr.calls[position];
    for k in position + 1..curr.calls.len() {
        let downstream = &curr.calls[k].resource_key;
        let before = fitness_of_call(prev, k - 1);
        let after = fitness_of_call(curr, k);
        if fitness_changed(&before, &after) {
            graph.record_pair(
                downstream,
                &added.resource_key,
                CONFIRMED_PROBABILITY,
                format!("add:{}", added.resource_key),
            );
        } else {
            graph.mark_uncorrelated(&added.resource_key, downstream);
            graph.mark_uncorrelated(downstream, &added.resource_key);
        }
    }
}

fn detect_after_delete(
    graph: &mut DependencyGraph,
    prev: &EvaluatedSequence,
    curr: &EvaluatedSequence,
    position: usize,
) {
    let deleted = &prev.calls[position];
    for k in position..curr.calls.len() {
        let downstream = &curr.calls[k].resource_key;
        let before = fitness_of_call(prev, k + 1);
        let after = fitness_of_call(curr, k);
        if fitness_changed(&before, &after) {
            graph.record_pair(
                downstream,
                &deleted.resource_key,
                CONFIRMED_PROBABILITY,
                format!("delete:{}", deleted.resource_key),
            );
        } else {
            graph.mark_uncorrelated(&deleted.resource_key, downstream);
            graph.mark_uncorrelated(downstream, &deleted.resource_key);
        }
    }
}

fn detect_after_modify(
    graph: &mut DependencyGraph,
    prev: &EvaluatedSequence,
    curr: &EvaluatedSequence,
    position: usize,
) {
    let modified = &curr.calls[position].resource_key;
    for k in position + 1..curr.calls.len() {
        let downstream = &curr.calls[k].resource_key;
        let before = fitness_of_call(prev, k);
        let after = fitness_of_call(curr, k);
        if fitness_changed(&before, &after) {
            graph.record_pair(
                downstream,
                modified,
                CONFIRMED_PROBABILITY,
                format!("modify:{modified}"),
            );
        } else {
            graph.mark_uncorrelated(modified, downstream);
            graph.mark_uncorrelated(downstream, modified);
        }
    }
}

fn detect_after_replace(
    graph: &mut DependencyGraph,
    prev: &EvaluatedSequence,
    curr: &EvaluatedSequence,
    position: usize,
) {
    let old = &prev.calls[position].resource_key;
    let new = &curr.calls[position].resource_key;
    for k in position + 1..curr.calls.len() {
        let downstream = &curr.calls[k].resource_key;
        let before = fitness_of_call(prev, k);
        let after = fitness_of_call(curr, k);
        if fitness_changed(&before, &after) {
            // Direction by the sign of the comparison: an improvement
            // implicates the new resource, a regression the removed one,
            // a tie both.
            let result = compare_fitness(&before, prev, &after, curr);
            if result >= 0 {
                graph.record_pair(
                    downstream,
                    new,
                    CONFIRMED_PROBABILITY,
                    format!("replace:{old}->{new}"),
                );
            }
            if result <= 0 {
                graph.record_pair(
                    downstream,
                    old,
                    CONFIRMED_PROBABILITY,
                    format!("replace:{old}->{new}"),
                );
            }
        } else {
            for target in [old, new] {
                graph.mark_uncorrelated(target, downstream);
                graph.mark_uncorrelated(downstream, target);
            }
        }
    }
}

fn detect_after_swap(
    graph: &mut DependencyGraph,
    prev: &EvaluatedSequence,
    curr: &EvaluatedSequence,
    i: usize,
    j: usize,
) {
    // After the swap, the call now at i moved forward and the one at j
    // moved backward over everything in between.
    let forward = &curr.calls[i].resource_key;
    let backward = &curr.calls[j].resource_key;

    let affected = (i + 1..j).chain(j + 1..curr.calls.len());
    for k in affected {
        let downstream = &curr.calls[k].resource_key;
        let before = fitness_of_call(prev, k);
        let after = fitness_of_call(curr, k);
        if fitness_changed(&before, &after) {
            let result = compare_fitness(&before, prev, &after, curr);
            if result >= 0 {
                graph.record_pair(
                    downstream,
                    forward,
                    CONFIRMED_PROBABILITY,
                    format!("swap:{forward}<->{backward}"),
                );
            }
            if result <= 0 {
                graph.record_pair(
                    downstream,
                    backward,
                    CONFIRMED_PROBABILITY,
                    format!("swap:{forward}<->{backward}"),
                );
            }
        } else {
            for target in [forward, backward] {
                graph.mark_uncorrelated(target, downstream);
                graph.mark_uncorrelated(downstream, target);
            }
        }
    }

    // The moved calls themselves, against everything they jumped over.
    for (own_prev, own_curr, moved) in [(j, i, forward), (i, j, backward)] {
        let before = fitness_of_call(prev, own_prev);
        let after = fitness_of_call(curr, own_curr);
        if !fitness_changed(&before, &after) {
            continue;
        }
        for k in i..=j {
            let jumped = &curr.calls[k].resource_key;
            if jumped != moved {
                graph.record_pair(
                    moved,
                    jumped,
                    CONFIRMED_PROBABILITY,
                    format!("swap:{forward}<->{backward}"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restgen_core::{CallSnapshot, FitnessView};

    fn call(resource: &str, nonce: u32) -> CallSnapshot {
        CallSnapshot {
            resource_key: resource.to_string(),
            instance_key: format!("{resource}#{nonce}"),
            template: "GET".to_string(),
            action_names: vec![format!("GET:{resource}")],
        }
    }

    fn seq(calls: Vec<CallSnapshot>, fitness: &[(u64, usize, f64)]) -> EvaluatedSequence {
        let mut view = FitnessView::new();
        for (target, index, distance) in fitness {
            view.record(*target, *index, *distance);
        }
        EvaluatedSequence {
            calls,
            fitness: view,
        }
    }

    #[test]
    fn delete_with_zero_delta_marks_downstream_uncorrelated() {
        let prev = seq(
            vec![call("/users", 1), call("/orders", 2), call("/items", 3)],
            &[(10, 1, 0.5), (11, 2, 0.3)],
        );
        // "/users" deleted; downstream fitness unchanged.
        let curr = seq(
            vec![call("/orders", 2), call("/items", 3)],
            &[(10, 0, 0.5), (11, 1, 0.3)],
        );

        let mut graph = DependencyGraph::new();
        detect_after_structure_mutation(&mut graph, &prev, &curr).unwrap();

        assert!(graph.is_uncorrelated("/users", "/orders"));
        assert!(graph.is_uncorrelated("/users", "/items"));
        assert!(graph.probability_of("/orders", "/users").is_none());
    }

    #[test]
    fn delete_with_fitness_change_records_dependency() {
        let prev = seq(
            vec![call("/users", 1), call("/orders", 2)],
            &[(10, 1, 0.2)],
        );
        // Removing "/users" made "/orders" worse.
        let curr = seq(vec![call("/orders", 2)], &[(10, 0, 0.9)]);

        let mut graph = DependencyGraph::new();
        detect_after_structure_mutation(&mut graph, &prev, &curr).unwrap();

        assert_eq!(graph.probability_of("/orders", "/users"), Some(1.0));
        assert!(!graph.is_uncorrelated("/users", "/orders"));
    }

    #[test]
    fn replace_improvement_implicates_the_new_resource() {
        let prev = seq(
            vec![call("/tags", 1), call("/orders", 2)],
            &[(10, 1, 0.8)],
        );
        // "/tags" replaced by "/users"; "/orders" got strictly better.
        let curr = seq(
            vec![call("/users", 9), call("/orders", 2)],
            &[(10, 1, 0.1)],
        );

        let mut graph = DependencyGraph::new();
        detect_after_structure_mutation(&mut graph, &prev, &curr).unwrap();

        assert_eq!(graph.probability_of("/orders", "/users"), Some(1.0));
        assert!(graph.probability_of("/orders", "/tags").is_none());
    }

    #[test]
    fn add_with_new_coverage_records_dependency_on_added() {
        let prev = seq(vec![call("/orders", 2)], &[(10, 0, 0.9)]);
        let curr = seq(
            vec![call("/users", 5), call("/orders", 2)],
            &[(10, 1, 0.1)],
        );

        let mut graph = DependencyGraph::new();
        detect_after_structure_mutation(&mut graph, &prev, &curr).unwrap();
        assert_eq!(graph.probability_of("/orders", "/users"), Some(1.0));
    }

    #[test]
    fn swap_checks_the_moved_calls_against_the_jumped_block() {
        let prev = seq(
            vec![call("/users", 1), call("/items", 2), call("/orders", 3)],
            &[(10, 0, 0.5), (11, 2, 0.4)],
        );
        // Swap positions 0 and 2; "/orders" moved in front and its own
        // fitness changed.
        let curr = seq(
            vec![call("/orders", 3), call("/items", 2), call("/users", 1)],
            &[(10, 2, 0.5), (11, 0, 0.9)],
        );

        let mut graph = DependencyGraph::new();
        detect_after_structure_mutation(&mut graph, &prev, &curr).unwrap();

        // The forward-moved "/orders" depends on what it jumped over.
        let targets = graph.targets_of("/orders");
        assert!(targets.contains(&"/items".to_string()));
        assert!(targets.contains(&"/users".to_string()));
    }

    #[test]
    fn modify_keeps_resource_and_checks_downstream() {
        let prev = seq(
            vec![call("/users", 1), call("/orders", 2)],
            &[(10, 1, 0.4)],
        );
        let curr = seq(
            vec![call("/users", 7), call("/orders", 2)],
            &[(10, 1, 0.4)],
        );

        let mut graph = DependencyGraph::new();
        detect_after_structure_mutation(&mut graph, &prev, &curr).unwrap();
        assert!(graph.is_uncorrelated("/orders", "/users"));
    }

    #[test]
    fn unrecognizable_diffs_are_fatal() {
        let prev = seq(vec![call("/a", 1), call("/b", 2)], &[]);
        let curr = seq(vec![call("/c", 3), call("/d", 4)], &[]);
        let mut graph = DependencyGraph::new();
        assert!(matches!(
            detect_after_structure_mutation(&mut graph, &prev, &curr),
            Err(DependencyError::InconsistentMutation(_))
        ));

        let same = seq(vec![call("/a", 1)], &[]);
        assert!(detect_after_structure_mutation(&mut graph, &same.clone(), &same).is_err());
    }
}
