//! Fitness comparison between two slices of evaluated sequences.

use std::collections::HashMap;

use restgen_core::{EvaluatedSequence, TargetFitness};

/// Fitness targets reached by the actions of one call group.
pub fn fitness_of_call(
    sequence: &EvaluatedSequence,
    call_index: usize,
) -> HashMap<u64, TargetFitness> {
    let start = if call_index == 0 {
        0
    } else {
        sequence.actions_through(call_index - 1)
    };
    let end = sequence.actions_through(call_index);
    let indices: Vec<usize> = (start..end).collect();
    sequence.fitness.of_actions(&indices)
}

/// Compare fitness of one call group before (`a`) and after (`b`) a
/// mutation. Positive means `b` is better, negative means `a` is better,
/// zero is a tie:
///
/// 1. more distinct targets wins;
/// 2. else reaching a target the other whole sequence never reached wins;
/// 3. else the first shared target with a lower distance wins;
/// 4. else tie.
pub fn compare_fitness(
    a: &HashMap<u64, TargetFitness>,
    seq_a: &EvaluatedSequence,
    b: &HashMap<u64, TargetFitness>,
    seq_b: &EvaluatedSequence,
) -> i32 {
    if a.len() != b.len() {
        return if b.len() > a.len() { 1 } else { -1 };
    }

    let b_new = b
        .keys()
        .filter(|t| !seq_a.fitness.view().contains_key(t))
        .count();
    let a_new = a
        .keys()
        .filter(|t| !seq_b.fitness.view().contains_key(t))
        .count();
    if b_new > 0 && a_new == 0 {
        return 1;
    }
    if a_new > 0 && b_new == 0 {
        return -1;
    }

    let mut shared: Vec<u64> = a.keys().filter(|t| b.contains_key(t)).copied().collect();
    shared.sort_unstable();
    for target in shared {
        let da = a[&target].distance;
        let db = b[&target].distance;
        if db < da {
            return 1;
        }
        if da < db {
            return -1;
        }
    }
    0
}

/// Whether two fitness slices differ at all (different target sets, or any
/// shared target at a different distance).
pub fn fitness_changed(
    a: &HashMap<u64, TargetFitness>,
    b: &HashMap<u64, TargetFitness>,
) -> bool {
    if a.len() != b.len() {
        return true;
    }
    for (target, fa) in a {
        match b.get(target) {
            Some(fb) => {
                if (fa.distance - fb.distance).abs() > f64::EPSILON {
                    return true;
                }
            }
            None => return true,
        }
    }
    false
}
