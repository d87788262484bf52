//! Local improvement and perturbation operators.
//!
//! Both operate on an [`Individual`] through the incremental swap cost of
//! [`CostEvaluator::move_cost`], so each move costs time proportional to the
//! degree of the two slots involved.

use rand::Rng;

use super::types::Individual;
use crate::model::CostEvaluator;
use crate::tabu::draw_pair;

/// Random-swap descent.
///
/// Draws `moves` uniform slot pairs and applies each swap that does not
/// increase the cost. Returns the number of swaps applied.
pub fn local_improvement<R: Rng>(
    evaluator: &CostEvaluator<'_>,
    individual: &mut Individual,
    moves: usize,
    rng: &mut R,
) -> usize {
    let dimension = individual.solution.len();
    let mut applied = 0;
    for _ in 0..moves {
        let (r, s) = draw_pair(rng, dimension, true);
        let delta = individual.swap_delta(evaluator, r, s);
        if delta <= 0 {
            individual.cost += delta;
            individual.solution.swap(r, s);
            applied += 1;
        }
    }
    applied
}

/// Applies `swaps` random swaps of distinct slots, regardless of cost.
pub fn perturb<R: Rng>(
    evaluator: &CostEvaluator<'_>,
    individual: &mut Individual,
    swaps: usize,
    rng: &mut R,
) {
    let dimension = individual.solution.len();
    if dimension < 2 {
        return;
    }
    for _ in 0..swaps {
        let (r, s) = draw_pair(rng, dimension, false);
        individual.swap(evaluator, r, s);
    }
}
