//! Candidate swap generation.

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::types::Neighbour;
use crate::model::CostEvaluator;

/// Produces a batch of candidate swaps for the tabu phase.
///
/// Implementations must return candidates sorted by ascending `cost`, and
/// each candidate's `cost` must be the cost of the solution after the swap.
/// The engine only reads the batch; it never assumes a particular size.
pub trait NeighborhoodSampler {
    fn sample<R: Rng>(
        &mut self,
        evaluator: &CostEvaluator<'_>,
        solution: &[usize],
        current_cost: i64,
        size: usize,
        rng: &mut R,
    ) -> Vec<Neighbour>;
}

/// Draws a pair of slots uniformly from `[0, dimension)`.
///
/// With `allow_self_moves == false`, `s` is redrawn until it differs from
/// `r`, unless there is only one slot.
pub fn draw_pair<R: Rng>(rng: &mut R, dimension: usize, allow_self_moves: bool) -> (usize, usize) {
    let r = rng.random_range(0..dimension);
    let mut s = rng.random_range(0..dimension);
    if !allow_self_moves && dimension > 1 {
        while s == r {
            s = rng.random_range(0..dimension);
        }
    }
    (r, s)
}

/// Uniform random pairwise swaps, evaluated incrementally.
///
/// Repeated pairs are kept; ties keep draw order.
#[derive(Debug, Clone, Copy)]
pub struct RandomSwapSampler {
    pub allow_self_moves: bool,
    pub parallel: bool,
}

impl Default for RandomSwapSampler {
    fn default() -> Self {
        Self {
            allow_self_moves: true,
            parallel: false,
        }
    }
}

impl NeighborhoodSampler for RandomSwapSampler {
    fn sample<R: Rng>(
        &mut self,
        evaluator: &CostEvaluator<'_>,
        solution: &[usize],
        current_cost: i64,
        size: usize,
        rng: &mut R,
    ) -> Vec<Neighbour> {
        let dimension = solution.len();
        let pairs: Vec<(usize, usize)> = (0..size)
            .map(|_| draw_pair(rng, dimension, self.allow_self_moves))
            .collect();

        let evaluate = |&(r, s): &(usize, usize)| Neighbour {
            r,
            s,
            cost: current_cost + evaluator.move_cost(solution, r, s),
        };

        #[cfg(feature = "parallel")]
        let mut batch: Vec<Neighbour> = if self.parallel {
            pairs.par_iter().map(evaluate).collect()
        } else {
            pairs.iter().map(evaluate).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let mut batch: Vec<Neighbour> = pairs.iter().map(evaluate).collect();

        batch.sort_by_key(|n| n.cost);
        batch
    }
}
