//! Objective evaluation.

use super::types::ProblemModel;

/// Full and incremental objective evaluation over a [`ProblemModel`].
///
/// A solution is a permutation `p` where `p[slot]` is the facility placed in
/// `slot`. Arithmetic is plain `i64`; callers bound the input magnitudes.
#[derive(Debug, Clone, Copy)]
pub struct CostEvaluator<'a> {
    model: &'a ProblemModel,
}

impl<'a> CostEvaluator<'a> {
    pub fn new(model: &'a ProblemModel) -> Self {
        Self { model }
    }

    /// Objective value of `solution`, computed from scratch.
    ///
    /// Every adjacent pair is visited from both ends, so the sum is halved.
    pub fn full_cost(&self, solution: &[usize]) -> i64 {
        let mut total = 0i64;
        for (slot, &facility) in solution.iter().enumerate() {
            for &k in self.model.neighbours(slot) {
                total += self.model.flow(facility, solution[k]);
            }
        }
        total / 2
    }

    /// Cost change caused by swapping the facilities in slots `r` and `s`.
    ///
    /// `solution` is not modified. Only pairs touching `r` or `s` change
    /// their contribution; the `r`-`s` pair itself keeps its value because
    /// the flow is symmetric.
    pub fn move_cost(&self, solution: &[usize], r: usize, s: usize) -> i64 {
        let (at_r, at_s) = (solution[r], solution[s]);
        let mut delta = 0i64;
        for &k in self.model.neighbours(r) {
            if k != s {
                let other = solution[k];
                delta += self.model.flow(at_s, other) - self.model.flow(at_r, other);
            }
        }
        for &k in self.model.neighbours(s) {
            if k != r {
                let other = solution[k];
                delta += self.model.flow(at_r, other) - self.model.flow(at_s, other);
            }
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{random_model, unit_cycle};
    use proptest::prelude::*;

    #[test]
    fn test_four_cycle_costs_one_per_edge() {
        let model = unit_cycle(4);
        let eval = CostEvaluator::new(&model);
        assert_eq!(eval.full_cost(&[0, 1, 2, 3]), 4);
        assert_eq!(eval.full_cost(&[2, 0, 3, 1]), 4);
    }

    #[test]
    fn test_grouped_cycle_cost() {
        // Two groups {0, 1} and {2, 3}: flow 0 within a group, 5 across.
        let mut flow = vec![vec![0i64; 4]; 4];
        for a in 0..4 {
            for b in 0..4 {
                if (a < 2) != (b < 2) {
                    flow[a][b] = 5;
                }
            }
        }
        let model =
            ProblemModel::from_edges(flow, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let eval = CostEvaluator::new(&model);
        assert_eq!(eval.full_cost(&[0, 1, 2, 3]), 10);
        assert_eq!(eval.full_cost(&[0, 2, 1, 3]), 20);
        assert_eq!(eval.move_cost(&[0, 1, 2, 3], 1, 2), 10);
    }

    #[test]
    fn test_self_swap_is_free() {
        let model = random_model(8, 3);
        let eval = CostEvaluator::new(&model);
        let solution: Vec<usize> = (0..8).collect();
        for r in 0..8 {
            assert_eq!(eval.move_cost(&solution, r, r), 0);
        }
    }

    #[test]
    fn test_move_cost_does_not_mutate() {
        let model = random_model(6, 11);
        let eval = CostEvaluator::new(&model);
        let solution = vec![5, 3, 1, 0, 2, 4];
        let before = solution.clone();
        let _ = eval.move_cost(&solution, 0, 4);
        assert_eq!(solution, before);
    }

    fn permutation(n: usize, keys: &[u32]) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..n).collect();
        perm.sort_by_key(|&i| keys[i % keys.len()].wrapping_mul(i as u32 + 1));
        perm
    }

    proptest! {
        #[test]
        fn prop_move_cost_matches_full_difference(
            n in 2usize..12,
            seed in any::<u64>(),
            keys in prop::collection::vec(any::<u32>(), 12),
            r in 0usize..12,
            s in 0usize..12,
        ) {
            let model = random_model(n, seed);
            let eval = CostEvaluator::new(&model);
            let solution = permutation(n, &keys);
            let (r, s) = (r % n, s % n);

            let mut swapped = solution.clone();
            swapped.swap(r, s);
            prop_assert_eq!(
                eval.full_cost(&swapped) - eval.full_cost(&solution),
                eval.move_cost(&solution, r, s)
            );
        }

        #[test]
        fn prop_incremental_cost_stays_consistent(
            n in 2usize..12,
            seed in any::<u64>(),
            swaps in prop::collection::vec((0usize..12, 0usize..12), 0..60),
        ) {
            let model = random_model(n, seed);
            let eval = CostEvaluator::new(&model);
            let mut solution: Vec<usize> = (0..n).collect();
            let mut cost = eval.full_cost(&solution);

            for (r, s) in swaps {
                let (r, s) = (r % n, s % n);
                cost += eval.move_cost(&solution, r, s);
                solution.swap(r, s);
            }
            prop_assert_eq!(cost, eval.full_cost(&solution));
        }
    }
}
