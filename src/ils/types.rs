//! Population members.

use rand::Rng;
use u_numflow::random::shuffle;

use crate::model::CostEvaluator;

/// A permutation together with its cost.
///
/// `solution[slot]` is the facility placed in `slot`. The cost is kept in
/// step with the permutation by [`Individual::swap`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    pub solution: Vec<usize>,
    pub cost: i64,
}

impl Individual {
    /// Uniformly random permutation of `[0, dimension)`.
    pub fn random<R: Rng>(evaluator: &CostEvaluator<'_>, dimension: usize, rng: &mut R) -> Self {
        let mut solution: Vec<usize> = (0..dimension).collect();
        shuffle(&mut solution, rng);
        let cost = evaluator.full_cost(&solution);
        Self { solution, cost }
    }

    /// Cost change of swapping slots `r` and `s`, without applying it.
    pub fn swap_delta(&self, evaluator: &CostEvaluator<'_>, r: usize, s: usize) -> i64 {
        evaluator.move_cost(&self.solution, r, s)
    }

    /// Swaps slots `r` and `s`, updating the cost incrementally.
    pub fn swap(&mut self, evaluator: &CostEvaluator<'_>, r: usize, s: usize) {
        self.cost += evaluator.move_cost(&self.solution, r, s);
        self.solution.swap(r, s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::random_model;
    use u_numflow::random::create_rng;

    #[test]
    fn test_random_individual_is_costed_permutation() {
        let model = random_model(9, 5);
        let eval = CostEvaluator::new(&model);
        let mut rng = create_rng(8);
        let ind = Individual::random(&eval, 9, &mut rng);

        let mut sorted = ind.solution.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..9).collect::<Vec<_>>());
        assert_eq!(ind.cost, eval.full_cost(&ind.solution));
    }

    #[test]
    fn test_swap_keeps_cost_in_step() {
        let model = random_model(7, 2);
        let eval = CostEvaluator::new(&model);
        let mut rng = create_rng(3);
        let mut ind = Individual::random(&eval, 7, &mut rng);

        for (r, s) in [(0, 6), (2, 3), (4, 4), (1, 5)] {
            let expected = ind.cost + ind.swap_delta(&eval, r, s);
            ind.swap(&eval, r, s);
            assert_eq!(ind.cost, expected);
            assert_eq!(ind.cost, eval.full_cost(&ind.solution));
        }
    }
}
