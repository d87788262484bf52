//! Budgeted execution of a [`TabuSearch`].

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;
use tracing::info;
use u_numflow::random::create_rng;

use super::config::TabuConfig;
use super::engine::TabuSearch;
use super::neighborhood::NeighborhoodSampler;
use super::types::Phase;
use crate::error::QapError;
use crate::model::ProblemModel;

/// Result of a tabu search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuResult {
    /// Best solution found: `best[slot]` is the facility in `slot`.
    pub best: Vec<usize>,
    /// Cost of the best solution.
    pub best_cost: i64,
    /// Cost of the shuffled starting permutation.
    pub initial_cost: i64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best solution was found (0 = start).
    pub best_iteration: usize,
    /// Tabu iterations that found no admissible candidate.
    pub resamples: usize,
    /// Phase the engine was in when the run stopped.
    pub final_phase: Phase,
    /// Whether the run was cancelled externally.
    pub cancelled: bool,
    /// Initial cost followed by the cost of every improvement.
    pub cost_history: Vec<i64>,
}

impl TabuResult {
    /// Number of improvements over the starting solution.
    pub fn improvements(&self) -> usize {
        self.cost_history.len().saturating_sub(1)
    }
}

/// Runs a [`TabuSearch`] until its budget is spent.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes the search with the configured seed and budget.
    ///
    /// # Errors
    ///
    /// [`QapError::InvalidConfig`] if the configuration is invalid or sets
    /// neither `max_iterations` nor `time_limit_ms`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_qap::model::parse_problem;
    /// use u_qap::tabu::{TabuConfig, TabuRunner};
    ///
    /// let model = parse_problem("4\n2 4\n2 2\n0 5\n5 0\n0 1\n1 2\n2 3\n3 0\n").unwrap();
    /// let config = TabuConfig::default()
    ///     .with_neighborhood_size(30)
    ///     .with_max_fails(20)
    ///     .with_max_iterations(500)
    ///     .with_seed(42);
    ///
    /// let result = TabuRunner::run(&model, &config).unwrap();
    /// assert_eq!(result.best_cost, 10);
    /// ```
    pub fn run(model: &ProblemModel, config: &TabuConfig) -> Result<TabuResult, QapError> {
        Self::run_with_cancel(model, config, None)
    }

    /// Executes the search with an optional cancellation token.
    ///
    /// With a token, an unbounded configuration is accepted: the run ends
    /// when the flag is set, at the next iteration boundary.
    pub fn run_with_cancel(
        model: &ProblemModel,
        config: &TabuConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult, QapError> {
        if config.is_unbounded() && cancel.is_none() {
            return Err(QapError::InvalidConfig(
                "a run needs max_iterations or time_limit_ms".into(),
            ));
        }

        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let mut search = TabuSearch::new(model, config.clone(), rng)?;
        if let Some(flag) = cancel {
            search = search.with_cancel(flag);
        }
        Ok(Self::drive(search))
    }

    /// Consumes an already constructed search until it stops yielding.
    pub fn drive<R: Rng, N: NeighborhoodSampler>(mut search: TabuSearch<'_, R, N>) -> TabuResult {
        let mut cost_history = vec![search.initial_cost()];
        for improvement in search.by_ref() {
            cost_history.push(improvement.cost);
        }

        info!(
            iterations = search.iterations(),
            best_cost = search.best_cost(),
            improvements = cost_history.len() - 1,
            "tabu search finished"
        );

        TabuResult {
            best: search.best().to_vec(),
            best_cost: search.best_cost(),
            initial_cost: search.initial_cost(),
            iterations: search.iterations(),
            best_iteration: search.best_iteration(),
            resamples: search.resamples(),
            final_phase: search.phase(),
            cancelled: search.is_cancelled(),
            cost_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::random_model;
    use crate::model::{parse_problem, CostEvaluator};
    use crate::tabu::FallbackExit;

    const GROUPED_CYCLE: &str = "4\n2 4\n2 2\n0 5\n5 0\n0 1\n1 2\n2 3\n3 0\n";

    #[test]
    fn test_run_finds_grouped_optimum() {
        let model = parse_problem(GROUPED_CYCLE).unwrap();
        let config = TabuConfig::default()
            .with_neighborhood_size(30)
            .with_max_fails(20)
            .with_max_iterations(500)
            .with_seed(42);

        let result = TabuRunner::run(&model, &config).unwrap();

        assert_eq!(result.best_cost, 10);
        assert_eq!(result.iterations, 500);
        assert!(!result.cancelled);
        let labels: Vec<usize> = result.best.iter().map(|&f| model.label(f)).collect();
        // Same-group facilities sit on adjacent slots.
        assert_eq!(labels[0] == labels[1], labels[2] == labels[3]);
    }

    #[test]
    fn test_history_non_increasing_and_consistent() {
        let model = random_model(15, 99);
        let config = TabuConfig::default()
            .with_neighborhood_size(50)
            .with_max_fails(40)
            .with_max_iterations(800)
            .with_fallback_exit(FallbackExit::cooling())
            .with_seed(7);

        let result = TabuRunner::run(&model, &config).unwrap();

        assert_eq!(result.cost_history[0], result.initial_cost);
        assert_eq!(*result.cost_history.last().unwrap(), result.best_cost);
        for window in result.cost_history.windows(2) {
            assert!(window[1] < window[0]);
        }
        assert!(result.best_iteration <= result.iterations);
        assert_eq!(
            CostEvaluator::new(&model).full_cost(&result.best),
            result.best_cost
        );
    }

    #[test]
    fn test_unbounded_run_rejected() {
        let model = random_model(5, 1);
        let err = TabuRunner::run(&model, &TabuConfig::default()).unwrap_err();
        assert!(matches!(err, QapError::InvalidConfig(_)));
    }

    #[test]
    fn test_cancelled_unbounded_run_returns() {
        let model = random_model(5, 1);
        let flag = Arc::new(AtomicBool::new(true));
        let result =
            TabuRunner::run_with_cancel(&model, &TabuConfig::default(), Some(flag)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.improvements(), 0);
        assert_eq!(result.best_cost, result.initial_cost);
    }

    #[test]
    fn test_time_limit_stops_run() {
        let model = random_model(20, 3);
        let config = TabuConfig::default()
            .with_neighborhood_size(100)
            .with_time_limit_ms(50)
            .with_seed(1);
        let result = TabuRunner::run(&model, &config).unwrap();
        assert!(result.iterations > 0);
        assert!(!result.cancelled);
    }
}
