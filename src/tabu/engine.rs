//! Tabu search state machine.
//!
//! # Algorithm
//!
//! Starting from a shuffled permutation, the engine alternates between two
//! phases:
//!
//! 1. **Tabu phase**: sample a batch of random swaps, take the cheapest one
//!    that is not tabu (or that beats the incumbent, by aspiration), apply
//!    it and remember it in the tabu list. After `max_fails` consecutive
//!    iterations without a new best, restart from the incumbent in the
//!    fallback phase.
//! 2. **Fallback phase**: draw one random swap of the incumbent per
//!    iteration and keep it if it does not worsen the cost.
//!
//! The fallback phase is final unless [`FallbackExit::Cooling`] is set.
//!
//! The engine is an [`Iterator`] over [`Improvement`]s. It stops yielding
//! once the configured iteration or time budget is spent or the cancel flag
//! is raised; without any of these it never stops on its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, trace};
use u_numflow::random::shuffle;

use super::config::{FallbackExit, TabuConfig};
use super::memory::{tabu_length, TabuMemory};
use super::neighborhood::{draw_pair, NeighborhoodSampler, RandomSwapSampler};
use super::types::{Improvement, Neighbour, Phase, TabuMove};
use crate::error::QapError;
use crate::model::{CostEvaluator, ProblemModel};

/// A running tabu search over one [`ProblemModel`].
pub struct TabuSearch<'a, R: Rng, N: NeighborhoodSampler = RandomSwapSampler> {
    evaluator: CostEvaluator<'a>,
    config: TabuConfig,
    rng: R,
    sampler: N,
    memory: TabuMemory,
    phase: Phase,

    current: Vec<usize>,
    current_cost: i64,
    best: Vec<usize>,
    best_cost: i64,
    initial_cost: i64,

    fails: usize,
    temperature: f64,
    iterations: usize,
    best_iteration: usize,
    resamples: usize,

    started: Instant,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a, R: Rng> TabuSearch<'a, R> {
    /// Creates a search using uniform random swaps as neighbourhood.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_numflow::random::create_rng;
    /// use u_qap::model::ProblemModel;
    /// use u_qap::tabu::{TabuConfig, TabuSearch};
    ///
    /// let flow = vec![vec![1; 4]; 4];
    /// let model = ProblemModel::from_edges(flow, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    /// let config = TabuConfig::default()
    ///     .with_neighborhood_size(20)
    ///     .with_max_iterations(100);
    ///
    /// let mut search = TabuSearch::new(&model, config, create_rng(1)).unwrap();
    /// let improvements: Vec<_> = search.by_ref().collect();
    /// assert!(improvements.is_empty());
    /// assert_eq!(search.best_cost(), 4);
    /// assert_eq!(search.iterations(), 100);
    /// ```
    pub fn new(model: &'a ProblemModel, config: TabuConfig, rng: R) -> Result<Self, QapError> {
        let sampler = RandomSwapSampler {
            allow_self_moves: config.allow_self_moves,
            parallel: config.parallel,
        };
        Self::with_sampler(model, config, rng, sampler)
    }
}

impl<'a, R: Rng, N: NeighborhoodSampler> TabuSearch<'a, R, N> {
    /// Creates a search with a custom neighbourhood sampler.
    ///
    /// # Errors
    ///
    /// [`QapError::InvalidConfig`] if `config` does not validate.
    pub fn with_sampler(
        model: &'a ProblemModel,
        config: TabuConfig,
        mut rng: R,
        sampler: N,
    ) -> Result<Self, QapError> {
        config.validate().map_err(QapError::InvalidConfig)?;
        let dimension = model.dimension();
        if dimension == 0 {
            return Err(QapError::EmptyDomain);
        }

        let evaluator = CostEvaluator::new(model);
        let mut solution: Vec<usize> = (0..dimension).collect();
        shuffle(&mut solution, &mut rng);
        let cost = evaluator.full_cost(&solution);

        let capacity = config.tabu_length.unwrap_or_else(|| tabu_length(dimension));
        debug!(dimension, tabu_length = capacity, initial_cost = cost, "tabu search initialised");

        Ok(Self {
            evaluator,
            config,
            rng,
            sampler,
            memory: TabuMemory::new(capacity),
            phase: Phase::Tabu,
            current: solution.clone(),
            current_cost: cost,
            best: solution,
            best_cost: cost,
            initial_cost: cost,
            fails: 0,
            temperature: 0.0,
            iterations: 0,
            best_iteration: 0,
            resamples: 0,
            started: Instant::now(),
            cancel: None,
        })
    }

    /// Stops iteration once `flag` is set to `true`.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Phase the next iteration will run in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Best solution found so far.
    pub fn best(&self) -> &[usize] {
        &self.best
    }

    /// Cost of the best solution.
    pub fn best_cost(&self) -> i64 {
        self.best_cost
    }

    /// Working solution of the current phase.
    pub fn current(&self) -> &[usize] {
        &self.current
    }

    /// Cost of the working solution.
    pub fn current_cost(&self) -> i64 {
        self.current_cost
    }

    /// Cost of the shuffled starting permutation.
    pub fn initial_cost(&self) -> i64 {
        self.initial_cost
    }

    /// Iterations executed, including resampled ones.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Iteration of the latest improvement (0 = starting solution).
    pub fn best_iteration(&self) -> usize {
        self.best_iteration
    }

    /// Tabu iterations that found no admissible candidate.
    pub fn resamples(&self) -> usize {
        self.resamples
    }

    /// Consecutive non-improving tabu iterations.
    pub fn fails(&self) -> usize {
        self.fails
    }

    /// Tabu list of recently applied swaps.
    pub fn memory(&self) -> &TabuMemory {
        &self.memory
    }

    /// Returns `true` if the cancel flag has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Returns `true` once the iteration or time budget is spent or the
    /// search was cancelled.
    pub fn is_exhausted(&self) -> bool {
        if self.config.max_iterations > 0 && self.iterations >= self.config.max_iterations {
            return true;
        }
        if let Some(limit) = self.config.time_limit_ms {
            if self.started.elapsed().as_millis() >= u128::from(limit) {
                return true;
            }
        }
        self.is_cancelled()
    }

    /// Runs a single iteration of the current phase, ignoring the budget.
    ///
    /// Returns the new incumbent if the iteration improved on it.
    pub fn step(&mut self) -> Option<Improvement> {
        self.iterations += 1;
        match self.phase {
            Phase::Tabu => self.tabu_step(),
            Phase::Fallback => self.fallback_step(),
        }
    }

    fn tabu_step(&mut self) -> Option<Improvement> {
        let batch = self.sampler.sample(
            &self.evaluator,
            &self.current,
            self.current_cost,
            self.config.neighborhood_size,
            &mut self.rng,
        );

        let Some(chosen) = self.select(&batch) else {
            self.resamples += 1;
            trace!(iteration = self.iterations, "no admissible candidate");
            return None;
        };

        self.current.swap(chosen.r, chosen.s);
        self.current_cost = chosen.cost;

        let improvement = if self.current_cost < self.best_cost {
            self.best.clone_from(&self.current);
            self.best_cost = self.current_cost;
            self.fails = 0;
            Some(self.improvement())
        } else {
            self.fails += 1;
            None
        };

        self.memory
            .record(TabuMove::applied(&self.current, chosen.r, chosen.s));

        if self.fails >= self.config.max_fails {
            self.enter_fallback();
        }
        improvement
    }

    /// Cheapest admissible candidate of an ascending batch.
    ///
    /// Once an improving candidate has been tried and rejected, candidates
    /// matching the current cost are skipped.
    fn select(&self, batch: &[Neighbour]) -> Option<Neighbour> {
        let mut tried_improving = false;
        for n in batch {
            if tried_improving && n.cost == self.current_cost {
                continue;
            }
            if self.memory.is_allowed(n.r, n.s, &self.current)
                || (self.config.aspiration && n.cost < self.best_cost)
            {
                return Some(*n);
            }
            tried_improving |= n.cost < self.current_cost;
        }
        None
    }

    fn enter_fallback(&mut self) {
        self.fails = 0;
        self.current.clone_from(&self.best);
        self.current_cost = self.best_cost;
        self.phase = Phase::Fallback;
        if let FallbackExit::Cooling {
            initial_temperature,
            ..
        } = self.config.fallback_exit
        {
            self.temperature = initial_temperature;
        }
        info!(
            iteration = self.iterations,
            best_cost = self.best_cost,
            "entering fallback phase"
        );
    }

    // In this phase `current` and `best` hold the same permutation.
    fn fallback_step(&mut self) -> Option<Improvement> {
        let (r, s) = draw_pair(
            &mut self.rng,
            self.current.len(),
            self.config.allow_self_moves,
        );
        let candidate = self.best_cost + self.evaluator.move_cost(&self.current, r, s);

        let mut improvement = None;
        if candidate <= self.best_cost {
            let improved = candidate < self.best_cost;
            self.current.swap(r, s);
            self.best.swap(r, s);
            self.current_cost = candidate;
            self.best_cost = candidate;
            if improved {
                improvement = Some(self.improvement());
            }
        }

        if let FallbackExit::Cooling {
            alpha,
            min_temperature,
            ..
        } = self.config.fallback_exit
        {
            self.temperature *= alpha;
            if self.temperature < min_temperature {
                self.phase = Phase::Tabu;
                self.fails = 0;
                info!(
                    iteration = self.iterations,
                    best_cost = self.best_cost,
                    "resuming tabu phase"
                );
            }
        }
        improvement
    }

    fn improvement(&mut self) -> Improvement {
        self.best_iteration = self.iterations;
        info!(
            iteration = self.iterations,
            cost = self.best_cost,
            phase = ?self.phase,
            "new best"
        );
        Improvement {
            iteration: self.iterations,
            phase: self.phase,
            cost: self.best_cost,
            solution: self.best.clone(),
        }
    }
}

impl<R: Rng, N: NeighborhoodSampler> Iterator for TabuSearch<'_, R, N> {
    type Item = Improvement;

    fn next(&mut self) -> Option<Improvement> {
        while !self.is_exhausted() {
            if let Some(improvement) = self.step() {
                return Some(improvement);
            }
        }
        None
    }
}
