//! ILS generation loop.
//!
//! Each generation improves every individual by random-swap descent, then
//! compares the population's best with the global best. After more than
//! `stagnation_tolerance` generations without a new global best, the whole
//! population is perturbed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};
use u_numflow::random::create_rng;

use super::config::IlsConfig;
use super::operators::{local_improvement, perturb};
use super::types::Individual;
use crate::error::QapError;
use crate::model::{CostEvaluator, ProblemModel};

/// Result of an ILS run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IlsResult {
    /// Best solution found: `best[slot]` is the facility in `slot`.
    pub best: Vec<usize>,
    /// Cost of the best solution.
    pub best_cost: i64,
    /// Best cost of the random starting population.
    pub initial_cost: i64,
    /// Generations executed.
    pub generations: usize,
    /// Generation at which the best solution was found (0 = start).
    pub best_generation: usize,
    /// Number of population perturbations.
    pub perturbations: usize,
    /// Whether the run was cancelled externally.
    pub cancelled: bool,
    /// Global best cost at the end of each generation.
    pub cost_history: Vec<i64>,
}

/// Executes the ILS generation loop.
pub struct IlsRunner;

impl IlsRunner {
    /// Runs the search with the configured seed and budget.
    ///
    /// # Errors
    ///
    /// [`QapError::InvalidConfig`] if the configuration is invalid or sets
    /// neither `max_generations` nor `time_limit_ms`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_qap::ils::{IlsConfig, IlsRunner};
    /// use u_qap::model::parse_problem;
    ///
    /// let model = parse_problem("4\n2 4\n2 2\n0 5\n5 0\n0 1\n1 2\n2 3\n3 0\n").unwrap();
    /// let config = IlsConfig::default()
    ///     .with_local_search_moves(100)
    ///     .with_max_generations(20)
    ///     .with_seed(7);
    ///
    /// let result = IlsRunner::run(&model, &config).unwrap();
    /// assert_eq!(result.best_cost, 10);
    /// ```
    pub fn run(model: &ProblemModel, config: &IlsConfig) -> Result<IlsResult, QapError> {
        Self::run_with_cancel(model, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The flag is checked before every generation. With a token, an
    /// unbounded configuration is accepted.
    pub fn run_with_cancel(
        model: &ProblemModel,
        config: &IlsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<IlsResult, QapError> {
        config.validate().map_err(QapError::InvalidConfig)?;
        if config.is_unbounded() && cancel.is_none() {
            return Err(QapError::InvalidConfig(
                "a run needs max_generations or time_limit_ms".into(),
            ));
        }

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let evaluator = CostEvaluator::new(model);
        let dimension = model.dimension();
        let started = Instant::now();

        let mut population: Vec<Individual> = (0..config.population_size)
            .map(|_| Individual::random(&evaluator, dimension, &mut rng))
            .collect();
        population.sort_by_key(|ind| ind.cost);
        let mut best = population[0].clone();
        let initial_cost = best.cost;
        debug!(
            dimension,
            population = config.population_size,
            initial_cost,
            "ils initialised"
        );

        let mut cost_history = Vec::new();
        let mut generations = 0usize;
        let mut best_generation = 0usize;
        let mut stagnation = 0usize;
        let mut perturbations = 0usize;
        let mut cancelled = false;

        while config.max_generations == 0 || generations < config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    break;
                }
            }
            generations += 1;

            let seeds: Vec<u64> = (0..population.len()).map(|_| rng.random()).collect();
            improve_population(&evaluator, &mut population, &seeds, config);

            population.sort_by_key(|ind| ind.cost);
            if population[0].cost < best.cost {
                best.clone_from(&population[0]);
                best_generation = generations;
                stagnation = 0;
                info!(generation = generations, cost = best.cost, "new best");
            } else {
                stagnation += 1;
                if stagnation > config.stagnation_tolerance {
                    for individual in &mut population {
                        perturb(&evaluator, individual, config.perturbation_swaps, &mut rng);
                    }
                    perturbations += 1;
                    stagnation = 0;
                    debug!(generation = generations, "population perturbed");
                }
            }
            cost_history.push(best.cost);
        }

        info!(
            generations,
            best_cost = best.cost,
            perturbations,
            "ils finished"
        );

        Ok(IlsResult {
            best: best.solution,
            best_cost: best.cost,
            initial_cost,
            generations,
            best_generation,
            perturbations,
            cancelled,
            cost_history,
        })
    }
}

/// Runs the descent on every individual, each with its own seeded generator.
fn improve_population(
    evaluator: &CostEvaluator<'_>,
    population: &mut [Individual],
    seeds: &[u64],
    config: &IlsConfig,
) {
    let improve = |(individual, &seed): (&mut Individual, &u64)| {
        let mut rng = create_rng(seed);
        local_improvement(evaluator, individual, config.local_search_moves, &mut rng);
    };

    #[cfg(feature = "parallel")]
    if config.parallel {
        population.par_iter_mut().zip(seeds.par_iter()).for_each(improve);
        return;
    }

    population.iter_mut().zip(seeds).for_each(improve);
}
