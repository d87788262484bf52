//! ILS configuration.

/// Configuration for the population-based iterated local search.
///
/// # Defaults
///
/// ```
/// use u_qap::ils::IlsConfig;
///
/// let config = IlsConfig::default();
/// assert_eq!(config.population_size, 5);
/// assert_eq!(config.local_search_moves, 50_000);
/// assert_eq!(config.max_generations, 10_000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IlsConfig {
    /// Number of individuals improved in every generation.
    pub population_size: usize,

    /// Random swaps attempted per individual and generation.
    ///
    /// A swap is kept if it does not worsen the individual's cost.
    pub local_search_moves: usize,

    /// Generations without a new global best tolerated before the
    /// population is perturbed.
    pub stagnation_tolerance: usize,

    /// Random swaps applied to each individual when perturbing.
    pub perturbation_swaps: usize,

    /// Generation budget. 0 = no limit.
    pub max_generations: usize,

    /// Optional wall-clock limit in milliseconds, checked once per generation.
    pub time_limit_ms: Option<u64>,

    /// Run the descent of all individuals in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Every individual draws
    /// from its own seeded generator, so results match the sequential path.
    pub parallel: bool,

    /// Random seed. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            population_size: 5,
            local_search_moves: 50_000,
            stagnation_tolerance: 10,
            perturbation_swaps: 15,
            max_generations: 10_000,
            time_limit_ms: None,
            parallel: false,
            seed: None,
        }
    }
}

impl IlsConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the random swaps attempted per individual and generation.
    pub fn with_local_search_moves(mut self, n: usize) -> Self {
        self.local_search_moves = n;
        self
    }

    /// Sets the stagnating generations tolerated before a perturbation.
    pub fn with_stagnation_tolerance(mut self, n: usize) -> Self {
        self.stagnation_tolerance = n;
        self
    }

    /// Sets the random swaps applied per individual when perturbing.
    pub fn with_perturbation_swaps(mut self, n: usize) -> Self {
        self.perturbation_swaps = n;
        self
    }

    /// Sets the generation budget (0 = no limit).
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the wall-clock limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets whether individuals are improved in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns `true` if neither a generation nor a time limit is set.
    pub fn is_unbounded(&self) -> bool {
        self.max_generations == 0 && self.time_limit_ms.is_none()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.local_search_moves == 0 {
            return Err("local_search_moves must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = IlsConfig::default();
        assert_eq!(config.stagnation_tolerance, 10);
        assert_eq!(config.perturbation_swaps, 15);
        assert!(config.time_limit_ms.is_none());
        assert!(!config.parallel);
        assert!(!config.is_unbounded());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = IlsConfig::default()
            .with_population_size(3)
            .with_local_search_moves(200)
            .with_stagnation_tolerance(4)
            .with_perturbation_swaps(2)
            .with_max_generations(0)
            .with_time_limit_ms(500)
            .with_parallel(true)
            .with_seed(11);

        assert_eq!(config.population_size, 3);
        assert_eq!(config.local_search_moves, 200);
        assert_eq!(config.stagnation_tolerance, 4);
        assert_eq!(config.perturbation_swaps, 2);
        assert_eq!(config.max_generations, 0);
        assert_eq!(config.time_limit_ms, Some(500));
        assert!(config.parallel);
        assert_eq!(config.seed, Some(11));
        assert!(!config.is_unbounded());
    }

    #[test]
    fn test_validate_rejects_empty_population_and_descent() {
        assert!(IlsConfig::default().with_population_size(0).validate().is_err());
        assert!(IlsConfig::default().with_local_search_moves(0).validate().is_err());
        assert!(IlsConfig::default().with_time_limit_ms(0).validate().is_err());
        assert!(IlsConfig::default().with_max_generations(0).is_unbounded());
    }
}
