//! Tabu Search configuration.

/// How the search leaves the fallback (random-walk) phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FallbackExit {
    /// Stay in the fallback phase for the rest of the run.
    #[default]
    Never,

    /// Decay a temperature every fallback iteration and return to the tabu
    /// phase once it drops below `min_temperature`.
    ///
    /// `T_{k+1} = alpha * T_k`, starting from `initial_temperature` on each
    /// entry into the fallback phase.
    Cooling {
        /// Temperature set on entering the fallback phase.
        initial_temperature: f64,
        /// Cooling factor in (0, 1).
        alpha: f64,
        /// Threshold below which the tabu phase resumes.
        min_temperature: f64,
    },
}

impl FallbackExit {
    /// Cooling from 100 with factor 0.95 down to 1e-3 (about 225 iterations).
    pub fn cooling() -> Self {
        FallbackExit::Cooling {
            initial_temperature: 100.0,
            alpha: 0.95,
            min_temperature: 1e-3,
        }
    }
}

/// Configuration parameters for the QAP tabu search.
///
/// # Examples
///
/// ```
/// use u_qap::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_neighborhood_size(2_000)
///     .with_max_fails(500)
///     .with_max_iterations(10_000)
///     .with_seed(7);
/// assert_eq!(config.neighborhood_size, 2_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Candidate swaps sampled per tabu iteration.
    pub neighborhood_size: usize,

    /// Consecutive non-improving tabu iterations before switching to the
    /// fallback phase.
    pub max_fails: usize,

    /// Tabu list capacity. `None` derives it from the dimension
    /// (see [`tabu_length`](super::tabu_length)).
    pub tabu_length: Option<usize>,

    /// Whether a tabu candidate that beats the best known cost is admissible.
    pub aspiration: bool,

    /// Whether sampled swaps may pick the same slot twice (a no-op move).
    pub allow_self_moves: bool,

    /// Exit policy of the fallback phase.
    pub fallback_exit: FallbackExit,

    /// Iteration budget. 0 = no limit.
    pub max_iterations: usize,

    /// Optional wall-clock limit in milliseconds, checked once per iteration.
    pub time_limit_ms: Option<u64>,

    /// Evaluate candidate costs in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature; results are identical
    /// to the sequential path.
    pub parallel: bool,

    /// Random seed. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            neighborhood_size: 10_000,
            max_fails: 2_500,
            tabu_length: None,
            aspiration: true,
            allow_self_moves: true,
            fallback_exit: FallbackExit::Never,
            max_iterations: 0,
            time_limit_ms: None,
            parallel: false,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the number of candidate swaps sampled per tabu iteration.
    pub fn with_neighborhood_size(mut self, n: usize) -> Self {
        self.neighborhood_size = n;
        self
    }

    /// Sets the non-improving iteration count that triggers the fallback phase.
    pub fn with_max_fails(mut self, n: usize) -> Self {
        self.max_fails = n;
        self
    }

    /// Sets a fixed tabu list capacity instead of deriving it.
    pub fn with_tabu_length(mut self, n: usize) -> Self {
        self.tabu_length = Some(n);
        self
    }

    /// Sets whether tabu moves beating the best cost are admissible.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Sets whether sampled swaps may pick the same slot twice.
    pub fn with_self_moves(mut self, allow: bool) -> Self {
        self.allow_self_moves = allow;
        self
    }

    /// Sets the exit policy of the fallback phase.
    pub fn with_fallback_exit(mut self, exit: FallbackExit) -> Self {
        self.fallback_exit = exit;
        self
    }

    /// Sets the iteration budget (0 = no limit).
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the wall-clock limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets whether candidate costs are evaluated in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns `true` if neither an iteration nor a time limit is set.
    pub fn is_unbounded(&self) -> bool {
        self.max_iterations == 0 && self.time_limit_ms.is_none()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.neighborhood_size == 0 {
            return Err("neighborhood_size must be at least 1".into());
        }
        if self.max_fails == 0 {
            return Err("max_fails must be at least 1".into());
        }
        if self.tabu_length == Some(0) {
            return Err("tabu_length must be positive or None".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        if let FallbackExit::Cooling {
            initial_temperature,
            alpha,
            min_temperature,
        } = self.fallback_exit
        {
            if min_temperature <= 0.0 {
                return Err("min_temperature must be positive".into());
            }
            if initial_temperature <= min_temperature {
                return Err("initial_temperature must exceed min_temperature".into());
            }
            if alpha <= 0.0 || alpha >= 1.0 {
                return Err(format!("cooling alpha must be in (0, 1), got {alpha}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TabuConfig::default();
        assert_eq!(config.neighborhood_size, 10_000);
        assert_eq!(config.max_fails, 2_500);
        assert!(config.tabu_length.is_none());
        assert!(config.aspiration);
        assert!(config.allow_self_moves);
        assert_eq!(config.fallback_exit, FallbackExit::Never);
        assert_eq!(config.max_iterations, 0);
        assert!(config.is_unbounded());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = TabuConfig::default()
            .with_neighborhood_size(50)
            .with_max_fails(3)
            .with_tabu_length(4)
            .with_aspiration(false)
            .with_self_moves(false)
            .with_fallback_exit(FallbackExit::cooling())
            .with_max_iterations(100)
            .with_time_limit_ms(2_000)
            .with_parallel(true)
            .with_seed(9);

        assert_eq!(config.neighborhood_size, 50);
        assert_eq!(config.max_fails, 3);
        assert_eq!(config.tabu_length, Some(4));
        assert!(!config.aspiration);
        assert!(!config.allow_self_moves);
        assert!(matches!(config.fallback_exit, FallbackExit::Cooling { .. }));
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.time_limit_ms, Some(2_000));
        assert!(config.parallel);
        assert_eq!(config.seed, Some(9));
        assert!(!config.is_unbounded());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_sizes() {
        assert!(TabuConfig::default().with_neighborhood_size(0).validate().is_err());
        assert!(TabuConfig::default().with_max_fails(0).validate().is_err());
        assert!(TabuConfig::default().with_tabu_length(0).validate().is_err());
        assert!(TabuConfig::default().with_time_limit_ms(0).validate().is_err());
    }

    #[test]
    fn test_validate_cooling() {
        let bad_alpha = FallbackExit::Cooling {
            initial_temperature: 10.0,
            alpha: 1.2,
            min_temperature: 0.1,
        };
        assert!(TabuConfig::default().with_fallback_exit(bad_alpha).validate().is_err());

        let inverted = FallbackExit::Cooling {
            initial_temperature: 0.1,
            alpha: 0.9,
            min_temperature: 1.0,
        };
        assert!(TabuConfig::default().with_fallback_exit(inverted).validate().is_err());
    }
}
