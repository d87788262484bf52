//! Tabu Search (TS) for the Quadratic Assignment Problem.
//!
//! A single-solution trajectory metaheuristic over permutations. Each
//! iteration samples random pairwise swaps, evaluates them incrementally
//! and applies the best one the tabu list admits. Repeated failure to
//! improve hands over to a random walk from the incumbent.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Taillard, E. (1991). "Robust taboo search for the quadratic assignment problem",
//!   *Parallel Computing* 17, 443-455.

mod config;
mod engine;
mod memory;
mod neighborhood;
mod runner;
mod types;

pub use config::{FallbackExit, TabuConfig};
pub use engine::TabuSearch;
pub use memory::{tabu_length, TabuMemory};
pub use neighborhood::{draw_pair, NeighborhoodSampler, RandomSwapSampler};
pub use runner::{TabuResult, TabuRunner};
pub use types::{Improvement, Neighbour, Phase, TabuMove};
