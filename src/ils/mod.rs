//! Iterated Local Search (ILS) for the Quadratic Assignment Problem.
//!
//! A small population of random permutations is improved independently by
//! random-swap descent. When the global best has not improved for a number
//! of generations, every individual is perturbed by a few random swaps.
//!
//! # Key Types
//!
//! - [`IlsConfig`]: population, descent and perturbation parameters
//! - [`IlsRunner`]: executes the generation loop
//! - [`IlsResult`]: best solution and run statistics
//!
//! # References
//!
//! - Lourenço, H. R., Martin, O. C., Stützle, T. (2003). "Iterated Local Search",
//!   *Handbook of Metaheuristics*, 320-353.
//! - Stützle, T. (2006). "Iterated local search for the quadratic assignment problem",
//!   *European Journal of Operational Research* 174(3), 1519-1539.

mod config;
pub mod operators;
mod runner;
mod types;

pub use config::IlsConfig;
pub use runner::{IlsResult, IlsRunner};
pub use types::Individual;
