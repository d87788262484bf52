//! Quadratic Assignment Problem solver.
//!
//! Assigns facilities to slots so that the total flow between facilities
//! placed on adjacent slots is minimal. The search is a tabu search over
//! random pairwise swaps with a random-walk fallback phase:
//!
//! - **Model** ([`model`]): validated instance data, full and incremental
//!   cost evaluation, and the text file reader.
//! - **Tabu Search** ([`tabu`]): tabu memory, neighbourhood sampling and
//!   the search engine, exposed as an iterator of improvements.
//! - **Iterated Local Search** ([`ils`]): a population-based alternative
//!   using random-swap descent and perturbation on stagnation.
//! - **Output** ([`output`]): group-labelled assignment printing.
//!
//! # Example
//!
//! ```
//! use u_qap::model::parse_problem;
//! use u_qap::tabu::{TabuConfig, TabuRunner};
//!
//! let model = parse_problem("4\n2 4\n2 2\n0 5\n5 0\n0 1\n1 2\n2 3\n3 0\n").unwrap();
//! let config = TabuConfig::default()
//!     .with_neighborhood_size(30)
//!     .with_max_iterations(200)
//!     .with_seed(3);
//! let result = TabuRunner::run(&model, &config).unwrap();
//! assert!(result.best_cost <= result.initial_cost);
//! ```

pub mod error;
pub mod ils;
pub mod model;
pub mod output;
pub mod tabu;

pub use error::QapError;
