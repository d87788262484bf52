//! Problem model: instance data, objective evaluation and file parsing.
//!
//! A [`ProblemModel`] is built once (usually by [`parse_problem`] or
//! [`read_problem`]) and borrowed read-only by the search engine. The
//! [`CostEvaluator`] computes the objective from scratch and the exact
//! cost change of a pairwise swap in time proportional to the degree of
//! the two slots involved.

mod cost;
mod parser;
mod types;

pub use cost::CostEvaluator;
pub use parser::{parse_problem, read_problem};
pub use types::{GroupLayout, ProblemModel};
