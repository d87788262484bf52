//! Text format reader.
//!
//! ```text
//! <dimension>
//! <groups> <edges>
//! <size_0> ... <size_{groups-1}>
//! <groups x groups energy matrix>
//! <edges lines of "a b">
//! ```
//!
//! Facility `f` belongs to the group whose cumulative size range contains
//! `f`; the flow between two facilities is the energy between their groups.

use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use tracing::debug;

use super::types::{GroupLayout, ProblemModel};
use crate::error::QapError;

/// Reads and parses a problem file.
///
/// # Errors
///
/// [`QapError::InvalidInputFile`] if the file cannot be read, otherwise
/// whatever [`parse_problem`] reports.
pub fn read_problem(path: impl AsRef<Path>) -> Result<ProblemModel, QapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| QapError::InvalidInputFile {
        path: path.to_path_buf(),
        source,
    })?;
    let model = parse_problem(&text)?;
    debug!(
        path = %path.display(),
        dimension = model.dimension(),
        edges = model.edge_count(),
        "problem loaded"
    );
    Ok(model)
}

/// Parses a problem from its textual form.
pub fn parse_problem(text: &str) -> Result<ProblemModel, QapError> {
    let mut tokens = Tokens::new(text);

    let dimension: usize = tokens.next("dimension")?;
    if dimension == 0 {
        return Err(QapError::EmptyDomain);
    }
    let group_count: usize = tokens.next("group count")?;
    let edge_count: usize = tokens.next("edge count")?;
    if group_count == 0 {
        return Err(QapError::malformed("group count must be at least 1"));
    }

    let sizes = (0..group_count)
        .map(|g| tokens.next::<usize>(&format!("size of group {g}")))
        .collect::<Result<Vec<_>, _>>()?;
    let groups = GroupLayout::from_sizes(&sizes);
    if groups.total() != dimension {
        return Err(QapError::malformed(format!(
            "group sizes sum to {}, expected dimension {dimension}",
            groups.total()
        )));
    }

    let mut energies = vec![vec![0i64; group_count]; group_count];
    for (a, row) in energies.iter_mut().enumerate() {
        for (b, cell) in row.iter_mut().enumerate() {
            *cell = tokens.next(&format!("energy ({a}, {b})"))?;
        }
    }

    let membership: Vec<usize> = (0..dimension).map(|f| groups.group_of(f)).collect();
    let flow: Vec<Vec<i64>> = membership
        .iter()
        .map(|&ga| membership.iter().map(|&gb| energies[ga][gb]).collect())
        .collect();

    let mut edges = Vec::with_capacity(edge_count);
    for e in 0..edge_count {
        let a: usize = tokens.next(&format!("edge {e} endpoint"))?;
        let b: usize = tokens.next(&format!("edge {e} endpoint"))?;
        edges.push((a, b));
    }
    if let Some(extra) = tokens.rest() {
        return Err(QapError::malformed(format!(
            "unexpected token {extra:?} after {edge_count} edges"
        )));
    }

    ProblemModel::from_edges(flow, &edges)?.with_groups(groups)
}

struct Tokens<'t> {
    inner: SplitWhitespace<'t>,
}

impl<'t> Tokens<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T, QapError> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| QapError::malformed(format!("missing {what}")))?;
        token
            .parse()
            .map_err(|_| QapError::malformed(format!("invalid {what}: {token:?}")))
    }

    fn rest(&mut self) -> Option<&'t str> {
        self.inner.next()
    }
}
