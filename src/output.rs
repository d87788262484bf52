//! Solution output.
//!
//! An assignment is written as one integer per slot, separated by spaces:
//! the group of the facility placed there (or the facility id itself when
//! the model has no group layout).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::model::ProblemModel;
use crate::tabu::{NeighborhoodSampler, TabuSearch};

/// Renders `solution` as a line of per-slot labels.
pub fn format_assignment(model: &ProblemModel, solution: &[usize]) -> String {
    solution
        .iter()
        .map(|&facility| model.label(facility).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Persists every new best assignment to a file, overwriting it each time,
/// and optionally echoes it to another writer.
pub struct SolutionWriter<W: Write> {
    path: PathBuf,
    echo: Option<W>,
}

impl<W: Write> SolutionWriter<W> {
    /// Creates a writer targeting `path`, echoing to `echo` if given.
    pub fn new(path: impl Into<PathBuf>, echo: Option<W>) -> Self {
        Self {
            path: path.into(),
            echo,
        }
    }

    /// File the assignments are written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes one assignment.
    pub fn write(&mut self, model: &ProblemModel, solution: &[usize]) -> io::Result<()> {
        let line = format_assignment(model, solution);
        if let Some(echo) = self.echo.as_mut() {
            writeln!(echo, "{line}")?;
            echo.flush()?;
        }
        fs::write(&self.path, format!("{line}\n"))
    }

    /// Writes every improvement `search` yields until it stops. If it
    /// yields none, the incumbent is written once at the end.
    ///
    /// Returns the number of assignments written.
    pub fn write_search<R: Rng, N: NeighborhoodSampler>(
        &mut self,
        model: &ProblemModel,
        search: &mut TabuSearch<'_, R, N>,
    ) -> io::Result<usize> {
        let mut written = 0;
        for improvement in search.by_ref() {
            self.write(model, &improvement.solution)?;
            written += 1;
        }
        if written == 0 {
            self.write(model, search.best())?;
            written = 1;
        }
        Ok(written)
    }
}
