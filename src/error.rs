//! Error type shared by the model, parser and search engine.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised before a search can start.
///
/// Once a [`TabuSearch`](crate::tabu::TabuSearch) is constructed, no further
/// errors are produced: every move is well-formed by construction.
#[derive(Debug)]
pub enum QapError {
    /// The problem file is missing or unreadable.
    InvalidInputFile {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Dimension, group or edge data is inconsistent.
    MalformedProblemData(String),

    /// The problem has no slots to assign.
    EmptyDomain,

    /// A search parameter is out of range.
    InvalidConfig(String),
}

impl QapError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        QapError::MalformedProblemData(message.into())
    }
}

impl fmt::Display for QapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QapError::InvalidInputFile { path, source } => {
                write!(f, "cannot read problem file {}: {source}", path.display())
            }
            QapError::MalformedProblemData(message) => {
                write!(f, "malformed problem data: {message}")
            }
            QapError::EmptyDomain => write!(f, "problem dimension must be at least 1"),
            QapError::InvalidConfig(message) => write!(f, "invalid search configuration: {message}"),
        }
    }
}

impl std::error::Error for QapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QapError::InvalidInputFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_messages() {
        let err = QapError::malformed("edge 7 out of range");
        assert_eq!(err.to_string(), "malformed problem data: edge 7 out of range");
        assert_eq!(
            QapError::EmptyDomain.to_string(),
            "problem dimension must be at least 1"
        );
    }

    #[test]
    fn test_input_file_keeps_source() {
        let err = QapError::InvalidInputFile {
            path: PathBuf::from("missing.dat"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("missing.dat"));
        assert!(err.source().is_some());
        assert!(QapError::EmptyDomain.source().is_none());
    }
}
