//! Errors crossing the core boundary.
//!
//! Two kinds per the spec: a [`ConfigError`], returned before any run begins,
//! and a run-time [`Error::Contradiction`] that a caller typically handles by
//! retrying with a fresh seed.

use thiserror::Error;

/// Invalid or unsatisfiable [`crate::options::Options`], detected before
/// extraction or solving begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("pattern_size must be at least 2, got {0}")]
    PatternTooSmall(usize),

    #[error(
        "non-periodic output {axis} ({got}) is smaller than pattern_size ({pattern_size})"
    )]
    OutputTooSmall { axis: &'static str, got: usize, pattern_size: usize },

    #[error("exemplar produced zero patterns")]
    EmptyPatternSet,
}

/// Top-level error returned by [`crate::solver::Solver`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("propagation produced a contradiction: cell {cell} has no admissible patterns")]
    Contradiction { cell: usize },
}
