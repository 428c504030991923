//! Dependency-inference errors.

use thiserror::Error;

pub type DependencyResult<T> = Result<T, DependencyError>;

#[derive(Debug, Error)]
pub enum DependencyError {
    /// The structural diff between two consecutive snapshots matches no
    /// single-step mutation shape. This is a logic error, not recoverable.
    #[error("Inconsistent structural mutation: {0}")]
    InconsistentMutation(String),
}

impl DependencyError {
    pub fn inconsistent(detail: impl Into<String>) -> Self {
        Self::InconsistentMutation(detail.into())
    }
}
