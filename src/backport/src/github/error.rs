//! GitHub API error types.

use thiserror::Error;

/// Errors that can occur while talking to the hosting API.
#[derive(Debug, Error)]
pub enum GitHostError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Error reported by a non-octocrab implementation.
    #[error("{0}")]
    Other(String),
}
