//! Runner error types.

/// Errors that end a run with a failure status.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading or validation errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Webhook payload errors.
    #[error(transparent)]
    Event(#[from] crate::event::EventError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Fatal backport errors.
    #[error(transparent)]
    Backport(#[from] crate::orchestrator::BackportError),
}
