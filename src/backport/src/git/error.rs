//! Version control error types.

use thiserror::Error;

/// Errors that can occur while driving git.
#[derive(Debug, Error)]
pub enum GitError {
    /// Failed to create the temporary working directory.
    #[error("Failed to create working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    /// The clone URL could not be built.
    #[error("Invalid clone URL for '{repository}': {message}")]
    InvalidUrl { repository: String, message: String },

    /// The git binary could not be spawned.
    #[error("Failed to execute git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A git command exited unsuccessfully.
    #[error("git {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// A generated branch name is not a valid git reference.
    #[error("Invalid branch name '{name}': {message}")]
    InvalidBranchName { name: String, message: String },
}
