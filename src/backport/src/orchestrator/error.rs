//! Orchestrator error types.
//!
//! [`BackportError`] aborts the whole run. [`TargetError`] is scoped to a
//! single base branch and ends up in that branch's
//! [`TargetOutcome`](crate::summary::TargetOutcome) instead of propagating.

use crate::git::GitError;
use crate::github::GitHostError;
use crate::labels::LabelError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Fatal errors: the run stops before any side effect of the failing step.
#[derive(Debug, Error)]
pub enum BackportError {
    /// The source pull request was not merged.
    #[error("Pull request #{number} is not merged; refusing to backport")]
    NotMerged { number: u64 },

    /// The source pull request carries no merge commit.
    #[error("Pull request #{number} has no merge commit; refusing to backport")]
    MissingMergeCommit { number: u64 },

    /// The label pattern is misconfigured.
    #[error("Invalid backport configuration: {0}")]
    Configuration(#[from] LabelError),
}

/// Errors that fail a single backport target.
#[derive(Debug, Error)]
pub enum TargetError {
    /// Head branch, title or body could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A git command failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// Publishing the pull request failed.
    #[error(transparent)]
    Publish(#[from] GitHostError),
}
