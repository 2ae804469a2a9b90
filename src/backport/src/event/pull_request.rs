//! Source pull request snapshot.

use serde::Serialize;
use std::fmt;

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepositoryRef {
    /// Creates a repository reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Returns the repository in "owner/name" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Immutable snapshot of the pull request that triggered the run.
#[derive(Debug, Clone, Serialize)]
pub struct SourcePullRequest {
    /// Pull request number.
    pub number: u64,

    /// Pull request title.
    pub title: String,

    /// Pull request body; empty when the description was left blank.
    pub body: String,

    /// Label names, in the order GitHub reports them.
    pub labels: Vec<String>,

    /// Commit created when the pull request was merged.
    pub merge_commit_sha: Option<String>,

    /// Whether the pull request was merged.
    pub merged: bool,

    /// Login of the pull request author.
    pub author: String,

    /// Login of the user who merged the pull request.
    pub merged_by: Option<String>,

    /// Repository the pull request was merged into.
    pub repository: RepositoryRef,
}

impl SourcePullRequest {
    /// Returns the merge commit if the pull request carries a non-empty one.
    #[must_use]
    pub fn merge_commit(&self) -> Option<&str> {
        self.merge_commit_sha
            .as_deref()
            .map(str::trim)
            .filter(|sha| !sha.is_empty())
    }
}
