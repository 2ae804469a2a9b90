//! Version control driver.
//!
//! The orchestrator sees git through two traits: [`VersionControl`] clones
//! the repository once per run, and the resulting [`WorkingCopy`] is moved
//! from branch to branch for each target. [`GitCli`] implements both by
//! shelling out to `git`.

mod cli;
mod error;

pub use cli::{CommitterIdentity, GitCli, GitWorkingCopy};
pub use error::GitError;

use crate::event::RepositoryRef;
use async_trait::async_trait;
use bstr::ByteSlice;

/// Produces a local working copy of a repository.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Working copy type handed out by [`clone_repository`](Self::clone_repository).
    type WorkingCopy: WorkingCopy;

    /// Clones the repository and configures the committer identity.
    async fn clone_repository(
        &self,
        repository: &RepositoryRef,
    ) -> Result<Self::WorkingCopy, GitError>;
}

/// Branch-level operations against one local clone.
///
/// Every method needs `&mut self`: only one target may drive the working
/// copy at a time.
#[async_trait]
pub trait WorkingCopy: Send {
    /// Switches to an existing (possibly remote-tracking) branch.
    async fn switch(&mut self, branch: &str) -> Result<(), GitError>;

    /// Creates a branch at the current commit and switches to it.
    async fn create_branch(&mut self, branch: &str) -> Result<(), GitError>;

    /// Cherry-picks a commit, recording the original commit in the message.
    async fn cherry_pick(&mut self, commit: &str) -> Result<(), GitError>;

    /// Aborts an in-progress cherry-pick, restoring a clean tree.
    async fn abort_cherry_pick(&mut self) -> Result<(), GitError>;

    /// Pushes a branch to `origin` and sets it as upstream.
    async fn push(&mut self, branch: &str) -> Result<(), GitError>;
}

/// Checks that a branch name is a valid partial git reference.
///
/// Names starting with `-` are rejected as well: git would read them as
/// options.
///
/// # Errors
///
/// Returns [`GitError::InvalidBranchName`] describing the violation.
pub fn validate_branch_name(name: &str) -> Result<(), GitError> {
    if name.starts_with('-') {
        return Err(GitError::InvalidBranchName {
            name: name.to_string(),
            message: "branch names cannot start with '-'".to_string(),
        });
    }
    gix_validate::reference::name_partial(name.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| GitError::InvalidBranchName {
            name: name.to_string(),
            message: e.to_string(),
        })
}
