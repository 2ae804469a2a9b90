//! `git` command line adapter.

use super::{GitError, VersionControl, WorkingCopy};
use crate::event::RepositoryRef;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info};
use url::Url;

/// Identity recorded as committer of cherry-picked commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitterIdentity {
    /// `user.name`
    pub name: String,

    /// `user.email`
    pub email: String,
}

impl Default for CommitterIdentity {
    fn default() -> Self {
        Self {
            name: "github-actions[bot]".to_string(),
            email: "41898282+github-actions[bot]@users.noreply.github.com".to_string(),
        }
    }
}

/// Clones repositories with the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    server_url: Url,
    token: String,
    committer: CommitterIdentity,
}

impl GitCli {
    /// Creates an adapter cloning from `server_url` with an access token.
    pub fn new(mut server_url: Url, token: String, committer: CommitterIdentity) -> Self {
        // `Url::join` replaces the last path segment unless it ends with '/'.
        if !server_url.path().ends_with('/') {
            let path = format!("{}/", server_url.path());
            server_url.set_path(&path);
        }
        Self {
            server_url,
            token,
            committer,
        }
    }

    /// Builds the authenticated clone URL for a repository.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::InvalidUrl`] if the server URL cannot carry
    /// credentials.
    pub fn clone_url(&self, repository: &RepositoryRef) -> Result<Url, GitError> {
        let invalid = |message: &str| GitError::InvalidUrl {
            repository: repository.full_name(),
            message: message.to_string(),
        };

        let mut url = self
            .server_url
            .join(&format!("{}/{}.git", repository.owner, repository.name))
            .map_err(|e| invalid(&e.to_string()))?;
        url.set_username("x-access-token")
            .map_err(|()| invalid("URL cannot have a username"))?;
        url.set_password(Some(&self.token))
            .map_err(|()| invalid("URL cannot have a password"))?;
        Ok(url)
    }
}

#[async_trait]
impl VersionControl for GitCli {
    type WorkingCopy = GitWorkingCopy;

    async fn clone_repository(
        &self,
        repository: &RepositoryRef,
    ) -> Result<GitWorkingCopy, GitError> {
        info!(repo = %repository, "Cloning repository");

        let dir = tempfile::tempdir().map_err(GitError::WorkingDirectory)?;
        let url = self.clone_url(repository)?;
        let working_copy = GitWorkingCopy {
            path: dir.path().to_path_buf(),
            _dir: Some(dir),
            token: self.token.clone(),
        };

        working_copy.run(&["clone", url.as_str(), "."]).await?;
        working_copy
            .run(&["config", "user.name", &self.committer.name])
            .await?;
        working_copy
            .run(&["config", "user.email", &self.committer.email])
            .await?;

        Ok(working_copy)
    }
}

/// A local clone driven through `git` subprocesses.
///
/// The temporary directory lives as long as the working copy.
#[derive(Debug)]
pub struct GitWorkingCopy {
    path: PathBuf,
    _dir: Option<TempDir>,
    token: String,
}

impl GitWorkingCopy {
    /// Runs a git command in the checkout.
    async fn run(&self, args: &[&str]) -> Result<(), GitError> {
        let command = self.describe(args);
        debug!(command = %command, "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed {
                command,
                stderr: self.redact(stderr.trim()),
            });
        }

        Ok(())
    }

    /// Describes a command for logs and errors without leaking credentials.
    fn describe(&self, args: &[&str]) -> String {
        self.redact(&args.join(" "))
    }

    fn redact(&self, text: &str) -> String {
        if self.token.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.token, "***")
        }
    }
}

#[async_trait]
impl WorkingCopy for GitWorkingCopy {
    async fn switch(&mut self, branch: &str) -> Result<(), GitError> {
        super::validate_branch_name(branch)?;
        self.run(&["switch", "--end-of-options", branch]).await
    }

    async fn create_branch(&mut self, branch: &str) -> Result<(), GitError> {
        super::validate_branch_name(branch)?;
        let create = format!("--create={branch}");
        self.run(&["switch", &create]).await
    }

    async fn cherry_pick(&mut self, commit: &str) -> Result<(), GitError> {
        self.run(&["cherry-pick", "-x", commit]).await
    }

    async fn abort_cherry_pick(&mut self) -> Result<(), GitError> {
        self.run(&["cherry-pick", "--abort"]).await
    }

    async fn push(&mut self, branch: &str) -> Result<(), GitError> {
        self.run(&["push", "--set-upstream", "origin", branch]).await
    }
}
