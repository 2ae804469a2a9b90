//! Trigger payload ingestion.
//!
//! Reads the `pull_request` / `pull_request_target` webhook payload that
//! GitHub Actions writes to `GITHUB_EVENT_PATH` and turns it into a
//! [`TriggerEvent`].

mod error;
mod pull_request;

pub use error::EventError;
pub use pull_request::{RepositoryRef, SourcePullRequest};

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// The event that triggered a backport run.
#[derive(Debug, Clone)]
pub enum TriggerEvent {
    /// Pull request was closed; every label is considered.
    Closed {
        /// The closed pull request.
        pull_request: SourcePullRequest,
    },

    /// A label was added to an already merged pull request.
    Labeled {
        /// The labeled pull request.
        pull_request: SourcePullRequest,
        /// Name of the label that was just applied.
        label: String,
    },
}

impl TriggerEvent {
    /// Returns the pull request carried by the event.
    #[must_use]
    pub fn pull_request(&self) -> &SourcePullRequest {
        match self {
            Self::Closed { pull_request } | Self::Labeled { pull_request, .. } => pull_request,
        }
    }

    /// Parses a webhook payload.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] if the JSON is not a pull request event or the
    /// action is neither `closed` nor `labeled`.
    pub fn from_json(payload: &str) -> Result<Self, EventError> {
        let payload: EventPayload = serde_json::from_str(payload)?;
        let pull_request = payload.pull_request.into_source();

        match payload.action.as_str() {
            "closed" => Ok(Self::Closed { pull_request }),
            "labeled" => {
                let label = payload.label.ok_or(EventError::MissingLabel)?.name;
                Ok(Self::Labeled {
                    pull_request,
                    label,
                })
            }
            other => Err(EventError::UnsupportedAction {
                action: other.to_string(),
            }),
        }
    }

    /// Reads and parses a webhook payload file.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] if the file can't be read or parsed.
    pub fn load(path: &Path) -> Result<Self, EventError> {
        debug!(path = %path.display(), "Loading event payload");
        let contents = std::fs::read_to_string(path).map_err(|source| EventError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    action: String,
    pull_request: PullRequestPayload,
    label: Option<LabelPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    title: String,
    body: Option<String>,
    #[serde(default)]
    labels: Vec<LabelPayload>,
    merge_commit_sha: Option<String>,
    #[serde(default)]
    merged: bool,
    user: UserPayload,
    merged_by: Option<UserPayload>,
    base: BasePayload,
}

#[derive(Debug, Deserialize)]
struct LabelPayload {
    name: String,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: String,
}

#[derive(Debug, Deserialize)]
struct BasePayload {
    repo: RepoPayload,
}

#[derive(Debug, Deserialize)]
struct RepoPayload {
    name: String,
    owner: UserPayload,
}

impl PullRequestPayload {
    fn into_source(self) -> SourcePullRequest {
        SourcePullRequest {
            number: self.number,
            title: self.title,
            body: self.body.unwrap_or_default(),
            labels: self.labels.into_iter().map(|l| l.name).collect(),
            merge_commit_sha: self.merge_commit_sha,
            merged: self.merged,
            author: self.user.login,
            merged_by: self.merged_by.map(|u| u.login),
            repository: RepositoryRef::new(self.base.repo.owner.login, self.base.repo.name),
        }
    }
}
