//! Hosting API seam.
//!
//! [`GitHost`] lists the GitHub operations the backport flow consumes;
//! [`OctocrabHost`] implements them against the REST API.

mod error;
mod rate_limit;

pub use error::GitHostError;
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, RateLimitInfo};

use crate::event::RepositoryRef;
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// Merge strategies enabled in a repository's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeMethods {
    /// "Create a merge commit" is allowed.
    pub merge_commit: bool,

    /// "Squash and merge" is allowed.
    pub squash: bool,

    /// "Rebase and merge" is allowed.
    pub rebase: bool,
}

/// A pull request to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// Pull request title.
    pub title: String,

    /// Branch containing the changes.
    pub head: String,

    /// Branch to merge into.
    pub base: String,

    /// Pull request body.
    pub body: String,
}

/// GitHub operations used by the backport flow.
#[async_trait]
pub trait GitHost: Send + Sync {
    /// Fetches which merge strategies the repository allows.
    async fn merge_methods(&self, repository: &RepositoryRef)
        -> Result<MergeMethods, GitHostError>;

    /// Opens a pull request and returns its number.
    async fn create_pull_request(
        &self,
        repository: &RepositoryRef,
        pull_request: &NewPullRequest,
    ) -> Result<u64, GitHostError>;

    /// Requests reviews from users and teams.
    async fn request_reviewers(
        &self,
        repository: &RepositoryRef,
        number: u64,
        reviewers: &[String],
        team_reviewers: &[String],
    ) -> Result<(), GitHostError>;

    /// Adds labels to an issue or pull request.
    async fn add_labels(
        &self,
        repository: &RepositoryRef,
        number: u64,
        labels: &[String],
    ) -> Result<(), GitHostError>;

    /// Posts a comment on an issue or pull request.
    async fn create_comment(
        &self,
        repository: &RepositoryRef,
        number: u64,
        body: &str,
    ) -> Result<(), GitHostError>;
}

/// [`GitHost`] backed by an authenticated [`Octocrab`] client.
#[derive(Debug, Clone)]
pub struct OctocrabHost {
    octocrab: Octocrab,
}

impl OctocrabHost {
    /// Wraps an existing client.
    pub fn new(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    /// Builds a client authenticated with a token.
    ///
    /// `api_url` overrides the API endpoint for GitHub Enterprise Server.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn with_token(token: &str, api_url: Option<&str>) -> Result<Self, octocrab::Error> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(api_url) = api_url {
            builder = builder.base_uri(api_url)?;
        }
        Ok(Self::new(builder.build()?))
    }
}

#[async_trait]
impl GitHost for OctocrabHost {
    async fn merge_methods(
        &self,
        repository: &RepositoryRef,
    ) -> Result<MergeMethods, GitHostError> {
        debug!(repo = %repository, "Fetching repository settings");
        ensure_core_rate_limit(&self.octocrab).await?;
        let repo = self
            .octocrab
            .repos(&repository.owner, &repository.name)
            .get()
            .await?;

        Ok(MergeMethods {
            merge_commit: repo.allow_merge_commit.unwrap_or(false),
            squash: repo.allow_squash_merge.unwrap_or(false),
            rebase: repo.allow_rebase_merge.unwrap_or(false),
        })
    }

    async fn create_pull_request(
        &self,
        repository: &RepositoryRef,
        pull_request: &NewPullRequest,
    ) -> Result<u64, GitHostError> {
        debug!(
            repo = %repository,
            head = %pull_request.head,
            base = %pull_request.base,
            "Creating pull request"
        );
        ensure_core_rate_limit(&self.octocrab).await?;
        let created = self
            .octocrab
            .pulls(&repository.owner, &repository.name)
            .create(&pull_request.title, &pull_request.head, &pull_request.base)
            .body(&pull_request.body)
            .send()
            .await?;

        Ok(created.number)
    }

    async fn request_reviewers(
        &self,
        repository: &RepositoryRef,
        number: u64,
        reviewers: &[String],
        team_reviewers: &[String],
    ) -> Result<(), GitHostError> {
        debug!(repo = %repository, number, ?reviewers, ?team_reviewers, "Requesting reviewers");
        ensure_core_rate_limit(&self.octocrab).await?;
        self.octocrab
            .pulls(&repository.owner, &repository.name)
            .request_reviews(number, reviewers.to_vec(), team_reviewers.to_vec())
            .await?;
        Ok(())
    }

    async fn add_labels(
        &self,
        repository: &RepositoryRef,
        number: u64,
        labels: &[String],
    ) -> Result<(), GitHostError> {
        debug!(repo = %repository, number, ?labels, "Adding labels");
        ensure_core_rate_limit(&self.octocrab).await?;
        self.octocrab
            .issues(&repository.owner, &repository.name)
            .add_labels(number, labels)
            .await?;
        Ok(())
    }

    async fn create_comment(
        &self,
        repository: &RepositoryRef,
        number: u64,
        body: &str,
    ) -> Result<(), GitHostError> {
        debug!(repo = %repository, number, "Posting comment");
        ensure_core_rate_limit(&self.octocrab).await?;
        self.octocrab
            .issues(&repository.owner, &repository.name)
            .create_comment(number, body)
            .await?;
        Ok(())
    }
}
