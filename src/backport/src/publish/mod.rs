//! Backport pull request publishing.
//!
//! Opens the backport pull request for a pushed head branch, asks the
//! original author and merger for review, and labels it. Nothing is rolled
//! back: a failure after creation leaves the pull request in place.

mod target;

pub use target::BackportTarget;

use crate::event::{RepositoryRef, SourcePullRequest};
use crate::github::{GitHost, GitHostError, NewPullRequest};
use tracing::{debug, info};

/// Computes the users asked to review a backport.
///
/// The source author always; the merger too when present, non-empty and
/// different from the author.
#[must_use]
pub fn reviewers_for(source: &SourcePullRequest) -> Vec<String> {
    let mut reviewers = vec![source.author.clone()];
    if let Some(merger) = source.merged_by.as_deref() {
        if !merger.is_empty() && merger != source.author {
            reviewers.push(merger.to_string());
        }
    }
    reviewers
}

/// Creates the backport pull request and returns its number.
///
/// # Errors
///
/// Returns the first [`GitHostError`] encountered. If reviewers or labels
/// fail, the pull request already exists.
pub async fn publish_backport<H: GitHost + ?Sized>(
    host: &H,
    repository: &RepositoryRef,
    target: &BackportTarget,
    reviewers: &[String],
    team_reviewers: &[String],
) -> Result<u64, GitHostError> {
    let number = host
        .create_pull_request(
            repository,
            &NewPullRequest {
                title: target.title.clone(),
                head: target.head.clone(),
                base: target.base.clone(),
                body: target.body.clone(),
            },
        )
        .await?;
    info!(pr_number = number, head = %target.head, "Backport pull request created");

    if !reviewers.is_empty() || !team_reviewers.is_empty() {
        host.request_reviewers(repository, number, reviewers, team_reviewers)
            .await?;
        debug!(pr_number = number, "Reviewers requested");
    }

    if !target.labels.is_empty() {
        host.add_labels(repository, number, &target.labels).await?;
        debug!(pr_number = number, labels = ?target.labels, "Labels applied");
    }

    Ok(number)
}
