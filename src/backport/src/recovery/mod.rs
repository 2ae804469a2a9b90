//! Failure recovery artifacts.
//!
//! When a target fails, the source pull request gets a comment with manual
//! backport instructions and three status labels. Both are best-effort: a
//! failure here is logged and swallowed.

mod comment;

pub use comment::{render_failure_comment, FailureReport};

use crate::event::RepositoryRef;
use crate::github::GitHost;
use crate::labels::BACKPORTS_LABEL;
use serde::Serialize;
use tracing::{info, warn};

/// Label flagging the source pull request as blocking a release.
pub const RELEASE_BLOCKER_LABEL: &str = "release-blocker";

/// Labels applied to the source pull request when backporting to `base` fails.
#[must_use]
pub fn failure_labels(base: &str) -> Vec<String> {
    vec![
        BACKPORTS_LABEL.to_string(),
        RELEASE_BLOCKER_LABEL.to_string(),
        format!("failed-backport-to-{base}"),
    ]
}

/// Which recovery artifacts made it onto the source pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecoveryStatus {
    /// The instructions comment was posted.
    pub comment_posted: bool,

    /// The failure labels were applied.
    pub labels_applied: bool,
}

/// Posts the recovery comment and failure labels on the source pull request.
pub async fn report_failure<H: GitHost + ?Sized>(
    host: &H,
    repository: &RepositoryRef,
    source_number: u64,
    report: &FailureReport<'_>,
) -> RecoveryStatus {
    let body = render_failure_comment(report);

    let comment_posted = match host.create_comment(repository, source_number, &body).await {
        Ok(()) => true,
        Err(e) => {
            warn!(
                pr_number = source_number,
                error = %e,
                "Failed to post backport failure comment"
            );
            false
        }
    };

    let labels = failure_labels(report.base);
    let labels_applied = match host.add_labels(repository, source_number, &labels).await {
        Ok(()) => true,
        Err(e) => {
            warn!(
                pr_number = source_number,
                error = %e,
                "Failed to label pull request with backport failure"
            );
            false
        }
    };

    info!(
        pr_number = source_number,
        comment_posted, labels_applied, "Recovery instructions reported"
    );

    RecoveryStatus {
        comment_posted,
        labels_applied,
    }
}
