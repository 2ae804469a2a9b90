//! Merge strategy advice.
//!
//! Backports cherry-pick the single merge commit of a pull request, which
//! only captures the whole change when pull requests are squash-merged.

use crate::event::RepositoryRef;
use crate::github::{GitHost, MergeMethods};
use tracing::warn;

/// Returns a warning when strategies other than squash are enabled.
#[must_use]
pub fn merge_method_warning(methods: &MergeMethods) -> Option<String> {
    let mut enabled = Vec::new();
    if methods.merge_commit {
        enabled.push("merge commits");
    }
    if methods.rebase {
        enabled.push("rebase merging");
    }

    if enabled.is_empty() {
        return None;
    }

    Some(format!(
        "Repository allows {}. Backports cherry-pick a single merge commit, so only \
         squash merging is supported; consider disabling the other merge methods.",
        enabled.join(" and ")
    ))
}

/// Logs a warning if the repository permits non-squash merges.
///
/// Never fails: a settings lookup error is itself only logged.
pub async fn advise_merge_methods<H: GitHost + ?Sized>(host: &H, repository: &RepositoryRef) {
    match host.merge_methods(repository).await {
        Ok(methods) => {
            if let Some(warning) = merge_method_warning(&methods) {
                warn!(repo = %repository, "{warning}");
            }
        }
        Err(e) => {
            warn!(repo = %repository, error = %e, "Could not read repository merge settings");
        }
    }
}
