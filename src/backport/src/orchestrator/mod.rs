//! Backport orchestration.
//!
//! [`Backporter::run`] validates the source pull request, routes its labels
//! to base branches, clones the repository once and then backports to each
//! branch strictly in order. A failing branch gets recovery artifacts on the
//! source pull request and the loop moves on.

mod error;
mod options;

pub use error::{BackportError, TargetError};
pub use options::BackportOptions;

use crate::advisor::advise_merge_methods;
use crate::event::{SourcePullRequest, TriggerEvent};
use crate::git::{validate_branch_name, VersionControl, WorkingCopy};
use crate::github::GitHost;
use crate::labels::route_targets;
use crate::publish::{publish_backport, reviewers_for, BackportTarget};
use crate::recovery::{report_failure, FailureReport};
use crate::summary::{BackportSummary, TargetOutcome};
use crate::templates::BackportTemplates;
use tracing::{error, info, info_span, warn, Instrument};

/// Drives backports for one trigger event.
pub struct Backporter<H, V> {
    host: H,
    vcs: V,
    templates: Box<dyn BackportTemplates>,
    options: BackportOptions,
}

impl<H: GitHost, V: VersionControl> Backporter<H, V> {
    /// Creates a backporter from its collaborators.
    pub fn new(
        host: H,
        vcs: V,
        templates: impl BackportTemplates + 'static,
        options: BackportOptions,
    ) -> Self {
        Self {
            host,
            vcs,
            templates: Box::new(templates),
            options,
        }
    }

    /// Runs the backport flow.
    ///
    /// Per-target failures never fail the run; they are reported on the
    /// source pull request and recorded in the summary.
    ///
    /// # Errors
    ///
    /// Returns [`BackportError`] when the pull request is not merged, has no
    /// merge commit, or the label pattern is misconfigured. Nothing has been
    /// cloned, pushed or posted at that point.
    pub async fn run(&self, event: &TriggerEvent) -> Result<BackportSummary, BackportError> {
        let source = event.pull_request();
        let merge_commit = validate(source)?;

        let targets = route_targets(event, &self.options.pattern)?;
        if targets.is_empty() {
            info!(pr_number = source.number, "No backports required");
            return Ok(BackportSummary::new(targets));
        }
        info!(pr_number = source.number, ?targets, "Backporting");

        advise_merge_methods(&self.host, &source.repository).await;

        let mut summary = BackportSummary::new(targets.clone());
        match self.vcs.clone_repository(&source.repository).await {
            Ok(mut working_copy) => {
                for base in &targets {
                    let outcome = self
                        .backport_target(&mut working_copy, source, merge_commit, base)
                        .instrument(info_span!("backport", base = %base))
                        .await;
                    summary.record(outcome);
                }
            }
            Err(e) => {
                error!(repo = %source.repository, error = %e, "Failed to clone repository");
                let message = e.to_string();
                for base in &targets {
                    let outcome = self
                        .recover(source, merge_commit, base, None, &message)
                        .instrument(info_span!("backport", base = %base))
                        .await;
                    summary.record(outcome);
                }
            }
        }

        Ok(summary)
    }

    /// Backports onto one base branch, recovering on failure.
    async fn backport_target(
        &self,
        working_copy: &mut V::WorkingCopy,
        source: &SourcePullRequest,
        merge_commit: &str,
        base: &str,
    ) -> TargetOutcome {
        info!("Starting backport");

        if let Err(e) = validate_branch_name(base) {
            let e = TargetError::from(e);
            return self
                .recover(source, merge_commit, base, None, &e.to_string())
                .await;
        }

        let target = match BackportTarget::render(
            source,
            merge_commit,
            base,
            self.templates.as_ref(),
            &self.options.pattern,
            (&self.options.test_plan_start, &self.options.test_plan_end),
        ) {
            Ok(target) => target,
            Err(e) => {
                let e = TargetError::from(e);
                return self
                    .recover(source, merge_commit, base, None, &e.to_string())
                    .await;
            }
        };

        match self
            .apply_target(working_copy, source, merge_commit, &target)
            .await
        {
            Ok(number) => {
                info!(pr_number = number, "Backport complete");
                TargetOutcome::Created {
                    base: base.to_string(),
                    number,
                }
            }
            Err(e) => {
                self.recover(source, merge_commit, base, Some(&target.head), &e.to_string())
                    .await
            }
        }
    }

    /// The success path: switch, branch, cherry-pick, push, publish.
    async fn apply_target(
        &self,
        working_copy: &mut V::WorkingCopy,
        source: &SourcePullRequest,
        merge_commit: &str,
        target: &BackportTarget,
    ) -> Result<u64, TargetError> {
        working_copy.switch(&target.base).await?;
        working_copy.create_branch(&target.head).await?;

        if let Err(e) = working_copy.cherry_pick(merge_commit).await {
            if let Err(abort) = working_copy.abort_cherry_pick().await {
                warn!(error = %abort, "Failed to abort cherry-pick");
            }
            return Err(e.into());
        }

        working_copy.push(&target.head).await?;

        let number = publish_backport(
            &self.host,
            &source.repository,
            target,
            &reviewers_for(source),
            &self.options.team_reviewers,
        )
        .await?;
        Ok(number)
    }

    /// Reports a failed target on the source pull request.
    async fn recover(
        &self,
        source: &SourcePullRequest,
        merge_commit: &str,
        base: &str,
        head: Option<&str>,
        error: &str,
    ) -> TargetOutcome {
        error!(error, "Backport failed");

        let fallback_head = format!("backport-{}-to-{base}", source.number);
        let report = FailureReport {
            base,
            head: head.unwrap_or(&fallback_head),
            merge_commit,
            error,
            run_url: self.options.run_url.as_deref(),
        };
        let recovery =
            report_failure(&self.host, &source.repository, source.number, &report).await;

        TargetOutcome::Failed {
            base: base.to_string(),
            error: error.to_string(),
            recovery,
        }
    }
}

/// Refuses unmerged pull requests; returns the merge commit otherwise.
///
/// Workflows triggered by `pull_request_target` run with write access, so
/// nothing may happen for a pull request that was not actually merged.
fn validate(source: &SourcePullRequest) -> Result<&str, BackportError> {
    if !source.merged {
        return Err(BackportError::NotMerged {
            number: source.number,
        });
    }
    source
        .merge_commit()
        .ok_or(BackportError::MissingMergeCommit {
            number: source.number,
        })
}
