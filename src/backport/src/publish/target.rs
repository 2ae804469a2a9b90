//! Per-branch backport target.

use crate::event::SourcePullRequest;
use crate::labels::{backport_labels, LabelPattern};
use crate::templates::{strip_test_plan, BackportTemplates, TemplateContext, TemplateError};
use serde::Serialize;

/// Everything needed to backport the source pull request onto one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackportTarget {
    /// Target base branch.
    pub base: String,

    /// Head branch created for the backport.
    pub head: String,

    /// Backport pull request title.
    pub title: String,

    /// Backport pull request body.
    pub body: String,

    /// Labels applied to the backport pull request.
    pub labels: Vec<String>,
}

impl BackportTarget {
    /// Renders the target for `base`.
    ///
    /// The source body has its test plan (delimited by `plan_delimiters`)
    /// removed before it reaches the body template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if any template fails to render.
    pub fn render(
        source: &SourcePullRequest,
        merge_commit: &str,
        base: &str,
        templates: &dyn BackportTemplates,
        pattern: &LabelPattern,
        plan_delimiters: (&str, &str),
    ) -> Result<Self, TemplateError> {
        let (start, end) = plan_delimiters;
        let body = strip_test_plan(&source.body, start, end);
        let context = TemplateContext {
            base,
            number: source.number,
            title: &source.title,
            body: &body,
            merge_commit_sha: merge_commit,
        };

        Ok(Self {
            base: base.to_string(),
            head: templates.head_branch(&context)?,
            title: templates.title(&context)?,
            body: templates.body(&context)?,
            labels: backport_labels(&source.labels, pattern, base),
        })
    }
}
