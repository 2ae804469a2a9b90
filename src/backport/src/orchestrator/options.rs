//! Orchestrator options.

use crate::labels::LabelPattern;

/// Behavior knobs for a [`Backporter`](super::Backporter).
#[derive(Debug, Clone)]
pub struct BackportOptions {
    /// Pattern selecting backport labels.
    pub pattern: LabelPattern,

    /// Team slugs asked to review every backport.
    pub team_reviewers: Vec<String>,

    /// Opening delimiter of the test plan stripped from bodies.
    pub test_plan_start: String,

    /// Closing delimiter of the test plan stripped from bodies.
    pub test_plan_end: String,

    /// Workflow run linked from failure comments.
    pub run_url: Option<String>,
}

impl BackportOptions {
    /// Creates options with no team reviewers, no run link and HTML comment
    /// test plan delimiters.
    pub fn new(pattern: LabelPattern) -> Self {
        Self {
            pattern,
            team_reviewers: Vec::new(),
            test_plan_start: "<!--".to_string(),
            test_plan_end: "-->".to_string(),
            run_url: None,
        }
    }

    /// Sets the team reviewers.
    pub fn with_team_reviewers(mut self, team_reviewers: Vec<String>) -> Self {
        self.team_reviewers = team_reviewers;
        self
    }

    /// Sets the test plan delimiters.
    pub fn with_test_plan_delimiters(mut self, start: String, end: String) -> Self {
        self.test_plan_start = start;
        self.test_plan_end = end;
        self
    }

    /// Sets the workflow run link.
    pub fn with_run_url(mut self, run_url: Option<String>) -> Self {
        self.run_url = run_url;
        self
    }
}
