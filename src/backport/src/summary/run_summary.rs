//! Run summary types.

use super::result::TargetOutcome;
use indexmap::IndexMap;

/// Created backport pull requests keyed by base branch, in processing order.
///
/// Serializes as a JSON object.
pub type BackportResult = IndexMap<String, u64>;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct BackportSummary {
    /// Base branches routed from the labels, in order.
    pub targets: Vec<String>,

    /// Outcome of each processed target, in order.
    pub outcomes: Vec<TargetOutcome>,
}

impl BackportSummary {
    /// Creates a summary for the routed targets.
    #[must_use]
    pub fn new(targets: Vec<String>) -> Self {
        Self {
            targets,
            outcomes: Vec::new(),
        }
    }

    /// Records the outcome of one target.
    pub fn record(&mut self, outcome: TargetOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns the created pull requests, keyed by base branch.
    #[must_use]
    pub fn created(&self) -> BackportResult {
        let mut result = BackportResult::default();
        for outcome in &self.outcomes {
            if let TargetOutcome::Created { base, number } = outcome {
                result.insert(base.clone(), *number);
            }
        }
        result
    }

    /// Returns the failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, TargetOutcome::Failed { .. }))
    }

    /// Returns true if any target failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Returns true if routing produced no targets.
    #[must_use]
    pub fn nothing_to_do(&self) -> bool {
        self.targets.is_empty()
    }
}
