//! Per-target outcome types.

use crate::recovery::RecoveryStatus;

/// Result of backporting to a single base branch.
#[derive(Debug, Clone)]
pub enum TargetOutcome {
    /// Backport pull request was created.
    Created {
        /// Target base branch.
        base: String,
        /// Number of the created pull request.
        number: u64,
    },

    /// Backport failed; recovery artifacts were attempted.
    Failed {
        /// Target base branch.
        base: String,
        /// Error message.
        error: String,
        /// Which recovery artifacts were posted.
        recovery: RecoveryStatus,
    },
}

impl TargetOutcome {
    /// Returns the base branch of the outcome.
    #[must_use]
    pub fn base(&self) -> &str {
        match self {
            Self::Created { base, .. } | Self::Failed { base, .. } => base,
        }
    }
}
