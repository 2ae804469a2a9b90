//! Backport label routing.
//!
//! Turns the labels of a merged pull request into the list of release
//! branches it should be backported to, and computes the label set carried
//! over to each backport pull request.

mod error;

pub use error::LabelError;

use crate::event::TriggerEvent;
use regex::Regex;
use std::fmt;
use tracing::debug;

/// Name of the capture group holding the target base branch.
pub const BASE_GROUP: &str = "base";

/// Marker label applied to every backport pull request.
pub const BACKPORTS_LABEL: &str = "backports";

/// A compiled label pattern with a mandatory `base` capture group.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    regex: Regex,
}

impl LabelPattern {
    /// Compiles a pattern, rejecting it up front if it cannot capture `base`.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::InvalidPattern`] if the regex does not compile and
    /// [`LabelError::MissingBaseGroup`] if it has no `base` group.
    pub fn new(pattern: &str) -> Result<Self, LabelError> {
        let regex = Regex::new(pattern).map_err(|source| LabelError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        if !regex.capture_names().flatten().any(|name| name == BASE_GROUP) {
            return Err(LabelError::MissingBaseGroup {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self { regex })
    }

    /// Returns the source text of the pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true if the label matches the pattern at all.
    #[must_use]
    pub fn is_match(&self, label: &str) -> bool {
        self.regex.is_match(label)
    }

    /// Extracts the base branch from a label.
    ///
    /// Returns `Ok(None)` when the label does not match.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UncapturedBase`] when the label matches but the
    /// `base` group took no part in the match.
    pub fn capture_base(&self, label: &str) -> Result<Option<String>, LabelError> {
        let Some(captures) = self.regex.captures(label) else {
            return Ok(None);
        };

        match captures.name(BASE_GROUP) {
            Some(base) => Ok(Some(base.as_str().to_string())),
            None => Err(LabelError::UncapturedBase {
                label: label.to_string(),
                pattern: self.as_str().to_string(),
            }),
        }
    }
}

impl fmt::Display for LabelPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the target base branches from a trigger event.
///
/// A `labeled` event only considers the label that was just applied, so it
/// yields at most one branch. A `closed` event considers every label on the
/// pull request, in label order. Labels that do not match are skipped, and a
/// base requested by several labels is only returned once.
///
/// # Errors
///
/// Returns [`LabelError::UncapturedBase`] if any considered label matches
/// without capturing `base`.
pub fn route_targets(
    event: &TriggerEvent,
    pattern: &LabelPattern,
) -> Result<Vec<String>, LabelError> {
    let candidates: Vec<&str> = match event {
        TriggerEvent::Labeled { label, .. } => vec![label.as_str()],
        TriggerEvent::Closed { pull_request } => {
            pull_request.labels.iter().map(String::as_str).collect()
        }
    };

    let mut bases = Vec::new();
    for label in candidates {
        if let Some(base) = pattern.capture_base(label)? {
            if bases.contains(&base) {
                debug!(label, base = %base, "Base already requested");
                continue;
            }
            debug!(label, base = %base, "Label requests backport");
            bases.push(base);
        }
    }

    Ok(bases)
}

/// Computes the labels applied to the backport pull request targeting `base`.
///
/// Original labels that request a backport are dropped; the generic
/// [`BACKPORTS_LABEL`] and a `backported-to-<base>` label are appended.
#[must_use]
pub fn backport_labels(original: &[String], pattern: &LabelPattern, base: &str) -> Vec<String> {
    let mut labels: Vec<String> = original
        .iter()
        .filter(|label| !pattern.is_match(label))
        .cloned()
        .collect();

    for generated in [BACKPORTS_LABEL.to_string(), format!("backported-to-{base}")] {
        if !labels.contains(&generated) {
            labels.push(generated);
        }
    }

    labels
}
