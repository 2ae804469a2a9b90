//! Label routing error types.

use thiserror::Error;

/// Errors raised while compiling or applying the backport label pattern.
///
/// Every variant is a configuration problem and aborts the whole run.
#[derive(Debug, Error)]
pub enum LabelError {
    /// The pattern is not a valid regular expression.
    #[error("Invalid label pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The pattern does not declare a `base` capture group.
    #[error("Label pattern '{pattern}' has no named capture group 'base'")]
    MissingBaseGroup { pattern: String },

    /// A label matched but the `base` group did not participate in the match.
    #[error("Label '{label}' matched pattern '{pattern}' but captured no 'base' group")]
    UncapturedBase { label: String, pattern: String },
}
