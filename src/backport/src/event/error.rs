//! Event ingestion error types.

use thiserror::Error;

/// Errors that can occur while reading the triggering webhook payload.
#[derive(Debug, Error)]
pub enum EventError {
    /// Failed to read the payload file.
    #[error("Failed to read event payload '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Payload is not a pull request event.
    #[error("Failed to parse pull request event: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Payload action is neither `closed` nor `labeled`.
    #[error("Unsupported pull request action '{action}'; expected 'closed' or 'labeled'")]
    UnsupportedAction { action: String },

    /// A `labeled` payload did not carry the applied label.
    #[error("Labeled event is missing the applied label")]
    MissingLabel,
}
