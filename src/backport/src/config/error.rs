//! Configuration error types.

use crate::labels::LabelError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Validation error in a setting.
    #[error("Invalid setting '{setting}': {message}")]
    ValidationError {
        setting: &'static str,
        message: String,
    },

    /// The label pattern is unusable.
    #[error(transparent)]
    Label(#[from] LabelError),

    /// A template does not compile.
    #[error(transparent)]
    Template(#[from] TemplateError),
}
