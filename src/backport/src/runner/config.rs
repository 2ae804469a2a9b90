//! Runner configuration.

use crate::config::BackportConfig;
use std::path::{Path, PathBuf};

/// Configuration for running the backport action.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the webhook payload (`GITHUB_EVENT_PATH`).
    event_path: PathBuf,
    /// GitHub token used for API calls and pushes.
    token: String,
    /// Backport settings.
    backport: BackportConfig,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(event_path: PathBuf, token: String, backport: BackportConfig) -> Self {
        Self {
            event_path,
            token,
            backport,
        }
    }

    /// Returns the webhook payload path.
    pub fn event_path(&self) -> &Path {
        &self.event_path
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the backport settings.
    pub fn backport(&self) -> &BackportConfig {
        &self.backport
    }
}
