//! Wires configuration and the GitHub/git adapters into a [`Backporter`].

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::event::TriggerEvent;
use crate::git::GitCli;
use crate::github::OctocrabHost;
use crate::orchestrator::Backporter;
use crate::summary::BackportSummary;
use tracing::info;

/// Runs the backport action against GitHub.
pub struct Runner {
    config: RunnerConfig,
    backporter: Backporter<OctocrabHost, GitCli>,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// Every setting is validated here, before the payload is read.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if a setting is invalid or the API client
    /// cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let settings = config.backport();
        let options = settings.options()?;
        let templates = settings.templates()?;
        let git = GitCli::new(
            settings.server_url()?,
            config.token().to_string(),
            settings.committer(),
        );
        let host = OctocrabHost::with_token(config.token(), settings.api_url.as_deref())?;

        Ok(Self {
            backporter: Backporter::new(host, git, templates, options),
            config,
        })
    }

    /// Loads the triggering event and backports it.
    pub async fn run(&self) -> Result<BackportSummary, RunnerError> {
        let event = TriggerEvent::load(self.config.event_path())?;
        let pull_request = event.pull_request();
        info!(
            repo = %pull_request.repository,
            pr_number = pull_request.number,
            "Processing pull request"
        );
        Ok(self.backporter.run(&event).await?)
    }
}
