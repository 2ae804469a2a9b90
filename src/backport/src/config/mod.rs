//! Configuration loading.
//!
//! Settings come from an optional TOML file with a `[backport]` table;
//! action inputs passed on the command line override individual fields.
//!
//! ```toml
//! [backport]
//! label-pattern = "^backport (?P<base>[^ ]+)$"
//! head-template = "backport-{{number}}-to-{{base}}"
//! team-reviewers = ["release-managers"]
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{BackportConfig, DEFAULT_LABEL_PATTERN, DEFAULT_SERVER_URL};

use crate::git::CommitterIdentity;
use crate::labels::LabelPattern;
use crate::orchestrator::BackportOptions;
use crate::templates::HandlebarsTemplates;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Top-level structure of the config file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    backport: BackportConfig,
}

/// Individual settings overriding the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Overrides `label-pattern`.
    pub label_pattern: Option<String>,
    /// Overrides `head-template`.
    pub head_template: Option<String>,
    /// Overrides `title-template`.
    pub title_template: Option<String>,
    /// Overrides `body-template`.
    pub body_template: Option<String>,
    /// Overrides `team-reviewers`.
    pub team_reviewers: Option<Vec<String>>,
    /// Overrides `server-url`.
    pub server_url: Option<String>,
    /// Overrides `api-url`.
    pub api_url: Option<String>,
    /// Overrides `run-url`.
    pub run_url: Option<String>,
}

impl BackportConfig {
    /// Loads settings from a TOML file.
    ///
    /// Missing fields (or a missing `[backport]` table) take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file can't be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let parsed: ConfigFile =
            toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
                path: path.display().to_string(),
                source,
            })?;
        Ok(parsed.backport)
    }

    /// Applies overrides. Blank strings and empty lists are ignored so that
    /// unset action inputs keep the configured value.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        fn apply(target: &mut String, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                *target = value;
            }
        }

        apply(&mut self.label_pattern, overrides.label_pattern);
        apply(&mut self.head_template, overrides.head_template);
        apply(&mut self.title_template, overrides.title_template);
        apply(&mut self.body_template, overrides.body_template);
        if let Some(teams) = overrides.team_reviewers.filter(|t| !t.is_empty()) {
            self.team_reviewers = teams;
        }
        if let Some(server_url) = overrides.server_url.filter(|v| !v.trim().is_empty()) {
            self.server_url = Some(server_url);
        }
        if let Some(api_url) = overrides.api_url.filter(|v| !v.trim().is_empty()) {
            self.api_url = Some(api_url);
        }
        if let Some(run_url) = overrides.run_url.filter(|v| !v.trim().is_empty()) {
            self.run_url = Some(run_url);
        }
        self
    }

    /// Fills the server and API URLs from the runner environment
    /// (`GITHUB_SERVER_URL` / `GITHUB_API_URL`) when neither the config file
    /// nor an input set them.
    #[must_use]
    pub fn with_runner_defaults(
        mut self,
        server_url: Option<String>,
        api_url: Option<String>,
    ) -> Self {
        if self.server_url.is_none() {
            self.server_url = server_url.filter(|v| !v.trim().is_empty());
        }
        if self.api_url.is_none() {
            self.api_url = api_url.filter(|v| !v.trim().is_empty());
        }
        self
    }

    /// Compiles the label pattern and builds orchestrator options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Label`] if the pattern is invalid or lacks a
    /// `base` group.
    pub fn options(&self) -> Result<BackportOptions, ConfigError> {
        let pattern = LabelPattern::new(&self.label_pattern)?;
        Ok(BackportOptions::new(pattern)
            .with_team_reviewers(
                self.team_reviewers
                    .iter()
                    .map(|team| team.trim().to_string())
                    .filter(|team| !team.is_empty())
                    .collect(),
            )
            .with_test_plan_delimiters(self.test_plan_start.clone(), self.test_plan_end.clone())
            .with_run_url(self.run_url.clone()))
    }

    /// Compiles the templates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Template`] if a template has invalid syntax.
    pub fn templates(&self) -> Result<HandlebarsTemplates, ConfigError> {
        Ok(HandlebarsTemplates::new(
            &self.head_template,
            &self.title_template,
            &self.body_template,
        )?)
    }

    /// Parses the server URL, defaulting to [`DEFAULT_SERVER_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if it is not an http(s) URL.
    pub fn server_url(&self) -> Result<Url, ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            setting: "server-url",
            message,
        };
        let server_url = self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL);
        let url = Url::parse(server_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        Ok(url)
    }

    /// Returns the committer identity.
    #[must_use]
    pub fn committer(&self) -> CommitterIdentity {
        CommitterIdentity {
            name: self.committer_name.clone(),
            email: self.committer_email.clone(),
        }
    }
}

/// Builds the link to the current workflow run from the Actions environment.
///
/// Uses `GITHUB_SERVER_URL`, `GITHUB_REPOSITORY` and `GITHUB_RUN_ID`, plus
/// `GITHUB_RUN_ATTEMPT` when it is set. Returns `None` outside Actions.
#[must_use]
pub fn run_url_from_env() -> Option<String> {
    let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
    let server = var("GITHUB_SERVER_URL")?;
    let repository = var("GITHUB_REPOSITORY")?;
    let run_id = var("GITHUB_RUN_ID")?;

    let mut url = format!(
        "{}/{repository}/actions/runs/{run_id}",
        server.trim_end_matches('/')
    );
    if let Some(attempt) = var("GITHUB_RUN_ATTEMPT") {
        url.push_str(&format!("/attempts/{attempt}"));
    }
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = temp.path().join("backport.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_config_applies_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[backport]
team-reviewers = ["release-managers"]
"#,
        );

        let config = BackportConfig::load(&path).unwrap();
        assert_eq!(config.label_pattern, DEFAULT_LABEL_PATTERN);
        assert_eq!(config.team_reviewers, vec!["release-managers"]);
        assert_eq!(config.server_url, None);
        assert_eq!(config.server_url().unwrap().as_str(), "https://github.com/");
    }

    #[test]
    fn load_config_without_table_is_default() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "");
        assert_eq!(
            BackportConfig::load(&path).unwrap(),
            BackportConfig::default()
        );
    }

    #[test]
    fn load_config_reports_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[backport\nlabel-pattern = ");
        let error = BackportConfig::load(&path).unwrap_err();
        assert!(matches!(error, ConfigError::TomlError { .. }));
    }

    #[test]
    fn load_config_rejects_unknown_settings() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[backport]\nlabel-patern = \"x\"\n");
        let error = BackportConfig::load(&path).unwrap_err();
        assert!(matches!(error, ConfigError::TomlError { .. }));
    }

    #[test]
    fn load_config_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let error = BackportConfig::load(&temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(error, ConfigError::IoError { .. }));
    }

    #[test]
    fn overrides_replace_non_blank_values() {
        let config = BackportConfig::default().with_overrides(ConfigOverrides {
            label_pattern: Some("^bp (?P<base>.+)$".to_string()),
            head_template: Some("  ".to_string()),
            team_reviewers: Some(Vec::new()),
            run_url: Some("https://example.com/run".to_string()),
            ..Default::default()
        });

        assert_eq!(config.label_pattern, "^bp (?P<base>.+)$");
        assert_eq!(config.head_template, BackportConfig::default().head_template);
        assert!(config.team_reviewers.is_empty());
        assert_eq!(config.run_url.as_deref(), Some("https://example.com/run"));
    }

    #[test]
    fn configured_urls_win_over_runner_environment() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[backport]
server-url = "https://git.example.com"
"#,
        );

        let config = BackportConfig::load(&path).unwrap().with_runner_defaults(
            Some("https://github.com".to_string()),
            Some("https://api.github.com".to_string()),
        );

        assert_eq!(config.server_url.as_deref(), Some("https://git.example.com"));
        assert_eq!(config.api_url.as_deref(), Some("https://api.github.com"));
    }

    #[test]
    fn inputs_win_over_config_file() {
        let config = BackportConfig {
            server_url: Some("https://git.example.com".to_string()),
            ..Default::default()
        }
        .with_overrides(ConfigOverrides {
            server_url: Some("https://ghe.example.org".to_string()),
            ..Default::default()
        })
        .with_runner_defaults(Some("https://github.com".to_string()), None);

        assert_eq!(config.server_url.as_deref(), Some("https://ghe.example.org"));
        assert_eq!(config.api_url, None);
    }

    #[test]
    fn options_reject_pattern_without_base_group() {
        let config = BackportConfig {
            label_pattern: "^backport (.+)$".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.options(), Err(ConfigError::Label(_))));
    }

    #[test]
    fn templates_reject_invalid_syntax() {
        let config = BackportConfig {
            title_template: "{{#each}}".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.templates(), Err(ConfigError::Template(_))));
    }

    #[test]
    fn server_url_must_be_http() {
        let config = BackportConfig {
            server_url: Some("ssh://github.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.server_url(),
            Err(ConfigError::ValidationError { setting: "server-url", .. })
        ));
    }

    #[test]
    fn run_url_from_actions_environment() {
        temp_env::with_vars(
            [
                ("GITHUB_SERVER_URL", Some("https://github.com/")),
                ("GITHUB_REPOSITORY", Some("acme/widgets")),
                ("GITHUB_RUN_ID", Some("1234")),
                ("GITHUB_RUN_ATTEMPT", Some("2")),
            ],
            || {
                assert_eq!(
                    run_url_from_env().as_deref(),
                    Some("https://github.com/acme/widgets/actions/runs/1234/attempts/2")
                );
            },
        );
    }

    #[test]
    fn run_url_requires_run_id() {
        temp_env::with_vars(
            [
                ("GITHUB_SERVER_URL", Some("https://github.com")),
                ("GITHUB_REPOSITORY", Some("acme/widgets")),
                ("GITHUB_RUN_ID", None),
            ],
            || assert_eq!(run_url_from_env(), None),
        );
    }
}
