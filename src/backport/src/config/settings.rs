//! Backport settings deserialization.

use crate::git::CommitterIdentity;
use crate::templates::{DEFAULT_BODY_TEMPLATE, DEFAULT_HEAD_TEMPLATE, DEFAULT_TITLE_TEMPLATE};
use serde::Deserialize;

/// Default label pattern: `backport <branch>`.
pub const DEFAULT_LABEL_PATTERN: &str = "^backport (?P<base>[^ ]+)$";

/// Default GitHub server.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Settings for a backport run, parsed from the `[backport]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct BackportConfig {
    /// Regex selecting backport labels; must capture `base`.
    pub label_pattern: String,

    /// Handlebars template for the head branch name.
    pub head_template: String,

    /// Handlebars template for the pull request title.
    pub title_template: String,

    /// Handlebars template for the pull request body.
    pub body_template: String,

    /// Team slugs asked to review every backport.
    pub team_reviewers: Vec<String>,

    /// Opening delimiter of the test plan stripped from bodies.
    pub test_plan_start: String,

    /// Closing delimiter of the test plan stripped from bodies.
    pub test_plan_end: String,

    /// `user.name` for cherry-picked commits.
    pub committer_name: String,

    /// `user.email` for cherry-picked commits.
    pub committer_email: String,

    /// Server hosting the repository (clone URLs); [`DEFAULT_SERVER_URL`]
    /// when unset.
    pub server_url: Option<String>,

    /// REST API endpoint; the public GitHub API when unset.
    pub api_url: Option<String>,

    /// Workflow run linked from failure comments.
    pub run_url: Option<String>,
}

impl Default for BackportConfig {
    fn default() -> Self {
        let committer = CommitterIdentity::default();
        Self {
            label_pattern: DEFAULT_LABEL_PATTERN.to_string(),
            head_template: DEFAULT_HEAD_TEMPLATE.to_string(),
            title_template: DEFAULT_TITLE_TEMPLATE.to_string(),
            body_template: DEFAULT_BODY_TEMPLATE.to_string(),
            team_reviewers: Vec::new(),
            test_plan_start: "<!--".to_string(),
            test_plan_end: "-->".to_string(),
            committer_name: committer.name,
            committer_email: committer.email,
            server_url: None,
            api_url: None,
            run_url: None,
        }
    }
}
