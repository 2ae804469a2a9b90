#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod advisor;
pub mod config;
pub mod event;
pub mod git;
pub mod github;
pub mod labels;
pub mod orchestrator;
pub mod publish;
pub mod recovery;
pub mod runner;
pub mod summary;
pub mod templates;

pub use advisor::{advise_merge_methods, merge_method_warning};
pub use config::{run_url_from_env, BackportConfig, ConfigError, ConfigOverrides};
pub use event::{EventError, RepositoryRef, SourcePullRequest, TriggerEvent};
pub use git::{CommitterIdentity, GitCli, GitError, GitWorkingCopy, VersionControl, WorkingCopy};
pub use github::{GitHost, GitHostError, MergeMethods, NewPullRequest, OctocrabHost};
pub use labels::{backport_labels, route_targets, LabelError, LabelPattern};
pub use orchestrator::{BackportError, BackportOptions, Backporter, TargetError};
pub use publish::{publish_backport, reviewers_for, BackportTarget};
pub use recovery::{
    failure_labels, render_failure_comment, report_failure, FailureReport, RecoveryStatus,
};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{BackportResult, BackportSummary, TargetOutcome};
pub use templates::{
    strip_test_plan, BackportTemplates, HandlebarsTemplates, TemplateContext, TemplateError,
};
