//! CLI for the backport action.
//!
//! Reads the pull request event GitHub Actions hands to the job, backports
//! the merge commit to every branch requested by its labels, and reports
//! the created pull requests as a step output.

use backport::{
    run_url_from_env, BackportConfig, BackportSummary, ConfigOverrides, Runner, RunnerConfig,
    RunnerError, TargetOutcome,
};
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Step output holding the created pull requests.
const OUTPUT_NAME: &str = "created_pull_requests";

/// Backport - Cherry-pick merged pull requests onto release branches.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the webhook payload of the triggering event.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// GitHub token used for API calls and pushes.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Path to a TOML file with a [backport] table.
    #[arg(long, env = "INPUT_CONFIG")]
    config: Option<PathBuf>,

    /// Regex selecting backport labels; must capture a `base` group.
    #[arg(long, env = "INPUT_LABEL_PATTERN")]
    label_pattern: Option<String>,

    /// Handlebars template for the head branch name.
    #[arg(long, env = "INPUT_HEAD_TEMPLATE")]
    head_template: Option<String>,

    /// Handlebars template for the pull request title.
    #[arg(long, env = "INPUT_TITLE_TEMPLATE")]
    title_template: Option<String>,

    /// Handlebars template for the pull request body.
    #[arg(long, env = "INPUT_BODY_TEMPLATE")]
    body_template: Option<String>,

    /// Team slugs asked to review every backport (comma separated).
    #[arg(long, env = "INPUT_TEAM_REVIEWERS", value_delimiter = ',')]
    team_reviewers: Option<Vec<String>>,

    /// GitHub server URL used for cloning.
    #[arg(long, env = "INPUT_SERVER_URL")]
    server_url: Option<String>,

    /// GitHub REST API URL.
    #[arg(long, env = "INPUT_API_URL")]
    api_url: Option<String>,

    /// Server URL of the runner; used when neither input nor config set one.
    #[arg(long, env = "GITHUB_SERVER_URL", hide = true)]
    github_server_url: Option<String>,

    /// API URL of the runner; used when neither input nor config set one.
    #[arg(long, env = "GITHUB_API_URL", hide = true)]
    github_api_url: Option<String>,

    /// Workflow run linked from failure comments.
    #[arg(long, env = "INPUT_RUN_URL")]
    run_url: Option<String>,

    /// File receiving step outputs.
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    let output_path = args.output_path.clone();

    let result = run(args).await;
    finish(result, output_path.as_deref())
}

/// Reports the run result and maps it to the process exit code.
///
/// 0 for a completed run (per-target failures included), 1 when the step
/// output cannot be written, 2 for fatal errors.
fn finish(result: Result<BackportSummary, RunnerError>, output_path: Option<&Path>) -> ExitCode {
    match result {
        Ok(summary) => {
            print_summary(&summary);

            if let Some(path) = output_path {
                if let Err(e) = write_output(path, &summary) {
                    error!(path = %path.display(), error = %e, "Failed to write step output");
                    return ExitCode::from(1);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Backport run failed");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<BackportSummary, RunnerError> {
    let base = match &args.config {
        Some(path) => BackportConfig::load(path)?,
        None => BackportConfig::default(),
    };

    let settings = base.with_overrides(ConfigOverrides {
        label_pattern: args.label_pattern,
        head_template: args.head_template,
        title_template: args.title_template,
        body_template: args.body_template,
        team_reviewers: args.team_reviewers,
        server_url: args.server_url,
        api_url: args.api_url,
        run_url: args.run_url.or_else(run_url_from_env),
    })
    .with_runner_defaults(args.github_server_url, args.github_api_url);

    let runner = Runner::new(RunnerConfig::new(args.event_path, args.token, settings))?;
    runner.run().await
}

/// Appends the created pull requests to the step output file.
fn write_output(path: &Path, summary: &BackportSummary) -> std::io::Result<()> {
    let created = serde_json::to_string(&summary.created())?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{OUTPUT_NAME}={created}")?;
    info!(output = OUTPUT_NAME, value = %created, "Step output written");
    Ok(())
}

/// Prints the final run summary.
fn print_summary(summary: &BackportSummary) {
    println!("\nSummary:");
    if summary.nothing_to_do() {
        println!("  No backports required");
        return;
    }

    println!("  Targets: {}", summary.targets.join(", "));
    for outcome in &summary.outcomes {
        match outcome {
            TargetOutcome::Created { base, number } => {
                println!("  {base}: created #{number}");
            }
            TargetOutcome::Failed {
                base,
                error,
                recovery,
            } => {
                println!("  {base}: failed ({error})");
                if !recovery.comment_posted || !recovery.labels_applied {
                    println!("    recovery comment/labels could not all be posted");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backport::{BackportError, RecoveryStatus};
    use tempfile::TempDir;

    fn summary() -> BackportSummary {
        let mut summary =
            BackportSummary::new(vec!["release-1.0".to_string(), "release-2.0".to_string()]);
        summary.record(TargetOutcome::Created {
            base: "release-1.0".to_string(),
            number: 100,
        });
        summary.record(TargetOutcome::Failed {
            base: "release-2.0".to_string(),
            error: "conflict".to_string(),
            recovery: RecoveryStatus {
                comment_posted: true,
                labels_applied: true,
            },
        });
        summary
    }

    #[test]
    fn completed_run_appends_step_output() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");
        std::fs::write(&path, "previous=1\n").unwrap();

        assert_eq!(finish(Ok(summary()), Some(&path)), ExitCode::SUCCESS);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "previous=1\ncreated_pull_requests={\"release-1.0\":100}\n"
        );
    }

    #[test]
    fn completed_run_without_output_file_succeeds() {
        assert_eq!(finish(Ok(summary()), None), ExitCode::SUCCESS);
    }

    #[test]
    fn unwritable_output_exits_with_one() {
        let temp = TempDir::new().unwrap();
        assert_eq!(finish(Ok(summary()), Some(temp.path())), ExitCode::from(1));
    }

    #[test]
    fn fatal_error_exits_with_two() {
        let error = RunnerError::Backport(BackportError::NotMerged { number: 42 });
        assert_eq!(finish(Err(error), None), ExitCode::from(2));
    }
}
