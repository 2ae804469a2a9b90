//! Backport pull request templating.
//!
//! The orchestrator only depends on the [`BackportTemplates`] capability; the
//! default implementation renders Handlebars templates supplied through
//! configuration.

mod error;
mod strip;

pub use error::TemplateError;
pub use strip::strip_test_plan;

use handlebars::{no_escape, Handlebars};
use serde::Serialize;
use tracing::error;

/// Default Handlebars template for the backport head branch.
pub const DEFAULT_HEAD_TEMPLATE: &str = "backport-{{number}}-to-{{base}}";

/// Default Handlebars template for the backport pull request title.
pub const DEFAULT_TITLE_TEMPLATE: &str = "[Backport {{base}}] {{title}}";

/// Default Handlebars template for the backport pull request body.
pub const DEFAULT_BODY_TEMPLATE: &str =
    "Backport {{merge_commit_sha}} from #{{number}}.\n\n{{body}}";

const HEAD: &str = "head";
const TITLE: &str = "title";
const BODY: &str = "body";

/// Values available to the templates for one backport target.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext<'a> {
    /// Target base branch.
    pub base: &'a str,

    /// Number of the source pull request.
    pub number: u64,

    /// Title of the source pull request.
    pub title: &'a str,

    /// Body of the source pull request, with the test plan stripped.
    pub body: &'a str,

    /// Merge commit of the source pull request.
    pub merge_commit_sha: &'a str,
}

/// Produces the head branch, title and body of a backport pull request.
pub trait BackportTemplates: Send + Sync {
    /// Renders the head branch name.
    fn head_branch(&self, context: &TemplateContext<'_>) -> Result<String, TemplateError>;

    /// Renders the pull request title.
    fn title(&self, context: &TemplateContext<'_>) -> Result<String, TemplateError>;

    /// Renders the pull request body.
    fn body(&self, context: &TemplateContext<'_>) -> Result<String, TemplateError>;
}

/// Creates a Handlebars registry suited for markdown and branch names.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches misspelt variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// [`BackportTemplates`] backed by Handlebars template strings.
pub struct HandlebarsTemplates {
    handlebars: Handlebars<'static>,
}

impl HandlebarsTemplates {
    /// Compiles the three templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RegistrationError`] if any template has
    /// invalid syntax.
    pub fn new(head: &str, title: &str, body: &str) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(HEAD, head)?;
        handlebars.register_template_string(TITLE, title)?;
        handlebars.register_template_string(BODY, body)?;
        Ok(Self { handlebars })
    }

    fn render_line(
        &self,
        name: &'static str,
        context: &TemplateContext<'_>,
    ) -> Result<String, TemplateError> {
        let rendered = self.handlebars.render(name, context)?;
        let line = rendered.trim();
        if line.is_empty() {
            return Err(TemplateError::EmptyOutput { name });
        }
        Ok(line.to_string())
    }
}

impl Default for HandlebarsTemplates {
    fn default() -> Self {
        match Self::new(
            DEFAULT_HEAD_TEMPLATE,
            DEFAULT_TITLE_TEMPLATE,
            DEFAULT_BODY_TEMPLATE,
        ) {
            Ok(templates) => templates,
            Err(e) => {
                // Unreachable unless a built-in template is edited into
                // invalid syntax; rendering then fails per target.
                error!(error = %e, "Built-in templates failed to compile");
                Self {
                    handlebars: create_handlebars_registry(),
                }
            }
        }
    }
}

impl BackportTemplates for HandlebarsTemplates {
    fn head_branch(&self, context: &TemplateContext<'_>) -> Result<String, TemplateError> {
        self.render_line(HEAD, context)
    }

    fn title(&self, context: &TemplateContext<'_>) -> Result<String, TemplateError> {
        self.render_line(TITLE, context)
    }

    fn body(&self, context: &TemplateContext<'_>) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(BODY, context)?)
    }
}
