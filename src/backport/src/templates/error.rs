//! Template rendering error types.

/// Template rendering error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Handlebars rendering error.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Template registration error.
    #[error("Template registration error: {0}")]
    RegistrationError(#[from] Box<handlebars::TemplateError>),

    /// Template rendered to an empty string where a value is required.
    #[error("Template '{name}' rendered an empty string")]
    EmptyOutput { name: &'static str },
}

impl From<handlebars::TemplateError> for TemplateError {
    fn from(error: handlebars::TemplateError) -> Self {
        Self::RegistrationError(Box::new(error))
    }
}
