//! The core diagnostic type for the Layview error system.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E101]: unexpected end of input
///    |
///  7 | b 0 0 5 5
///    |          ^ expected 2 more action lines
///    |
///    = help: the action count of this layout is 3
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the span of the first primary label, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E101]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_builder() {
        let diag = Diagnostic::error("unexpected end of input")
            .with_code(ErrorCode::E101)
            .with_label(Span::new(10..10), "expected layout count")
            .with_secondary_label(Span::new(0..1), "font count declared here")
            .with_help("add the missing lines");

        assert!(diag.severity().is_error());
        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.labels().len(), 2);
        assert_eq!(diag.primary_span(), Some(Span::new(10..10)));
        assert_eq!(diag.help(), Some("add the missing lines"));
    }

    #[test]
    fn test_diagnostic_display() {
        let with_code = Diagnostic::error("invalid command `x`").with_code(ErrorCode::E200);
        assert_eq!(with_code.to_string(), "error[E200]: invalid command `x`");

        let warning = Diagnostic::warning("font 1 declared twice");
        assert_eq!(warning.to_string(), "warning: font 1 declared twice");
    }

    #[test]
    fn test_primary_span_skips_secondary_labels() {
        let diag = Diagnostic::warning("duplicate")
            .with_secondary_label(Span::new(0..2), "first")
            .with_label(Span::new(5..7), "second");

        assert_eq!(diag.primary_span(), Some(Span::new(5..7)));
    }
}
