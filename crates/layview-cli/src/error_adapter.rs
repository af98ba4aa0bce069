//! Error adapter for converting LayviewError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Parse errors are rendered one report per [`Diagnostic`]. Errors raised
//! while executing a command point at the command's line in the source.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity as MietteSeverity,
    SourceSpan,
};

use layview::LayviewError;
use layview_parser::{Diagnostic, Span};

/// Adapter for a single layview diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        if self.diag.severity().is_warning() {
            Some(MietteSeverity::Warning)
        } else {
            Some(MietteSeverity::Error)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`LayviewError`] variants that are not parse errors.
///
/// Command failures carry the span of the failing line and are rendered
/// with a source snippet; I/O and export errors are plain messages.
pub struct ErrorAdapter<'a>(pub &'a LayviewError);

impl ErrorAdapter<'_> {
    fn located(&self) -> Option<(Span, &String)> {
        match self.0 {
            LayviewError::UnknownFont { span, src, .. }
            | LayviewError::NoActiveFont { span, src }
            | LayviewError::FontLoad { span, src, .. } => Some((*span, src)),
            _ => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LayviewError::Io(_) => "layview::io",
            LayviewError::MalformedInput { .. } => "layview::malformed_input",
            LayviewError::InvalidCommand { .. } => "layview::invalid_command",
            LayviewError::UnknownFont { .. } => "layview::unknown_font",
            LayviewError::NoActiveFont { .. } => "layview::no_active_font",
            LayviewError::FontLoad { .. } => "layview::font_load",
            LayviewError::Export(_) => "layview::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            LayviewError::UnknownFont { .. } => "fonts are declared at the top of the file",
            LayviewError::NoActiveFont { .. } => "select a font with `f <index> <size>` first",
            LayviewError::FontLoad { .. } => "font paths are resolved against the fonts directory",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.located()
            .map(|(_, src)| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (span, _) = self.located()?;
        let label = LabeledSpan::new_primary_with_span(
            Some("while executing this command".to_string()),
            span_to_miette(span),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a layview [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`LayviewError`] into a list of reportable errors.
///
/// Parse errors yield one [`Reportable`] per diagnostic; every other
/// variant yields a single one.
pub fn to_reportables(err: &LayviewError) -> Vec<Reportable<'_>> {
    match err {
        LayviewError::MalformedInput {
            err: parse_err,
            src,
        }
        | LayviewError::InvalidCommand {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Renders `reportable` as a graphical miette report.
pub fn render_report(reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    match GraphicalReportHandler::new().render_report(&mut writer, reportable) {
        Ok(()) => writer,
        Err(_) => reportable.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use layview_parser::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("invalid layout count `x`")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(2..3), "expected a non-negative integer")
            .with_help("try a number");
        let err = LayviewError::new_parse_error(ParseError::from(diag), "0\nx\n");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "invalid layout count `x`");
                assert_eq!(d.code().unwrap().to_string(), "E100");
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_invalid_command_is_a_diagnostic() {
        let diag = Diagnostic::error("invalid command `q`")
            .with_code(ErrorCode::E200)
            .with_label(Span::new(0..1), "unknown op code");
        let err = LayviewError::new_parse_error(ParseError::from(diag), "q");

        let reportables = to_reportables(&err);
        assert!(matches!(reportables[..], [Reportable::Diagnostic(_)]));
    }

    #[test]
    fn test_warning_severity() {
        let diag = Diagnostic::warning("font 1 is declared more than once")
            .with_label(Span::new(0..3), "this declaration is used");
        let adapter = DiagnosticAdapter::new(&diag, "1 a");

        assert_eq!(adapter.severity(), Some(MietteSeverity::Warning));
    }

    #[test]
    fn test_command_error_points_at_line() {
        let err = LayviewError::NoActiveFont {
            span: Span::new(10..17),
            src: "0\n1\n1 1\n1\nw hello\n".to_string(),
        };

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 10);
        assert_eq!(labels[0].len(), 7);
        assert!(reportables[0].source_code().is_some());
        assert_eq!(
            reportables[0].code().unwrap().to_string(),
            "layview::no_active_font"
        );
    }

    #[test]
    fn test_io_error_has_no_source() {
        let err = LayviewError::Io(std::io::Error::other("disk on fire"));

        let reportables = to_reportables(&err);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "I/O error: disk on fire");
                assert!(e.labels().is_none());
                assert!(e.source_code().is_none());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_all_labels_returned() {
        let diag = Diagnostic::error("unexpected end of input")
            .with_label(Span::new(5..5), "expected 1 more action line(s)")
            .with_secondary_label(Span::new(2..3), "layout declares 2 actions");

        let adapter = DiagnosticAdapter::new(&diag, "0\n2\nb 0");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].label(), Some("layout declares 2 actions"));
    }

    #[test]
    fn test_render_report_contains_message() {
        let diag = Diagnostic::error("invalid number `ten`")
            .with_code(ErrorCode::E102)
            .with_label(Span::new(7..10), "expected a finite number");
        let src = "0\n1\n10 ten\n0\n";
        let report = render_report(&Reportable::Diagnostic(DiagnosticAdapter::new(&diag, src)));

        assert!(report.contains("invalid number `ten`"));
        assert!(report.contains("expected a finite number"));
    }
}
