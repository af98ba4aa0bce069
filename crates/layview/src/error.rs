//! Error types for Layview operations.
//!
//! This module provides the main error type [`LayviewError`] which wraps
//! the error conditions of parsing and rendering a layout file.

use std::{fmt, io};

use thiserror::Error;

use layview_core::font::FontError;
use layview_parser::{Diagnostic, ErrorCode, ParseError, Span};

use crate::box_renderer::RenderError;

/// Broad category of a [`LayviewError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    InvalidCommand,
    UnknownFont,
    NoActiveFont,
    FontLoad,
    Io,
    Export,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedInput => "malformed input",
            Self::InvalidCommand => "invalid command",
            Self::UnknownFont => "unknown font",
            Self::NoActiveFont => "no active font",
            Self::FontLoad => "font load",
            Self::Io => "I/O",
            Self::Export => "export",
        };
        f.write_str(name)
    }
}

/// The main error type for Layview operations.
///
/// # Source Variants
///
/// Every variant raised while reading a layout file keeps the file contents
/// (`src`) together with the span of the offending line, so callers can
/// render annotated reports.
#[derive(Debug, Error)]
pub enum LayviewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    MalformedInput { err: ParseError, src: String },

    #[error("{err}")]
    InvalidCommand { err: ParseError, src: String },

    #[error("font {index} is not declared in the font table")]
    UnknownFont { index: i64, span: Span, src: String },

    #[error("text written before any font was selected")]
    NoActiveFont { span: Span, src: String },

    #[error("failed to load font: {source}")]
    FontLoad {
        source: FontError,
        span: Span,
        src: String,
    },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for LayviewError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl LayviewError {
    /// Create a new parse error with the associated source code.
    ///
    /// Errors about unknown op codes become [`LayviewError::InvalidCommand`],
    /// everything else [`LayviewError::MalformedInput`].
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        let src = src.into();
        if err.code().is_some_and(|code| code.is_command_error()) {
            Self::InvalidCommand { err, src }
        } else {
            Self::MalformedInput { err, src }
        }
    }

    /// Create an error for a failed command, located at `span` in `src`.
    pub fn new_render_error(err: RenderError, span: Span, src: impl Into<String>) -> Self {
        let src = src.into();
        match err {
            RenderError::UnknownFont { index } => Self::UnknownFont { index, span, src },
            RenderError::NoActiveFont => Self::NoActiveFont { span, src },
            RenderError::FontLoad(source) => Self::FontLoad { source, span, src },
            RenderError::NegativeSize { .. } => {
                let diag = Diagnostic::error(err.to_string())
                    .with_code(ErrorCode::E104)
                    .with_label(span, "width and height must not be negative");
                Self::new_parse_error(diag.into(), src)
            }
            RenderError::TooLarge { .. } => {
                let diag = Diagnostic::error(err.to_string())
                    .with_code(ErrorCode::E105)
                    .with_label(span, "canvas would exceed the pixel limit");
                Self::new_parse_error(diag.into(), src)
            }
            RenderError::Parse(diag) => Self::new_parse_error(diag.into(), src),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::MalformedInput { .. } => ErrorKind::MalformedInput,
            Self::InvalidCommand { .. } => ErrorKind::InvalidCommand,
            Self::UnknownFont { .. } => ErrorKind::UnknownFont,
            Self::NoActiveFont { .. } => ErrorKind::NoActiveFont,
            Self::FontLoad { .. } => ErrorKind::FontLoad,
            Self::Export(_) => ErrorKind::Export,
        }
    }
}
