//! Error and diagnostic system for the Layview parser.
//!
//! Errors are reported as [`Diagnostic`]s: a severity, an optional
//! [`ErrorCode`], labeled source spans and help text. A failed parse returns
//! a [`ParseError`] wrapping the diagnostics.
//!
//! # Example
//!
//! ```
//! # use layview_parser::error::{Diagnostic, ErrorCode};
//! # use layview_parser::Span;
//!
//! let diag = Diagnostic::error("invalid command `x`")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(14..15), "unknown op code")
//!     .with_help("commands start with one of `m`, `f`, `w` or `b`");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
