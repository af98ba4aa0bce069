//! # Layview Parser
//!
//! Parser for the Layview serialized layout format. A layout file declares
//! fonts, then one or more layouts, each a canvas size followed by drawing
//! commands.
//!
//! ## Usage
//!
//! ```
//! # use layview_parser::{parse, Command, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "0\n1\n10 10\n1\nb 0 0 5 5\n";
//!
//!     let document = parse(source)?;
//!     let layout = &document.layouts()[0];
//!     assert_eq!(layout.size().width(), 10.0);
//!     assert!(matches!(*layout.commands()[0], Command::DrawBox { .. }));
//!     Ok(())
//! }
//! ```
//!
//! Every error carries [`Diagnostic`]s with byte [`Span`]s into the source so
//! callers can render annotated reports.

mod command;
mod document;
pub mod error;
mod lines;
mod span;

pub use command::Command;
pub use document::{
    Document, FontDecl, Header, Layout, LayoutReader, parse, parse_header, parse_layouts,
};
pub use error::{Diagnostic, ErrorCode, Label, ParseError, Severity};
pub use span::{Span, Spanned};
