//! Error codes for the Layview diagnostic system.
//!
//! Error codes are organized by what went wrong:
//! - `E1xx` - Structure errors (counts, fields, missing lines)
//! - `E2xx` - Command errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Structure Errors (E1xx)
    // =========================================================================
    /// Invalid integer.
    ///
    /// A count or font index was expected but the text is not an integer
    /// (or, for counts, is negative).
    E100,

    /// Unexpected end of input.
    ///
    /// The file ended while more lines were still expected, for example when
    /// a layout declares more actions than follow it.
    E101,

    /// Invalid number.
    ///
    /// A coordinate, size or dimension is not a finite decimal number.
    E102,

    /// Wrong number of fields.
    ///
    /// A line holds more or fewer space-separated values than it should.
    E103,

    /// Negative canvas size.
    ///
    /// A layout's width or height converts to a negative number of pixels.
    E104,

    /// Canvas too large.
    ///
    /// A layout's canvas, or the composite of all layouts, would hold more
    /// pixels than a renderer is willing to allocate.
    E105,

    // =========================================================================
    // Command Errors (E2xx)
    // =========================================================================
    /// Invalid command.
    ///
    /// A command line starts with something other than `m`, `f`, `w` or `b`,
    /// or is empty.
    E200,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E101").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "invalid integer",
            ErrorCode::E101 => "unexpected end of input",
            ErrorCode::E102 => "invalid number",
            ErrorCode::E103 => "wrong number of fields",
            ErrorCode::E104 => "negative canvas size",
            ErrorCode::E105 => "canvas too large",
            ErrorCode::E200 => "invalid command",
        }
    }

    /// Returns `true` for codes describing an unrecognized command.
    pub fn is_command_error(&self) -> bool {
        matches!(self, ErrorCode::E200)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
