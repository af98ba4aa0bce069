//! Drawing commands.
//!
//! Each action line of a layout holds one command. The first character is the
//! op code; the remaining whitespace-separated tokens are its arguments:
//!
//! | Line | Command |
//! |---|---|
//! | `m x y` | [`Command::Move`] |
//! | `f index size` | [`Command::SetFont`] |
//! | `w text` | [`Command::Write`], text taken verbatim from the third character on |
//! | `b x y w h` | [`Command::DrawBox`] |
//!
//! All coordinates and sizes are in points.

use std::fmt;

use crate::{
    error::{Diagnostic, ErrorCode},
    lines::{parse_float, parse_int, tokens},
    span::Span,
};

/// A single drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Moves the text cursor.
    Move { x: f64, y: f64 },
    /// Selects the font for subsequent writes.
    SetFont { index: i64, size: f64 },
    /// Writes text at the cursor.
    Write { text: String },
    /// Draws a filled box.
    DrawBox {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl Command {
    /// Returns the op code character this command is written with.
    pub fn op_code(&self) -> char {
        match self {
            Self::Move { .. } => 'm',
            Self::SetFont { .. } => 'f',
            Self::Write { .. } => 'w',
            Self::DrawBox { .. } => 'b',
        }
    }

    /// Parses one command line.
    ///
    /// `span` is the location of `line` in the source and is used to label
    /// diagnostics.
    ///
    /// # Errors
    ///
    /// - `E200` if the line is empty or starts with an unknown op code
    /// - `E103` if the number of arguments does not match the op code
    /// - `E100` / `E102` if an argument is not a valid integer / number
    ///
    /// # Example
    ///
    /// ```
    /// # use layview_parser::{Command, Span};
    /// let command = Command::parse("b 0 0 5 5", Span::new(0..9)).unwrap();
    /// assert_eq!(
    ///     command,
    ///     Command::DrawBox { x: 0.0, y: 0.0, width: 5.0, height: 5.0 }
    /// );
    ///
    /// let text = Command::parse("w Hello, world", Span::new(0..14)).unwrap();
    /// assert_eq!(text, Command::Write { text: "Hello, world".to_string() });
    /// ```
    pub fn parse(line: &str, span: Span) -> Result<Self, Diagnostic> {
        let Some(op) = line.chars().next() else {
            return Err(Diagnostic::error("invalid command: empty line")
                .with_code(ErrorCode::E200)
                .with_label(span, "expected a command")
                .with_help("commands start with one of `m`, `f`, `w` or `b`"));
        };

        match op {
            'm' => {
                let [x, y] = Arguments::new(line, span, "m x y").floats()?;
                Ok(Self::Move { x, y })
            }
            'f' => {
                let arguments = Arguments::new(line, span, "f index size");
                let [index, size] = arguments.exact::<2>()?;
                Ok(Self::SetFont {
                    index: arguments.int(index)?,
                    size: arguments.float(size)?,
                })
            }
            'w' => {
                let text = line
                    .char_indices()
                    .nth(2)
                    .map_or("", |(offset, _)| &line[offset..]);
                Ok(Self::Write {
                    text: text.to_string(),
                })
            }
            'b' => {
                let [x, y, width, height] = Arguments::new(line, span, "b x y w h").floats()?;
                Ok(Self::DrawBox {
                    x,
                    y,
                    width,
                    height,
                })
            }
            other => Err(Diagnostic::error(format!("invalid command `{other}`"))
                .with_code(ErrorCode::E200)
                .with_label(span.sub(0..other.len_utf8()), "unknown op code")
                .with_help("commands start with one of `m`, `f`, `w` or `b`")),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { x, y } => write!(f, "m {x} {y}"),
            Self::SetFont { index, size } => write!(f, "f {index} {size}"),
            Self::Write { text } => write!(f, "w {text}"),
            Self::DrawBox {
                x,
                y,
                width,
                height,
            } => write!(f, "b {x} {y} {width} {height}"),
        }
    }
}

/// Argument tokens of a command line, i.e. every token after the first.
struct Arguments<'a> {
    tokens: Vec<(Span, &'a str)>,
    span: Span,
    usage: &'static str,
}

impl<'a> Arguments<'a> {
    fn new(line: &'a str, span: Span, usage: &'static str) -> Self {
        let tokens = tokens(line)
            .into_iter()
            .skip(1)
            .map(|(range, token)| (span.sub(range), token))
            .collect();
        Self {
            tokens,
            span,
            usage,
        }
    }

    fn exact<const N: usize>(&self) -> Result<[(Span, &'a str); N], Diagnostic> {
        <[(Span, &'a str); N]>::try_from(self.tokens.as_slice()).map_err(|_| {
            Diagnostic::error(format!(
                "expected {N} arguments, found {}",
                self.tokens.len()
            ))
            .with_code(ErrorCode::E103)
            .with_label(self.span, "wrong number of arguments")
            .with_help(format!("usage: `{}`", self.usage))
        })
    }

    fn floats<const N: usize>(&self) -> Result<[f64; N], Diagnostic> {
        let tokens = self.exact::<N>()?;
        let mut values = [0.0; N];
        for (value, token) in values.iter_mut().zip(tokens) {
            *value = self.float(token)?;
        }
        Ok(values)
    }

    fn float(&self, (span, token): (Span, &str)) -> Result<f64, Diagnostic> {
        parse_float(token).ok_or_else(|| {
            Diagnostic::error(format!("invalid number `{token}`"))
                .with_code(ErrorCode::E102)
                .with_label(span, "expected a finite number")
        })
    }

    fn int(&self, (span, token): (Span, &str)) -> Result<i64, Diagnostic> {
        parse_int(token).ok_or_else(|| {
            Diagnostic::error(format!("invalid font index `{token}`"))
                .with_code(ErrorCode::E100)
                .with_label(span, "expected an integer")
        })
    }
}
