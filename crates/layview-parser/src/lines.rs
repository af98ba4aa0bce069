//! Line and token level helpers.
//!
//! The layout format is line oriented: one count, declaration or command per
//! line. [`SourceLines`] hands out lines with their byte spans, and the
//! literal parsers here turn single tokens into numbers.

use winnow::{
    ModalResult, Parser,
    ascii::{digit1, float},
    combinator::{eof, opt, terminated},
    token::one_of,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::{Span, Spanned},
};

/// Cursor over the lines of a layout source.
///
/// Lines are split on `\n`; a trailing `\r` is dropped as part of the line
/// terminator. A final line without terminator is still a line.
#[derive(Debug, Clone)]
pub(crate) struct SourceLines<'src> {
    lines: Vec<Spanned<&'src str>>,
    next: usize,
    end: usize,
}

impl<'src> SourceLines<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lines = Vec::new();
        let mut offset = 0;
        for raw in source.split_inclusive('\n') {
            let text = raw.strip_suffix('\n').unwrap_or(raw);
            let text = text.strip_suffix('\r').unwrap_or(text);
            lines.push(Spanned::new(text, Span::new(offset..offset + text.len())));
            offset += raw.len();
        }

        Self {
            lines,
            next: 0,
            end: source.len(),
        }
    }

    /// Moves the cursor to the line with the given index.
    pub fn seek(&mut self, line: usize) {
        self.next = line.min(self.lines.len());
    }

    /// Index of the line the next call to [`Self::next_line`] returns.
    pub fn position(&self) -> usize {
        self.next
    }

    /// Number of lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len() - self.next
    }

    /// Returns the next line, or an `E101` diagnostic naming what was expected.
    pub fn next_line(&mut self, expected: &str) -> Result<Spanned<&'src str>, Diagnostic> {
        let Some(line) = self.lines.get(self.next).copied() else {
            return Err(Diagnostic::error("unexpected end of input")
                .with_code(ErrorCode::E101)
                .with_label(Span::new(self.end..self.end), format!("expected {expected}")));
        };
        self.next += 1;
        Ok(line)
    }
}

/// Splits `text` on whitespace, returning each token with its byte range
/// relative to `text`.
pub(crate) fn tokens(text: &str) -> Vec<(std::ops::Range<usize>, &str)> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (index, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(from)) => {
                tokens.push((from..index, &text[from..index]));
                start = None;
            }
            (false, None) => start = Some(index),
            _ => {}
        }
    }
    if let Some(from) = start {
        tokens.push((from..text.len(), &text[from..]));
    }

    tokens
}

fn float_literal(input: &mut &str) -> ModalResult<f64> {
    terminated(float, eof).parse_next(input)
}

fn int_literal(input: &mut &str) -> ModalResult<i64> {
    terminated((opt(one_of(['+', '-'])), digit1).take().parse_to(), eof).parse_next(input)
}

fn count_literal(input: &mut &str) -> ModalResult<usize> {
    terminated((opt('+'), digit1).take().parse_to(), eof).parse_next(input)
}

/// Parses a finite decimal number such as `12`, `-0.5` or `1e3`.
pub(crate) fn parse_float(token: &str) -> Option<f64> {
    let mut input = token;
    float_literal(&mut input).ok().filter(|value| value.is_finite())
}

/// Parses a signed integer.
pub(crate) fn parse_int(token: &str) -> Option<i64> {
    let mut input = token;
    int_literal(&mut input).ok()
}

/// Parses a non-negative integer count.
pub(crate) fn parse_count(token: &str) -> Option<usize> {
    let mut input = token;
    count_literal(&mut input).ok()
}

/// Parses a line holding a single count, e.g. the font or layout count.
pub(crate) fn count_line(line: Spanned<&str>, what: &str) -> Result<Spanned<usize>, Diagnostic> {
    let trimmed = line.trim();
    parse_count(trimmed)
        .map(|count| Spanned::new(count, line.span()))
        .ok_or_else(|| {
            Diagnostic::error(format!("invalid {what} `{trimmed}`"))
                .with_code(ErrorCode::E100)
                .with_label(line.span(), format!("expected a non-negative integer {what}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lines_spans() {
        let source = "2\nab\r\n\nlast";
        let mut lines = SourceLines::new(source);

        let first = lines.next_line("count").unwrap();
        assert_eq!(*first, "2");
        assert_eq!(first.span(), Span::new(0..1));

        let second = lines.next_line("line").unwrap();
        assert_eq!(*second, "ab");
        assert_eq!(&source[second.span().range()], "ab");

        assert_eq!(*lines.next_line("line").unwrap(), "");
        assert_eq!(*lines.next_line("line").unwrap(), "last");
        assert_eq!(lines.remaining(), 0);
    }

    #[test]
    fn test_source_lines_trailing_newline() {
        let lines = SourceLines::new("1\n2\n");
        assert_eq!(lines.remaining(), 2);
    }

    #[test]
    fn test_source_lines_end_of_input() {
        let mut lines = SourceLines::new("1\n");
        lines.next_line("count").unwrap();

        let err = lines.next_line("layout count").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E101));
        assert_eq!(err.primary_span(), Some(Span::new(2..2)));
        assert_eq!(err.labels()[0].message(), "expected layout count");
    }

    #[test]
    fn test_seek() {
        let mut lines = SourceLines::new("a\nb\nc");
        lines.seek(2);
        assert_eq!(lines.position(), 2);
        assert_eq!(*lines.next_line("line").unwrap(), "c");
        lines.seek(10);
        assert_eq!(lines.remaining(), 0);
    }

    #[test]
    fn test_tokens() {
        let found: Vec<_> = tokens("b  1.5 2\t3 ").into_iter().collect();
        assert_eq!(
            found,
            vec![(0..1, "b"), (3..6, "1.5"), (7..8, "2"), (9..10, "3")]
        );
        assert!(tokens("   ").is_empty());
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("12"), Some(12.0));
        assert_eq!(parse_float("-0.5"), Some(-0.5));
        assert_eq!(parse_float("1e2"), Some(100.0));
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float("1.5x"), None);
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float(""), None);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("7"), Some(7));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+4"), Some(4));
        assert_eq!(parse_int("1.0"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("two"), None);
    }

    #[test]
    fn test_count_line_trims_whitespace() {
        let line = Spanned::new(" 3 ", Span::new(0..3));
        assert_eq!(*count_line(line, "layout count").unwrap(), 3);

        let bad = Spanned::new("x", Span::new(4..5));
        let err = count_line(bad, "layout count").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E100));
    }
}
