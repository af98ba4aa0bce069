//! Byte spans into layout source text.

use std::{fmt, ops::Range};

/// A half-open byte range into the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns a span relative to this one.
    ///
    /// `range` is interpreted as byte offsets from this span's start.
    pub fn sub(&self, range: Range<usize>) -> Span {
        Span::new(self.start + range.start..self.start + range.end)
    }

    /// Returns the byte range covered by this span.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A value tagged with the span of source text it came from.
#[derive(Debug, Clone, Copy)]
pub struct Spanned<T> {
    value: T,
    span: Span,
}

impl<T> Spanned<T> {
    /// Create a new spanned value.
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// Get the span of this value.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get a reference to the underlying value
    pub fn inner(&self) -> &T {
        &self.value
    }

    /// Consume the wrapper and return just the inner value
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transforms the value, keeping the span.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            value: f(self.value),
            span: self.span,
        }
    }
}

impl<T> std::ops::Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

// Spans are ignored: two commands are equal if they say the same thing.
impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq(&other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic_functionality() {
        let span = Span::new(5..10);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_span_inverted_range_is_empty() {
        let span = Span::new(7..3);
        assert!(span.is_empty());
        assert_eq!(span.start(), 7);
    }

    #[test]
    fn test_span_sub() {
        let line = Span::new(20..30);
        assert_eq!(line.sub(2..5), Span::new(22..25));
    }

    #[test]
    fn test_spanned_equality_ignores_span() {
        let a = Spanned::new(3, Span::new(0..1));
        let b = Spanned::new(3, Span::new(10..11));
        assert_eq!(a, b);
        assert_eq!(*a.map(|v| v * 2), 6);
    }
}
