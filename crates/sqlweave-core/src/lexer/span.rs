//! Byte ranges inside scanned SQL text.

use std::ops::Range;

/// The bytes a [`super::Mark`] covers, start inclusive and end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// First byte of the mark.
    pub start: usize,
    /// One past the last byte of the mark.
    pub end: usize,
}

impl Span {
    /// Creates a span over `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the marked text, or `""` if the span lies outside `sql`.
    #[must_use]
    pub fn slice<'t>(&self, sql: &'t str) -> &'t str {
        sql.get(self.start..self.end).unwrap_or("")
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}
