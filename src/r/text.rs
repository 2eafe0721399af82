//! Source text and byte ranges
//!
//!     Every token and every syntax node occupies a [`TextRange`]: a half open byte range
//!     `[start, end)` into the text snapshot that was parsed. The snapshot itself is held by
//!     a [`TextStream`], which is cheap to clone and can be shared across threads, so the
//!     tree that owns it can be handed to any number of readers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A half open byte range `[start, end)` in the source text
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {} is past its end {}", start, end);
        Self { start, end }
    }

    pub fn from_length(start: usize, length: usize) -> Self {
        Self::new(start, start + length)
    }

    /// An empty range positioned at `offset`
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn length(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` falls inside the range (the end is exclusive)
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Smallest range covering both `self` and `other`
    pub fn union(self, other: TextRange) -> TextRange {
        TextRange::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        TextRange::new(range.start, range.end)
    }
}

/// Read access to the text a tree was built from
pub trait TextProvider: Send + Sync {
    fn text(&self) -> &str;

    fn len(&self) -> usize {
        self.text().len()
    }

    fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Slice of the text covered by `range`
    ///
    /// Panics if the range is out of bounds or does not fall on char boundaries.
    fn get_text(&self, range: TextRange) -> &str {
        &self.text()[range.span()]
    }
}

/// Immutable, shareable text snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStream {
    text: Arc<str>,
}

impl TextStream {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }
}

impl TextProvider for TextStream {
    fn text(&self) -> &str {
        &self.text
    }
}

impl From<&str> for TextStream {
    fn from(text: &str) -> Self {
        TextStream::new(text)
    }
}

impl From<String> for TextStream {
    fn from(text: String) -> Self {
        TextStream::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains_is_end_exclusive() {
        let range = TextRange::new(2, 5);
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
        assert!(!TextRange::empty(3).contains(3));
    }

    #[test]
    fn test_range_union() {
        let a = TextRange::new(4, 6);
        let b = TextRange::new(1, 3);
        assert_eq!(a.union(b), TextRange::new(1, 6));
        assert_eq!(a.union(b).length(), 5);
    }

    #[test]
    fn test_text_stream_slices() {
        let stream = TextStream::from("x <- 1");
        assert_eq!(stream.len(), 6);
        assert_eq!(stream.get_text(TextRange::new(2, 4)), "<-");
    }
}
