//! Line and column positions for byte offsets
//!
//! Tokens and nodes only carry byte ranges. Tooling that reports to people (the `check`
//! command, error messages) converts them on demand through a [`SourceLocation`] built once
//! per text.
//!
//! - Lines and columns are 0-based; display adds nothing, callers add 1 when they want to.
//! - Columns count bytes from the start of the line.
//! - Conversion is a binary search over the line start table.

use crate::r::text::TextRange;
use serde::Serialize;
use std::fmt;

/// Represents a position in source code (line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end positions of a byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Location {
    pub range: TextRange,
    pub start: Position,
    pub end: Position,
}

impl Location {
    /// Check if a position is contained within this location (both ends inclusive)
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        Position::new(line, byte_offset - self.line_starts[line])
    }

    pub fn locate(&self, range: TextRange) -> Location {
        Location {
            range,
            start: self.byte_to_position(range.start),
            end: self.byte_to_position(range.end),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where `line` starts
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 5) < Position::new(2, 0));
        assert!(Position::new(1, 5) > Position::new(1, 4));
        assert_eq!(format!("{}", Position::new(5, 10)), "5:10");
    }

    #[test]
    fn test_byte_to_position_multiline() {
        let loc = SourceLocation::new("x <- 1\ny <- 2\nz");

        assert_eq!(loc.byte_to_position(0), Position::new(0, 0));
        assert_eq!(loc.byte_to_position(6), Position::new(0, 6));
        assert_eq!(loc.byte_to_position(7), Position::new(1, 0));
        assert_eq!(loc.byte_to_position(12), Position::new(1, 5));
        assert_eq!(loc.byte_to_position(14), Position::new(2, 0));
    }

    #[test]
    fn test_byte_to_position_with_unicode() {
        let loc = SourceLocation::new("s <- \"é\"\nx");
        assert_eq!(loc.byte_to_position(10), Position::new(1, 0));
    }

    #[test]
    fn test_locate() {
        let loc = SourceLocation::new("f(\n  x\n)");
        let location = loc.locate(TextRange::new(0, 8));
        assert_eq!(location.start, Position::new(0, 0));
        assert_eq!(location.end, Position::new(2, 1));
        assert!(location.contains(Position::new(1, 2)));
        assert!(!location.contains(Position::new(2, 2)));
        assert_eq!(format!("{}", location), "0:0..2:1");
    }

    #[test]
    fn test_line_table() {
        let loc = SourceLocation::new("a\nb\nc");
        assert_eq!(loc.line_count(), 3);
        assert_eq!(loc.line_start(1), Some(2));
        assert_eq!(loc.line_start(3), None);
        assert_eq!(SourceLocation::new("").line_count(), 1);
    }
}
