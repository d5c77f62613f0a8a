//! Source positions and ranges
//!
//! Positions use 1-based lines and 1-based columns. Columns count
//! characters, not bytes and not UTF-16 code units. The byte offset is
//! 0-based and kept alongside so that edits can be applied without
//! rescanning the document.

use serde::{Deserialize, Serialize};

/// A single position in a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number in characters (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the document (0-indexed)
    pub byte: usize,
}

impl Pos {
    /// Create a new position
    pub fn new(line: usize, column: usize, byte: usize) -> Self {
        Self { line, column, byte }
    }

    /// The first position of a document
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Default for Pos {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A range in a named source document
///
/// `start` is inclusive and `end` is exclusive. The default value is the
/// zero range with an empty filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    /// Name of the file the range belongs to
    pub filename: String,
    /// Start position (inclusive)
    pub start: Pos,
    /// End position (exclusive)
    pub end: Pos,
}

impl Range {
    /// Create a new range
    pub fn new(filename: impl Into<String>, start: Pos, end: Pos) -> Self {
        Self {
            filename: filename.into(),
            start,
            end,
        }
    }

    /// Create a zero-width range at a position
    pub fn point(filename: impl Into<String>, pos: Pos) -> Self {
        Self::new(filename, pos, pos)
    }

    /// Check if the range is zero-width
    pub fn is_empty(&self) -> bool {
        self.start.byte == self.end.byte
    }

    /// Check if this range contains a byte offset
    pub fn contains(&self, byte: usize) -> bool {
        byte >= self.start.byte && byte < self.end.byte
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.filename, self.start, self.end)
    }
}
