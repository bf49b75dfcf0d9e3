//! Source position tracking
//!
//! Converts absolute byte offsets into line/column pairs via a lazily
//! extended table of line-start offsets, so repeated lookups are
//! O(log n) after warm-up instead of a rescan per call.

use serde::Serialize;

/// A resolved source position: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    #[serde(skip_serializing)]
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start/end positions attached to a node or token when `locations` is on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub start: Position,
    pub end: Position,
}

/// Incrementally built table of line-start offsets.
///
/// The table grows monotonically as lookups probe further into the
/// source; once a prefix has been scanned it is never rescanned.
/// Recognizes all ECMAScript line terminators: LF, CR, CRLF,
/// LS (U+2028) and PS (U+2029).
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Sorted byte offsets at which lines begin; always contains 0.
    starts: Vec<usize>,
    /// Byte offset up to which the source has been scanned.
    scanned: usize,
}

impl Default for LineMap {
    fn default() -> Self {
        Self::new()
    }
}

impl LineMap {
    pub fn new() -> Self {
        Self {
            starts: vec![0],
            scanned: 0,
        }
    }

    /// Resolve `offset` against `text`, extending the table as needed.
    pub fn position_at(&mut self, text: &str, offset: usize) -> Position {
        self.extend_to(text, offset);
        let line_idx = self.starts.partition_point(|&s| s <= offset).saturating_sub(1);
        let line_start = self.starts.get(line_idx).copied().unwrap_or(0);
        Position {
            line: line_idx + 1,
            column: offset.saturating_sub(line_start),
            offset,
        }
    }

    /// Inverse of `position_at`: recover the absolute offset of a
    /// (line, column) pair already covered by the table.
    pub fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        self.starts.get(line.checked_sub(1)?).map(|s| s + column)
    }

    fn extend_to(&mut self, text: &str, offset: usize) {
        while self.scanned < text.len() && self.scanned <= offset {
            let Some(rest) = text.get(self.scanned..) else {
                break;
            };
            let Some(ch) = rest.chars().next() else {
                // Mid-codepoint offset; snap forward to the next boundary.
                self.scanned += 1;
                continue;
            };
            let len = ch.len_utf8();
            match ch {
                '\r' => {
                    // CRLF counts as a single terminator
                    let after = if text.get(self.scanned + 1..self.scanned + 2) == Some("\n") {
                        self.scanned + 2
                    } else {
                        self.scanned + 1
                    };
                    self.starts.push(after);
                    self.scanned = after;
                }
                '\n' | '\u{2028}' | '\u{2029}' => {
                    self.starts.push(self.scanned + len);
                    self.scanned += len;
                }
                _ => self.scanned += len,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line() {
        let mut map = LineMap::new();
        assert_eq!(map.position_at("abc", 0), Position::new(1, 0, 0));
        assert_eq!(map.position_at("abc", 2), Position::new(1, 2, 2));
    }

    #[test]
    fn line_breaks() {
        let mut map = LineMap::new();
        let text = "ab\ncd\ref\r\ngh";
        assert_eq!(map.position_at(text, 3), Position::new(2, 0, 3));
        assert_eq!(map.position_at(text, 6), Position::new(3, 0, 6));
        // CRLF is one terminator, so offset 10 starts line 4
        assert_eq!(map.position_at(text, 10), Position::new(4, 0, 10));
    }

    #[test]
    fn unicode_separators() {
        let mut map = LineMap::new();
        let text = "a\u{2028}b\u{2029}c";
        assert_eq!(map.position_at(text, 4), Position::new(2, 0, 4));
        assert_eq!(map.position_at(text, 8), Position::new(3, 0, 8));
    }

    #[test]
    fn out_of_order_lookups() {
        let mut map = LineMap::new();
        let text = "a\nb\nc\nd";
        assert_eq!(map.position_at(text, 6), Position::new(4, 0, 6));
        assert_eq!(map.position_at(text, 0), Position::new(1, 0, 0));
        assert_eq!(map.position_at(text, 2), Position::new(2, 0, 2));
    }

    #[test]
    fn offset_roundtrip() {
        let mut map = LineMap::new();
        let text = "let x = 1;\nlet y = 2;\nx + y\n";
        for offset in 0..text.len() {
            let pos = map.position_at(text, offset);
            assert_eq!(map.offset_of(pos.line, pos.column), Some(offset));
        }
    }
}
