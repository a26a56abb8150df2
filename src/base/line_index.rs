//! Byte offset to line/column conversion.

use text_size::{TextRange, TextSize};

use super::{Position, Span};

/// A 0-based line/column pair. Columns count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Line start table for one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| TextSize::new(i as u32 + 1)),
        );
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Offsets past the end of the text are clamped to the last position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        LineCol {
            line: line as u32,
            col: u32::from(offset - self.line_starts[line]),
        }
    }

    pub fn position(&self, offset: TextSize) -> Position {
        let lc = self.line_col(offset);
        Position::new(lc.line as usize, lc.col as usize)
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_first_line() {
        let index = LineIndex::new("entity e is\nend;\n");
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col(TextSize::new(7)), LineCol { line: 0, col: 7 });
    }

    #[test]
    fn test_line_col_after_newline() {
        let index = LineIndex::new("entity e is\nend;\n");
        assert_eq!(index.line_col(TextSize::new(12)), LineCol { line: 1, col: 0 });
        assert_eq!(index.line_col(TextSize::new(15)), LineCol { line: 1, col: 3 });
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn test_line_col_clamps_past_end() {
        let index = LineIndex::new("ab");
        assert_eq!(index.line_col(TextSize::new(40)), LineCol { line: 0, col: 2 });
    }

    #[test]
    fn test_span_of_range() {
        let index = LineIndex::new("a\nbc\n");
        let span = index.span(TextRange::new(TextSize::new(2), TextSize::new(4)));
        assert_eq!(span, Span::from_coords(1, 0, 1, 2));
    }
}
