//! Byte offset <-> line/column mapping.
//!
//! Lines and columns are zero-based. Columns count characters, not bytes.

use codespan_reporting::files::line_starts;
use serde::{Deserialize, Serialize};

use crate::cst::Span;

/// A zero-based line/column position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

impl LineCol {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Line table over a source text
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            line_starts: line_starts(source).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of `offset`. Offsets past the end map to the end; offsets
    /// inside a multi-byte character map to that character.
    pub fn line_col(&self, offset: usize) -> LineCol {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let column = self.source[self.line_starts[line]..offset].chars().count();
        LineCol { line, column }
    }

    /// Byte offset of a position, or `None` if it lies outside the text
    pub fn offset(&self, position: LineCol) -> Option<usize> {
        let span = self.line_span(position.line)?;
        let line = &self.source[span.start..span.end];

        if position.column == line.chars().count() {
            return Some(span.end);
        }
        line.char_indices()
            .nth(position.column)
            .map(|(index, _)| span.start + index)
    }

    /// Span of a line, excluding its line terminator
    pub fn line_span(&self, line: usize) -> Option<Span> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.source.len());

        let text = &self.source[start..end];
        let trimmed = text
            .strip_suffix('\n')
            .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
            .unwrap_or(text);
        Some(Span::new(start, start + trimmed.len()))
    }
}
