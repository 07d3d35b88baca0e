//! Host buffer abstraction.
//!
//! The alignment engine never owns text. It reads and mutates a host buffer through
//! [`TextBuffer`], using **character offsets** (Unicode scalar values) for every position.
//! [`RopeBuffer`] is the in-memory implementation used by the CLI and the tests.

use crate::error::AlignError;
use regex::Regex;
use ropey::Rope;
use std::ops::Range;

/// Read/write contract the engine expects from its host.
///
/// Mutations take effect immediately; offsets passed to later calls must already account
/// for earlier mutations.
pub trait TextBuffer {
    /// Total number of characters in the buffer.
    fn len_chars(&self) -> usize;

    /// Number of lines (an empty buffer has one line).
    fn line_count(&self) -> usize;

    /// Row and raw column (every character, including `'\t'`, counts as 1) of `offset`.
    fn rowcol(&self, offset: usize) -> (usize, usize);

    /// Offset of `col` on `row`, clamped to the end of that line.
    fn text_point(&self, row: usize, col: usize) -> usize;

    /// Half-open range of the line containing `offset`, excluding its terminator.
    fn line_range(&self, offset: usize) -> Range<usize>;

    /// Text of `range`, clamped to the buffer.
    fn substr(&self, range: Range<usize>) -> String;

    /// First match of `pattern` starting at or after `from` and ending at or before `limit`.
    fn find_next(&self, pattern: &Regex, from: usize, limit: usize) -> Option<Range<usize>>;

    /// Insert `text` at `offset`.
    fn insert(&mut self, offset: usize, text: &str) -> Result<(), AlignError>;

    /// Delete `range`.
    fn erase(&mut self, range: Range<usize>) -> Result<(), AlignError>;

    /// Replace `range` with `text`.
    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), AlignError>;

    /// Character at `offset`, or `None` at/after the end of the buffer.
    fn char_at(&self, offset: usize) -> Option<char> {
        self.substr(offset..offset.saturating_add(1)).chars().next()
    }

    /// Text of `row`, excluding its terminator.
    fn line_text(&self, row: usize) -> String {
        let start = self.text_point(row, 0);
        self.substr(self.line_range(start))
    }
}

/// A [`TextBuffer`] backed by a [`Rope`].
///
/// Only `'\n'` is treated as a line break; callers holding CRLF text should normalize it
/// first (see [`crate::LineEnding`]).
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build a buffer from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get the complete text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    fn line_len(&self, row: usize) -> usize {
        let line = self.rope.line(row);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), AlignError> {
        if range.start > range.end || range.end > self.rope.len_chars() {
            return Err(AlignError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        Ok(())
    }
}

impl TextBuffer for RopeBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn rowcol(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_chars());
        let row = self.rope.char_to_line(offset);
        (row, offset - self.rope.line_to_char(row))
    }

    fn text_point(&self, row: usize, col: usize) -> usize {
        if row >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(row) + col.min(self.line_len(row))
    }

    fn line_range(&self, offset: usize) -> Range<usize> {
        let offset = offset.min(self.rope.len_chars());
        let row = self.rope.char_to_line(offset);
        let start = self.rope.line_to_char(row);
        start..start + self.line_len(row)
    }

    fn substr(&self, range: Range<usize>) -> String {
        let len = self.rope.len_chars();
        let end = range.end.min(len);
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.rope.len_chars()).then(|| self.rope.char(offset))
    }

    fn find_next(&self, pattern: &Regex, from: usize, limit: usize) -> Option<Range<usize>> {
        let limit = limit.min(self.rope.len_chars());
        let from = from.min(limit);
        let first_row = self.rope.char_to_line(from);
        let last_row = self.rope.char_to_line(limit);

        for row in first_row..=last_row {
            let start = self.rope.line_to_char(row);
            let end = (start + self.line_len(row)).min(limit);
            let text = self.rope.slice(start..end).to_string();
            let skip = if row == first_row { from - start } else { 0 };
            let skip_byte = text
                .char_indices()
                .nth(skip)
                .map(|(b, _)| b)
                .unwrap_or(text.len());

            if let Some(m) = pattern.find_at(&text, skip_byte) {
                let match_start = start + text[..m.start()].chars().count();
                let match_len = m.as_str().chars().count();
                return Some(match_start..match_start + match_len);
            }
        }

        None
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), AlignError> {
        if offset > self.rope.len_chars() {
            return Err(AlignError::InvalidOffset(offset));
        }
        self.rope.insert(offset, text);
        Ok(())
    }

    fn erase(&mut self, range: Range<usize>) -> Result<(), AlignError> {
        self.check_range(&range)?;
        if range.start < range.end {
            self.rope.remove(range);
        }
        Ok(())
    }

    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), AlignError> {
        self.check_range(&range)?;
        let start = range.start;
        if range.start < range.end {
            self.rope.remove(range);
        }
        self.rope.insert(start, text);
        Ok(())
    }
}
