//! Column model.
//!
//! Maps buffer offsets to tab-aware visual columns (raw row and column come from
//! [`TextBuffer::rowcol`]). Nothing here is cached: the buffer changes between calls within
//! a pass, so every query re-reads the line.

use crate::buffer::TextBuffer;
use unicode_width::UnicodeWidthChar;

/// Visual width of a non-tab character (based on UAX #11).
///
/// Control characters without a defined width count as 1.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Width of `ch` when it starts at visual column `x`, expanding `'\t'` to the next tab stop.
pub fn cell_width_at(ch: char, x: usize, tab_size: usize) -> usize {
    if ch == '\t' {
        let tab_size = tab_size.max(1);
        tab_size - x % tab_size
    } else {
        char_width(ch)
    }
}

/// Visual column reached after laying out `text` starting at visual column `start_col`.
pub fn visual_width(text: &str, start_col: usize, tab_size: usize) -> usize {
    text.chars()
        .fold(start_col, |x, ch| x + cell_width_at(ch, x, tab_size))
}

/// Tab-aware visual column of `offset` within its line.
pub fn visual_col<B: TextBuffer + ?Sized>(buffer: &B, offset: usize, tab_size: usize) -> usize {
    let line_start = buffer.line_range(offset).start;
    let prefix = buffer.substr(line_start..offset);
    visual_width(&prefix, 0, tab_size)
}
