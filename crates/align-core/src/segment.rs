//! Block segmentation for whole-buffer alignment.
//!
//! Lines are grouped by indentation level. Consecutive lines of equal indentation share a
//! block; a deeper run opens a nested block and, once it dedents, the enclosing block
//! resumes. Blank lines are skipped and never break a block.

use crate::whitespace::{is_blank, leading_whitespace};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::iter::Enumerate;
use std::str::Lines;

/// An ordered set of rows aligned together as one unit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Block {
    rows: Vec<usize>,
}

impl Block {
    /// Create a block from rows in ascending order.
    pub fn new(rows: Vec<usize>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0] < w[1]));
        Self { rows }
    }

    /// Rows of the block, top to bottom.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// First row, if any.
    pub fn first_row(&self) -> Option<usize> {
        self.rows.first().copied()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the block has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<usize>> for Block {
    fn from(rows: Vec<usize>) -> Self {
        Self::new(rows)
    }
}

#[derive(Debug)]
struct OpenBlock {
    indent: usize,
    rows: Vec<usize>,
}

/// Lazy iterator over the blocks of a text, in ascending order of first row.
///
/// A block is yielded once it is closed and no open block starts before it.
pub struct BlockSegmenter<'a> {
    lines: Enumerate<Lines<'a>>,
    open: Vec<OpenBlock>,
    closed: BinaryHeap<Reverse<Block>>,
    finished: bool,
}

impl<'a> BlockSegmenter<'a> {
    /// Start segmenting `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            open: Vec::new(),
            closed: BinaryHeap::new(),
            finished: false,
        }
    }

    fn push_line(&mut self, row: usize, line: &str) {
        if is_blank(line) {
            return;
        }
        let indent = leading_whitespace(line).chars().count();

        while self.open.last().is_some_and(|top| top.indent > indent) {
            if let Some(done) = self.open.pop() {
                self.closed.push(Reverse(Block::new(done.rows)));
            }
        }

        match self.open.last_mut() {
            Some(top) if top.indent == indent => top.rows.push(row),
            _ => self.open.push(OpenBlock {
                indent,
                rows: vec![row],
            }),
        }
    }

    fn next_ready(&mut self) -> Option<Block> {
        let Reverse(min) = self.closed.peek()?;
        let outermost_open = self.open.first().map(|open| open.rows[0]);
        let ready = match (min.first_row(), outermost_open) {
            (_, None) => true,
            (Some(first), Some(open_first)) => first < open_first,
            (None, Some(_)) => true,
        };
        if ready {
            self.closed.pop().map(|Reverse(block)| block)
        } else {
            None
        }
    }
}

impl Iterator for BlockSegmenter<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        loop {
            if let Some(block) = self.next_ready() {
                return Some(block);
            }
            if self.finished {
                return None;
            }
            match self.lines.next() {
                Some((row, line)) => self.push_line(row, line),
                None => {
                    self.finished = true;
                    while let Some(done) = self.open.pop() {
                        self.closed.push(Reverse(Block::new(done.rows)));
                    }
                }
            }
        }
    }
}

/// Collect every block of `text`.
pub fn segment_blocks(text: &str) -> Vec<Block> {
    BlockSegmenter::new(text).collect()
}
