//! Error types for buffer access and alignment passes.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while aligning a buffer.
pub enum AlignError {
    #[error("invalid offset: {0}")]
    /// A buffer mutation targeted an offset past the end of the buffer.
    InvalidOffset(usize),

    #[error("invalid range: {start}..{end}")]
    /// A buffer mutation targeted a range that is inverted or extends past the buffer.
    InvalidRange {
        /// Inclusive start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
    },

    #[error("regex compile error for pattern '{pattern}': {source}")]
    /// A configured pattern (declaration keyword or alignment character) failed to compile.
    InvalidPattern {
        /// The pattern string as configured.
        pattern: String,
        /// The compiler error.
        source: regex::Error,
    },

    #[error("edit point at {anchor} planned after an edit at {previous}")]
    /// Edit points of one pass were not planned in ascending order.
    UnorderedEdit {
        /// Anchor of the rejected point.
        anchor: usize,
        /// Anchor of the point planned before it.
        previous: usize,
    },
}
