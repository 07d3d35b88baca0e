//! The alignment command.
//!
//! One invocation inspects the selection set and dispatches:
//!
//! - several selections: multi-cursor alignment of the carets
//! - one selection spanning several rows: indentation, then separator alignment of those rows
//! - one single-row selection: whole-buffer block alignment when `whole_file_one_line` is
//!   set, otherwise nothing
//!
//! # Example
//!
//! ```rust
//! use align_core::{AlignConfig, RopeBuffer, Selection, align};
//!
//! let mut buffer = RopeBuffer::from_text("a = 1\nbb = 2\nccc = 3");
//! let config = AlignConfig::default();
//!
//! align(&mut buffer, &[Selection::new(0, 19)], &config).unwrap();
//! assert_eq!(buffer.text(), "a   = 1\nbb  = 2\nccc = 3");
//! ```

use crate::buffer::TextBuffer;
use crate::config::AlignConfig;
use crate::error::AlignError;
use crate::indent::{Declarations, align_indentation};
use crate::multi_cursor::align_cursors;
use crate::segment::BlockSegmenter;
use crate::separator::{Separators, align_separators};

/// A selection in character offsets; `end` is the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Anchor offset.
    pub start: usize,
    /// Caret offset.
    pub end: usize,
}

impl Selection {
    /// Create a selection.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty selection (a bare caret) at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Smaller of the two ends.
    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    /// Larger of the two ends.
    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    /// Returns `true` if the selection is a bare caret.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Which path an invocation took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignMode {
    /// Nothing to do.
    Noop,
    /// One multi-row selection.
    Selection,
    /// Several carets/selections.
    MultiCursor,
    /// Every block of the buffer.
    WholeBuffer,
}

/// Summary of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignOutcome {
    /// Path taken.
    pub mode: AlignMode,
    /// Blocks (or caret groups) processed.
    pub blocks: usize,
    /// Buffer mutations performed.
    pub edits: usize,
}

impl AlignOutcome {
    fn noop() -> Self {
        Self {
            mode: AlignMode::Noop,
            blocks: 0,
            edits: 0,
        }
    }
}

/// The alignment command with its settings compiled.
#[derive(Debug, Clone)]
pub struct AlignmentCommand {
    config: AlignConfig,
    declarations: Declarations,
    separators: Separators,
}

impl AlignmentCommand {
    /// Compile `config` into a command.
    pub fn new(config: &AlignConfig) -> Result<Self, AlignError> {
        Ok(Self {
            declarations: Declarations::compile(&config.declarations)?,
            separators: Separators::compile(&config.alignment_chars)?,
            config: config.clone(),
        })
    }

    /// Run the command against `buffer` with the host's current `selections`.
    pub fn run<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        selections: &[Selection],
    ) -> Result<AlignOutcome, AlignError> {
        match selections {
            [] => {
                tracing::debug!("no selections, nothing to align");
                Ok(AlignOutcome::noop())
            }
            [selection] => self.run_single(buffer, *selection),
            _ => {
                let carets: Vec<usize> = selections.iter().map(|s| s.end).collect();
                let result = align_cursors(buffer, &carets, &self.config)?;
                tracing::debug!(carets = carets.len(), groups = result.groups, "multi-cursor alignment");
                Ok(AlignOutcome {
                    mode: AlignMode::MultiCursor,
                    blocks: result.groups,
                    edits: result.edits,
                })
            }
        }
    }

    fn run_single<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        selection: Selection,
    ) -> Result<AlignOutcome, AlignError> {
        let (start_row, _) = buffer.rowcol(selection.min());
        let (mut end_row, end_col) = buffer.rowcol(selection.max());
        if end_row > start_row && end_col == 0 {
            end_row -= 1;
        }

        if start_row == end_row {
            if self.config.whole_file_one_line {
                return self.run_whole_buffer(buffer);
            }
            tracing::debug!(row = start_row, "single-line selection, nothing to align");
            return Ok(AlignOutcome::noop());
        }

        let rows: Vec<usize> = (start_row..=end_row).collect();
        tracing::debug!(start_row, end_row, "aligning selected rows");
        let edits = self.align_rows(buffer, &rows)?;
        Ok(AlignOutcome {
            mode: AlignMode::Selection,
            blocks: 1,
            edits,
        })
    }

    /// Align every block of the buffer, top to bottom.
    pub fn run_whole_buffer<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
    ) -> Result<AlignOutcome, AlignError> {
        // Edits never add or remove line terminators, so rows found up front stay valid.
        let text = buffer.substr(0..buffer.len_chars());
        let mut blocks = 0usize;
        let mut edits = 0usize;

        for block in BlockSegmenter::new(&text) {
            tracing::debug!(rows = ?block.rows(), "aligning block");
            edits += self.align_rows(buffer, block.rows())?;
            blocks += 1;
        }

        Ok(AlignOutcome {
            mode: AlignMode::WholeBuffer,
            blocks,
            edits,
        })
    }

    fn align_rows<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        rows: &[usize],
    ) -> Result<usize, AlignError> {
        let mut edits = 0usize;
        if self.config.align_indent {
            edits += align_indentation(buffer, rows, &self.config, &self.declarations)?.edits;
        }
        if !self.separators.is_empty() {
            edits += align_separators(buffer, rows, &self.config, &self.separators)?.edits;
        }
        Ok(edits)
    }
}

/// Compile `config` and run the alignment command once.
pub fn align<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    selections: &[Selection],
    config: &AlignConfig,
) -> Result<AlignOutcome, AlignError> {
    AlignmentCommand::new(config)?.run(buffer, selections)
}
