//! Edit planning and application.
//!
//! Aligners measure a whole pass against the buffer as it was before the pass, then hand
//! the resulting [`EditPoint`]s to an [`EditPlanner`]. The planner applies them top to
//! bottom while keeping a running `adjustment`: every planned anchor is shifted by the net
//! length of all edits applied before it, so no position has to be re-queried mid-pass.

use crate::buffer::TextBuffer;
use crate::column::visual_col;
use crate::error::AlignError;
use crate::whitespace::{IndentStyle, convert_run, is_space_or_tab};

/// Padding character inserted by an [`EditPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    /// `' '`
    #[default]
    Space,
    /// `'\t'`
    Tab,
}

impl Fill {
    fn as_str(self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Tab => "\t",
        }
    }
}

/// One planned whitespace mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditPoint {
    /// Offset as measured before any edit of the pass was applied.
    pub anchor: usize,
    /// Positive: insert that many fill characters at the anchor. Negative: delete that many
    /// characters ending at the anchor. Zero: no-op.
    pub length: isize,
    /// Character inserted for positive lengths.
    pub fill: Fill,
    /// When set, the whitespace run touched by the edit is re-encoded with tabs using this
    /// tab size, and the length change is folded into the adjustment.
    pub retab: Option<usize>,
}

impl EditPoint {
    /// Plan a signed space edit at `anchor`.
    pub fn new(anchor: usize, length: isize) -> Self {
        Self {
            anchor,
            length,
            fill: Fill::Space,
            retab: None,
        }
    }

    /// Plan an insertion of `count` `fill` characters at `anchor`.
    pub fn insert(anchor: usize, count: usize, fill: Fill) -> Self {
        Self {
            anchor,
            length: count as isize,
            fill,
            retab: None,
        }
    }

    /// Re-encode the touched run with tabs after applying.
    pub fn with_retab(mut self, tab_size: usize) -> Self {
        self.retab = Some(tab_size);
        self
    }
}

/// Outcome of one applied [`EditPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedEdit {
    /// The planned (pre-pass) anchor.
    pub anchor: usize,
    /// Where the edit actually landed in the buffer.
    pub start: usize,
    /// Net change in buffer length, including any re-encode.
    pub delta: isize,
}

/// Applies one pass of [`EditPoint`]s with a running adjustment.
#[derive(Debug, Default)]
pub struct EditPlanner {
    points: Vec<EditPoint>,
    adjustment: isize,
}

impl EditPlanner {
    /// Create an empty planner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point. Anchors must not decrease within a pass.
    pub fn push(&mut self, point: EditPoint) -> Result<(), AlignError> {
        if let Some(last) = self.points.last()
            && point.anchor < last.anchor
        {
            return Err(AlignError::UnorderedEdit {
                anchor: point.anchor,
                previous: last.anchor,
            });
        }
        self.points.push(point);
        Ok(())
    }

    /// Net shift accumulated by the last [`EditPlanner::apply`].
    pub fn adjustment(&self) -> isize {
        self.adjustment
    }

    /// Apply every planned point in order and return what was changed.
    ///
    /// Zero-length points are skipped. The planner is empty afterwards.
    pub fn apply<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &mut B,
    ) -> Result<Vec<AppliedEdit>, AlignError> {
        self.adjustment = 0;
        let mut applied = Vec::with_capacity(self.points.len());

        for point in std::mem::take(&mut self.points) {
            if point.length == 0 {
                continue;
            }

            let at = usize::try_from(point.anchor as isize + self.adjustment)
                .map_err(|_| AlignError::InvalidOffset(point.anchor))?;
            let count = point.length.unsigned_abs();

            let start = if point.length > 0 {
                buffer.insert(at, &point.fill.as_str().repeat(count))?;
                at
            } else {
                let start = at.checked_sub(count).ok_or(AlignError::InvalidRange {
                    start: at,
                    end: at,
                })?;
                buffer.erase(start..at)?;
                start
            };

            let mut delta = point.length;
            if let Some(tab_size) = point.retab {
                delta += retab_run(buffer, start, tab_size)?;
            }

            tracing::trace!(
                anchor = point.anchor,
                start,
                length = point.length,
                delta,
                "applied edit point"
            );

            self.adjustment += delta;
            applied.push(AppliedEdit {
                anchor: point.anchor,
                start,
                delta,
            });
        }

        Ok(applied)
    }
}

/// Re-encode the run of spaces/tabs around `pos` with tabs, returning the length change.
pub(crate) fn retab_run<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    pos: usize,
    tab_size: usize,
) -> Result<isize, AlignError> {
    let line = buffer.line_range(pos);

    let mut run_start = pos;
    while run_start > line.start && buffer.char_at(run_start - 1).is_some_and(is_space_or_tab) {
        run_start -= 1;
    }
    let mut run_end = pos;
    while run_end < line.end && buffer.char_at(run_end).is_some_and(is_space_or_tab) {
        run_end += 1;
    }
    if run_start == run_end {
        return Ok(0);
    }

    let run = buffer.substr(run_start..run_end);
    let start_col = visual_col(buffer, run_start, tab_size);
    let encoded = convert_run(&run, IndentStyle::Tabs, tab_size, start_col);
    if encoded == run {
        return Ok(0);
    }

    buffer.replace(run_start..run_end, &encoded)?;
    Ok(encoded.chars().count() as isize - run.chars().count() as isize)
}
