//! Separator alignment.
//!
//! Lines up a separator character (`=`, `:`, ...) across the rows of a block. Each row is
//! measured first: the separator is located, a preceding prefix character (`+` in `+=`)
//! joins it as one unit, and the whitespace run left of the unit is made tab-free so the
//! visual arithmetic is exact. The widest key decides the target column; every other row
//! is then padded (or trimmed) in a single planner pass. With
//! [`AlignmentFormat::KeySeparatorVarspaceValue`] the values are lined up instead, measured
//! from the first character after the separator's whitespace.

use crate::buffer::TextBuffer;
use crate::column::{visual_col, visual_width};
use crate::config::{AlignConfig, AlignmentFormat};
use crate::error::AlignError;
use crate::planner::{EditPlanner, EditPoint};
use crate::whitespace::{is_space_or_tab, leading_whitespace};
use regex::Regex;
use std::ops::Range;

/// Compiled `alignment_chars`, in priority order.
#[derive(Debug, Clone, Default)]
pub struct Separators {
    candidates: Vec<(char, Regex)>,
}

impl Separators {
    /// Compile one search pattern per separator character.
    pub fn compile(chars: &[char]) -> Result<Self, AlignError> {
        let candidates = chars
            .iter()
            .map(|&ch| {
                let pattern = regex::escape(&ch.to_string());
                Regex::new(&pattern)
                    .map(|re| (ch, re))
                    .map_err(|source| AlignError::InvalidPattern { pattern, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { candidates })
    }

    /// Returns `true` if separator alignment is disabled.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The highest-priority separator present on `row`, with its range.
    ///
    /// The search is bounded by the row, so a row without a separator never matches text
    /// from a later row.
    pub fn find_on_row<B: TextBuffer + ?Sized>(
        &self,
        buffer: &B,
        row: usize,
    ) -> Option<(char, Range<usize>)> {
        let line = buffer.line_range(buffer.text_point(row, 0));
        self.candidates.iter().find_map(|(ch, re)| {
            buffer
                .find_next(re, line.start, line.end)
                .map(|m| (*ch, m))
        })
    }
}

/// Result of one separator pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeparatorResult {
    /// Rows on which a separator was found.
    pub rows_matched: usize,
    /// Visual column the separator units (or values, for
    /// [`AlignmentFormat::KeySeparatorVarspaceValue`]) were aligned to, if any row matched.
    pub target_col: Option<usize>,
    /// Buffer mutations performed, including tab expansion and space-after normalization.
    pub edits: usize,
}

/// Measurements of one row, taken before the alignment pass.
#[derive(Debug, Clone, Copy)]
struct RowPlan {
    /// Start of the separator unit (the prefix character, when present).
    unit_start: usize,
    /// First non-whitespace character of the row.
    key_start: usize,
    /// Visual column of `unit_start`.
    unit_col: usize,
    /// Visual column the gap must at least reach on this row.
    pad_col: usize,
    /// First character after the separator's whitespace and its visual column, unless the
    /// separator ends the line.
    value: Option<(usize, usize)>,
}

/// Align the separators of `rows` (ascending).
pub fn align_separators<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    rows: &[usize],
    config: &AlignConfig,
    separators: &Separators,
) -> Result<SeparatorResult, AlignError> {
    if separators.is_empty() || rows.is_empty() {
        return Ok(SeparatorResult::default());
    }

    let tab_size = config.effective_tab_size();
    let mut edits = 0usize;

    // Rows without a separator stay in the table as `None`.
    let mut plans: Vec<Option<RowPlan>> = Vec::with_capacity(rows.len());
    for &row in rows {
        let plan = measure_row(buffer, row, config, separators, tab_size, &mut edits)?;
        plans.push(plan);
    }

    let points = match config.alignment_format {
        AlignmentFormat::KeySeparatorVarspaceValue => value_points(&plans),
        format => unit_points(&plans, format),
    };
    let Some((target_col, points)) = points else {
        return Ok(SeparatorResult {
            edits,
            ..SeparatorResult::default()
        });
    };

    let mut planner = EditPlanner::new();
    for mut point in points {
        if config.mid_line_tabs_active() {
            point = point.with_retab(tab_size);
        }
        planner.push(point)?;
    }

    let rows_matched = plans.iter().flatten().count();
    edits += planner.apply(buffer)?.len();

    tracing::debug!(
        rows = rows.len(),
        rows_matched,
        target_col,
        format = %config.alignment_format,
        "aligned separators"
    );

    Ok(SeparatorResult {
        rows_matched,
        target_col: Some(target_col),
        edits,
    })
}

/// Move every unit to the widest padding column.
fn unit_points(
    plans: &[Option<RowPlan>],
    format: AlignmentFormat,
) -> Option<(usize, Vec<EditPoint>)> {
    let target_col = plans.iter().flatten().map(|plan| plan.pad_col).max()?;
    let points = plans
        .iter()
        .flatten()
        .map(|plan| {
            let length = target_col as isize - plan.unit_col as isize;
            let anchor = if length > 0 && format == AlignmentFormat::VarspaceKeySeparatorValue {
                plan.key_start
            } else {
                plan.unit_start
            };
            EditPoint::new(anchor, length)
        })
        .collect();
    Some((target_col, points))
}

/// Move every value to the rightmost value column, padding just before it.
fn value_points(plans: &[Option<RowPlan>]) -> Option<(usize, Vec<EditPoint>)> {
    let values = || plans.iter().flatten().filter_map(|plan| plan.value);
    let target_col = values().map(|(_, col)| col).max()?;
    let points = values()
        .map(|(offset, col)| EditPoint::new(offset, (target_col - col) as isize))
        .collect();
    Some((target_col, points))
}

fn measure_row<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    row: usize,
    config: &AlignConfig,
    separators: &Separators,
    tab_size: usize,
    edits: &mut usize,
) -> Result<Option<RowPlan>, AlignError> {
    let Some((separator, found)) = separators.find_on_row(buffer, row) else {
        return Ok(None);
    };
    let line_start = buffer.text_point(row, 0);
    let mut separator_end = found.end;

    let prefixed = found.start > line_start
        && buffer
            .char_at(found.start - 1)
            .is_some_and(|ch| config.alignment_prefix_chars.contains(&ch));
    let mut unit_start = if prefixed {
        found.start - 1
    } else {
        found.start
    };

    // Walk left over the gap, expanding tabs in place.
    let mut gap_start = unit_start;
    while gap_start > line_start {
        match buffer.char_at(gap_start - 1) {
            Some(' ') => gap_start -= 1,
            Some('\t') => {
                let tab_at = gap_start - 1;
                let width = tab_size - visual_col(buffer, tab_at, tab_size) % tab_size;
                buffer.replace(tab_at..gap_start, &" ".repeat(width))?;
                *edits += 1;
                unit_start += width - 1;
                separator_end += width - 1;
                gap_start = tab_at;
            }
            _ => break,
        }
    }

    let gap_col = visual_col(buffer, gap_start, tab_size);
    let pad_col = if config.alignment_space_chars.contains(&separator) {
        gap_col + 1
    } else {
        gap_col
    };
    let unit_col = gap_col + (unit_start - gap_start);

    if config.space_after_chars.contains(&separator) {
        let wanted = if prefixed { 2 } else { 1 };
        if normalize_space_after(buffer, separator_end, wanted)? {
            *edits += 1;
        }
    }

    let line = buffer.line_text(row);
    let key_start = line_start + leading_whitespace(&line).chars().count();

    let line_end = line_start + line.chars().count();
    let mut value_start = separator_end;
    while value_start < line_end && buffer.char_at(value_start).is_some_and(is_space_or_tab) {
        value_start += 1;
    }
    let value = (value_start < line_end)
        .then(|| (value_start, visual_col(buffer, value_start, tab_size)));

    tracing::trace!(row, %separator, prefixed, unit_col, pad_col, "measured separator row");

    Ok(Some(RowPlan {
        unit_start,
        key_start: key_start.min(unit_start),
        unit_col,
        pad_col,
        value,
    }))
}

/// Make the whitespace after `pos` exactly `wanted` spaces. Nothing is added at the end
/// of a line. Returns `true` if the buffer changed.
fn normalize_space_after<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    pos: usize,
    wanted: usize,
) -> Result<bool, AlignError> {
    let line_end = buffer.line_range(pos).end;
    let mut run_end = pos;
    while run_end < line_end && buffer.char_at(run_end).is_some_and(is_space_or_tab) {
        run_end += 1;
    }
    if run_end == line_end {
        return Ok(false);
    }

    let run = buffer.substr(pos..run_end);
    let canonical = " ".repeat(wanted);
    if run == canonical {
        return Ok(false);
    }
    buffer.replace(pos..run_end, &canonical)?;
    Ok(true)
}

/// Visual column of the separator unit on `row`, or `None` if the row has no separator.
///
/// Read-only; useful to check the outcome of a pass.
pub fn unit_visual_col<B: TextBuffer + ?Sized>(
    buffer: &B,
    row: usize,
    config: &AlignConfig,
    separators: &Separators,
) -> Option<usize> {
    let (_, found) = separators.find_on_row(buffer, row)?;
    let line_start = buffer.text_point(row, 0);
    let prefixed = found.start > line_start
        && buffer
            .char_at(found.start - 1)
            .is_some_and(|ch| config.alignment_prefix_chars.contains(&ch));
    let unit_start = if prefixed { found.start - 1 } else { found.start };
    Some(visual_width(
        &buffer.substr(line_start..unit_start),
        0,
        config.effective_tab_size(),
    ))
}
