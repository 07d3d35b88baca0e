//! Multi-cursor alignment.
//!
//! The i-th caret of every row belongs to group i. Groups are aligned one after another:
//! every caret of a group is padded with spaces up to the rightmost caret of that group.

use crate::buffer::TextBuffer;
use crate::column::visual_col;
use crate::config::AlignConfig;
use crate::error::AlignError;
use crate::planner::{EditPlanner, EditPoint};

/// Result of a multi-cursor pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultiCursorResult {
    /// Number of ordinal groups.
    pub groups: usize,
    /// Buffer mutations performed.
    pub edits: usize,
}

/// Split carets (ascending offsets) into ordinal groups of indices into `carets`.
///
/// The ordinal restarts at 0 whenever the row changes.
pub fn group_by_ordinal<B: TextBuffer + ?Sized>(buffer: &B, carets: &[usize]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut last_row = None;
    let mut ordinal = 0usize;

    for (index, &caret) in carets.iter().enumerate() {
        let row = buffer.rowcol(caret).0;
        if last_row == Some(row) {
            ordinal += 1;
        } else {
            ordinal = 0;
            last_row = Some(row);
        }
        if groups.len() <= ordinal {
            groups.resize_with(ordinal + 1, Vec::new);
        }
        groups[ordinal].push(index);
    }

    groups
}

/// Align `carets` by ordinal group.
pub fn align_cursors<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    carets: &[usize],
    config: &AlignConfig,
) -> Result<MultiCursorResult, AlignError> {
    let tab_size = config.effective_tab_size();

    let mut positions = carets.to_vec();
    positions.sort_unstable();
    positions.dedup();

    let groups = group_by_ordinal(buffer, &positions);
    let mut edits = 0usize;

    for (ordinal, group) in groups.iter().enumerate() {
        let cols: Vec<usize> = group
            .iter()
            .map(|&index| visual_col(buffer, positions[index], tab_size))
            .collect();
        let Some(&target_col) = cols.iter().max() else {
            continue;
        };

        let mut planner = EditPlanner::new();
        for (&index, &col) in group.iter().zip(&cols) {
            let mut point = EditPoint::new(positions[index], (target_col - col) as isize);
            if config.mid_line_tabs_active() {
                point = point.with_retab(tab_size);
            }
            planner.push(point)?;
        }
        let applied = planner.apply(buffer)?;

        tracing::debug!(
            ordinal,
            carets = group.len(),
            target_col,
            edits = applied.len(),
            "aligned caret group"
        );

        // Carets of later groups were measured against the pre-pass buffer.
        for position in positions.iter_mut() {
            let shift: isize = applied
                .iter()
                .filter(|edit| edit.anchor < *position)
                .map(|edit| edit.delta)
                .sum();
            *position = position.saturating_add_signed(shift);
        }
        edits += applied.len();
    }

    Ok(MultiCursorResult {
        groups: groups.len(),
        edits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RopeBuffer;

    #[test]
    fn test_group_by_ordinal_resets_per_row() {
        let buffer = RopeBuffer::from_text("abcdefgh\nxyz");
        // (row0, 2), (row0, 5), (row1, 1)
        let groups = group_by_ordinal(&buffer, &[2, 5, 10]);
        assert_eq!(groups, vec![vec![0, 2], vec![1]]);
    }
}
