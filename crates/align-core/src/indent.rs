//! Indentation alignment.
//!
//! Brings the left edge of every row in a block to the same visual column. Leading
//! whitespace is first re-encoded to the preferred indent character, then the shallower
//! rows are padded up to the deepest edge. Rows starting with a configured declaration
//! keyword use the character after `keyword + ' '` as their edge instead, so the names being
//! declared line up.
//!
//! Edges are compared by visual column, so `"\t"` and eight spaces count as the same depth
//! at tab size 8. Padding in front of a declared name is always spaces; padding of plain
//! indentation follows the indent style.

use crate::buffer::TextBuffer;
use crate::config::AlignConfig;
use crate::error::AlignError;
use crate::column::{visual_col, visual_width};
use crate::planner::{EditPlanner, EditPoint, Fill};
use crate::whitespace::{IndentStyle, convert_run, is_blank, leading_whitespace};
use regex::Regex;
use std::ops::Range;

/// Location of a declaration keyword within a line, in character columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationMatch {
    /// The keyword itself.
    pub keyword: Range<usize>,
    /// The whitespace run following the keyword (never empty).
    pub gap: Range<usize>,
}

/// Compiled `declarations` patterns.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    patterns: Vec<Regex>,
}

impl Declarations {
    /// Compile keyword patterns. Each pattern is anchored at the first non-whitespace
    /// character of a line.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, AlignError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
                    AlignError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns `true` if no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Match `line` against the patterns in order.
    ///
    /// A match counts only when the keyword is followed by whitespace and then by more
    /// text.
    pub fn match_declaration(&self, line: &str) -> Option<DeclarationMatch> {
        let indent = leading_whitespace(line);
        let rest = &line[indent.len()..];
        let indent_cols = indent.chars().count();

        self.patterns.iter().find_map(|re| {
            let m = re.find(rest).filter(|m| m.end() > 0)?;
            let after = &rest[m.end()..];
            let gap = leading_whitespace(after);
            if gap.is_empty() || gap.len() == after.len() {
                return None;
            }

            let keyword_end = indent_cols + rest[..m.end()].chars().count();
            let gap_end = keyword_end + gap.chars().count();
            Some(DeclarationMatch {
                keyword: indent_cols..keyword_end,
                gap: keyword_end..gap_end,
            })
        })
    }
}

/// Result of one indentation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndentResult {
    /// Rows that took part (blank rows may be skipped).
    pub rows: usize,
    /// Visual column every participating row was padded to.
    pub target_col: usize,
    /// `true` if no row needed padding.
    pub already_aligned: bool,
    /// Buffer mutations performed, including whitespace re-encoding.
    pub edits: usize,
}

struct Edge {
    offset: usize,
    col: usize,
    declaration: bool,
}

impl Edge {
    /// Padding that moves this edge from its column to `target_col`.
    fn padding(&self, target_col: usize, style: IndentStyle, tab_size: usize) -> EditPoint {
        let width = target_col - self.col;
        if self.declaration || style == IndentStyle::Spaces {
            return EditPoint::insert(self.offset, width, Fill::Space);
        }
        if self.col % tab_size == 0 && target_col % tab_size == 0 {
            return EditPoint::insert(self.offset, width / tab_size, Fill::Tab);
        }
        // The leading run starts at column 0, so re-encoding it yields tabs then spaces.
        EditPoint::insert(self.offset, width, Fill::Space).with_retab(tab_size)
    }
}

/// Align the left edges of `rows` (ascending).
pub fn align_indentation<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    rows: &[usize],
    config: &AlignConfig,
    declarations: &Declarations,
) -> Result<IndentResult, AlignError> {
    let style = config.indent_style();
    let tab_size = config.effective_tab_size();
    let mut edits = 0usize;
    let mut edges: Vec<Edge> = Vec::with_capacity(rows.len());

    for &row in rows {
        let line_start = buffer.text_point(row, 0);
        let line = buffer.line_text(row);
        if config.trim_trailing_white_space_on_save && is_blank(&line) {
            continue;
        }

        let leading = leading_whitespace(&line);
        let encoded = convert_run(leading, style, tab_size, 0);
        let leading_len = leading.chars().count();
        if encoded != leading {
            buffer.replace(line_start..line_start + leading_len, &encoded)?;
            edits += 1;
        }

        // An all-whitespace line ends at its own line end, so the edge never leaves the row.
        let mut edge = Edge {
            offset: line_start + encoded.chars().count(),
            col: visual_width(&encoded, 0, tab_size),
            declaration: false,
        };

        if !declarations.is_empty()
            && let Some(decl) = declarations.match_declaration(&buffer.line_text(row))
        {
            let gap = line_start + decl.gap.start..line_start + decl.gap.end;
            if buffer.substr(gap.clone()) != " " {
                buffer.replace(gap.clone(), " ")?;
                edits += 1;
            }
            let offset = gap.start + 1;
            edge = Edge {
                offset,
                col: visual_col(buffer, offset, tab_size),
                declaration: true,
            };
        }

        edges.push(edge);
    }

    let Some(target_col) = edges.iter().map(|edge| edge.col).max() else {
        return Ok(IndentResult {
            already_aligned: true,
            edits,
            ..IndentResult::default()
        });
    };

    let mut planner = EditPlanner::new();
    let mut max_length = 0usize;
    for edge in &edges {
        max_length = max_length.max(target_col - edge.col);
        planner.push(edge.padding(target_col, style, tab_size))?;
    }
    edits += planner.apply(buffer)?.len();

    tracing::debug!(
        rows = edges.len(),
        target_col,
        max_length,
        "aligned indentation"
    );

    Ok(IndentResult {
        rows: edges.len(),
        target_col,
        already_aligned: max_length == 0,
        edits,
    })
}
