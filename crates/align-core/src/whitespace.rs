//! Whitespace encoding policy.
//!
//! Pure helpers that decide *which* whitespace characters represent a run; the planner and
//! the aligners decide *where* runs go.

use crate::column::visual_width;

/// Preferred indentation character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    /// Indent with spaces (`translate_tabs_to_spaces = true`).
    Spaces,
    /// Indent with tabs.
    Tabs,
}

impl IndentStyle {
    /// Style selected by the `translate_tabs_to_spaces` setting.
    pub fn from_translate_tabs(translate_tabs_to_spaces: bool) -> Self {
        if translate_tabs_to_spaces {
            Self::Spaces
        } else {
            Self::Tabs
        }
    }
}

/// Returns `true` for the characters the engine treats as horizontal whitespace.
pub fn is_space_or_tab(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// The leading run of spaces/tabs of `line`.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|&(_, ch)| !is_space_or_tab(ch))
        .map(|(idx, _)| idx)
        .unwrap_or(line.len());
    &line[..end]
}

/// Returns `true` if `line` holds nothing but spaces and tabs.
pub fn is_blank(line: &str) -> bool {
    line.chars().all(is_space_or_tab)
}

/// Re-encode a run of spaces/tabs that starts at visual column `start_col`.
///
/// The visual width of the run is preserved. With [`IndentStyle::Tabs`], a run that does
/// not start on a tab stop keeps spaces up to the next stop, then every full `tab_size`
/// span becomes a tab, and any remainder stays as spaces.
pub fn convert_run(run: &str, style: IndentStyle, tab_size: usize, start_col: usize) -> String {
    let tab_size = tab_size.max(1);
    let end_col = visual_width(run, start_col, tab_size);

    match style {
        IndentStyle::Spaces => " ".repeat(end_col - start_col),
        IndentStyle::Tabs => {
            let mut out = String::with_capacity(run.len());
            let mut x = start_col;

            if x % tab_size != 0 {
                let next_stop = (x / tab_size + 1) * tab_size;
                if next_stop > end_col {
                    out.push_str(&" ".repeat(end_col - x));
                    return out;
                }
                out.push_str(&" ".repeat(next_stop - x));
                x = next_stop;
            }

            while x + tab_size <= end_col {
                out.push('\t');
                x += tab_size;
            }
            out.push_str(&" ".repeat(end_col - x));
            out
        }
    }
}
