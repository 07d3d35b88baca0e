#![warn(missing_docs)]
//! Align Core - Headless Text Alignment Engine
//!
//! # Overview
//!
//! `align-core` lines up text across consecutive lines: the left edge of every line in a
//! block, the first separator character (`=`, `:`, ...) of every line, or the carets of a
//! multi-cursor selection. It does not own an editor; the host hands it a [`TextBuffer`]
//! and the current selections, and the engine mutates the buffer in place.
//!
//! # Core Features
//!
//! - **Visual columns**: tab stops and wide characters are measured the way they render
//! - **Single-pass edits**: a running adjustment keeps pre-measured offsets valid while a
//!   pass mutates the buffer
//! - **Indentation alignment**: re-encodes leading whitespace and pads to the deepest edge,
//!   with optional declaration keywords (`var`, `let`, ...)
//! - **Separator alignment**: prefix units (`+=`), three gap placements, space-after
//!   normalization and optional tab re-encoding of mid-line gaps
//! - **Whole-buffer mode**: blocks of equal indentation are discovered and aligned one by one
//!
//! # Quick Start
//!
//! ```rust
//! use align_core::{AlignConfig, AlignMode, RopeBuffer, Selection, align};
//!
//! let mut buffer = RopeBuffer::from_text("x = 1\nlonger += 2\n");
//! let config = AlignConfig::default();
//!
//! let outcome = align(&mut buffer, &[Selection::new(0, 17)], &config).unwrap();
//!
//! assert_eq!(outcome.mode, AlignMode::Selection);
//! assert_eq!(buffer.text(), "x      = 1\nlonger += 2\n");
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - Buffer abstraction and the rope-backed implementation
//! - [`column`] - Visual column arithmetic
//! - [`whitespace`] - Whitespace runs and tab/space re-encoding
//! - [`segment`] - Block discovery for whole-buffer alignment
//! - [`planner`] - Edit planning with a running adjustment
//! - [`indent`] - Indentation alignment
//! - [`separator`] - Separator alignment
//! - [`multi_cursor`] - Caret alignment by ordinal group
//! - [`command`] - Selection dispatch
//! - [`config`] - Settings and layering
//! - [`line_ending`] - Line ending detection and restoration

pub mod buffer;
pub mod column;
pub mod command;
pub mod config;
pub mod error;
pub mod indent;
pub mod line_ending;
pub mod multi_cursor;
pub mod planner;
pub mod segment;
pub mod separator;
pub mod whitespace;

pub use buffer::{RopeBuffer, TextBuffer};
pub use column::{char_width, visual_col, visual_width};
pub use command::{AlignMode, AlignOutcome, AlignmentCommand, Selection, align};
pub use config::{AlignConfig, AlignmentFormat, ConfigError, UnknownFormat};
pub use error::AlignError;
pub use indent::{DeclarationMatch, Declarations, IndentResult, align_indentation};
pub use line_ending::LineEnding;
pub use multi_cursor::{MultiCursorResult, align_cursors};
pub use planner::{AppliedEdit, EditPlanner, EditPoint, Fill};
pub use segment::{Block, BlockSegmenter, segment_blocks};
pub use separator::{SeparatorResult, Separators, align_separators, unit_visual_col};
pub use whitespace::{IndentStyle, convert_run};
