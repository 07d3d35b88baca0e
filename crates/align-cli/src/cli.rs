//! Command-line argument parsing
//!
//! Flags are turned into one more settings layer on top of the defaults and the optional
//! `--settings` file, so the command line always wins.

use align_core::AlignmentFormat;
use clap::{Parser, ValueEnum};
use serde_json::{Map, Value, json};
use std::path::PathBuf;

/// Align indentation and separator characters across blocks of lines
#[derive(Parser, Debug)]
#[command(name = "align", version, about = "Align indentation and separators across lines")]
pub struct CliArgs {
    /// Files to align (reads stdin when omitted)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// JSON settings file, layered over the defaults
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Width of a tab stop
    #[arg(long, value_name = "N")]
    pub tab_size: Option<usize>,

    /// Indent with spaces instead of tabs
    #[arg(long)]
    pub spaces: bool,

    /// Where the alignment gap goes
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Separator characters, highest priority first (e.g. "=:")
    #[arg(long, value_name = "CHARS")]
    pub chars: Option<String>,

    /// Align only lines START..=END (1-based) as one selection
    #[arg(long, value_name = "START:END", value_parser = parse_line_range)]
    pub lines: Option<LineRange>,

    /// Rewrite files in place instead of printing
    #[arg(short, long, conflicts_with = "check")]
    pub write: bool,

    /// Write nothing; exit with status 3 if any input would change
    #[arg(long)]
    pub check: bool,

    /// Log alignment decisions to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// `--format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// `key   = value`
    KeyVarspaceSeparatorValue,
    /// `key =   value`
    KeySeparatorVarspaceValue,
    /// `   key = value`
    VarspaceKeySeparatorValue,
}

impl From<FormatArg> for AlignmentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::KeyVarspaceSeparatorValue => Self::KeyVarspaceSeparatorValue,
            FormatArg::KeySeparatorVarspaceValue => Self::KeySeparatorVarspaceValue,
            FormatArg::VarspaceKeySeparatorValue => Self::VarspaceKeySeparatorValue,
        }
    }
}

/// A 1-based inclusive line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    /// First line (1-based).
    pub start: usize,
    /// Last line (1-based, inclusive).
    pub end: usize,
}

/// Parse `START:END`.
pub fn parse_line_range(s: &str) -> Result<LineRange, String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{s}'"))?;
    let start: usize = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid start line '{start}'"))?;
    let end: usize = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid end line '{end}'"))?;

    if start == 0 {
        return Err("line numbers start at 1".to_string());
    }
    if end < start {
        return Err(format!("end line {end} is before start line {start}"));
    }
    Ok(LineRange { start, end })
}

impl CliArgs {
    /// Settings layer holding only the options given on the command line.
    pub fn settings_layer(&self) -> Value {
        let mut layer = Map::new();
        if let Some(tab_size) = self.tab_size {
            layer.insert("tab_size".into(), json!(tab_size));
        }
        if self.spaces {
            layer.insert("translate_tabs_to_spaces".into(), json!(true));
        }
        if let Some(format) = self.format {
            layer.insert(
                "alignment_format".into(),
                json!(AlignmentFormat::from(format).as_str()),
            );
        }
        if let Some(chars) = &self.chars {
            let chars: Vec<String> = chars.chars().map(String::from).collect();
            layer.insert("alignment_chars".into(), json!(chars));
        }
        // Without a range the whole file is aligned block by block.
        layer.insert("whole_file_one_line".into(), json!(self.lines.is_none()));
        Value::Object(layer)
    }
}
