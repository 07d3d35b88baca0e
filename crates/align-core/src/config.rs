//! Alignment settings.
//!
//! Settings arrive as Sublime-style JSON objects keyed by option name. Several objects can
//! be layered (plugin defaults, user settings, per-document settings); later layers win.
//! Every option is optional and falls back to the default documented on its field.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::whitespace::IndentStyle;

#[derive(Debug, Error)]
/// Errors produced while loading settings.
pub enum ConfigError {
    #[error("failed to read settings file at {path}: {source}")]
    /// The settings file could not be read.
    Read {
        /// Settings file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    #[error("failed to parse settings file at {path}: {source}")]
    /// The settings file is not valid JSON.
    Parse {
        /// Settings file path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    /// A setting has the wrong type.
    Invalid(#[from] serde_json::Error),
}

/// Where the variable-width gap goes when a separator is aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentFormat {
    /// `key   = value`: the gap goes between key and separator.
    #[default]
    KeyVarspaceSeparatorValue,
    /// `key =   value`: values line up; the gap goes between the separator and the value.
    KeySeparatorVarspaceValue,
    /// `   key = value`: the gap goes before the key.
    VarspaceKeySeparatorValue,
}

impl AlignmentFormat {
    /// The setting value naming this format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeyVarspaceSeparatorValue => "key-varspace-separator-value",
            Self::KeySeparatorVarspaceValue => "key-separator-varspace-value",
            Self::VarspaceKeySeparatorValue => "varspace-key-separator-value",
        }
    }
}

impl fmt::Display for AlignmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `alignment_format` value that names no known format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown alignment format '{0}'")]
pub struct UnknownFormat(pub String);

impl FromStr for AlignmentFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "key-varspace-separator-value" => Ok(Self::KeyVarspaceSeparatorValue),
            "key-separator-varspace-value" => Ok(Self::KeySeparatorVarspaceValue),
            "varspace-key-separator-value" => Ok(Self::VarspaceKeySeparatorValue),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for AlignmentFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value.as_str().map(str::parse::<Self>) {
            Some(Ok(format)) => Ok(format),
            _ => {
                tracing::warn!(
                    value = %value,
                    fallback = %Self::default(),
                    "unrecognized alignment_format, using default"
                );
                Ok(Self::default())
            }
        }
    }
}

fn default_prefix_chars() -> Vec<char> {
    vec!['+', '-', '&', '|', '<', '>', '!', '~', '%', '/', '*', '.']
}

/// Settings read by the alignment command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Visual width of a tab stop. Default `8`.
    pub tab_size: usize,
    /// Indent with spaces instead of tabs. Default `false`.
    pub translate_tabs_to_spaces: bool,
    /// Skip blank lines during indentation alignment. Default `false`.
    pub trim_trailing_white_space_on_save: bool,
    /// Run indentation alignment before separator alignment. Default `true`.
    pub align_indent: bool,
    /// Regex patterns for declaration keywords (e.g. `"var"`, `"let"`). Default empty.
    pub declarations: Vec<String>,
    /// Separator characters, in priority order. Default `["="]`.
    pub alignment_chars: Vec<char>,
    /// Characters that form a unit with a following separator (`+` in `+=`).
    pub alignment_prefix_chars: Vec<char>,
    /// Separators that keep one space between the key and themselves. Default `["="]`.
    pub alignment_space_chars: Vec<char>,
    /// Separators followed by exactly one space (two after a prefix). Default empty.
    pub space_after_chars: Vec<char>,
    /// Where the alignment gap goes.
    pub alignment_format: AlignmentFormat,
    /// Re-encode mid-line alignment gaps with tabs when indenting with tabs. Default `false`.
    pub mid_line_tabs: bool,
    /// A single-line, single-cursor invocation aligns the whole buffer. Default `false`.
    pub whole_file_one_line: bool,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            tab_size: 8,
            translate_tabs_to_spaces: false,
            trim_trailing_white_space_on_save: false,
            align_indent: true,
            declarations: Vec::new(),
            alignment_chars: vec!['='],
            alignment_prefix_chars: default_prefix_chars(),
            alignment_space_chars: vec!['='],
            space_after_chars: Vec::new(),
            alignment_format: AlignmentFormat::default(),
            mid_line_tabs: false,
            whole_file_one_line: false,
        }
    }
}

impl AlignConfig {
    /// Parse a single JSON settings object.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_layers(&[value])
    }

    /// Merge JSON settings objects in order (later keys win) and deserialize the result.
    ///
    /// Layers that are not JSON objects are ignored.
    pub fn from_layers(layers: &[Value]) -> Result<Self, ConfigError> {
        let mut merged = Map::new();
        for layer in layers {
            match layer {
                Value::Object(map) => {
                    merged.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                Value::Null => {}
                other => tracing::warn!(layer = %other, "ignoring non-object settings layer"),
            }
        }
        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    /// Read a JSON settings object from a file.
    pub fn load_layer<P: AsRef<Path>>(path: P) -> Result<Value, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from a single file, layered over the defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let layer = Self::load_layer(path)?;
        Self::from_layers(&[layer])
    }

    /// Indentation character selected by `translate_tabs_to_spaces`.
    pub fn indent_style(&self) -> IndentStyle {
        IndentStyle::from_translate_tabs(self.translate_tabs_to_spaces)
    }

    /// Tab size used for visual columns, never zero.
    pub fn effective_tab_size(&self) -> usize {
        self.tab_size.max(1)
    }

    /// Whether mid-line gaps are re-encoded with tabs.
    pub fn mid_line_tabs_active(&self) -> bool {
        self.mid_line_tabs && !self.translate_tabs_to_spaces
    }
}
