//! `align`: command-line front end for `align-core`.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Error (unreadable input, bad settings, invalid pattern) |
//! | 2 | Invalid command-line arguments |
//! | 3 | `--check`: some input would change |

mod cli;

use align_core::{AlignConfig, AlignmentCommand, LineEnding, RopeBuffer, Selection, TextBuffer};
use anyhow::{Context, Result};
use clap::Parser;
use cli::{CliArgs, LineRange};
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod exit_codes {
    pub const ERROR: u8 = 1;
    pub const WOULD_CHANGE: u8 = 3;
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn load_config(args: &CliArgs) -> Result<AlignConfig> {
    let mut layers = Vec::with_capacity(2);
    if let Some(path) = &args.settings {
        let layer = AlignConfig::load_layer(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        layers.push(layer);
    }
    layers.push(args.settings_layer());
    AlignConfig::from_layers(&layers).context("invalid settings")
}

/// Align one document and return the new text, in the line ending it came with.
fn align_text(text: &str, command: &AlignmentCommand, lines: Option<LineRange>) -> Result<String> {
    let ending = LineEnding::detect_in_text(text);
    let mut buffer = RopeBuffer::from_text(&LineEnding::normalize(text));

    let selection = match lines {
        Some(range) => {
            let start = buffer.text_point(range.start - 1, 0);
            let end = buffer.text_point(range.end - 1, usize::MAX);
            Selection::new(start, end)
        }
        None => Selection::caret(0),
    };

    let outcome = command
        .run(&mut buffer, &[selection])
        .context("alignment failed")?;
    tracing::debug!(
        mode = ?outcome.mode,
        blocks = outcome.blocks,
        edits = outcome.edits,
        "aligned document"
    );

    Ok(ending.apply_to_text(&buffer.text()))
}

/// Returns `true` if any input changed (or would change).
fn run(args: &CliArgs) -> Result<bool> {
    let config = load_config(args)?;
    let command = AlignmentCommand::new(&config).context("invalid alignment settings")?;
    let mut changed = false;

    if args.paths.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        let output = align_text(&input, &command, args.lines)?;
        changed = output != input;
        if !args.check {
            io::stdout()
                .write_all(output.as_bytes())
                .context("failed to write stdout")?;
        }
        return Ok(changed);
    }

    let mut stdout = io::stdout().lock();
    for path in &args.paths {
        let input = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let output = align_text(&input, &command, args.lines)
            .with_context(|| format!("failed to align {}", path.display()))?;
        let file_changed = output != input;
        changed |= file_changed;

        if args.check {
            if file_changed {
                tracing::info!(path = %path.display(), "would change");
                eprintln!("would align {}", path.display());
            }
        } else if args.write {
            if file_changed {
                fs::write(path, &output)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        } else {
            stdout
                .write_all(output.as_bytes())
                .context("failed to write stdout")?;
        }
    }

    Ok(changed)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) if args.check => ExitCode::from(exit_codes::WOULD_CHANGE),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_codes::ERROR)
        }
    }
}
