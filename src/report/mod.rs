//! Report renderers for grouped license results.
//!
//! - [`terminal`] — colored summary box and group table; respects `--verbose` / `--quiet`.
//! - [`text`] — third-party notices document, one section per license group.
//! - [`json`] — pretty-printed `{ content, dependencies }` array.

pub mod json;
pub mod terminal;
pub mod text;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Write a rendered report to `output`, or to stdout when no file is given.
pub fn emit(body: &str, output: Option<&Path>, quiet: bool) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                eprintln!("Report written to: {}", path.display());
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
