//! Line processor drill: stream a large text file one line at a time.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::io::input::open_input;
use crate::io::scanner::LineScanner;

/// Summary of a line pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinesOutcome {
    pub lines: u64,
    /// Error that ended the scan early, rendered with its context chain.
    pub scan_error: Option<String>,
}

/// Apply [`process`] to each line of `reader`, in order.
///
/// A scan error stops the loop where it happened and is returned in the
/// outcome, not as `Err`; only output failures are fatal here.
pub fn process_lines<R: BufRead, W: Write>(
    reader: R,
    max_line_bytes: usize,
    out: &mut W,
) -> Result<LinesOutcome> {
    let mut scanner = LineScanner::new(reader, max_line_bytes);
    for line in scanner.by_ref() {
        process(&line, out)?;
    }
    Ok(LinesOutcome {
        lines: scanner.line_count(),
        scan_error: scanner.into_error().map(|err| format!("{err:#}")),
    })
}

fn process<W: Write>(line: &str, out: &mut W) -> Result<()> {
    writeln!(out, "Processing: {line}").context("write output")
}

/// Run the line drill against `path`.
///
/// Fails if the file cannot be opened. A scan error is printed once after the
/// loop as `Error reading file: ...` and does not fail the drill.
#[instrument(skip_all, fields(path = %path.display(), max_line_bytes))]
pub fn run_lines<W: Write>(path: &Path, max_line_bytes: usize, out: &mut W) -> Result<LinesOutcome> {
    let reader = open_input(path)?;
    let outcome = process_lines(reader, max_line_bytes, out)?;
    if let Some(err) = &outcome.scan_error {
        writeln!(out, "Error reading file: {err}").context("write output")?;
    }
    info!(lines = outcome.lines, "lines drill finished");
    Ok(outcome)
}
