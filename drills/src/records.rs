//! Record reader drill: decode a JSON-lines file one record per line.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::core::record::{Record, decode_line};
use crate::io::input::open_input;
use crate::io::scanner::LineScanner;

/// One decoded line, or the reason it was skipped.
#[derive(Debug)]
pub enum RecordEvent {
    Decoded(Record),
    Failed {
        line: u64,
        error: serde_json::Error,
    },
}

/// Summary of a decode pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordsOutcome {
    pub ok: u64,
    pub failed: u64,
    /// Read error that cut the stream short, rendered with its context chain.
    pub scan_error: Option<String>,
}

/// Decode every non-blank line of `reader`, handing each result to `on_event`.
///
/// A line that fails to decode is reported and skipped; the next line is
/// still decoded. Records carry no line length limit.
pub fn decode_records<R, F>(reader: R, mut on_event: F) -> Result<RecordsOutcome>
where
    R: BufRead,
    F: FnMut(RecordEvent) -> Result<()>,
{
    let mut outcome = RecordsOutcome::default();
    let mut scanner = LineScanner::new(reader, usize::MAX);

    for (idx, line) in scanner.by_ref().enumerate() {
        let line_no = idx as u64 + 1;
        match decode_line(&line) {
            None => debug!(line = line_no, "blank line skipped"),
            Some(Ok(record)) => {
                outcome.ok += 1;
                on_event(RecordEvent::Decoded(record))?;
            }
            Some(Err(error)) => {
                outcome.failed += 1;
                warn!(line = line_no, err = %error, "record decode failed");
                on_event(RecordEvent::Failed {
                    line: line_no,
                    error,
                })?;
            }
        }
    }

    outcome.scan_error = scanner.into_error().map(|err| format!("{err:#}"));
    Ok(outcome)
}

/// Run the record drill against `path`, resolved under `cwd`.
///
/// Fails only if the file cannot be opened or stdout cannot be written.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn run_records<W: Write>(cwd: &Path, path: &Path, out: &mut W) -> Result<RecordsOutcome> {
    writeln!(out, "Looking for file in: {}", cwd.display()).context("write output")?;

    let reader = open_input(&cwd.join(path))?;
    let outcome = print_records(reader, out)?;
    info!(ok = outcome.ok, failed = outcome.failed, "records drill finished");
    Ok(outcome)
}

/// Decode `reader`, printing `Record: ...` per decoded line and
/// `Decode error: ...` per skipped line. A read failure is printed once, after
/// the records that preceded it.
pub fn print_records<R: BufRead, W: Write>(reader: R, out: &mut W) -> Result<RecordsOutcome> {
    let outcome = decode_records(reader, |event| {
        let written = match event {
            RecordEvent::Decoded(record) => writeln!(out, "Record: {record}"),
            RecordEvent::Failed { error, .. } => writeln!(out, "Decode error: {error}"),
        };
        written.context("write output")
    })?;

    if let Some(err) = &outcome.scan_error {
        writeln!(out, "Error reading file: {err}").context("write output")?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::input::is_open_error;
    use crate::test_support::{FailingReader, TestDir, output_lines};
    use std::io::{BufReader, Cursor};

    fn collect(input: &str) -> (Vec<Record>, Vec<u64>, RecordsOutcome) {
        let mut records = Vec::new();
        let mut failures = Vec::new();
        let outcome = decode_records(Cursor::new(input.as_bytes().to_vec()), |event| {
            match event {
                RecordEvent::Decoded(record) => records.push(record),
                RecordEvent::Failed { line, .. } => failures.push(line),
            }
            Ok(())
        })
        .expect("decode");
        (records, failures, outcome)
    }

    #[test]
    fn decodes_records_in_file_order() {
        let (records, failures, outcome) = collect(
            "{\"id\":1,\"name\":\"alice\"}\n{\"id\":2,\"name\":\"bob\"}\n{\"id\":3,\"name\":\"carol\"}\n",
        );
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[1].name, "bob");
        assert!(failures.is_empty());
        assert_eq!(
            outcome,
            RecordsOutcome {
                ok: 3,
                failed: 0,
                scan_error: None,
            }
        );
    }

    #[test]
    fn malformed_line_is_skipped_not_fatal() {
        let (records, failures, outcome) = collect(
            "{\"id\":1,\"name\":\"alice\"}\n{\"id\":oops}\n{\"id\":2,\"name\":\"bob\"}\n",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, 2);
        assert_eq!(failures, vec![2]);
        assert_eq!(outcome.ok, 2);
        assert_eq!(outcome.failed, 1);
    }

    #[test]
    fn blank_lines_are_not_failures() {
        let (records, failures, _) = collect("\n{\"id\":1,\"name\":\"a\"}\n\n   \n");
        assert_eq!(records.len(), 1);
        assert!(failures.is_empty());
    }

    #[test]
    fn run_prints_records_and_decode_errors() {
        let dir = TestDir::new().expect("tempdir");
        dir.write_file(
            "records.jsonl",
            "{\"id\":1,\"name\":\"alice\"}\nnot json\n{\"id\":2,\"name\":\"bob\"}\n",
        )
        .expect("write records");

        let mut out = Vec::new();
        let outcome =
            run_records(dir.path(), Path::new("records.jsonl"), &mut out).expect("run records");

        let lines = output_lines(&out);
        assert_eq!(
            lines[0],
            format!("Looking for file in: {}", dir.path().display())
        );
        assert_eq!(lines[1], "Record: {ID:1 Name:alice}");
        assert!(lines[2].starts_with("Decode error: "));
        assert_eq!(lines[3], "Record: {ID:2 Name:bob}");
        assert_eq!(lines.len(), 4);
        assert_eq!(outcome.ok, 2);
        assert_eq!(outcome.failed, 1);
    }

    #[test]
    fn run_missing_file_is_open_error() {
        let dir = TestDir::new().expect("tempdir");
        let mut out = Vec::new();
        let err = run_records(dir.path(), Path::new("records.jsonl"), &mut out)
            .expect_err("missing file");
        assert!(is_open_error(&err));
        assert_eq!(output_lines(&out).len(), 1);
    }

    #[test]
    fn read_error_mid_stream_is_printed_once() {
        let reader = BufReader::new(FailingReader::new(
            "{\"id\":1,\"name\":\"alice\"}\n{\"id\":2,\"name\":\"bob\"}\n{\"id\":3,",
        ));
        let mut out = Vec::new();
        let outcome = print_records(reader, &mut out).expect("print records");

        let lines = output_lines(&out);
        assert_eq!(lines[0], "Record: {ID:1 Name:alice}");
        assert_eq!(lines[1], "Record: {ID:2 Name:bob}");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("Error reading file: read line 3"));
        assert!(lines[2].contains("disk went away"));
        assert_eq!(
            lines
                .iter()
                .filter(|l| l.starts_with("Error reading file:"))
                .count(),
            1
        );
        assert_eq!(outcome.ok, 2);
        assert_eq!(outcome.failed, 0);
        assert!(outcome.scan_error.is_some());
    }
}
