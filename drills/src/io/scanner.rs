//! Forward-only line scanner with a bounded line length.

use std::io::{BufRead, Read};

use anyhow::{Context, Error, anyhow};
use tracing::warn;

/// Default upper bound for a single line, in bytes.
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

/// Lazily yields the lines of a reader, one per `next()` call.
///
/// Trailing `\n` and `\r\n` are stripped and invalid UTF-8 is replaced
/// lossily. A read failure, or a line longer than `max_line_bytes` (trailing
/// `\r` included), ends the sequence; the failure is kept for [`LineScanner::error`]
/// rather than surfacing mid-iteration. Once finished, the scanner yields
/// nothing further.
pub struct LineScanner<R> {
    reader: R,
    max_line_bytes: usize,
    line_no: u64,
    error: Option<Error>,
    finished: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            reader,
            max_line_bytes,
            line_no: 0,
            error: None,
            finished: false,
        }
    }

    /// Number of lines yielded so far.
    pub fn line_count(&self) -> u64 {
        self.line_no
    }

    /// The error that ended the scan, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Consume the scanner, returning the error that ended the scan.
    pub fn into_error(self) -> Option<Error> {
        self.error
    }

    fn fail(&mut self, err: Error) -> Option<String> {
        warn!(line = self.line_no + 1, err = %err, "scan stopped");
        self.error = Some(err);
        self.finished = true;
        None
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        let mut buf = Vec::new();
        let limit = (self.max_line_bytes as u64).saturating_add(1);
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("read line {}", self.line_no + 1));
        let n = match read {
            Ok(n) => n,
            Err(err) => return self.fail(err),
        };
        if n == 0 {
            self.finished = true;
            return None;
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        } else if buf.len() > self.max_line_bytes {
            let err = anyhow!(
                "line {} exceeds {} bytes",
                self.line_no + 1,
                self.max_line_bytes
            );
            return self.fail(err);
        } else if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        self.line_no += 1;
        Some(String::from_utf8_lossy(&buf).into_owned())
    }
}
