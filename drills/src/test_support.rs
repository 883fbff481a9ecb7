//! Test-only helpers for staging input files and reading captured output.

use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Temporary working directory for a drill run.
pub struct TestDir {
    temp: TempDir,
}

impl TestDir {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write `contents` to `name` under the directory, returning the full path.
    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.temp.path().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Write one JSON object per line for `(id, name)` pairs.
    pub fn write_records(&self, name: &str, records: &[(i64, &str)]) -> Result<PathBuf> {
        let mut buf = String::new();
        for (id, record_name) in records {
            let line = serde_json::json!({ "id": id, "name": record_name });
            buf.push_str(&line.to_string());
            buf.push('\n');
        }
        self.write_file(name, &buf)
    }
}

/// Split captured output into lines.
pub fn output_lines(out: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(out)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Reader that serves `data`, then fails every read once it is drained.
pub struct FailingReader {
    data: Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn new(data: &str) -> Self {
        Self {
            data: Cursor::new(data.as_bytes().to_vec()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(out)?;
        if n == 0 {
            return Err(io::Error::other("disk went away"));
        }
        Ok(n)
    }
}
