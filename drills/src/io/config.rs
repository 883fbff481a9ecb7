//! Drill configuration stored in `drills.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::io::scanner::DEFAULT_MAX_LINE_BYTES;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "drills.toml";

/// Drill configuration (TOML).
///
/// Every field is optional in the file; missing fields fall back to the
/// defaults the drills were written against. CLI flags override these values.
/// Sections are validated separately, by the drill that reads them, so a bad
/// `[counter]` section never blocks `drills records`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DrillsConfig {
    pub records: RecordsConfig,
    pub lines: LinesConfig,
    pub counter: CounterConfig,
    pub stream_sum: StreamSumConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecordsConfig {
    /// JSON-lines input; relative paths resolve against the working directory.
    pub path: PathBuf,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("records.jsonl"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinesConfig {
    /// Plain-text input for the line drill.
    pub path: PathBuf,

    /// A longer line ends the scan with an error.
    pub max_line_bytes: usize,
}

impl Default for LinesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/data/Rust_Chemistry/GO_PRATICE/bigdata.txt"),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CounterConfig {
    /// Threads incrementing the shared counter, once each.
    pub workers: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { workers: 10 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StreamSumConfig {
    /// Producer sends `1..=count`.
    pub count: u64,
    /// Consumer stops once the running sum reaches this.
    pub target: u64,
    /// Pause after each send, in milliseconds.
    pub delay_ms: u64,
}

impl Default for StreamSumConfig {
    fn default() -> Self {
        Self {
            count: 5,
            target: 15,
            delay_ms: 100,
        }
    }
}

impl RecordsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(anyhow!("records.path must not be empty"));
        }
        Ok(())
    }
}

impl LinesConfig {
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(anyhow!("lines.path must not be empty"));
        }
        if self.max_line_bytes == 0 {
            return Err(anyhow!("lines.max_line_bytes must be > 0"));
        }
        Ok(())
    }
}

impl CounterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(anyhow!("counter.workers must be > 0"));
        }
        Ok(())
    }
}

impl StreamSumConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(anyhow!("stream_sum.count must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DrillsConfig::default()`. Only the TOML
/// shape is checked here; see the per-section `validate` methods.
pub fn load_config(path: &Path) -> Result<DrillsConfig> {
    if !path.exists() {
        return Ok(DrillsConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}
