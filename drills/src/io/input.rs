//! Opening input files with a typed open failure.
//!
//! Open failures are the one error class `main` maps to its own exit code, so
//! they carry a concrete type that survives inside an `anyhow::Error` chain.

use std::error::Error as StdError;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

/// An input file could not be opened.
#[derive(Debug)]
pub struct OpenError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "open {}: {}", self.path.display(), self.source)
    }
}

impl StdError for OpenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

/// Open `path` for buffered reading.
///
/// The file handle is owned by the returned reader and closed when it drops.
pub fn open_input(path: &Path) -> Result<BufReader<File>, OpenError> {
    match File::open(path) {
        Ok(file) => {
            debug!(path = %path.display(), "opened input");
            Ok(BufReader::new(file))
        }
        Err(source) => Err(OpenError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Whether `err` (or anything in its chain) is an [`OpenError`].
pub fn is_open_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<OpenError>())
}
