//! Stable exit codes for drill commands.

/// Drill ran to completion (recoverable per-line errors included).
pub const OK: i32 = 0;
/// Invalid config or an unexpected internal failure.
pub const INVALID: i32 = 1;
/// An input file could not be opened.
pub const OPEN_FAILED: i32 = 2;
