//! I/O helpers for drill commands.

pub mod config;
pub mod input;
pub mod scanner;
