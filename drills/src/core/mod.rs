//! Deterministic, pure logic shared by the drills.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod numbers;
pub mod record;
