//! Small, self-contained practice drills behind a single CLI.
//!
//! Each drill is independent; none of them share state or feed one another:
//!
//! - [`records`]: decode a JSON-lines file, skipping lines that fail to decode.
//! - [`lines`]: stream a large text file line by line.
//! - [`handoff`]: pass one value across a zero-capacity channel.
//! - [`utility`]: call into the `drill-utils` crate and double a list in place.
//! - [`counter`] and [`stream_sum`]: mutex and channel coordination between threads.
//! - [`pointers`]: `Box`, `Rc`, `RefCell` and a read-only `Arc` shared by threads.
//!
//! Pure logic lives in [`core`]; file access and configuration in [`io`].

pub mod core;
pub mod counter;
pub mod exit_codes;
pub mod handoff;
pub mod io;
pub mod lines;
pub mod logging;
pub mod pointers;
pub mod records;
pub mod stream_sum;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod utility;
