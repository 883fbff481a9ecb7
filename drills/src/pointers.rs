//! Smart pointer drill: `Box`, `Rc`, `RefCell`, a moved `Vec`, and an `Arc`
//! shared read-only across threads.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::core::numbers::format_list;

/// Singly linked list; the recursive variant needs a `Box` to have a size.
#[derive(Debug)]
pub enum List {
    Cons(i64, Box<List>),
    Nil,
}

impl List {
    pub fn from_slice(values: &[i64]) -> Self {
        values
            .iter()
            .rev()
            .fold(List::Nil, |tail, value| List::Cons(*value, Box::new(tail)))
    }

    pub fn sum(&self) -> i64 {
        let mut total = 0i64;
        let mut node = self;
        while let List::Cons(value, next) = node {
            total = total.wrapping_add(*value);
            node = &**next;
        }
        total
    }
}

/// What the pointer drill observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointersOutcome {
    pub boxed: i64,
    pub list_sum: i64,
    /// Strong counts before and after one `Rc::clone`.
    pub rc_counts: (usize, usize),
    pub cell: i64,
    pub moved: String,
    pub shared: Vec<String>,
}

/// Move `values` into a spawned thread and return what it reports.
pub fn moved_into_thread(values: Vec<i64>) -> Result<String> {
    let handle = thread::spawn(move || format!("From thread: {}", format_list(&values)));
    handle
        .join()
        .map_err(|_| anyhow!("move thread panicked"))
}

/// Let `readers` threads read the same `Arc` buffer; reports come back in
/// spawn order.
pub fn shared_read(data: Arc<Vec<i64>>, readers: usize) -> Result<Vec<String>> {
    let handles: Vec<_> = (0..readers)
        .map(|reader| {
            let data = Arc::clone(&data);
            thread::spawn(move || format!("Thread {reader} sees {}", format_list(&data)))
        })
        .collect();
    debug!(strong = Arc::strong_count(&data), "readers spawned");

    handles
        .into_iter()
        .map(|handle| handle.join().map_err(|_| anyhow!("reader thread panicked")))
        .collect()
}

/// Run the pointer drill, one line per observation.
pub fn run_pointers<W: Write>(out: &mut W) -> Result<PointersOutcome> {
    let boxed = Box::new(10i64);
    writeln!(out, "Box value = {}", *boxed).context("write output")?;

    let list = List::from_slice(&[1, 2]);
    let list_sum = list.sum();
    writeln!(out, "List sum = {list_sum}").context("write output")?;

    let rc = Rc::new(5i64);
    let before = Rc::strong_count(&rc);
    writeln!(out, "RC count = {before}").context("write output")?;
    let rc2 = Rc::clone(&rc);
    let after = Rc::strong_count(&rc);
    writeln!(out, "RC count = {after}").context("write output")?;
    drop(rc2);

    let cell = RefCell::new(100i64);
    {
        let mut value = cell.borrow_mut();
        *value += 1;
    }
    let cell = cell.into_inner();
    writeln!(out, "RefCell value = {cell}").context("write output")?;

    let moved = moved_into_thread(vec![10, 20, 30])?;
    writeln!(out, "{moved}").context("write output")?;

    let shared = shared_read(Arc::new(vec![1, 2, 3]), 3)?;
    for line in &shared {
        writeln!(out, "{line}").context("write output")?;
    }

    Ok(PointersOutcome {
        boxed: *boxed,
        list_sum,
        rc_counts: (before, after),
        cell,
        moved,
        shared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::output_lines;

    #[test]
    fn list_sums_every_node() {
        assert_eq!(List::from_slice(&[1, 2, 3]).sum(), 6);
        assert_eq!(List::Nil.sum(), 0);
    }

    #[test]
    fn shared_reads_keep_spawn_order() {
        let data = Arc::new(vec![4, 5]);
        let seen = shared_read(Arc::clone(&data), 2).expect("shared read");
        assert_eq!(seen, vec!["Thread 0 sees [4 5]", "Thread 1 sees [4 5]"]);
        assert_eq!(Arc::strong_count(&data), 1);
    }

    #[test]
    fn run_reports_each_pointer() {
        let mut out = Vec::new();
        let outcome = run_pointers(&mut out).expect("pointers");
        assert_eq!(outcome.rc_counts, (1, 2));
        assert_eq!(outcome.cell, 101);
        assert_eq!(
            output_lines(&out),
            vec![
                "Box value = 10",
                "List sum = 3",
                "RC count = 1",
                "RC count = 2",
                "RefCell value = 101",
                "From thread: [10 20 30]",
                "Thread 0 sees [1 2 3]",
                "Thread 1 sees [1 2 3]",
                "Thread 2 sees [1 2 3]",
            ]
        );
    }
}
