//! Shared counter drill: worker threads increment one mutex-guarded value.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

/// Spawn `workers` threads that each add one to a shared counter.
///
/// Returns the final count once every worker has been joined. At least one
/// worker is required, matching `counter.workers` validation.
pub fn shared_counter(workers: usize) -> Result<u64> {
    if workers == 0 {
        bail!("counter.workers must be > 0");
    }
    let counter = Arc::new(Mutex::new(0u64));
    let mut handles = Vec::with_capacity(workers);

    for worker in 0..workers {
        let counter = Arc::clone(&counter);
        handles.push(thread::spawn(move || -> Result<()> {
            let mut count = counter
                .lock()
                .map_err(|_| anyhow!("counter lock poisoned"))?;
            *count += 1;
            debug!(worker, count = *count, "incremented");
            Ok(())
        }));
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow!("counter worker panicked"))??;
    }

    let total = *counter
        .lock()
        .map_err(|_| anyhow!("counter lock poisoned"))?;
    Ok(total)
}

/// Run the counter drill, printing `Final Counter = <n>`.
pub fn run_counter<W: Write>(workers: usize, out: &mut W) -> Result<u64> {
    let total = shared_counter(workers)?;
    writeln!(out, "Final Counter = {total}").context("write output")?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::output_lines;

    #[test]
    fn every_worker_increments_once() {
        assert_eq!(shared_counter(10).expect("counter"), 10);
        assert_eq!(shared_counter(1).expect("counter"), 1);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let err = shared_counter(0).expect_err("no workers");
        assert!(err.to_string().contains("counter.workers"));
    }

    #[test]
    fn run_prints_final_count() {
        let mut out = Vec::new();
        run_counter(4, &mut out).expect("counter");
        assert_eq!(output_lines(&out), vec!["Final Counter = 4"]);
    }
}
