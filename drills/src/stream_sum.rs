//! Stream sum drill: a consumer totals values until it reaches a target.

use std::io::Write;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::io::config::StreamSumConfig;

/// Result of one stream-sum run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSumOutcome {
    pub sum: u64,
    pub received: u64,
}

/// Produce `1..=count` on a thread and total them on the caller's thread.
///
/// `on_sum` sees the running total after each value. The consumer stops once
/// the total reaches `target` or the producer finishes, whichever is first;
/// the producer notices the closed channel on its next send and exits.
pub fn stream_sum<F>(cfg: &StreamSumConfig, mut on_sum: F) -> Result<StreamSumOutcome>
where
    F: FnMut(u64) -> Result<()>,
{
    let (tx, rx) = mpsc::channel::<u64>();
    let count = cfg.count;
    let delay = Duration::from_millis(cfg.delay_ms);

    let producer = thread::spawn(move || {
        for value in 1..=count {
            if tx.send(value).is_err() {
                debug!(value, "consumer gone, producer stopping");
                break;
            }
            thread::sleep(delay);
        }
    });

    let mut outcome = StreamSumOutcome { sum: 0, received: 0 };
    for value in &rx {
        outcome.sum += value;
        outcome.received += 1;
        on_sum(outcome.sum)?;
        if outcome.sum >= cfg.target {
            break;
        }
    }
    drop(rx);

    producer
        .join()
        .map_err(|_| anyhow!("producer thread panicked"))?;
    Ok(outcome)
}

/// Run the stream-sum drill, printing each running total and the final sum.
pub fn run_stream_sum<W: Write>(cfg: &StreamSumConfig, out: &mut W) -> Result<StreamSumOutcome> {
    let outcome = stream_sum(cfg, |sum| {
        writeln!(out, "Sum now = {sum}").context("write output")
    })?;
    writeln!(out, "Channel Final Sum = {}", outcome.sum).context("write output")?;
    Ok(outcome)
}
