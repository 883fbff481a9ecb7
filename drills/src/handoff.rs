//! Channel handoff drill: one value passed across a rendezvous channel.

use std::io::Write;
use std::sync::mpsc::{self, SyncSender};
use std::thread;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, warn};

/// The value the producer sends.
pub const GREETING: &str = "Hello from goroutine";

/// Receive exactly one value from a producer running on its own thread.
///
/// The channel has zero capacity, so the producer's `send` blocks until this
/// thread takes the value. There is no timeout. If the producer drops its
/// sender without sending, the receive fails instead of hanging.
pub fn rendezvous<T, F>(producer: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(SyncSender<T>) + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel::<T>(0);
    let handle = thread::spawn(move || producer(tx));

    let received = rx.recv();
    handle
        .join()
        .map_err(|_| anyhow!("producer thread panicked"))?;
    received.context("producer hung up before sending")
}

fn send_message(tx: SyncSender<String>, message: String) {
    debug!("producer waiting for receiver");
    if tx.send(message).is_err() {
        warn!("receiver dropped before handoff");
    }
}

/// Hand `message` from a spawned thread to the caller.
pub fn handoff(message: &str) -> Result<String> {
    let message = message.to_string();
    rendezvous(move |tx| send_message(tx, message))
}

/// Run the handoff drill, printing `Received: <message>`.
pub fn run_handoff<W: Write>(out: &mut W) -> Result<String> {
    let received = handoff(GREETING)?;
    writeln!(out, "Received: {received}").context("write output")?;
    Ok(received)
}
