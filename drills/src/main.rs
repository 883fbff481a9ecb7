//! Practice drills CLI.
//!
//! One subcommand per drill. Drill output goes to stdout; failures print the
//! error chain to stderr and exit with a code from [`drills::exit_codes`].

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drills::exit_codes;
use drills::io::config::{CONFIG_FILE, DrillsConfig, load_config};
use drills::io::input::OpenError;
use drills::{counter, handoff, lines, logging, pointers, records, stream_sum, utility};

#[derive(Parser)]
#[command(name = "drills", version, about = "Small self-contained practice drills")]
struct Cli {
    /// Config file; defaults to `drills.toml` in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a JSON-lines file and print each record.
    Records {
        /// Input file (default `records.jsonl`).
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Print every line of a large text file.
    Lines {
        /// Input file.
        #[arg(long)]
        path: Option<PathBuf>,
        /// Longest accepted line, in bytes.
        #[arg(long)]
        max_line_bytes: Option<usize>,
    },
    /// Receive one message from a spawned thread over a rendezvous channel.
    Handoff,
    /// Call `add` from the utility crate, then double a list in place.
    Utils,
    /// Increment a shared counter from several threads.
    Counter {
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Walk through Box, Rc, RefCell and Arc ownership.
    Pointers,
    /// Sum values streamed over a channel until a target is reached.
    StreamSum {
        #[arg(long)]
        count: Option<u64>,
        #[arg(long)]
        target: Option<u64>,
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => report(&err),
    };
    std::process::exit(code);
}

fn report(err: &anyhow::Error) -> i32 {
    if let Some(open) = err.downcast_ref::<OpenError>() {
        eprintln!("Error opening file: {open}");
        return exit_codes::OPEN_FAILED;
    }
    eprintln!("{:#}", err);
    exit_codes::INVALID
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let cfg = apply_overrides(load_cli_config(&cwd, cli.config.as_deref())?, &cli.command)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Records { .. } => {
            records::run_records(&cwd, &cfg.records.path, &mut out)?;
        }
        Command::Lines { .. } => {
            lines::run_lines(&cwd.join(&cfg.lines.path), cfg.lines.max_line_bytes, &mut out)?;
        }
        Command::Handoff => {
            handoff::run_handoff(&mut out)?;
        }
        Command::Utils => {
            utility::run_utility(&mut out)?;
        }
        Command::Counter { .. } => {
            counter::run_counter(cfg.counter.workers, &mut out)?;
        }
        Command::StreamSum { .. } => {
            stream_sum::run_stream_sum(&cfg.stream_sum, &mut out)?;
        }
        Command::Pointers => {
            pointers::run_pointers(&mut out)?;
        }
    }
    out.flush().context("flush output")?;
    Ok(())
}

fn load_cli_config(cwd: &Path, explicit: Option<&Path>) -> Result<DrillsConfig> {
    let path = match explicit {
        Some(path) => cwd.join(path),
        None => cwd.join(CONFIG_FILE),
    };
    load_config(&path).context("load drills config")
}

/// Layer subcommand flags over the loaded config, then validate the one
/// section the chosen drill reads.
fn apply_overrides(mut cfg: DrillsConfig, command: &Command) -> Result<DrillsConfig> {
    match command {
        Command::Records { path } => {
            if let Some(path) = path {
                cfg.records.path = path.clone();
            }
            cfg.records.validate()?;
        }
        Command::Lines {
            path,
            max_line_bytes,
        } => {
            if let Some(path) = path {
                cfg.lines.path = path.clone();
            }
            if let Some(max) = max_line_bytes {
                cfg.lines.max_line_bytes = *max;
            }
            cfg.lines.validate()?;
        }
        Command::Counter { workers } => {
            if let Some(workers) = workers {
                cfg.counter.workers = *workers;
            }
            cfg.counter.validate()?;
        }
        Command::StreamSum {
            count,
            target,
            delay_ms,
        } => {
            if let Some(count) = count {
                cfg.stream_sum.count = *count;
            }
            if let Some(target) = target {
                cfg.stream_sum.target = *target;
            }
            if let Some(delay_ms) = delay_ms {
                cfg.stream_sum.delay_ms = *delay_ms;
            }
            cfg.stream_sum.validate()?;
        }
        Command::Handoff | Command::Utils | Command::Pointers => {}
    }
    Ok(cfg)
}
