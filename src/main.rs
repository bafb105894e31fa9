// SPDX-License-Identifier: MIT
//
// n-keys — prints what the terminal sends, one decoded event per line.
//
//   stdin → reader thread → driver → n-input decoder → viewer → stdout
//
// The terminal mode is left alone: run `stty raw -echo; n-keys; stty sane`
// to see every key as it is pressed, or pipe bytes in. Ctrl-C (seen as a
// special event in raw mode) or EOF ends the session.

mod driver;
mod error;
mod reader;
mod viewer;

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use n_input::DecoderConfig;

use crate::driver::{Driver, DriverConfig};
use crate::error::Result;
use crate::viewer::Viewer;

/// Decode terminal input and print one event per line.
#[derive(Debug, Parser)]
#[command(name = "n-keys", version, about)]
struct Args {
    /// Idle time (ms) after which incomplete input is flushed.
    #[arg(long, value_name = "MS", default_value_t = 50)]
    timeout: u64,

    /// How often (ms) idle time is reported to the decoder.
    #[arg(long, value_name = "MS", default_value_t = 10)]
    tick: u64,

    /// Print only the escaped bytes of each event.
    #[arg(long)]
    raw: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    log::debug!("starting with {args:?}");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("n-keys: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let decoder = DecoderConfig::default().with_flush_threshold(Duration::from_millis(args.timeout))?;
    let driver = DriverConfig {
        tick: Duration::from_millis(args.tick.max(1)),
    };

    let mut viewer = Viewer::new(io::stdout().lock(), args.raw, stdout_is_tty());
    Driver::new(decoder, driver).run(&mut viewer)
}

/// Check whether stdout is connected to a terminal (TTY).
#[cfg(unix)]
#[allow(unsafe_code)]
fn stdout_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
const fn stdout_is_tty() -> bool {
    false
}

// ─── Tests ───────────────────────────────────────────────────────────────────
