// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Background stdin reader.
//
// `read()` on stdin blocks, but the driver has to keep reporting idle
// time to the decoder while nothing arrives: that's how a lone ESC gets
// resolved. So reading happens on its own thread, and chunks travel over
// a channel that the driver waits on with a timeout.
//
// On unix the thread polls stdin with a short timeout and checks a stop
// flag between polls, so `stop()` never waits on a blocked `read()`.
// The channel closes when stdin reaches EOF, a read fails, or the reader
// is stopped.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Bytes requested per `read()`. Keypresses are a handful of bytes; a
/// paste can be many kilobytes and simply arrives in several chunks.
const READ_BUF_SIZE: usize = 4096;

/// Poll timeout between stop-flag checks (milliseconds).
const POLL_TIMEOUT_MS: i32 = 50;

/// Handle to the stdin reader thread. Stops the thread on drop.
pub struct StdinReader {
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
}

impl StdinReader {
    /// Spawn the reader thread.
    ///
    /// Each received `Vec<u8>` is a non-empty chunk, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn() -> io::Result<(Self, Receiver<Vec<u8>>)> {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                match read_loop(&tx, &stop_flag) {
                    Ok(()) => log::debug!("stdin reader finished"),
                    Err(err) => log::warn!("stdin read failed: {err}"),
                }
            })?;

        Ok((
            Self {
                handle: Some(handle),
                stop,
            },
            rx,
        ))
    }

    /// Signal the thread to stop and wait for it. Idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("stdin reader thread panicked");
            }
        }
    }
}

impl Drop for StdinReader {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Read until EOF, stop, or a hung-up receiver.
#[cfg(unix)]
fn read_loop(tx: &Sender<Vec<u8>>, stop: &AtomicBool) -> io::Result<()> {
    let fd = libc::STDIN_FILENO;
    let mut buf = [0u8; READ_BUF_SIZE];

    while !stop.load(Ordering::Relaxed) {
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let ready = unsafe { libc::poll(&raw mut pfd, 1, POLL_TIMEOUT_MS) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if ready == 0 {
            continue;
        }

        let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if n == 0 {
            return Ok(());
        }

        #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
        let chunk = buf[..n as usize].to_vec();
        if tx.send(chunk).is_err() {
            return Ok(());
        }
    }

    Ok(())
}

/// Blocking fallback: the stop flag is only seen between reads.
#[cfg(not(unix))]
fn read_loop(tx: &Sender<Vec<u8>>, stop: &AtomicBool) -> io::Result<()> {
    use std::io::Read;

    let stdin = io::stdin();
    let mut buf = [0u8; READ_BUF_SIZE];

    while !stop.load(Ordering::Relaxed) {
        let n = stdin.lock().read(&mut buf)?;
        if n == 0 || tx.send(buf[..n].to_vec()).is_err() {
            break;
        }
    }

    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
