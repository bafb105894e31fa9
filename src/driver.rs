// SPDX-License-Identifier: MIT
//
// Drives the decoder from the reader channel and keeps its idle
// timer running.
//
// The loop blocks on the chunk channel with a short timeout:
//
//   1. A chunk arrives: every byte goes into the decoder, and whatever
//      events it completes are handed to the application.
//
//   2. The timeout fires: the time since the previous report is passed
//      to `Decoder::timeout`. A lone ESC becomes an Escape event once the
//      idle time reaches the decoder's threshold, so the tick should be a
//      fraction of that threshold (10ms against 50ms by default).
//
//   3. The channel closes (stdin EOF): pending bytes are flushed, since
//      nothing can complete them any more, and the loop ends.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use n_input::{Decoder, DecoderConfig, Event};

use crate::error::Result;
use crate::reader::StdinReader;

/// What the application wants after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Receives decoded events from the driver.
pub trait App {
    /// Handle one event. Return [`Action::Quit`] to stop the driver.
    ///
    /// # Errors
    ///
    /// An error stops the driver and is returned from [`Driver::run`].
    fn on_event(&mut self, event: &Event) -> Result<Action>;
}

/// Driver timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// How long to wait for input before reporting idle time.
    pub tick: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(10),
        }
    }
}

/// Owns the decoder and runs the read → decode → dispatch loop.
pub struct Driver {
    decoder: Decoder<Vec<Event>>,
    config: DriverConfig,
}

impl Driver {
    #[must_use]
    pub fn new(decoder: DecoderConfig, config: DriverConfig) -> Self {
        Self {
            decoder: Decoder::with_config(decoder, Vec::new()),
            config,
        }
    }

    /// Read stdin until EOF or until the application quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader thread cannot be spawned or the
    /// application fails.
    pub fn run(&mut self, app: &mut impl App) -> Result<()> {
        let (mut reader, rx) = StdinReader::spawn()?;
        let result = self.pump(&rx, app);
        reader.stop();
        result
    }

    /// Drive the decoder from `rx` until it disconnects or the app quits.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by the application.
    pub fn pump(&mut self, rx: &Receiver<Vec<u8>>, app: &mut impl App) -> Result<()> {
        let mut last_report = Instant::now();

        loop {
            match rx.recv_timeout(self.config.tick) {
                Ok(chunk) => {
                    self.decoder.feed(&chunk);
                    last_report = Instant::now();
                }
                Err(RecvTimeoutError::Timeout) => {
                    let now = Instant::now();
                    self.decoder.timeout(now.duration_since(last_report));
                    last_report = now;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    self.decoder.flush();
                    self.dispatch(app)?;
                    return Ok(());
                }
            }

            if self.dispatch(app)? == Action::Quit {
                return Ok(());
            }
        }
    }

    /// Hand every queued event to the application, in order.
    fn dispatch(&mut self, app: &mut impl App) -> Result<Action> {
        for event in self.decoder.sink_mut().drain(..) {
            if app.on_event(&event)? == Action::Quit {
                return Ok(Action::Quit);
            }
        }
        Ok(Action::Continue)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
