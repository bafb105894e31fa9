// SPDX-License-Identifier: MIT
//
// Event sinks, where the decoder delivers events.
//
// The decoder pushes each event exactly once and never waits. A sink must
// accept every event it is given; if it has to shed load, that is its own
// business.

use std::collections::VecDeque;
use std::sync::mpsc::Sender;

use crate::event::Event;

/// Non-blocking destination for decoded events.
pub trait EventSink {
    /// Accept one event. Must not block.
    fn push(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn push(&mut self, event: Event) {
        Self::push(self, event);
    }
}

impl EventSink for VecDeque<Event> {
    fn push(&mut self, event: Event) {
        self.push_back(event);
    }
}

/// Channel hand-off to another thread. A hung-up receiver drops the event.
impl EventSink for Sender<Event> {
    fn push(&mut self, event: Event) {
        if let Err(err) = self.send(event) {
            log::debug!("event receiver gone, dropping {}", err.0.escaped());
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn push(&mut self, event: Event) {
        (**self).push(event);
    }
}
