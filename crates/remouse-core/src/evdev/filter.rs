//! Type-based filters over any [`InputEvent`] stream.
//!
//! Both filters are lazy: a single `next()` keeps pulling from the wrapped
//! stream until it finds a matching event or the wrapped stream runs dry.
//! Neither keeps error state of its own; `close()` is a straight proxy.

use crate::error::PipelineError;
use crate::evdev::event::InputEvent;
use crate::stream::EventStream;

/// Keeps only events whose type is in `selection`.
pub struct SelectingStream<S> {
    wrapped: S,
    selection: Vec<u16>,
    current: InputEvent,
}

impl<S> SelectingStream<S> {
    pub fn new(wrapped: S, selection: impl Into<Vec<u16>>) -> Self {
        Self {
            wrapped,
            selection: selection.into(),
            current: InputEvent::default(),
        }
    }
}

impl<S: EventStream<Item = InputEvent>> EventStream for SelectingStream<S> {
    type Item = InputEvent;

    fn next(&mut self) -> bool {
        while self.wrapped.next() {
            let evt = self.wrapped.current();
            if self.selection.contains(&evt.event_type) {
                self.current = evt;
                return true;
            }
        }
        false
    }

    fn current(&self) -> InputEvent {
        self.current
    }

    fn close(&mut self) -> Result<(), PipelineError> {
        self.wrapped.close()
    }
}

/// Drops events whose type is in `exclusion`.
pub struct ExcludingStream<S> {
    wrapped: S,
    exclusion: Vec<u16>,
    current: InputEvent,
}

impl<S> ExcludingStream<S> {
    pub fn new(wrapped: S, exclusion: impl Into<Vec<u16>>) -> Self {
        Self {
            wrapped,
            exclusion: exclusion.into(),
            current: InputEvent::default(),
        }
    }
}

impl<S: EventStream<Item = InputEvent>> EventStream for ExcludingStream<S> {
    type Item = InputEvent;

    fn next(&mut self) -> bool {
        while self.wrapped.next() {
            let evt = self.wrapped.current();
            if !self.exclusion.contains(&evt.event_type) {
                self.current = evt;
                return true;
            }
        }
        false
    }

    fn current(&self) -> InputEvent {
        self.current
    }

    fn close(&mut self) -> Result<(), PipelineError> {
        self.wrapped.close()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
