//! Drag substitution over any gesture stream.
//!
//! Some input-injection APIs (notably macOS CoreGraphics) treat "mouse moved"
//! and "mouse dragged" as different event types, and a plain move while a
//! virtual button is down releases the drag on the receiving side.  This
//! decorator rewrites moves made while a button is held into explicit drags.

use crate::error::PipelineError;
use crate::gesture::GestureEvent;
use crate::stream::EventStream;

/// Rewrites `PointerMoved` into `PointerDragged` between a press and its release.
///
/// Drags follow the held button, not pen contact: a tool mapped to
/// [`ToolFunction::NoOp`](crate::gesture::ToolFunction::NoOp) never presses, so
/// its in-contact moves pass through as plain moves.
pub struct DraggingStateMachine<S> {
    wrapped: S,
    held: bool,
    current: GestureEvent,
}

impl<S> DraggingStateMachine<S> {
    pub fn new(wrapped: S) -> Self {
        Self {
            wrapped,
            held: false,
            current: GestureEvent::default(),
        }
    }

    /// Borrows the wrapped machine.
    pub fn inner(&self) -> &S {
        &self.wrapped
    }
}

impl<S: EventStream<Item = GestureEvent>> EventStream for DraggingStateMachine<S> {
    type Item = GestureEvent;

    fn next(&mut self) -> bool {
        if !self.wrapped.next() {
            return false;
        }
        self.current = match self.wrapped.current() {
            GestureEvent::PointerMoved { x, y } if self.held => {
                GestureEvent::PointerDragged { x, y }
            }
            pressed @ GestureEvent::ButtonPressed { .. } => {
                self.held = true;
                pressed
            }
            released @ GestureEvent::ButtonReleased { .. } => {
                self.held = false;
                released
            }
            other => other,
        };
        true
    }

    fn current(&self) -> GestureEvent {
        self.current
    }

    fn close(&mut self) -> Result<(), PipelineError> {
        self.wrapped.close()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
