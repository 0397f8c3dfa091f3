//! The runtime loop: gestures in, pointer-driver calls out.
//!
//! This is the only place where scaled coordinates meet the driver.  One
//! gesture is pulled and fully dispatched per `next()` call, so driver calls
//! never overlap and always happen in the order the state machine produced
//! the gestures.

use tracing::{debug, trace, warn};

use crate::domain::scaler::PositionScaler;
use crate::error::{DriverError, PipelineError};
use crate::gesture::{GestureEvent, MouseButton};
use crate::stream::EventStream;

/// The pointing-device sink.
///
/// Each supported OS provides an implementation in the client crate.
pub trait PointerDriver {
    /// Moves the cursor to an absolute screen position.
    fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError>;

    /// Moves the cursor while a button is held.
    fn drag_mouse(&self, x: i32, y: i32) -> Result<(), DriverError>;

    /// Presses `button` at the current cursor position.
    fn press(&self, button: MouseButton) -> Result<(), DriverError>;

    /// Releases `button` at the current cursor position.
    fn release(&self, button: MouseButton) -> Result<(), DriverError>;

    /// Returns the primary screen size in pixels.
    ///
    /// Only used to seed default configuration.
    fn screen_size(&self) -> Result<(u32, u32), DriverError>;
}

impl<D: PointerDriver + ?Sized> PointerDriver for &D {
    fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        (**self).move_mouse(x, y)
    }

    fn drag_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        (**self).drag_mouse(x, y)
    }

    fn press(&self, button: MouseButton) -> Result<(), DriverError> {
        (**self).press(button)
    }

    fn release(&self, button: MouseButton) -> Result<(), DriverError> {
        (**self).release(button)
    }

    fn screen_size(&self) -> Result<(u32, u32), DriverError> {
        (**self).screen_size()
    }
}

impl<D: PointerDriver + ?Sized> PointerDriver for Box<D> {
    fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        (**self).move_mouse(x, y)
    }

    fn drag_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        (**self).drag_mouse(x, y)
    }

    fn press(&self, button: MouseButton) -> Result<(), DriverError> {
        (**self).press(button)
    }

    fn release(&self, button: MouseButton) -> Result<(), DriverError> {
        (**self).release(button)
    }

    fn screen_size(&self) -> Result<(u32, u32), DriverError> {
        (**self).screen_size()
    }
}

/// Lifecycle of a [`Runtime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeState {
    /// Dispatching gestures.
    Running,
    /// The state machine ran out of gestures.
    Drained,
    /// A driver call failed; the error is held until `close()`.
    Errored,
    /// `close()` has run.
    Closed,
}

/// Drives a gesture stream into a pointer driver.
///
/// The runtime owns the state machine and borrows the scaler and driver,
/// which are built and owned by the caller.
pub struct Runtime<'a, S, P: ?Sized, D: ?Sized> {
    machine: S,
    scaler: &'a P,
    driver: &'a D,
    state: RuntimeState,
    err: Option<PipelineError>,
    dispatched: u64,
}

impl<'a, S, P, D> Runtime<'a, S, P, D>
where
    S: EventStream<Item = GestureEvent>,
    P: PositionScaler + ?Sized,
    D: PointerDriver + ?Sized,
{
    pub fn new(machine: S, scaler: &'a P, driver: &'a D) -> Self {
        Self {
            machine,
            scaler,
            driver,
            state: RuntimeState::Running,
            err: None,
            dispatched: 0,
        }
    }

    pub fn state(&self) -> RuntimeState {
        self.state
    }

    /// Number of gestures successfully delivered to the driver.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Pulls one gesture and delivers it to the driver.
    ///
    /// Returns `false` once the state machine is drained, a driver call has
    /// failed, or the runtime has been closed.  After a driver failure no
    /// further driver calls are made.
    pub fn next(&mut self) -> bool {
        if self.state != RuntimeState::Running {
            return false;
        }
        if !self.machine.next() {
            debug!(dispatched = self.dispatched, "gesture stream drained");
            self.state = RuntimeState::Drained;
            return false;
        }

        let gesture = self.machine.current();
        trace!(?gesture, "dispatching");
        match self.dispatch(gesture) {
            Ok(()) => {
                self.dispatched += 1;
                true
            }
            Err(e) => {
                warn!(?gesture, "pointer driver failed: {e}");
                self.err = Some(e.into());
                self.state = RuntimeState::Errored;
                false
            }
        }
    }

    fn dispatch(&self, gesture: GestureEvent) -> Result<(), DriverError> {
        match gesture {
            GestureEvent::PointerMoved { x, y } => {
                let (sx, sy) = self.scaler.scale_position(x, y);
                self.driver.move_mouse(sx, sy)
            }
            GestureEvent::PointerDragged { x, y } => {
                let (sx, sy) = self.scaler.scale_position(x, y);
                self.driver.drag_mouse(sx, sy)
            }
            GestureEvent::ButtonPressed { button } => self.driver.press(button),
            GestureEvent::ButtonReleased { button } => self.driver.release(button),
        }
    }

    /// Runs until the stream is drained or a driver call fails.
    pub fn run(&mut self) {
        while self.next() {}
    }

    /// Closes the state machine (once) and reports the first error seen.
    ///
    /// # Errors
    ///
    /// Returns the remembered driver error if there is one, otherwise the
    /// state machine's close error.  Later calls return the same result.
    pub fn close(&mut self) -> Result<(), PipelineError> {
        if self.state != RuntimeState::Closed {
            let closed = self.machine.close();
            self.state = RuntimeState::Closed;
            debug!(dispatched = self.dispatched, "runtime closed");
            if let (None, Err(e)) = (&self.err, closed) {
                self.err = Some(e);
            }
        }
        match &self.err {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
