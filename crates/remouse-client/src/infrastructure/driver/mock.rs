//! Recording pointer driver for tests.
//!
//! Every call is pushed into a `Mutex<Vec<DriverCall>>` so assertions can
//! inspect exactly what the runtime asked for, and in what order.  Set
//! `should_fail` to exercise error paths without a broken OS.

use std::sync::Mutex;

use remouse_core::{DriverError, MouseButton, PointerDriver};

/// One observed driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCall {
    Move { x: i32, y: i32 },
    Drag { x: i32, y: i32 },
    Press(MouseButton),
    Release(MouseButton),
}

/// A driver that records calls instead of touching the OS.
#[derive(Debug)]
pub struct RecordingDriver {
    pub calls: Mutex<Vec<DriverCall>>,
    /// Reported by `screen_size()`.
    pub screen: (u32, u32),
    /// When `true`, every pointer call returns `DriverError::Platform`.
    pub should_fail: bool,
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            screen: (1920, 1080),
            should_fail: false,
        }
    }
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calls recorded so far.
    pub fn recorded(&self) -> Vec<DriverCall> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, call: DriverCall) -> Result<(), DriverError> {
        if self.should_fail {
            return Err(DriverError::Platform("mock failure".into()));
        }
        match self.calls.lock() {
            Ok(mut calls) => calls.push(call),
            Err(poisoned) => poisoned.into_inner().push(call),
        }
        Ok(())
    }
}

impl PointerDriver for RecordingDriver {
    fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.record(DriverCall::Move { x, y })
    }

    fn drag_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.record(DriverCall::Drag { x, y })
    }

    fn press(&self, button: MouseButton) -> Result<(), DriverError> {
        self.record(DriverCall::Press(button))
    }

    fn release(&self, button: MouseButton) -> Result<(), DriverError> {
        self.record(DriverCall::Release(button))
    }

    fn screen_size(&self) -> Result<(u32, u32), DriverError> {
        Ok(self.screen)
    }
}
