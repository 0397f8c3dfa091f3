//! macOS pointer driver via CoreGraphics event injection.
//!
//! # Why a separate drag primitive? (for beginners)
//!
//! On macOS a "mouse moved" event while a button is down does not drag: the
//! window server expects `kCGEventLeftMouseDragged` (or the right/other
//! variant) instead.  Sending plain moves makes drawing applications see a
//! press, a jump, and a release.  This is why the pipeline distinguishes
//! `drag_mouse` from `move_mouse`.
//!
//! Button events carry a position too, so the driver remembers the last
//! position it sent.
//!
//! # Accessibility permission
//!
//! Posting at the HID tap requires the **Accessibility** permission in System
//! Settings → Privacy & Security.  Without it the events are silently dropped.

#![cfg(target_os = "macos")]

use std::cell::Cell;

use core_graphics::display::CGDisplay;
use core_graphics::event::{CGEvent, CGEventTapLocation, CGEventType, CGMouseButton};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use core_graphics::geometry::CGPoint;
use remouse_core::{DriverError, MouseButton, PointerDriver};

/// macOS implementation of [`PointerDriver`] using CoreGraphics.
pub struct CoreGraphicsDriver {
    source: CGEventSource,
    position: Cell<CGPoint>,
    held: Cell<Option<MouseButton>>,
}

impl CoreGraphicsDriver {
    /// # Errors
    ///
    /// Returns [`DriverError::Unavailable`] if no HID event source can be created.
    pub fn new() -> Result<Self, DriverError> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState).map_err(|()| {
            DriverError::Unavailable("CGEventSourceCreate returned null".to_string())
        })?;
        Ok(Self {
            source,
            position: Cell::new(CGPoint::new(0.0, 0.0)),
            held: Cell::new(None),
        })
    }

    fn post(
        &self,
        event_type: CGEventType,
        button: CGMouseButton,
    ) -> Result<(), DriverError> {
        let event = CGEvent::new_mouse_event(
            self.source.clone(),
            event_type,
            self.position.get(),
            button,
        )
        .map_err(|()| DriverError::Platform("CGEventCreateMouseEvent returned null".to_string()))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }
}

fn cg_button(button: MouseButton) -> CGMouseButton {
    match button {
        MouseButton::Left => CGMouseButton::Left,
        MouseButton::Right => CGMouseButton::Right,
        MouseButton::Middle => CGMouseButton::Center,
    }
}

fn dragged_type(button: MouseButton) -> CGEventType {
    match button {
        MouseButton::Left => CGEventType::LeftMouseDragged,
        MouseButton::Right => CGEventType::RightMouseDragged,
        MouseButton::Middle => CGEventType::OtherMouseDragged,
    }
}

fn button_type(button: MouseButton, pressed: bool) -> CGEventType {
    match (button, pressed) {
        (MouseButton::Left, true) => CGEventType::LeftMouseDown,
        (MouseButton::Left, false) => CGEventType::LeftMouseUp,
        (MouseButton::Right, true) => CGEventType::RightMouseDown,
        (MouseButton::Right, false) => CGEventType::RightMouseUp,
        (MouseButton::Middle, true) => CGEventType::OtherMouseDown,
        (MouseButton::Middle, false) => CGEventType::OtherMouseUp,
    }
}

impl PointerDriver for CoreGraphicsDriver {
    fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.position.set(CGPoint::new(f64::from(x), f64::from(y)));
        self.post(CGEventType::MouseMoved, CGMouseButton::Left)
    }

    fn drag_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.position.set(CGPoint::new(f64::from(x), f64::from(y)));
        let button = self.held.get().unwrap_or(MouseButton::Left);
        self.post(dragged_type(button), cg_button(button))
    }

    fn press(&self, button: MouseButton) -> Result<(), DriverError> {
        self.held.set(Some(button));
        self.post(button_type(button, true), cg_button(button))
    }

    fn release(&self, button: MouseButton) -> Result<(), DriverError> {
        self.held.set(None);
        self.post(button_type(button, false), cg_button(button))
    }

    fn screen_size(&self) -> Result<(u32, u32), DriverError> {
        let bounds = CGDisplay::main().bounds();
        let (w, h) = (bounds.size.width, bounds.size.height);
        if w < 1.0 || h < 1.0 {
            return Err(DriverError::Platform(format!(
                "main display reported bounds {w}x{h}"
            )));
        }
        Ok((w as u32, h as u32))
    }
}
