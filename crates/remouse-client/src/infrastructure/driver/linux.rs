//! Linux X11 pointer driver via the XTest extension.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize pointer
//! events as if the user had physically moved the mouse.  The receiving
//! application cannot tell them apart from real input.
//!
//! - `XTestFakeMotionEvent(display, screen, x, y, delay)` moves the cursor to
//!   absolute pixel coordinates.
//! - `XTestFakeButtonEvent(display, button, is_press, delay)` presses or
//!   releases a button.
//!
//! X11 has no separate "drag" event: motion while a button is down is a drag,
//! so `drag_mouse` is a plain motion event.
//!
//! # Permissions
//!
//! The process needs access to the display named by `DISPLAY`.  If it is unset
//! or the server refuses the connection, [`XTestDriver::new`] fails with
//! [`DriverError::Unavailable`].

use std::os::raw::{c_int, c_uint};

use remouse_core::{DriverError, MouseButton, PointerDriver};
use tracing::debug;
use x11::{xlib, xtest};

/// `CurrentTime`: no delay before the server processes the fake event.
const NO_DELAY: std::os::raw::c_ulong = 0;

/// `-1`: the screen that currently contains the pointer.
const SCREEN_CURRENT: c_int = -1;

/// Owns an Xlib display connection for the lifetime of the driver.
pub struct XTestDriver {
    display: *mut xlib::Display,
}

impl XTestDriver {
    /// Connects to the X display and checks that XTest is available.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Unavailable`] if the display cannot be opened or
    /// the server lacks the XTest extension.
    pub fn new() -> Result<Self, DriverError> {
        // SAFETY: a null name means "use $DISPLAY".  A non-null result must be
        // freed with XCloseDisplay, which `Drop` does.
        let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        if display.is_null() {
            let display_env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            return Err(DriverError::Unavailable(format!(
                "XOpenDisplay failed; DISPLAY={display_env}"
            )));
        }
        let driver = Self { display };

        let (mut event_base, mut error_base, mut major, mut minor) = (0, 0, 0, 0);
        // SAFETY: `display` is valid; the out-pointers reference live locals.
        let present = unsafe {
            xtest::XTestQueryExtension(
                driver.display,
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        };
        if present == 0 {
            return Err(DriverError::Unavailable(
                "X server does not support the XTest extension".to_string(),
            ));
        }
        debug!(major, minor, "XTest extension available");
        Ok(driver)
    }

    fn flush(&self) {
        // SAFETY: `display` is valid for the lifetime of `self`.
        unsafe { xlib::XFlush(self.display) };
    }

    fn motion(&self, x: i32, y: i32) -> Result<(), DriverError> {
        // SAFETY: `display` is valid for the lifetime of `self`.
        let ok = unsafe {
            xtest::XTestFakeMotionEvent(self.display, SCREEN_CURRENT, x, y, NO_DELAY)
        };
        self.flush();
        check(ok, "XTestFakeMotionEvent")
    }

    fn button(&self, button: MouseButton, pressed: bool) -> Result<(), DriverError> {
        // SAFETY: `display` is valid for the lifetime of `self`.
        let ok = unsafe {
            xtest::XTestFakeButtonEvent(
                self.display,
                x11_button(button),
                c_int::from(pressed),
                NO_DELAY,
            )
        };
        self.flush();
        check(ok, "XTestFakeButtonEvent")
    }
}

impl Drop for XTestDriver {
    fn drop(&mut self) {
        // SAFETY: `display` came from XOpenDisplay and is not used after this.
        unsafe { xlib::XCloseDisplay(self.display) };
    }
}

/// X11 button numbers: 1 = left, 2 = middle, 3 = right.
fn x11_button(button: MouseButton) -> c_uint {
    match button {
        MouseButton::Left => 1,
        MouseButton::Middle => 2,
        MouseButton::Right => 3,
    }
}

fn check(status: c_int, call: &str) -> Result<(), DriverError> {
    if status == 0 {
        Err(DriverError::Platform(format!("{call} was rejected by the X server")))
    } else {
        Ok(())
    }
}

impl PointerDriver for XTestDriver {
    fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.motion(x, y)
    }

    fn drag_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.motion(x, y)
    }

    fn press(&self, button: MouseButton) -> Result<(), DriverError> {
        self.button(button, true)
    }

    fn release(&self, button: MouseButton) -> Result<(), DriverError> {
        self.button(button, false)
    }

    fn screen_size(&self) -> Result<(u32, u32), DriverError> {
        // SAFETY: `display` is valid; the default screen number is in range.
        let (width, height) = unsafe {
            let screen = xlib::XDefaultScreen(self.display);
            (
                xlib::XDisplayWidth(self.display, screen),
                xlib::XDisplayHeight(self.display, screen),
            )
        };
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
            _ => Err(DriverError::Platform(format!(
                "X server reported screen size {width}x{height}"
            ))),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_numbers_follow_x11_convention() {
        assert_eq!(x11_button(MouseButton::Left), 1);
        assert_eq!(x11_button(MouseButton::Middle), 2);
        assert_eq!(x11_button(MouseButton::Right), 3);
    }

    /// Smoke-test: with a DISPLAY the driver opens and reports a size; without
    /// one it must fail as unavailable.
    #[test]
    fn test_xtest_driver_smoke() {
        match XTestDriver::new() {
            Ok(driver) => {
                let (w, h) = driver.screen_size().expect("screen size");
                assert!(w > 0 && h > 0);
            }
            Err(e) => assert!(matches!(e, DriverError::Unavailable(_)), "{e}"),
        }
    }
}
