//! Platform pointer drivers.
//!
//! Each platform implements [`PointerDriver`]; the correct one is selected at
//! compile time via `#[cfg(target_os = ...)]` and re-exported as
//! `NativeDriver`:
//!
//! | Module    | OS      | API used                                        |
//! |-----------|---------|-------------------------------------------------|
//! | `linux`   | Linux   | XTest (`XTestFakeMotionEvent`, `...ButtonEvent`)|
//! | `windows` | Windows | `SendInput` with absolute coordinates           |
//! | `macos`   | macOS   | CoreGraphics `CGEvent` mouse events             |
//!
//! The [`mock::RecordingDriver`] is always compiled so tests on any platform
//! can use it without a display.

use remouse_core::{DriverError, PointerDriver};

pub mod mock;

// ── Linux implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::XTestDriver as NativeDriver;

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::SendInputDriver as NativeDriver;

// ── macOS implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::CoreGraphicsDriver as NativeDriver;

/// Opens the pointer driver for the current platform.
///
/// # Errors
///
/// Returns [`DriverError::Unavailable`] when no display can be reached or the
/// platform has no driver.
#[cfg(any(target_os = "linux", target_os = "windows", target_os = "macos"))]
pub fn open_native_driver() -> Result<Box<dyn PointerDriver>, DriverError> {
    Ok(Box::new(NativeDriver::new()?))
}

#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
pub fn open_native_driver() -> Result<Box<dyn PointerDriver>, DriverError> {
    Err(DriverError::Unavailable(
        "no pointer driver for this platform".to_string(),
    ))
}
