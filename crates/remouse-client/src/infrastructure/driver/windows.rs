//! Windows pointer driver via the SendInput API.
//!
//! Positions are sent as absolute coordinates normalized to the virtual
//! desktop's `[0, 65535]` range, so offsets onto secondary monitors work.
//! Windows has no separate drag event: motion with a button down is a drag.

#![cfg(target_os = "windows")]

use remouse_core::{DriverError, MouseButton, PointerDriver};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_LEFTDOWN,
    MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE,
    MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP, MOUSEEVENTF_VIRTUALDESK, MOUSEINPUT,
    MOUSE_EVENT_FLAGS,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SM_CXSCREEN, SM_CXVIRTUALSCREEN, SM_CYSCREEN, SM_CYVIRTUALSCREEN,
    SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
};

/// Windows implementation of [`PointerDriver`] using SendInput.
pub struct SendInputDriver;

impl SendInputDriver {
    /// # Errors
    ///
    /// Never fails; the signature matches the other platform drivers.
    pub fn new() -> Result<Self, DriverError> {
        Ok(Self)
    }

    fn send(&self, dx: i32, dy: i32, flags: MOUSE_EVENT_FLAGS) -> Result<(), DriverError> {
        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx,
                    dy,
                    mouseData: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };
        // SAFETY: input is a valid INPUT structure on the stack
        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent == 1 {
            Ok(())
        } else {
            Err(DriverError::Platform(format!(
                "SendInput injected {sent} of 1 events: {}",
                windows::core::Error::from_win32()
            )))
        }
    }

    fn motion(&self, x: i32, y: i32) -> Result<(), DriverError> {
        let (nx, ny) = normalize_coords(x, y);
        self.send(
            nx,
            ny,
            MOUSEEVENTF_ABSOLUTE | MOUSEEVENTF_VIRTUALDESK | MOUSEEVENTF_MOVE,
        )
    }
}

/// Virtual desktop origin and size in pixels.
fn virtual_desktop() -> (i32, i32, i32, i32) {
    // SAFETY: GetSystemMetrics is always safe to call
    unsafe {
        (
            GetSystemMetrics(SM_XVIRTUALSCREEN),
            GetSystemMetrics(SM_YVIRTUALSCREEN),
            GetSystemMetrics(SM_CXVIRTUALSCREEN),
            GetSystemMetrics(SM_CYVIRTUALSCREEN),
        )
    }
}

/// Normalizes pixel coordinates to the `[0, 65535]` virtual desktop range.
fn normalize_coords(x: i32, y: i32) -> (i32, i32) {
    let (left, top, width, height) = virtual_desktop();
    (normalize_axis(x, left, width), normalize_axis(y, top, height))
}

fn normalize_axis(pos: i32, origin: i32, extent: i32) -> i32 {
    if extent <= 1 {
        return 0;
    }
    let scaled = i64::from(pos - origin) * 65535 / i64::from(extent - 1);
    scaled.clamp(0, 65535) as i32
}

fn button_flags(button: MouseButton, pressed: bool) -> MOUSE_EVENT_FLAGS {
    match (button, pressed) {
        (MouseButton::Left, true) => MOUSEEVENTF_LEFTDOWN,
        (MouseButton::Left, false) => MOUSEEVENTF_LEFTUP,
        (MouseButton::Right, true) => MOUSEEVENTF_RIGHTDOWN,
        (MouseButton::Right, false) => MOUSEEVENTF_RIGHTUP,
        (MouseButton::Middle, true) => MOUSEEVENTF_MIDDLEDOWN,
        (MouseButton::Middle, false) => MOUSEEVENTF_MIDDLEUP,
    }
}

impl PointerDriver for SendInputDriver {
    fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.motion(x, y)
    }

    fn drag_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.motion(x, y)
    }

    fn press(&self, button: MouseButton) -> Result<(), DriverError> {
        self.send(0, 0, button_flags(button, true))
    }

    fn release(&self, button: MouseButton) -> Result<(), DriverError> {
        self.send(0, 0, button_flags(button, false))
    }

    fn screen_size(&self) -> Result<(u32, u32), DriverError> {
        // SAFETY: GetSystemMetrics is always safe to call
        let (w, h) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        match (u32::try_from(w), u32::try_from(h)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
            _ => Err(DriverError::Platform(
                "GetSystemMetrics returned no primary screen size".to_string(),
            )),
        }
    }
}
