//! The typed input event and its 16-byte wire codec.
//!
//! Wire format (little-endian, the 32-bit kernel `struct input_event`):
//! ```text
//! [seconds:4][microseconds:4][type:2][code:2][value:4]
//! ```
//! Total record size: 16 bytes.

use std::time::Duration;

pub use crate::error::RECORD_SIZE;

/// One decoded hardware input record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InputEvent {
    /// Seconds part of the kernel timestamp.
    pub seconds: u32,
    /// Microseconds part of the kernel timestamp.
    pub microseconds: u32,
    /// Event type (`EV_ABS`, `EV_KEY`, ...).
    pub event_type: u16,
    /// Axis or button code within `event_type`.
    pub code: u16,
    /// Axis position, key state, etc.
    pub value: i32,
}

impl InputEvent {
    /// Builds an event with a zero timestamp.
    pub fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
            ..Self::default()
        }
    }

    /// Timestamp as a duration since the device clock's epoch.
    ///
    /// Out-of-range microsecond values are carried into seconds rather than
    /// rejected; the timestamp is never validated.
    pub fn timestamp(&self) -> Duration {
        Duration::from_secs(u64::from(self.seconds))
            + Duration::from_micros(u64::from(self.microseconds))
    }
}

/// Decodes one record.
pub fn decode_record(buf: &[u8; RECORD_SIZE]) -> InputEvent {
    InputEvent {
        seconds: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
        microseconds: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
        event_type: u16::from_le_bytes([buf[8], buf[9]]),
        code: u16::from_le_bytes([buf[10], buf[11]]),
        value: i32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
    }
}

/// Encodes one record; the exact inverse of [`decode_record`].
pub fn encode_record(event: &InputEvent) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[0..4].copy_from_slice(&event.seconds.to_le_bytes());
    buf[4..8].copy_from_slice(&event.microseconds.to_le_bytes());
    buf[8..10].copy_from_slice(&event.event_type.to_le_bytes());
    buf[10..12].copy_from_slice(&event.code.to_le_bytes());
    buf[12..16].copy_from_slice(&event.value.to_le_bytes());
    buf
}

// ── Tests ─────────────────────────────────────────────────────────────────────
