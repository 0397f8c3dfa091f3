//! Linux input-event type and code constants, plus human-readable names.
//!
//! Only the subset a pen digitizer reports is named here.  Anything else still
//! decodes; it just prints as `"UNKNOWN"` in the debug dump.

// ── Event types ───────────────────────────────────────────────────────────────

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_REL: u16 = 0x02;
pub const EV_ABS: u16 = 0x03;
pub const EV_MSC: u16 = 0x04;
pub const EV_SW: u16 = 0x05;
pub const EV_LED: u16 = 0x11;
pub const EV_SND: u16 = 0x12;
pub const EV_REP: u16 = 0x14;
pub const EV_FF: u16 = 0x15;
pub const EV_PWR: u16 = 0x16;
pub const EV_FF_STATUS: u16 = 0x17;

// ── EV_SYN codes ──────────────────────────────────────────────────────────────

pub const SYN_REPORT: u16 = 0x00;
pub const SYN_CONFIG: u16 = 0x01;
pub const SYN_MT_REPORT: u16 = 0x02;
pub const SYN_DROPPED: u16 = 0x03;

// ── EV_ABS codes ──────────────────────────────────────────────────────────────

pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_PRESSURE: u16 = 0x18;
pub const ABS_DISTANCE: u16 = 0x19;
pub const ABS_TILT_X: u16 = 0x1a;
pub const ABS_TILT_Y: u16 = 0x1b;

// ── EV_KEY codes ──────────────────────────────────────────────────────────────

pub const BTN_TOOL_PEN: u16 = 0x140;
pub const BTN_TOOL_RUBBER: u16 = 0x141;
pub const BTN_TOUCH: u16 = 0x14a;
pub const BTN_STYLUS: u16 = 0x14b;
pub const BTN_STYLUS2: u16 = 0x14c;

/// The allow-set used by the mouse pipeline: axis and button events only.
pub const POINTER_EVENT_TYPES: [u16; 2] = [EV_ABS, EV_KEY];

/// Returns the symbolic name of an event type, or `"UNKNOWN"`.
pub fn type_name(event_type: u16) -> &'static str {
    match event_type {
        EV_SYN => "EV_SYN",
        EV_KEY => "EV_KEY",
        EV_REL => "EV_REL",
        EV_ABS => "EV_ABS",
        EV_MSC => "EV_MSC",
        EV_SW => "EV_SW",
        EV_LED => "EV_LED",
        EV_SND => "EV_SND",
        EV_REP => "EV_REP",
        EV_FF => "EV_FF",
        EV_PWR => "EV_PWR",
        EV_FF_STATUS => "EV_FF_STATUS",
        _ => "UNKNOWN",
    }
}

/// Returns the symbolic name of a code within its event type, or `"UNKNOWN"`.
///
/// Codes are only unique per type (`ABS_X` and `SYN_REPORT` are both 0), so
/// the type is required.
pub fn code_name(event_type: u16, code: u16) -> &'static str {
    match (event_type, code) {
        (EV_SYN, SYN_REPORT) => "SYN_REPORT",
        (EV_SYN, SYN_CONFIG) => "SYN_CONFIG",
        (EV_SYN, SYN_MT_REPORT) => "SYN_MT_REPORT",
        (EV_SYN, SYN_DROPPED) => "SYN_DROPPED",
        (EV_ABS, ABS_X) => "ABS_X",
        (EV_ABS, ABS_Y) => "ABS_Y",
        (EV_ABS, ABS_PRESSURE) => "ABS_PRESSURE",
        (EV_ABS, ABS_DISTANCE) => "ABS_DISTANCE",
        (EV_ABS, ABS_TILT_X) => "ABS_TILT_X",
        (EV_ABS, ABS_TILT_Y) => "ABS_TILT_Y",
        (EV_KEY, BTN_TOOL_PEN) => "BTN_TOOL_PEN",
        (EV_KEY, BTN_TOOL_RUBBER) => "BTN_TOOL_RUBBER",
        (EV_KEY, BTN_TOUCH) => "BTN_TOUCH",
        (EV_KEY, BTN_STYLUS) => "BTN_STYLUS",
        (EV_KEY, BTN_STYLUS2) => "BTN_STYLUS2",
        _ => "UNKNOWN",
    }
}
