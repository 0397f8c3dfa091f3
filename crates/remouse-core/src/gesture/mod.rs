//! Gesture recognition: typed input events in, pointer gestures out.
//!
//! # From pen to mouse (for beginners)
//!
//! A pen digitizer never says "click".  It reports raw facts, one per event:
//! the X axis is now 5120, the pressure is now 812, the eraser end is now in
//! range.  The state machines in this module remember those facts and turn
//! *changes* into [`GestureEvent`]s a mouse driver understands:
//!
//! | Hardware fact                          | Gesture                      |
//! |----------------------------------------|------------------------------|
//! | X or Y changed                         | `PointerMoved`               |
//! | pressure rose above the threshold      | `ButtonPressed`              |
//! | pressure fell back to the threshold    | `ButtonReleased`             |
//! | X or Y changed while a button is held  | `PointerDragged` (drag mode) |
//!
//! Which button a press maps to depends on which end of the pen touches the
//! surface; see [`ToolFunction`].

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::evdev::codes::{ABS_PRESSURE, ABS_X, ABS_Y, BTN_TOOL_PEN, BTN_TOOL_RUBBER, EV_ABS, EV_KEY};

pub mod dragging;
pub mod machine;

pub use dragging::DraggingStateMachine;
pub use machine::EvdevStateMachine;

/// Pressure above which the pen counts as touching the surface.
pub const DEFAULT_PRESSURE_THRESHOLD: i32 = 500;

/// A semantic pointer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    /// The pointer moved with no button held (or drag substitution is off).
    PointerMoved { x: i32, y: i32 },
    /// The pointer moved while a button is held.
    PointerDragged { x: i32, y: i32 },
    /// A mouse button went down.
    ButtonPressed { button: MouseButton },
    /// A mouse button came back up.
    ButtonReleased { button: MouseButton },
}

impl Default for GestureEvent {
    fn default() -> Self {
        Self::PointerMoved { x: 0, y: 0 }
    }
}

/// Mouse buttons a pen tip can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Which physical end of the pen is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    /// The writing tip.
    #[default]
    Primary,
    /// The eraser end.
    Secondary,
}

/// What contact with a given tool does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ToolFunction {
    /// Contact presses and holds this button.
    Button(MouseButton),
    /// Contact is ignored; the pointer still follows the tool.
    NoOp,
}

/// Error returned when a tool function name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool function {0:?} (expected left, right, center or none)")]
pub struct ParseToolFunctionError(String);

impl FromStr for ToolFunction {
    type Err = ParseToolFunctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Button(MouseButton::Left)),
            "right" => Ok(Self::Button(MouseButton::Right)),
            "center" | "middle" => Ok(Self::Button(MouseButton::Middle)),
            "none" | "noop" => Ok(Self::NoOp),
            _ => Err(ParseToolFunctionError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ToolFunction {
    type Error = ParseToolFunctionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ToolFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Button(MouseButton::Left) => "left",
            Self::Button(MouseButton::Right) => "right",
            Self::Button(MouseButton::Middle) => "center",
            Self::NoOp => "none",
        };
        f.write_str(name)
    }
}

/// Hardware protocol lookup table: which event means what.
///
/// Kept out of the state machine so a digitizer with different codes only
/// needs a different table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolCodes {
    pub axis_type: u16,
    pub key_type: u16,
    pub x: u16,
    pub y: u16,
    pub pressure: u16,
    pub primary_tool: u16,
    pub secondary_tool: u16,
}

impl ProtocolCodes {
    /// Standard Linux evdev codes, as reported by a Wacom-style pen digitizer.
    pub const EVDEV: Self = Self {
        axis_type: EV_ABS,
        key_type: EV_KEY,
        x: ABS_X,
        y: ABS_Y,
        pressure: ABS_PRESSURE,
        primary_tool: BTN_TOOL_PEN,
        secondary_tool: BTN_TOOL_RUBBER,
    };
}

impl Default for ProtocolCodes {
    fn default() -> Self {
        Self::EVDEV
    }
}

/// Policy for [`EvdevStateMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    pub pressure_threshold: i32,
    pub primary_tip: ToolFunction,
    pub secondary_tip: ToolFunction,
    pub codes: ProtocolCodes,
}

impl GestureConfig {
    /// Looks up what contact with `tool` does.
    pub fn function_of(&self, tool: Tool) -> ToolFunction {
        match tool {
            Tool::Primary => self.primary_tip,
            Tool::Secondary => self.secondary_tip,
        }
    }
}

impl Default for GestureConfig {
    /// Pen tip = left button, eraser = right button, threshold 500.
    fn default() -> Self {
        Self {
            pressure_threshold: DEFAULT_PRESSURE_THRESHOLD,
            primary_tip: ToolFunction::Button(MouseButton::Left),
            secondary_tip: ToolFunction::Button(MouseButton::Right),
            codes: ProtocolCodes::EVDEV,
        }
    }
}
