//! The base gesture state machine.

use tracing::{debug, trace};

use crate::error::PipelineError;
use crate::evdev::event::InputEvent;
use crate::gesture::{GestureConfig, GestureEvent, MouseButton, Tool, ToolFunction};
use crate::stream::EventStream;

/// Interprets a filtered [`InputEvent`] stream as pointer gestures.
///
/// Each input event is handled on its own as it arrives and produces at most
/// one gesture; nothing is batched across `SYN_REPORT` frames.  Events that
/// change nothing (an axis reporting its current value, an unknown code) are
/// skipped without emitting.
pub struct EvdevStateMachine<S> {
    wrapped: S,
    config: GestureConfig,
    x: Option<i32>,
    y: Option<i32>,
    pressure: i32,
    in_contact: bool,
    tool: Tool,
    /// Button pressed at contact start, released at contact end.
    held: Option<MouseButton>,
    current: GestureEvent,
}

impl<S> EvdevStateMachine<S> {
    pub fn new(wrapped: S, config: GestureConfig) -> Self {
        Self {
            wrapped,
            config,
            x: None,
            y: None,
            pressure: 0,
            in_contact: false,
            tool: Tool::Primary,
            held: None,
            current: GestureEvent::default(),
        }
    }

    /// Last reported position; unknown axes read as 0.
    pub fn position(&self) -> (i32, i32) {
        (self.x.unwrap_or_default(), self.y.unwrap_or_default())
    }

    pub fn pressure(&self) -> i32 {
        self.pressure
    }

    pub fn in_contact(&self) -> bool {
        self.in_contact
    }

    pub fn active_tool(&self) -> Tool {
        self.tool
    }

    fn moved(&self) -> GestureEvent {
        let (x, y) = self.position();
        GestureEvent::PointerMoved { x, y }
    }

    /// Applies one event to the state and returns the gesture it causes, if any.
    fn apply(&mut self, evt: InputEvent) -> Option<GestureEvent> {
        let codes = self.config.codes;

        if evt.event_type == codes.axis_type {
            if evt.code == codes.x {
                if self.x == Some(evt.value) {
                    return None;
                }
                self.x = Some(evt.value);
                return Some(self.moved());
            }
            if evt.code == codes.y {
                if self.y == Some(evt.value) {
                    return None;
                }
                self.y = Some(evt.value);
                return Some(self.moved());
            }
            if evt.code == codes.pressure {
                return self.apply_pressure(evt.value);
            }
            return None;
        }

        if evt.event_type == codes.key_type && evt.value != 0 {
            if evt.code == codes.primary_tool {
                self.select_tool(Tool::Primary);
            } else if evt.code == codes.secondary_tool {
                self.select_tool(Tool::Secondary);
            }
        }
        None
    }

    fn select_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            debug!(?tool, "active tool changed");
            self.tool = tool;
        }
    }

    fn apply_pressure(&mut self, value: i32) -> Option<GestureEvent> {
        self.pressure = value;
        let threshold = self.config.pressure_threshold;

        if !self.in_contact && value > threshold {
            self.in_contact = true;
            debug!(pressure = value, tool = ?self.tool, "contact began");
            return match self.config.function_of(self.tool) {
                ToolFunction::Button(button) => {
                    self.held = Some(button);
                    Some(GestureEvent::ButtonPressed { button })
                }
                ToolFunction::NoOp => None,
            };
        }

        if self.in_contact && value <= threshold {
            self.in_contact = false;
            debug!(pressure = value, "contact ended");
            return self
                .held
                .take()
                .map(|button| GestureEvent::ButtonReleased { button });
        }

        None
    }
}

impl<S: EventStream<Item = InputEvent>> EventStream for EvdevStateMachine<S> {
    type Item = GestureEvent;

    fn next(&mut self) -> bool {
        while self.wrapped.next() {
            let evt = self.wrapped.current();
            if let Some(gesture) = self.apply(evt) {
                trace!(?gesture, "gesture");
                self.current = gesture;
                return true;
            }
        }
        false
    }

    fn current(&self) -> GestureEvent {
        self.current
    }

    fn close(&mut self) -> Result<(), PipelineError> {
        self.wrapped.close()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evdev::codes::{
        ABS_PRESSURE, ABS_TILT_X, ABS_X, ABS_Y, BTN_TOOL_PEN, BTN_TOOL_RUBBER, EV_ABS, EV_KEY,
    };
    use crate::gesture::ProtocolCodes;
    use crate::stream::{collect, VecStream};

    fn abs(code: u16, value: i32) -> InputEvent {
        InputEvent::new(EV_ABS, code, value)
    }

    fn key(code: u16, value: i32) -> InputEvent {
        InputEvent::new(EV_KEY, code, value)
    }

    fn run(events: Vec<InputEvent>, config: GestureConfig) -> Vec<GestureEvent> {
        collect(EvdevStateMachine::new(VecStream::new(events), config)).expect("collect")
    }

    fn pressed(button: MouseButton) -> GestureEvent {
        GestureEvent::ButtonPressed { button }
    }

    fn released(button: MouseButton) -> GestureEvent {
        GestureEvent::ButtonReleased { button }
    }

    #[test]
    fn test_axis_changes_emit_moves_with_running_position() {
        // Arrange
        let events = vec![abs(ABS_X, 100), abs(ABS_Y, 200), abs(ABS_X, 150)];

        // Act
        let out = run(events, GestureConfig::default());

        // Assert
        assert_eq!(
            out,
            vec![
                GestureEvent::PointerMoved { x: 100, y: 0 },
                GestureEvent::PointerMoved { x: 100, y: 200 },
                GestureEvent::PointerMoved { x: 150, y: 200 },
            ]
        );
    }

    #[test]
    fn test_unchanged_axis_value_emits_nothing() {
        let out = run(
            vec![abs(ABS_X, 100), abs(ABS_X, 100), abs(ABS_TILT_X, 30)],
            GestureConfig::default(),
        );
        assert_eq!(out, vec![GestureEvent::PointerMoved { x: 100, y: 0 }]);
    }

    #[test]
    fn test_pressure_up_then_down_emits_press_then_release_only() {
        // Arrange: position is already known, pressure crosses 500 both ways
        let events = vec![
            abs(ABS_X, 10),
            abs(ABS_Y, 10),
            abs(ABS_PRESSURE, 200),
            abs(ABS_PRESSURE, 900),
            abs(ABS_PRESSURE, 950),
            abs(ABS_PRESSURE, 100),
        ];

        // Act
        let out = run(events, GestureConfig::default());

        // Assert
        assert_eq!(out[2..], [pressed(MouseButton::Left), released(MouseButton::Left)]);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_pressure_equal_to_threshold_is_not_contact() {
        let out = run(vec![abs(ABS_PRESSURE, 500)], GestureConfig::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_position_then_contact_in_same_frame_emits_both_in_arrival_order() {
        let out = run(vec![abs(ABS_X, 5), abs(ABS_PRESSURE, 800)], GestureConfig::default());
        assert_eq!(
            out,
            vec![GestureEvent::PointerMoved { x: 5, y: 0 }, pressed(MouseButton::Left)]
        );
    }

    #[test]
    fn test_eraser_contact_uses_secondary_mapping() {
        // Arrange
        let events = vec![key(BTN_TOOL_RUBBER, 1), abs(ABS_PRESSURE, 800), abs(ABS_PRESSURE, 0)];

        // Act
        let out = run(events, GestureConfig::default());

        // Assert
        assert_eq!(out, vec![pressed(MouseButton::Right), released(MouseButton::Right)]);
    }

    #[test]
    fn test_tool_key_release_keeps_last_selected_tool() {
        let events = vec![
            key(BTN_TOOL_RUBBER, 1),
            key(BTN_TOOL_RUBBER, 0),
            abs(ABS_PRESSURE, 800),
        ];
        assert_eq!(run(events, GestureConfig::default()), vec![pressed(MouseButton::Right)]);
    }

    #[test]
    fn test_noop_tool_suppresses_buttons_but_keeps_moves() {
        // Arrange
        let config = GestureConfig {
            primary_tip: ToolFunction::NoOp,
            ..GestureConfig::default()
        };
        let events = vec![
            key(BTN_TOOL_PEN, 1),
            abs(ABS_PRESSURE, 900),
            abs(ABS_X, 42),
            abs(ABS_PRESSURE, 0),
        ];

        // Act
        let out = run(events, config);

        // Assert
        assert_eq!(out, vec![GestureEvent::PointerMoved { x: 42, y: 0 }]);
    }

    #[test]
    fn test_release_matches_button_pressed_even_after_tool_switch() {
        let events = vec![
            abs(ABS_PRESSURE, 900),
            key(BTN_TOOL_RUBBER, 1),
            abs(ABS_PRESSURE, 0),
        ];
        assert_eq!(
            run(events, GestureConfig::default()),
            vec![pressed(MouseButton::Left), released(MouseButton::Left)]
        );
    }

    #[test]
    fn test_custom_protocol_codes_drive_interpretation() {
        // Arrange: a digitizer that reports pressure on code 0x30
        let config = GestureConfig {
            codes: ProtocolCodes {
                pressure: 0x30,
                ..ProtocolCodes::EVDEV
            },
            ..GestureConfig::default()
        };

        // Act
        let out = run(vec![abs(ABS_PRESSURE, 900), abs(0x30, 900)], config);

        // Assert
        assert_eq!(out, vec![pressed(MouseButton::Left)]);
    }

    #[test]
    fn test_state_accessors_track_last_event() {
        let mut sm = EvdevStateMachine::new(
            VecStream::new(vec![abs(ABS_X, 3), abs(ABS_PRESSURE, 700), key(BTN_TOOL_RUBBER, 1)]),
            GestureConfig::default(),
        );
        while sm.next() {}

        assert_eq!(sm.position(), (3, 0));
        assert_eq!(sm.pressure(), 700);
        assert!(sm.in_contact());
        assert_eq!(sm.active_tool(), Tool::Secondary);
    }
}
