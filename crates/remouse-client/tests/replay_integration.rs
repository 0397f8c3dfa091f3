//! Integration tests: replay a recorded event dump through the client's
//! transport, configuration and bridge layers into a recording driver.

use std::path::PathBuf;

use remouse_client::application::bridge::{run_bridge, BridgeSettings};
use remouse_client::application::debug_events::dump_events;
use remouse_client::infrastructure::config::AppConfig;
use remouse_client::infrastructure::driver::mock::{DriverCall, RecordingDriver};
use remouse_client::infrastructure::transport::open_input_file;
use remouse_core::evdev::codes::{
    ABS_PRESSURE, ABS_X, ABS_Y, BTN_TOOL_RUBBER, EV_ABS, EV_KEY, EV_SYN, SYN_REPORT,
};
use remouse_core::evdev::encode_record;
use remouse_core::{EventDecoder, InputEvent, MouseButton, Orientation, PipelineError};

/// A dump file removed when the guard drops.
struct TempDump(PathBuf);

impl TempDump {
    fn new(name: &str, bytes: &[u8]) -> Self {
        let path = std::env::temp_dir().join(format!("remouse-{name}-{}.bin", std::process::id()));
        std::fs::write(&path, bytes).expect("write dump");
        Self(path)
    }
}

impl Drop for TempDump {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn wire(events: &[InputEvent]) -> Vec<u8> {
    events.iter().flat_map(encode_record).collect()
}

fn eraser_stroke() -> Vec<InputEvent> {
    vec![
        InputEvent::new(EV_KEY, BTN_TOOL_RUBBER, 1),
        InputEvent::new(EV_ABS, ABS_X, 250),
        InputEvent::new(EV_ABS, ABS_Y, 500),
        InputEvent::new(EV_SYN, SYN_REPORT, 0),
        InputEvent::new(EV_ABS, ABS_PRESSURE, 1000),
        InputEvent::new(EV_SYN, SYN_REPORT, 0),
        InputEvent::new(EV_ABS, ABS_X, 500),
        InputEvent::new(EV_SYN, SYN_REPORT, 0),
        InputEvent::new(EV_ABS, ABS_PRESSURE, 0),
        InputEvent::new(EV_SYN, SYN_REPORT, 0),
    ]
}

fn config() -> AppConfig {
    AppConfig::from_toml(
        r#"
        [tablet]
        orientation = "left"
        width = 1000
        height = 1000

        [screen]
        width = 1000
        height = 1000
        offset_x = 1000
        "#,
    )
    .expect("parse")
}

#[test]
fn test_replayed_dump_drives_pointer_with_left_orientation_and_offset() {
    // Arrange
    let dump = TempDump::new("stroke", &wire(&eraser_stroke()));
    let cfg = config();
    assert_eq!(cfg.tablet.orientation, Orientation::Left);
    let settings = BridgeSettings::from_config(&cfg, (1, 1));
    let driver = RecordingDriver::new();
    let source = open_input_file(&dump.0).expect("open");

    // Act
    let dispatched = run_bridge(source, &settings, &driver).expect("run");

    // Assert: left orientation inverts both axes, then the offset shifts X
    assert_eq!(dispatched, 5);
    assert_eq!(
        driver.recorded(),
        vec![
            DriverCall::Move { x: 1750, y: 1000 },
            DriverCall::Move { x: 1750, y: 500 },
            DriverCall::Press(MouseButton::Right),
            DriverCall::Drag { x: 1500, y: 500 },
            DriverCall::Release(MouseButton::Right),
        ]
    );
}

#[test]
fn test_truncated_dump_reports_short_record() {
    // Arrange
    let mut bytes = wire(&eraser_stroke());
    bytes.truncate(bytes.len() - 3);
    let dump = TempDump::new("truncated", &bytes);
    let settings = BridgeSettings::from_config(&config(), (1, 1));
    let driver = RecordingDriver::new();

    // Act
    let err = run_bridge(open_input_file(&dump.0).expect("open"), &settings, &driver).unwrap_err();

    // Assert
    assert!(matches!(err, PipelineError::ShortRecord { received: 13 }));
    assert_eq!(driver.recorded().len(), 5);
}

#[test]
fn test_debug_dump_prints_every_record_unfiltered() {
    let dump = TempDump::new("debug", &wire(&eraser_stroke()));
    let mut out = Vec::new();

    let count = dump_events(EventDecoder::new(open_input_file(&dump.0).expect("open")), &mut out)
        .expect("dump");

    assert_eq!(count, 10);
    let text = String::from_utf8(out).expect("utf8");
    assert_eq!(text.lines().count(), 10);
    assert!(text.lines().next().unwrap().contains(r#""eventCodeName":"BTN_TOOL_RUBBER""#));
}
