//! Use case: drive the host pointer from a tablet byte stream.
//!
//! Resolves the scaler and gesture policy from the loaded configuration, then
//! runs the core pipeline until the stream ends or the driver fails.

use remouse_core::{
    gesture_pipeline, ByteSource, GestureConfig, OffsetPositionScaler, Orientation, PipelineError,
    PointerDriver, PositionScaler, Runtime, ScreenGeometry,
};
use tracing::{info, warn};

use crate::infrastructure::config::{AppConfig, FALLBACK_SCREEN_SIZE};

/// Everything the pipeline needs, with screen size already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeSettings {
    pub orientation: Orientation,
    pub geometry: ScreenGeometry,
    pub offset_x: i32,
    pub offset_y: i32,
    pub gesture: GestureConfig,
    pub drag: bool,
}

impl BridgeSettings {
    /// `detected` fills in screen dimensions the config leaves unset.
    pub fn from_config(cfg: &AppConfig, detected: (u32, u32)) -> Self {
        Self {
            orientation: cfg.tablet.orientation,
            geometry: cfg.geometry(detected),
            offset_x: cfg.screen.offset_x,
            offset_y: cfg.screen.offset_y,
            gesture: cfg.gesture(),
            drag: cfg.pen.drag_events,
        }
    }

    /// Orientation scaler wrapped in the configured monitor offset.
    pub fn scaler(&self) -> OffsetPositionScaler<Box<dyn PositionScaler>> {
        OffsetPositionScaler {
            wrapped: self.orientation.scaler(self.geometry),
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        }
    }
}

/// Asks the driver for the screen size, falling back to 1920x1080.
pub fn detect_screen_size<D: PointerDriver + ?Sized>(driver: &D) -> (u32, u32) {
    match driver.screen_size() {
        Ok(size) => size,
        Err(e) => {
            warn!(
                "could not query screen size ({e}); assuming {}x{}",
                FALLBACK_SCREEN_SIZE.0, FALLBACK_SCREEN_SIZE.1
            );
            FALLBACK_SCREEN_SIZE
        }
    }
}

/// Runs the pipeline over `source` until it ends, then closes it.
///
/// Returns the number of gestures delivered to the driver.
///
/// # Errors
///
/// Returns the first decode, source or driver error.
pub fn run_bridge<B, D>(source: B, settings: &BridgeSettings, driver: &D) -> Result<u64, PipelineError>
where
    B: ByteSource + 'static,
    D: PointerDriver + ?Sized,
{
    let scaler = settings.scaler();
    let stream = gesture_pipeline(source, settings.gesture, settings.drag);
    let mut runtime = Runtime::new(stream, &scaler, driver);

    info!(
        orientation = %settings.orientation,
        screen_width = settings.geometry.screen_width,
        screen_height = settings.geometry.screen_height,
        drag = settings.drag,
        "pointer bridge running"
    );
    runtime.run();
    let dispatched = runtime.dispatched();
    runtime.close()?;
    info!(dispatched, "tablet stream ended");
    Ok(dispatched)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use mockall::{mock, predicate::eq};
    use remouse_core::evdev::codes::{ABS_PRESSURE, ABS_X, ABS_Y, EV_ABS};
    use remouse_core::evdev::encode_record;
    use remouse_core::{DriverError, InputEvent, MouseButton, ReaderSource, ToolFunction};

    use super::*;
    use crate::infrastructure::driver::mock::{DriverCall, RecordingDriver};

    mock! {
        Driver {}
        impl PointerDriver for Driver {
            fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError>;
            fn drag_mouse(&self, x: i32, y: i32) -> Result<(), DriverError>;
            fn press(&self, button: MouseButton) -> Result<(), DriverError>;
            fn release(&self, button: MouseButton) -> Result<(), DriverError>;
            fn screen_size(&self) -> Result<(u32, u32), DriverError>;
        }
    }

    fn source(events: &[InputEvent]) -> ReaderSource<Cursor<Vec<u8>>> {
        ReaderSource::new(Cursor::new(events.iter().flat_map(encode_record).collect()))
    }

    fn small_tablet() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.tablet.width = 1000;
        cfg.tablet.height = 1000;
        cfg
    }

    #[test]
    fn test_detect_screen_size_uses_driver_answer() {
        let mut driver = MockDriver::new();
        driver.expect_screen_size().returning(|| Ok((2560, 1440)));
        assert_eq!(detect_screen_size(&driver), (2560, 1440));
    }

    #[test]
    fn test_detect_screen_size_falls_back_on_error() {
        let mut driver = MockDriver::new();
        driver
            .expect_screen_size()
            .returning(|| Err(DriverError::Unavailable("no display".into())));
        assert_eq!(detect_screen_size(&driver), (1920, 1080));
    }

    #[test]
    fn test_settings_take_detected_size_only_where_unset() {
        // Arrange
        let mut cfg = small_tablet();
        cfg.screen.width = Some(800);

        // Act
        let s = BridgeSettings::from_config(&cfg, (1920, 1080));

        // Assert
        assert_eq!(s.geometry.screen_width, 800);
        assert_eq!(s.geometry.screen_height, 1080);
        assert!(s.drag);
    }

    #[test]
    fn test_scaler_applies_offset_after_orientation() {
        let mut cfg = small_tablet();
        cfg.screen.offset_x = -1000;
        let s = BridgeSettings::from_config(&cfg, (1000, 1000));

        assert_eq!(s.scaler().scale_position(500, 250), (-500, 250));
    }

    #[test]
    fn test_run_bridge_scales_and_dispatches_stroke() {
        // Arrange: screen is twice the tablet size
        let cfg = small_tablet();
        let settings = BridgeSettings::from_config(&cfg, (2000, 2000));
        let mut driver = MockDriver::new();
        driver.expect_move_mouse().with(eq(200), eq(0)).times(1).returning(|_, _| Ok(()));
        driver.expect_move_mouse().with(eq(200), eq(400)).times(1).returning(|_, _| Ok(()));
        driver.expect_press().with(eq(MouseButton::Left)).times(1).returning(|_| Ok(()));
        driver.expect_drag_mouse().with(eq(300), eq(400)).times(1).returning(|_, _| Ok(()));
        driver.expect_release().with(eq(MouseButton::Left)).times(1).returning(|_| Ok(()));
        let events = [
            InputEvent::new(EV_ABS, ABS_X, 100),
            InputEvent::new(EV_ABS, ABS_Y, 200),
            InputEvent::new(EV_ABS, ABS_PRESSURE, 900),
            InputEvent::new(EV_ABS, ABS_X, 150),
            InputEvent::new(EV_ABS, ABS_PRESSURE, 0),
        ];

        // Act
        let dispatched = run_bridge(source(&events), &settings, &driver).expect("run");

        // Assert
        assert_eq!(dispatched, 5);
    }

    #[test]
    fn test_run_bridge_without_drag_sends_moves() {
        // Arrange
        let mut cfg = small_tablet();
        cfg.pen.drag_events = false;
        cfg.pen.tip = ToolFunction::Button(MouseButton::Right);
        let settings = BridgeSettings::from_config(&cfg, (1000, 1000));
        let driver = RecordingDriver::new();
        let events = [
            InputEvent::new(EV_ABS, ABS_PRESSURE, 900),
            InputEvent::new(EV_ABS, ABS_X, 10),
        ];

        // Act
        run_bridge(source(&events), &settings, &driver).expect("run");

        // Assert
        assert_eq!(
            driver.recorded(),
            vec![DriverCall::Press(MouseButton::Right), DriverCall::Move { x: 10, y: 0 }]
        );
    }

    #[test]
    fn test_run_bridge_surfaces_driver_failure() {
        let settings = BridgeSettings::from_config(&small_tablet(), (1000, 1000));
        let driver = RecordingDriver {
            should_fail: true,
            ..RecordingDriver::default()
        };

        let err = run_bridge(source(&[InputEvent::new(EV_ABS, ABS_X, 1)]), &settings, &driver)
            .unwrap_err();

        assert!(matches!(err, PipelineError::Driver(_)));
    }
}
