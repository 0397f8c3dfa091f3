//! # remouse-core
//!
//! Turns a pen tablet's raw kernel input-event stream into mouse actions.
//!
//! This crate holds everything that does not touch the OS: record decoding,
//! event filtering, the gesture state machines, coordinate scaling, and the
//! runtime loop that feeds a [`PointerDriver`].  Platform drivers, the SSH
//! transport and the CLI live in `remouse-client`.
//!
//! # Architecture overview (for beginners)
//!
//! The tablet streams 16-byte `input_event` records.  Each pipeline stage is
//! an [`EventStream`] that owns the stage below it:
//!
//! - **`evdev`** – decodes records into [`InputEvent`]s and keeps only the
//!   event types a pointer cares about.
//! - **`gesture`** – [`EvdevStateMachine`] turns axis and pressure changes
//!   into moves, presses and releases; [`DraggingStateMachine`] optionally
//!   rewrites moves made while a button is held into drags.
//! - **`domain`** – rotates and scales tablet coordinates onto the screen.
//! - **`runtime`** – pulls gestures one at a time and calls the driver.

pub mod domain;
pub mod error;
pub mod evdev;
pub mod gesture;
pub mod runtime;
pub mod stream;

pub use domain::scaler::{
    OffsetPositionScaler, Orientation, PositionScaler, ScreenGeometry, DEFAULT_TABLET_HEIGHT,
    DEFAULT_TABLET_WIDTH,
};
pub use error::{DriverError, PipelineError};
pub use evdev::{ByteSource, EventDecoder, ExcludingStream, InputEvent, ReaderSource, SelectingStream};
pub use gesture::{
    DraggingStateMachine, EvdevStateMachine, GestureConfig, GestureEvent, MouseButton, ToolFunction,
};
pub use runtime::{PointerDriver, Runtime, RuntimeState};
pub use stream::EventStream;

/// A type-erased gesture stream, as returned by [`gesture_pipeline`].
pub type GestureStream = Box<dyn EventStream<Item = GestureEvent>>;

/// Builds the standard decoder → filter → state machine chain over `source`.
///
/// Only pointer-relevant event types reach the state machine.  With `drag`
/// set, moves made while a button is held are delivered as drags.
pub fn gesture_pipeline<B>(source: B, config: GestureConfig, drag: bool) -> GestureStream
where
    B: ByteSource + 'static,
{
    let decoder = EventDecoder::new(source);
    let filtered = SelectingStream::new(decoder, evdev::codes::POINTER_EVENT_TYPES);
    let machine = EvdevStateMachine::new(filtered, config);
    if drag {
        Box::new(DraggingStateMachine::new(machine))
    } else {
        Box::new(machine)
    }
}
