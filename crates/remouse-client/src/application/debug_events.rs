//! Use case: dump raw tablet events as JSON lines instead of moving the mouse.
//!
//! Every decoded record is printed, unfiltered, one object per line:
//!
//! ```text
//! {"eventType":3,"eventTypeName":"EV_ABS","eventCode":24,"eventCodeName":"ABS_PRESSURE","eventValue":812}
//! ```

use std::io::Write;

use remouse_core::evdev::codes::{code_name, type_name};
use remouse_core::{EventStream, InputEvent, PipelineError};
use serde::Serialize;
use thiserror::Error;

/// Error type for the event dump.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Writing a line to the output failed.
    #[error("failed to write event dump: {0}")]
    Write(#[from] std::io::Error),

    /// Serializing a record failed.
    #[error("failed to encode event as JSON: {0}")]
    Encode(#[from] serde_json::Error),

    /// The event stream reported an error on close.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// One line of the dump.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DebugRecord {
    pub event_type: u16,
    pub event_type_name: &'static str,
    pub event_code: u16,
    pub event_code_name: &'static str,
    pub event_value: i32,
}

impl From<InputEvent> for DebugRecord {
    fn from(evt: InputEvent) -> Self {
        Self {
            event_type: evt.event_type,
            event_type_name: type_name(evt.event_type),
            event_code: evt.code,
            event_code_name: code_name(evt.event_type, evt.code),
            event_value: evt.value,
        }
    }
}

/// Writes every event of `stream` to `out`, then closes the stream.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`DumpError`] on output or stream failure.  The stream is closed
/// even when writing fails.
pub fn dump_events<S, W>(mut stream: S, out: &mut W) -> Result<u64, DumpError>
where
    S: EventStream<Item = InputEvent>,
    W: Write,
{
    let written = write_all(&mut stream, out);
    let closed = stream.close();
    let count = written?;
    closed?;
    Ok(count)
}

fn write_all<S, W>(stream: &mut S, out: &mut W) -> Result<u64, DumpError>
where
    S: EventStream<Item = InputEvent>,
    W: Write,
{
    let mut count = 0;
    while stream.next() {
        serde_json::to_writer(&mut *out, &DebugRecord::from(stream.current()))?;
        out.write_all(b"\n")?;
        out.flush()?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use remouse_core::evdev::codes::{ABS_PRESSURE, EV_ABS, EV_SYN, SYN_REPORT};
    use remouse_core::stream::VecStream;

    #[test]
    fn test_dump_writes_one_json_object_per_event() {
        // Arrange
        let events = vec![
            InputEvent::new(EV_ABS, ABS_PRESSURE, 812),
            InputEvent::new(EV_SYN, SYN_REPORT, 0),
        ];
        let mut out = Vec::new();

        // Act
        let n = dump_events(VecStream::new(events), &mut out).expect("dump");

        // Assert
        assert_eq!(n, 2);
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            r#"{"eventType":3,"eventTypeName":"EV_ABS","eventCode":24,"eventCodeName":"ABS_PRESSURE","eventValue":812}"#
        );
        assert_eq!(
            lines[1],
            r#"{"eventType":0,"eventTypeName":"EV_SYN","eventCode":0,"eventCodeName":"SYN_REPORT","eventValue":0}"#
        );
    }

    #[test]
    fn test_unknown_codes_are_named_unknown() {
        let record = DebugRecord::from(InputEvent::new(0x7e, 0x99, -1));
        assert_eq!(record.event_type_name, "UNKNOWN");
        assert_eq!(record.event_code_name, "UNKNOWN");
        assert_eq!(record.event_value, -1);
    }

    #[test]
    fn test_stream_is_closed_after_dump() {
        let mut stream = VecStream::new(vec![InputEvent::new(EV_ABS, 0, 1)]);
        let mut out = Vec::new();

        dump_events(&mut stream, &mut out).expect("dump");

        assert!(stream.is_closed());
    }
}
