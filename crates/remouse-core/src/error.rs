//! Error types shared by every pipeline stage.
//!
//! # Why is `PipelineError` `Clone`? (for beginners)
//!
//! Each stage remembers the *first* error it hit and hands it back from every
//! later `close()` call.  Handing the same value out more than once requires
//! `Clone`, but [`std::io::Error`] is not cloneable, so I/O failures are held
//! behind an [`Arc`] instead.

use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Size in bytes of one kernel input-event record on the wire.
pub const RECORD_SIZE: usize = 16;

/// Errors that terminate a pipeline.
///
/// Clean end-of-stream is *not* an error: the decoder simply stops yielding
/// events and `close()` returns `Ok(())`.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// The byte source ended part-way through a record.
    #[error("short event record: expected {RECORD_SIZE} bytes, got {received}")]
    ShortRecord { received: usize },

    /// Reading from the byte source failed.
    #[error("event source read failed: {0}")]
    Source(#[source] Arc<io::Error>),

    /// Releasing the byte source failed.
    #[error("closing event source failed: {0}")]
    Close(#[source] Arc<io::Error>),

    /// The pointing-device driver rejected an operation.
    #[error("pointer driver failed: {0}")]
    Driver(#[from] DriverError),
}

impl PipelineError {
    pub(crate) fn read(err: io::Error) -> Self {
        Self::Source(Arc::new(err))
    }

    pub(crate) fn close(err: io::Error) -> Self {
        Self::Close(Arc::new(err))
    }
}

/// Error type for pointing-device driver operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DriverError {
    /// The OS input-injection call failed.
    #[error("platform error: {0}")]
    Platform(String),

    /// The driver could not reach the display (no session, missing permission).
    #[error("pointer device unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_record_message_names_both_sizes() {
        let err = PipelineError::ShortRecord { received: 7 };
        assert_eq!(err.to_string(), "short event record: expected 16 bytes, got 7");
    }

    #[test]
    fn test_driver_error_converts_into_pipeline_error() {
        // Arrange
        let driver = DriverError::Platform("XTest refused".to_string());

        // Act
        let err: PipelineError = driver.clone().into();

        // Assert
        assert!(matches!(err, PipelineError::Driver(ref d) if *d == driver));
    }

    #[test]
    fn test_cloned_source_error_shares_the_io_error() {
        let err = PipelineError::read(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
