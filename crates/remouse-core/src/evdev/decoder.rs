//! Decodes a blocking byte stream into [`InputEvent`]s, one record per `next()`.

use std::io::{self, Read};

use tracing::{debug, trace, warn};

use crate::error::PipelineError;
use crate::evdev::event::{decode_record, InputEvent, RECORD_SIZE};
use crate::stream::EventStream;

/// A readable, closable byte pipe.
///
/// `close()` is separate from `Drop` so the caller can observe the failure
/// of releasing the source (for example a remote command exiting non-zero).
pub trait ByteSource: Read {
    /// Releases the source.
    ///
    /// # Errors
    ///
    /// Returns the OS error raised while releasing the source.
    fn close(&mut self) -> io::Result<()>;
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Adapts any [`Read`] into a [`ByteSource`] whose `close()` does nothing.
///
/// Files and in-memory buffers are released on drop; there is nothing to
/// report at close time.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for ReaderSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Outcome of trying to fill one record buffer.
enum ReadOutcome {
    Record,
    EndOfStream,
}

/// Pulls fixed-size records from a [`ByteSource`].
///
/// # Lifecycle
///
/// ```text
/// next() == true  ...  next() == false  (exhausted or failed; never true again)
/// close()  → earliest error, else the source's close error, else Ok
/// ```
pub struct EventDecoder<S> {
    source: S,
    current: InputEvent,
    finished: bool,
    err: Option<PipelineError>,
    /// Result of the first `close()`, replayed by later calls.
    closed: Option<Result<(), PipelineError>>,
    decoded: u64,
}

impl<S: ByteSource> EventDecoder<S> {
    /// Creates a decoder that takes ownership of `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: InputEvent::default(),
            finished: false,
            err: None,
            closed: None,
            decoded: 0,
        }
    }

    /// Number of records decoded so far.
    pub fn records_decoded(&self) -> u64 {
        self.decoded
    }

    fn read_record(&mut self, buf: &mut [u8; RECORD_SIZE]) -> Result<ReadOutcome, PipelineError> {
        let mut filled = 0;
        while filled < RECORD_SIZE {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(PipelineError::read(e)),
            }
        }
        match filled {
            0 => Ok(ReadOutcome::EndOfStream),
            RECORD_SIZE => Ok(ReadOutcome::Record),
            received => Err(PipelineError::ShortRecord { received }),
        }
    }
}

impl<S: ByteSource> EventStream for EventDecoder<S> {
    type Item = InputEvent;

    fn next(&mut self) -> bool {
        if self.finished || self.closed.is_some() {
            return false;
        }

        let mut buf = [0u8; RECORD_SIZE];
        match self.read_record(&mut buf) {
            Ok(ReadOutcome::Record) => {
                self.current = decode_record(&buf);
                self.decoded += 1;
                trace!(
                    event_type = self.current.event_type,
                    code = self.current.code,
                    value = self.current.value,
                    "decoded input event"
                );
                true
            }
            Ok(ReadOutcome::EndOfStream) => {
                debug!(records = self.decoded, "event source reached end of stream");
                self.finished = true;
                false
            }
            Err(e) => {
                warn!("event decoder stopped: {e}");
                self.finished = true;
                self.err = Some(e);
                false
            }
        }
    }

    fn current(&self) -> InputEvent {
        self.current
    }

    fn close(&mut self) -> Result<(), PipelineError> {
        if let Some(result) = &self.closed {
            return result.clone();
        }
        self.finished = true;
        let close_result = self.source.close().map_err(PipelineError::close);
        let result = match self.err.take() {
            Some(e) => Err(e),
            None => close_result,
        };
        self.closed = Some(result.clone());
        result
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
