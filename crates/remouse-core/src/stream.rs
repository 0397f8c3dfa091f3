//! The pull-one-item capability shared by every pipeline stage.
//!
//! # How the pipeline is wired (for beginners)
//!
//! Every stage (the decoder, the filters and both gesture state machines) is
//! an [`EventStream`].  A stage that transforms another stage *owns* it:
//!
//! ```text
//! DraggingStateMachine
//!  └─ EvdevStateMachine
//!      └─ SelectingStream
//!          └─ EventDecoder
//!              └─ ByteSource (ssh stdout, file, ...)
//! ```
//!
//! Calling `next()` on the outermost stage pulls just enough bytes from the
//! bottom to produce one item.  Calling `close()` on it closes the whole chain
//! top-down, because each stage proxies `close()` to the stage it owns.
//!
//! The trait deliberately uses the `next()/current()/close()` shape rather
//! than [`Iterator`]: a stream must report a terminal error through `close()`
//! after it stops yielding items, which `Iterator` cannot express.

use crate::error::PipelineError;

/// A pull-based, single-pass producer of items.
pub trait EventStream {
    /// The item type yielded by [`EventStream::current`].
    type Item: Copy;

    /// Advances to the next item.
    ///
    /// Returns `false` once the stream is exhausted or has failed.  A stream
    /// that has returned `false` keeps returning `false`.
    fn next(&mut self) -> bool;

    /// Returns the item produced by the most recent successful `next()`.
    fn current(&self) -> Self::Item;

    /// Releases the stream and everything it owns.
    ///
    /// # Errors
    ///
    /// Returns the first error the stream encountered while producing items,
    /// or the error raised while releasing the underlying resource.
    fn close(&mut self) -> Result<(), PipelineError>;
}

impl<S: EventStream + ?Sized> EventStream for Box<S> {
    type Item = S::Item;

    fn next(&mut self) -> bool {
        (**self).next()
    }

    fn current(&self) -> Self::Item {
        (**self).current()
    }

    fn close(&mut self) -> Result<(), PipelineError> {
        (**self).close()
    }
}

impl<S: EventStream + ?Sized> EventStream for &mut S {
    type Item = S::Item;

    fn next(&mut self) -> bool {
        (**self).next()
    }

    fn current(&self) -> Self::Item {
        (**self).current()
    }

    fn close(&mut self) -> Result<(), PipelineError> {
        (**self).close()
    }
}

/// Drains a stream into a `Vec`, then closes it.
///
/// Convenience for tests and small replays.
///
/// # Errors
///
/// Returns the stream's `close()` error.
pub fn collect<S: EventStream>(mut stream: S) -> Result<Vec<S::Item>, PipelineError> {
    let mut items = Vec::new();
    while stream.next() {
        items.push(stream.current());
    }
    stream.close()?;
    Ok(items)
}

/// An in-memory stream over a fixed list of items.
///
/// Used to feed filters and state machines in tests without going through the
/// binary decoder.
#[derive(Debug, Clone)]
pub struct VecStream<T> {
    items: std::vec::IntoIter<T>,
    current: Option<T>,
    closed: bool,
}

impl<T> VecStream<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter(),
            current: None,
            closed: false,
        }
    }

    /// Returns `true` once `close()` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<T: Copy + Default> EventStream for VecStream<T> {
    type Item = T;

    fn next(&mut self) -> bool {
        self.current = self.items.next();
        self.current.is_some()
    }

    fn current(&self) -> T {
        self.current.unwrap_or_default()
    }

    fn close(&mut self) -> Result<(), PipelineError> {
        self.closed = true;
        Ok(())
    }
}
