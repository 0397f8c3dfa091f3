//! Kernel input-event ("evdev") decoding and filtering.
//!
//! - **`event`** – the typed [`InputEvent`] and the 16-byte record codec.
//! - **`codes`** – event type/code constants and their symbolic names.
//! - **`decoder`** – [`EventDecoder`], which turns a [`ByteSource`] into a
//!   stream of events.
//! - **`filter`** – [`SelectingStream`] and [`ExcludingStream`].

pub mod codes;
pub mod decoder;
pub mod event;
pub mod filter;

pub use decoder::{ByteSource, EventDecoder, ReaderSource};
pub use event::{decode_record, encode_record, InputEvent, RECORD_SIZE};
pub use filter::{ExcludingStream, SelectingStream};
