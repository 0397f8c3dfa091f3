//! Application layer use cases for the remouse client.
//!
//! - **`bridge`** – Runs the tablet → pointer pipeline with settings resolved
//!   from configuration and the driver's screen size.
//! - **`debug_events`** – Prints every raw tablet event as a JSON line
//!   instead of moving the pointer.

pub mod bridge;
pub mod debug_events;
