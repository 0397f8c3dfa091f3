//! Domain logic with no I/O: coordinate scaling.
//!
//! Everything in here is a pure function of its configuration, so it can be
//! tested on any machine without a tablet or a display.

/// Orientation-aware tablet→screen coordinate mapping.
///
/// See [`scaler::PositionScaler`] for the main trait.
pub mod scaler;
