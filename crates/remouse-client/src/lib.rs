//! remouse-client library entry point.
//!
//! Re-exports all public modules so that tests and the binary entry point in
//! `main.rs` share the same module tree.
//!
//! # What does remouse do? (for beginners)
//!
//! A pen tablet running Linux exposes its digitizer as an input device node.
//! The client streams that node over SSH, interprets the pen's position and
//! pressure, and replays them on the host as mouse movement and clicks:
//!
//! 1. Open a byte source: `ssh ... cat /dev/input/event0`, or a local dump.
//! 2. Decode and filter the kernel input events (`remouse_core::evdev`).
//! 3. Turn them into gestures and scale positions to the screen.
//! 4. Inject the result through the OS pointer API (XTest, `SendInput`,
//!    CoreGraphics).

/// Application layer: use cases for the client.
pub mod application;

/// Infrastructure layer: configuration, OS drivers, and transports.
pub mod infrastructure;
