//! Infrastructure layer for the client application.
//!
//! Contains OS-facing adapters.  This layer may depend on `remouse_core`, but
//! the `application` layer only sees it through core traits
//! (`ByteSource`, `PointerDriver`) and the configuration types.
//!
//! # Sub-modules
//!
//! - **`config`** – TOML configuration file with serde defaults.
//! - **`driver`** – OS-specific `PointerDriver` implementations, selected at
//!   compile time, plus a recording driver for tests.
//! - **`transport`** – Byte sources: the `ssh` child process and local
//!   replay files.

pub mod config;
pub mod driver;
pub mod transport;
