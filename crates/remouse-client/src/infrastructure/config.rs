//! TOML configuration file for the remouse client.
//!
//! Looked up at `--config <path>` when given, else at
//! `$XDG_CONFIG_HOME/remouse/config.toml` (or `~/.config/remouse/config.toml`).
//! A missing file is not an error: every field has a default, and command-line
//! flags override whatever the file says.
//!
//! ```toml
//! [tablet]
//! orientation = "vertical"
//! pressure_threshold = 800
//!
//! [screen]
//! offset_x = 1920
//!
//! [pen]
//! eraser = "none"
//!
//! [ssh]
//! address = "192.168.1.42:22"
//! identity = "/home/me/.ssh/tablet_ed25519"
//! ```
//!
//! # Serde default values
//!
//! Each section is `#[serde(default)]`, so a file may contain any subset of
//! sections and fields.  The section `Default` impls are the single source
//! of the built-in values.

use std::path::{Path, PathBuf};

use remouse_core::gesture::DEFAULT_PRESSURE_THRESHOLD;
use remouse_core::{
    GestureConfig, MouseButton, Orientation, ScreenGeometry, ToolFunction, DEFAULT_TABLET_HEIGHT,
    DEFAULT_TABLET_WIDTH,
};
use serde::Deserialize;
use thiserror::Error;

/// Screen size assumed when neither the user nor the display says otherwise.
pub const FALLBACK_SCREEN_SIZE: (u32, u32) = (1920, 1080);

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub tablet: TabletConfig,
    pub screen: ScreenConfig,
    pub pen: PenConfig,
    pub ssh: SshConfig,
    pub app: GeneralConfig,
}

/// Digitizer geometry and contact sensitivity.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TabletConfig {
    pub orientation: Orientation,
    pub width: u32,
    pub height: u32,
    /// Pressure above which the pen counts as touching.
    pub pressure_threshold: i32,
}

impl Default for TabletConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Right,
            width: DEFAULT_TABLET_WIDTH,
            height: DEFAULT_TABLET_HEIGHT,
            pressure_threshold: DEFAULT_PRESSURE_THRESHOLD,
        }
    }
}

/// Target screen area.  `None` sizes are asked from the pointer driver.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub offset_x: i32,
    pub offset_y: i32,
}

/// What each end of the pen does.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PenConfig {
    pub tip: ToolFunction,
    pub eraser: ToolFunction,
    /// Deliver moves made while a button is held as drags.
    pub drag_events: bool,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            tip: ToolFunction::Button(MouseButton::Left),
            eraser: ToolFunction::Button(MouseButton::Right),
            drag_events: true,
        }
    }
}

/// How to reach the tablet.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SshConfig {
    /// `host:port` of the tablet's SSH server.
    pub address: String,
    pub user: String,
    /// Private key handed to `ssh -i`.  Agent and default keys are used otherwise.
    pub identity: Option<PathBuf>,
    /// Device node streamed from the tablet.
    pub event_file: String,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            address: "10.11.99.1:22".to_string(),
            user: "root".to_string(),
            identity: None,
            event_file: "/dev/input/event0".to_string(),
        }
    }
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, unknown sections, or
    /// unrecognised orientation/tool names.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Checks ranges that the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [
            ("tablet width", Some(self.tablet.width)),
            ("tablet height", Some(self.tablet.height)),
            ("screen width", self.screen.width),
            ("screen height", self.screen.height),
        ];
        for (name, value) in dims {
            if value == Some(0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        if self.tablet.width > i32::MAX as u32 || self.tablet.height > i32::MAX as u32 {
            return Err(ConfigError::Invalid("tablet size out of range".to_string()));
        }
        Ok(())
    }

    /// Resolves the scaler geometry, filling unset screen sizes from `detected`.
    pub fn geometry(&self, detected: (u32, u32)) -> ScreenGeometry {
        ScreenGeometry {
            tablet_width: self.tablet.width,
            tablet_height: self.tablet.height,
            screen_width: self.screen.width.unwrap_or(detected.0),
            screen_height: self.screen.height.unwrap_or(detected.1),
        }
    }

    /// Builds the gesture policy for the state machine.
    pub fn gesture(&self) -> GestureConfig {
        GestureConfig {
            pressure_threshold: self.tablet.pressure_threshold,
            primary_tip: self.pen.tip,
            secondary_tip: self.pen.eraser,
            ..GestureConfig::default()
        }
    }
}

/// Resolves the default config file path, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("remouse").join("config.toml"))
}

/// Loads the config file at `path`, or the default location when `None`.
///
/// An explicitly named file must exist; a missing default file yields
/// `AppConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors and
/// [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(AppConfig::default()),
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => AppConfig::from_toml(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            Ok(AppConfig::default())
        }
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
