//! remouse: use a pen tablet as the host's mouse.
//!
//! # Usage
//!
//! ```text
//! remouse [OPTIONS]
//!
//! Options:
//!   --config <PATH>            TOML config file [default: ~/.config/remouse/config.toml]
//!   --orientation <ORIENT>     right | left | vertical [default: right]
//!   --pen <FUNC>               left | right | center | none [default: left]
//!   --eraser <FUNC>            left | right | center | none [default: right]
//!   --ssh-ip <HOST:PORT>       Tablet SSH address [default: 10.11.99.1:22]
//!   --input-file <PATH>        Replay a recorded event dump instead of SSH
//!   --debug-events             Print raw events as JSON instead of moving the mouse
//!   ...                        (run with --help for the full list)
//! ```
//!
//! # Precedence
//!
//! Built-in defaults, then the config file, then environment variables, then
//! command-line flags.  Unset screen dimensions are taken from the display.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  ├─ load_config() + Cli::apply_to()   -- merged AppConfig
//!  ├─ open_source()                     -- ssh child or local file
//!  ├─ --debug-events: dump_events()     -- JSON lines on stdout
//!  └─ otherwise:
//!       open_native_driver()            -- XTest / SendInput / CoreGraphics
//!       run_bridge()                    -- decode → gestures → driver
//! ```

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use remouse_core::{ByteSource, EventDecoder, Orientation, ToolFunction};
use tracing::info;
use tracing_subscriber::EnvFilter;

use remouse_client::application::bridge::{detect_screen_size, run_bridge, BridgeSettings};
use remouse_client::application::debug_events::dump_events;
use remouse_client::infrastructure::config::{load_config, AppConfig};
use remouse_client::infrastructure::driver::open_native_driver;
use remouse_client::infrastructure::transport::{open_input_file, SshSource, SshTarget};

/// Printed once the byte source is open and events are flowing.
const READY_BANNER: &str = "remouse connected and running.";

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Use a pen tablet over SSH as this computer's mouse.
///
/// Every option is optional: anything left unset falls back to the config
/// file, then to the built-in default.
#[derive(Debug, Parser)]
#[command(name = "remouse", version, about)]
struct Cli {
    /// TOML config file to load instead of the default location.
    #[arg(long, env = "REMOUSE_CONFIG")]
    config: Option<PathBuf>,

    /// How the tablet is held relative to the screen.
    #[arg(long)]
    orientation: Option<Orientation>,

    /// Mouse button pressed by the pen tip.
    #[arg(long)]
    pen: Option<ToolFunction>,

    /// Mouse button pressed by the eraser end.
    #[arg(long)]
    eraser: Option<ToolFunction>,

    /// Digitizer width in tablet units.  Probably don't change this.
    #[arg(long)]
    tablet_width: Option<u32>,

    /// Digitizer height in tablet units.  Probably don't change this.
    #[arg(long)]
    tablet_height: Option<u32>,

    /// Target screen width in pixels [default: detected from the display].
    #[arg(long)]
    screen_width: Option<u32>,

    /// Target screen height in pixels [default: detected from the display].
    #[arg(long)]
    screen_height: Option<u32>,

    /// Horizontal offset of the target monitor (multi-monitor setups).
    #[arg(long, allow_negative_numbers = true)]
    screen_offset_x: Option<i32>,

    /// Vertical offset of the target monitor (multi-monitor setups).
    #[arg(long, allow_negative_numbers = true)]
    screen_offset_y: Option<i32>,

    /// Pen pressure above which the tip counts as a click.
    #[arg(long)]
    pressure_threshold: Option<i32>,

    /// Send plain moves instead of drag events while a button is held.
    #[arg(long)]
    disable_drag_event: bool,

    /// Host and port of the tablet's SSH server.
    #[arg(long, env = "REMOUSE_SSH_IP")]
    ssh_ip: Option<String>,

    /// SSH user on the tablet.
    #[arg(long, env = "REMOUSE_SSH_USER")]
    ssh_user: Option<String>,

    /// Private key passed to `ssh -i`.
    #[arg(long, env = "REMOUSE_SSH_IDENTITY")]
    ssh_identity: Option<PathBuf>,

    /// Device node on the tablet to stream events from.
    #[arg(long)]
    event_file: Option<String>,

    /// Replay events from a local file instead of connecting over SSH.
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Print raw tablet events as JSON lines instead of moving the mouse.
    #[arg(long)]
    debug_events: bool,

    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Overlays every flag that was given onto `cfg`.
    fn apply_to(&self, cfg: &mut AppConfig) {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }

        set(&mut cfg.tablet.orientation, &self.orientation);
        set(&mut cfg.tablet.width, &self.tablet_width);
        set(&mut cfg.tablet.height, &self.tablet_height);
        set(&mut cfg.tablet.pressure_threshold, &self.pressure_threshold);
        set(&mut cfg.pen.tip, &self.pen);
        set(&mut cfg.pen.eraser, &self.eraser);
        if self.screen_width.is_some() {
            cfg.screen.width = self.screen_width;
        }
        if self.screen_height.is_some() {
            cfg.screen.height = self.screen_height;
        }
        set(&mut cfg.screen.offset_x, &self.screen_offset_x);
        set(&mut cfg.screen.offset_y, &self.screen_offset_y);
        if self.disable_drag_event {
            cfg.pen.drag_events = false;
        }
        set(&mut cfg.ssh.address, &self.ssh_ip);
        set(&mut cfg.ssh.user, &self.ssh_user);
        if self.ssh_identity.is_some() {
            cfg.ssh.identity = self.ssh_identity.clone();
        }
        set(&mut cfg.ssh.event_file, &self.event_file);
        set(&mut cfg.app.log_level, &self.log_level);
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Opens the replay file when given, otherwise the SSH stream.
fn open_source(cfg: &AppConfig, input_file: Option<&Path>) -> anyhow::Result<Box<dyn ByteSource>> {
    if let Some(path) = input_file {
        return Ok(Box::new(open_input_file(path)?));
    }
    let target = SshTarget::from_config(&cfg.ssh)?;
    let source = SshSource::connect(&target).context("connecting to the tablet")?;
    Ok(Box::new(source))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = load_config(cli.config.as_deref()).context("loading configuration")?;
    cli.apply_to(&mut cfg);
    cfg.validate()?;

    init_tracing(&cfg.app.log_level);
    info!("remouse starting");

    if cli.debug_events {
        let source = open_source(&cfg, cli.input_file.as_deref())?;
        println!("{READY_BANNER}");
        let stdout = io::stdout();
        let count = dump_events(EventDecoder::new(source), &mut stdout.lock())?;
        info!(count, "event dump finished");
        return Ok(());
    }

    let driver = open_native_driver().context("opening the pointer driver")?;
    let settings = BridgeSettings::from_config(&cfg, detect_screen_size(driver.as_ref()));
    let source = open_source(&cfg, cli.input_file.as_deref())?;

    println!("{READY_BANNER}");
    run_bridge(source, &settings, driver.as_ref()).context("tablet pipeline failed")?;

    info!("remouse stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
