//! Byte sources that feed the event decoder.
//!
//! # Why shell out to `ssh`? (for beginners)
//!
//! The tablet exposes its digitizer as `/dev/input/event0` and runs an SSH
//! server.  Running `cat /dev/input/event0` over SSH turns the remote device
//! node into a plain byte stream on our side.  Delegating to the system `ssh`
//! client means key agents, `~/.ssh/config` host aliases, known-hosts
//! checking and password prompts all behave exactly as they do in a terminal.
//!
//! ```text
//! ssh -p 22 [-i key] root@10.11.99.1 cat /dev/input/event0
//!        └─ stdout ──► SshSource ──► EventDecoder
//! ```

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use remouse_core::{ByteSource, ReaderSource};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::infrastructure::config::SshConfig;

const DEFAULT_SSH_PORT: u16 = 22;

/// Error type for opening a byte source.
#[derive(Debug, Error)]
pub enum TransportError {
    /// `--ssh-ip` is not `host` or `host:port`.
    #[error("invalid ssh address {0:?}")]
    InvalidAddress(String),

    /// The child process could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The child process started without a stdout pipe.
    #[error("{0} started without a stdout pipe")]
    NoStdout(String),

    /// A local replay file could not be opened.
    #[error("failed to open {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where and how to run the remote `cat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    pub program: OsString,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub identity: Option<PathBuf>,
    pub event_file: String,
}

impl SshTarget {
    /// Builds a target from the `[ssh]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidAddress`] if the address has an empty
    /// host or a non-numeric port.
    pub fn from_config(cfg: &SshConfig) -> Result<Self, TransportError> {
        let (host, port) = parse_address(&cfg.address)?;
        Ok(Self {
            program: OsString::from("ssh"),
            host,
            port,
            user: cfg.user.clone(),
            identity: cfg.identity.clone(),
            event_file: cfg.event_file.clone(),
        })
    }

    /// The `ssh` invocation that streams the event file to stdout.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-p").arg(self.port.to_string());
        if let Some(identity) = &self.identity {
            cmd.arg("-i").arg(identity);
        }
        cmd.arg(format!("{}@{}", self.user, self.host))
            .arg("cat")
            .arg(&self.event_file);
        cmd
    }
}

/// Splits `host[:port]`, defaulting the port to 22.
fn parse_address(address: &str) -> Result<(String, u16), TransportError> {
    let invalid = || TransportError::InvalidAddress(address.to_string());
    let (host, port) = match address.rsplit_once(':') {
        Some((host, port)) => (host, port.parse().map_err(|_| invalid())?),
        None => (address, DEFAULT_SSH_PORT),
    };
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() {
        return Err(invalid());
    }
    Ok((host.to_string(), port))
}

/// Stdout of a child process as a [`ByteSource`].
///
/// `close()` reaps the child.  If the child already hit end-of-stream its
/// exit status is reported; otherwise it is killed first and the resulting
/// signal exit is not treated as a failure.
pub struct SshSource {
    child: Child,
    stdout: ChildStdout,
    program: String,
    eof: bool,
    closed: bool,
}

impl SshSource {
    /// Spawns `ssh` for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Spawn`] if `ssh` cannot be executed.
    pub fn connect(target: &SshTarget) -> Result<Self, TransportError> {
        info!(host = %target.host, port = target.port, user = %target.user, "connecting to tablet");
        Self::spawn(target.command())
    }

    /// Spawns an arbitrary command and reads its stdout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Spawn`] or [`TransportError::NoStdout`].
    pub fn spawn(mut cmd: Command) -> Result<Self, TransportError> {
        let program = cmd.get_program().to_string_lossy().into_owned();
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| TransportError::Spawn {
                program: program.clone(),
                source,
            })?;
        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(TransportError::NoStdout(program));
            }
        };
        debug!(%program, pid = child.id(), "byte source process started");
        Ok(Self {
            child,
            stdout,
            program,
            eof: false,
            closed: false,
        })
    }
}

impl Read for SshSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.stdout.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.eof = true;
        }
        Ok(n)
    }
}

impl ByteSource for SshSource {
    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if !self.eof {
            match self.child.kill() {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
                Err(e) => return Err(e),
            }
            let status = self.child.wait()?;
            debug!(program = %self.program, %status, "byte source process stopped");
            return Ok(());
        }

        let status = self.child.wait()?;
        if status.success() {
            debug!(program = %self.program, "byte source process exited");
            Ok(())
        } else {
            warn!(program = %self.program, %status, "byte source process failed");
            Err(io::Error::other(format!("{} exited with {status}", self.program)))
        }
    }
}

impl Drop for SshSource {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Opens a recorded event dump for replay.
///
/// # Errors
///
/// Returns [`TransportError::OpenFile`] if the file cannot be opened.
pub fn open_input_file(path: &Path) -> Result<ReaderSource<File>, TransportError> {
    let file = File::open(path).map_err(|source| TransportError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "replaying events from file");
    Ok(ReaderSource::new(file))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
