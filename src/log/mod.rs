//! Lazily opened, timestamped log channel.
//!
//! Every entry is one line:
//!
//! ```text
//! [<severity>] [<24-char timestamp>]: <message>
//! ```
//!
//! A [`LogSink`] owns at most one open file. Nothing it does is reported as an
//! error to the caller: writing to a closed sink is a no-op, and open or write
//! failures go to the sink's fallback stream and to [`LogSink::last_failure`].
//!
//! The free functions in this module act on the calling thread's sink.
//!
//! # Examples
//!
//! ```
//! use errno_rail::{log, log_trace, log_warning};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("app.log");
//!
//! log::open(&path, true);
//! log_trace!("n={}", 3);
//! log_warning!("careful");
//! log::close();
//!
//! let text = std::fs::read_to_string(&path).unwrap();
//! assert_eq!(text.lines().count(), 2);
//! ```
mod config;
mod error;
mod timestamp;

pub use config::{Fallback, OpenMode, SinkConfig};
pub use error::SinkError;
pub use timestamp::Timestamp;

use core::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::register::Register;
use crate::tls;
use crate::types::{CallSite, LineBuf, Severity};

#[derive(Debug)]
struct Channel {
    file: File,
    path: PathBuf,
}

/// A log destination with `Closed` and `Open(file, path)` states.
#[derive(Debug, Default)]
pub struct LogSink {
    channel: Option<Channel>,
    fallback: Fallback,
    last_failure: Option<SinkError>,
}

impl LogSink {
    /// Creates a closed sink.
    #[inline]
    pub const fn new() -> Self {
        Self { channel: None, fallback: Fallback::Stderr, last_failure: None }
    }

    /// Opens `path`, truncating it when `flush_existing` is set and appending
    /// otherwise. Any channel already open is closed first.
    ///
    /// On failure the sink stays closed.
    #[inline]
    pub fn open<P: AsRef<Path>>(&mut self, path: P, flush_existing: bool) {
        let config = SinkConfig::new(path.as_ref(), OpenMode::from_flush(flush_existing))
            .with_fallback(self.fallback);
        self.open_with(&config);
    }

    /// Opens the channel described by `config`.
    pub fn open_with(&mut self, config: &SinkConfig) {
        self.close();
        self.fallback = config.fallback;

        if config.path.as_os_str().is_empty() {
            self.fail(SinkError::EmptyPath);
            return;
        }

        match config.mode.options().open(&config.path) {
            Ok(file) => {
                tracing::debug!(path = %config.path.display(), mode = ?config.mode, "log channel opened");
                self.channel = Some(Channel { file, path: config.path.clone() });
            }
            Err(source) => self.fail(SinkError::Open { path: config.path.clone(), source }),
        }
    }

    /// Closes the channel. Closing a closed sink does nothing.
    #[inline]
    pub fn close(&mut self) {
        if let Some(channel) = self.channel.take() {
            tracing::debug!(path = %channel.path.display(), "log channel closed");
        }
    }

    /// Whether a channel is open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.channel.is_some()
    }

    /// Path of the open channel.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.channel.as_ref().map(|channel| channel.path.as_path())
    }

    /// The most recent open or write failure, if any.
    #[inline]
    pub fn last_failure(&self) -> Option<&SinkError> {
        self.last_failure.as_ref()
    }

    /// Removes and returns the last failure.
    #[inline]
    pub fn take_failure(&mut self) -> Option<SinkError> {
        self.last_failure.take()
    }

    /// Writes one entry. Does nothing while the sink is closed.
    ///
    /// The line is composed in full and handed to the file in a single write.
    pub fn write(&mut self, severity: impl Into<Severity>, message: fmt::Arguments<'_>) {
        let Some(channel) = self.channel.as_mut() else {
            return;
        };

        let mut line = LineBuf::new();
        let composed = writeln!(line, "[{}] [{}]: {}", severity.into(), Timestamp::now(), message);

        let written = composed.and_then(|()| channel.file.write_all(&line));
        if let Err(source) = written {
            let path = channel.path.clone();
            self.fail(SinkError::Write { path, source });
        }
    }

    /// Writes one entry with an unformatted message.
    #[inline]
    pub fn write_str(&mut self, severity: impl Into<Severity>, message: &str) {
        self.write(severity, format_args!("{}", message));
    }

    /// Writes an error entry for the register's current code, naming the call
    /// site. Does nothing when the code is [`ErrorCode::NONE`](crate::ErrorCode::NONE).
    pub fn log_current_error<R: Register + ?Sized>(&mut self, register: &R, site: CallSite) {
        let code = register.get();
        if code.is_none() {
            return;
        }
        self.write(
            Severity::ERROR,
            format_args!("error {} raised in {}", code, site),
        );
    }

    fn fail(&mut self, failure: SinkError) {
        tracing::warn!(error = %failure, "log sink failure");

        let _ = match self.fallback {
            Fallback::Stderr => writeln!(io::stderr(), "[warning] {}", failure),
            Fallback::Stdout => writeln!(io::stdout(), "[warning] {}", failure),
            Fallback::Silent => Ok(()),
        };

        self.last_failure = Some(failure);
    }
}

/// Opens the calling thread's log channel.
#[inline]
pub fn open<P: AsRef<Path>>(path: P, flush_existing: bool) {
    tls::with_sink(|sink| sink.open(path, flush_existing));
}

/// Opens the calling thread's log channel from a configuration.
#[inline]
pub fn open_with(config: &SinkConfig) {
    tls::with_sink(|sink| sink.open_with(config));
}

/// Closes the calling thread's log channel.
#[inline]
pub fn close() {
    tls::with_sink(LogSink::close);
}

/// Whether the calling thread's channel is open.
#[inline]
pub fn is_open() -> bool {
    tls::with_sink(|sink| sink.is_open()).unwrap_or(false)
}

/// Path of the calling thread's open channel.
#[inline]
pub fn path() -> Option<PathBuf> {
    tls::with_sink(|sink| sink.path().map(Path::to_path_buf)).flatten()
}

/// Writes one entry to the calling thread's channel.
#[inline]
pub fn write(severity: impl Into<Severity>, message: fmt::Arguments<'_>) {
    tls::with_sink(|sink| sink.write(severity, message));
}

/// Logs the calling thread's current error code, if any.
///
/// Meant for handle and finalize phases; see [`log_erno!`](crate::log_erno).
#[inline]
pub fn log_current_error(site: CallSite) {
    tls::with(|rt| rt.log_current_error(site));
}

/// Removes and returns the calling thread's last sink failure.
#[inline]
pub fn take_failure() -> Option<SinkError> {
    tls::with_sink(LogSink::take_failure).flatten()
}
