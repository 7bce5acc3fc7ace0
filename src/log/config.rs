use std::fs::OpenOptions;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an existing log file is treated on open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OpenMode {
    /// Keep existing entries and add new ones at the end.
    #[default]
    Append,
    /// Discard existing entries.
    Truncate,
}

impl OpenMode {
    /// Maps the `flush_existing` flag of [`LogSink::open`](super::LogSink::open).
    #[inline]
    pub const fn from_flush(flush_existing: bool) -> Self {
        if flush_existing {
            Self::Truncate
        } else {
            Self::Append
        }
    }

    pub(crate) fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            Self::Append => options.read(true).append(true).create(true),
            Self::Truncate => options.write(true).truncate(true).create(true),
        };
        options
    }
}

/// Where a sink reports its own failures.
///
/// Defaults to `Stderr` so diagnostics stay out of a program's regular
/// output. Pick `Stdout` to have the `[warning] ...` lines interleave with it,
/// as plain `printf`-based loggers do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Fallback {
    #[default]
    Stderr,
    Stdout,
    /// Record the failure without printing anything.
    Silent,
}

/// Everything needed to open a log channel.
///
/// # Examples
///
/// ```
/// use errno_rail::log::{Fallback, OpenMode, SinkConfig};
///
/// let config = SinkConfig::truncate("/tmp/app.log").with_fallback(Fallback::Silent);
/// assert_eq!(config.mode, OpenMode::Truncate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SinkConfig {
    pub path: PathBuf,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: OpenMode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fallback: Fallback,
}

impl SinkConfig {
    /// Describes a channel on `path` opened in `mode`, echoing failures on stderr.
    #[inline]
    pub fn new(path: impl Into<PathBuf>, mode: OpenMode) -> Self {
        Self { path: path.into(), mode, fallback: Fallback::default() }
    }

    /// A channel on `path` that keeps existing entries.
    #[inline]
    pub fn append(path: impl Into<PathBuf>) -> Self {
        Self::new(path, OpenMode::Append)
    }

    /// A channel on `path` that discards existing entries.
    #[inline]
    pub fn truncate(path: impl Into<PathBuf>) -> Self {
        Self::new(path, OpenMode::Truncate)
    }

    /// Overrides where open and write failures are echoed.
    #[inline]
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }
}
