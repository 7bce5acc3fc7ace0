use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A failure inside a [`LogSink`](super::LogSink).
///
/// Sinks never hand these to callers as errors; they are kept as the sink's
/// last failure and echoed to its fallback stream.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("can't open log file: empty path")]
    EmptyPath,

    #[error("can't open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("can't write to log file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
