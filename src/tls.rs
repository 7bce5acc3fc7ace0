//! Thread-local storage for the calling thread's [`Runtime`].
//!
//! This is the only module holding thread-local state. The runtime is built on
//! first access and dropped with the thread, closing any log channel it left
//! open.
//!
//! Once the runtime has been dropped (for instance from another thread-local's
//! destructor running later during thread exit) every accessor returns `None`
//! instead of panicking. Callers turn that into their documented fallback.

use crate::log::LogSink;
use crate::runtime::Runtime;

thread_local! {
    static RUNTIME: Runtime = Runtime::new();
}

/// Runs `f` with the calling thread's runtime, or returns `None` if it has
/// already been torn down.
#[inline]
pub(crate) fn with<R>(f: impl FnOnce(&Runtime) -> R) -> Option<R> {
    RUNTIME.try_with(f).ok()
}

/// Runs `f` with the calling thread's log sink, unless it is already in use or
/// torn down.
#[inline]
pub(crate) fn with_sink<R>(f: impl FnOnce(&mut LogSink) -> R) -> Option<R> {
    with(|rt| rt.with_sink(f)).flatten()
}
