//! Thread-scoped error codes with attempt/handle/finalize blocks.
//!
//! Each thread owns an error register holding one [`ErrorCode`]. Fallible work
//! is written as a [`Contract`] block: an attempt phase that aborts on the first
//! failure, a handle phase that always runs and may remap the code, and a
//! finalize phase that runs exactly once on every path and yields the result.
//!
//! Two consumers ship with the crate:
//!
//! - [`mpool`]: a lazily initialised pooled allocator whose buffers are
//!   reclaimed automatically and can't be freed by hand
//! - [`log`]: a lazily opened log channel writing
//!   `[<severity>] [<timestamp>]: <message>` lines, which never reports its
//!   own failures as errors
//!
//! Everything is available either through thread-level functions or through an
//! explicit [`Runtime`] context object.
//!
//! # Examples
//!
//! ## Attempt, handle, finalize
//!
//! ```
//! use errno_rail::{contract, mpool, register, ErrorCode};
//!
//! let finalized = std::cell::Cell::new(false);
//! let done = contract::attempt(|| {
//!     let mut buf = mpool::alloc(8)?;
//!     mpool::realloc(&mut buf, 32)?;
//!     Ok(buf.len())
//! })
//! .handle(|code| code)
//! .finalize(|_| finalized.set(true))
//! .run();
//!
//! assert_eq!(done.value(), Some(&32));
//! assert_eq!(done.code(), ErrorCode::NONE);
//! assert_eq!(register::get(), ErrorCode::NONE);
//! assert!(finalized.get());
//! ```
//!
//! ## Logging
//!
//! ```
//! use errno_rail::{log, log_trace, log_warning};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("trace.log");
//!
//! log::open(&path, true);
//! log_trace!("n={}", 3);
//! log::close();
//!
//! log::open(&path, false);
//! log_warning!("careful");
//! log::close();
//!
//! let text = std::fs::read_to_string(&path).unwrap();
//! let lines: Vec<_> = text.lines().collect();
//! assert!(lines[0].starts_with("[T] [") && lines[0].ends_with("]: n=3"));
//! assert!(lines[1].starts_with("[W] [") && lines[1].ends_with("]: careful"));
//! ```

/// Attempt/handle/finalize blocks
pub mod contract;
/// Lazily opened, timestamped log channel
pub mod log;
/// Call-site, logging and early-return macros
pub mod macros;
/// Lazily initialised pooled allocator
pub mod mpool;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Error registers: explicit and per-thread
pub mod register;
/// The per-thread context object
pub mod runtime;
/// Core traits at the register seams
pub mod traits;
/// Error codes, severities and call sites
pub mod types;

mod tls;

pub use contract::{Block, Contract, EntryPolicy, Finalized, Finally};
pub use log::{LogSink, SinkConfig};
pub use mpool::{MemoryPool, PoolBuffer};
pub use register::{ErrorRegister, ThreadRegister};
pub use runtime::Runtime;
pub use traits::*;
pub use types::{CallSite, ErrorCode, Severity};
