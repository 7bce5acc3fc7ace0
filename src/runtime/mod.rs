//! The per-thread context object.
//!
//! A [`Runtime`] owns one error register, one log sink and one memory pool.
//! Allocator operations run as [`Contract`] blocks on the runtime's own
//! register and log through its own sink, so a runtime can be created,
//! passed around and inspected without touching any thread-local state.
//!
//! The thread-level functions of [`register`](crate::register),
//! [`log`](crate::log) and [`mpool`](crate::mpool) delegate to a runtime
//! created lazily for each thread.
//!
//! # Examples
//!
//! ```
//! use errno_rail::register::Register;
//! use errno_rail::mpool::{MemoryPool, PoolConfig, SystemCollector};
//! use errno_rail::{ErrorCode, Runtime};
//!
//! let pool = MemoryPool::with_config(SystemCollector::new(), PoolConfig::default().with_max_heap_size(32));
//! let rt = Runtime::from_pool(pool);
//!
//! let buf = rt.allocate(16).unwrap();
//! assert_eq!(rt.allocate(64).unwrap_err(), ErrorCode::MPOOL);
//! assert_eq!(rt.register().get(), ErrorCode::MPOOL);
//! drop(buf);
//! ```
use core::cell::{Cell, RefCell};

use crate::call_site;
use crate::contract::{Contract, EntryPolicy};
use crate::log::LogSink;
use crate::mpool::{AllocError, Collector, MemoryPool, PoolBuffer, SystemCollector};
use crate::register::ErrorRegister;
use crate::types::{CallSite, ErrorCode, Severity};

/// One error register, one log sink and one memory pool, owned together.
///
/// A runtime is `!Sync`: it belongs to the thread that uses it. The sink and
/// pool sit behind `RefCell`s so every operation takes `&self`.
#[derive(Debug)]
pub struct Runtime<C = SystemCollector> {
    register: ErrorRegister,
    sink: RefCell<LogSink>,
    pool: RefCell<MemoryPool<C>>,
}

impl Runtime<SystemCollector> {
    /// Creates a runtime with a closed sink, a `NONE` register and an
    /// uninitialised [`SystemCollector`] pool without a heap limit.
    #[inline]
    pub fn new() -> Self {
        Self::from_pool(MemoryPool::default())
    }
}

impl Default for Runtime<SystemCollector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Collector> Runtime<C> {
    /// Creates a runtime whose pool is backed by `collector`.
    ///
    /// The collector is not initialised until the first allocation.
    #[inline]
    pub fn with_collector(collector: C) -> Self {
        Self::from_pool(MemoryPool::new(collector))
    }

    /// Creates a runtime around an already configured pool.
    pub fn from_pool(pool: MemoryPool<C>) -> Self {
        Self {
            register: ErrorRegister::new(),
            sink: RefCell::new(LogSink::new()),
            pool: RefCell::new(pool),
        }
    }

    /// The runtime's error register.
    ///
    /// Allocator failures land here, never in the thread register.
    #[inline]
    pub fn register(&self) -> &ErrorRegister {
        &self.register
    }

    /// A block bound to this runtime's register.
    #[inline]
    pub fn contract(&self) -> Contract<&ErrorRegister> {
        Contract::on(&self.register)
    }

    /// Runs `f` on the sink.
    ///
    /// Returns `None` without running `f` when the sink is already borrowed
    /// further up the stack; logging is skipped rather than failing.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut LogSink) -> R) -> Option<R> {
        let mut sink = self.sink.try_borrow_mut().ok()?;
        Some(f(&mut sink))
    }

    /// Runs `f` on the pool.
    ///
    /// # Panics
    ///
    /// If called again from inside `f`, for instance by a collector that
    /// allocates from its own runtime.
    pub fn with_pool<R>(&self, f: impl FnOnce(&mut MemoryPool<C>) -> R) -> R {
        f(&mut self.pool.borrow_mut())
    }

    /// Writes an error entry for this runtime's current code, if any.
    #[inline]
    pub fn log_current_error(&self, site: CallSite) {
        self.with_sink(|sink| sink.log_current_error(&self.register, site));
    }

    /// Allocates `size` bytes.
    ///
    /// On failure the register holds [`ErrorCode::MPOOL`], the sink (if open)
    /// gets the current error plus a line naming the requested size, and the
    /// code is returned. A successful call leaves the register as it found it,
    /// so a code inherited by an enclosing block survives.
    ///
    /// # Panics
    ///
    /// If `size` is zero.
    pub fn allocate(&self, size: usize) -> Result<PoolBuffer, ErrorCode> {
        assert!(size > 0, "allocation size must be greater than zero");

        let failure = Cell::new(None);
        let (buffer, code) = self
            .contract()
            .entry(EntryPolicy::Inherit)
            .attempt(|| {
                self.with_pool(|pool| pool.try_allocate(size)).map_err(|error| {
                    failure.set(Some(error));
                    ErrorCode::MPOOL
                })
            })
            .handle(|code| self.report(code, failure.take(), call_site!()))
            .run()
            .into_parts();

        buffer.ok_or(code)
    }

    /// Slot form of [`allocate`](Self::allocate).
    ///
    /// # Panics
    ///
    /// If `size` is zero or `slot` already holds a buffer.
    pub fn allocate_into(&self, slot: &mut Option<PoolBuffer>, size: usize) -> ErrorCode {
        assert!(slot.is_none(), "output slot must be empty");

        match self.allocate(size) {
            Ok(buffer) => {
                *slot = Some(buffer);
                ErrorCode::NONE
            }
            Err(code) => code,
        }
    }

    /// Resizes `buffer` in place, with the same failure reporting as
    /// [`allocate`](Self::allocate). The buffer is untouched on failure.
    ///
    /// # Panics
    ///
    /// If `size` is zero or `buffer` came from another pool.
    pub fn reallocate(&self, buffer: &mut PoolBuffer, size: usize) -> Result<(), ErrorCode> {
        assert!(size > 0, "reallocation size must be greater than zero");

        let failure = Cell::new(None);
        let (resized, code) = self
            .contract()
            .entry(EntryPolicy::Inherit)
            .attempt(|| {
                self.with_pool(|pool| pool.try_reallocate(buffer, size)).map_err(|error| {
                    failure.set(Some(error));
                    ErrorCode::MPOOL
                })
            })
            .handle(|code| self.report(code, failure.take(), call_site!()))
            .run()
            .into_parts();

        resized.ok_or(code)
    }

    /// Handle phase of the allocator blocks: logs and yields `MPOOL` when the
    /// attempt failed, otherwise keeps `code` untouched.
    fn report(&self, code: ErrorCode, failure: Option<AllocError>, site: CallSite) -> ErrorCode {
        let Some(failure) = failure else {
            return code;
        };

        self.log_current_error(site);
        self.with_sink(|sink| sink.write(Severity::ERROR, format_args!("{}", failure)));

        ErrorCode::MPOOL
    }
}
