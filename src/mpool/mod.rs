//! Lazily initialised pooled allocator.
//!
//! A [`MemoryPool`] pairs a [`Collector`] with a readiness flag: the collector
//! is initialised on the first request and never again. Memory comes back as a
//! [`PoolBuffer`], an owned handle with no free operation. Dropping the last
//! handle is what returns the bytes.
//!
//! The free functions in this module use the calling thread's pool and report
//! failures the register way: the thread's register is set to
//! [`ErrorCode::MPOOL`], an error entry is written to the thread's log channel
//! if one is open, and the code is returned.
//!
//! # Examples
//!
//! ```
//! use errno_rail::{contract, mpool, ErrorCode};
//!
//! let done = contract::attempt(|| {
//!     let mut buf = mpool::alloc(4)?;
//!     buf.copy_from_slice(b"rail");
//!     mpool::realloc(&mut buf, 20)?;
//!     Ok(buf)
//! })
//! .run();
//!
//! assert_eq!(done.code(), ErrorCode::NONE);
//! let buf = done.value().unwrap();
//! assert_eq!(buf.len(), 20);
//! assert_eq!(&buf[..4], b"rail");
//! ```
mod collector;
mod config;
mod error;

pub use collector::{Collector, SystemCollector};
pub use config::{HeapStats, PoolConfig};
pub use error::AllocError;

use core::cell::Cell;
use core::fmt;
use core::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::tls;
use crate::types::ErrorCode;

/// Live-memory counters shared by a pool and every buffer it handed out.
#[derive(Debug, Default)]
struct Heap {
    live_bytes: Cell<usize>,
    live_buffers: Cell<usize>,
}

impl Heap {
    fn acquire(&self, bytes: usize) {
        self.live_bytes.set(self.live_bytes.get() + bytes);
        self.live_buffers.set(self.live_buffers.get() + 1);
    }

    fn resize(&self, from: usize, to: usize) {
        self.live_bytes.set(self.live_bytes.get() - from + to);
    }

    fn release(&self, bytes: usize) {
        self.live_bytes.set(self.live_bytes.get() - bytes);
        self.live_buffers.set(self.live_buffers.get() - 1);
    }
}

/// Memory handed out by a [`MemoryPool`].
///
/// Dereferences to `[u8]`. There is no way to free it by hand; the bytes go
/// back when the buffer is dropped. The handle is tied to the pool's thread
/// (`!Send`).
pub struct PoolBuffer {
    bytes: Vec<u8>,
    heap: Rc<Heap>,
}

impl PoolBuffer {
    /// Number of accessible bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The buffer's bytes. Same as dereferencing.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl Deref for PoolBuffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl DerefMut for PoolBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl AsRef<[u8]> for PoolBuffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsMut<[u8]> for PoolBuffer {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl fmt::Debug for PoolBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolBuffer").field("len", &self.bytes.len()).finish()
    }
}

impl Drop for PoolBuffer {
    fn drop(&mut self) {
        self.heap.release(self.bytes.len());
    }
}

/// A collector plus its lazy-initialisation flag and heap bookkeeping.
#[derive(Debug)]
pub struct MemoryPool<C = SystemCollector> {
    collector: C,
    ready: bool,
    config: PoolConfig,
    heap: Rc<Heap>,
    allocations: u64,
    reallocations: u64,
    failures: u64,
}

impl Default for MemoryPool<SystemCollector> {
    fn default() -> Self {
        Self::new(SystemCollector::new())
    }
}

impl<C: Collector> MemoryPool<C> {
    /// Wraps `collector` in a pool without a heap limit.
    ///
    /// Nothing is initialised yet; see [`is_ready`](Self::is_ready).
    #[inline]
    pub fn new(collector: C) -> Self {
        Self::with_config(collector, PoolConfig::default())
    }

    /// Wraps `collector` in a pool governed by `config`.
    ///
    /// ```
    /// use errno_rail::mpool::{MemoryPool, PoolConfig, SystemCollector};
    ///
    /// let mut pool = MemoryPool::with_config(
    ///     SystemCollector::new(),
    ///     PoolConfig::default().with_max_heap_size(16),
    /// );
    /// assert!(pool.try_allocate(32).is_err());
    /// assert_eq!(pool.stats().failures, 1);
    /// ```
    pub fn with_config(collector: C, config: PoolConfig) -> Self {
        Self {
            collector,
            ready: false,
            config,
            heap: Rc::new(Heap::default()),
            allocations: 0,
            reallocations: 0,
            failures: 0,
        }
    }

    /// Whether the collector has been initialised.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The collector backing this pool.
    #[inline]
    pub fn collector(&self) -> &C {
        &self.collector
    }

    /// The pool's current configuration.
    #[inline]
    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// Replaces the configuration. A lowered heap limit only affects later
    /// requests; live buffers are never reclaimed by it.
    #[inline]
    pub fn set_config(&mut self, config: PoolConfig) {
        self.config = config;
    }

    /// Snapshot of live memory and request counters.
    pub fn stats(&self) -> HeapStats {
        HeapStats {
            live_bytes: self.heap.live_bytes.get(),
            live_buffers: self.heap.live_buffers.get(),
            allocations: self.allocations,
            reallocations: self.reallocations,
            failures: self.failures,
        }
    }

    /// `true` if `buffer` was produced by this pool.
    #[inline]
    pub fn owns(&self, buffer: &PoolBuffer) -> bool {
        Rc::ptr_eq(&self.heap, &buffer.heap)
    }

    fn ensure_ready(&mut self) {
        if !self.ready {
            self.collector.init();
            self.ready = true;
        }
    }

    fn check_limit(&self, requested: usize, growth: usize) -> Result<(), AllocError> {
        let Some(limit) = self.config.max_heap_size else {
            return Ok(());
        };
        let live = self.heap.live_bytes.get();
        match live.checked_add(growth) {
            Some(total) if total <= limit => Ok(()),
            _ => Err(AllocError::HeapLimit { requested, live, limit }),
        }
    }

    fn failed(&mut self, error: AllocError) -> AllocError {
        self.failures += 1;
        tracing::warn!(requested = error.requested(), %error, "pool request failed");
        error
    }

    /// Allocates `size` zeroed bytes.
    ///
    /// # Panics
    ///
    /// If `size` is zero.
    pub fn try_allocate(&mut self, size: usize) -> Result<PoolBuffer, AllocError> {
        assert!(size > 0, "allocation size must be greater than zero");
        self.ensure_ready();

        if let Err(error) = self.check_limit(size, size) {
            return Err(self.failed(error));
        }

        let Some(bytes) = self.collector.allocate(size) else {
            return Err(self.failed(AllocError::Exhausted { requested: size }));
        };

        self.allocations += 1;
        self.heap.acquire(bytes.len());
        Ok(PoolBuffer { bytes, heap: Rc::clone(&self.heap) })
    }

    /// Resizes `buffer` in place to `size` bytes, keeping the first
    /// `min(old, new)` bytes. On failure the buffer is unchanged.
    ///
    /// # Panics
    ///
    /// If `size` is zero or `buffer` belongs to a different pool.
    pub fn try_reallocate(&mut self, buffer: &mut PoolBuffer, size: usize) -> Result<(), AllocError> {
        assert!(size > 0, "reallocation size must be greater than zero");
        assert!(self.owns(buffer), "buffer was not allocated by this pool");
        self.ensure_ready();

        let old = buffer.bytes.len();
        if let Err(error) = self.check_limit(size, size.saturating_sub(old)) {
            return Err(self.failed(error));
        }

        if self.collector.reallocate(&mut buffer.bytes, size).is_none() {
            return Err(self.failed(AllocError::Exhausted { requested: size }));
        }

        self.reallocations += 1;
        self.heap.resize(old, buffer.bytes.len());
        Ok(())
    }
}

/// Allocates `size` bytes from the calling thread's pool.
///
/// Fails with [`ErrorCode::MPOOL`] once the thread's pool has been dropped
/// during thread exit.
///
/// # Panics
///
/// If `size` is zero.
#[inline]
pub fn alloc(size: usize) -> Result<PoolBuffer, ErrorCode> {
    tls::with(|rt| rt.allocate(size)).unwrap_or(Err(ErrorCode::MPOOL))
}

/// Slot form of [`alloc`]: fills an empty `slot` and returns the status code.
///
/// # Panics
///
/// If `size` is zero or `slot` already holds a buffer.
#[inline]
pub fn alloc_into(slot: &mut Option<PoolBuffer>, size: usize) -> ErrorCode {
    tls::with(|rt| rt.allocate_into(slot, size)).unwrap_or(ErrorCode::MPOOL)
}

/// Resizes a buffer obtained from the calling thread's pool.
///
/// Fails with [`ErrorCode::MPOOL`], leaving `buffer` as it was, once the
/// thread's pool has been dropped during thread exit.
///
/// # Panics
///
/// If `size` is zero or `buffer` came from another pool.
#[inline]
pub fn realloc(buffer: &mut PoolBuffer, size: usize) -> Result<(), ErrorCode> {
    tls::with(|rt| rt.reallocate(buffer, size)).unwrap_or(Err(ErrorCode::MPOOL))
}

/// Whether the calling thread's collector has been initialised.
#[inline]
pub fn is_ready() -> bool {
    tls::with(|rt| rt.with_pool(|pool| pool.is_ready())).unwrap_or(false)
}

/// Snapshot of the calling thread's pool bookkeeping.
#[inline]
pub fn stats() -> HeapStats {
    tls::with(|rt| rt.with_pool(|pool| pool.stats())).unwrap_or_default()
}

/// Caps live bytes in the calling thread's pool; `None` removes the cap.
#[inline]
pub fn set_heap_limit(max_heap_size: Option<usize>) {
    tls::with(|rt| rt.with_pool(|pool| pool.set_config(PoolConfig { max_heap_size })));
}
