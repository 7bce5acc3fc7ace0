//! The collector boundary of the pooled allocator.

/// The two primitives a [`MemoryPool`](super::MemoryPool) needs from the
/// memory manager behind it.
///
/// Blocks handed out by a collector are owned `Vec<u8>`s; the pool wraps them
/// in [`PoolBuffer`](super::PoolBuffer)s, which are reclaimed when they become
/// unreachable. A collector never sees an explicit free.
///
/// # Examples
///
/// A collector that refuses everything above a fixed size:
///
/// ```
/// use errno_rail::mpool::{Collector, MemoryPool, SystemCollector};
///
/// #[derive(Default)]
/// struct Small(SystemCollector);
///
/// impl Collector for Small {
///     fn init(&mut self) {
///         self.0.init();
///     }
///
///     fn allocate(&mut self, size: usize) -> Option<Vec<u8>> {
///         if size > 64 { None } else { self.0.allocate(size) }
///     }
///
///     fn reallocate(&mut self, block: &mut Vec<u8>, size: usize) -> Option<()> {
///         if size > 64 { None } else { self.0.reallocate(block, size) }
///     }
/// }
///
/// let mut pool = MemoryPool::new(Small::default());
/// assert!(pool.try_allocate(16).is_ok());
/// assert!(pool.try_allocate(128).is_err());
/// ```
pub trait Collector {
    /// Prepares the collector. A pool calls this once, before its first
    /// allocation.
    fn init(&mut self);

    /// Returns `size` zeroed bytes, or `None` when the request can't be met.
    fn allocate(&mut self, size: usize) -> Option<Vec<u8>>;

    /// Resizes `block` to `size` bytes, keeping the first
    /// `min(block.len(), size)` bytes and zero-filling any growth.
    ///
    /// On `None` the block must be left as it was.
    fn reallocate(&mut self, block: &mut Vec<u8>, size: usize) -> Option<()>;
}

/// Collector backed by the global allocator, using fallible reservations so
/// exhaustion is reported instead of aborting the process.
#[derive(Debug, Default)]
pub struct SystemCollector {
    initialized: bool,
}

impl SystemCollector {
    /// A collector that hasn't been initialised yet.
    #[inline]
    pub const fn new() -> Self {
        Self { initialized: false }
    }

    /// Whether [`Collector::init`] has run.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Collector for SystemCollector {
    fn init(&mut self) {
        tracing::debug!("system collector initialised");
        self.initialized = true;
    }

    fn allocate(&mut self, size: usize) -> Option<Vec<u8>> {
        let mut block = Vec::new();
        block.try_reserve_exact(size).ok()?;
        block.resize(size, 0);
        Some(block)
    }

    fn reallocate(&mut self, block: &mut Vec<u8>, size: usize) -> Option<()> {
        if size > block.len() {
            block.try_reserve_exact(size - block.len()).ok()?;
            block.resize(size, 0);
        } else {
            block.truncate(size);
            block.shrink_to_fit();
        }
        Some(())
    }
}
