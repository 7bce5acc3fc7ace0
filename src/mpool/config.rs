#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunables of a [`MemoryPool`](super::MemoryPool).
///
/// # Examples
///
/// ```
/// use errno_rail::mpool::PoolConfig;
///
/// let config = PoolConfig::default().with_max_heap_size(1 << 20);
/// assert_eq!(config.max_heap_size, Some(1 << 20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Upper bound on live bytes. Requests that would cross it fail.
    pub max_heap_size: Option<usize>,
}

impl PoolConfig {
    /// No heap limit. Same as `PoolConfig::default()`.
    #[inline]
    pub const fn unlimited() -> Self {
        Self { max_heap_size: None }
    }

    /// Caps live bytes at `bytes`.
    #[inline]
    pub fn with_max_heap_size(mut self, bytes: usize) -> Self {
        self.max_heap_size = Some(bytes);
        self
    }
}

/// Snapshot of a pool's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeapStats {
    /// Bytes held by reachable buffers.
    pub live_bytes: usize,
    /// Reachable buffers.
    pub live_buffers: usize,
    pub allocations: u64,
    pub reallocations: u64,
    /// Requests of either kind that failed.
    pub failures: u64,
}
