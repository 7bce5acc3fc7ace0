use thiserror::Error;

/// Why a [`MemoryPool`](super::MemoryPool) request failed.
///
/// Callers of the register-based API see [`ErrorCode::MPOOL`](crate::ErrorCode::MPOOL);
/// this type supplies the text of the accompanying log entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("failed to allocate {requested} bytes of memory")]
    Exhausted { requested: usize },

    #[error("failed to allocate {requested} bytes of memory: heap limit of {limit} bytes reached ({live} live)")]
    HeapLimit { requested: usize, live: usize, limit: usize },
}

impl AllocError {
    /// Bytes the failed request asked for.
    #[inline]
    pub fn requested(&self) -> usize {
        match self {
            Self::Exhausted { requested } | Self::HeapLimit { requested, .. } => *requested,
        }
    }
}
