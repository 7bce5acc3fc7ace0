use criterion::Criterion;
use errno_rail::ErrorCode;
use std::time::Duration;

// ============================================================================
// Domain codes
// ============================================================================

pub const DB_TIMEOUT: ErrorCode = ErrorCode::new(0x0002_0001);
pub const DB_REMAPPED: ErrorCode = ErrorCode::new(0x0002_0002);

/// Succeeds for even inputs, fails with [`DB_TIMEOUT`] otherwise.
#[inline(never)]
pub fn query(n: u64) -> Result<u64, ErrorCode> {
    if n % 2 == 0 {
        Ok(n / 2)
    } else {
        Err(DB_TIMEOUT)
    }
}

pub fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(100)
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(5))
        .noise_threshold(0.05)
}
