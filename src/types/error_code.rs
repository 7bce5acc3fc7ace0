//! The integral status value carried by every error register.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An opaque integral status code.
///
/// [`ErrorCode::NONE`] (zero) means the operation succeeded. Every other value
/// is a failure; a handful are reserved by this crate and the rest are free for
/// callers to define.
///
/// # Examples
///
/// ```
/// use errno_rail::ErrorCode;
///
/// const DB_TIMEOUT: ErrorCode = ErrorCode::new(0x0002_0001);
///
/// assert!(ErrorCode::NONE.is_none());
/// assert!(DB_TIMEOUT.is_failure());
/// assert_eq!(DB_TIMEOUT.to_string(), "0x00020001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct ErrorCode(u32);

impl ErrorCode {
    /// No error; the operation succeeded.
    pub const NONE: Self = Self(0);

    /// The pooled allocator could not satisfy a request.
    pub const MPOOL: Self = Self(0x0001_0001);

    /// Wraps a raw code. No validation is performed.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integral value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns `true` for [`ErrorCode::NONE`].
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` for any code other than [`ErrorCode::NONE`].
    #[inline]
    pub const fn is_failure(self) -> bool {
        self.0 != 0
    }

    /// Converts the code into a `Result` so it can be propagated with `?`.
    ///
    /// ```
    /// use errno_rail::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::NONE.into_result(), Ok(()));
    /// assert_eq!(ErrorCode::MPOOL.into_result(), Err(ErrorCode::MPOOL));
    /// ```
    #[inline]
    pub const fn into_result(self) -> Result<(), ErrorCode> {
        if self.is_none() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl std::error::Error for ErrorCode {}

impl From<u32> for ErrorCode {
    #[inline]
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<ErrorCode> for u32 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

impl<T> From<Result<T, ErrorCode>> for ErrorCode {
    /// Collapses a result into its status code, discarding any success value.
    #[inline]
    fn from(result: Result<T, ErrorCode>) -> Self {
        match result {
            Ok(_) => ErrorCode::NONE,
            Err(code) => code,
        }
    }
}
