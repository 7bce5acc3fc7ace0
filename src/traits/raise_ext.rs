//! Extension trait for turning foreign failures into [`ErrorCode`]s.
//!
//! Attempt phases speak `Result<T, ErrorCode>`. [`RaiseExt`] bridges results
//! with other error types, and options standing in for nullable handles, onto
//! that shape so `?` can perform the abort.
//!
//! # Examples
//!
//! ```
//! use errno_rail::traits::RaiseExt;
//! use errno_rail::{contract, ErrorCode};
//!
//! const NOT_A_NUMBER: ErrorCode = ErrorCode::new(0x0004_0001);
//! const MISSING: ErrorCode = ErrorCode::new(0x0004_0002);
//!
//! let done = contract::attempt(|| {
//!     let n = "12".parse::<u32>().raise(NOT_A_NUMBER)?;
//!     let first = [n].first().copied().raise(MISSING)?;
//!     Ok(first)
//! })
//! .run();
//!
//! assert_eq!(done.value(), Some(&12));
//! ```
use crate::traits::IntoErrorCode;
use crate::types::ErrorCode;

/// Maps the failure side of a `Result` or `Option` onto an [`ErrorCode`].
///
/// The original error is discarded; only the code travels on. Use
/// [`raise_with`](RaiseExt::raise_with) when picking the code is costly.
pub trait RaiseExt<T> {
    /// Replaces any failure with `code`.
    fn raise<C: IntoErrorCode>(self, code: C) -> Result<T, ErrorCode>;

    /// Computes the code from the failure lazily.
    fn raise_with<F>(self, f: F) -> Result<T, ErrorCode>
    where
        F: FnOnce() -> ErrorCode;
}

impl<T, E> RaiseExt<T> for Result<T, E> {
    #[inline]
    fn raise<C: IntoErrorCode>(self, code: C) -> Result<T, ErrorCode> {
        self.map_err(|_| code.into_error_code())
    }

    #[inline]
    fn raise_with<F>(self, f: F) -> Result<T, ErrorCode>
    where
        F: FnOnce() -> ErrorCode,
    {
        self.map_err(|_| f())
    }
}

impl<T> RaiseExt<T> for Option<T> {
    #[inline]
    fn raise<C: IntoErrorCode>(self, code: C) -> Result<T, ErrorCode> {
        self.ok_or_else(|| code.into_error_code())
    }

    #[inline]
    fn raise_with<F>(self, f: F) -> Result<T, ErrorCode>
    where
        F: FnOnce() -> ErrorCode,
    {
        self.ok_or_else(f)
    }
}
