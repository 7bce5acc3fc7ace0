use crate::types::ErrorCode;

/// Conversion into an [`ErrorCode`].
///
/// Lets [`raise!`](crate::raise), [`RaiseExt`](crate::traits::RaiseExt) and
/// friends accept raw integers and domain enums alongside `ErrorCode` itself.
///
/// # Examples
///
/// ```
/// use errno_rail::traits::IntoErrorCode;
/// use errno_rail::ErrorCode;
///
/// #[derive(Clone, Copy)]
/// enum Storage {
///     Full = 0x0005_0001,
/// }
///
/// impl IntoErrorCode for Storage {
///     fn into_error_code(self) -> ErrorCode {
///         ErrorCode::new(self as u32)
///     }
/// }
///
/// assert_eq!(Storage::Full.into_error_code().raw(), 0x0005_0001);
/// ```
pub trait IntoErrorCode {
    /// Converts `self` into the code stored in a register.
    fn into_error_code(self) -> ErrorCode;
}

impl IntoErrorCode for ErrorCode {
    #[inline]
    fn into_error_code(self) -> ErrorCode {
        self
    }
}

impl IntoErrorCode for u32 {
    #[inline]
    fn into_error_code(self) -> ErrorCode {
        ErrorCode::new(self)
    }
}

impl<T> IntoErrorCode for Result<T, ErrorCode> {
    #[inline]
    fn into_error_code(self) -> ErrorCode {
        ErrorCode::from(self)
    }
}
