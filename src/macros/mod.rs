//! Macros for call-site capture, logging and early returns.
//!
//! - [`macro@crate::call_site`] / [`macro@crate::function_name`] - name the
//!   enclosing function, file and line.
//! - [`macro@crate::log_trace`], [`macro@crate::log_warning`],
//!   [`macro@crate::log_error`], [`macro@crate::log_write`] - `format!`-style
//!   entries on the calling thread's log channel.
//! - [`macro@crate::log_erno`] - logs the thread's current error code, if any.
//! - [`macro@crate::raise`] / [`macro@crate::check`] - abort an attempt phase
//!   with a code.
//!
//! # Examples
//!
//! ```
//! use errno_rail::{check, contract, log_erno, ErrorCode};
//!
//! const EMPTY_NAME: ErrorCode = ErrorCode::new(0x0006_0001);
//!
//! fn greet(name: &str) -> ErrorCode {
//!     contract::attempt(|| {
//!         check!(!name.is_empty(), EMPTY_NAME);
//!         Ok(())
//!     })
//!     .handle(|code| {
//!         log_erno!();
//!         code
//!     })
//!     .run()
//!     .code()
//! }
//!
//! assert_eq!(greet(""), EMPTY_NAME);
//! assert_eq!(greet("ferris"), ErrorCode::NONE);
//! ```

/// Expands to the name of the enclosing function as a `&'static str`.
///
/// Closures are looked through, so the name is that of the function that
/// contains them.
///
/// ```
/// fn outer() -> &'static str {
///     let inner = || errno_rail::function_name!();
///     inner()
/// }
///
/// assert_eq!(outer(), "outer");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::types::call_site::enclosing_function(__type_name_of(__f))
    }};
}

/// Captures the enclosing function, file and line as a
/// [`CallSite`](crate::types::CallSite).
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::types::CallSite::new($crate::function_name!(), file!(), line!())
    };
}

/// Writes a `format!`-style entry with an arbitrary severity character.
///
/// ```
/// errno_rail::log_write!('I', "{} workers started", 4);
/// ```
#[macro_export]
macro_rules! log_write {
    ($severity:expr, $($arg:tt)+) => {
        $crate::log::write($severity, format_args!($($arg)+))
    };
}

/// Writes a trace (`T`) entry.
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)+) => {
        $crate::log_write!($crate::types::Severity::TRACE, $($arg)+)
    };
}

/// Writes a warning (`W`) entry.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {
        $crate::log_write!($crate::types::Severity::WARNING, $($arg)+)
    };
}

/// Writes an error (`E`) entry.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::log_write!($crate::types::Severity::ERROR, $($arg)+)
    };
}

/// Logs the calling thread's current error code with the call site.
///
/// Does nothing when the register holds [`ErrorCode::NONE`](crate::ErrorCode::NONE).
/// Use it in handle and finalize phases, where the register is fresh.
#[macro_export]
macro_rules! log_erno {
    () => {
        $crate::log::log_current_error($crate::call_site!())
    };
}

/// Returns `Err(code)` from the enclosing attempt phase or function.
///
/// Accepts anything implementing [`IntoErrorCode`](crate::traits::IntoErrorCode).
#[macro_export]
macro_rules! raise {
    ($code:expr $(,)?) => {
        return ::core::result::Result::Err($crate::traits::IntoErrorCode::into_error_code($code))
    };
}

/// Raises `code` unless `cond` holds.
#[macro_export]
macro_rules! check {
    ($cond:expr, $code:expr $(,)?) => {
        if !$cond {
            $crate::raise!($code);
        }
    };
}
