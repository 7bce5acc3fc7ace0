//! The error register: one current [`ErrorCode`] per owner.
//!
//! Two flavours implement the [`Register`] trait:
//!
//! - [`ErrorRegister`] is an ordinary value. Embed it in a context object and
//!   pass it around explicitly (see [`Runtime`](crate::Runtime)).
//! - [`ThreadRegister`] is a zero-sized handle onto the calling thread's
//!   register. Every thread starts at [`ErrorCode::NONE`] and never observes
//!   another thread's code.
//!
//! # Examples
//!
//! ```
//! use errno_rail::register::{self, ErrorRegister, Register};
//! use errno_rail::ErrorCode;
//!
//! let reg = ErrorRegister::new();
//! reg.set(ErrorCode::MPOOL);
//! assert_eq!(reg.get(), ErrorCode::MPOOL);
//!
//! register::set(ErrorCode::new(7));
//! assert_eq!(register::get(), ErrorCode::new(7));
//! register::clear();
//! ```
use core::cell::Cell;

use crate::tls;
use crate::types::ErrorCode;

/// Read/write access to a current-error-code cell.
///
/// Implementations never fail and never validate the code.
pub trait Register {
    /// Returns the current code.
    fn get(&self) -> ErrorCode;

    /// Overwrites the current code.
    fn set(&self, code: ErrorCode);

    /// Resets the register to [`ErrorCode::NONE`].
    #[inline]
    fn clear(&self) {
        self.set(ErrorCode::NONE);
    }

    /// Returns the current code and resets the register.
    #[inline]
    fn take(&self) -> ErrorCode {
        let code = self.get();
        self.clear();
        code
    }

    /// Returns `true` when the current code is a failure.
    #[inline]
    fn is_failed(&self) -> bool {
        self.get().is_failure()
    }
}

impl<R: Register + ?Sized> Register for &R {
    #[inline]
    fn get(&self) -> ErrorCode {
        (**self).get()
    }

    #[inline]
    fn set(&self, code: ErrorCode) {
        (**self).set(code)
    }
}

/// A standalone error register.
///
/// Uses a `Cell`, so it is `Send` but not `Sync`: one owner thread at a time.
#[derive(Debug, Default)]
pub struct ErrorRegister {
    current: Cell<ErrorCode>,
}

impl ErrorRegister {
    /// Creates a register holding [`ErrorCode::NONE`].
    #[inline]
    pub const fn new() -> Self {
        Self { current: Cell::new(ErrorCode::NONE) }
    }
}

impl Register for ErrorRegister {
    #[inline]
    fn get(&self) -> ErrorCode {
        self.current.get()
    }

    #[inline]
    fn set(&self, code: ErrorCode) {
        self.current.set(code);
    }
}

/// Handle onto the calling thread's register.
///
/// Cheap to copy; each method resolves the thread at call time.
///
/// During thread teardown, after the thread's state has been dropped, reads
/// return [`ErrorCode::NONE`] and writes are discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadRegister;

impl Register for ThreadRegister {
    #[inline]
    fn get(&self) -> ErrorCode {
        tls::with(|rt| rt.register().get()).unwrap_or(ErrorCode::NONE)
    }

    #[inline]
    fn set(&self, code: ErrorCode) {
        tls::with(|rt| rt.register().set(code));
    }
}

/// Returns the calling thread's current code.
#[inline]
pub fn get() -> ErrorCode {
    ThreadRegister.get()
}

/// Overwrites the calling thread's current code.
#[inline]
pub fn set(code: ErrorCode) {
    ThreadRegister.set(code)
}

/// Resets the calling thread's register to [`ErrorCode::NONE`].
#[inline]
pub fn clear() {
    ThreadRegister.clear()
}

/// Returns the calling thread's current code and resets it.
#[inline]
pub fn take() -> ErrorCode {
    ThreadRegister.take()
}
