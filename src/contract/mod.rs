//! Attempt / handle / finalize blocks over an error register.
//!
//! A [`Block`] runs three phases strictly in order:
//!
//! 1. **Attempt**: a closure returning `Result<T, ErrorCode>`. Sub-operations
//!    propagate failures with `?`; the first `Err` ends the phase and its code
//!    is stored in the register. Nothing after it runs.
//! 2. **Handle**: always runs, whether the attempt completed or aborted. It
//!    receives the register's code and returns the code to keep, so it can
//!    remap, log, or pass the code through.
//! 3. **Finalize**: runs exactly once on every path, including unwinding out of
//!    either earlier phase. The block's result is the register's value after
//!    this phase.
//!
//! Entering a block clears the register by default ([`EntryPolicy::Clear`]).
//!
//! # Examples
//!
//! ```
//! use errno_rail::contract::Contract;
//! use errno_rail::ErrorCode;
//!
//! const PARSE: ErrorCode = ErrorCode::new(0x0003_0001);
//! const CONFIG: ErrorCode = ErrorCode::new(0x0003_0002);
//!
//! fn parse(raw: &str) -> Result<u16, ErrorCode> {
//!     raw.parse().map_err(|_| PARSE)
//! }
//!
//! let done = Contract::new()
//!     .attempt(|| {
//!         let port = parse("80")?;
//!         let workers = parse("many")?;
//!         Ok((port, workers))
//!     })
//!     .handle(|code| if code == PARSE { CONFIG } else { code })
//!     .run();
//!
//! assert_eq!(done.code(), CONFIG);
//! assert!(done.value().is_none());
//! ```
mod finally;

pub use finally::{defer, Finally};

use crate::register::{Register, ThreadRegister};
use crate::types::ErrorCode;

/// What happens to the register when a block is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryPolicy {
    /// Reset to [`ErrorCode::NONE`]; a clean attempt finalizes with `NONE`.
    #[default]
    Clear,
    /// Keep whatever code the register already holds.
    ///
    /// Only this block honours the policy. Blocks nested in the attempt phase
    /// pick their own; the crate's allocator blocks inherit as well and leave
    /// the register alone when they succeed.
    Inherit,
}

/// Handle phase used when none is supplied: keeps the code as is.
pub type PassThrough = fn(ErrorCode) -> ErrorCode;

/// Finalize phase used when none is supplied: does nothing.
pub type NoCleanup = fn(ErrorCode);

#[inline]
fn pass_through(code: ErrorCode) -> ErrorCode {
    code
}

#[inline]
fn no_cleanup(_: ErrorCode) {}

/// Entry point for a block bound to one register.
#[derive(Debug, Clone, Copy)]
pub struct Contract<R = ThreadRegister> {
    register: R,
    entry: EntryPolicy,
}

impl Contract<ThreadRegister> {
    /// Binds a block to the calling thread's register.
    #[inline]
    pub fn new() -> Self {
        Self::on(ThreadRegister)
    }
}

impl Default for Contract<ThreadRegister> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Register> Contract<R> {
    /// Binds a block to an explicit register.
    #[inline]
    pub fn on(register: R) -> Self {
        Self { register, entry: EntryPolicy::Clear }
    }

    /// Overrides the entry policy.
    #[inline]
    pub fn entry(mut self, entry: EntryPolicy) -> Self {
        self.entry = entry;
        self
    }

    /// Supplies the attempt phase.
    #[inline]
    pub fn attempt<T, A>(self, attempt: A) -> Block<R, A>
    where
        A: FnOnce() -> Result<T, ErrorCode>,
    {
        Block {
            register: self.register,
            entry: self.entry,
            attempt,
            handle: pass_through,
            finalize: no_cleanup,
        }
    }
}

/// A fully described block, executed by [`Block::run`].
#[must_use = "a block does nothing until `run` is called"]
pub struct Block<R, A, H = PassThrough, F = NoCleanup> {
    register: R,
    entry: EntryPolicy,
    attempt: A,
    handle: H,
    finalize: F,
}

impl<R, A, H, F> Block<R, A, H, F> {
    /// Supplies the handle phase.
    ///
    /// The closure sees the register's code and returns the code to keep.
    #[inline]
    pub fn handle<H2>(self, handle: H2) -> Block<R, A, H2, F>
    where
        H2: FnOnce(ErrorCode) -> ErrorCode,
    {
        Block {
            register: self.register,
            entry: self.entry,
            attempt: self.attempt,
            handle,
            finalize: self.finalize,
        }
    }

    /// Supplies the finalize phase.
    ///
    /// The closure sees the code the block is about to return. It also runs
    /// when an earlier phase panics.
    #[inline]
    pub fn finalize<F2>(self, finalize: F2) -> Block<R, A, H, F2>
    where
        F2: FnOnce(ErrorCode),
    {
        Block {
            register: self.register,
            entry: self.entry,
            attempt: self.attempt,
            handle: self.handle,
            finalize,
        }
    }
}

impl<R, A, H, F, T> Block<R, A, H, F>
where
    R: Register,
    A: FnOnce() -> Result<T, ErrorCode>,
    H: FnOnce(ErrorCode) -> ErrorCode,
    F: FnOnce(ErrorCode),
{
    /// Runs attempt, handle and finalize in order.
    pub fn run(self) -> Finalized<T> {
        let Self { register, entry, attempt, handle, finalize } = self;

        if entry == EntryPolicy::Clear {
            register.clear();
        }

        let guard = Finally::new(|| finalize(register.get()));

        let value = match attempt() {
            Ok(value) => Some(value),
            Err(code) => {
                tracing::trace!(%code, "attempt phase aborted");
                register.set(code);
                None
            }
        };

        let code = handle(register.get());
        register.set(code);

        guard.run();

        Finalized { value, code: register.get() }
    }
}

/// The outcome of a block: the attempt's value, if it completed, and the
/// register's code after finalize.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finalized<T> {
    value: Option<T>,
    code: ErrorCode,
}

impl<T> Finalized<T> {
    /// The code the block returned.
    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// `true` when the block returned [`ErrorCode::NONE`].
    #[inline]
    pub fn is_success(&self) -> bool {
        self.code.is_none()
    }

    /// The attempt phase's value, present only if it ran to completion.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Splits the outcome into the attempt's value and the final code.
    ///
    /// Both may be set at once when the handle or finalize phase turned a
    /// completed attempt into a failure.
    #[inline]
    pub fn into_parts(self) -> (Option<T>, ErrorCode) {
        (self.value, self.code)
    }

    /// `Err(code)` on failure, otherwise the attempt's value.
    ///
    /// The value is `None` when the attempt aborted and the handle phase
    /// cleared the code.
    #[inline]
    pub fn into_result(self) -> Result<Option<T>, ErrorCode> {
        if self.code.is_failure() {
            Err(self.code)
        } else {
            Ok(self.value)
        }
    }
}

impl<T> From<Finalized<T>> for ErrorCode {
    #[inline]
    fn from(done: Finalized<T>) -> Self {
        done.code
    }
}

/// Starts a block on the calling thread's register.
///
/// ```
/// use errno_rail::contract;
/// use errno_rail::ErrorCode;
///
/// let code = contract::attempt(|| Ok::<_, ErrorCode>(())).run().code();
/// assert_eq!(code, ErrorCode::NONE);
/// ```
#[inline]
pub fn attempt<T, A>(attempt: A) -> Block<ThreadRegister, A>
where
    A: FnOnce() -> Result<T, ErrorCode>,
{
    Contract::new().attempt(attempt)
}
