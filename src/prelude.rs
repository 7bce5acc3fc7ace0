//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use errno_rail::prelude::*;
//!
//! fn load(raw: &str) -> Result<u8, ErrorCode> {
//!     raw.parse::<u8>().raise(0x0007_0001u32)
//! }
//!
//! let code = contract::attempt(|| load("300")).run().code();
//! assert_eq!(code, ErrorCode::new(0x0007_0001));
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`raise!`], [`check!`], [`log_erno!`], [`log_trace!`],
//!   [`log_warning!`], [`log_error!`]
//! - **Types**: [`ErrorCode`], [`Contract`], [`Finalized`], [`PoolBuffer`], [`Runtime`]
//! - **Traits**: [`Register`], [`RaiseExt`], [`IntoErrorCode`]
//! - **Modules**: [`contract`], [`log`], [`mpool`], [`register`]

// Macros
pub use crate::{check, log_erno, log_error, log_trace, log_warning, raise};

// Core types
pub use crate::contract::{Contract, Finalized};
pub use crate::mpool::PoolBuffer;
pub use crate::runtime::Runtime;
pub use crate::types::{ErrorCode, Severity};

// Traits
pub use crate::traits::{IntoErrorCode, RaiseExt, Register};

// Thread-level modules
pub use crate::{contract, log, mpool, register};
