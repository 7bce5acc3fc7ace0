//! Traits at the seams between caller code and the error register.
//!
//! - [`Register`]: read/write access to a current-error-code cell
//! - [`IntoErrorCode`]: conversion of codes, raw integers and domain enums
//! - [`RaiseExt`]: maps `Result`/`Option` failures onto codes for `?`
//! - [`Collector`]: the two primitives the pooled allocator needs
//!
//! # Examples
//!
//! ```
//! use errno_rail::traits::{IntoErrorCode, RaiseExt};
//! use errno_rail::ErrorCode;
//!
//! let missing: Option<u8> = None;
//! assert_eq!(missing.raise(0x10u32), Err(ErrorCode::new(0x10)));
//! assert_eq!(7u32.into_error_code(), ErrorCode::new(7));
//! ```

pub mod into_error_code;
pub mod raise_ext;

pub use crate::mpool::Collector;
pub use crate::register::Register;
pub use into_error_code::IntoErrorCode;
pub use raise_ext::RaiseExt;
