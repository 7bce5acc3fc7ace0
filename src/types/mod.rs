//! Value types shared by every component.
//!
//! - [`ErrorCode`]: the integral status stored in an error register
//! - [`Severity`]: the one-character marker of a log entry
//! - [`CallSite`]: function/file/line of a diagnostic
//!
//! # Examples
//!
//! ```
//! use errno_rail::{ErrorCode, Severity};
//!
//! assert_eq!(ErrorCode::default(), ErrorCode::NONE);
//! assert_eq!(Severity::WARNING.marker(), 'W');
//! ```
use smallvec::SmallVec;

pub mod call_site;
pub mod error_code;
pub mod severity;

pub use call_site::CallSite;
pub use error_code::ErrorCode;
pub use severity::Severity;

/// Inline byte buffer used to compose one log line before it is written.
///
/// Lines shorter than 256 bytes never touch the heap.
pub type LineBuf = SmallVec<[u8; 256]>;
