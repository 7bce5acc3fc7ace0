use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Single-character marker written at the head of every log entry.
///
/// Any character is accepted; the three constants are the ones the
/// crate's own macros use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct Severity(char);

impl Severity {
    pub const TRACE: Self = Self('T');
    pub const WARNING: Self = Self('W');
    pub const ERROR: Self = Self('E');

    /// Wraps any character as a marker.
    #[inline]
    pub const fn new(marker: char) -> Self {
        Self(marker)
    }

    #[inline]
    pub const fn marker(self) -> char {
        self.0
    }
}

impl From<char> for Severity {
    #[inline]
    fn from(marker: char) -> Self {
        Self(marker)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
