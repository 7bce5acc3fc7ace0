//! Fixed-width wall-clock stamps in the classic `ctime` layout.

use core::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// `Sun Jan  1 00:00:00 2023`: weekday, month, space-padded day, time, year.
const LAYOUT: &str = "%a %b %e %H:%M:%S %Y";

/// A timestamp rendered to exactly [`Timestamp::WIDTH`] characters.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use errno_rail::log::Timestamp;
///
/// let at = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(Timestamp::from_naive(&at).as_str(), "Sun Jan  1 00:00:00 2023");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    pub const WIDTH: usize = 24;

    /// The current local time.
    #[inline]
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Renders an instant in its own time zone.
    pub fn from_datetime<Tz>(at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self::fit(at.format(LAYOUT))
    }

    /// Renders a time without a zone, as given.
    pub fn from_naive(at: &NaiveDateTime) -> Self {
        Self::fit(at.format(LAYOUT))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Years past 9999 are cut at the field width.
    fn fit(rendered: impl fmt::Display) -> Self {
        let mut text: String = rendered.to_string().chars().take(Self::WIDTH).collect();
        while text.len() < Self::WIDTH {
            text.push(' ');
        }
        Self(text)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
