use std::fmt;

#[cfg(feature = "time-calculation")]
use chrono::{DateTime, Duration, LocalResult, TimeZone, Utc};

#[cfg(feature = "time-calculation")]
use crate::error::FormatError;

/// Reference time of data, the time the forecast is issued from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ReferenceTime {
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Converts the reference time into [`DateTime`], checking that it is a
    /// valid calendar date and time.
    #[cfg(feature = "time-calculation")]
    pub fn to_date_time(&self) -> Result<DateTime<Utc>, FormatError> {
        create_date_time(
            self.year.into(),
            self.month.into(),
            self.day.into(),
            self.hour.into(),
            self.minute.into(),
            self.second.into(),
        )
    }

    /// Returns the forecast instant `lead_hours` after the reference time.
    #[cfg(feature = "time-calculation")]
    pub fn valid_time(&self, lead_hours: u32) -> Result<DateTime<Utc>, FormatError> {
        let ref_time = self.to_date_time()?;
        Ok(ref_time + Duration::hours(lead_hours.into()))
    }
}

impl fmt::Display for ReferenceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(feature = "time-calculation")]
#[inline]
fn create_date_time(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<DateTime<Utc>, FormatError> {
    match Utc.with_ymd_and_hms(year, month, day, hour, minute, second) {
        LocalResult::Single(t) => Ok(t),
        _ => Err(FormatError::InvalidReferenceTime(format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
        ))),
    }
}
