//! Clock time handling for scraped itinerary text.
//!
//! Travel sites print times in many shapes ("6:00 pm", "6:00PM", "18:00",
//! "7:15 a.m. +1"). This module recognises them and renders the 12-hour
//! reservation-terminal form ("600P", "715A").

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Error returned when building an invalid clock time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}):(\d{2})(?:\s*([ap])(?:\.?\s?m)?\b\.?)?(?:\s*\+\s*(\d))?")
        .expect("static regex must compile")
});

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day with minute precision, without a date.
///
/// # Examples
///
/// ```
/// use itinerary_gds::domain::ClockTime;
///
/// let t = ClockTime::from_hm(18, 5).unwrap();
/// assert_eq!(t.to_gds(), "605P");
/// assert_eq!(t.to_string(), "18:05");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    /// Create a clock time from a 24-hour hour and minute.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Ok(Self {
            minutes: (hour * 60 + minute) as u16,
        })
    }

    /// Create a clock time from a 12-hour hour, minute and meridiem.
    pub fn from_12h(hour: u32, minute: u32, pm: bool) -> Result<Self, TimeError> {
        if !(1..=12).contains(&hour) {
            return Err(TimeError::new("12-hour clock hour must be 1-12"));
        }
        let hour24 = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Self::from_hm(hour24, minute)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        u32::from(self.minutes / 60)
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        u32::from(self.minutes % 60)
    }

    /// Minutes since midnight.
    pub fn minutes_of_day(&self) -> u32 {
        u32::from(self.minutes)
    }

    /// Minutes from `self` forward to `later`, wrapping past midnight.
    ///
    /// ```
    /// use itinerary_gds::domain::ClockTime;
    ///
    /// let arr = ClockTime::from_hm(23, 30).unwrap();
    /// let dep = ClockTime::from_hm(1, 0).unwrap();
    /// assert_eq!(arr.minutes_until(dep), 90);
    /// ```
    pub fn minutes_until(&self, later: ClockTime) -> u32 {
        let diff = (later.minutes + MINUTES_PER_DAY - self.minutes) % MINUTES_PER_DAY;
        u32::from(diff)
    }

    /// Render as a reservation-style time: 12-hour clock, no leading zero,
    /// `A`/`P` suffix.
    pub fn to_gds(&self) -> String {
        let hour12 = match self.hour() % 12 {
            0 => 12,
            h => h,
        };
        let suffix = if self.hour() < 12 { 'A' } else { 'P' };
        format!("{}{:02}{}", hour12, self.minute(), suffix)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_gds())
    }
}

/// A clock time found in text, with any explicit `+N` day marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToken {
    pub time: ClockTime,
    /// Days added by a trailing `+1`/`+2` marker; zero when absent.
    pub day_offset: u8,
}

impl TimeToken {
    /// Find the first clock time in a line of text.
    ///
    /// ```
    /// use itinerary_gds::domain::TimeToken;
    ///
    /// let tok = TimeToken::find("7:15 a.m. +1").unwrap();
    /// assert_eq!(tok.time.to_gds(), "715A");
    /// assert_eq!(tok.day_offset, 1);
    ///
    /// assert!(TimeToken::find("Paris (CDG)").is_none());
    /// assert!(TimeToken::find("13:00 pm").is_none());
    /// ```
    pub fn find(text: &str) -> Option<Self> {
        Self::find_all(text).into_iter().next().map(|(_, tok)| tok)
    }

    /// Find every clock time in a line, with the byte range each occupies.
    pub fn find_all(text: &str) -> Vec<(Range<usize>, Self)> {
        TIME_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let hour: u32 = caps[1].parse().ok()?;
                let minute: u32 = caps[2].parse().ok()?;
                let time = match caps.get(3) {
                    Some(m) => {
                        let pm = m.as_str().eq_ignore_ascii_case("p");
                        ClockTime::from_12h(hour, minute, pm).ok()?
                    }
                    None => ClockTime::from_hm(hour, minute).ok()?,
                };
                let day_offset = caps
                    .get(4)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(0);
                Some((whole.range(), Self { time, day_offset }))
            })
            .collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every 24-hour time survives a text roundtrip
        #[test]
        fn twenty_four_hour_roundtrip(hour in 0u32..24, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            let tok = TimeToken::find(&s).unwrap();
            prop_assert_eq!(tok.time.hour(), hour);
            prop_assert_eq!(tok.time.minute(), minute);
        }

        /// 12-hour text and its GDS rendering agree
        #[test]
        fn twelve_hour_text_matches_gds(hour in 1u32..13, minute in 0u32..60, pm in any::<bool>()) {
            let s = format!("{}:{:02} {}", hour, minute, if pm { "pm" } else { "am" });
            let tok = TimeToken::find(&s).unwrap();
            let expected = format!("{}{:02}{}", hour, minute, if pm { 'P' } else { 'A' });
            prop_assert_eq!(tok.time.to_gds(), expected);
        }

        /// Wrapped difference is always less than a day
        #[test]
        fn minutes_until_bounded(a in 0u32..1440, b in 0u32..1440) {
            let x = ClockTime::from_hm(a / 60, a % 60).unwrap();
            let y = ClockTime::from_hm(b / 60, b % 60).unwrap();
            prop_assert!(x.minutes_until(y) < 1440);
        }
    }
}
