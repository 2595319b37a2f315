//! Calendar dates as printed on flight search pages.
//!
//! Result pages show dates without a year most of the time ("Fri, Oct 3").
//! `TravelDate` keeps the day, month and whatever weekday/year the text
//! gave, and knows how to step forward a day and render the
//! reservation-terminal date code (`03OCT`).

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use chrono::{Datelike, Month, NaiveDate, Weekday};
use regex::Regex;
use serde::{Serialize, Serializer};

/// Error returned when building an invalid date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date: {reason}")]
pub struct InvalidDate {
    reason: &'static str,
}

const MONTH_PATTERN: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

static MONTH_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b{MONTH_PATTERN}\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(\d{{4}})\b)?"
    ))
    .expect("static regex must compile")
});

static DAY_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+{MONTH_PATTERN}\b\.?(?:,?\s+(\d{{4}})\b)?"
    ))
    .expect("static regex must compile")
});

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(mon(?:day)?|tue(?:s(?:day)?)?|wed(?:nesday)?|thu(?:r(?:s(?:day)?)?)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?)\b\.?")
        .expect("static regex must compile")
});

/// Days per month in a non-leap year.
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-of-year offset of the first of each month in a non-leap year.
const MONTH_OFFSETS: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A day and month, with optional weekday and year.
///
/// # Examples
///
/// ```
/// use itinerary_gds::domain::TravelDate;
///
/// let d = TravelDate::find_in("Depart · Fri, Oct 3").unwrap();
/// assert_eq!(d.to_string(), "03OCT");
/// assert_eq!(d.gds_weekday(), Some('F'));
///
/// let next = d.succ();
/// assert_eq!(next.to_string(), "04OCT");
/// assert_eq!(next.gds_weekday(), Some('J'));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TravelDate {
    day: u8,
    month: Month,
    weekday: Option<Weekday>,
    year: Option<i32>,
}

impl TravelDate {
    /// Create a date from day and month, validating the day.
    ///
    /// February 29 is accepted without a year.
    pub fn new(day: u32, month: Month) -> Result<Self, InvalidDate> {
        let max = match month {
            Month::February => 29,
            m => u32::from(DAYS_IN_MONTH[month_index(m)]),
        };
        if day == 0 || day > max {
            return Err(InvalidDate {
                reason: "day out of range for month",
            });
        }
        Ok(Self {
            day: day as u8,
            month,
            weekday: None,
            year: None,
        })
    }

    /// Attach a known year. The weekday is recomputed from the calendar.
    pub fn with_year(mut self, year: i32) -> Result<Self, InvalidDate> {
        let date = NaiveDate::from_ymd_opt(year, self.month.number_from_month(), self.day())
            .ok_or(InvalidDate {
                reason: "day does not exist in that year",
            })?;
        self.year = Some(year);
        self.weekday = Some(date.weekday());
        Ok(self)
    }

    /// Attach a weekday read from text. Ignored when the year is known.
    pub fn with_weekday(mut self, weekday: Weekday) -> Self {
        if self.year.is_none() {
            self.weekday = Some(weekday);
        }
        self
    }

    pub fn day(&self) -> u32 {
        u32::from(self.day)
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn weekday(&self) -> Option<Weekday> {
        self.weekday
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Find the first date mentioned in a line of text.
    pub fn find_in(text: &str) -> Option<Self> {
        Self::locate(text).map(|(_, date)| date)
    }

    /// Parse a line that contains nothing but a date (and optional weekday).
    ///
    /// ```
    /// use itinerary_gds::domain::TravelDate;
    ///
    /// assert!(TravelDate::parse_exact("Fri, Oct 3").is_some());
    /// assert!(TravelDate::parse_exact("3 October 2025").is_some());
    /// assert!(TravelDate::parse_exact("Arrives Fri, Oct 3").is_none());
    /// ```
    pub fn parse_exact(text: &str) -> Option<Self> {
        let (spans, date) = Self::locate(text)?;
        let mut residue = String::with_capacity(text.len());
        let mut pos = 0;
        for span in spans {
            if span.start >= pos {
                residue.push_str(&text[pos..span.start]);
                pos = span.end;
            }
        }
        residue.push_str(&text[pos..]);
        if residue.chars().any(char::is_alphanumeric) {
            return None;
        }
        Some(date)
    }

    /// Locate a date in text, returning the spans it occupies (sorted).
    fn locate(text: &str) -> Option<(Vec<Range<usize>>, Self)> {
        let (date_span, day, month, year) = MONTH_DAY_RE
            .captures(text)
            .and_then(|caps| {
                let month = parse_month(&caps[1])?;
                let day: u32 = caps[2].parse().ok()?;
                let year = caps.get(3).and_then(|m| m.as_str().parse().ok());
                Some((caps.get(0)?.range(), day, month, year))
            })
            .or_else(|| {
                DAY_MONTH_RE.captures(text).and_then(|caps| {
                    let day: u32 = caps[1].parse().ok()?;
                    let month = parse_month(&caps[2])?;
                    let year = caps.get(3).and_then(|m| m.as_str().parse().ok());
                    Some((caps.get(0)?.range(), day, month, year))
                })
            })?;

        let mut date = Self::new(day, month).ok()?;
        let mut spans = vec![date_span];

        if let Some(m) = WEEKDAY_RE.find(text) {
            if let Some(weekday) = parse_weekday(m.as_str()) {
                date = date.with_weekday(weekday);
                spans.push(m.range());
            }
        }
        if let Some(year) = year {
            date = date.with_year(year).ok()?;
        }

        spans.sort_by_key(|r| r.start);
        Some((spans, date))
    }

    /// The following calendar day.
    ///
    /// Without a year, February is assumed to have 28 days unless the date
    /// is already February 29.
    pub fn succ(&self) -> Self {
        if let Some(year) = self.year {
            let next = NaiveDate::from_ymd_opt(year, self.month.number_from_month(), self.day())
                .and_then(|d| d.succ_opt());
            if let Some(next) = next {
                return Self {
                    day: next.day() as u8,
                    month: self.month_of(next),
                    weekday: Some(next.weekday()),
                    year: Some(next.year()),
                };
            }
        }

        let last_day = match self.month {
            Month::February if self.day == 29 => 29,
            m => DAYS_IN_MONTH[month_index(m)],
        };
        let (day, month) = if self.day >= last_day {
            (1, self.month.succ())
        } else {
            (self.day + 1, self.month)
        };
        Self {
            day,
            month,
            weekday: self.weekday.map(|w| w.succ()),
            year: None,
        }
    }

    /// Advance by a number of days.
    pub fn add_days(&self, days: u32) -> Self {
        (0..days).fold(*self, |d, _| d.succ())
    }

    /// Approximate day of year (1-366), ignoring leap years.
    pub fn ordinal(&self) -> u32 {
        MONTH_OFFSETS[month_index(self.month)] + self.day()
    }

    /// Three-letter uppercase month code (`OCT`).
    pub fn month_code(&self) -> String {
        self.month.name()[..3].to_ascii_uppercase()
    }

    /// Single-letter reservation weekday code, Monday to Sunday `M T W Q F J S`.
    pub fn gds_weekday(&self) -> Option<char> {
        self.weekday.map(|w| match w {
            Weekday::Mon => 'M',
            Weekday::Tue => 'T',
            Weekday::Wed => 'W',
            Weekday::Thu => 'Q',
            Weekday::Fri => 'F',
            Weekday::Sat => 'J',
            Weekday::Sun => 'S',
        })
    }

    fn month_of(&self, date: NaiveDate) -> Month {
        Month::try_from(date.month() as u8).unwrap_or(self.month)
    }
}

impl fmt::Debug for TravelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TravelDate({}", self)?;
        if let Some(w) = self.weekday {
            write!(f, " {w}")?;
        }
        if let Some(y) = self.year {
            write!(f, " {y}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for TravelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{}", self.day, self.month_code())
    }
}

impl Serialize for TravelDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn month_index(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

fn parse_month(token: &str) -> Option<Month> {
    let lower = token.to_ascii_lowercase();
    let month = match lower.get(..3)? {
        "jan" => Month::January,
        "feb" => Month::February,
        "mar" => Month::March,
        "apr" => Month::April,
        "may" => Month::May,
        "jun" => Month::June,
        "jul" => Month::July,
        "aug" => Month::August,
        "sep" => Month::September,
        "oct" => Month::October,
        "nov" => Month::November,
        "dec" => Month::December,
        _ => return None,
    };
    Some(month)
}

fn parse_weekday(token: &str) -> Option<Weekday> {
    let lower = token.to_ascii_lowercase();
    let weekday = match lower.get(..3)? {
        "mon" => Weekday::Mon,
        "tue" => Weekday::Tue,
        "wed" => Weekday::Wed,
        "thu" => Weekday::Thu,
        "fri" => Weekday::Fri,
        "sat" => Weekday::Sat,
        "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_date() -> impl Strategy<Value = TravelDate> {
        (1u32..=12, 1u32..=28).prop_map(|(m, d)| {
            let month = Month::try_from(m as u8).unwrap();
            TravelDate::new(d, month).unwrap()
        })
    }

    proptest! {
        /// Stepping a day never decreases the ordinal except at year end
        #[test]
        fn succ_moves_forward(d in valid_date()) {
            let next = d.succ();
            if d.ordinal() < 365 {
                prop_assert_eq!(next.ordinal(), d.ordinal() + 1);
            }
        }

        /// Rendered dates are found again in text
        #[test]
        fn display_is_rediscovered(d in valid_date()) {
            let text = format!("{} {}", d.month().name(), d.day());
            let found = TravelDate::find_in(&text).unwrap();
            prop_assert_eq!(found, d);
        }
    }
}
