//! Conversion options.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::domain::{Cabin, Direction};

/// Which half of a round trip to output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionFilter {
    #[default]
    All,
    Outbound,
    Inbound,
}

impl DirectionFilter {
    pub fn admits(&self, direction: Direction) -> bool {
        match self {
            DirectionFilter::All => true,
            DirectionFilter::Outbound => direction == Direction::Outbound,
            DirectionFilter::Inbound => direction == Direction::Inbound,
        }
    }
}

impl fmt::Display for DirectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DirectionFilter::All => "all",
            DirectionFilter::Outbound => "outbound",
            DirectionFilter::Inbound => "inbound",
        })
    }
}

/// Error returned when parsing an unknown direction filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction {0:?}, expected all, outbound or inbound")]
pub struct UnknownDirection(String);

impl FromStr for DirectionFilter {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(DirectionFilter::All),
            "outbound" | "out" => Ok(DirectionFilter::Outbound),
            "inbound" | "in" | "return" => Ok(DirectionFilter::Inbound),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

/// Error returned when a booking class is not a single letter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid booking class {0:?}, expected one letter A-Z")]
pub struct InvalidBookingClass(String);

/// Parse a booking class: one ASCII letter, returned uppercase.
///
/// ```
/// use itinerary_gds::config::parse_booking_class;
///
/// assert_eq!(parse_booking_class("y"), Ok('Y'));
/// assert!(parse_booking_class("7").is_err());
/// ```
pub fn parse_booking_class(s: &str) -> Result<char, InvalidBookingClass> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(InvalidBookingClass(s.to_string())),
    }
}

fn booking_class<'de, D: Deserializer<'de>>(deserializer: D) -> Result<char, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse_booking_class(&s).map_err(serde::de::Error::custom)
}

/// Errors loading an options file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for a conversion. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Letter used when neither the text nor a cabin yields one.
    #[serde(deserialize_with = "booking_class")]
    pub booking_class: char,

    /// Status code appended to each itinerary line (`SS1`). Empty omits it.
    pub segment_status: String,

    pub direction: DirectionFilter,

    /// Inclusive `[start, end]` indices into the full parsed segment list.
    pub segment_range: Option<(usize, usize)>,

    /// 1-based journey number, as shown in journey labels.
    pub journey_index: Option<usize>,

    /// Cabin assumed for segments whose text names none.
    pub auto_cabin: Option<Cabin>,

    /// Include departure time and layover minutes in the availability
    /// command.
    pub detailed_availability: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            booking_class: 'Y',
            segment_status: "SS1".to_string(),
            direction: DirectionFilter::All,
            segment_range: None,
            journey_index: None,
            auto_cabin: None,
            detailed_availability: false,
        }
    }
}

impl ConvertOptions {
    /// Parse options from JSON; missing keys take their defaults.
    ///
    /// ```
    /// use itinerary_gds::config::{ConvertOptions, DirectionFilter};
    ///
    /// let opts = ConvertOptions::from_json(r#"{"bookingClass": "J", "direction": "inbound"}"#).unwrap();
    /// assert_eq!(opts.booking_class, 'J');
    /// assert_eq!(opts.direction, DirectionFilter::Inbound);
    /// assert_eq!(opts.segment_status, "SS1");
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
