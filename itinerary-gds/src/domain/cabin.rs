//! Marketed cabin types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a cabin name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cabin: {0}")]
pub struct UnknownCabin(String);

/// A marketed service class, independent of the booking letter that sells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Cabin {
    First,
    Business,
    Premium,
    Economy,
}

/// Synonyms, most specific first.
const SYNONYMS: &[(&str, Cabin)] = &[
    ("premium economy", Cabin::Premium),
    ("premium select", Cabin::Premium),
    ("premium plus", Cabin::Premium),
    ("world traveller plus", Cabin::Premium),
    ("economy plus", Cabin::Premium),
    ("premium", Cabin::Premium),
    ("basic economy", Cabin::Economy),
    ("main cabin", Cabin::Economy),
    ("world traveller", Cabin::Economy),
    ("economy", Cabin::Economy),
    ("coach", Cabin::Economy),
    ("standard", Cabin::Economy),
    ("upper class", Cabin::Business),
    ("business", Cabin::Business),
    ("club world", Cabin::Business),
    ("club", Cabin::Business),
    ("polaris", Cabin::Business),
    ("delta one", Cabin::Business),
    ("first", Cabin::First),
    ("la premiere", Cabin::First),
];

impl Cabin {
    /// Normalise free cabin text to a cabin.
    ///
    /// ```
    /// use itinerary_gds::domain::Cabin;
    ///
    /// assert_eq!(Cabin::from_text("Premium Economy"), Some(Cabin::Premium));
    /// assert_eq!(Cabin::from_text("Basic Economy"), Some(Cabin::Economy));
    /// assert_eq!(Cabin::from_text("Upper Class"), Some(Cabin::Business));
    /// assert_eq!(Cabin::from_text("Lounge"), None);
    /// ```
    pub fn from_text(text: &str) -> Option<Cabin> {
        let lower = text.trim().to_lowercase();
        SYNONYMS
            .iter()
            .find(|(name, _)| lower.starts_with(name))
            .map(|(_, cabin)| *cabin)
    }

    /// Length of the cabin phrase at the start of `text`, when there is one.
    pub(crate) fn match_prefix(text: &str) -> Option<(Cabin, usize)> {
        let lower = text.to_ascii_lowercase();
        SYNONYMS.iter().find_map(|(name, cabin)| {
            let rest = lower.strip_prefix(name)?;
            let at_boundary = rest.chars().next().is_none_or(|c| !c.is_alphanumeric());
            at_boundary.then_some((*cabin, name.len()))
        })
    }

    /// Booking letter used when no table has an entry for this cabin.
    pub fn fixed_default(&self) -> char {
        match self {
            Cabin::First => 'F',
            Cabin::Business => 'J',
            Cabin::Premium => 'N',
            Cabin::Economy => 'Y',
        }
    }

    /// The cabin sold instead on short-haul sectors, if any.
    pub fn short_haul_equivalent(&self) -> Option<Cabin> {
        match self {
            Cabin::First => Some(Cabin::Business),
            Cabin::Premium => Some(Cabin::Economy),
            Cabin::Business | Cabin::Economy => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cabin::First => "FIRST",
            Cabin::Business => "BUSINESS",
            Cabin::Premium => "PREMIUM",
            Cabin::Economy => "ECONOMY",
        }
    }
}

impl fmt::Display for Cabin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cabin {
    type Err = UnknownCabin;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cabin::from_text(s).ok_or_else(|| UnknownCabin(s.to_string()))
    }
}

impl TryFrom<String> for Cabin {
    type Error = UnknownCabin;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
