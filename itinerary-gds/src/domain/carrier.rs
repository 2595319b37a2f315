//! Carrier designator and flight number types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid carrier designator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid carrier code: {reason}")]
pub struct InvalidCarrierCode {
    reason: &'static str,
}

/// A 2 or 3 character airline designator.
///
/// Two-character IATA designators may mix letters and digits (`AF`, `B6`,
/// `9W`) but must contain at least one letter. Three-character designators
/// are ICAO-style and must be all letters.
///
/// # Examples
///
/// ```
/// use itinerary_gds::domain::CarrierCode;
///
/// assert_eq!(CarrierCode::parse("AF").unwrap().as_str(), "AF");
/// assert!(CarrierCode::parse("B6").is_ok());
/// assert!(CarrierCode::parse("KLM").is_ok());
///
/// assert!(CarrierCode::parse("12").is_err());
/// assert!(CarrierCode::parse("A33").is_err());
/// assert!(CarrierCode::parse("af").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarrierCode {
    bytes: [u8; 3],
    len: u8,
}

impl CarrierCode {
    /// Sentinel used when the operating airline cannot be identified.
    pub const UNKNOWN: CarrierCode = CarrierCode {
        bytes: *b"YY ",
        len: 2,
    };

    /// Parse a carrier designator from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidCarrierCode> {
        let bytes = s.as_bytes();

        match bytes.len() {
            2 => {
                if !bytes
                    .iter()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
                {
                    return Err(InvalidCarrierCode {
                        reason: "must be uppercase letters or digits",
                    });
                }
                if !bytes.iter().any(u8::is_ascii_uppercase) {
                    return Err(InvalidCarrierCode {
                        reason: "must contain at least one letter",
                    });
                }
                Ok(CarrierCode {
                    bytes: [bytes[0], bytes[1], b' '],
                    len: 2,
                })
            }
            3 => {
                if !bytes.iter().all(u8::is_ascii_uppercase) {
                    return Err(InvalidCarrierCode {
                        reason: "3-character codes must be uppercase letters",
                    });
                }
                Ok(CarrierCode {
                    bytes: [bytes[0], bytes[1], bytes[2]],
                    len: 3,
                })
            }
            _ => Err(InvalidCarrierCode {
                reason: "must be 2 or 3 characters",
            }),
        }
    }

    /// Returns the designator as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    /// Returns true for the unresolved-carrier sentinel.
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl fmt::Debug for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CarrierCode({})", self.as_str())
    }
}

impl fmt::Display for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CarrierCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Error returned when parsing an invalid flight number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flight number: {reason}")]
pub struct InvalidFlightNumber {
    reason: &'static str,
}

/// A flight number of 1-4 digits, stored without leading zeros.
///
/// ```
/// use itinerary_gds::domain::FlightNumber;
///
/// assert_eq!(FlightNumber::parse("007").unwrap().as_str(), "7");
/// assert_eq!(FlightNumber::parse("1234").unwrap().as_str(), "1234");
/// assert!(FlightNumber::parse("12345").is_err());
/// assert!(FlightNumber::parse("0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlightNumber(u16);

impl FlightNumber {
    /// Parse a flight number from a string of 1-4 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidFlightNumber> {
        if s.is_empty() || s.len() > 4 {
            return Err(InvalidFlightNumber {
                reason: "must be 1-4 digits",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidFlightNumber {
                reason: "must be ASCII digits",
            });
        }
        let value: u16 = s.parse().map_err(|_| InvalidFlightNumber {
            reason: "must be 1-4 digits",
        })?;
        if value == 0 {
            return Err(InvalidFlightNumber {
                reason: "must not be zero",
            });
        }
        Ok(FlightNumber(value))
    }

    /// Returns the flight number digits.
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    /// Number of digits in the flight number.
    pub fn digits(&self) -> usize {
        self.as_str().len()
    }
}

impl fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FlightNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_carrier_codes() {
        assert!(CarrierCode::parse("AF").is_ok()); // Air France
        assert!(CarrierCode::parse("B6").is_ok()); // JetBlue
        assert!(CarrierCode::parse("9W").is_ok());
        assert!(CarrierCode::parse("U2").is_ok()); // easyJet
        assert!(CarrierCode::parse("KLM").is_ok());
    }

    #[test]
    fn reject_invalid_carrier_codes() {
        assert!(CarrierCode::parse("").is_err());
        assert!(CarrierCode::parse("A").is_err());
        assert!(CarrierCode::parse("12").is_err());
        assert!(CarrierCode::parse("af").is_err());
        assert!(CarrierCode::parse("A3X9").is_err());
        assert!(CarrierCode::parse("A33").is_err());
        assert!(CarrierCode::parse("A-").is_err());
    }

    #[test]
    fn unknown_sentinel() {
        assert_eq!(CarrierCode::UNKNOWN.as_str(), "YY");
        assert!(CarrierCode::UNKNOWN.is_unknown());
        assert_eq!(CarrierCode::parse("YY").unwrap(), CarrierCode::UNKNOWN);
        assert!(!CarrierCode::parse("AF").unwrap().is_unknown());
    }

    #[test]
    fn carrier_display_and_debug() {
        let code = CarrierCode::parse("KLM").unwrap();
        assert_eq!(code.to_string(), "KLM");
        assert_eq!(format!("{:?}", code), "CarrierCode(KLM)");
    }

    #[test]
    fn flight_number_strips_leading_zeros() {
        let n = FlightNumber::parse("0042").unwrap();
        assert_eq!(n.as_str(), "42");
        assert_eq!(n.digits(), 2);
    }

    #[test]
    fn flight_number_rejects_garbage() {
        assert!(FlightNumber::parse("").is_err());
        assert!(FlightNumber::parse("12a").is_err());
        assert!(FlightNumber::parse("00000").is_err());
        assert!(FlightNumber::parse("0000").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Two uppercase letters always form a valid designator
        #[test]
        fn two_letters_valid(s in "[A-Z]{2}") {
            let code = CarrierCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Two digits never form a valid designator
        #[test]
        fn two_digits_invalid(s in "[0-9]{2}") {
            prop_assert!(CarrierCode::parse(&s).is_err());
        }

        /// Non-zero flight numbers roundtrip through their integer value
        #[test]
        fn flight_number_roundtrip(n in 1u16..10000) {
            let parsed = FlightNumber::parse(&n.to_string()).unwrap();
            prop_assert_eq!(parsed.as_str(), n.to_string());
        }
    }
}
