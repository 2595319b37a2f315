//! Static reference data.
//!
//! Airline-name lookup, booking-letter tables and short-haul airport
//! regions. The parser and resolver take a `&ReferenceData` rather than
//! reaching for globals, so tests can substitute their own tables.

mod airlines;
mod booking;
mod regions;

use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use crate::domain::{AirportCode, Cabin, CarrierCode};

pub use regions::Region;

static BUILTIN: LazyLock<ReferenceData> = LazyLock::new(ReferenceData::from_static_tables);

/// Read-only lookup tables consumed by the parser and booking resolver.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Lowercased airline names, longest first
    airline_names: Vec<(String, CarrierCode)>,
    booking: HashMap<CarrierCode, HashMap<Cabin, Vec<char>>>,
    generic: HashMap<Cabin, Vec<char>>,
    regions: HashMap<AirportCode, Region>,
}

impl ReferenceData {
    /// Empty tables; populate with the `with_*` builders.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped tables, built once.
    pub fn builtin() -> &'static ReferenceData {
        &BUILTIN
    }

    fn from_static_tables() -> Self {
        let mut data = Self::new();
        for (name, code) in airlines::AIRLINE_NAMES {
            if let Ok(code) = CarrierCode::parse(code) {
                data = data.with_airline(name, code);
            }
        }
        for (code, cabins) in booking::CARRIER_LETTERS {
            if let Ok(code) = CarrierCode::parse(code) {
                for (cabin, letters) in *cabins {
                    data = data.with_booking(code, *cabin, letters);
                }
            }
        }
        for (cabin, letters) in booking::GENERIC_LETTERS {
            data = data.with_generic(*cabin, letters);
        }
        for (region, airports) in regions::SHORT_HAUL_REGIONS {
            for airport in *airports {
                if let Ok(code) = AirportCode::parse(airport) {
                    data = data.with_region(code, *region);
                }
            }
        }
        data
    }

    /// Register an airline name (matched case-insensitively on word boundaries).
    pub fn with_airline(mut self, name: &str, code: CarrierCode) -> Self {
        self.airline_names.push((name.to_ascii_lowercase(), code));
        self.airline_names
            .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        self
    }

    /// Register a carrier's booking letters for a cabin, preferred first.
    /// Letters are given as a string; whitespace is ignored.
    pub fn with_booking(mut self, carrier: CarrierCode, cabin: Cabin, letters: &str) -> Self {
        self.booking
            .entry(carrier)
            .or_default()
            .insert(cabin, parse_letters(letters));
        self
    }

    /// Register the cross-airline letters for a cabin.
    pub fn with_generic(mut self, cabin: Cabin, letters: &str) -> Self {
        self.generic.insert(cabin, parse_letters(letters));
        self
    }

    /// Place an airport in a short-haul region.
    pub fn with_region(mut self, airport: AirportCode, region: Region) -> Self {
        self.regions.insert(airport, region);
        self
    }

    /// Find the longest known airline name in `line`.
    ///
    /// Returns the carrier and the byte range of the name.
    ///
    /// ```
    /// use itinerary_gds::tables::ReferenceData;
    ///
    /// let data = ReferenceData::builtin();
    /// let (code, range) = data.find_airline("Air France 7").unwrap();
    /// assert_eq!(code.as_str(), "AF");
    /// assert_eq!(range, 0..10);
    /// ```
    pub fn find_airline(&self, line: &str) -> Option<(CarrierCode, Range<usize>)> {
        let lower = line.to_ascii_lowercase();
        self.airline_names.iter().find_map(|(name, code)| {
            find_word(&lower, name).map(|start| (*code, start..start + name.len()))
        })
    }

    /// A carrier's letters for a cabin. `None` when the carrier has no table;
    /// `Some(&[])` when it has a table but no such cabin.
    pub fn carrier_letters(&self, carrier: CarrierCode, cabin: Cabin) -> Option<&[char]> {
        self.booking
            .get(&carrier)
            .map(|cabins| cabins.get(&cabin).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Cross-airline letters for a cabin.
    pub fn generic_letters(&self, cabin: Cabin) -> &[char] {
        self.generic.get(&cabin).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn region(&self, airport: AirportCode) -> Option<Region> {
        self.regions.get(&airport).copied()
    }
}

fn parse_letters(letters: &str) -> Vec<char> {
    letters
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Byte offset of the first whole-word occurrence of `needle` in `haystack`.
fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();
        let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return Some(start);
        }
        from = start + 1;
        while !haystack.is_char_boundary(from) {
            from += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier(s: &str) -> CarrierCode {
        CarrierCode::parse(s).unwrap()
    }

    #[test]
    fn builtin_tables_load() {
        let data = ReferenceData::builtin();
        assert!(data.airline_names.len() >= airlines::AIRLINE_NAMES.len());
        assert!(data.carrier_letters(carrier("AA"), Cabin::Economy).is_some());
        assert!(!data.generic_letters(Cabin::Economy).is_empty());
    }

    #[test]
    fn every_static_code_is_valid() {
        for (_, code) in airlines::AIRLINE_NAMES {
            assert!(CarrierCode::parse(code).is_ok(), "bad carrier {code}");
        }
        for (code, _) in booking::CARRIER_LETTERS {
            assert!(CarrierCode::parse(code).is_ok(), "bad carrier {code}");
        }
        for (_, airports) in regions::SHORT_HAUL_REGIONS {
            for airport in *airports {
                assert!(AirportCode::parse(airport).is_ok(), "bad airport {airport}");
            }
        }
    }

    #[test]
    fn longest_airline_name_wins() {
        let data = ReferenceData::new()
            .with_airline("American", carrier("AA"))
            .with_airline("American Eagle", carrier("MQ"));
        let (code, range) = data.find_airline("American Eagle 3301").unwrap();
        assert_eq!(code, carrier("MQ"));
        assert_eq!(range, 0..14);
    }

    #[test]
    fn airline_names_need_word_boundaries() {
        let data = ReferenceData::new().with_airline("ANA", carrier("NH"));
        assert!(data.find_airline("Havana (HAV)").is_none());
        assert!(data.find_airline("ana 10").is_some());
    }

    #[test]
    fn carrier_letters_distinguish_missing_table_from_missing_cabin() {
        let data = ReferenceData::new().with_booking(carrier("KL"), Cabin::Business, "J C D");
        assert_eq!(data.carrier_letters(carrier("KL"), Cabin::Business), Some(&['J', 'C', 'D'][..]));
        assert_eq!(data.carrier_letters(carrier("KL"), Cabin::First), Some(&[][..]));
        assert_eq!(data.carrier_letters(carrier("XQ"), Cabin::First), None);
    }

    #[test]
    fn find_word_skips_embedded_matches() {
        assert_eq!(find_word("delta one delta", "delta"), Some(0));
        assert_eq!(find_word("xdelta delta", "delta"), Some(7));
        assert_eq!(find_word("deltas", "delta"), None);
    }
}
