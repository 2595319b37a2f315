//! Journey types.
//!
//! A `Journey` is a contiguous run of segments forming one logical leg of a
//! trip (JFK → CDG → FCO), possibly one of several in a multi-city booking.

use std::ops::RangeInclusive;

use serde::Serialize;

use super::{AirportCode, DomainError, Segment, TravelDate};

/// A contiguous, inclusive range of segments forming one journey.
///
/// # Invariants
///
/// - `start_idx <= end_idx`, both within the segment list it was built from
/// - `origin` is the first segment's departure airport, `dest` the last
///   segment's arrival airport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub start_idx: usize,
    pub end_idx: usize,
    pub origin: AirportCode,
    pub dest: AirportCode,
    /// Declared by a "Flight N" header rather than inferred
    pub explicit: bool,
    /// 1-based display order
    pub index_hint: usize,
    pub header_date: Option<TravelDate>,
}

impl Journey {
    /// Build a journey over `segments[start..=end]`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the range is empty or out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_gds::domain::{Journey, DomainError};
    ///
    /// assert!(matches!(
    ///     Journey::from_range(&[], 0, 0, false, 1, None),
    ///     Err(DomainError::InvalidJourneyRange { .. })
    /// ));
    /// ```
    pub fn from_range(
        segments: &[Segment],
        start: usize,
        end: usize,
        explicit: bool,
        index_hint: usize,
        header_date: Option<TravelDate>,
    ) -> Result<Self, DomainError> {
        if start > end || end >= segments.len() {
            return Err(DomainError::InvalidJourneyRange {
                start,
                end,
                len: segments.len(),
            });
        }

        Ok(Journey {
            start_idx: start,
            end_idx: end,
            origin: segments[start].dep_airport,
            dest: segments[end].arr_airport,
            explicit,
            index_hint,
            header_date,
        })
    }

    /// The segment indices covered by this journey.
    pub fn range(&self) -> RangeInclusive<usize> {
        self.start_idx..=self.end_idx
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.range().contains(&idx)
    }

    /// Label for a copy control, e.g. "1 JFK-CDG".
    pub fn label(&self) -> String {
        format!("{} {}-{}", self.index_hint, self.origin, self.dest)
    }

    /// Whether `other` retraces this journey in reverse (simple out-and-back).
    pub fn mirrors(&self, other: &Journey) -> bool {
        self.origin == other.dest && self.dest == other.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::segment::test_support::segment;

    fn three_segments() -> Vec<Segment> {
        vec![
            segment("AF", "7", "JFK", (18, 0), "CDG", (7, 15), None),
            segment("AF", "1204", "CDG", (9, 0), "FCO", (11, 5), None),
            segment("AZ", "610", "FCO", (10, 0), "JFK", (13, 30), None),
        ]
    }

    #[test]
    fn from_range_takes_endpoints() {
        let segs = three_segments();
        let j = Journey::from_range(&segs, 0, 1, true, 1, None).unwrap();
        assert_eq!(j.origin.as_str(), "JFK");
        assert_eq!(j.dest.as_str(), "FCO");
        assert_eq!(j.range().count(), 2);
        assert!(j.contains(1));
        assert!(!j.contains(2));
        assert_eq!(j.label(), "1 JFK-FCO");
    }

    #[test]
    fn from_range_rejects_bad_bounds() {
        let segs = three_segments();
        assert!(Journey::from_range(&segs, 2, 1, false, 1, None).is_err());
        assert!(Journey::from_range(&segs, 0, 3, false, 1, None).is_err());
    }

    #[test]
    fn mirror_detection() {
        let segs = three_segments();
        let out = Journey::from_range(&segs, 0, 1, false, 1, None).unwrap();
        let back = Journey::from_range(&segs, 2, 2, false, 2, None).unwrap();
        assert!(out.mirrors(&back));

        let first = Journey::from_range(&segs, 0, 0, false, 1, None).unwrap();
        let second = Journey::from_range(&segs, 1, 1, false, 2, None).unwrap();
        assert!(!first.mirrors(&second));
    }

    #[test]
    fn serializes_camel_case() {
        let segs = three_segments();
        let j = Journey::from_range(&segs, 0, 1, true, 1, None).unwrap();
        let json = serde_json::to_value(&j).unwrap();
        assert_eq!(json["startIdx"], 0);
        assert_eq!(json["endIdx"], 1);
        assert_eq!(json["indexHint"], 1);
        assert_eq!(json["origin"], "JFK");
        assert_eq!(json["explicit"], true);
    }
}
