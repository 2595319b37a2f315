//! Availability search command.

use crate::domain::Segment;
use crate::error::ConvertError;

/// Yen sign: marks the carrier of each segment.
const CARRIER_MARKER: char = '¥';

/// Build a single availability command for a run of segments.
///
/// `1<DDMON><ORIG><DEST>`, then `12A` and the transit airports when the
/// trip is not nonstop, then one carrier marker per segment. In detailed
/// mode the first departure time follows the city pair and each transit
/// carries its layover in minutes (`CDG-95`).
///
/// # Errors
///
/// `NoSegments` for an empty slice, `MissingField` when the first segment
/// has no departure date.
pub fn format_availability(segments: &[Segment], detailed: bool) -> Result<String, ConvertError> {
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return Err(ConvertError::NoSegments);
    };
    let date = first.dep_date.ok_or(ConvertError::MissingField {
        segment: 1,
        field: "departure date",
    })?;

    let mut out = format!("1{date}{}{}", first.dep_airport, last.arr_airport);
    if detailed {
        out.push_str(&first.dep_gds());
    }

    if segments.len() > 1 {
        let transits: Vec<String> = segments
            .windows(2)
            .map(|pair| {
                let airport = pair[0].arr_airport;
                if detailed {
                    format!("{airport}-{}", pair[0].layover_before(&pair[1]))
                } else {
                    airport.to_string()
                }
            })
            .collect();
        out.push_str("12A");
        out.push_str(&transits.join("/"));
    }

    for seg in segments {
        out.push(CARRIER_MARKER);
        out.push_str(seg.airline_code.as_str());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelDate;
    use crate::domain::segment::test_support::segment;
    use chrono::Month;

    fn oct(day: u32) -> Option<TravelDate> {
        Some(TravelDate::new(day, Month::October).unwrap())
    }

    #[test]
    fn nonstop() {
        let segs = vec![segment("AF", "7", "JFK", (18, 0), "CDG", (7, 15), oct(3))];
        assert_eq!(format_availability(&segs, false).unwrap(), "103OCTJFKCDG¥AF");
    }

    #[test]
    fn transits_listed_in_order() {
        let segs = vec![
            segment("DL", "10", "ATL", (8, 0), "BOS", (10, 30), oct(3)),
            segment("B6", "20", "BOS", (11, 30), "CDG", (23, 0), oct(3)),
            segment("AF", "30", "CDG", (23, 55), "DUB", (0, 50), oct(3)),
        ];
        assert_eq!(
            format_availability(&segs, false).unwrap(),
            "103OCTATLDUB12ABOS/CDG¥DL¥B6¥AF"
        );
    }

    #[test]
    fn detailed_adds_time_and_layovers() {
        let segs = vec![
            segment("AF", "7", "JFK", (8, 0), "CDG", (10, 0), oct(3)),
            segment("AF", "1204", "CDG", (11, 35), "FCO", (13, 40), oct(3)),
        ];
        assert_eq!(
            format_availability(&segs, true).unwrap(),
            "103OCTJFKFCO800A12ACDG-95¥AF¥AF"
        );
    }

    #[test]
    fn requires_first_departure_date() {
        let segs = vec![segment("AF", "7", "JFK", (8, 0), "CDG", (10, 0), None)];
        assert_eq!(
            format_availability(&segs, false),
            Err(ConvertError::MissingField {
                segment: 1,
                field: "departure date"
            })
        );
        assert_eq!(format_availability(&[], false), Err(ConvertError::NoSegments));
    }
}
