//! Itinerary command lines ("sell" entries), one per segment.

use crate::domain::{Segment, TravelDate};
use crate::error::ConvertError;

/// Flight numbers shorter than this are separated from the carrier by a space.
const JOINED_NUMBER_DIGITS: usize = 4;

/// Render one itinerary line. `seq` is the 1-based line number.
///
/// Returns `None` when the segment has no departure date.
///
/// ```
/// use chrono::{Month, Weekday};
/// use itinerary_gds::domain::*;
/// use itinerary_gds::format::itinerary_line;
///
/// let date = TravelDate::new(3, Month::October).unwrap().with_weekday(Weekday::Fri);
/// let seg = Segment {
///     airline_code: CarrierCode::parse("AF").unwrap(),
///     number: FlightNumber::parse("7").unwrap(),
///     dep_airport: AirportCode::parse("JFK").unwrap(),
///     arr_airport: AirportCode::parse("CDG").unwrap(),
///     dep_time: ClockTime::from_hm(18, 0).unwrap(),
///     arr_time: ClockTime::from_hm(7, 15).unwrap(),
///     dep_date: Some(date),
///     arr_date: None,
///     arrival_day_offset: 1,
///     booking_class: None,
///     cabin: None,
///     duration_minutes: None,
///     direction: Direction::Outbound,
///     route: None,
///     header_ref: None,
/// };
/// assert_eq!(
///     itinerary_line(1, &seg, 'J', "SS1").unwrap(),
///     " 1 AF 7J 03OCT F JFKCDG*SS1 600P 715A 04OCT /DCAF /E"
/// );
/// ```
pub fn itinerary_line(seq: usize, segment: &Segment, class: char, status: &str) -> Option<String> {
    let dep_date = segment.dep_date?;

    let carrier = segment.airline_code;
    let designator = if segment.number.digits() < JOINED_NUMBER_DIGITS {
        format!("{carrier} {}{class}", segment.number)
    } else {
        format!("{carrier}{}{class}", segment.number)
    };

    let date = match segment.dep_dow() {
        Some(dow) => format!("{dep_date} {dow}"),
        None => dep_date.to_string(),
    };

    let status = if status.is_empty() {
        String::new()
    } else {
        format!("*{status}")
    };

    let arrival = segment
        .arrival_date()
        .filter(|arr| !same_day(arr, &dep_date))
        .map(|arr| format!(" {arr}"))
        .unwrap_or_default();

    Some(format!(
        "{seq:>2} {designator} {date} {}{}{status} {} {}{arrival} /DC{carrier} /E",
        segment.dep_airport,
        segment.arr_airport,
        segment.dep_gds(),
        segment.arr_gds(),
    ))
}

/// Render segments as itinerary lines numbered from 1, joined by newlines.
///
/// `class_of` picks the booking letter for each segment.
///
/// # Errors
///
/// `NoSegments` for an empty slice, `MissingField` when a segment has no
/// departure date.
pub fn format_itinerary<F>(segments: &[Segment], class_of: F, status: &str) -> Result<String, ConvertError>
where
    F: Fn(&Segment) -> char,
{
    if segments.is_empty() {
        return Err(ConvertError::NoSegments);
    }

    let lines = segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            itinerary_line(i + 1, seg, class_of(seg), status).ok_or(ConvertError::MissingField {
                segment: i + 1,
                field: "departure date",
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(lines.join("\n"))
}

fn same_day(a: &TravelDate, b: &TravelDate) -> bool {
    a.day() == b.day() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::segment::test_support::segment;
    use chrono::{Month, Weekday};

    fn oct(day: u32) -> Option<TravelDate> {
        Some(TravelDate::new(day, Month::October).unwrap())
    }

    #[test]
    fn renumbers_from_one() {
        let segs = vec![
            segment("AF", "1204", "CDG", (9, 0), "FCO", (11, 5), oct(4)),
            segment("AZ", "610", "FCO", (13, 0), "JFK", (16, 30), oct(4)),
        ];
        let out = format_itinerary(&segs, |_| 'Y', "SS1").unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], " 1 AF1204Y 04OCT CDGFCO*SS1 900A 1105A /DCAF /E");
        assert_eq!(lines[1], " 2 AZ 610Y 04OCT FCOJFK*SS1 100P 430P /DCAZ /E");
    }

    #[test]
    fn class_callback_is_per_segment() {
        let segs = vec![
            segment("AF", "7", "JFK", (8, 0), "CDG", (20, 0), oct(3)),
            segment("KL", "1234", "CDG", (21, 0), "AMS", (22, 15), oct(3)),
        ];
        let out = format_itinerary(
            &segs,
            |s| if s.airline_code.as_str() == "KL" { 'K' } else { 'J' },
            "SS1",
        )
        .unwrap();
        assert!(out.lines().next().unwrap().starts_with(" 1 AF 7J "));
        assert!(out.lines().nth(1).unwrap().starts_with(" 2 KL1234K "));
    }

    #[test]
    fn empty_status_omits_indicator() {
        let seg = segment("AF", "7", "JFK", (8, 0), "CDG", (20, 0), oct(3));
        let line = itinerary_line(1, &seg, 'Y', "").unwrap();
        assert_eq!(line, " 1 AF 7Y 03OCT JFKCDG 800A 800P /DCAF /E");
    }

    #[test]
    fn weekday_letter_follows_date() {
        let date = TravelDate::new(5, Month::October)
            .unwrap()
            .with_weekday(Weekday::Sun);
        let seg = segment("AF", "7", "JFK", (8, 0), "CDG", (20, 0), Some(date));
        let line = itinerary_line(3, &seg, 'Y', "HK1").unwrap();
        assert_eq!(line, " 3 AF 7Y 05OCT S JFKCDG*HK1 800A 800P /DCAF /E");
    }

    #[test]
    fn explicit_arrival_date_suffix() {
        let mut seg = segment("QF", "1", "SYD", (15, 30), "LHR", (6, 10), oct(3));
        seg.arr_date = oct(5);
        let line = itinerary_line(1, &seg, 'Y', "SS1").unwrap();
        assert!(line.ends_with("330P 610A 05OCT /DCQF /E"), "{line}");
    }

    #[test]
    fn same_day_arrival_has_no_suffix() {
        let seg = segment("AF", "7", "JFK", (8, 0), "CDG", (20, 0), oct(3));
        let line = itinerary_line(1, &seg, 'Y', "SS1").unwrap();
        assert!(line.ends_with("800P /DCAF /E"));
    }

    #[test]
    fn double_digit_sequence() {
        let seg = segment("AF", "7", "JFK", (8, 0), "CDG", (20, 0), oct(3));
        assert!(itinerary_line(12, &seg, 'Y', "SS1").unwrap().starts_with("12 AF"));
    }

    #[test]
    fn missing_date_fails_whole_block() {
        let segs = vec![
            segment("AF", "7", "JFK", (8, 0), "CDG", (20, 0), oct(3)),
            segment("AF", "8", "CDG", (21, 0), "FCO", (23, 0), None),
        ];
        assert_eq!(
            format_itinerary(&segs, |_| 'Y', "SS1"),
            Err(ConvertError::MissingField {
                segment: 2,
                field: "departure date"
            })
        );
        assert_eq!(format_itinerary(&[], |_| 'Y', "SS1"), Err(ConvertError::NoSegments));
    }
}
