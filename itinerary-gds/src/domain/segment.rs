//! Flight segment types.
//!
//! A `Segment` is one flown leg: a single takeoff and landing. Segments are
//! only ever built once all four positional fields (departure time and
//! airport, arrival time and airport) are known, so every value of this type
//! is complete.

use serde::{Deserialize, Serialize};

use super::{AirportCode, Cabin, CarrierCode, ClockTime, FlightNumber, TravelDate};

/// Which half of a round trip a segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outbound,
    Inbound,
}

/// Origin and destination of an enclosing route header
/// ("New York (JFK) to Paris (CDG) on ...").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub origin: AirportCode,
    pub dest: AirportCode,
}

/// One flight leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Marketing carrier, or `CarrierCode::UNKNOWN` when unresolved
    pub airline_code: CarrierCode,
    pub number: FlightNumber,
    pub dep_airport: AirportCode,
    pub arr_airport: AirportCode,
    #[serde(rename = "depGDS")]
    pub dep_time: ClockTime,
    #[serde(rename = "arrGDS")]
    pub arr_time: ClockTime,
    /// Date context in effect when the segment was recorded
    pub dep_date: Option<TravelDate>,
    /// Only set when the text carried an explicit arrival date
    pub arr_date: Option<TravelDate>,
    /// Days between departure and arrival, explicit (`+1`) or inferred
    pub arrival_day_offset: u8,
    /// Booking letter read from the text, e.g. the `Y` in "Economy (Y)"
    pub booking_class: Option<char>,
    /// Cabin named in the text without a letter
    pub cabin: Option<Cabin>,
    pub duration_minutes: Option<u32>,
    pub direction: Direction,
    pub route: Option<Route>,
    /// Last explicit header date seen before this segment
    pub header_ref: Option<TravelDate>,
}

impl Segment {
    /// Reservation-style departure time ("600P").
    pub fn dep_gds(&self) -> String {
        self.dep_time.to_gds()
    }

    /// Reservation-style arrival time ("715A").
    pub fn arr_gds(&self) -> String {
        self.arr_time.to_gds()
    }

    /// Single-letter weekday of departure, when known.
    pub fn dep_dow(&self) -> Option<char> {
        self.dep_date.and_then(|d| d.gds_weekday())
    }

    /// Arrival date: explicit when given, otherwise departure date plus offset.
    pub fn arrival_date(&self) -> Option<TravelDate> {
        self.arr_date.or_else(|| {
            self.dep_date
                .map(|d| d.add_days(u32::from(self.arrival_day_offset)))
        })
    }

    /// Minutes on the ground between this segment's arrival and `next`'s
    /// departure.
    ///
    /// Uses dates when both are known; otherwise assumes the connection is
    /// less than a day and wraps the clock difference.
    pub fn layover_before(&self, next: &Segment) -> u32 {
        let wrapped = self.arr_time.minutes_until(next.dep_time);
        let (Some(arrived), Some(departs)) = (self.arrival_date(), next.dep_date) else {
            return wrapped;
        };
        let mut dep_day = departs.ordinal();
        let arr_day = arrived.ordinal();
        if dep_day < arr_day {
            // Connection across New Year
            dep_day += 365;
        }
        let arr_abs = arr_day * 1440 + self.arr_time.minutes_of_day();
        let dep_abs = dep_day * 1440 + next.dep_time.minutes_of_day();
        dep_abs.checked_sub(arr_abs).unwrap_or(wrapped)
    }

    /// Whether this segment connects physically into `next`.
    pub fn connects_to(&self, next: &Segment) -> bool {
        self.arr_airport == next.dep_airport
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a segment with the fields tests care about.
    pub fn segment(
        carrier: &str,
        number: &str,
        from: &str,
        dep: (u32, u32),
        to: &str,
        arr: (u32, u32),
        date: Option<TravelDate>,
    ) -> Segment {
        Segment {
            airline_code: CarrierCode::parse(carrier).unwrap(),
            number: FlightNumber::parse(number).unwrap(),
            dep_airport: AirportCode::parse(from).unwrap(),
            arr_airport: AirportCode::parse(to).unwrap(),
            dep_time: ClockTime::from_hm(dep.0, dep.1).unwrap(),
            arr_time: ClockTime::from_hm(arr.0, arr.1).unwrap(),
            dep_date: date,
            arr_date: None,
            arrival_day_offset: 0,
            booking_class: None,
            cabin: None,
            duration_minutes: None,
            direction: Direction::Outbound,
            route: None,
            header_ref: None,
        }
    }
}
