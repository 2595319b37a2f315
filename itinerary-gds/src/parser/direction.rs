//! Direction inference for itineraries without section headers.

use crate::domain::{Direction, Journey, Segment};

/// Mark the return half of an unlabeled itinerary as inbound.
///
/// The first segment's origin is home. The return starts with the journey
/// containing the first segment that lands back home; when that journey is
/// the very first one (a same-day out-and-back), it starts at the first
/// segment that retraces its predecessor instead.
///
/// Returns the index of the first inbound segment, or `None` if the trip
/// never comes home.
pub fn infer_directions(segments: &mut [Segment], journeys: &[Journey]) -> Option<usize> {
    let home = segments.first()?.dep_airport;
    let returns = segments.iter().position(|s| s.arr_airport == home)?;

    let start = match journeys.iter().find(|j| j.contains(returns)) {
        Some(journey) if journey.start_idx > 0 => journey.start_idx,
        _ => (1..=returns)
            .find(|&i| segments[i].arr_airport == segments[i - 1].dep_airport)
            .unwrap_or(returns),
    };

    for segment in &mut segments[start..] {
        segment.direction = Direction::Inbound;
    }
    Some(start)
}
