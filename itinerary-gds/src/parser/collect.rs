//! Segment collection.
//!
//! Walks each section's lines looking for a flight designator, then scans a
//! bounded window after it for the four positional fields (departure time
//! and airport, arrival time and airport). A segment is only emitted once
//! all four are found.
//!
//! Dates are carried in an explicit [`DateContext`] that is passed into each
//! scan and handed back updated. Headers and "Departs"/"Arrives" lines set
//! the context outright; overnight flights and overnight connections roll
//! it forward. Nothing ever rolls it backward except an explicit date.

use tracing::{debug, trace};

use super::flight::{FlightMatch, match_flight};
use super::rules::{LineKind, airport_in, classify};
use super::sections::Section;
use crate::domain::{
    AirportCode, Cabin, ClockTime, Direction, Route, Segment, TimeToken, TravelDate,
};
use crate::tables::ReferenceData;

/// How many lines after a designator are searched for its fields.
const FIELD_LOOKAHEAD: usize = 12;

/// How many lines after the last field are searched for class, duration
/// and arrival date.
const TRAILING_WINDOW: usize = 4;

/// Largest gap between departure and an explicit arrival date we believe.
const MAX_ARRIVAL_OFFSET: u32 = 3;

/// Running date state threaded through collection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateContext {
    /// Date the next segment departs on
    pub date: Option<TravelDate>,
    /// Last explicitly stated date
    pub header: Option<TravelDate>,
    /// Arrival time of the previous segment in this journey
    pub last_arrival: Option<ClockTime>,
    pub route: Option<Route>,
}

impl DateContext {
    /// Enter a new section. The header date wins; without one the running
    /// date carries over. Overnight inference does not cross sections.
    pub fn begin_section(self, header_date: Option<TravelDate>) -> Self {
        Self {
            date: header_date.or(self.date),
            header: header_date.or(self.header),
            last_arrival: None,
            route: None,
        }
    }

    /// Enter a "Flight N" journey.
    pub fn begin_journey(self, date: Option<TravelDate>) -> Self {
        Self {
            date: date.or(self.date),
            header: date.or(self.header),
            last_arrival: None,
            ..self
        }
    }

    /// Enter a route header ("New York (JFK) to Paris (CDG) on ...").
    pub fn enter_route(self, route: Route, date: Option<TravelDate>) -> Self {
        Self {
            date: date.or(self.date),
            header: date.or(self.header),
            last_arrival: None,
            route: Some(route),
        }
    }

    /// An explicit departure date.
    pub fn set_explicit(self, date: TravelDate) -> Self {
        Self {
            date: Some(date),
            header: Some(date),
            last_arrival: None,
            ..self
        }
    }

    /// An explicit arrival date; the next connection leaves from there.
    pub fn arrived_on(self, date: TravelDate) -> Self {
        Self {
            date: Some(date),
            ..self
        }
    }

    pub fn roll_forward(self, days: u32) -> Self {
        Self {
            date: self.date.map(|d| d.add_days(days)),
            ..self
        }
    }

    pub fn landed_at(self, time: ClockTime) -> Self {
        Self {
            last_arrival: Some(time),
            ..self
        }
    }
}

/// A "Flight N" header and the segment index it opens at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JourneyMark {
    pub segment_index: usize,
    pub number: u8,
    pub date: Option<TravelDate>,
}

/// Output of collection across all sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collected {
    pub segments: Vec<Segment>,
    pub marks: Vec<JourneyMark>,
    /// Index of the first segment of each section
    pub section_starts: Vec<usize>,
}

/// Fields gathered for one flight.
#[derive(Debug, Default)]
struct Fields {
    times: Vec<TimeToken>,
    airports: Vec<AirportCode>,
    arrives_on: Option<TravelDate>,
    cabin: Option<Cabin>,
    letter: Option<char>,
    duration: Option<u32>,
}

impl Fields {
    fn complete(&self) -> bool {
        self.times.len() >= 2 && self.airports.len() >= 2
    }

    fn note_extra(&mut self, kind: LineKind) {
        match kind {
            LineKind::ArrivesOn(d) => self.arrives_on = Some(d),
            LineKind::Cabin { cabin, letter } => {
                self.cabin.get_or_insert(cabin);
                if let Some(letter) = letter {
                    self.letter.get_or_insert(letter);
                }
            }
            LineKind::Duration(minutes) => {
                self.duration.get_or_insert(minutes);
            }
            _ => {}
        }
    }

    fn note_position(&mut self, line: &str) {
        if self.times.len() < 2 {
            if let Some(token) = TimeToken::find(line) {
                self.times.push(token);
            }
        }
        if self.airports.len() < 2 {
            if let Some(code) = airport_in(line) {
                self.airports.push(code);
            }
        }
    }
}

struct Scan {
    fields: Fields,
    ctx: DateContext,
    /// First line after everything the scan consumed
    next: usize,
}

/// Collect segments from every section, threading one date context
/// through them in order.
pub fn collect(sections: &[Section<'_>], reference: &ReferenceData) -> Collected {
    let mut collected = Collected::default();
    let mut ctx = DateContext::default();
    for section in sections {
        collected.section_starts.push(collected.segments.len());
        ctx = ctx.begin_section(section.header_date);
        ctx = collect_section(section, ctx, reference, &mut collected);
    }
    debug!(
        segments = collected.segments.len(),
        journey_headers = collected.marks.len(),
        sections = sections.len(),
        "collection complete"
    );
    collected
}

fn collect_section(
    section: &Section<'_>,
    mut ctx: DateContext,
    reference: &ReferenceData,
    collected: &mut Collected,
) -> DateContext {
    let lines = section.lines;
    let first_in_section = collected.segments.len();
    let mut i = 0;

    while i < lines.len() {
        match classify(&lines[i]) {
            LineKind::JourneyHeader { number, date } => {
                ctx = ctx.begin_journey(date);
                collected.marks.push(JourneyMark {
                    segment_index: collected.segments.len(),
                    number,
                    date,
                });
            }
            LineKind::RouteHeader { route, date } => ctx = ctx.enter_route(route, date),
            LineKind::DepartsOn(date) | LineKind::DateOnly(date) => ctx = ctx.set_explicit(date),
            LineKind::ArrivesOn(date) => {
                if let Some(last) = collected.segments[first_in_section..].last_mut() {
                    if last.arr_date.is_none() {
                        last.arr_date = Some(date);
                        if let Some(offset) = arrival_offset(last.dep_date, date) {
                            last.arrival_day_offset = offset;
                        }
                    }
                }
                ctx = ctx.arrived_on(date);
            }
            LineKind::Text => {
                if let Some(flight) = match_flight(lines, i, reference) {
                    let scan = scan_segment(lines, i + flight.lines, ctx, reference);
                    match emit(flight, &scan.fields, scan.ctx, section.direction) {
                        Some((segment, next_ctx)) => {
                            collected.segments.push(segment);
                            ctx = next_ctx;
                            i = scan.next;
                        }
                        None => {
                            debug!(
                                line = %lines[i],
                                carrier = %flight.carrier,
                                number = %flight.number,
                                times = scan.fields.times.len(),
                                airports = scan.fields.airports.len(),
                                "discarding incomplete flight"
                            );
                            i += flight.lines;
                        }
                    }
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    ctx
}

/// Search forward from `start` for a flight's fields.
///
/// Stops early at a journey or section header, or at the next flight, so a
/// segment never absorbs its neighbour's data.
fn scan_segment(
    lines: &[String],
    start: usize,
    mut ctx: DateContext,
    reference: &ReferenceData,
) -> Scan {
    let mut fields = Fields::default();
    let end = (start + FIELD_LOOKAHEAD).min(lines.len());
    let mut i = start;

    while i < end && !fields.complete() {
        let line = &lines[i];
        let kind = classify(line);
        match kind {
            k if k.is_boundary() => break,
            LineKind::Text if match_flight(lines, i, reference).is_some() => break,
            LineKind::RouteHeader { route, date } => ctx = ctx.enter_route(route, date),
            LineKind::DepartsOn(date) => ctx = ctx.set_explicit(date),
            LineKind::DateOnly(date) if fields.times.is_empty() => ctx = ctx.set_explicit(date),
            LineKind::DateOnly(date) if fields.times.len() == 2 => fields.arrives_on = Some(date),
            _ => fields.note_extra(kind),
        }
        if !matches!(kind, LineKind::RouteHeader { .. }) {
            fields.note_position(line);
        }
        i += 1;
    }

    if fields.complete() {
        let trail_end = (i + TRAILING_WINDOW).min(lines.len());
        while i < trail_end {
            let kind = classify(&lines[i]);
            match kind {
                LineKind::ArrivesOn(_) | LineKind::Cabin { .. } | LineKind::Duration(_) => {
                    fields.note_extra(kind)
                }
                LineKind::Text if match_flight(lines, i, reference).is_none() => {
                    trace!(line = %lines[i], "skipping caption");
                }
                _ => break,
            }
            i += 1;
        }
    }

    Scan {
        fields,
        ctx,
        next: i,
    }
}

/// Build a segment from complete fields and advance the date context past
/// it. `None` when the fields do not make a flight.
fn emit(
    flight: FlightMatch,
    fields: &Fields,
    mut ctx: DateContext,
    direction: Direction,
) -> Option<(Segment, DateContext)> {
    let &[dep, arr] = fields.times.as_slice() else {
        return None;
    };
    let &[from, to] = fields.airports.as_slice() else {
        return None;
    };
    if from == to {
        return None;
    }

    if let Some(previous) = ctx.last_arrival {
        if dep.time < previous {
            ctx = ctx.roll_forward(1);
            debug!(
                carrier = %flight.carrier,
                number = %flight.number,
                arrived = %previous,
                departs = %dep.time,
                date = ?ctx.date,
                "overnight connection, date rolled forward"
            );
        }
    }

    let dep_date = ctx.date;
    let inferred = if arr.day_offset > 0 {
        arr.day_offset
    } else if arr.time < dep.time {
        1
    } else {
        0
    };
    let offset = fields
        .arrives_on
        .and_then(|d| arrival_offset(dep_date, d))
        .unwrap_or(inferred);

    let segment = Segment {
        airline_code: flight.carrier,
        number: flight.number,
        dep_airport: from,
        arr_airport: to,
        dep_time: dep.time,
        arr_time: arr.time,
        dep_date,
        arr_date: fields.arrives_on,
        arrival_day_offset: offset,
        booking_class: fields.letter,
        cabin: fields.cabin,
        duration_minutes: fields.duration,
        direction,
        route: ctx.route,
        header_ref: ctx.header,
    };

    let ctx = match fields.arrives_on {
        Some(date) => ctx.arrived_on(date),
        None => {
            if offset > 0 {
                trace!(
                    carrier = %flight.carrier,
                    number = %flight.number,
                    offset,
                    "arrives on a later day"
                );
            }
            ctx.roll_forward(u32::from(offset))
        }
    };
    Some((segment, ctx.landed_at(arr.time)))
}

/// Days from departure to an explicit arrival date, when plausible.
fn arrival_offset(dep: Option<TravelDate>, arr: TravelDate) -> Option<u8> {
    let dep = dep?;
    let diff = (arr.ordinal() + 365 - dep.ordinal()) % 365;
    (diff <= MAX_ARRIVAL_OFFSET).then_some(diff as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sanitize::sanitize;
    use crate::parser::sections::split_sections;
    use chrono::Month;

    fn oct(day: u32) -> TravelDate {
        TravelDate::new(day, Month::October).unwrap()
    }

    fn run(text: &str) -> Collected {
        let lines = sanitize(text);
        let sections = split_sections(&lines);
        collect(&sections, ReferenceData::builtin())
    }

    #[test]
    fn collects_a_complete_segment() {
        let c = run("Depart Fri, Oct 3\n\
                     Air France 7\n\
                     6:00 pm\n\
                     New York (JFK)\n\
                     7:15 am+1\n\
                     Paris (CDG)\n\
                     Business (J)\n\
                     7h 15m");
        assert_eq!(c.segments.len(), 1);
        let s = &c.segments[0];
        assert_eq!(s.airline_code.as_str(), "AF");
        assert_eq!(s.number.as_str(), "7");
        assert_eq!(s.dep_airport.as_str(), "JFK");
        assert_eq!(s.arr_airport.as_str(), "CDG");
        assert_eq!(s.dep_gds(), "600P");
        assert_eq!(s.arr_gds(), "715A");
        assert_eq!(s.dep_date.map(|d| d.to_string()), Some("03OCT".into()));
        assert_eq!(s.dep_dow(), Some('F'));
        assert_eq!(s.arrival_day_offset, 1);
        assert_eq!(s.booking_class, Some('J'));
        assert_eq!(s.cabin, Some(Cabin::Business));
        assert_eq!(s.duration_minutes, Some(435));
        assert_eq!(s.direction, Direction::Outbound);
        assert_eq!(s.header_ref.map(|d| d.day()), Some(3));
    }

    #[test]
    fn field_order_does_not_matter() {
        let c = run("AF 7\nNew York (JFK)\n6:00 pm\nParis (CDG)\n7:15 am");
        assert_eq!(c.segments.len(), 1);
        assert_eq!(c.segments[0].dep_airport.as_str(), "JFK");
        assert_eq!(c.segments[0].dep_gds(), "600P");
        assert_eq!(c.segments[0].arr_gds(), "715A");
    }

    #[test]
    fn incomplete_flight_is_discarded_not_merged() {
        let c = run("AF 7\n6:00 pm\nNew York (JFK)\n\
                     AF 1204\n9:00 am\nParis (CDG)\n11:05 am\nRome (FCO)");
        assert_eq!(c.segments.len(), 1);
        let s = &c.segments[0];
        assert_eq!(s.number.as_str(), "1204");
        assert_eq!(s.dep_airport.as_str(), "CDG");
        assert_eq!(s.arr_airport.as_str(), "FCO");
    }

    #[test]
    fn lookahead_is_bounded() {
        let mut text = String::from("AF 7\n");
        for k in 0..FIELD_LOOKAHEAD {
            text.push_str(&format!("caption {k}\n"));
        }
        text.push_str("6:00 pm\nNew York (JFK)\n7:15 am\nParis (CDG)");
        assert!(run(&text).segments.is_empty());
    }

    #[test]
    fn journey_header_stops_scan() {
        let c = run("AF 7\n6:00 pm\nNew York (JFK)\nFlight 2\n7:15 am\nParis (CDG)");
        assert!(c.segments.is_empty());
        assert_eq!(c.marks.len(), 1);
        assert_eq!(c.marks[0].number, 2);
    }

    #[test]
    fn explicit_arrival_sets_next_departure_date() {
        let c = run("Depart Fri, Oct 3\n\
                     AF 7\n6:00 pm\nNew York (JFK)\n7:15 am\nParis (CDG)\n\
                     Arrives Sun, Oct 5\n\
                     AF 1204\n9:00 am\nParis (CDG)\n11:05 am\nRome (FCO)");
        assert_eq!(c.segments.len(), 2);
        assert_eq!(c.segments[0].arr_date, Some(oct(5).with_weekday(chrono::Weekday::Sun)));
        assert_eq!(c.segments[0].arrival_day_offset, 2);
        assert_eq!(c.segments[1].dep_date.map(|d| d.day()), Some(5));
    }

    #[test]
    fn departs_override_resets_date() {
        let c = run("Depart Fri, Oct 3\n\
                     AF 7\nDeparts Mon, Oct 6\n6:00 pm\nNew York (JFK)\n7:15 am\nParis (CDG)");
        assert_eq!(c.segments[0].dep_date.map(|d| d.day()), Some(6));
        assert_eq!(c.segments[0].header_ref.map(|d| d.day()), Some(6));
    }

    #[test]
    fn route_header_sets_route_and_date() {
        let c = run("New York (JFK) to Rome (FCO) on Fri, Oct 3\n\
                     AF 7\n6:00 pm\nNew York (JFK)\n7:15 am+1\nParis (CDG)\n\
                     AF 1204\n9:00 am\nParis (CDG)\n11:05 am\nRome (FCO)");
        assert_eq!(c.segments.len(), 2);
        let route = c.segments[1].route.unwrap();
        assert_eq!(route.origin.as_str(), "JFK");
        assert_eq!(route.dest.as_str(), "FCO");
        assert_eq!(c.segments[0].dep_date.map(|d| d.day()), Some(3));
        assert_eq!(c.segments[1].dep_date.map(|d| d.day()), Some(4));
    }

    #[test]
    fn context_transitions() {
        let ctx = DateContext::default()
            .set_explicit(oct(3))
            .landed_at(ClockTime::from_hm(23, 0).unwrap());
        assert_eq!(ctx.roll_forward(1).date, Some(oct(4)));
        assert!(ctx.arrived_on(oct(4)).last_arrival.is_some());

        let section = ctx.begin_section(None);
        assert_eq!(section.date, Some(oct(3)));
        assert_eq!(section.last_arrival, None);

        let journey = ctx.begin_journey(Some(oct(10)));
        assert_eq!(journey.date, Some(oct(10)));
        assert_eq!(journey.header, Some(oct(10)));
        assert_eq!(journey.last_arrival, None);
    }

    #[test]
    fn arrival_offset_is_bounded() {
        assert_eq!(arrival_offset(Some(oct(3)), oct(4)), Some(1));
        assert_eq!(arrival_offset(Some(oct(3)), oct(3)), Some(0));
        assert_eq!(arrival_offset(Some(oct(3)), oct(20)), None);
        assert_eq!(arrival_offset(None, oct(4)), None);
    }
}
