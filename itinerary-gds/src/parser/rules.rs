//! Line classification.
//!
//! Each sanitized line carries at most one fact. `classify` runs a fixed,
//! ordered table of recognisers and returns the first hit; anything no rule
//! claims is `LineKind::Text` and left to the flight matcher.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{AirportCode, Cabin, Direction, Route, TimeToken, TravelDate};

static JOURNEY_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^flight\s+(\d{1,2})(?:\s+of\s+\d{1,2})?\b\s*[:\-–—]?\s*(.*)$")
        .expect("static regex must compile")
});

static SECTION_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(departure|depart|return|outbound|inbound)\b\s*[:\-–—]?\s*(.*)$")
        .expect("static regex must compile")
});

static DEPARTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^depart(?:s|ing)\b").expect("static regex must compile")
});

static ARRIVES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^arriv(?:es|ing|al)\b").expect("static regex must compile")
});

static AIRPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Z]{3})\)").expect("static regex must compile"));

static ROUTE_JOINER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\)\s*.*?(?:\bto\b|→|–|—)").expect("static regex must compile")
});

static CABIN_LETTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[Cc]lass|[Cc]abin)?\s*[:\-]?\s*\(([A-Z]{1,2})\)").expect("static regex must compile")
});

static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:total\s+)?(?:travel\s+)?(?:duration|time)\s*:?\s*)?(\d{1,2})\s*h(?:ours?|rs?)?\.?(?:\s*(\d{1,2})\s*m(?:in(?:utes?|s)?)?\.?)?$",
    )
    .expect("static regex must compile")
});

static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:travel\s+)?(?:duration|time)\s*:?\s*)?(\d{1,3})\s*m(?:in(?:utes?|s)?)?\.?$")
        .expect("static regex must compile")
});

/// What a single sanitized line says.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind {
    /// "Flight 2", "Flight 2 · Sat, Oct 4"
    JourneyHeader {
        number: u8,
        date: Option<TravelDate>,
    },
    /// "New York (JFK) to Paris (CDG) on Fri, Oct 3"
    RouteHeader {
        route: Route,
        date: Option<TravelDate>,
    },
    /// "Depart · Fri, Oct 3", "Return"
    SectionHeader {
        direction: Direction,
        date: Option<TravelDate>,
    },
    /// "Departs Fri, Oct 3"
    DepartsOn(TravelDate),
    /// "Arrives Sat, Oct 4"
    ArrivesOn(TravelDate),
    /// A bare date
    DateOnly(TravelDate),
    Time(TimeToken),
    Airport(AirportCode),
    /// "Economy (Y)", "Business"
    Cabin {
        cabin: Cabin,
        letter: Option<char>,
    },
    /// Flight duration in minutes
    Duration(u32),
    Text,
}

impl LineKind {
    /// Lines that end whatever segment is being scanned.
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            LineKind::JourneyHeader { .. } | LineKind::SectionHeader { .. }
        )
    }
}

type Rule = fn(&str) -> Option<LineKind>;

/// Recognisers in priority order.
const RULES: &[(&str, Rule)] = &[
    ("journey_header", journey_header),
    ("route_header", route_header),
    ("section_header", section_header),
    ("departs_on", departs_on),
    ("arrives_on", arrives_on),
    ("date_only", date_only),
    ("time", time),
    ("airport", airport),
    ("cabin", cabin),
    ("duration", duration),
];

/// Classify a sanitized line.
///
/// ```
/// use itinerary_gds::parser::{LineKind, classify};
///
/// assert!(matches!(classify("6:00 pm"), LineKind::Time(_)));
/// assert!(matches!(classify("Paris (CDG)"), LineKind::Airport(_)));
/// assert!(matches!(classify("Air France 7"), LineKind::Text));
/// ```
pub fn classify(line: &str) -> LineKind {
    let line = line.trim();
    RULES
        .iter()
        .find_map(|(_, rule)| rule(line))
        .unwrap_or(LineKind::Text)
}

/// Name of the rule that claims a line, for diagnostics.
pub fn rule_name(line: &str) -> &'static str {
    let line = line.trim();
    RULES
        .iter()
        .find(|(_, rule)| rule(line).is_some())
        .map_or("text", |(name, _)| name)
}

/// First parenthesised airport code in a line.
pub fn airport_in(line: &str) -> Option<AirportCode> {
    AIRPORT_RE
        .captures(line)
        .and_then(|caps| AirportCode::parse(&caps[1]).ok())
}

/// Whether the rest of a header line is empty or a date.
fn header_date(rest: &str) -> Option<Option<TravelDate>> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Some(None);
    }
    TravelDate::parse_exact(rest).map(Some)
}

fn journey_header(line: &str) -> Option<LineKind> {
    let caps = JOURNEY_HEADER_RE.captures(line)?;
    let number: u8 = caps[1].parse().ok()?;
    let date = header_date(&caps[2])?;
    Some(LineKind::JourneyHeader { number, date })
}

fn route_header(line: &str) -> Option<LineKind> {
    let mut codes = AIRPORT_RE.captures_iter(line);
    let origin = AirportCode::parse(&codes.next()?[1]).ok()?;
    let dest = AirportCode::parse(&codes.next()?[1]).ok()?;
    if !ROUTE_JOINER_RE.is_match(line) || TimeToken::find(line).is_some() {
        return None;
    }
    Some(LineKind::RouteHeader {
        route: Route { origin, dest },
        date: TravelDate::find_in(line),
    })
}

fn section_header(line: &str) -> Option<LineKind> {
    let caps = SECTION_HEADER_RE.captures(line)?;
    let rest = &caps[2];
    if TimeToken::find(rest).is_some() || airport_in(rest).is_some() {
        return None;
    }
    let keyword = caps[1].to_ascii_lowercase();
    let direction = if keyword == "return" || keyword == "inbound" {
        Direction::Inbound
    } else {
        Direction::Outbound
    };
    Some(LineKind::SectionHeader {
        direction,
        date: TravelDate::find_in(rest),
    })
}

fn departs_on(line: &str) -> Option<LineKind> {
    if !DEPARTS_RE.is_match(line) || TimeToken::find(line).is_some() {
        return None;
    }
    TravelDate::find_in(line).map(LineKind::DepartsOn)
}

fn arrives_on(line: &str) -> Option<LineKind> {
    if !ARRIVES_RE.is_match(line) || TimeToken::find(line).is_some() {
        return None;
    }
    TravelDate::find_in(line).map(LineKind::ArrivesOn)
}

fn date_only(line: &str) -> Option<LineKind> {
    TravelDate::parse_exact(line).map(LineKind::DateOnly)
}

fn time(line: &str) -> Option<LineKind> {
    TimeToken::find(line).map(LineKind::Time)
}

fn airport(line: &str) -> Option<LineKind> {
    airport_in(line).map(LineKind::Airport)
}

fn cabin(line: &str) -> Option<LineKind> {
    let (cabin, len) = Cabin::match_prefix(line)?;
    let rest = &line[len..];
    let letter = CABIN_LETTER_RE
        .captures(rest)
        .and_then(|caps| caps[1].chars().next());
    Some(LineKind::Cabin { cabin, letter })
}

fn duration(line: &str) -> Option<LineKind> {
    if let Some(caps) = HOURS_RE.captures(line) {
        let hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        return (minutes < 60).then_some(LineKind::Duration(hours * 60 + minutes));
    }
    let caps = MINUTES_RE.captures(line)?;
    caps[1].parse().ok().map(LineKind::Duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};

    fn oct(day: u32) -> TravelDate {
        TravelDate::new(day, Month::October).unwrap()
    }

    fn ap(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    #[test]
    fn journey_headers() {
        assert_eq!(
            classify("Flight 2"),
            LineKind::JourneyHeader {
                number: 2,
                date: None
            }
        );
        match classify("Flight 1 of 3 · Fri, Oct 3") {
            LineKind::JourneyHeader { number, date } => {
                assert_eq!(number, 1);
                assert_eq!(date.map(|d| d.to_string()), Some("03OCT".to_string()));
            }
            other => panic!("unexpected {other:?}"),
        }
        // Trailing prose is not a header
        assert_eq!(rule_name("Flight 2 is delayed"), "text");
    }

    #[test]
    fn route_headers() {
        match classify("New York (JFK) to Paris (CDG) on Fri, Oct 3") {
            LineKind::RouteHeader { route, date } => {
                assert_eq!(route.origin, ap("JFK"));
                assert_eq!(route.dest, ap("CDG"));
                assert_eq!(date, Some(oct(3).with_weekday(Weekday::Fri)));
            }
            other => panic!("unexpected {other:?}"),
        }
        // Two codes but no joiner
        assert_eq!(rule_name("(JFK) (CDG)"), "airport");
    }

    #[test]
    fn section_headers() {
        assert_eq!(
            classify("Return"),
            LineKind::SectionHeader {
                direction: Direction::Inbound,
                date: None
            }
        );
        match classify("Depart · Fri, Oct 3") {
            LineKind::SectionHeader { direction, date } => {
                assert_eq!(direction, Direction::Outbound);
                assert_eq!(date, Some(oct(3).with_weekday(Weekday::Fri)));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(rule_name("Inbound flight"), "section_header");
        // A departure time is not a section
        assert_eq!(rule_name("Departure 6:00 pm"), "time");
    }

    #[test]
    fn departs_and_arrives() {
        let departs = classify("Departs Fri, Oct 3");
        assert!(matches!(departs, LineKind::DepartsOn(d) if d.day() == 3));
        let arrives = classify("Arrives Sat, Oct 4");
        assert!(matches!(arrives, LineKind::ArrivesOn(d) if d.day() == 4));
        assert!(matches!(classify("Arrival: 4 October"), LineKind::ArrivesOn(_)));
        assert_eq!(rule_name("Arrives 7:15 am"), "time");
    }

    #[test]
    fn bare_dates() {
        assert!(matches!(classify("Sat, Oct 4"), LineKind::DateOnly(d) if d.day() == 4));
    }

    #[test]
    fn times_and_airports() {
        assert!(matches!(classify("11:30 pm"), LineKind::Time(t) if t.time.hour() == 23));
        assert_eq!(
            classify("Charles de Gaulle (CDG)"),
            LineKind::Airport(ap("CDG"))
        );
        assert_eq!(airport_in("Roma (FCO) Terminal 3"), Some(ap("FCO")));
        assert_eq!(airport_in("Roma (Fco)"), None);
    }

    #[test]
    fn cabins() {
        assert_eq!(
            classify("Economy (Y)"),
            LineKind::Cabin {
                cabin: Cabin::Economy,
                letter: Some('Y')
            }
        );
        assert_eq!(
            classify("Premium Economy"),
            LineKind::Cabin {
                cabin: Cabin::Premium,
                letter: None
            }
        );
        assert_eq!(
            classify("Business (JC)"),
            LineKind::Cabin {
                cabin: Cabin::Business,
                letter: Some('J')
            }
        );
        assert_eq!(
            classify("First class (F)"),
            LineKind::Cabin {
                cabin: Cabin::First,
                letter: Some('F')
            }
        );
        // "First" must be a whole word
        assert_eq!(rule_name("Firstline 12"), "text");
    }

    #[test]
    fn durations() {
        assert_eq!(classify("7h 15m"), LineKind::Duration(435));
        assert_eq!(classify("Travel time: 7 hr 15 min"), LineKind::Duration(435));
        assert_eq!(classify("2 hours"), LineKind::Duration(120));
        assert_eq!(classify("55 min"), LineKind::Duration(55));
        assert_eq!(rule_name("1 hr 35 min layover"), "text");
    }

    #[test]
    fn flight_lines_stay_text() {
        assert_eq!(classify("Air France 7"), LineKind::Text);
        assert_eq!(classify("AF 1204"), LineKind::Text);
        assert!(classify("Flight 1").is_boundary());
        assert!(classify("Return").is_boundary());
    }
}
