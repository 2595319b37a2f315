//! Flight designator recognition.
//!
//! Result pages name a flight in several ways: "Air France 7", "Air France"
//! then "AF 7" on the next line, or just "AF 7" buried in a details string.
//! The recognisers below are tried in order against a line (and the line
//! after it); lines describing aircraft or airport facilities are rejected
//! up front so "Airbus A330-900" or "Terminal 2E" never become flights.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::rules::{LineKind, classify};
use crate::domain::{CarrierCode, FlightNumber};
use crate::tables::ReferenceData;

static DESIGNATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][A-Z0-9]|[0-9][A-Z]|[A-Z]{3})\s?(\d{1,4})\b").expect("static regex must compile")
});

static BARE_DESIGNATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?i:flight)\s*)?(?:([A-Z][A-Z0-9]|[0-9][A-Z]|[A-Z]{3})\s?)?(\d{1,4})$")
        .expect("static regex must compile")
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,4})\b").expect("static regex must compile"));

static UNKNOWN_AIRLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:air|airlines?|airways|aviation|aero|express|jet)\b\s*#?\s*(\d{1,4})\b")
        .expect("static regex must compile")
});

static EQUIPMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:airbus|boeing|embraer|bombardier|canadair|de havilland|dash\s?8|crj\s?-?\d*|atr\s?-?\d*|a[23]\d{2}(?:neo|ceo|-\d+)?|e-?1[79]\d|e-?jet)\b",
    )
    .expect("static regex must compile")
});

static FACILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:gate|terminal|seats?|row|baggage|bags?|carry-on|wi-?fi|legroom|in\s+\d|kg|lbs?)\b")
        .expect("static regex must compile")
});

/// A recognised flight and how many lines it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightMatch {
    pub carrier: CarrierCode,
    pub number: FlightNumber,
    pub lines: usize,
}

/// What a flight rule looks at.
pub struct Probe<'a> {
    pub line: &'a str,
    pub next: Option<&'a str>,
    pub reference: &'a ReferenceData,
}

type FlightRule = fn(&Probe<'_>) -> Option<FlightMatch>;

/// Recognisers in priority order.
const FLIGHT_RULES: &[(&str, FlightRule)] = &[
    ("airline_and_number", airline_and_number),
    ("airline_then_number", airline_then_number),
    ("designator", designator),
    ("unknown_airline", unknown_airline),
];

/// Try to recognise a flight starting at `lines[idx]`.
pub fn match_flight(
    lines: &[String],
    idx: usize,
    reference: &ReferenceData,
) -> Option<FlightMatch> {
    let line = lines.get(idx)?.as_str();
    if classify(line) != LineKind::Text || is_rejected(line) {
        return None;
    }
    let probe = Probe {
        line,
        next: lines.get(idx + 1).map(String::as_str),
        reference,
    };
    FLIGHT_RULES.iter().find_map(|(_, rule)| rule(&probe))
}

/// Equipment and facility descriptions.
fn is_rejected(line: &str) -> bool {
    EQUIPMENT_RE.is_match(line) || FACILITY_RE.is_match(line)
}

fn parse_designator(carrier: &str, number: &str) -> Option<(CarrierCode, FlightNumber)> {
    Some((
        CarrierCode::parse(carrier).ok()?,
        FlightNumber::parse(number).ok()?,
    ))
}

fn find_designator(line: &str) -> Option<(CarrierCode, FlightNumber)> {
    find_designator_outside(line, 0..0)
}

/// First designator in `line` that does not overlap `skip`.
fn find_designator_outside(line: &str, skip: Range<usize>) -> Option<(CarrierCode, FlightNumber)> {
    DESIGNATOR_RE.captures_iter(line).find_map(|caps| {
        let whole = caps.get(0)?.range();
        if whole.start < skip.end && skip.start < whole.end {
            return None;
        }
        parse_designator(&caps[1], &caps[2])
    })
}

/// "Air France 7", "Delta 123", "KLM KL 1234".
fn airline_and_number(probe: &Probe<'_>) -> Option<FlightMatch> {
    let (carrier, name) = probe.reference.find_airline(probe.line)?;
    if let Some((carrier, number)) = find_designator_outside(probe.line, name.clone()) {
        return Some(FlightMatch {
            carrier,
            number,
            lines: 1,
        });
    }
    let rest = &probe.line[name.end..];
    let caps = NUMBER_RE.captures(rest)?;
    let number = FlightNumber::parse(&caps[1]).ok()?;
    Some(FlightMatch {
        carrier,
        number,
        lines: 1,
    })
}

/// "Air France" then "7" or "AF 7" on the next line.
fn airline_then_number(probe: &Probe<'_>) -> Option<FlightMatch> {
    let (carrier, _) = probe.reference.find_airline(probe.line)?;
    if probe.line.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let next = probe.next?.trim();
    if is_rejected(next) {
        return None;
    }
    let caps = BARE_DESIGNATOR_RE.captures(next)?;
    let number = FlightNumber::parse(&caps[2]).ok()?;
    let carrier = match caps.get(1) {
        Some(code) => CarrierCode::parse(code.as_str()).ok()?,
        None => carrier,
    };
    Some(FlightMatch {
        carrier,
        number,
        lines: 2,
    })
}

/// "AF 1204", "Flight UA100 · Economy".
fn designator(probe: &Probe<'_>) -> Option<FlightMatch> {
    let (carrier, number) = find_designator(probe.line)?;
    Some(FlightMatch {
        carrier,
        number,
        lines: 1,
    })
}

/// An airline-sounding name missing from the table: "Nova Airways 502".
fn unknown_airline(probe: &Probe<'_>) -> Option<FlightMatch> {
    let caps = UNKNOWN_AIRLINE_RE.captures(probe.line)?;
    let number = FlightNumber::parse(&caps[1]).ok()?;
    Some(FlightMatch {
        carrier: CarrierCode::UNKNOWN,
        number,
        lines: 1,
    })
}
