//! Raw text clean-up.
//!
//! Scraped result cards arrive as one blob with several facts crammed onto a
//! line ("6:00 PM – 7:15 AM+1 · Air France · Nonstop"). The sanitizer turns
//! that into a list of lines carrying one fact each, drops captions that
//! only confuse the collector, and glues a section header back together
//! with a date that was rendered on the following lines.
//!
//! It never fails: a line it cannot make sense of passes through unchanged.

use std::sync::LazyLock;

use regex::Regex;

use super::rules::{airport_in, classify};
use crate::domain::{TimeToken, TravelDate};

const SEPARATORS: [char; 3] = ['•', '·', '|'];

/// Maximum number of following lines tried when completing a bare header.
const REJOIN_LOOKAHEAD: usize = 3;

static NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:overnight|layover|change planes? in|operated by|self[- ]transfer|seats? left|separate tickets?|emissions|co2e?)\b",
    )
    .expect("static regex must compile")
});

static BARE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:departure|depart|return|outbound|inbound|flight\s+\d{1,2})\s*[:\-–—]?$")
        .expect("static regex must compile")
});

static JOINER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:-|–|—|to)\s*$").expect("static regex must compile"));

/// Normalise raw itinerary text into one fact per line.
///
/// ```
/// use itinerary_gds::parser::sanitize;
///
/// let lines = sanitize("Depart\nFri, Oct 3\n6:00 pm – 7:15 am+1 · Nonstop\nOperated by KLM");
/// assert_eq!(lines, vec!["Depart Fri, Oct 3", "6:00 pm", "7:15 am+1", "Nonstop"]);
/// ```
pub fn sanitize(text: &str) -> Vec<String> {
    let lines: Vec<String> = text
        .lines()
        .flat_map(split_clauses)
        .filter(|clause| !is_noise(clause))
        .flat_map(split_time_range)
        .collect();
    rejoin_headers(lines)
}

/// Collapse whitespace and split on separator glyphs. Runs of separators
/// produce empty clauses, which are dropped.
fn split_clauses(line: &str) -> Vec<String> {
    let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .split(SEPARATORS)
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(str::to_string)
        .collect()
}

/// Captions with nothing the collector needs. A caption naming an airport
/// is kept for its code.
fn is_noise(clause: &str) -> bool {
    NOISE_RE.is_match(clause) && airport_in(clause).is_none()
}

/// "6:00 pm – 7:15 am+1 (7h 15m)" → "6:00 pm", "7:15 am+1", "(7h 15m)".
fn split_time_range(clause: String) -> Vec<String> {
    let times = TimeToken::find_all(&clause);
    if times.len() < 2 {
        return vec![clause];
    }
    let gaps: Vec<&str> = times
        .windows(2)
        .map(|pair| &clause[pair[0].0.end..pair[1].0.start])
        .collect();
    if !gaps.iter().any(|gap| JOINER_RE.is_match(gap)) {
        return vec![clause];
    }

    let mut out: Vec<String> = times
        .iter()
        .map(|(range, _)| clause[range.clone()].trim().to_string())
        .collect();

    let mut remainder = String::new();
    if let Some((first, _)) = times.first() {
        remainder.push_str(&clause[..first.start]);
    }
    for gap in gaps.iter().filter(|gap| !JOINER_RE.is_match(gap)) {
        remainder.push(' ');
        remainder.push_str(gap);
    }
    if let Some((last, _)) = times.last() {
        remainder.push(' ');
        remainder.push_str(&clause[last.end..]);
    }
    let remainder = remainder.split_whitespace().collect::<Vec<_>>().join(" ");
    let remainder = remainder.trim_matches(|c: char| c.is_whitespace() || "-–—,".contains(c));
    if remainder.chars().any(char::is_alphanumeric) {
        out.push(remainder.to_string());
    }
    out
}

fn rejoin_headers(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if BARE_HEADER_RE.is_match(line) {
            if let Some((joined, used)) = rejoin(line, &lines[i + 1..]) {
                out.push(joined);
                i += 1 + used;
                continue;
            }
        }
        out.push(line.clone());
        i += 1;
    }
    out
}

/// Append up to three following lines to a bare header until the appended
/// text reads as a date. Stops at anything that looks like flight data.
fn rejoin(header: &str, rest: &[String]) -> Option<(String, usize)> {
    let header = header.trim_end_matches([':', '-', '–', '—', ' ']);
    let mut combined = header.to_string();
    for (used, next) in rest.iter().take(REJOIN_LOOKAHEAD).enumerate() {
        if TimeToken::find(next).is_some()
            || airport_in(next).is_some()
            || classify(next).is_boundary()
        {
            return None;
        }
        combined.push(' ');
        combined.push_str(next);
        if TravelDate::parse_exact(&combined[header.len()..]).is_some() {
            return Some((combined, used + 1));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_separator_runs() {
        assert_eq!(
            sanitize("  Air\u{a0}France   7 ••  Nonstop || "),
            vec!["Air France 7", "Nonstop"]
        );
    }

    #[test]
    fn drops_noise_without_airport() {
        let text = "Overnight flight\nLong layover\n1 hr 35 min layover\nOperated by KLM\n3 seats left at this price";
        assert!(sanitize(text).is_empty());
    }

    #[test]
    fn keeps_noise_with_airport() {
        assert_eq!(
            sanitize("Change planes in Paris (CDG)"),
            vec!["Change planes in Paris (CDG)"]
        );
    }

    #[test]
    fn splits_time_range_with_remainder() {
        assert_eq!(
            sanitize("6:00 PM – 7:15 AM+1 (JFK–CDG)"),
            vec!["6:00 PM", "7:15 AM+1", "(JFK–CDG)"]
        );
        assert_eq!(sanitize("18:00 to 07:15"), vec!["18:00", "07:15"]);
    }

    #[test]
    fn leaves_unjoined_times_alone() {
        assert_eq!(
            sanitize("Departs 6:00 pm, arrives 7:15 am"),
            vec!["Departs 6:00 pm, arrives 7:15 am"]
        );
    }

    #[test]
    fn rejoins_header_with_split_date() {
        assert_eq!(
            sanitize("Return\nSat,\nOct 11\n11:30 pm"),
            vec!["Return Sat, Oct 11", "11:30 pm"]
        );
        assert_eq!(sanitize("Flight 2:\nOct 5"), vec!["Flight 2 Oct 5"]);
    }

    #[test]
    fn rejoin_stops_at_flight_data() {
        assert_eq!(
            sanitize("Depart\n6:00 pm\nOct 3"),
            vec!["Depart", "6:00 pm", "Oct 3"]
        );
        assert_eq!(
            sanitize("Depart\nAir France 7\nNew York (JFK)"),
            vec!["Depart", "Air France 7", "New York (JFK)"]
        );
    }

    #[test]
    fn rejoin_gives_up_after_lookahead() {
        let text = "Depart\nSome\ncaption\ntext\nOct 3";
        assert_eq!(sanitize(text), vec!["Depart", "Some", "caption", "text", "Oct 3"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const FRAGMENTS: &[&str] = &[
        "Depart",
        "Return",
        "Flight 2",
        "Fri,",
        "Oct 3",
        "Sat, Oct 4 · 11:30 pm",
        "6:00 pm – 7:15 am+1",
        "Air France 7",
        "Paris (CDG)",
        "Operated by KLM",
        "Change planes in Rome (FCO)",
        "Economy (Y)",
        "7h 15m",
        "•  | ·",
        "",
    ];

    fn itinerary_text() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(FRAGMENTS), 0..20).prop_map(|v| v.join("\n"))
    }

    proptest! {
        #[test]
        fn output_lines_are_atomic(text in itinerary_text()) {
            for line in sanitize(&text) {
                prop_assert!(!line.is_empty());
                prop_assert_eq!(line.trim(), line.as_str());
                prop_assert!(!line.contains(SEPARATORS));
                prop_assert!(TimeToken::find_all(&line).len() <= 1);
            }
        }

        #[test]
        fn sanitize_is_idempotent(text in itinerary_text()) {
            let once = sanitize(&text);
            let twice = sanitize(&once.join("\n"));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn never_panics_on_arbitrary_text(text in ".{0,200}") {
            let _ = sanitize(&text);
        }
    }
}
