//! Itinerary text parser.
//!
//! Turns the plain text of a flight search result into segments and
//! journeys:
//!
//! 1. `sanitize` - one fact per line, noise dropped
//! 2. `split_sections` - outbound / inbound sections from headers
//! 3. `collect` - segment state machine with an explicit date context
//! 4. `group_journeys` - explicit headers, date gaps, merges and splits
//! 5. `infer_directions` - return leg for text without section headers

mod collect;
mod direction;
mod flight;
mod journeys;
mod rules;
mod sanitize;
mod sections;


use serde::Serialize;
use tracing::debug;

use crate::domain::{Journey, Segment};
use crate::tables::ReferenceData;

pub use collect::{Collected, DateContext, JourneyMark, collect};
pub use direction::infer_directions;
pub use flight::{FlightMatch, match_flight};
pub use journeys::{day_ordinals, declared_journeys, group_journeys, is_multi_city};
pub use rules::{LineKind, airport_in, classify, rule_name};
pub use sanitize::sanitize;
pub use sections::{Section, split_sections};

/// Everything parsed out of one block of itinerary text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItinerary {
    pub segments: Vec<Segment>,
    pub journeys: Vec<Journey>,
    /// "Flight N" headers that had flights under them
    pub declared_journeys: usize,
    pub multi_city: bool,
}

impl ParsedItinerary {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Parse itinerary text against a set of reference tables.
///
/// Never fails; text with no recognisable flights gives an empty result.
///
/// ```
/// use itinerary_gds::parser::parse_itinerary;
/// use itinerary_gds::tables::ReferenceData;
///
/// let text = "Depart · Fri, Oct 3\n\
///             Air France 7\n\
///             6:00 pm – 7:15 am+1\n\
///             New York (JFK)\n\
///             Paris (CDG)";
/// let parsed = parse_itinerary(text, ReferenceData::builtin());
/// assert_eq!(parsed.segments.len(), 1);
/// assert_eq!(parsed.journeys[0].label(), "1 JFK-CDG");
/// ```
pub fn parse_itinerary(text: &str, reference: &ReferenceData) -> ParsedItinerary {
    let lines = sanitize(text);
    let sections = split_sections(&lines);
    let labeled = sections.iter().any(|s| s.labeled);

    let Collected {
        mut segments,
        marks,
        section_starts,
    } = collect(&sections, reference);

    let mut journeys = group_journeys(&segments, &marks, &section_starts);
    if !labeled {
        if let Some(start) = infer_directions(&mut segments, &journeys) {
            debug!(inbound_from = start, "inferred return leg");
            journeys = group_journeys(&segments, &marks, &section_starts);
        }
    }

    let declared_journeys = declared_journeys(&marks, segments.len());
    let multi_city = is_multi_city(&journeys, declared_journeys);
    debug!(
        lines = lines.len(),
        segments = segments.len(),
        journeys = journeys.len(),
        multi_city,
        "parsed itinerary"
    );

    ParsedItinerary {
        segments,
        journeys,
        declared_journeys,
        multi_city,
    }
}
