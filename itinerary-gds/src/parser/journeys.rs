//! Journey grouping.
//!
//! Segments are grouped into journeys in four passes:
//!
//! 1. "Flight N" headers open explicit journeys.
//! 2. With at most one explicit journey, cut wherever the date jumps by more
//!    than a day, the direction changes, the route header changes or a new
//!    section starts.
//! 3. Merge neighbours less than a day apart unless a hard boundary or two
//!    different "Flight N" headers separate them.
//! 4. Split any journey whose segments do not connect airport to airport.

use tracing::debug;

use super::collect::JourneyMark;
use crate::domain::{Journey, Segment, TravelDate};

/// Working range before it becomes a `Journey`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Draft {
    start: usize,
    end: usize,
    explicit: bool,
    number: Option<u8>,
    date: Option<TravelDate>,
}

impl Draft {
    fn inferred(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            explicit: false,
            number: None,
            date: None,
        }
    }

    /// Split before each index in `cuts`; only the first piece keeps the
    /// header.
    fn split_at(self, cuts: &[usize]) -> Vec<Draft> {
        let mut pieces = Vec::with_capacity(cuts.len() + 1);
        let mut start = self.start;
        for end in cuts.iter().map(|cut| cut - 1).chain([self.end]) {
            pieces.push(if start == self.start {
                Draft { end, ..self }
            } else {
                Draft::inferred(start, end)
            });
            start = end + 1;
        }
        pieces
    }
}

/// Approximate day-of-year per segment, pushed forward a year whenever it
/// would otherwise go backwards.
pub fn day_ordinals(segments: &[Segment]) -> Vec<Option<u32>> {
    let mut previous: Option<u32> = None;
    let mut ordinals = Vec::with_capacity(segments.len());
    for segment in segments {
        let ordinal = segment.dep_date.map(|date| {
            let mut ordinal = date.ordinal();
            if let Some(prev) = previous {
                while ordinal < prev {
                    ordinal += 365;
                }
            }
            ordinal
        });
        if ordinal.is_some() {
            previous = ordinal;
        }
        ordinals.push(ordinal);
    }
    ordinals
}

/// Days between two ordinals, when both are known.
fn gap(ordinals: &[Option<u32>], from: usize, to: usize) -> Option<u32> {
    match (ordinals[from], ordinals[to]) {
        (Some(a), Some(b)) => Some(b.saturating_sub(a)),
        _ => None,
    }
}

/// Whether a journey must end before segment `idx`.
fn hard_boundary(segments: &[Segment], section_starts: &[usize], idx: usize) -> bool {
    if idx == 0 {
        return false;
    }
    let (prev, next) = (&segments[idx - 1], &segments[idx]);
    let route_changed = matches!((prev.route, next.route), (Some(a), Some(b)) if a != b);
    section_starts.contains(&idx) || prev.direction != next.direction || route_changed
}

/// Start index, number and date of each "Flight N" header that has flights
/// under it. Repeated headers with nothing between them collapse into one.
fn explicit_starts(marks: &[JourneyMark], len: usize) -> Vec<JourneyMark> {
    let mut starts: Vec<JourneyMark> = marks
        .iter()
        .filter(|m| m.segment_index < len)
        .copied()
        .collect();
    starts.sort_by_key(|m| m.segment_index);
    starts.dedup_by(|later, earlier| {
        if later.segment_index != earlier.segment_index {
            return false;
        }
        earlier.number = later.number;
        earlier.date = later.date.or(earlier.date);
        true
    });
    starts
}

/// Number of "Flight N" journeys declared in the text.
pub fn declared_journeys(marks: &[JourneyMark], segment_count: usize) -> usize {
    explicit_starts(marks, segment_count).len()
}

fn explicit_drafts(marks: &[JourneyMark], len: usize) -> Vec<Draft> {
    let starts = explicit_starts(marks, len);
    let mut drafts = Vec::with_capacity(starts.len() + 1);
    let first = starts.first().map_or(len, |m| m.segment_index);
    if first > 0 {
        drafts.push(Draft::inferred(0, first - 1));
    }
    for (k, mark) in starts.iter().enumerate() {
        let next = starts.get(k + 1).map_or(len, |m| m.segment_index);
        drafts.push(Draft {
            start: mark.segment_index,
            end: next - 1,
            explicit: true,
            number: Some(mark.number),
            date: mark.date,
        });
    }
    drafts
}

/// Group segments into journeys.
pub fn group_journeys(
    segments: &[Segment],
    marks: &[JourneyMark],
    section_starts: &[usize],
) -> Vec<Journey> {
    if segments.is_empty() {
        return Vec::new();
    }
    let ordinals = day_ordinals(segments);
    let mut drafts = explicit_drafts(marks, segments.len());

    let explicit = drafts.iter().filter(|d| d.explicit).count();
    if explicit <= 1 && segments.len() > 1 {
        drafts = drafts
            .into_iter()
            .flat_map(|draft| {
                let cuts: Vec<usize> = (draft.start + 1..=draft.end)
                    .filter(|&i| {
                        gap(&ordinals, i - 1, i).is_some_and(|g| g > 1)
                            || hard_boundary(segments, section_starts, i)
                    })
                    .collect();
                if !cuts.is_empty() {
                    debug!(start = draft.start, end = draft.end, ?cuts, "cutting journey");
                }
                draft.split_at(&cuts)
            })
            .collect();
    }

    let mut merged: Vec<Draft> = Vec::with_capacity(drafts.len());
    for draft in drafts {
        if let Some(prev) = merged.last_mut() {
            let close = gap(&ordinals, prev.end, draft.start).is_some_and(|g| g <= 1);
            let distinct_headers =
                prev.explicit && draft.explicit && prev.number != draft.number;
            if close && !distinct_headers && !hard_boundary(segments, section_starts, draft.start)
            {
                debug!(
                    first = prev.start,
                    second = draft.start,
                    end = draft.end,
                    "merging adjacent journeys"
                );
                prev.end = draft.end;
                prev.explicit |= draft.explicit;
                prev.number = prev.number.or(draft.number);
                prev.date = prev.date.or(draft.date);
                continue;
            }
        }
        merged.push(draft);
    }

    let continuous: Vec<Draft> = merged
        .into_iter()
        .flat_map(|draft| {
            let cuts: Vec<usize> = (draft.start + 1..=draft.end)
                .filter(|&i| !segments[i - 1].connects_to(&segments[i]))
                .collect();
            if !cuts.is_empty() {
                debug!(start = draft.start, end = draft.end, ?cuts, "splitting discontinuous journey");
            }
            draft.split_at(&cuts)
        })
        .collect();

    continuous
        .iter()
        .enumerate()
        .filter_map(|(k, draft)| {
            let first = &segments[draft.start];
            let header_date = if draft.explicit {
                draft.date.or(first.header_ref)
            } else {
                first.dep_date.or(first.header_ref)
            };
            Journey::from_range(
                segments,
                draft.start,
                draft.end,
                draft.explicit,
                k + 1,
                header_date,
            )
            .ok()
        })
        .collect()
}

/// More than one declared journey, more than two journeys, or two that are
/// not a simple out-and-back.
pub fn is_multi_city(journeys: &[Journey], declared: usize) -> bool {
    match journeys {
        _ if declared > 1 => true,
        [outbound, inbound] => !outbound.mirrors(inbound),
        js => js.len() > 2,
    }
}
