//! Public conversion entry points.
//!
//! Each entry point is a pure function of the text, the options and the
//! reference tables: parse, select the requested subset, then format.

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use crate::booking::BookingResolver;
use crate::config::{ConvertOptions, DirectionFilter};
use crate::domain::{Journey, Segment};
use crate::error::ConvertError;
use crate::format::{format_availability, format_itinerary};
use crate::parser::{ParsedItinerary, parse_itinerary};
use crate::tables::ReferenceData;

/// What the text contains, for deciding which conversions to offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryPreview {
    pub segments: Vec<Segment>,
    pub journeys: Vec<Journey>,
    /// One label per journey, e.g. "1 JFK-CDG"
    pub labels: Vec<String>,
    pub multi_city: bool,
}

impl From<ParsedItinerary> for ItineraryPreview {
    fn from(parsed: ParsedItinerary) -> Self {
        let labels = parsed.journeys.iter().map(Journey::label).collect();
        Self {
            segments: parsed.segments,
            journeys: parsed.journeys,
            labels,
            multi_city: parsed.multi_city,
        }
    }
}

/// Converts itinerary text to reservation commands.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    reference: &'a ReferenceData,
}

impl<'a> Converter<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Parse the full segment and journey lists without formatting.
    pub fn preview(&self, text: &str) -> ItineraryPreview {
        parse_itinerary(text, self.reference).into()
    }

    /// Itinerary command lines for the selected segments.
    ///
    /// ```
    /// use itinerary_gds::config::ConvertOptions;
    /// use itinerary_gds::convert::Converter;
    ///
    /// let text = "Depart · Fri, Oct 3\n\
    ///             Air France 7\n\
    ///             6:00 pm – 7:15 am+1\n\
    ///             New York (JFK)\n\
    ///             Paris (CDG)\n\
    ///             Business";
    /// let out = Converter::builtin().itinerary(text, &ConvertOptions::default()).unwrap();
    /// assert_eq!(out, " 1 AF 7J 03OCT F JFKCDG*SS1 600P 715A 04OCT /DCAF /E");
    /// ```
    pub fn itinerary(&self, text: &str, options: &ConvertOptions) -> Result<String, ConvertError> {
        let segments = self.select(text, options)?;
        let resolver = BookingResolver::new(self.reference);
        format_itinerary(
            &segments,
            |seg| {
                resolver
                    .resolve_for_segment(seg, options.auto_cabin)
                    .unwrap_or(options.booking_class)
            },
            &options.segment_status,
        )
    }

    /// Availability command for the selected segments.
    pub fn availability(&self, text: &str, options: &ConvertOptions) -> Result<String, ConvertError> {
        let segments = self.select(text, options)?;
        format_availability(&segments, options.detailed_availability)
    }

    /// Parse and narrow to the segments the options ask for.
    fn select(&self, text: &str, options: &ConvertOptions) -> Result<Vec<Segment>, ConvertError> {
        let parsed = parse_itinerary(text, self.reference);
        if parsed.is_empty() {
            return Err(ConvertError::NoSegments);
        }

        let journey = match options.journey_index {
            Some(index) => Some(
                parsed
                    .journeys
                    .iter()
                    .find(|j| j.index_hint == index)
                    .ok_or_else(|| {
                        ConvertError::InvalidSelection(format!(
                            "journey {index} of {}",
                            parsed.journeys.len()
                        ))
                    })?
                    .range(),
            ),
            None => None,
        };
        let range = options
            .segment_range
            .map(|r| clamp_range(r, parsed.segments.len()))
            .transpose()?;

        let admitted: Vec<(usize, Segment)> = parsed
            .segments
            .into_iter()
            .enumerate()
            .filter(|(i, _)| journey.as_ref().is_none_or(|j| j.contains(i)))
            .filter(|(_, s)| options.direction.admits(s.direction))
            .collect();
        if admitted.is_empty() {
            return Err(match options.direction {
                DirectionFilter::All => ConvertError::NoSegments,
                direction => ConvertError::NoSegmentsForDirection(direction),
            });
        }

        let selected: Vec<Segment> = admitted
            .into_iter()
            .filter(|(i, _)| range.as_ref().is_none_or(|r| r.contains(i)))
            .map(|(_, s)| s)
            .collect();
        if selected.is_empty() {
            let (start, end) = options.segment_range.unwrap_or_default();
            return Err(ConvertError::InvalidSelection(format!(
                "segment range {start}..={end} excludes every selected segment"
            )));
        }
        debug!(
            segments = selected.len(),
            direction = %options.direction,
            journey = ?options.journey_index,
            range = ?options.segment_range,
            "selected segments"
        );
        Ok(selected)
    }
}

impl Converter<'static> {
    /// Converter over the built-in reference tables.
    pub fn builtin() -> Self {
        Self::new(ReferenceData::builtin())
    }
}

/// Inclusive `[start, end]` over the full segment list, with `end` clamped
/// to the last segment.
fn clamp_range((start, end): (usize, usize), len: usize) -> Result<RangeInclusive<usize>, ConvertError> {
    let end = end.min(len.saturating_sub(1));
    if start > end {
        return Err(ConvertError::InvalidSelection(format!(
            "segment range {start}..={end} over {len} segments"
        )));
    }
    Ok(start..=end)
}
