//! Conversion errors.

use crate::config::DirectionFilter;

/// Why a conversion produced no output.
///
/// Conversions never emit partial results: any of these means nothing was
/// formatted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The text contained no recognisable flight segments
    #[error("no flight segments found in the itinerary text")]
    NoSegments,

    #[error("no {0} segments in the itinerary")]
    NoSegmentsForDirection(DirectionFilter),

    /// Segment range or journey index out of bounds or empty
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// A field the output needs is missing (1-based segment number)
    #[error("segment {segment} has no {field}")]
    MissingField { segment: usize, field: &'static str },
}

impl ConvertError {
    /// Short machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            ConvertError::NoSegments => "no_segments",
            ConvertError::NoSegmentsForDirection(_) => "no_segments_for_direction",
            ConvertError::InvalidSelection(_) => "invalid_selection",
            ConvertError::MissingField { .. } => "missing_field",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_and_messages() {
        let err = ConvertError::NoSegmentsForDirection(DirectionFilter::Inbound);
        assert_eq!(err.reason(), "no_segments_for_direction");
        assert_eq!(err.to_string(), "no inbound segments in the itinerary");

        let err = ConvertError::MissingField {
            segment: 1,
            field: "departure date",
        };
        assert_eq!(err.reason(), "missing_field");
        assert_eq!(err.to_string(), "segment 1 has no departure date");

        assert_eq!(ConvertError::NoSegments.reason(), "no_segments");
        assert_eq!(
            ConvertError::InvalidSelection("journey 3 of 2".into()).reason(),
            "invalid_selection"
        );
    }
}
