//! Short-haul / long-haul sector classification.

use crate::domain::AirportCode;
use crate::tables::ReferenceData;

/// Sectors shorter than this are short-haul when the region table is silent.
pub const SHORT_HAUL_MAX_MINUTES: u32 = 240;

/// How a sector is flown, for cabin substitution purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haul {
    Short,
    Long,
    /// Neither the region table nor a duration settles it
    Unknown,
}

/// Classify a sector.
///
/// Both airports in the same short-haul region → short. Both airports known
/// but in different regions → long. Otherwise the flight duration decides,
/// with anything under four hours counted as short.
pub fn classify_haul(
    reference: &ReferenceData,
    from: AirportCode,
    to: AirportCode,
    duration_minutes: Option<u32>,
) -> Haul {
    match (reference.region(from), reference.region(to)) {
        (Some(a), Some(b)) if a == b => Haul::Short,
        (Some(_), Some(_)) => Haul::Long,
        _ => match duration_minutes {
            Some(d) if d < SHORT_HAUL_MAX_MINUTES => Haul::Short,
            Some(_) => Haul::Long,
            None => Haul::Unknown,
        },
    }
}
