//! Booking-letter resolution.
//!
//! A cabin is turned into a booking letter by walking an ordered list of
//! strategies. Each strategy either produces a letter, has nothing to say,
//! or vetoes the lookup outright (a carrier known not to sell the cabin).

use tracing::trace;

use super::haul::{Haul, classify_haul};
use crate::domain::{Cabin, CarrierCode, Segment};
use crate::tables::ReferenceData;

/// Outcome of a single resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Letter(char),
    /// This strategy has no entry; try the next one
    NoMatch,
    /// The carrier does not sell this cabin; stop
    Unavailable,
}

/// One step of the lookup chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The carrier's own letter table
    CarrierTable,
    /// Letters shared by most airlines
    GenericTable,
    /// `F`/`J`/`N`/`Y`
    FixedDefault,
}

impl Strategy {
    pub fn apply(&self, reference: &ReferenceData, carrier: CarrierCode, cabin: Cabin) -> Resolution {
        match self {
            Strategy::CarrierTable => match reference.carrier_letters(carrier, cabin) {
                None => Resolution::NoMatch,
                Some([]) => Resolution::Unavailable,
                Some([first, ..]) => Resolution::Letter(*first),
            },
            Strategy::GenericTable => reference
                .generic_letters(cabin)
                .first()
                .map_or(Resolution::NoMatch, |c| Resolution::Letter(*c)),
            Strategy::FixedDefault => Resolution::Letter(cabin.fixed_default()),
        }
    }
}

/// Carrier table, then generic table, then fixed default.
pub const DEFAULT_STRATEGIES: [Strategy; 3] = [
    Strategy::CarrierTable,
    Strategy::GenericTable,
    Strategy::FixedDefault,
];

/// Resolves cabins to booking letters against a set of reference tables.
#[derive(Debug, Clone, Copy)]
pub struct BookingResolver<'a> {
    reference: &'a ReferenceData,
    strategies: &'a [Strategy],
}

impl<'a> BookingResolver<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self {
            reference,
            strategies: &DEFAULT_STRATEGIES,
        }
    }

    /// Replace the strategy chain.
    pub fn with_strategies(mut self, strategies: &'a [Strategy]) -> Self {
        self.strategies = strategies;
        self
    }

    /// First letter produced by the strategy chain, or `None` if a strategy
    /// reports the cabin unavailable or every strategy comes up empty.
    ///
    /// ```
    /// use itinerary_gds::booking::BookingResolver;
    /// use itinerary_gds::domain::{Cabin, CarrierCode};
    /// use itinerary_gds::tables::ReferenceData;
    ///
    /// let resolver = BookingResolver::new(ReferenceData::builtin());
    /// let kl = CarrierCode::parse("KL").unwrap();
    /// assert_eq!(resolver.resolve(kl, Cabin::First), None);
    /// ```
    pub fn resolve(&self, carrier: CarrierCode, cabin: Cabin) -> Option<char> {
        for strategy in self.strategies {
            match strategy.apply(self.reference, carrier, cabin) {
                Resolution::Letter(c) => {
                    trace!(%carrier, %cabin, ?strategy, letter = %c, "booking letter resolved");
                    return Some(c);
                }
                Resolution::Unavailable => {
                    trace!(%carrier, %cabin, "cabin not sold by carrier");
                    return None;
                }
                Resolution::NoMatch => {}
            }
        }
        None
    }

    /// Resolve free cabin text ("Premium Economy", "coach").
    pub fn resolve_text(&self, carrier: CarrierCode, cabin: &str) -> Option<char> {
        Cabin::from_text(cabin).and_then(|c| self.resolve(carrier, c))
    }

    /// The cabin actually sold on a segment, after short-haul substitution.
    pub fn effective_cabin(&self, segment: &Segment, cabin: Cabin) -> Cabin {
        let haul = classify_haul(
            self.reference,
            segment.dep_airport,
            segment.arr_airport,
            segment.duration_minutes,
        );
        match (haul, cabin.short_haul_equivalent()) {
            (Haul::Short, Some(sold)) => {
                trace!(
                    from = %segment.dep_airport,
                    to = %segment.arr_airport,
                    %cabin,
                    %sold,
                    "short-haul cabin substitution"
                );
                sold
            }
            _ => cabin,
        }
    }

    /// Booking letter for a segment.
    ///
    /// An explicit letter from the text always wins. Otherwise the segment's
    /// own cabin, else `fallback`, is downgraded for short-haul sectors and
    /// resolved against the carrier.
    pub fn resolve_for_segment(&self, segment: &Segment, fallback: Option<Cabin>) -> Option<char> {
        if let Some(letter) = segment.booking_class {
            return Some(letter);
        }
        let cabin = segment.cabin.or(fallback)?;
        let cabin = self.effective_cabin(segment, cabin);
        self.resolve(segment.airline_code, cabin)
    }
}
