//! Domain types for itinerary conversion.
//!
//! This module contains the value types parsed out of itinerary text. All
//! types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod airport;
mod cabin;
mod carrier;
mod date;
mod error;
mod journey;
pub(crate) mod segment;
mod time;

pub use airport::{AirportCode, InvalidAirportCode};
pub use cabin::{Cabin, UnknownCabin};
pub use carrier::{CarrierCode, FlightNumber, InvalidCarrierCode, InvalidFlightNumber};
pub use date::{InvalidDate, TravelDate};
pub use error::DomainError;
pub use journey::Journey;
pub use segment::{Direction, Route, Segment};
pub use time::{ClockTime, TimeError, TimeToken};
