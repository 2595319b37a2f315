//! Booking-class (RBD) resolution.
//!
//! Maps a carrier and a marketed cabin to the single reservation booking
//! letter that sells it, with short-haul cabin substitution.

mod haul;
mod resolve;

pub use haul::{Haul, SHORT_HAUL_MAX_MINUTES, classify_haul};
pub use resolve::{BookingResolver, DEFAULT_STRATEGIES, Resolution, Strategy};
