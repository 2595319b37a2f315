//! Reservation-system command output.
//!
//! Both formatters take an already-selected slice of segments and either
//! render every segment or fail; they never emit partial output.

mod availability;
mod itinerary;

pub use availability::format_availability;
pub use itinerary::{format_itinerary, itinerary_line};
