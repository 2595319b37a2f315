//! Flight itinerary converter.
//!
//! Parses the plain text of a flight search result ("Air France 7,
//! 6:00 pm - 7:15 am+1, New York (JFK) ...") into segments and journeys, and
//! renders them as reservation-system itinerary lines or an availability
//! command.

pub mod booking;
pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod format;
pub mod parser;
pub mod tables;
