//! Itinerary assembly and lookup.
//!
//! Turns a line's raw feed rows into direction-tagged stops, sourcing the
//! rows from the snapshot cache or, on a miss, from the feed provider.

mod assemble;
mod service;


pub use assemble::{LegState, assemble, clean_name, parse_marker};
pub use service::{ItineraryService, ServiceConfig};
