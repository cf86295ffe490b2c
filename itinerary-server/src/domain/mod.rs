//! Domain types for the itinerary service.
//!
//! Line identifiers are validated at construction; raw feed rows and
//! assembled stops are plain data.

mod line;
mod stop;

pub use line::{InvalidLineId, LineId};
pub use stop::{ROW_FIELDS, RawRow, Stop};
