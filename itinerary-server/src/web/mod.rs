//! Web layer for the itinerary service.
//!
//! Exposes the itinerary lookup over HTTP.

mod routes;
mod state;

pub use routes::{AppError, ErrorResponse, create_router};
pub use state::AppState;
