//! Application state for the web layer.

use std::sync::Arc;

use crate::feed::FeedClient;
use crate::itinerary::ItineraryService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Itinerary lookup backed by the live feed provider
    pub itineraries: Arc<ItineraryService<FeedClient>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(itineraries: ItineraryService<FeedClient>) -> Self {
        Self {
            itineraries: Arc::new(itineraries),
        }
    }
}
