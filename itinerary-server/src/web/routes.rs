//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tracing::warn;

use crate::domain::{InvalidLineId, LineId, Stop};

use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/itinerary/:line", get(itinerary))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Ordered stops of a line.
///
/// Unknown lines and provider failures both answer with an empty list.
async fn itinerary(
    State(state): State<AppState>,
    Path(line): Path<String>,
) -> Result<Json<Vec<Stop>>, AppError> {
    let line = LineId::parse_normalized(&line)?;
    let stops = state.itineraries.get_itinerary(&line).await;
    Ok(Json(stops))
}

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl From<InvalidLineId> for AppError {
    fn from(e: InvalidLineId) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(status = status.as_u16(), "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
