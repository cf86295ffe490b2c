use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use itinerary_server::cache::SnapshotCache;
use itinerary_server::config::ServerConfig;
use itinerary_server::feed::FeedClient;
use itinerary_server::itinerary::ItineraryService;
use itinerary_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match FeedClient::new(config.feed.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create feed client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cache = SnapshotCache::new(config.cache.clone());
    info!(dir = %cache.dir().display(), "using itinerary snapshot cache");

    let service = ItineraryService::new(client, cache, config.service.clone());
    let app = create_router(AppState::new(service));

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.listen_addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Itinerary server listening on http://{}", config.listen_addr);
    info!("  GET  /health            - Health check");
    info!("  GET  /itinerary/:line   - Ordered stops of a line");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
