//! Itinerary lookup: snapshot cache first, feed provider on a miss.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::{error, info};

use crate::cache::SnapshotCache;
use crate::domain::{LineId, RawRow, Stop};
use crate::feed::{FeedSource, FeedStatus, decode};

use super::assemble::assemble;

/// Upper bound on distinct lines being loaded at once.
const MAX_IN_FLIGHT: u64 = 10_000;

/// Configuration for the itinerary service.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Persist every decoded result, including empty ones from failed
    /// fetches. Off by default: only a 200 with at least one row is saved.
    pub persist_empty: bool,
}

impl ServiceConfig {
    /// Set whether empty or failed fetch results are persisted.
    pub fn with_persist_empty(mut self, persist_empty: bool) -> Self {
        self.persist_empty = persist_empty;
        self
    }
}

/// Rows obtained from the provider, with whether they are worth caching.
struct Fetched {
    rows: Vec<RawRow>,
    succeeded: bool,
}

/// Itinerary data access service.
///
/// Wraps a feed source and a snapshot cache. Overlapping lookups for the
/// same line share one load/fetch.
pub struct ItineraryService<S> {
    source: S,
    cache: SnapshotCache,
    config: ServiceConfig,
    /// Coalesces concurrent loads per line. Entries live only while a load
    /// is running.
    in_flight: MokaCache<LineId, Arc<Vec<RawRow>>>,
}

impl<S: FeedSource> ItineraryService<S> {
    /// Create a new service.
    pub fn new(source: S, cache: SnapshotCache, config: ServiceConfig) -> Self {
        Self {
            source,
            cache,
            config,
            in_flight: MokaCache::builder().max_capacity(MAX_IN_FLIGHT).build(),
        }
    }

    /// Get the ordered stops of a line.
    ///
    /// Never fails: missing cache, unreachable provider and bad statuses all
    /// come back as an empty list.
    pub async fn get_itinerary(&self, line: &LineId) -> Vec<Stop> {
        let rows = self.retrieve(line).await;
        assemble(&rows)
    }

    /// Get the raw rows of a line, loading or fetching them once for all
    /// concurrent callers.
    pub async fn retrieve(&self, line: &LineId) -> Arc<Vec<RawRow>> {
        let rows = self
            .in_flight
            .get_with_by_ref(line, self.load_or_fetch(line))
            .await;
        self.in_flight.invalidate(line).await;
        rows
    }

    /// Access the snapshot cache.
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Access the underlying feed source.
    pub fn source(&self) -> &S {
        &self.source
    }

    async fn load_or_fetch(&self, line: &LineId) -> Arc<Vec<RawRow>> {
        info!(%line, "searching for cached itinerary");
        if let Some(rows) = self.cache.load(line).await {
            info!(%line, rows = rows.len(), "serving itinerary from cache");
            return Arc::new(rows);
        }

        let fetched = self.fetch(line).await;
        let rows = Arc::new(fetched.rows);

        let worth_saving = fetched.succeeded && !rows.is_empty();
        if worth_saving || self.config.persist_empty {
            self.persist(line.clone(), rows.clone());
        }

        rows
    }

    async fn fetch(&self, line: &LineId) -> Fetched {
        match self.source.fetch(line).await {
            Ok(response) => Fetched {
                succeeded: FeedStatus::from_code(response.status).is_ok(),
                rows: decode(&response),
            },
            Err(e) => {
                error!(%line, error = %e, "itinerary feed unreachable");
                Fetched {
                    rows: Vec::new(),
                    succeeded: false,
                }
            }
        }
    }

    /// Write the snapshot in the background. The caller never waits on it
    /// and never sees its failure.
    fn persist(&self, line: LineId, rows: Arc<Vec<RawRow>>) {
        let cache = self.cache.clone();
        tokio::spawn(async move {
            match cache.save(&line, &rows).await {
                Ok(()) => info!(%line, rows = rows.len(), "itinerary snapshot stored"),
                Err(e) => error!(%line, error = %e, "failed to store itinerary snapshot"),
            }
        });
    }
}
