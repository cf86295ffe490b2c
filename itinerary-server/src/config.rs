//! Process configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cache::CacheConfig;
use crate::feed::FeedConfig;
use crate::itinerary::ServiceConfig;

const ENV_PROVIDER_HOST: &str = "ITINERARY_PROVIDER_HOST";
const ENV_PROVIDER_PATH: &str = "ITINERARY_PROVIDER_PATH";
const ENV_CACHE_DIR: &str = "ITINERARY_CACHE_DIR";
const ENV_LISTEN_ADDR: &str = "ITINERARY_LISTEN_ADDR";
const ENV_HTTP_TIMEOUT_SECS: &str = "ITINERARY_HTTP_TIMEOUT_SECS";
const ENV_PERSIST_EMPTY: &str = "ITINERARY_PERSIST_EMPTY";

/// Default listen address.
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Error loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required variable is not set
    #[error("{0} is not set")]
    Missing(&'static str),

    /// Variable is set but unusable
    #[error("{var} is invalid: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Everything the server binary needs.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub feed: FeedConfig,
    pub cache: CacheConfig,
    pub service: ServiceConfig,
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let host = required(ENV_PROVIDER_HOST)?;
        let path = required(ENV_PROVIDER_PATH)?;
        let mut feed = FeedConfig::new(host.trim(), path.trim());
        if let Some(secs) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: ENV_HTTP_TIMEOUT_SECS,
                message: format!("{e}"),
            })?;
            feed = feed.with_timeout(secs);
        }

        let cache = lookup(ENV_CACHE_DIR)
            .map(|dir| CacheConfig::new(PathBuf::from(dir)))
            .unwrap_or_default();

        let listen_addr = lookup(ENV_LISTEN_ADDR)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: ENV_LISTEN_ADDR,
                message: format!("{e}"),
            })?;

        let persist_empty = match lookup(ENV_PERSIST_EMPTY) {
            None => false,
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                var: ENV_PERSIST_EMPTY,
                message: format!("expected true or false, got {v:?}"),
            })?,
        };

        Ok(Self {
            listen_addr,
            feed,
            cache,
            service: ServiceConfig::default().with_persist_empty(persist_empty),
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}
