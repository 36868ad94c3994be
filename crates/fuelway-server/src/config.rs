//! Server configuration from environment.

use fuelway_core::{StopStrategy, DEFAULT_SEARCH_RADIUS_MILES};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    pub ors_base_url: String,
    pub ors_api_key: String,
    /// Upper bound on one routing/geocoding round trip. A timeout
    /// surfaces as RoutingUnavailable with no internal retry.
    pub routing_timeout_secs: u64,
    pub search_radius_miles: f64,
    /// Strategy used when a request does not name one.
    pub default_strategy: StopStrategy,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("FUELWAY_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            database_path: env::var("FUELWAY_DB")
                .unwrap_or_else(|_| "data/fuelway.db".to_string()),
            database_max_connections: env::var("FUELWAY_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            ors_base_url: env::var("ORS_BASE_URL")
                .unwrap_or_else(|_| "https://api.openrouteservice.org".to_string()),
            ors_api_key: env::var("ORS_API_KEY").unwrap_or_default(),
            routing_timeout_secs: env::var("FUELWAY_ROUTING_TIMEOUT_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            search_radius_miles: env::var("FUELWAY_SEARCH_RADIUS_MI")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SEARCH_RADIUS_MILES),
            default_strategy: env::var("FUELWAY_STRATEGY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(StopStrategy::RadiusSearch),
        }
    }
}
