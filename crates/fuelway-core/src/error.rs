//! Planning error taxonomy.

use thiserror::Error;

/// Errors produced by the planning pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Latitude or longitude outside the valid range.
    #[error("invalid coordinate: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Non-positive fuel efficiency or tank range.
    #[error("invalid vehicle profile: {0}")]
    InvalidVehicleProfile(String),

    /// Degenerate polyline or non-positive route distance.
    #[error("invalid route geometry: {0}")]
    InvalidRouteGeometry(String),

    /// Catalog empty under both the primary and fallback queries.
    #[error("no fuel stations available in the catalog")]
    NoStationsAvailable,

    /// A produced stop list violates the ordering contract.
    #[error("inconsistent fuel stop list: {0}")]
    InconsistentStops(String),
}
