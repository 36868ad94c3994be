//! Routing client error types.

use thiserror::Error;

/// Errors from the routing/geocoding collaborator.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The geocoder found nothing for the given text.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// The location resolves outside the domestic service area.
    #[error("location outside service area: {0}")]
    OutsideServiceArea(String),

    /// Upstream timeout or failure. A caller may retry the whole
    /// request; the client never retries internally.
    #[error("routing provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with a payload we could not interpret.
    #[error("unexpected routing response: {0}")]
    BadResponse(String),
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            RoutingError::Unavailable(err.to_string())
        } else if err.is_decode() {
            RoutingError::BadResponse(err.to_string())
        } else {
            RoutingError::Unavailable(err.to_string())
        }
    }
}
