//! Fixture-backed route provider for testing without API access.

use crate::client::RouteProvider;
use crate::error::RoutingError;
use futures::future::BoxFuture;
use futures::FutureExt;
use fuelway_core::RouteGeometry;
use std::collections::HashMap;

/// Serves pre-canned routes keyed by (start, end) text.
///
/// Useful for exercising the planning pipeline without OpenRouteService
/// credentials. Unknown location pairs behave like a failed geocode.
#[derive(Debug, Clone, Default)]
pub struct StaticRouteProvider {
    routes: HashMap<(String, String), RouteGeometry>,
}

impl StaticRouteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
        route: RouteGeometry,
    ) -> Self {
        self.routes.insert((start.into(), end.into()), route);
        self
    }
}

impl RouteProvider for StaticRouteProvider {
    fn calculate_route<'a>(
        &'a self,
        start: &'a str,
        end: &'a str,
    ) -> BoxFuture<'a, Result<RouteGeometry, RoutingError>> {
        let result = self
            .routes
            .get(&(start.to_string(), end.to_string()))
            .cloned()
            .ok_or_else(|| RoutingError::LocationNotFound(format!("{start} -> {end}")));
        async move { result }.boxed()
    }
}
