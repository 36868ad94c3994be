//! OpenRouteService client: geocoding and driving directions for the
//! fuel-stop planner. Consumed as a black box that returns a route
//! polyline and distance.

pub mod client;
pub mod error;
pub mod mock;

pub use client::{ResolvedLocation, RouteProvider, RoutingClient};
pub use error::RoutingError;
pub use mock::StaticRouteProvider;
