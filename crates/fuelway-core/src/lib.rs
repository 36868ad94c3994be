//! Fuel-stop placement engine.
//!
//! Plans refueling stops for long-distance road trips: projects
//! required stops onto a route polyline, selects stations from a
//! priced catalog under one of two strategies, and aggregates the
//! result into trip totals.

pub mod aggregate;
pub mod assemble;
pub mod catalog;
pub mod error;
pub mod geo;
pub mod models;
pub mod planner;
pub mod regions;

pub use aggregate::aggregate;
pub use assemble::assemble;
pub use catalog::{FuelStationCatalog, MemoryCatalog};
pub use error::PlanError;
pub use geo::{distance_miles, GeoPoint, EARTH_RADIUS_MILES};
pub use models::{
    FuelStation, FuelStop, RouteEndpoint, RouteGeometry, StopStrategy, TripPlan, TripTotals,
    VehicleProfile,
};
pub use planner::{StopPlacementPlanner, DEFAULT_SEARCH_RADIUS_MILES};
