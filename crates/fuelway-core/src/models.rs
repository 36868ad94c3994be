//! Core data models for trip planning.

use crate::error::PlanError;
use crate::geo::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One end of a route, as resolved by the geocoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEndpoint {
    pub point: GeoPoint,
    /// Two-letter state/territory code, when the geocoder provides one.
    pub region: Option<String>,
    pub display_name: Option<String>,
}

/// A driving route as returned by the routing collaborator.
///
/// Produced once per planning request and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteGeometry {
    /// Ordered coordinates approximating the driven path.
    pub polyline: Vec<GeoPoint>,
    pub total_distance_miles: f64,
    pub duration_seconds: f64,
    /// [min_lon, min_lat, max_lon, max_lat]
    pub bbox: [f64; 4],
    pub start: RouteEndpoint,
    pub end: RouteEndpoint,
}

impl RouteGeometry {
    /// Reject degenerate routes before planning.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.polyline.len() < 2 {
            return Err(PlanError::InvalidRouteGeometry(format!(
                "polyline has {} points, need at least 2",
                self.polyline.len()
            )));
        }
        if !(self.total_distance_miles > 0.0) {
            return Err(PlanError::InvalidRouteGeometry(format!(
                "total distance must be positive, got {}",
                self.total_distance_miles
            )));
        }
        Ok(())
    }
}

/// Caller-supplied vehicle assumptions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub fuel_efficiency_mpg: f64,
    pub tank_range_miles: f64,
}

impl VehicleProfile {
    pub fn validate(&self) -> Result<(), PlanError> {
        if !(self.fuel_efficiency_mpg > 0.0) {
            return Err(PlanError::InvalidVehicleProfile(format!(
                "fuel efficiency must be positive, got {} mpg",
                self.fuel_efficiency_mpg
            )));
        }
        if !(self.tank_range_miles > 0.0) {
            return Err(PlanError::InvalidVehicleProfile(format!(
                "tank range must be positive, got {} miles",
                self.tank_range_miles
            )));
        }
        Ok(())
    }

    /// Gallons consumed by one full tank (full-tank refill policy).
    pub fn gallons_per_fill(&self) -> f64 {
        self.tank_range_miles / self.fuel_efficiency_mpg
    }
}

/// A priced, geolocated fuel station from the external catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelStation {
    pub id: i64,
    pub opis_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    /// Two-letter state/territory code.
    pub state: String,
    pub rack_id: i64,
    pub retail_price_per_gallon: f64,
    /// Absent for ungeocoded stations.
    pub position: Option<GeoPoint>,
}

/// Which station-selection strategy the planner uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopStrategy {
    /// Cheapest station within a search radius of each projected stop.
    RadiusSearch,
    /// Price-ordered rotation over stations in the start/end regions
    /// and their neighbors.
    RegionFallback,
}

impl std::str::FromStr for StopStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "radius_search" | "radius" => Ok(Self::RadiusSearch),
            "region_fallback" | "region" => Ok(Self::RegionFallback),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// A planned refueling stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelStop {
    /// 1-based stop index along the route. Stops the radius search
    /// could not place keep their original index, so the sequence may
    /// contain gaps.
    pub stop_order: u32,
    pub station: FuelStation,
    pub distance_from_start_miles: f64,
    pub gallons_to_fill: f64,
    pub cost_at_stop: f64,
    /// The projected route point, not the station's own coordinates.
    pub position: GeoPoint,
}

/// Trip-level cost totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TripTotals {
    pub total_fuel_cost: f64,
    /// Fuel consumed over the whole trip (`distance / mpg`), decoupled
    /// from the sum of per-stop purchases.
    pub total_gallons_needed: f64,
    pub average_price_per_gallon: f64,
}

/// A fully planned trip, immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    /// Assigned by the persistence layer on store.
    pub id: Option<i64>,
    pub route: RouteGeometry,
    pub vehicle: VehicleProfile,
    pub stops: Vec<FuelStop>,
    pub totals: TripTotals,
    pub created_at: DateTime<Utc>,
}
