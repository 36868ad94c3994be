//! Trip planning endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::persistence::trip_plans;
use crate::state::AppState;
use fuelway_core::{
    assemble, PlanError, RouteGeometry, StopPlacementPlanner, StopStrategy, TripPlan,
    VehicleProfile,
};
use fuelway_ors::RoutingError;

type ApiError = (StatusCode, Json<Value>);

// === Request/Response types ===

#[derive(Debug, Deserialize)]
pub struct TripRequest {
    pub start_location: String,
    pub end_location: String,
    #[serde(default = "default_mpg")]
    pub fuel_efficiency_mpg: f64,
    #[serde(default = "default_tank_range")]
    pub tank_range_miles: f64,
    /// Overrides the configured default strategy for this request.
    #[serde(default)]
    pub strategy: Option<StopStrategy>,
}

fn default_mpg() -> f64 {
    10.0
}

fn default_tank_range() -> f64 {
    500.0
}

#[derive(Debug, Deserialize)]
pub struct ListTripsQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct StationBody {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub retail_price: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FuelStopBody {
    pub stop_order: u32,
    pub fuel_station: StationBody,
    pub distance_from_start_miles: f64,
    pub gallons_to_fill: f64,
    pub cost_at_stop: f64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct TripPlanBody {
    pub id: Option<i64>,
    pub start_location: String,
    pub end_location: String,
    pub total_distance_miles: f64,
    pub total_fuel_cost: f64,
    pub total_gallons_needed: f64,
    pub fuel_efficiency_mpg: f64,
    pub tank_range_miles: f64,
    pub fuel_stops: Vec<FuelStopBody>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MapData {
    /// Polyline as [lon, lat] pairs, GeoJSON-style.
    pub geometry: Vec<[f64; 2]>,
    pub bbox: [f64; 4],
    pub start_coords: Coords,
    pub end_coords: Coords,
}

#[derive(Debug, Serialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct TripSummary {
    pub num_stops: usize,
    pub avg_price_per_gallon: f64,
    pub total_distance_miles: f64,
    pub total_fuel_cost: f64,
    pub total_gallons_needed: f64,
    pub estimated_duration_hours: f64,
}

#[derive(Debug, Serialize)]
pub struct CreateTripResponse {
    pub route: TripPlanBody,
    pub map_data: MapData,
    pub summary: TripSummary,
}

#[derive(Debug, Serialize)]
pub struct TripListResponse {
    pub count: usize,
    pub results: Vec<TripPlanBody>,
}

// === Handlers ===

/// POST /routes — plan a trip and persist it.
pub async fn create_trip(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TripRequest>,
) -> Result<(StatusCode, Json<CreateTripResponse>), ApiError> {
    validate_request(&req)?;

    let vehicle = VehicleProfile {
        fuel_efficiency_mpg: req.fuel_efficiency_mpg,
        tank_range_miles: req.tank_range_miles,
    };
    let strategy = req.strategy.unwrap_or(state.config().default_strategy);

    // The one blocking external call in the pipeline; bounded by the
    // configured timeout, never retried here.
    let timeout = Duration::from_secs(state.config().routing_timeout_secs);
    let route = match tokio::time::timeout(
        timeout,
        state
            .routing()
            .calculate_route(&req.start_location, &req.end_location),
    )
    .await
    {
        Ok(result) => result.map_err(routing_error)?,
        Err(_) => {
            return Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "routing provider unavailable: request timed out" })),
            ))
        }
    };

    let catalog = state.catalog_snapshot();
    let planner = StopPlacementPlanner::new(state.config().search_radius_miles);
    let stops = planner
        .plan(&route, &vehicle, strategy, &catalog)
        .map_err(plan_error)?;
    let mut plan = assemble(route, vehicle, stops).map_err(plan_error)?;

    let id = trip_plans::store_trip_plan(state.db().pool(), &plan)
        .await
        .map_err(|err| {
            tracing::error!("failed to persist trip plan: {err:#}");
            persistence_failure()
        })?;
    plan.id = Some(id);

    let response = CreateTripResponse {
        map_data: map_data(&plan.route),
        summary: summary(&plan),
        route: trip_plan_body(&plan),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /routes/:id
pub async fn get_trip(
    State(state): State<Arc<AppState>>,
    Path(route_id): Path<i64>,
) -> Result<Json<TripPlanBody>, ApiError> {
    let plan = trip_plans::load_trip_plan(state.db().pool(), route_id)
        .await
        .map_err(|err| {
            tracing::error!("failed to load trip plan {route_id}: {err:#}");
            persistence_failure()
        })?;

    match plan {
        Some(plan) => Ok(Json(trip_plan_body(&plan))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Route not found" })),
        )),
    }
}

/// GET /routes — most recent plans first.
pub async fn list_trips(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTripsQuery>,
) -> Result<Json<TripListResponse>, ApiError> {
    let limit = query.limit.unwrap_or(20);
    let plans = trip_plans::load_recent_trip_plans(state.db().pool(), limit)
        .await
        .map_err(|err| {
            tracing::error!("failed to list trip plans: {err:#}");
            persistence_failure()
        })?;

    let results: Vec<TripPlanBody> = plans.iter().map(trip_plan_body).collect();
    Ok(Json(TripListResponse {
        count: results.len(),
        results,
    }))
}

// === Helpers ===

fn validate_request(req: &TripRequest) -> Result<(), ApiError> {
    let bad_request = |message: String| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message })),
        )
    };

    let start = req.start_location.trim();
    let end = req.end_location.trim();
    if start.is_empty() || end.is_empty() {
        return Err(bad_request("start and end locations are required".to_string()));
    }
    if start.eq_ignore_ascii_case(end) {
        return Err(bad_request(
            "start and end locations must be different".to_string(),
        ));
    }
    if !(1.0..=100.0).contains(&req.fuel_efficiency_mpg) {
        return Err(bad_request(format!(
            "fuel_efficiency_mpg must be between 1 and 100, got {}",
            req.fuel_efficiency_mpg
        )));
    }
    if !(50.0..=1000.0).contains(&req.tank_range_miles) {
        return Err(bad_request(format!(
            "tank_range_miles must be between 50 and 1000, got {}",
            req.tank_range_miles
        )));
    }
    Ok(())
}

fn routing_error(err: RoutingError) -> ApiError {
    let status = match err {
        RoutingError::LocationNotFound(_) | RoutingError::OutsideServiceArea(_) => {
            StatusCode::BAD_REQUEST
        }
        RoutingError::Unavailable(_) | RoutingError::BadResponse(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

fn plan_error(err: PlanError) -> ApiError {
    let status = match err {
        // Assembly invariants only break on internal bugs.
        PlanError::InconsistentStops(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

fn persistence_failure() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "persistence failure" })),
    )
}

fn endpoint_label(route: &RouteGeometry, start: bool) -> String {
    let endpoint = if start { &route.start } else { &route.end };
    endpoint
        .display_name
        .clone()
        .unwrap_or_else(|| format!("{}, {}", endpoint.point.lat, endpoint.point.lon))
}

fn trip_plan_body(plan: &TripPlan) -> TripPlanBody {
    TripPlanBody {
        id: plan.id,
        start_location: endpoint_label(&plan.route, true),
        end_location: endpoint_label(&plan.route, false),
        total_distance_miles: plan.route.total_distance_miles,
        total_fuel_cost: plan.totals.total_fuel_cost,
        total_gallons_needed: plan.totals.total_gallons_needed,
        fuel_efficiency_mpg: plan.vehicle.fuel_efficiency_mpg,
        tank_range_miles: plan.vehicle.tank_range_miles,
        fuel_stops: plan
            .stops
            .iter()
            .map(|stop| FuelStopBody {
                stop_order: stop.stop_order,
                fuel_station: StationBody {
                    id: stop.station.id,
                    name: stop.station.name.clone(),
                    address: stop.station.address.clone(),
                    city: stop.station.city.clone(),
                    state: stop.station.state.clone(),
                    retail_price: stop.station.retail_price_per_gallon,
                    latitude: stop.station.position.map(|p| p.lat),
                    longitude: stop.station.position.map(|p| p.lon),
                },
                distance_from_start_miles: stop.distance_from_start_miles,
                gallons_to_fill: stop.gallons_to_fill,
                cost_at_stop: stop.cost_at_stop,
                latitude: stop.position.lat,
                longitude: stop.position.lon,
            })
            .collect(),
        created_at: plan.created_at,
    }
}

fn map_data(route: &RouteGeometry) -> MapData {
    MapData {
        geometry: route
            .polyline
            .iter()
            .map(|point| [point.lon, point.lat])
            .collect(),
        bbox: route.bbox,
        start_coords: Coords {
            lat: route.start.point.lat,
            lon: route.start.point.lon,
        },
        end_coords: Coords {
            lat: route.end.point.lat,
            lon: route.end.point.lon,
        },
    }
}

fn summary(plan: &TripPlan) -> TripSummary {
    TripSummary {
        num_stops: plan.stops.len(),
        avg_price_per_gallon: round2(plan.totals.average_price_per_gallon),
        total_distance_miles: plan.route.total_distance_miles,
        total_fuel_cost: plan.totals.total_fuel_cost,
        total_gallons_needed: plan.totals.total_gallons_needed,
        estimated_duration_hours: round2(plan.route.duration_seconds / 3600.0),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
