//! REST API routes.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::{stations, trips};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/routes", post(trips::create_trip).get(trips::list_trips))
        .route("/routes/:id", get(trips::get_trip))
        .route("/fuel-stations", get(stations::list_fuel_stations))
}
