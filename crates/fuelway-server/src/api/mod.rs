//! API routes for the trip planning server.

pub mod stations;
pub mod trips;
mod routes;

use crate::state::AppState;
use axum::Router;

pub fn routes() -> Router<std::sync::Arc<AppState>> {
    routes::create_router()
}
