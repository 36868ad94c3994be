//! Fuel station catalog endpoints.
//!
//! Pass-through query over the in-memory catalog, no planning logic.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::trips::StationBody;
use crate::state::AppState;
use fuelway_core::FuelStation;

#[derive(Debug, Deserialize)]
pub struct StationQuery {
    pub state: Option<String>,
    /// Case-insensitive substring match on name or city.
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub count: usize,
    pub results: Vec<StationBody>,
}

/// GET /fuel-stations
pub async fn list_fuel_stations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StationQuery>,
) -> Json<StationListResponse> {
    let mut stations = state.all_stations();

    if let Some(region) = query.state.as_deref() {
        stations.retain(|station| station.state.eq_ignore_ascii_case(region));
    }
    if let Some(search) = query.search.as_deref() {
        let needle = search.to_ascii_lowercase();
        stations.retain(|station| {
            station.name.to_ascii_lowercase().contains(&needle)
                || station.city.to_ascii_lowercase().contains(&needle)
        });
    }

    sort_stations(&mut stations, query.ordering.as_deref());
    stations.truncate(query.limit.unwrap_or(20));

    let results: Vec<StationBody> = stations
        .into_iter()
        .map(|station| StationBody {
            id: station.id,
            name: station.name,
            address: station.address,
            city: station.city,
            state: station.state,
            retail_price: station.retail_price_per_gallon,
            latitude: station.position.map(|p| p.lat),
            longitude: station.position.map(|p| p.lon),
        })
        .collect();

    Json(StationListResponse {
        count: results.len(),
        results,
    })
}

/// Unrecognized orderings fall back to cheapest-first, the catalog's
/// natural order. Ties break on station id to stay deterministic.
fn sort_stations(stations: &mut [FuelStation], ordering: Option<&str>) {
    match ordering {
        Some("-retail_price") => stations.sort_by(|a, b| {
            b.retail_price_per_gallon
                .total_cmp(&a.retail_price_per_gallon)
                .then(a.id.cmp(&b.id))
        }),
        Some("name") => stations.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
        Some("city") => stations.sort_by(|a, b| a.city.cmp(&b.city).then(a.id.cmp(&b.id))),
        Some("state") => stations.sort_by(|a, b| a.state.cmp(&b.state).then(a.id.cmp(&b.id))),
        _ => stations.sort_by(|a, b| {
            a.retail_price_per_gallon
                .total_cmp(&b.retail_price_per_gallon)
                .then(a.id.cmp(&b.id))
        }),
    }
}
