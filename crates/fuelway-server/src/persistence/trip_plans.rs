//! Trip plan persistence operations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fuelway_core::{
    FuelStation, FuelStop, GeoPoint, RouteGeometry, TripPlan, TripTotals, VehicleProfile,
};
use sqlx::SqlitePool;

/// Store a trip plan: route header plus all fuel stop rows in one
/// transaction. Any partial failure rolls the whole write back, so a
/// partial plan is never visible.
pub async fn store_trip_plan(pool: &SqlitePool, plan: &TripPlan) -> Result<i64> {
    let geometry_json =
        serde_json::to_string(&plan.route).context("serialize route geometry")?;
    let start_location = endpoint_label(&plan.route, true);
    let end_location = endpoint_label(&plan.route, false);

    let mut tx = pool.begin().await?;

    let route_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO routes (
            start_location, end_location,
            total_distance_miles, total_fuel_cost, total_gallons_needed,
            fuel_efficiency_mpg, tank_range_miles,
            route_geometry, created_at
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        RETURNING id
        "#,
    )
    .bind(&start_location)
    .bind(&end_location)
    .bind(plan.route.total_distance_miles)
    .bind(plan.totals.total_fuel_cost)
    .bind(plan.totals.total_gallons_needed)
    .bind(plan.vehicle.fuel_efficiency_mpg)
    .bind(plan.vehicle.tank_range_miles)
    .bind(&geometry_json)
    .bind(plan.created_at.to_rfc3339())
    .fetch_one(&mut *tx)
    .await?;

    for stop in &plan.stops {
        sqlx::query(
            r#"
            INSERT INTO fuel_stops (
                route_id, station_id, stop_order,
                distance_from_start_miles, gallons_to_fill, cost_at_stop,
                latitude, longitude
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(route_id)
        .bind(stop.station.id)
        .bind(stop.stop_order)
        .bind(stop.distance_from_start_miles)
        .bind(stop.gallons_to_fill)
        .bind(stop.cost_at_stop)
        .bind(stop.position.lat)
        .bind(stop.position.lon)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(route_id)
}

/// Load a single trip plan by id.
pub async fn load_trip_plan(pool: &SqlitePool, route_id: i64) -> Result<Option<TripPlan>> {
    let row = sqlx::query_as::<_, RouteRow>(
        "SELECT id, total_fuel_cost, total_gallons_needed, fuel_efficiency_mpg, tank_range_miles, route_geometry, created_at FROM routes WHERE id = ?1",
    )
    .bind(route_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(hydrate_plan(pool, row).await?)),
        None => Ok(None),
    }
}

/// Load the most recent trip plans, newest first.
pub async fn load_recent_trip_plans(pool: &SqlitePool, limit: u32) -> Result<Vec<TripPlan>> {
    let rows = sqlx::query_as::<_, RouteRow>(
        "SELECT id, total_fuel_cost, total_gallons_needed, fuel_efficiency_mpg, tank_range_miles, route_geometry, created_at FROM routes ORDER BY created_at DESC, id DESC LIMIT ?1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut plans = Vec::with_capacity(rows.len());
    for row in rows {
        plans.push(hydrate_plan(pool, row).await?);
    }
    Ok(plans)
}

fn endpoint_label(route: &RouteGeometry, start: bool) -> String {
    let endpoint = if start { &route.start } else { &route.end };
    endpoint
        .display_name
        .clone()
        .unwrap_or_else(|| format!("{}, {}", endpoint.point.lat, endpoint.point.lon))
}

async fn hydrate_plan(pool: &SqlitePool, row: RouteRow) -> Result<TripPlan> {
    let route: RouteGeometry =
        serde_json::from_str(&row.route_geometry).context("parse stored route geometry")?;

    let stop_rows = sqlx::query_as::<_, StopRow>(
        r#"
        SELECT
            fs.stop_order, fs.distance_from_start_miles, fs.gallons_to_fill,
            fs.cost_at_stop, fs.latitude, fs.longitude,
            st.id AS station_id, st.opis_id, st.name, st.address, st.city,
            st.state, st.rack_id, st.retail_price,
            st.latitude AS station_lat, st.longitude AS station_lon
        FROM fuel_stops fs
        JOIN fuel_stations st ON st.id = fs.station_id
        WHERE fs.route_id = ?1
        ORDER BY fs.stop_order
        "#,
    )
    .bind(row.id)
    .fetch_all(pool)
    .await?;

    let stops: Vec<FuelStop> = stop_rows.into_iter().map(FuelStop::from).collect();

    let vehicle = VehicleProfile {
        fuel_efficiency_mpg: row.fuel_efficiency_mpg,
        tank_range_miles: row.tank_range_miles,
    };
    let totals = TripTotals {
        total_fuel_cost: row.total_fuel_cost,
        total_gallons_needed: row.total_gallons_needed,
        average_price_per_gallon: if row.total_gallons_needed > 0.0 {
            row.total_fuel_cost / row.total_gallons_needed
        } else {
            0.0
        },
    };
    let created_at = DateTime::parse_from_rfc3339(&row.created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());

    Ok(TripPlan {
        id: Some(row.id),
        route,
        vehicle,
        stops,
        totals,
        created_at,
    })
}

#[derive(sqlx::FromRow)]
struct RouteRow {
    id: i64,
    total_fuel_cost: f64,
    total_gallons_needed: f64,
    fuel_efficiency_mpg: f64,
    tank_range_miles: f64,
    route_geometry: String,
    created_at: String,
}

#[derive(sqlx::FromRow)]
struct StopRow {
    stop_order: u32,
    distance_from_start_miles: f64,
    gallons_to_fill: f64,
    cost_at_stop: f64,
    latitude: f64,
    longitude: f64,
    station_id: i64,
    opis_id: i64,
    name: String,
    address: String,
    city: String,
    state: String,
    rack_id: i64,
    retail_price: f64,
    station_lat: Option<f64>,
    station_lon: Option<f64>,
}

impl From<StopRow> for FuelStop {
    fn from(row: StopRow) -> Self {
        let station_position = match (row.station_lat, row.station_lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
            _ => None,
        };
        FuelStop {
            stop_order: row.stop_order,
            station: FuelStation {
                id: row.station_id,
                opis_id: row.opis_id,
                name: row.name,
                address: row.address,
                city: row.city,
                state: row.state,
                rack_id: row.rack_id,
                retail_price_per_gallon: row.retail_price,
                position: station_position,
            },
            distance_from_start_miles: row.distance_from_start_miles,
            gallons_to_fill: row.gallons_to_fill,
            cost_at_stop: row.cost_at_stop,
            position: GeoPoint {
                lat: row.latitude,
                lon: row.longitude,
            },
        }
    }
}
