//! Fuel station catalog persistence.

use anyhow::Result;
use chrono::Utc;
use fuelway_core::{FuelStation, GeoPoint};
use sqlx::SqlitePool;

/// A station record prior to insertion (no assigned id).
#[derive(Debug, Clone)]
pub struct NewStation {
    pub opis_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub rack_id: i64,
    pub retail_price_per_gallon: f64,
    pub position: Option<GeoPoint>,
}

/// Insert a batch of station records in one transaction.
///
/// No deduplication: the importer owns that responsibility, the
/// catalog is assumed de-duplicated by the time the planner reads it.
pub async fn insert_stations(pool: &SqlitePool, stations: &[NewStation]) -> Result<u64> {
    let now = Utc::now().to_rfc3339();
    let mut tx = pool.begin().await?;
    for station in stations {
        sqlx::query(
            r#"
            INSERT INTO fuel_stations (
                opis_id, name, address, city, state, rack_id,
                retail_price, latitude, longitude, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            "#,
        )
        .bind(station.opis_id)
        .bind(&station.name)
        .bind(&station.address)
        .bind(&station.city)
        .bind(&station.state)
        .bind(station.rack_id)
        .bind(station.retail_price_per_gallon)
        .bind(station.position.map(|p| p.lat))
        .bind(station.position.map(|p| p.lon))
        .bind(&now)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(stations.len() as u64)
}

/// Load the entire catalog.
pub async fn load_all_stations(pool: &SqlitePool) -> Result<Vec<FuelStation>> {
    let rows = sqlx::query_as::<_, StationRow>(
        "SELECT id, opis_id, name, address, city, state, rack_id, retail_price, latitude, longitude FROM fuel_stations",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(FuelStation::from).collect())
}

#[derive(sqlx::FromRow)]
struct StationRow {
    id: i64,
    opis_id: i64,
    name: String,
    address: String,
    city: String,
    state: String,
    rack_id: i64,
    retail_price: f64,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl From<StationRow> for FuelStation {
    fn from(row: StationRow) -> Self {
        let position = match (row.latitude, row.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
            _ => None,
        };
        FuelStation {
            id: row.id,
            opis_id: row.opis_id,
            name: row.name,
            address: row.address,
            city: row.city,
            state: row.state,
            rack_id: row.rack_id,
            retail_price_per_gallon: row.retail_price,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::init_database;

    #[tokio::test]
    async fn insert_and_load_round_trip() {
        let db = init_database(":memory:", 1).await.unwrap();

        let stations = vec![
            NewStation {
                opis_id: 101,
                name: "Big Rig Fuel".to_string(),
                address: "I-40 Exit 5".to_string(),
                city: "Amarillo".to_string(),
                state: "TX".to_string(),
                rack_id: 3,
                retail_price_per_gallon: 2.95,
                position: Some(GeoPoint { lat: 35.2, lon: -101.8 }),
            },
            NewStation {
                opis_id: 102,
                name: "Prairie Stop".to_string(),
                address: "US-54".to_string(),
                city: "Liberal".to_string(),
                state: "KS".to_string(),
                rack_id: 4,
                retail_price_per_gallon: 2.80,
                position: None,
            },
        ];

        let inserted = insert_stations(db.pool(), &stations).await.unwrap();
        assert_eq!(inserted, 2);

        let loaded = load_all_stations(db.pool()).await.unwrap();
        assert_eq!(loaded.len(), 2);

        let geocoded = loaded.iter().find(|s| s.opis_id == 101).unwrap();
        assert!(geocoded.position.is_some());
        assert_eq!(geocoded.state, "TX");

        let ungeocoded = loaded.iter().find(|s| s.opis_id == 102).unwrap();
        assert!(ungeocoded.position.is_none());
    }
}
