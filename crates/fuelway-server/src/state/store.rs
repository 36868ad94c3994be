//! Shared application state.
//!
//! The station catalog lives in a DashMap loaded from SQLite at
//! startup, so planning requests read it concurrently without
//! locking. Each request takes a sorted snapshot; the snapshot is
//! what keeps station selection deterministic regardless of how
//! requests interleave.

use crate::config::Config;
use crate::persistence::{stations, Database};
use anyhow::Result;
use dashmap::DashMap;
use fuelway_core::{FuelStation, MemoryCatalog};
use fuelway_ors::RouteProvider;
use std::sync::Arc;
use tracing::info;

pub struct AppState {
    config: Config,
    db: Database,
    stations: DashMap<i64, FuelStation>,
    routing: Arc<dyn RouteProvider>,
}

impl AppState {
    pub fn new(db: Database, config: Config, routing: Arc<dyn RouteProvider>) -> Self {
        Self {
            config,
            db,
            stations: DashMap::new(),
            routing,
        }
    }

    /// Load the station catalog from the database.
    pub async fn load_from_database(&self) -> Result<()> {
        let loaded = stations::load_all_stations(self.db.pool()).await?;
        self.stations.clear();
        for station in loaded {
            self.stations.insert(station.id, station);
        }
        info!("Loaded {} fuel stations", self.stations.len());
        Ok(())
    }

    /// Price-sorted, read-only catalog snapshot for one request.
    pub fn catalog_snapshot(&self) -> MemoryCatalog {
        MemoryCatalog::new(
            self.stations
                .iter()
                .map(|entry| entry.value().clone())
                .collect(),
        )
    }

    pub fn all_stations(&self) -> Vec<FuelStation> {
        self.stations
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn routing(&self) -> &dyn RouteProvider {
        self.routing.as_ref()
    }
}
