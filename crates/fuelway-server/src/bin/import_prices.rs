//! One-shot importer for OPIS retail price CSV exports.
//!
//! Loads the price sheet into the fuel_stations table. Rows land
//! without coordinates; geocoding is a separate enrichment pass,
//! and the planner already tolerates ungeocoded stations.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fuelway_server::config::Config;
use fuelway_server::persistence::{self, stations::NewStation};

#[derive(Parser, Debug)]
#[command(about = "Import fuel station prices from an OPIS CSV export")]
struct Args {
    /// Path to the CSV file.
    csv_path: PathBuf,

    /// SQLite database path. Defaults to the server's configured path.
    #[arg(long)]
    database: Option<String>,
}

/// One CSV row, named after the OPIS export headers.
#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "OPIS Truckstop ID")]
    opis_id: i64,
    #[serde(rename = "Truckstop Name")]
    name: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Rack ID")]
    rack_id: i64,
    #[serde(rename = "Retail Price")]
    retail_price: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let db_path = args.database.unwrap_or(config.database_path);

    let mut reader = csv::Reader::from_path(&args.csv_path)
        .with_context(|| format!("failed to open {}", args.csv_path.display()))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: PriceRow = row.context("malformed CSV row")?;
        records.push(NewStation {
            opis_id: row.opis_id,
            name: row.name.trim().to_string(),
            address: row.address.trim().to_string(),
            city: row.city.trim().to_string(),
            state: row.state.trim().to_uppercase(),
            rack_id: row.rack_id,
            retail_price_per_gallon: row.retail_price,
            position: None,
        });
    }

    if records.is_empty() {
        anyhow::bail!("no rows found in {}", args.csv_path.display());
    }

    let db = persistence::init_database(&db_path, config.database_max_connections).await?;
    let inserted = persistence::stations::insert_stations(db.pool(), &records).await?;

    tracing::info!("Imported {} fuel stations into {}", inserted, db_path);
    println!("Imported {} fuel stations", inserted);

    Ok(())
}
