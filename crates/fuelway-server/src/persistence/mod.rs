//! Persistence layer for the trip planning server.
//!
//! SQLite-backed storage for the fuel station catalog and planned
//! trips. Stations are loaded into the in-memory store at startup;
//! trip plans are written atomically (route header plus all stop rows
//! in one transaction).

pub mod db;
pub mod stations;
pub mod trip_plans;

pub use db::{init_database, Database};
