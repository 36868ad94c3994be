//! Read-only fuel station catalog interface.

use crate::models::FuelStation;
use std::collections::BTreeSet;

/// Price-ordered, read-only query surface over persisted stations.
///
/// All queries return stations cheapest-first with a stable tie-break
/// (equal prices ordered by station id), and an empty vector rather
/// than an error when nothing matches.
pub trait FuelStationCatalog {
    /// Stations that have a known coordinate, cheapest first.
    fn geocoded_by_price(&self) -> Vec<FuelStation>;

    /// Stations whose region code is in `regions`, cheapest first.
    fn in_regions_by_price(&self, regions: &BTreeSet<String>) -> Vec<FuelStation>;

    /// The entire catalog, cheapest first.
    fn all_by_price(&self) -> Vec<FuelStation>;
}

/// In-memory catalog snapshot. Sorted once at construction so every
/// query shares the same deterministic order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    stations: Vec<FuelStation>,
}

impl MemoryCatalog {
    pub fn new(mut stations: Vec<FuelStation>) -> Self {
        stations.sort_by(|a, b| {
            a.retail_price_per_gallon
                .total_cmp(&b.retail_price_per_gallon)
                .then(a.id.cmp(&b.id))
        });
        Self { stations }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FuelStationCatalog for MemoryCatalog {
    fn geocoded_by_price(&self) -> Vec<FuelStation> {
        self.stations
            .iter()
            .filter(|station| station.position.is_some())
            .cloned()
            .collect()
    }

    fn in_regions_by_price(&self, regions: &BTreeSet<String>) -> Vec<FuelStation> {
        self.stations
            .iter()
            .filter(|station| {
                regions
                    .iter()
                    .any(|code| code.eq_ignore_ascii_case(&station.state))
            })
            .cloned()
            .collect()
    }

    fn all_by_price(&self) -> Vec<FuelStation> {
        self.stations.clone()
    }
}
