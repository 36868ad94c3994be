//! Fuel-stop placement.
//!
//! Turns (route, vehicle, strategy) into an ordered list of fuel
//! stops. Stop positions are projected onto the route polyline; which
//! station each stop gets depends on the selected strategy.

use crate::catalog::FuelStationCatalog;
use crate::error::PlanError;
use crate::geo::{self, GeoPoint};
use crate::models::{FuelStation, FuelStop, RouteGeometry, StopStrategy, VehicleProfile};
use crate::regions;

/// Default search radius for the radius-search strategy, in miles.
pub const DEFAULT_SEARCH_RADIUS_MILES: f64 = 50.0;

/// Plans refueling stops along a route.
#[derive(Debug, Clone, Copy)]
pub struct StopPlacementPlanner {
    search_radius_miles: f64,
}

impl Default for StopPlacementPlanner {
    fn default() -> Self {
        Self {
            search_radius_miles: DEFAULT_SEARCH_RADIUS_MILES,
        }
    }
}

impl StopPlacementPlanner {
    pub fn new(search_radius_miles: f64) -> Self {
        Self {
            search_radius_miles,
        }
    }

    /// Produce the ordered fuel stop list for one trip.
    ///
    /// Planning is synchronous and side-effect-free: the catalog is a
    /// read-only snapshot, so concurrent calls need no coordination.
    pub fn plan(
        &self,
        route: &RouteGeometry,
        vehicle: &VehicleProfile,
        strategy: StopStrategy,
        catalog: &dyn FuelStationCatalog,
    ) -> Result<Vec<FuelStop>, PlanError> {
        vehicle.validate()?;
        route.validate()?;

        let num_stops = (route.total_distance_miles / vehicle.tank_range_miles) as u32;
        if num_stops == 0 {
            return Ok(Vec::new());
        }

        match strategy {
            StopStrategy::RadiusSearch => self.plan_radius(route, vehicle, num_stops, catalog),
            StopStrategy::RegionFallback => plan_region(route, vehicle, num_stops, catalog),
        }
    }

    /// Radius search: for each projected stop, the first station in
    /// price order within the search radius. Price order makes the
    /// first hit the cheapest feasible station; equal prices fall back
    /// to the catalog's stable id order.
    fn plan_radius(
        &self,
        route: &RouteGeometry,
        vehicle: &VehicleProfile,
        num_stops: u32,
        catalog: &dyn FuelStationCatalog,
    ) -> Result<Vec<FuelStop>, PlanError> {
        let candidates = catalog.geocoded_by_price();
        let mut stops = Vec::with_capacity(num_stops as usize);

        for k in 1..=num_stops {
            let (target_distance, position) = project_stop(route, vehicle, k);

            let mut selected = None;
            for station in &candidates {
                // Query contract guarantees a coordinate; skip rather
                // than trust it blindly.
                let Some(station_pos) = station.position else {
                    continue;
                };
                if geo::distance_miles(&position, &station_pos)? <= self.search_radius_miles {
                    selected = Some(station.clone());
                    break;
                }
            }

            match selected {
                Some(station) => {
                    stops.push(build_stop(k, station, target_distance, position, vehicle));
                }
                // Documented policy: an unreachable stop is omitted
                // from the result, not an error. The index gap stays
                // visible in stop_order.
                None => continue,
            }
        }

        Ok(stops)
    }
}

/// Region fallback: price-ordered stations from the start/end regions
/// and their neighbors, assigned to stops by cyclic rotation. Falls
/// back to the whole catalog when the region set has no stations.
///
/// No proximity check is made; the recorded stop position remains the
/// route projection even when the assigned station is elsewhere.
fn plan_region(
    route: &RouteGeometry,
    vehicle: &VehicleProfile,
    num_stops: u32,
    catalog: &dyn FuelStationCatalog,
) -> Result<Vec<FuelStop>, PlanError> {
    let region_set =
        regions::candidate_regions(route.start.region.as_deref(), route.end.region.as_deref());

    let mut candidates = catalog.in_regions_by_price(&region_set);
    if candidates.is_empty() {
        candidates = catalog.all_by_price();
    }
    if candidates.is_empty() {
        return Err(PlanError::NoStationsAvailable);
    }

    let mut stops = Vec::with_capacity(num_stops as usize);
    for k in 1..=num_stops {
        let (target_distance, position) = project_stop(route, vehicle, k);
        let station = candidates[(k as usize - 1) % candidates.len()].clone();
        stops.push(build_stop(k, station, target_distance, position, vehicle));
    }

    Ok(stops)
}

/// Project stop `k` onto the polyline.
///
/// Piecewise approximation: the polyline index is scaled from trip
/// progress, so accuracy tracks the granularity of the supplied
/// points.
fn project_stop(route: &RouteGeometry, vehicle: &VehicleProfile, k: u32) -> (f64, GeoPoint) {
    let target_distance = f64::from(k) * vehicle.tank_range_miles;
    let progress = target_distance / route.total_distance_miles;
    let index = ((progress * route.polyline.len() as f64) as usize).min(route.polyline.len() - 1);
    (target_distance, route.polyline[index])
}

fn build_stop(
    k: u32,
    station: FuelStation,
    target_distance: f64,
    position: GeoPoint,
    vehicle: &VehicleProfile,
) -> FuelStop {
    let gallons_to_fill = vehicle.gallons_per_fill();
    let cost_at_stop = gallons_to_fill * station.retail_price_per_gallon;
    FuelStop {
        stop_order: k,
        station,
        distance_from_start_miles: target_distance,
        gallons_to_fill,
        cost_at_stop,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::models::RouteEndpoint;

    fn straight_route(total_miles: f64, points: usize) -> RouteGeometry {
        // West-to-east polyline; positions only matter relative to the
        // station fixtures below.
        let polyline: Vec<GeoPoint> = (0..points)
            .map(|i| GeoPoint {
                lat: 35.0,
                lon: -100.0 + 10.0 * i as f64 / (points - 1) as f64,
            })
            .collect();
        let start = polyline[0];
        let end = polyline[points - 1];
        RouteGeometry {
            polyline,
            total_distance_miles: total_miles,
            duration_seconds: total_miles * 60.0,
            bbox: [-100.0, 35.0, -90.0, 35.0],
            start: RouteEndpoint {
                point: start,
                region: Some("TX".to_string()),
                display_name: Some("Start, TX".to_string()),
            },
            end: RouteEndpoint {
                point: end,
                region: Some("OK".to_string()),
                display_name: Some("End, OK".to_string()),
            },
        }
    }

    fn vehicle(mpg: f64, tank: f64) -> VehicleProfile {
        VehicleProfile {
            fuel_efficiency_mpg: mpg,
            tank_range_miles: tank,
        }
    }

    fn station(id: i64, state: &str, price: f64, pos: Option<GeoPoint>) -> FuelStation {
        FuelStation {
            id,
            opis_id: 1000 + id,
            name: format!("Station {id}"),
            address: "1 Main St".to_string(),
            city: "Somewhere".to_string(),
            state: state.to_string(),
            rack_id: 7,
            retail_price_per_gallon: price,
            position: pos,
        }
    }

    /// Station roughly `miles` east of the given point.
    fn offset_east(point: GeoPoint, miles: f64) -> GeoPoint {
        let miles_per_deg_lon = 69.17 * point.lat.to_radians().cos();
        GeoPoint {
            lat: point.lat,
            lon: point.lon + miles / miles_per_deg_lon,
        }
    }

    #[test]
    fn short_trip_needs_no_stops() {
        let route = straight_route(400.0, 10);
        let catalog = MemoryCatalog::new(vec![station(1, "TX", 3.0, Some(route.polyline[5]))]);
        let planner = StopPlacementPlanner::default();

        let stops = planner
            .plan(&route, &vehicle(10.0, 500.0), StopStrategy::RadiusSearch, &catalog)
            .unwrap();
        assert!(stops.is_empty());
    }

    #[test]
    fn twelve_hundred_miles_on_a_500_mile_tank_is_two_stops() {
        let route = straight_route(1200.0, 100);
        let v = vehicle(10.0, 500.0);
        // One cheap station near every polyline point.
        let stations: Vec<FuelStation> = route
            .polyline
            .iter()
            .enumerate()
            .map(|(i, p)| station(i as i64 + 1, "TX", 3.0, Some(*p)))
            .collect();
        let catalog = MemoryCatalog::new(stations);

        let stops = StopPlacementPlanner::default()
            .plan(&route, &v, StopStrategy::RadiusSearch, &catalog)
            .unwrap();

        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].stop_order, 1);
        assert_eq!(stops[1].stop_order, 2);
        assert_eq!(stops[0].distance_from_start_miles, 500.0);
        assert_eq!(stops[1].distance_from_start_miles, 1000.0);
        for stop in &stops {
            assert_eq!(stop.gallons_to_fill, 50.0);
            assert_eq!(stop.cost_at_stop, 150.0);
        }
    }

    #[test]
    fn exact_multiple_projects_last_stop_to_endpoint() {
        let route = straight_route(1000.0, 50);
        let v = vehicle(10.0, 500.0);
        let stations: Vec<FuelStation> = route
            .polyline
            .iter()
            .enumerate()
            .map(|(i, p)| station(i as i64 + 1, "TX", 3.0, Some(*p)))
            .collect();
        let catalog = MemoryCatalog::new(stations);

        let stops = StopPlacementPlanner::default()
            .plan(&route, &v, StopStrategy::RadiusSearch, &catalog)
            .unwrap();

        assert_eq!(stops.len(), 2);
        let last = stops.last().unwrap();
        assert_eq!(last.position, *route.polyline.last().unwrap());
    }

    #[test]
    fn radius_search_prefers_cheapest_within_radius() {
        // 999 miles on a 500-mile tank: exactly one stop.
        let route = straight_route(999.0, 2);
        let v = vehicle(10.0, 500.0);
        // Stop 1 projects to the route end (2-point polyline).
        let target = route.polyline[1];

        let near_pricier = station(1, "TX", 3.00, Some(offset_east(target, 10.0)));
        let far_cheaper = station(2, "TX", 2.50, Some(offset_east(target, 60.0)));
        let catalog = MemoryCatalog::new(vec![near_pricier, far_cheaper]);

        let stops = StopPlacementPlanner::default()
            .plan(&route, &v, StopStrategy::RadiusSearch, &catalog)
            .unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].station.id, 1);
        assert_eq!(stops[0].cost_at_stop, 150.0);
    }

    #[test]
    fn unreachable_stop_is_omitted_without_error() {
        let route = straight_route(1000.0, 100);
        let v = vehicle(10.0, 500.0);
        // Only one station, near the first stop's projection; the
        // second stop has nothing within radius.
        let first_target = route.polyline[(0.5 * 100.0) as usize];
        let catalog = MemoryCatalog::new(vec![station(1, "TX", 3.0, Some(first_target))]);

        let stops = StopPlacementPlanner::default()
            .plan(&route, &v, StopStrategy::RadiusSearch, &catalog)
            .unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].stop_order, 1);
    }

    #[test]
    fn radius_search_ignores_ungecoded_stations() {
        let route = straight_route(999.0, 2);
        let v = vehicle(10.0, 500.0);
        let catalog = MemoryCatalog::new(vec![station(1, "TX", 1.0, None)]);

        let stops = StopPlacementPlanner::default()
            .plan(&route, &v, StopStrategy::RadiusSearch, &catalog)
            .unwrap();
        assert!(stops.is_empty());
    }

    #[test]
    fn region_fallback_rotates_candidates_cyclically() {
        let route = straight_route(2200.0, 100);
        let v = vehicle(10.0, 500.0); // 4 stops
        let catalog = MemoryCatalog::new(vec![
            station(1, "TX", 2.00, None),
            station(2, "OK", 2.50, None),
            station(3, "NM", 3.00, None),
        ]);

        let stops = StopPlacementPlanner::default()
            .plan(&route, &v, StopStrategy::RegionFallback, &catalog)
            .unwrap();

        assert_eq!(stops.len(), 4);
        let assigned: Vec<i64> = stops.iter().map(|s| s.station.id).collect();
        assert_eq!(assigned, vec![1, 2, 3, 1]);
    }

    #[test]
    fn region_fallback_uses_whole_catalog_when_regions_empty() {
        let route = straight_route(1000.0, 10);
        let v = vehicle(10.0, 500.0);
        // Station far outside the TX/OK neighborhood.
        let catalog = MemoryCatalog::new(vec![station(1, "ME", 2.75, None)]);

        let stops = StopPlacementPlanner::default()
            .plan(&route, &v, StopStrategy::RegionFallback, &catalog)
            .unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].station.state, "ME");
    }

    #[test]
    fn region_fallback_fails_on_empty_catalog() {
        let route = straight_route(1000.0, 10);
        let v = vehicle(10.0, 500.0);
        let catalog = MemoryCatalog::new(Vec::new());

        let err = StopPlacementPlanner::default()
            .plan(&route, &v, StopStrategy::RegionFallback, &catalog)
            .unwrap_err();
        assert_eq!(err, PlanError::NoStationsAvailable);
    }

    #[test]
    fn invalid_vehicle_profile_is_rejected() {
        let route = straight_route(1000.0, 10);
        let catalog = MemoryCatalog::new(Vec::new());
        let planner = StopPlacementPlanner::default();

        assert!(matches!(
            planner.plan(&route, &vehicle(0.0, 500.0), StopStrategy::RadiusSearch, &catalog),
            Err(PlanError::InvalidVehicleProfile(_))
        ));
        assert!(matches!(
            planner.plan(&route, &vehicle(10.0, -1.0), StopStrategy::RadiusSearch, &catalog),
            Err(PlanError::InvalidVehicleProfile(_))
        ));
    }

    #[test]
    fn degenerate_route_is_rejected() {
        let v = vehicle(10.0, 500.0);
        let catalog = MemoryCatalog::new(Vec::new());
        let planner = StopPlacementPlanner::default();

        let mut route = straight_route(1000.0, 10);
        route.polyline.truncate(1);
        assert!(matches!(
            planner.plan(&route, &v, StopStrategy::RadiusSearch, &catalog),
            Err(PlanError::InvalidRouteGeometry(_))
        ));

        let mut route = straight_route(1000.0, 10);
        route.total_distance_miles = 0.0;
        assert!(matches!(
            planner.plan(&route, &v, StopStrategy::RadiusSearch, &catalog),
            Err(PlanError::InvalidRouteGeometry(_))
        ));
    }
}
