//! Trip-level cost aggregation.

use crate::models::{FuelStop, RouteGeometry, TripTotals, VehicleProfile};

/// Reduce a stop list and route distance into trip totals.
///
/// `total_gallons_needed` is computed from trip distance, not from the
/// sum of per-stop gallons: it models fuel consumed over the whole
/// trip, independent of how much was purchased at each refill.
pub fn aggregate(route: &RouteGeometry, vehicle: &VehicleProfile, stops: &[FuelStop]) -> TripTotals {
    let total_fuel_cost: f64 = stops.iter().map(|stop| stop.cost_at_stop).sum();
    let total_gallons_needed = route.total_distance_miles / vehicle.fuel_efficiency_mpg;
    let average_price_per_gallon = if total_gallons_needed > 0.0 {
        total_fuel_cost / total_gallons_needed
    } else {
        0.0
    };

    TripTotals {
        total_fuel_cost,
        total_gallons_needed,
        average_price_per_gallon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::models::{FuelStation, RouteEndpoint};

    fn route(total_miles: f64) -> RouteGeometry {
        let a = GeoPoint { lat: 35.0, lon: -100.0 };
        let b = GeoPoint { lat: 35.0, lon: -90.0 };
        RouteGeometry {
            polyline: vec![a, b],
            total_distance_miles: total_miles,
            duration_seconds: 3600.0,
            bbox: [-100.0, 35.0, -90.0, 35.0],
            start: RouteEndpoint {
                point: a,
                region: None,
                display_name: None,
            },
            end: RouteEndpoint {
                point: b,
                region: None,
                display_name: None,
            },
        }
    }

    fn stop(order: u32, cost: f64) -> FuelStop {
        FuelStop {
            stop_order: order,
            station: FuelStation {
                id: order as i64,
                opis_id: 1,
                name: "S".to_string(),
                address: String::new(),
                city: String::new(),
                state: "TX".to_string(),
                rack_id: 1,
                retail_price_per_gallon: cost / 50.0,
                position: None,
            },
            distance_from_start_miles: 500.0 * f64::from(order),
            gallons_to_fill: 50.0,
            cost_at_stop: cost,
            position: GeoPoint { lat: 35.0, lon: -95.0 },
        }
    }

    #[test]
    fn totals_for_a_two_stop_trip() {
        let vehicle = VehicleProfile {
            fuel_efficiency_mpg: 10.0,
            tank_range_miles: 500.0,
        };
        let totals = aggregate(&route(1200.0), &vehicle, &[stop(1, 150.0), stop(2, 125.0)]);

        assert_eq!(totals.total_fuel_cost, 275.0);
        assert_eq!(totals.total_gallons_needed, 120.0);
        assert!((totals.average_price_per_gallon - 275.0 / 120.0).abs() < 1e-12);
    }

    #[test]
    fn empty_stop_list_costs_nothing() {
        let vehicle = VehicleProfile {
            fuel_efficiency_mpg: 10.0,
            tank_range_miles: 500.0,
        };
        let totals = aggregate(&route(400.0), &vehicle, &[]);

        assert_eq!(totals.total_fuel_cost, 0.0);
        assert_eq!(totals.total_gallons_needed, 40.0);
        assert_eq!(totals.average_price_per_gallon, 0.0);
    }
}
