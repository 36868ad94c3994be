//! Trip plan assembly.

use crate::aggregate;
use crate::error::PlanError;
use crate::models::{FuelStop, RouteGeometry, TripPlan, VehicleProfile};
use chrono::Utc;

/// Package route, vehicle, and stops into an immutable [`TripPlan`].
///
/// Validates the stop ordering contract before sealing the plan: stop
/// orders strictly increase within `1..=num_stops` and distances never
/// decrease. Gaps in the order sequence are legal (the radius search
/// omits unreachable stops); the list just shrinks.
pub fn assemble(
    route: RouteGeometry,
    vehicle: VehicleProfile,
    stops: Vec<FuelStop>,
) -> Result<TripPlan, PlanError> {
    route.validate()?;
    vehicle.validate()?;
    validate_stops(&route, &vehicle, &stops)?;

    let totals = aggregate::aggregate(&route, &vehicle, &stops);
    Ok(TripPlan {
        id: None,
        route,
        vehicle,
        stops,
        totals,
        created_at: Utc::now(),
    })
}

fn validate_stops(
    route: &RouteGeometry,
    vehicle: &VehicleProfile,
    stops: &[FuelStop],
) -> Result<(), PlanError> {
    let num_stops = (route.total_distance_miles / vehicle.tank_range_miles) as u32;

    let mut previous_order = 0u32;
    let mut previous_distance = 0.0f64;
    for stop in stops {
        if stop.stop_order == 0 || stop.stop_order > num_stops {
            return Err(PlanError::InconsistentStops(format!(
                "stop order {} outside 1..={num_stops}",
                stop.stop_order
            )));
        }
        if stop.stop_order <= previous_order {
            return Err(PlanError::InconsistentStops(format!(
                "stop order {} does not increase after {previous_order}",
                stop.stop_order
            )));
        }
        if stop.distance_from_start_miles < previous_distance
            || stop.distance_from_start_miles > route.total_distance_miles
        {
            return Err(PlanError::InconsistentStops(format!(
                "stop {} at mile {} outside route bounds",
                stop.stop_order, stop.distance_from_start_miles
            )));
        }
        previous_order = stop.stop_order;
        previous_distance = stop.distance_from_start_miles;
    }

    Ok(())
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
                region: Some("TX".to_string()),
                display_name: None,
            },
            end: RouteEndpoint {
                point: b,
                region: Some("TX".to_string()),
                display_name: None,
            },
        }
    }

    fn vehicle() -> VehicleProfile {
        VehicleProfile {
            fuel_efficiency_mpg: 10.0,
            tank_range_miles: 500.0,
        }
    }

    fn stop(order: u32, miles: f64) -> FuelStop {
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
                retail_price_per_gallon: 3.0,
                position: None,
            },
            distance_from_start_miles: miles,
            gallons_to_fill: 50.0,
            cost_at_stop: 150.0,
            position: GeoPoint { lat: 35.0, lon: -95.0 },
        }
    }

    #[test]
    fn assembles_plan_with_totals() {
        let plan = assemble(route(1200.0), vehicle(), vec![stop(1, 500.0), stop(2, 1000.0)])
            .unwrap();

        assert!(plan.id.is_none());
        assert_eq!(plan.stops.len(), 2);
        assert_eq!(plan.totals.total_fuel_cost, 300.0);
        assert_eq!(plan.totals.total_gallons_needed, 120.0);
    }

    #[test]
    fn accepts_gapped_stop_orders() {
        // Stop 1 was unplaceable; the list shrank but stays ordered.
        let plan = assemble(route(1200.0), vehicle(), vec![stop(2, 1000.0)]).unwrap();
        assert_eq!(plan.stops[0].stop_order, 2);
    }

    #[test]
    fn rejects_out_of_order_stops() {
        let err = assemble(route(1200.0), vehicle(), vec![stop(2, 1000.0), stop(1, 500.0)])
            .unwrap_err();
        assert!(matches!(err, PlanError::InconsistentStops(_)));
    }

    #[test]
    fn rejects_stop_order_beyond_required_count() {
        let err = assemble(route(1200.0), vehicle(), vec![stop(3, 1100.0)]).unwrap_err();
        assert!(matches!(err, PlanError::InconsistentStops(_)));
    }

    #[test]
    fn rejects_stop_past_route_end() {
        let err = assemble(route(1200.0), vehicle(), vec![stop(2, 1300.0)]).unwrap_err();
        assert!(matches!(err, PlanError::InconsistentStops(_)));
    }
}
