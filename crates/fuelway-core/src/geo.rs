//! Geodesic distance math.

use crate::error::PlanError;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// An immutable coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Build a point, rejecting out-of-range coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, PlanError> {
        let point = Self { lat, lon };
        point.validate()?;
        Ok(point)
    }

    /// Check that the coordinates are finite and in range.
    pub fn validate(&self) -> Result<(), PlanError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(PlanError::InvalidCoordinate {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

/// Great-circle distance between two points in miles (Haversine formula).
///
/// Rejects out-of-range coordinates instead of propagating NaN into
/// downstream comparisons.
pub fn distance_miles(a: &GeoPoint, b: &GeoPoint) -> Result<f64, PlanError> {
    a.validate()?;
    b.validate()?;

    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    Ok(2.0 * EARTH_RADIUS_MILES * h.sqrt().atan2((1.0 - h).sqrt()))
}
