//! OpenRouteService HTTP client.

use crate::error::RoutingError;
use futures::future::BoxFuture;
use futures::FutureExt;
use fuelway_core::{GeoPoint, RouteEndpoint, RouteGeometry};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const METERS_PER_MILE: f64 = 1609.344;

/// Country keywords for the secondary (best-effort) non-domestic
/// check. The structured country code is authoritative; this only
/// catches labels the geocoder returns without one, and can
/// misclassify ambiguous place names.
const NON_US_KEYWORDS: &[&str] = &["canada", "mexico", "united kingdom", "france", "germany"];

/// A geocoded location.
#[derive(Debug, Clone)]
pub struct ResolvedLocation {
    pub point: GeoPoint,
    /// Two-letter state/territory code, when the geocoder provides one.
    pub region: Option<String>,
    /// Structured country code (e.g. "USA").
    pub country: Option<String>,
    pub display_name: String,
}

impl ResolvedLocation {
    /// Structured country code wins; keyword matching on the label is
    /// only consulted when the geocoder returned no code.
    pub fn is_domestic(&self) -> bool {
        if let Some(country) = self.country.as_deref() {
            return country.eq_ignore_ascii_case("US") || country.eq_ignore_ascii_case("USA");
        }
        let label = self.display_name.to_ascii_lowercase();
        !NON_US_KEYWORDS.iter().any(|keyword| label.contains(keyword))
    }
}

/// Trait seam for the routing collaborator, so the planner pipeline
/// can run against a fixture-backed provider in tests.
pub trait RouteProvider: Send + Sync {
    fn calculate_route<'a>(
        &'a self,
        start: &'a str,
        end: &'a str,
    ) -> BoxFuture<'a, Result<RouteGeometry, RoutingError>>;
}

/// HTTP client for the OpenRouteService geocoding and directions APIs.
///
/// Borrowed by the planner for the duration of one call; it owns only
/// its HTTP connection pool, no request-scoped state.
pub struct RoutingClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RoutingClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RoutingError::Unavailable(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Geocode a free-text location.
    pub async fn resolve_location(&self, text: &str) -> Result<ResolvedLocation, RoutingError> {
        debug!("Geocoding location: {}", text);
        let url = format!("{}/geocode/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("text", text), ("size", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RoutingError::Unavailable(format!(
                "geocoder returned {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response.json().await?;
        let feature = body
            .features
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::LocationNotFound(text.to_string()))?;

        parse_geocode_feature(feature, text)
    }

    /// Calculate a driving route between two free-text locations.
    pub async fn calculate_route(
        &self,
        start_text: &str,
        end_text: &str,
    ) -> Result<RouteGeometry, RoutingError> {
        let start = self.resolve_location(start_text).await?;
        let end = self.resolve_location(end_text).await?;

        for location in [&start, &end] {
            if !location.is_domestic() {
                return Err(RoutingError::OutsideServiceArea(
                    location.display_name.clone(),
                ));
            }
        }

        let url = format!("{}/v2/directions/driving-car/geojson", self.base_url);
        let body = serde_json::json!({
            "coordinates": [
                [start.point.lon, start.point.lat],
                [end.point.lon, end.point.lat],
            ],
            "instructions": false,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RoutingError::Unavailable(format!(
                "directions returned {}",
                response.status()
            )));
        }

        let directions: DirectionsResponse = response.json().await?;
        let route = build_route_geometry(directions, start, end)?;
        debug!(
            "Route {} -> {}: {:.1} miles",
            start_text, end_text, route.total_distance_miles
        );
        Ok(route)
    }
}

impl RouteProvider for RoutingClient {
    fn calculate_route<'a>(
        &'a self,
        start: &'a str,
        end: &'a str,
    ) -> BoxFuture<'a, Result<RouteGeometry, RoutingError>> {
        RoutingClient::calculate_route(self, start, end).boxed()
    }
}

// === Wire types ===

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: PointGeometry,
    #[serde(default)]
    properties: GeocodeProperties,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    coordinates: [f64; 2], // [lon, lat]
}

#[derive(Debug, Default, Deserialize)]
struct GeocodeProperties {
    label: Option<String>,
    country_a: Option<String>,
    region_a: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    bbox: Option<[f64; 4]>,
    #[serde(default)]
    features: Vec<DirectionsFeature>,
}

#[derive(Debug, Deserialize)]
struct DirectionsFeature {
    geometry: LineGeometry,
    properties: DirectionsProperties,
}

#[derive(Debug, Deserialize)]
struct LineGeometry {
    coordinates: Vec<[f64; 2]>, // [lon, lat]
}

#[derive(Debug, Deserialize)]
struct DirectionsProperties {
    summary: DirectionsSummary,
}

#[derive(Debug, Deserialize)]
struct DirectionsSummary {
    /// Meters, despite any units parameter.
    distance: f64,
    /// Seconds.
    duration: f64,
}

fn parse_geocode_feature(
    feature: GeocodeFeature,
    query: &str,
) -> Result<ResolvedLocation, RoutingError> {
    let [lon, lat] = feature.geometry.coordinates;
    let point = GeoPoint::new(lat, lon)
        .map_err(|err| RoutingError::BadResponse(format!("geocoder coordinates: {err}")))?;

    Ok(ResolvedLocation {
        point,
        region: feature.properties.region_a,
        country: feature.properties.country_a,
        display_name: feature
            .properties
            .label
            .unwrap_or_else(|| query.to_string()),
    })
}

fn build_route_geometry(
    directions: DirectionsResponse,
    start: ResolvedLocation,
    end: ResolvedLocation,
) -> Result<RouteGeometry, RoutingError> {
    let bbox = directions.bbox;
    let feature = directions
        .features
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::BadResponse("directions returned no features".to_string()))?;

    let polyline: Vec<GeoPoint> = feature
        .geometry
        .coordinates
        .iter()
        .map(|[lon, lat]| GeoPoint {
            lat: *lat,
            lon: *lon,
        })
        .collect();

    if polyline.len() < 2 {
        return Err(RoutingError::BadResponse(
            "directions polyline has fewer than 2 points".to_string(),
        ));
    }

    let total_distance_miles = feature.properties.summary.distance / METERS_PER_MILE;

    Ok(RouteGeometry {
        bbox: bbox.unwrap_or_else(|| bbox_of(&polyline)),
        total_distance_miles,
        duration_seconds: feature.properties.summary.duration,
        polyline,
        start: RouteEndpoint {
            point: start.point,
            region: start.region,
            display_name: Some(start.display_name),
        },
        end: RouteEndpoint {
            point: end.point,
            region: end.region,
            display_name: Some(end.display_name),
        },
    })
}

fn bbox_of(polyline: &[GeoPoint]) -> [f64; 4] {
    let mut bbox = [f64::MAX, f64::MAX, f64::MIN, f64::MIN];
    for point in polyline {
        bbox[0] = bbox[0].min(point.lon);
        bbox[1] = bbox[1].min(point.lat);
        bbox[2] = bbox[2].max(point.lon);
        bbox[3] = bbox[3].max(point.lat);
    }
    bbox
}
