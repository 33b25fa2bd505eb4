//! Response types for the directions and geocoding JSON APIs.
//!
//! Only the fields Wayfare reads are modelled; everything else in the
//! payload is ignored.

use geo::{Coord, Rect};
use serde::Deserialize;

/// Status of a successful lookup.
pub const STATUS_OK: &str = "OK";
/// Status returned when the API key is missing, invalid or not enabled.
pub const STATUS_REQUEST_DENIED: &str = "REQUEST_DENIED";
/// Status reported for an `OK` response that carries no routes.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Top-level status, e.g. `"OK"`, `"ZERO_RESULTS"` or `"REQUEST_DENIED"`.
    pub status: String,
    /// Explanation attached to failing statuses.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<RoutePayload>,
}

/// One candidate route.
#[derive(Debug, Deserialize)]
pub struct RoutePayload {
    /// Simplified geometry of the whole route.
    pub overview_polyline: EncodedPolyline,
    /// Legs between waypoints; a plain A to B request has one.
    #[serde(default)]
    pub legs: Vec<Leg>,
    /// Viewport enclosing the route.
    #[serde(default)]
    pub bounds: Option<Bounds>,
}

/// Encoded polyline wrapper.
#[derive(Debug, Deserialize)]
pub struct EncodedPolyline {
    /// Polyline text.
    pub points: String,
}

/// A leg of a route.
#[derive(Debug, Deserialize)]
pub struct Leg {
    /// Leg length.
    #[serde(default)]
    pub distance: Option<TextValue>,
    /// Leg travel time.
    #[serde(default)]
    pub duration: Option<TextValue>,
}

/// A measured quantity with its display text.
#[derive(Debug, Deserialize)]
pub struct TextValue {
    /// Human-readable rendering, e.g. `"5.2 km"`.
    pub text: String,
}

/// Route viewport corners.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Bounds {
    /// North-east corner.
    pub northeast: LatLng,
    /// South-west corner.
    pub southwest: LatLng,
}

impl Bounds {
    /// Bounds as a rectangle with `x = lng` and `y = lat`.
    #[must_use]
    pub fn to_rect(self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.southwest.lng,
                y: self.southwest.lat,
            },
            Coord {
                x: self.northeast.lng,
                y: self.northeast.lat,
            },
        )
    }
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Geocoding API response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Top-level status.
    pub status: String,
    /// Explanation attached to failing statuses.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Matches, best first.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// One geocoding match.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    /// Full street address.
    pub formatted_address: String,
}
