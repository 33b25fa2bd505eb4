//! Great-circle distance using the haversine formula.

use crate::Coordinate;

/// Mean Earth radius used for fare distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometres.
///
/// The result is symmetric and exactly zero for identical points.
///
/// # Examples
/// ```
/// use wayfare_core::{Coordinate, haversine_km};
///
/// # fn main() -> Result<(), wayfare_core::CoordinateError> {
/// let a = Coordinate::new(0.0, 0.0)?;
/// let b = Coordinate::new(0.0, 1.0)?;
/// let km = haversine_km(a, b);
/// assert!((km - 111.19).abs() < 0.01);
/// assert_eq!(haversine_km(a, a), 0.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    haversine_km_degrees(a.latitude(), a.longitude(), b.latitude(), b.longitude())
}

/// Haversine distance over raw degree values.
///
/// Inputs are not validated: NaN or infinite components propagate to the
/// result instead of raising an error.
#[must_use]
pub fn haversine_km_degrees(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    // Absolute deltas keep the result bit-for-bit symmetric.
    let d_lat = (lat_b - lat_a).abs().to_radians();
    let d_lng = (lng_b - lng_a).abs().to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.to_radians().cos() * lat_b.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `h` just past 1 for near-antipodal points.
    let h = h.clamp(0.0, 1.0);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * central_angle
}
