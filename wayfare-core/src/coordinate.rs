//! Geographic coordinates in degrees.
//!
//! [`Coordinate`] is the validated value type shared by every other module.
//! It converts to and from [`geo::Coord`] using `x = longitude` and
//! `y = latitude`.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
use thiserror::Error;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Errors returned by [`Coordinate::new`] and [`Coordinate::from_str`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// One of the components was NaN or infinite.
    #[error("coordinate components must be finite (got {latitude}, {longitude})")]
    NonFinite {
        /// Supplied latitude.
        latitude: f64,
        /// Supplied longitude.
        longitude: f64,
    },
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    /// Text could not be read as `lat,lng`.
    #[error("expected `lat,lng`, got {input:?}")]
    Malformed {
        /// Rejected input.
        input: String,
    },
}

/// A latitude/longitude pair in degrees.
///
/// # Examples
///
/// ```
/// use wayfare_core::Coordinate;
///
/// # fn main() -> Result<(), wayfare_core::CoordinateError> {
/// let kathmandu = Coordinate::new(27.7172, 85.3240)?;
/// assert_eq!(kathmandu.latitude(), 27.7172);
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawCoordinate", into = "RawCoordinate")
)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Validates and constructs a [`Coordinate`].
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] when either component is not finite or is
    /// outside its geographic range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite {
                latitude,
                longitude,
            });
        }
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    /// Parses the `lat,lng` form used by the maps APIs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinateError::Malformed {
            input: s.to_owned(),
        };
        let (lat, lng) = s.split_once(',').ok_or_else(malformed)?;
        let latitude = lat.trim().parse::<f64>().map_err(|_| malformed())?;
        let longitude = lng.trim().parse::<f64>().map_err(|_| malformed())?;
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl TryFrom<Coord<f64>> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(value.y, value.x)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

#[cfg(feature = "serde")]
impl From<Coordinate> for RawCoordinate {
    fn from(value: Coordinate) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_boundary_values(#[case] lat: f64, #[case] lng: f64) {
        assert!(Coordinate::new(lat, lng).is_ok());
    }

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(-91.0, 0.0)]
    fn rejects_out_of_range_latitude(#[case] lat: f64, #[case] lng: f64) {
        let err = Coordinate::new(lat, lng).expect_err("latitude out of range");
        assert_eq!(err, CoordinateError::LatitudeOutOfRange(lat));
    }

    #[rstest]
    fn rejects_out_of_range_longitude() {
        let err = Coordinate::new(0.0, 181.0).expect_err("longitude out of range");
        assert_eq!(err, CoordinateError::LongitudeOutOfRange(181.0));
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn rejects_non_finite_components(#[case] lat: f64, #[case] lng: f64) {
        let err = Coordinate::new(lat, lng).expect_err("non-finite");
        assert!(matches!(err, CoordinateError::NonFinite { .. }));
    }

    #[rstest]
    #[case("38.5,-120.2", 38.5, -120.2)]
    #[case(" 27.7 , 85.3 ", 27.7, 85.3)]
    fn parses_lat_lng_pairs(#[case] input: &str, #[case] lat: f64, #[case] lng: f64) {
        let coordinate: Coordinate = input.parse().expect("valid pair");
        assert_eq!(coordinate.latitude(), lat);
        assert_eq!(coordinate.longitude(), lng);
    }

    #[rstest]
    #[case("38.5")]
    #[case("north,east")]
    fn rejects_malformed_text(#[case] input: &str) {
        let err = input.parse::<Coordinate>().expect_err("malformed");
        assert!(matches!(err, CoordinateError::Malformed { .. }));
    }

    #[rstest]
    fn converts_to_geo_with_longitude_as_x() {
        let coordinate = Coordinate::new(10.0, 20.0).expect("valid");
        let coord: Coord<f64> = coordinate.into();
        assert_eq!(coord, Coord { x: 20.0, y: 10.0 });
        assert_eq!(Coordinate::try_from(coord), Ok(coordinate));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialisation_validates_ranges() {
        let ok: Coordinate =
            serde_json::from_str(r#"{"latitude": 1.5, "longitude": 2.5}"#).expect("valid");
        assert_eq!(ok.longitude(), 2.5);
        let err = serde_json::from_str::<Coordinate>(r#"{"latitude": 100.0, "longitude": 0.0}"#);
        assert!(err.is_err());
    }
}
