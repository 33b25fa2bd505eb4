//! Maps service traits and the parsed directions payload.

use geo::Rect;

use super::MapsError;
use crate::{Coordinate, Route};

/// Text shown when reverse geocoding finds no address.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Text shown when the address lookup itself failed.
pub const ADDRESS_LOOKUP_FAILED: &str = "Error fetching address";

/// A successful directions lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Directions {
    /// Decoded overview geometry.
    pub route: Route,
    /// Human-readable leg distance, e.g. `"12.3 km"`.
    pub distance_text: String,
    /// Human-readable leg duration, e.g. `"25 mins"`.
    pub duration_text: String,
    /// Viewport reported by the service (`x = lng`, `y = lat`).
    pub bounds: Option<Rect<f64>>,
}

impl Directions {
    /// Directions carrying only a route, with bounds taken from its points.
    #[must_use]
    pub fn from_route(route: Route) -> Self {
        let bounds = route.bounding_rect();
        Self {
            route,
            distance_text: String::new(),
            duration_text: String::new(),
            bounds,
        }
    }
}

/// Fetch driving directions between two points.
///
/// # Examples
///
/// ```
/// use wayfare_core::{Coordinate, Directions, DirectionsProvider, MapsError, Route};
///
/// struct StraightLine;
///
/// impl DirectionsProvider for StraightLine {
///     fn directions(
///         &self,
///         origin: Coordinate,
///         destination: Coordinate,
///     ) -> Result<Directions, MapsError> {
///         Ok(Directions::from_route(Route::new(vec![origin, destination])))
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let a = Coordinate::new(0.0, 0.0)?;
/// let b = Coordinate::new(1.0, 1.0)?;
/// let directions = StraightLine.directions(a, b)?;
/// assert_eq!(directions.route.len(), 2);
/// # Ok(())
/// # }
/// ```
pub trait DirectionsProvider {
    /// Return directions from `origin` to `destination`.
    ///
    /// Implementations must return [`MapsError::ApiConfiguration`] for a
    /// denied request and [`MapsError::RouteNotFound`] for any other non-OK
    /// status or an empty route list.
    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Directions, MapsError>;
}

/// Look up a street address for a coordinate.
pub trait ReverseGeocoder {
    /// Return the best formatted address for `at`.
    ///
    /// `Ok(None)` means the service answered without a match; callers show
    /// [`UNKNOWN_LOCATION`]. An error means the lookup failed; callers show
    /// [`ADDRESS_LOOKUP_FAILED`].
    fn reverse_geocode(&self, at: Coordinate) -> Result<Option<String>, MapsError>;
}

impl<T: DirectionsProvider + ?Sized> DirectionsProvider for &T {
    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Directions, MapsError> {
        (**self).directions(origin, destination)
    }
}

impl<T: ReverseGeocoder + ?Sized> ReverseGeocoder for &T {
    fn reverse_geocode(&self, at: Coordinate) -> Result<Option<String>, MapsError> {
        (**self).reverse_geocode(at)
    }
}

impl<T: DirectionsProvider + ?Sized> DirectionsProvider for Box<T> {
    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Directions, MapsError> {
        (**self).directions(origin, destination)
    }
}
