//! Test utilities for maps providers.
//!
//! [`StubMapsProvider`] is a deterministic test double for
//! [`DirectionsProvider`] and [`ReverseGeocoder`] that returns pre-configured
//! responses without making HTTP requests.

use wayfare_core::{Coordinate, Directions, DirectionsProvider, MapsError, ReverseGeocoder, Route};

/// Stub maps provider for testing.
///
/// # Example
///
/// ```
/// use wayfare_core::{Coordinate, DirectionsProvider, MapsError};
/// use wayfare_maps::routing::test_support::StubMapsProvider;
///
/// let provider = StubMapsProvider::with_error(MapsError::ApiConfiguration {
///     message: "key not enabled".to_string(),
/// });
/// let a = Coordinate::new(0.0, 0.0).expect("valid");
/// let result = provider.directions(a, a);
/// assert!(matches!(result, Err(MapsError::ApiConfiguration { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct StubMapsProvider {
    directions: Result<Directions, MapsError>,
    address: Result<Option<String>, MapsError>,
}

impl StubMapsProvider {
    /// Create a provider returning `directions` and no address.
    #[must_use]
    pub const fn with_directions(directions: Directions) -> Self {
        Self {
            directions: Ok(directions),
            address: Ok(None),
        }
    }

    /// Create a provider returning `route` with empty leg texts.
    #[must_use]
    pub fn with_route(route: Route) -> Self {
        Self::with_directions(Directions::from_route(route))
    }

    /// Create a provider failing every call with `error`.
    #[must_use]
    pub fn with_error(error: MapsError) -> Self {
        Self {
            directions: Err(error.clone()),
            address: Err(error),
        }
    }

    /// Return `address` from reverse geocoding.
    #[must_use]
    pub fn and_address(mut self, address: impl Into<String>) -> Self {
        self.address = Ok(Some(address.into()));
        self
    }
}

impl DirectionsProvider for StubMapsProvider {
    fn directions(&self, _: Coordinate, _: Coordinate) -> Result<Directions, MapsError> {
        self.directions.clone()
    }
}

impl ReverseGeocoder for StubMapsProvider {
    fn reverse_geocode(&self, _: Coordinate) -> Result<Option<String>, MapsError> {
        self.address.clone()
    }
}
