//! Routes as immutable, shareable coordinate sequences.
//!
//! A [`Route`] is published once and then read concurrently by the renderer
//! and the animation driver. Cloning shares the underlying slice; a new
//! route replaces the old one rather than mutating it.

use std::sync::Arc;

use geo::{BoundingRect, Coord, LineString, Rect};

use crate::Coordinate;
use crate::distance::haversine_km;

/// An ordered path of coordinates from origin to destination.
///
/// # Examples
/// ```
/// use wayfare_core::{Coordinate, Route};
///
/// # fn main() -> Result<(), wayfare_core::CoordinateError> {
/// let route = Route::new(vec![
///     Coordinate::new(38.5, -120.2)?,
///     Coordinate::new(40.7, -120.95)?,
/// ]);
///
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.get(1).map(|c| c.latitude()), Some(40.7));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    points: Arc<[Coordinate]>,
}

impl Route {
    /// Construct a route from ordered points.
    #[must_use]
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// Construct an empty route.
    ///
    /// # Examples
    /// ```
    /// use wayfare_core::Route;
    ///
    /// assert!(Route::empty().is_empty());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Points in travel order.
    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the route has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.points.get(index).copied()
    }

    /// First point of the route.
    #[must_use]
    pub fn origin(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    /// Last point of the route.
    #[must_use]
    pub fn destination(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    /// Sum of the great-circle lengths of consecutive legs, in kilometres.
    #[must_use]
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| match pair {
                [a, b] => haversine_km(*a, *b),
                _ => 0.0,
            })
            .sum()
    }

    /// Smallest axis-aligned rectangle containing every point.
    ///
    /// Returns `None` for an empty route.
    #[must_use]
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        let line: LineString<f64> = self
            .points
            .iter()
            .map(|point| Coord::from(*point))
            .collect();
        line.bounding_rect()
    }

    /// Whether both routes share the same underlying allocation.
    #[must_use]
    pub fn shares_points_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.points, &other.points)
    }
}

impl FromIterator<Coordinate> for Route {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn point(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).expect("valid coordinate")
    }

    #[fixture]
    fn triangle() -> Route {
        Route::new(vec![point(0.0, 0.0), point(0.0, 1.0), point(1.0, 1.0)])
    }

    #[rstest]
    fn route_preserves_order(triangle: Route) {
        assert_eq!(triangle.origin(), Some(point(0.0, 0.0)));
        assert_eq!(triangle.destination(), Some(point(1.0, 1.0)));
        assert_eq!(triangle.get(1), Some(point(0.0, 1.0)));
        assert_eq!(triangle.get(3), None);
    }

    #[rstest]
    fn clones_share_points(triangle: Route) {
        let copy = triangle.clone();
        assert!(copy.shares_points_with(&triangle));
        let rebuilt = Route::new(triangle.points().to_vec());
        assert!(!rebuilt.shares_points_with(&triangle));
        assert_eq!(rebuilt, triangle);
    }

    #[rstest]
    fn length_sums_consecutive_legs(triangle: Route) {
        let expected = haversine_km(point(0.0, 0.0), point(0.0, 1.0))
            + haversine_km(point(0.0, 1.0), point(1.0, 1.0));
        assert!((triangle.length_km() - expected).abs() < 1e-9);
    }

    #[rstest]
    fn single_point_route_has_zero_length() {
        let route = Route::new(vec![point(5.0, 5.0)]);
        assert_eq!(route.length_km(), 0.0);
    }

    #[rstest]
    fn bounding_rect_spans_all_points(triangle: Route) {
        let rect = triangle.bounding_rect().expect("non-empty route");
        assert_eq!(rect.min(), Coord { x: 0.0, y: 0.0 });
        assert_eq!(rect.max(), Coord { x: 1.0, y: 1.0 });
    }

    #[rstest]
    fn empty_route_has_no_bounds() {
        let route = Route::empty();
        assert!(route.is_empty());
        assert!(route.bounding_rect().is_none());
        assert_eq!(route.origin(), None);
    }
}
