//! Map viewports framing a route or a point.

use geo::Rect;

use crate::{Coordinate, CoordinateError};

/// Span added around a route so it does not touch the viewport edges.
pub const ROUTE_PADDING: f64 = 1.5;

/// Default zoom span when centring on a single point.
pub const POINT_SPAN_DEGREES: f64 = 0.01;

/// A map viewport: centre plus latitude and longitude spans in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapRegion {
    /// Viewport centre.
    pub center: Coordinate,
    /// North-south span in degrees.
    pub latitude_delta: f64,
    /// East-west span in degrees.
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Frame a bounding box, padded by [`ROUTE_PADDING`].
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if the box centre is not a valid
    /// coordinate.
    ///
    /// # Examples
    /// ```
    /// use geo::{Coord, Rect};
    /// use wayfare_core::MapRegion;
    ///
    /// # fn main() -> Result<(), wayfare_core::CoordinateError> {
    /// let bounds = Rect::new(Coord { x: 85.0, y: 27.0 }, Coord { x: 86.0, y: 28.0 });
    /// let region = MapRegion::from_bounds(&bounds)?;
    /// assert_eq!(region.center.latitude(), 27.5);
    /// assert_eq!(region.latitude_delta, 1.5);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_bounds(bounds: &Rect<f64>) -> Result<Self, CoordinateError> {
        let center = Coordinate::try_from(bounds.center())?;
        Ok(Self {
            center,
            latitude_delta: bounds.height().abs() * ROUTE_PADDING,
            longitude_delta: bounds.width().abs() * ROUTE_PADDING,
        })
    }

    /// A square viewport of [`POINT_SPAN_DEGREES`] centred on `center`.
    #[must_use]
    pub const fn around(center: Coordinate) -> Self {
        Self {
            center,
            latitude_delta: POINT_SPAN_DEGREES,
            longitude_delta: POINT_SPAN_DEGREES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    #[rstest]
    fn spans_are_padded_and_centred() {
        let bounds = Rect::new(Coord { x: -121.0, y: 38.0 }, Coord { x: -120.0, y: 40.0 });
        let region = MapRegion::from_bounds(&bounds).expect("valid centre");
        assert_eq!(region.center.latitude(), 39.0);
        assert_eq!(region.center.longitude(), -120.5);
        assert_eq!(region.latitude_delta, 3.0);
        assert_eq!(region.longitude_delta, 1.5);
    }

    #[rstest]
    fn degenerate_bounds_have_zero_span() {
        let corner = Coord { x: 10.0, y: 10.0 };
        let region = MapRegion::from_bounds(&Rect::new(corner, corner)).expect("valid");
        assert_eq!(region.latitude_delta, 0.0);
    }

    #[rstest]
    fn point_regions_use_the_default_span() {
        let center = Coordinate::new(1.0, 2.0).expect("valid");
        let region = MapRegion::around(center);
        assert_eq!(region.latitude_delta, POINT_SPAN_DEGREES);
        assert_eq!(region.center, center);
    }
}
