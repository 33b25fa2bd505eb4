//! Test doubles shared by unit, behaviour and doc tests.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::{Clock, Coordinate, Directions, DirectionsProvider, MapsError, Route};

/// Clock that only moves when told to.
///
/// Clones share the same offset, so a test can keep one handle while the
/// driver owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset += by;
    }

    /// Total time advanced since construction.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

/// Directions provider returning a straight two-point route.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightLineDirections;

impl DirectionsProvider for StraightLineDirections {
    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Directions, MapsError> {
        Ok(Directions::from_route(Route::new(vec![origin, destination])))
    }
}

/// Directions provider replaying a fixed result.
#[derive(Debug, Clone)]
pub struct FixedDirections {
    result: Result<Directions, MapsError>,
}

impl FixedDirections {
    /// Always return `route`.
    #[must_use]
    pub fn with_route(route: Route) -> Self {
        Self {
            result: Ok(Directions::from_route(route)),
        }
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn with_error(error: MapsError) -> Self {
        Self { result: Err(error) }
    }
}

impl DirectionsProvider for FixedDirections {
    fn directions(&self, _: Coordinate, _: Coordinate) -> Result<Directions, MapsError> {
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let start = clock.now();
        handle.advance(Duration::from_secs(6));
        assert_eq!(clock.now() - start, Duration::from_secs(6));
    }
}
