//! Fleet sizing and the simulated vehicle value.

use std::time::Duration;

use thiserror::Error;

use crate::{Coordinate, RideCategory, Route};

/// Default pause between animation steps.
const DEFAULT_TICK_INTERVAL_MS: u64 = 6_000;

/// Errors returned by [`FleetConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetConfigError {
    /// A zero interval would make the timer fire continuously.
    #[error("tick interval must be positive")]
    ZeroTickInterval,
}

/// How many vehicles to show per category and how fast they move.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wayfare_core::{FleetConfig, RideCategory};
///
/// let fleet = FleetConfig::default();
/// assert_eq!(fleet.vehicles_for(RideCategory::Bike), 4);
/// assert_eq!(fleet.tick_interval(), Duration::from_secs(6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FleetConfig {
    /// Motorbikes shown on the route.
    pub bike: usize,
    /// Taxis shown on the route.
    pub taxi: usize,
    /// Porters shown on the route.
    pub port: usize,
    /// Milliseconds between animation steps.
    pub tick_interval_ms: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            bike: 4,
            taxi: 3,
            port: 3,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl FleetConfig {
    /// Number of vehicles seeded for `category`.
    #[must_use]
    pub const fn vehicles_for(&self, category: RideCategory) -> usize {
        match category {
            RideCategory::Bike => self.bike,
            RideCategory::Taxi => self.taxi,
            RideCategory::Port => self.port,
        }
    }

    /// Pause between animation steps.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject configurations the driver cannot run.
    ///
    /// # Errors
    ///
    /// Returns [`FleetConfigError::ZeroTickInterval`] for a zero interval.
    pub const fn validate(&self) -> Result<(), FleetConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(FleetConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

/// One animated marker on the route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulatedVehicle {
    /// Stable identifier, `"<category>-<n>"`.
    pub id: String,
    /// Category the marker represents.
    pub category: RideCategory,
    /// Index of the current route point.
    pub route_index: usize,
    /// Current position, always `route[route_index]`.
    pub position: Coordinate,
}

impl SimulatedVehicle {
    pub(super) fn seeded(
        category: RideCategory,
        ordinal: usize,
        route_index: usize,
        position: Coordinate,
    ) -> Self {
        Self {
            id: format!("{category}-{ordinal}"),
            category,
            route_index,
            position,
        }
    }

    /// The vehicle moved `steps` points along `route`, wrapping at the end.
    pub(super) fn advanced(&self, route: &Route, steps: usize) -> Self {
        let len = route.len();
        if len == 0 {
            return self.clone();
        }
        let route_index = (self.route_index % len + steps % len) % len;
        match route.get(route_index) {
            Some(position) => Self {
                route_index,
                position,
                ..self.clone()
            },
            None => self.clone(),
        }
    }
}
