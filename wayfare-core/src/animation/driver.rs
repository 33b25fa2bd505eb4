//! The route animation state machine.

use std::time::{Duration, Instant};

use thiserror::Error;

use super::{Clock, FleetConfig, FleetConfigError, SimulatedVehicle};
use crate::{RideCategory, Route};

/// Lifecycle of the vehicle animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// No vehicles, no timer.
    Idle,
    /// Vehicles placed on the route, timer not running.
    Seeded,
    /// Timer running; vehicles advance on every tick.
    Animating,
}

/// Errors returned by [`AnimationDriver`] transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// The fleet configuration cannot drive a timer.
    #[error(transparent)]
    Config(#[from] FleetConfigError),
    /// Vehicles cannot be placed on a route without points.
    #[error("cannot seed vehicles on an empty route")]
    EmptyRoute,
    /// A route with fewer than two points has nowhere to advance to.
    #[error("route has {len} point(s); at least two are needed to animate")]
    RouteTooShort {
        /// Number of points in the rejected route.
        len: usize,
    },
    /// `start` was called before any vehicles were seeded.
    #[error("no vehicles have been seeded")]
    NotSeeded,
}

/// Moves simulated vehicles along a route on a fixed timer.
///
/// Vehicles are seeded evenly at `i * floor(len / count)` and every tick moves
/// each of them one point forward, wrapping to the start. The vehicle list is
/// rebuilt and swapped per tick, so observers never see a partial update.
///
/// # Examples
/// ```
/// use wayfare_core::{AnimationDriver, AnimationState, Coordinate, FleetConfig, RideCategory, Route};
/// use wayfare_core::test_support::ManualClock;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let route: Route = (0..8)
///     .map(|i| Coordinate::new(0.0, f64::from(i) * 0.01))
///     .collect::<Result<_, _>>()?;
/// let clock = ManualClock::new();
/// let mut driver = AnimationDriver::new(clock.clone(), FleetConfig::default())?;
///
/// driver.show(route, RideCategory::Bike)?;
/// driver.start()?;
/// clock.advance(Duration::from_secs(6));
///
/// assert_eq!(driver.poll(), 1);
/// assert_eq!(driver.state(), AnimationState::Animating);
/// let indices: Vec<_> = driver.vehicles().iter().map(|v| v.route_index).collect();
/// assert_eq!(indices, vec![1, 3, 5, 7]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AnimationDriver<C: Clock> {
    clock: C,
    fleet: FleetConfig,
    state: AnimationState,
    route: Option<Route>,
    vehicles: Vec<SimulatedVehicle>,
    next_tick: Option<Instant>,
}

impl<C: Clock> AnimationDriver<C> {
    /// Construct an idle driver.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::Config`] when the fleet configuration has a
    /// zero tick interval.
    pub fn new(clock: C, fleet: FleetConfig) -> Result<Self, AnimationError> {
        fleet.validate()?;
        Ok(Self {
            clock,
            fleet,
            state: AnimationState::Idle,
            route: None,
            vehicles: Vec::new(),
            next_tick: None,
        })
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    /// Vehicles in seeding order.
    #[must_use]
    pub fn vehicles(&self) -> &[SimulatedVehicle] {
        &self.vehicles
    }

    /// The route vehicles are travelling on, if any.
    #[must_use]
    pub const fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Fleet sizing in use.
    #[must_use]
    pub const fn fleet(&self) -> &FleetConfig {
        &self.fleet
    }

    /// When the next tick is due, while animating.
    #[must_use]
    pub const fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Seed vehicles for `category` along `route`.
    ///
    /// Any previous animation is stopped first. Returns the number of
    /// vehicles placed; a category configured with zero vehicles leaves the
    /// driver idle.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::EmptyRoute`] when `route` has no points; the
    /// driver is left idle.
    pub fn show(&mut self, route: Route, category: RideCategory) -> Result<usize, AnimationError> {
        self.stop();
        if route.is_empty() {
            return Err(AnimationError::EmptyRoute);
        }
        let count = self.fleet.vehicles_for(category);
        if count == 0 {
            return Ok(0);
        }

        let spacing = route.len() / count;
        self.vehicles = (0..count)
            .filter_map(|ordinal| {
                let index = ordinal * spacing;
                route
                    .get(index)
                    .map(|position| SimulatedVehicle::seeded(category, ordinal, index, position))
            })
            .collect();
        self.route = Some(route);
        self.state = AnimationState::Seeded;
        log::debug!(
            "seeded {count} {category} vehicle(s) every {spacing} point(s) along the route"
        );
        Ok(self.vehicles.len())
    }

    /// Arm the repeating timer.
    ///
    /// Calling `start` while already animating re-arms the timer from now.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::NotSeeded`] when idle and
    /// [`AnimationError::RouteTooShort`] when the route has fewer than two
    /// points; in the latter case vehicles stay seeded but never move.
    pub fn start(&mut self) -> Result<(), AnimationError> {
        let len = match (&self.state, &self.route) {
            (AnimationState::Idle, _) | (_, None) => return Err(AnimationError::NotSeeded),
            (_, Some(route)) => route.len(),
        };
        if len < 2 {
            log::warn!("not starting vehicle animation: route has {len} point(s)");
            return Err(AnimationError::RouteTooShort { len });
        }
        self.next_tick = Some(self.clock.now() + self.interval());
        self.state = AnimationState::Animating;
        Ok(())
    }

    /// Apply every tick that has fallen due since the last poll.
    ///
    /// Returns the number of ticks applied. Outside [`AnimationState::Animating`]
    /// this is always zero.
    pub fn poll(&mut self) -> usize {
        let Some(due) = self.next_tick else {
            return 0;
        };
        let now = self.clock.now();
        if now < due {
            return 0;
        }
        let interval = self.interval();
        let elapsed = (now - due).as_nanos() / interval.as_nanos().max(1);
        let ticks = usize::try_from(elapsed).map_or(usize::MAX, |whole| whole.saturating_add(1));
        self.advance(ticks);
        let next = u32::try_from(ticks)
            .ok()
            .and_then(|count| interval.checked_mul(count))
            .and_then(|offset| due.checked_add(offset));
        self.next_tick = Some(next.unwrap_or(now + interval));
        ticks
    }

    /// Advance every vehicle by one point immediately.
    ///
    /// Returns `false` without moving anything unless animating. The timer
    /// schedule is left untouched.
    pub fn tick(&mut self) -> bool {
        if self.state != AnimationState::Animating {
            return false;
        }
        self.advance(1);
        true
    }

    /// Cancel the timer and clear all vehicles.
    pub fn stop(&mut self) {
        if self.state == AnimationState::Animating {
            log::debug!("cancelling vehicle animation timer");
        }
        self.next_tick = None;
        self.vehicles.clear();
        self.route = None;
        self.state = AnimationState::Idle;
    }

    fn advance(&mut self, steps: usize) {
        let Some(route) = &self.route else {
            return;
        };
        self.vehicles = self
            .vehicles
            .iter()
            .map(|vehicle| vehicle.advanced(route, steps))
            .collect();
    }

    const fn interval(&self) -> Duration {
        self.fleet.tick_interval()
    }
}
