//! One rider's trip-planning session.
//!
//! [`TripPlanner`] ties the pieces together: the rider's pickup and drop-off,
//! the selected ride category, the return-trip flag, the route fetched for
//! them, the vehicles animated along it and the resulting fare.
//!
//! Route fetching is split into [`TripPlanner::begin_route_request`] and
//! [`TripPlanner::finish_route_request`] so callers can await the network in
//! between without holding the planner. Only the newest request is applied.

use std::sync::Arc;

use rand::Rng;
use thiserror::Error;

use crate::animation::{AnimationDriver, AnimationState, Clock, SimulatedVehicle};
use crate::session::{Completion, RouteSession, RouteTicket};
use crate::{
    Booking, ConfirmationCode, Coordinate, Directions, DirectionsProvider, FareCalculator,
    FareError, FareEstimate, MapRegion, MapsError, RideCategory, Route, haversine_km,
};

/// Which distance feeds the fare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum DistanceSource {
    /// Great-circle distance from pickup to drop-off.
    #[default]
    StraightLine,
    /// Sum of the legs of the fetched route.
    AlongRoute,
}

/// Which trip endpoint is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Where the ride starts.
    Pickup,
    /// Where the ride ends.
    Dropoff,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pickup => "pickup",
            Self::Dropoff => "drop-off",
        })
    }
}

/// Errors raised by [`TripPlanner`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// A trip endpoint has not been chosen.
    #[error("select a {0} location first")]
    MissingLocation(Endpoint),
    /// No route is currently shown.
    #[error("no route is available")]
    NoRoute,
    /// No ride category is selected.
    #[error("no ride category is selected")]
    NoCategory,
    /// The maps service failed.
    #[error(transparent)]
    Maps(#[from] MapsError),
    /// The fare could not be computed.
    #[error(transparent)]
    Fare(#[from] FareError),
}

/// A route request captured by [`TripPlanner::begin_route_request`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    /// Generation ticket for last-writer-wins.
    pub ticket: RouteTicket,
    /// Pickup at the time of the request.
    pub origin: Coordinate,
    /// Drop-off at the time of the request.
    pub destination: Coordinate,
}

/// Trip state for one screen session.
///
/// # Examples
/// ```
/// use wayfare_core::{
///     AnimationDriver, Coordinate, Directions, DirectionsProvider, FareCalculator, FleetConfig,
///     MapsError, RideCategory, Route, TripPlanner,
/// };
/// use wayfare_core::test_support::ManualClock;
///
/// struct StraightLine;
///
/// impl DirectionsProvider for StraightLine {
///     fn directions(&self, a: Coordinate, b: Coordinate) -> Result<Directions, MapsError> {
///         Ok(Directions::from_route(Route::new(vec![a, b])))
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let driver = AnimationDriver::new(ManualClock::new(), FleetConfig::default())?;
/// let mut planner = TripPlanner::new(FareCalculator::default(), driver);
/// planner.set_pickup(Coordinate::new(0.0, 0.0)?);
/// planner.set_dropoff(Coordinate::new(0.0, 0.1)?);
/// planner.select_category(RideCategory::Taxi);
/// planner.request_route(&StraightLine)?;
///
/// let estimate = planner.fare_estimate()?;
/// assert_eq!(estimate.price, 217); // round(50 + 11.12 * 15)
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TripPlanner<C: Clock> {
    pickup: Option<Coordinate>,
    dropoff: Option<Coordinate>,
    category: Option<RideCategory>,
    return_trip: bool,
    route_visible: bool,
    distance_source: DistanceSource,
    fares: FareCalculator,
    session: RouteSession,
    driver: AnimationDriver<C>,
}

impl<C: Clock> TripPlanner<C> {
    /// Construct a planner with nothing selected.
    #[must_use]
    pub fn new(fares: FareCalculator, driver: AnimationDriver<C>) -> Self {
        Self {
            pickup: None,
            dropoff: None,
            category: None,
            return_trip: false,
            route_visible: false,
            distance_source: DistanceSource::default(),
            fares,
            session: RouteSession::new(),
            driver,
        }
    }

    /// Choose how the fare distance is measured.
    #[must_use]
    pub const fn with_distance_source(mut self, source: DistanceSource) -> Self {
        self.distance_source = source;
        self
    }

    /// Set where the ride starts.
    pub const fn set_pickup(&mut self, pickup: Coordinate) {
        self.pickup = Some(pickup);
    }

    /// Set where the ride ends.
    pub const fn set_dropoff(&mut self, dropoff: Coordinate) {
        self.dropoff = Some(dropoff);
    }

    /// Pickup location, if chosen.
    #[must_use]
    pub const fn pickup(&self) -> Option<Coordinate> {
        self.pickup
    }

    /// Drop-off location, if chosen.
    #[must_use]
    pub const fn dropoff(&self) -> Option<Coordinate> {
        self.dropoff
    }

    /// Toggle a ride category.
    ///
    /// Selecting the already-selected category deselects it. Returns the
    /// selection after the toggle. Vehicles are reseeded for the new
    /// category, or cleared when nothing is selected.
    pub fn select_category(&mut self, category: RideCategory) -> Option<RideCategory> {
        self.category = if self.category == Some(category) {
            None
        } else {
            Some(category)
        };
        self.sync_animation();
        self.category
    }

    /// Currently selected category.
    #[must_use]
    pub const fn category(&self) -> Option<RideCategory> {
        self.category
    }

    /// Request pricing for the journey back as well.
    pub const fn set_return_trip(&mut self, return_trip: bool) {
        self.return_trip = return_trip;
    }

    /// Whether the return journey is included.
    #[must_use]
    pub const fn return_trip(&self) -> bool {
        self.return_trip
    }

    /// Show the route and start a request for it.
    ///
    /// Issuing a new request supersedes any request still in flight.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::MissingLocation`] unless both pickup and
    /// drop-off are set.
    pub fn begin_route_request(&mut self) -> Result<RouteRequest, PlannerError> {
        let origin = self
            .pickup
            .ok_or(PlannerError::MissingLocation(Endpoint::Pickup))?;
        let destination = self
            .dropoff
            .ok_or(PlannerError::MissingLocation(Endpoint::Dropoff))?;
        self.route_visible = true;
        Ok(RouteRequest {
            ticket: self.session.begin(),
            origin,
            destination,
        })
    }

    /// Apply the result of a request started with
    /// [`Self::begin_route_request`].
    ///
    /// A newer request makes this one stale: its result, success or failure,
    /// is discarded and the current route and animation are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Maps`] when the current request failed; the
    /// previous route is cleared and the animation stopped.
    pub fn finish_route_request(
        &mut self,
        request: RouteRequest,
        result: Result<Directions, MapsError>,
    ) -> Result<Completion, PlannerError> {
        match self.session.complete(request.ticket, result) {
            Ok(completion) => {
                if completion.is_applied() {
                    self.sync_animation();
                }
                Ok(completion)
            }
            Err(err) => {
                log::warn!("route request failed: {err}");
                self.driver.stop();
                Err(err.into())
            }
        }
    }

    /// Fetch and apply a route in one step.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_route_request`] and [`Self::finish_route_request`].
    pub fn request_route<P>(&mut self, provider: &P) -> Result<Completion, PlannerError>
    where
        P: DirectionsProvider + ?Sized,
    {
        let request = self.begin_route_request()?;
        let result = provider.directions(request.origin, request.destination);
        self.finish_route_request(request, result)
    }

    /// Hide the route and stop the vehicles.
    pub fn hide_route(&mut self) {
        self.route_visible = false;
        self.driver.stop();
    }

    /// Whether the route is meant to be displayed.
    #[must_use]
    pub const fn route_visible(&self) -> bool {
        self.route_visible
    }

    /// Published directions, if any.
    #[must_use]
    pub fn directions(&self) -> Option<Arc<Directions>> {
        self.session.current()
    }

    /// Published route, if any.
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        self.session.current().map(|directions| directions.route.clone())
    }

    /// Viewport framing the published route.
    ///
    /// Uses the service-reported bounds, falling back to the route's own
    /// bounding box.
    #[must_use]
    pub fn map_region(&self) -> Option<MapRegion> {
        let directions = self.session.current()?;
        let bounds = directions
            .bounds
            .or_else(|| directions.route.bounding_rect())?;
        MapRegion::from_bounds(&bounds).ok()
    }

    /// Price the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::MissingLocation`], [`PlannerError::NoRoute`]
    /// or [`PlannerError::NoCategory`] while the inputs are incomplete.
    pub fn fare_estimate(&self) -> Result<FareEstimate, PlannerError> {
        let pickup = self
            .pickup
            .ok_or(PlannerError::MissingLocation(Endpoint::Pickup))?;
        let dropoff = self
            .dropoff
            .ok_or(PlannerError::MissingLocation(Endpoint::Dropoff))?;
        let route = self
            .route()
            .filter(|route| !route.is_empty())
            .ok_or(PlannerError::NoRoute)?;
        let category = self.category.ok_or(PlannerError::NoCategory)?;
        let distance_km = match self.distance_source {
            DistanceSource::StraightLine => haversine_km(pickup, dropoff),
            DistanceSource::AlongRoute => route.length_km(),
        };
        Ok(self
            .fares
            .estimate(category, distance_km, self.return_trip)?)
    }

    /// Confirm the ride at the current price.
    ///
    /// # Errors
    ///
    /// Returns the [`Self::fare_estimate`] error when no price is available.
    pub fn book<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Booking, PlannerError> {
        let fare = self.fare_estimate()?;
        let pickup = self
            .pickup
            .ok_or(PlannerError::MissingLocation(Endpoint::Pickup))?;
        let dropoff = self
            .dropoff
            .ok_or(PlannerError::MissingLocation(Endpoint::Dropoff))?;
        let booking = Booking {
            code: ConfirmationCode::generate(rng),
            fare,
            pickup,
            dropoff,
        };
        log::info!(
            "booked {} ride from {pickup} to {dropoff} for {}",
            fare.category,
            fare.price
        );
        Ok(booking)
    }

    /// Apply any animation ticks that have fallen due.
    pub fn poll_animation(&mut self) -> usize {
        self.driver.poll()
    }

    /// Vehicles currently on the route.
    #[must_use]
    pub fn vehicles(&self) -> &[SimulatedVehicle] {
        self.driver.vehicles()
    }

    /// Animation lifecycle state.
    #[must_use]
    pub const fn animation_state(&self) -> AnimationState {
        self.driver.state()
    }

    /// Reseed the vehicles from the current route and category.
    fn sync_animation(&mut self) {
        self.driver.stop();
        if !self.route_visible {
            return;
        }
        let (Some(category), Some(directions)) = (self.category, self.session.current()) else {
            return;
        };
        match self.driver.show(directions.route.clone(), category) {
            Ok(0) => {}
            Ok(_) => {
                if let Err(err) = self.driver.start() {
                    log::debug!("vehicles seeded but not animated: {err}");
                }
            }
            Err(err) => log::debug!("no vehicles shown: {err}"),
        }
    }
}
