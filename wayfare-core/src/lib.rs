//! Core domain logic for the Wayfare ride-hailing engine.
//!
//! The crate decodes route geometry, measures great-circle distances, prices
//! rides by category and animates simulated vehicles along the current
//! route. Network access stays behind the [`DirectionsProvider`] and
//! [`ReverseGeocoder`] traits; the HTTP implementation lives in
//! `wayfare-maps`.
//!
//! Constructors validate their input and return `Result` so invalid state is
//! rejected at the boundary.

#![forbid(unsafe_code)]

pub mod animation;
mod booking;
mod coordinate;
mod distance;
mod fare;
pub mod maps;
mod planner;
pub mod polyline;
mod region;
mod route;
mod session;
#[doc(hidden)]
pub mod test_support;

pub use animation::{
    AnimationDriver, AnimationError, AnimationState, Clock, FleetConfig, FleetConfigError,
    SimulatedVehicle, SystemClock,
};
pub use booking::{Booking, ConfirmationCode};
pub use coordinate::{Coordinate, CoordinateError, LATITUDE_RANGE, LONGITUDE_RANGE};
pub use distance::{EARTH_RADIUS_KM, haversine_km, haversine_km_degrees};
pub use fare::{
    FareCalculator, FareError, FareEstimate, FareRate, FareTable, RideCategory, UnknownCategory,
};
pub use maps::{
    ADDRESS_LOOKUP_FAILED, Directions, DirectionsProvider, MapsError, ReverseGeocoder,
    UNKNOWN_LOCATION,
};
pub use planner::{DistanceSource, Endpoint, PlannerError, RouteRequest, TripPlanner};
pub use polyline::PolylineError;
pub use region::{MapRegion, POINT_SPAN_DEGREES, ROUTE_PADDING};
pub use route::Route;
pub use session::{Completion, RouteSession, RouteTicket};
