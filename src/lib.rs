//! Facade crate for the Wayfare ride-hailing engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP maps
//! provider behind the `maps-http` feature flag.

#![forbid(unsafe_code)]

pub use wayfare_core::{
    ADDRESS_LOOKUP_FAILED,
    AnimationDriver, AnimationError, AnimationState, Booking, Clock, Completion,
    ConfirmationCode, Coordinate, CoordinateError, Directions, DirectionsProvider,
    DistanceSource, EARTH_RADIUS_KM, Endpoint, FareCalculator, FareError, FareEstimate,
    FareRate, FareTable, FleetConfig, FleetConfigError, MapRegion, MapsError, PlannerError,
    PolylineError, ReverseGeocoder, RideCategory, Route, RouteRequest, RouteSession,
    RouteTicket, SimulatedVehicle, SystemClock, TripPlanner, UNKNOWN_LOCATION, UnknownCategory,
    haversine_km, polyline,
};

#[cfg(feature = "maps-http")]
pub use wayfare_maps::routing::{HttpMapsProvider, HttpMapsProviderConfig, ProviderBuildError};
