//! Boundary to the external maps service.
//!
//! The [`DirectionsProvider`] and [`ReverseGeocoder`] traits abstract the
//! directions and reverse-geocoding calls so the trip planner can be tested
//! without a network. Every failure is reported through [`MapsError`].

mod error;
mod provider;

pub use error::MapsError;
pub use provider::{
    ADDRESS_LOOKUP_FAILED, Directions, DirectionsProvider, ReverseGeocoder, UNKNOWN_LOCATION,
};
