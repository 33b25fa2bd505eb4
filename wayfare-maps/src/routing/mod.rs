//! HTTP-based directions and reverse-geocoding providers.
//!
//! This module provides [`HttpMapsProvider`], an implementation of
//! [`wayfare_core::DirectionsProvider`] and [`wayfare_core::ReverseGeocoder`]
//! that talks to a Google-style maps JSON API.
//!
//! # Architecture
//!
//! The core traits are synchronous so the trip planner stays embeddable in
//! synchronous contexts. The provider blocks on async `reqwest` calls
//! internally.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use wayfare_core::{Coordinate, DirectionsProvider};
//! use wayfare_maps::routing::{HttpMapsProvider, HttpMapsProviderConfig};
//!
//! let config = HttpMapsProviderConfig::new("https://maps.googleapis.com/maps/api")
//!     .with_api_key("my-key")
//!     .with_timeout(Duration::from_secs(10));
//! let provider = HttpMapsProvider::with_config(config)?;
//!
//! let pickup = Coordinate::new(27.7172, 85.3240)?;
//! let dropoff = Coordinate::new(27.6710, 85.4298)?;
//! let directions = provider.directions(pickup, dropoff)?;
//! println!("{} ({})", directions.distance_text, directions.duration_text);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod google;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpMapsProvider, HttpMapsProviderConfig,
    ProviderBuildError,
};
