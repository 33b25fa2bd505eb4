//! HTTP access to the directions and reverse-geocoding services used by
//! Wayfare.
//!
//! The [`routing`] module implements [`wayfare_core::DirectionsProvider`] and
//! [`wayfare_core::ReverseGeocoder`] over a Google-style JSON API.

#![forbid(unsafe_code)]

pub mod routing;
