//! Ride confirmation.

use std::fmt;

use rand::Rng;

use crate::{Coordinate, FareEstimate};

/// Smallest confirmation code handed to riders.
const MIN_CODE: u16 = 1000;
/// Largest confirmation code handed to riders.
const MAX_CODE: u16 = 9999;

/// Four-digit one-time code the rider reads out to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConfirmationCode(u16);

impl ConfirmationCode {
    /// Draw a fresh code in `1000..=9999`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(MIN_CODE..=MAX_CODE))
    }

    /// Numeric value of the code.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A confirmed ride.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Booking {
    /// Code the rider shares with the driver.
    pub code: ConfirmationCode,
    /// Price agreed at booking time.
    pub fare: FareEstimate,
    /// Where the ride starts.
    pub pickup: Coordinate,
    /// Where the ride ends.
    pub dropoff: Coordinate,
}
