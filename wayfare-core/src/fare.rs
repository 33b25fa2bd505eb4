//! Ride categories and fare estimation.
//!
//! Prices come from a [`FareTable`] of base fares and per-kilometre rates.
//! The table is configuration: it is handed to a [`FareCalculator`] at
//! construction and can be swapped per deployment or per test.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Vehicle classes offered to the rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RideCategory {
    /// Motorbike taxi.
    Bike,
    /// Standard car taxi.
    Taxi,
    /// Porter / delivery van.
    Port,
}

impl RideCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Bike, Self::Taxi, Self::Port];

    /// Lower-case name used in identifiers and the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bike => "bike",
            Self::Taxi => "taxi",
            Self::Port => "port",
        }
    }
}

impl fmt::Display for RideCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`RideCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ride category {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for RideCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Errors raised while configuring or applying a fare table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FareError {
    /// Distance was negative, NaN or infinite.
    #[error("distance must be a finite, non-negative number of kilometres (got {0})")]
    InvalidDistance(f64),
    /// A configured rate was negative, NaN or infinite.
    #[error("fare rate for {category} must be finite and non-negative")]
    InvalidRate {
        /// Name of the offending table row.
        category: &'static str,
    },
}

/// Base fare plus per-kilometre charge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FareRate {
    /// Flat charge applied to every ride.
    pub base_fare: f64,
    /// Charge per kilometre travelled.
    pub per_km: f64,
}

impl FareRate {
    /// Construct a rate.
    #[must_use]
    pub const fn new(base_fare: f64, per_km: f64) -> Self {
        Self { base_fare, per_km }
    }

    fn is_valid(&self) -> bool {
        [self.base_fare, self.per_km]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }
}

/// Pricing for every category plus a fallback for unrecognised names.
///
/// # Examples
/// ```
/// use wayfare_core::{FareTable, RideCategory};
///
/// let table = FareTable::default();
/// assert_eq!(table.rate(RideCategory::Bike).base_fare, 20.0);
/// assert_eq!(table.rate_for_name("rickshaw"), table.fallback);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FareTable {
    /// Motorbike pricing.
    pub bike: FareRate,
    /// Car taxi pricing.
    pub taxi: FareRate,
    /// Porter pricing.
    pub port: FareRate,
    /// Pricing for category names the table does not know.
    pub fallback: FareRate,
}

impl Default for FareTable {
    fn default() -> Self {
        Self {
            bike: FareRate::new(20.0, 8.0),
            taxi: FareRate::new(50.0, 15.0),
            port: FareRate::new(80.0, 25.0),
            fallback: FareRate::new(50.0, 15.0),
        }
    }
}

impl FareTable {
    /// Rate for a known category.
    #[must_use]
    pub const fn rate(&self, category: RideCategory) -> FareRate {
        match category {
            RideCategory::Bike => self.bike,
            RideCategory::Taxi => self.taxi,
            RideCategory::Port => self.port,
        }
    }

    /// Rate for a free-form category name, using the fallback when unknown.
    #[must_use]
    pub fn rate_for_name(&self, name: &str) -> FareRate {
        name.parse::<RideCategory>()
            .map_or(self.fallback, |category| self.rate(category))
    }

    /// Check that every rate is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::InvalidRate`] naming the first bad row.
    pub fn validate(&self) -> Result<(), FareError> {
        let rows = [
            ("bike", self.bike),
            ("taxi", self.taxi),
            ("port", self.port),
            ("fallback", self.fallback),
        ];
        match rows.into_iter().find(|(_, rate)| !rate.is_valid()) {
            Some((category, _)) => Err(FareError::InvalidRate { category }),
            None => Ok(()),
        }
    }
}

/// Derived price for one ride.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FareEstimate {
    /// Distance the price was computed from.
    pub distance_km: f64,
    /// Category priced.
    pub category: RideCategory,
    /// Whether the price covers the journey back.
    pub is_return_trip: bool,
    /// Price in whole currency units.
    pub price: u64,
}

/// Prices rides from a validated [`FareTable`].
///
/// `price = round(base_fare + distance_km * per_km)`, doubled for return
/// trips. The doubling happens after rounding, so a return trip always costs
/// exactly twice the single journey.
///
/// # Examples
/// ```
/// use wayfare_core::{FareCalculator, FareTable, RideCategory};
///
/// # fn main() -> Result<(), wayfare_core::FareError> {
/// let calculator = FareCalculator::new(FareTable::default())?;
/// assert_eq!(calculator.price(RideCategory::Taxi, 2.0, false)?, 80);
/// assert_eq!(calculator.price(RideCategory::Taxi, 2.0, true)?, 160);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareCalculator {
    table: FareTable,
}

impl Default for FareCalculator {
    fn default() -> Self {
        Self {
            table: FareTable::default(),
        }
    }
}

impl FareCalculator {
    /// Multiplier applied to return trips.
    pub const RETURN_TRIP_MULTIPLIER: u64 = 2;

    /// Construct a calculator from a fare table.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::InvalidRate`] when the table holds a negative or
    /// non-finite rate.
    pub fn new(table: FareTable) -> Result<Self, FareError> {
        table.validate()?;
        Ok(Self { table })
    }

    /// The table in use.
    #[must_use]
    pub const fn table(&self) -> &FareTable {
        &self.table
    }

    /// Price a ride in a known category.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::InvalidDistance`] for negative or non-finite
    /// distances.
    pub fn price(
        &self,
        category: RideCategory,
        distance_km: f64,
        is_return_trip: bool,
    ) -> Result<u64, FareError> {
        price_with(self.table.rate(category), distance_km, is_return_trip)
    }

    /// Price a ride given a free-form category name.
    ///
    /// Unknown names are priced with the table's fallback rate.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::InvalidDistance`] for negative or non-finite
    /// distances.
    pub fn price_for_name(
        &self,
        name: &str,
        distance_km: f64,
        is_return_trip: bool,
    ) -> Result<u64, FareError> {
        price_with(self.table.rate_for_name(name), distance_km, is_return_trip)
    }

    /// Price a ride and keep the inputs alongside the result.
    ///
    /// # Errors
    ///
    /// Returns [`FareError::InvalidDistance`] for negative or non-finite
    /// distances.
    pub fn estimate(
        &self,
        category: RideCategory,
        distance_km: f64,
        is_return_trip: bool,
    ) -> Result<FareEstimate, FareError> {
        let price = self.price(category, distance_km, is_return_trip)?;
        Ok(FareEstimate {
            distance_km,
            category,
            is_return_trip,
            price,
        })
    }
}

fn price_with(rate: FareRate, distance_km: f64, is_return_trip: bool) -> Result<u64, FareError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(FareError::InvalidDistance(distance_km));
    }
    // Rates and distance are finite and non-negative; the cast saturates.
    let single = (rate.base_fare + distance_km * rate.per_km).round() as u64;
    Ok(if is_return_trip {
        single.saturating_mul(FareCalculator::RETURN_TRIP_MULTIPLIER)
    } else {
        single
    })
}
