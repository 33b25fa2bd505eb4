//! Simulated vehicles looping along the displayed route.
//!
//! [`AnimationDriver`] is an explicit state machine (`Idle`, `Seeded`,
//! `Animating`) driven by an injectable [`Clock`], so tests advance time
//! deterministically instead of waiting on real timers.

mod clock;
mod driver;
mod fleet;

pub use clock::{Clock, SystemClock};
pub use driver::{AnimationDriver, AnimationError, AnimationState};
pub use fleet::{FleetConfig, FleetConfigError, SimulatedVehicle};
