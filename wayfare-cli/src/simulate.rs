//! `simulate` command: step the vehicle fleet along a decoded route.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfare_core::{
    AnimationDriver, AnimationError, FleetConfig, RideCategory, Route, SimulatedVehicle,
    SystemClock, polyline,
};

use crate::{
    ARG_CATEGORY, ARG_POLYLINE, ARG_TICKS, CliError, ENV_SIMULATE_CATEGORY,
    ENV_SIMULATE_POLYLINE, write_json,
};

const DEFAULT_TICKS: usize = 5;

/// CLI arguments for the `simulate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Seed simulated vehicles along an encoded route and print \
                 their positions after each animation tick.",
    about = "Step simulated vehicles along a route"
)]
#[ortho_config(prefix = "WAYFARE")]
pub(crate) struct SimulateArgs {
    /// Encoded polyline describing the route.
    #[arg(long = ARG_POLYLINE, value_name = "polyline", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) polyline: Option<String>,
    /// Ride category whose fleet to simulate.
    #[arg(long = ARG_CATEGORY, value_name = "category")]
    #[serde(default)]
    pub(crate) category: Option<RideCategory>,
    /// Number of ticks to apply after seeding.
    #[arg(long = ARG_TICKS, value_name = "count")]
    #[serde(default)]
    pub(crate) ticks: Option<usize>,
}

impl SimulateArgs {
    pub(crate) fn into_config(self) -> Result<SimulateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SimulateConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SimulateConfig {
    pub(crate) route: Route,
    pub(crate) category: RideCategory,
    pub(crate) ticks: usize,
}

impl TryFrom<SimulateArgs> for SimulateConfig {
    type Error = CliError;

    fn try_from(args: SimulateArgs) -> Result<Self, Self::Error> {
        let encoded = args.polyline.ok_or(CliError::MissingArgument {
            field: ARG_POLYLINE,
            env: ENV_SIMULATE_POLYLINE,
        })?;
        let category = args.category.ok_or(CliError::MissingArgument {
            field: ARG_CATEGORY,
            env: ENV_SIMULATE_CATEGORY,
        })?;
        Ok(Self {
            route: polyline::decode(&encoded)?,
            category,
            ticks: args.ticks.unwrap_or(DEFAULT_TICKS),
        })
    }
}

/// Vehicle positions after a given number of ticks.
#[derive(Debug, Serialize)]
pub(crate) struct Frame {
    pub(crate) tick: usize,
    pub(crate) vehicles: Vec<SimulatedVehicle>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SimulateOutput {
    pub(crate) category: RideCategory,
    pub(crate) route_points: usize,
    pub(crate) animating: bool,
    pub(crate) frames: Vec<Frame>,
}

pub(crate) fn run_simulate_with(args: SimulateArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let output = simulate(&config)?;
    write_json(writer, &output)
}

/// Seed the fleet and apply `config.ticks` ticks without waiting on the timer.
///
/// A single-point route yields only the seeded frame.
pub(crate) fn simulate(config: &SimulateConfig) -> Result<SimulateOutput, CliError> {
    let mut driver = AnimationDriver::new(SystemClock, FleetConfig::default())?;
    driver.show(config.route.clone(), config.category)?;
    let animating = match driver.start() {
        Ok(()) => true,
        Err(AnimationError::RouteTooShort { .. } | AnimationError::NotSeeded) => false,
        Err(err) => return Err(err.into()),
    };

    let mut frames = vec![Frame {
        tick: 0,
        vehicles: driver.vehicles().to_vec(),
    }];
    if animating {
        for tick in 1..=config.ticks {
            driver.tick();
            frames.push(Frame {
                tick,
                vehicles: driver.vehicles().to_vec(),
            });
        }
    }
    driver.stop();

    Ok(SimulateOutput {
        category: config.category,
        route_points: config.route.len(),
        animating,
        frames,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SimulateConfig, CliError> {
    let merged = SimulateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SimulateConfig::try_from(merged)
}
