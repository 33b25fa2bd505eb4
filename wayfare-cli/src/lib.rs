//! Command-line interface for the Wayfare ride-hailing engine.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod decode;
mod error;
mod quote;
mod simulate;

pub use error::CliError;

use decode::{DecodeArgs, run_decode_with};
use quote::{QuoteArgs, run_quote};
use simulate::{SimulateArgs, run_simulate_with};

const ARG_PICKUP: &str = "pickup";
const ARG_DROPOFF: &str = "dropoff";
const ARG_CATEGORY: &str = "category";
const ARG_RETURN_TRIP: &str = "return-trip";
const ARG_API_KEY: &str = "api-key";
const ARG_MAPS_BASE_URL: &str = "maps-base-url";
const ARG_FARE_TABLE: &str = "fare-table";
const ARG_POLYLINE: &str = "polyline";
const ARG_TICKS: &str = "ticks";
const ENV_QUOTE_PICKUP: &str = "WAYFARE_CMDS_QUOTE_PICKUP";
const ENV_QUOTE_DROPOFF: &str = "WAYFARE_CMDS_QUOTE_DROPOFF";
const ENV_QUOTE_CATEGORY: &str = "WAYFARE_CMDS_QUOTE_CATEGORY";
const ENV_QUOTE_API_KEY: &str = "WAYFARE_CMDS_QUOTE_API_KEY";
const ENV_SIMULATE_POLYLINE: &str = "WAYFARE_CMDS_SIMULATE_POLYLINE";
const ENV_SIMULATE_CATEGORY: &str = "WAYFARE_CMDS_SIMULATE_CATEGORY";

/// Run the Wayfare CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments are invalid or the command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Decode(args) => run_decode_with(&args, &mut stdout),
        Command::Quote(args) => run_quote(args, &mut stdout),
        Command::Simulate(args) => run_simulate_with(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfare",
    about = "Route decoding, fare quotes and vehicle simulation for Wayfare",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode an encoded polyline into coordinates.
    Decode(DecodeArgs),
    /// Fetch a route and price a ride along it.
    Quote(QuoteArgs),
    /// Step simulated vehicles along a route.
    Simulate(SimulateArgs),
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

/// Parse a `lat,lng` option value.
fn parse_location(
    value: &str,
    field: &'static str,
) -> Result<wayfare_core::Coordinate, CliError> {
    value
        .parse()
        .map_err(|source| CliError::InvalidCoordinate { field, source })
}

#[cfg(test)]
mod tests;
