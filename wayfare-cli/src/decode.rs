//! `decode` command: polyline text to coordinates.

use std::io::Write;

use clap::Parser;
use serde::Serialize;
use wayfare_core::{Coordinate, polyline};

use crate::{CliError, write_json};

/// CLI arguments for the `decode` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(about = "Decode an encoded polyline into coordinates")]
pub(crate) struct DecodeArgs {
    /// Encoded polyline, e.g. as returned by a directions API.
    #[arg(value_name = "polyline", allow_hyphen_values = true)]
    pub(crate) polyline: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DecodeOutput {
    pub(crate) length_km: f64,
    pub(crate) points: Vec<Coordinate>,
}

pub(crate) fn run_decode_with(args: &DecodeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let route = polyline::decode(&args.polyline)?;
    log::debug!("decoded {} point(s)", route.len());
    let output = DecodeOutput {
        length_km: route.length_km(),
        points: route.points().to_vec(),
    };
    write_json(writer, &output)
}
