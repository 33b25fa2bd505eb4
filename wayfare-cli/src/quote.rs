//! `quote` command: fetch a route and price a ride along it.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfare_core::{
    ADDRESS_LOOKUP_FAILED, AnimationDriver, Coordinate, DirectionsProvider, DistanceSource,
    FareCalculator, FareTable, FleetConfig, MapRegion, PlannerError, ReverseGeocoder,
    RideCategory, SimulatedVehicle, SystemClock, TripPlanner, UNKNOWN_LOCATION,
};
use wayfare_maps::routing::{DEFAULT_BASE_URL, HttpMapsProvider, HttpMapsProviderConfig};

use crate::{
    ARG_API_KEY, ARG_CATEGORY, ARG_DROPOFF, ARG_FARE_TABLE, ARG_MAPS_BASE_URL, ARG_PICKUP,
    ARG_RETURN_TRIP, CliError, ENV_QUOTE_API_KEY, ENV_QUOTE_CATEGORY, ENV_QUOTE_DROPOFF,
    ENV_QUOTE_PICKUP, parse_location, write_json,
};

/// CLI arguments for the `quote` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fetch driving directions between two points and price a \
                 ride along them. Options can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Quote a ride between two locations"
)]
#[ortho_config(prefix = "WAYFARE")]
pub(crate) struct QuoteArgs {
    /// Pickup location as `lat,lng`.
    #[arg(long = ARG_PICKUP, value_name = "lat,lng", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) pickup: Option<String>,
    /// Drop-off location as `lat,lng`.
    #[arg(long = ARG_DROPOFF, value_name = "lat,lng", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) dropoff: Option<String>,
    /// Ride category: bike, taxi or port.
    #[arg(long = ARG_CATEGORY, value_name = "category")]
    #[serde(default)]
    pub(crate) category: Option<RideCategory>,
    /// Price the journey back as well.
    #[arg(long = ARG_RETURN_TRIP, value_name = "bool")]
    #[serde(default)]
    pub(crate) return_trip: Option<bool>,
    /// Measure the fare along the fetched route instead of in a straight line.
    #[arg(long = "along-route", value_name = "bool")]
    #[serde(default)]
    pub(crate) along_route: Option<bool>,
    /// Maps API key.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Base URL of the maps web services.
    #[arg(long = ARG_MAPS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) maps_base_url: Option<String>,
    /// JSON file overriding the default fare table.
    #[arg(long = ARG_FARE_TABLE, value_name = "path")]
    #[serde(default)]
    pub(crate) fare_table: Option<Utf8PathBuf>,
}

impl QuoteArgs {
    pub(crate) fn into_config(self) -> Result<QuoteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QuoteConfig::try_from(merged)
    }
}

/// Resolved `quote` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuoteConfig {
    pub(crate) pickup: Coordinate,
    pub(crate) dropoff: Coordinate,
    pub(crate) category: RideCategory,
    pub(crate) return_trip: bool,
    pub(crate) distance_source: DistanceSource,
    pub(crate) api_key: String,
    pub(crate) maps_base_url: String,
    pub(crate) fare_table: Option<Utf8PathBuf>,
}

impl TryFrom<QuoteArgs> for QuoteConfig {
    type Error = CliError;

    fn try_from(args: QuoteArgs) -> Result<Self, Self::Error> {
        let pickup = args.pickup.ok_or(CliError::MissingArgument {
            field: ARG_PICKUP,
            env: ENV_QUOTE_PICKUP,
        })?;
        let dropoff = args.dropoff.ok_or(CliError::MissingArgument {
            field: ARG_DROPOFF,
            env: ENV_QUOTE_DROPOFF,
        })?;
        let category = args.category.ok_or(CliError::MissingArgument {
            field: ARG_CATEGORY,
            env: ENV_QUOTE_CATEGORY,
        })?;
        let api_key = args.api_key.ok_or(CliError::MissingArgument {
            field: ARG_API_KEY,
            env: ENV_QUOTE_API_KEY,
        })?;
        let distance_source = if args.along_route.unwrap_or(false) {
            DistanceSource::AlongRoute
        } else {
            DistanceSource::StraightLine
        };

        Ok(Self {
            pickup: parse_location(&pickup, ARG_PICKUP)?,
            dropoff: parse_location(&dropoff, ARG_DROPOFF)?,
            category,
            return_trip: args.return_trip.unwrap_or(false),
            distance_source,
            api_key,
            maps_base_url: args
                .maps_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            fare_table: args.fare_table,
        })
    }
}

/// Maps access needed by `quote`.
pub(crate) trait MapsClient: DirectionsProvider + ReverseGeocoder {}

impl<T: DirectionsProvider + ReverseGeocoder> MapsClient for T {}

/// Builds a maps client for the current quote invocation.
pub(crate) trait MapsClientBuilder {
    fn build(&self, config: &QuoteConfig) -> Result<Box<dyn MapsClient>, CliError>;
}

pub(crate) struct HttpMapsClientBuilder;

impl MapsClientBuilder for HttpMapsClientBuilder {
    fn build(&self, config: &QuoteConfig) -> Result<Box<dyn MapsClient>, CliError> {
        let provider_config = HttpMapsProviderConfig::new(config.maps_base_url.clone())
            .with_api_key(config.api_key.clone());
        let provider = HttpMapsProvider::with_config(provider_config).map_err(|source| {
            CliError::BuildMapsProvider {
                base_url: config.maps_base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

/// A trip endpoint with its street address.
#[derive(Debug, Serialize)]
pub(crate) struct Place {
    pub(crate) location: Coordinate,
    pub(crate) address: String,
}

/// JSON document printed by `quote`.
#[derive(Debug, Serialize)]
pub(crate) struct QuoteOutput {
    pub(crate) pickup: Place,
    pub(crate) dropoff: Place,
    pub(crate) category: RideCategory,
    pub(crate) is_return_trip: bool,
    pub(crate) distance_km: f64,
    pub(crate) price: u64,
    pub(crate) distance_text: String,
    pub(crate) duration_text: String,
    pub(crate) route_points: usize,
    pub(crate) region: Option<MapRegion>,
    pub(crate) vehicles: Vec<SimulatedVehicle>,
}

pub(crate) fn run_quote(args: QuoteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    run_quote_with(args, &HttpMapsClientBuilder, writer)
}

pub(crate) fn run_quote_with(
    args: QuoteArgs,
    builder: &dyn MapsClientBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let output = execute_quote(&config, builder)?;
    write_json(writer, &output)
}

pub(crate) fn execute_quote(
    config: &QuoteConfig,
    builder: &dyn MapsClientBuilder,
) -> Result<QuoteOutput, CliError> {
    let fares = match &config.fare_table {
        Some(path) => load_fare_table(path)?,
        None => FareCalculator::default(),
    };
    let client = builder.build(config)?;
    let driver = AnimationDriver::new(SystemClock, FleetConfig::default())?;
    let mut planner =
        TripPlanner::new(fares, driver).with_distance_source(config.distance_source);
    planner.set_pickup(config.pickup);
    planner.set_dropoff(config.dropoff);
    planner.select_category(config.category);
    planner.set_return_trip(config.return_trip);

    planner.request_route(client.as_ref())?;
    let estimate = planner.fare_estimate()?;
    let directions = planner.directions().ok_or(PlannerError::NoRoute)?;

    Ok(QuoteOutput {
        pickup: place(client.as_ref(), config.pickup),
        dropoff: place(client.as_ref(), config.dropoff),
        category: estimate.category,
        is_return_trip: estimate.is_return_trip,
        distance_km: estimate.distance_km,
        price: estimate.price,
        distance_text: directions.distance_text.clone(),
        duration_text: directions.duration_text.clone(),
        route_points: directions.route.len(),
        region: planner.map_region(),
        vehicles: planner.vehicles().to_vec(),
    })
}

/// Reverse geocode `location`.
///
/// Falls back to [`UNKNOWN_LOCATION`] when nothing matched and to
/// [`ADDRESS_LOOKUP_FAILED`] when the lookup errored.
fn place(client: &dyn MapsClient, location: Coordinate) -> Place {
    let address = match client.reverse_geocode(location) {
        Ok(Some(address)) => address,
        Ok(None) => UNKNOWN_LOCATION.to_owned(),
        Err(err) => {
            log::warn!("reverse geocoding {location} failed: {err}");
            ADDRESS_LOOKUP_FAILED.to_owned()
        }
    };
    Place { location, address }
}

/// Load and validate a JSON fare table.
pub(crate) fn load_fare_table(path: &Utf8Path) -> Result<FareCalculator, CliError> {
    require_existing(path, ARG_FARE_TABLE)?;
    let contents =
        wayfare_fs::read_utf8_file(path).map_err(|source| CliError::ReadFareTable {
            path: path.to_path_buf(),
            source,
        })?;
    let table: FareTable =
        serde_json::from_str(&contents).map_err(|source| CliError::ParseFareTable {
            path: path.to_path_buf(),
            source,
        })?;
    FareCalculator::new(table).map_err(|source| CliError::InvalidFareTable {
        path: path.to_path_buf(),
        source,
    })
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match wayfare_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<QuoteConfig, CliError> {
    let merged = QuoteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    QuoteConfig::try_from(merged)
}
