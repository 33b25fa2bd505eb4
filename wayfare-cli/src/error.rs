//! Error types emitted by the Wayfare CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfare_core::{AnimationError, CoordinateError, FareError, PlannerError, PolylineError};
use wayfare_maps::routing::ProviderBuildError;

/// Errors emitted by the Wayfare CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A location option is not a valid `lat,lng` pair.
    #[error("invalid {field} location: {source}")]
    InvalidCoordinate {
        field: &'static str,
        #[source]
        source: CoordinateError,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the fare table file failed.
    #[error("failed to read fare table at {path:?}: {source}")]
    ReadFareTable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The fare table JSON could not be decoded.
    #[error("failed to parse fare table JSON at {path:?}: {source}")]
    ParseFareTable {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The fare table holds unusable rates.
    #[error("fare table in {path:?} is invalid: {source}")]
    InvalidFareTable {
        path: Utf8PathBuf,
        #[source]
        source: FareError,
    },
    /// The polyline argument could not be decoded.
    #[error("failed to decode polyline: {0}")]
    Decode(#[from] PolylineError),
    /// Constructing the maps provider failed.
    #[error("failed to build maps provider for {base_url:?}: {source}")]
    BuildMapsProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Planning the trip failed.
    #[error(transparent)]
    Plan(#[from] PlannerError),
    /// The vehicle simulation could not run.
    #[error("vehicle simulation failed: {0}")]
    Animation(#[from] AnimationError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl CliError {
    /// Rider-facing advice for failures that have one.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Plan(PlannerError::Maps(err)) => Some(err.user_message()),
            _ => None,
        }
    }
}
