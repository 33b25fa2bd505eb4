//! Fixtures shared by the CLI unit and behaviour tests.

use super::*;
use crate::quote::{MapsClient, MapsClientBuilder, QuoteConfig};
use camino::Utf8Path;
use std::fs;
use wayfare_core::{MapsError, Route, polyline};
use wayfare_maps::routing::test_support::StubMapsProvider;

/// Three-point route across the western United States.
pub(super) const SAMPLE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, contents).expect("write file");
}

pub(super) fn sample_route() -> Route {
    polyline::decode(SAMPLE_POLYLINE).expect("sample polyline decodes")
}

/// Hands out canned maps responses instead of contacting a service.
#[derive(Debug, Clone)]
pub(super) struct StubMapsClientBuilder {
    outcome: Result<Route, MapsError>,
}

impl StubMapsClientBuilder {
    pub(super) fn routing(route: Route) -> Self {
        Self { outcome: Ok(route) }
    }

    pub(super) fn failing(error: MapsError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl MapsClientBuilder for StubMapsClientBuilder {
    fn build(&self, _config: &QuoteConfig) -> Result<Box<dyn MapsClient>, CliError> {
        let provider = match &self.outcome {
            Ok(route) => StubMapsProvider::with_route(route.clone()).and_address("1 Main Street"),
            Err(error) => StubMapsProvider::with_error(error.clone()),
        };
        Ok(Box::new(provider))
    }
}
