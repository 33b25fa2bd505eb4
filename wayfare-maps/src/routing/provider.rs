//! HTTP maps provider backed by `reqwest`.
//!
//! # Architecture
//!
//! [`DirectionsProvider`] and [`ReverseGeocoder`] are synchronous. This
//! provider bridges the async HTTP calls to the sync interface by blocking on
//! a Tokio runtime internally.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;
use wayfare_core::{
    Coordinate, Directions, DirectionsProvider, MapsError, ReverseGeocoder, polyline,
};

use super::google::{
    DirectionsResponse, GeocodeResponse, STATUS_OK, STATUS_REQUEST_DENIED, STATUS_ZERO_RESULTS,
};

/// Error type for [`HttpMapsProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The configured base URL is not an absolute URL.
    #[error("invalid maps base URL {url:?}: {source}")]
    BaseUrl {
        /// Offending value.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for maps requests.
pub const DEFAULT_USER_AGENT: &str = "wayfare-maps/0.1";

/// Base URL of the public Google Maps web services.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Placeholder substituted for the API key in URLs carried by errors.
const REDACTED: &str = "REDACTED";

/// Configuration for [`HttpMapsProvider`].
#[derive(Clone)]
pub struct HttpMapsProviderConfig {
    /// Base URL under which `directions/json` and `geocode/json` live.
    pub base_url: String,
    /// API key appended as the `key` query parameter.
    pub api_key: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpMapsProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMapsProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &REDACTED)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpMapsProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpMapsProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP maps provider for directions and reverse geocoding.
///
/// The provider owns a Tokio runtime that is reused across calls.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the stored runtime is used. Inside a
/// multi-threaded runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]) the caller's handle is used with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime the provider falls back to its own runtime, which
/// may deadlock if the caller's runtime drives IO this request depends on.
pub struct HttpMapsProvider {
    client: Client,
    config: HttpMapsProviderConfig,
    base_url: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpMapsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMapsProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpMapsProvider {
    /// Create a provider against [`DEFAULT_BASE_URL`] with the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpMapsProviderConfig::default().with_api_key(api_key))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpMapsProviderConfig) -> Result<Self, ProviderBuildError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|source| ProviderBuildError::BaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        if config.api_key.is_empty() {
            log::warn!("maps provider configured without an API key");
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            base_url,
            runtime,
        })
    }

    /// Build `{base_url}/{endpoint}?{params}&key={key}`.
    fn build_url(&self, endpoint: &str, params: &[(&str, String)], key: &str) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/{endpoint}", url.path().trim_end_matches('/'));
        url.set_path(&path);
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                query.append_pair(name, value);
            }
            query.append_pair("key", key);
        }
        url
    }

    /// Directions API URL; `redacted` swaps the key for a placeholder.
    fn directions_url(&self, origin: Coordinate, destination: Coordinate, redacted: bool) -> Url {
        let params = [
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
        ];
        self.build_url("directions/json", &params, self.key(redacted))
    }

    /// Reverse geocoding API URL; `redacted` swaps the key for a placeholder.
    fn geocode_url(&self, at: Coordinate, redacted: bool) -> Url {
        self.build_url("geocode/json", &[("latlng", at.to_string())], self.key(redacted))
    }

    fn key(&self, redacted: bool) -> &str {
        if redacted {
            REDACTED
        } else {
            &self.config.api_key
        }
    }

    /// Fetch and decode a JSON document.
    async fn fetch_json<T>(&self, url: Url, display_url: &str) -> Result<T, MapsError>
    where
        T: serde::de::DeserializeOwned,
    {
        log::debug!("GET {display_url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, display_url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, display_url))?;

        response.json().await.map_err(|err| MapsError::Parse {
            message: err.without_url().to_string(),
        })
    }

    /// Convert a reqwest error to a [`MapsError`].
    ///
    /// The error's own URL is stripped so the key never reaches logs.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> MapsError {
        if error.is_timeout() {
            return MapsError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        let message = strip_url(error);
        if let Some(status) = error.status() {
            return MapsError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
                message,
            };
        }

        MapsError::Network {
            url: url.to_owned(),
            message,
        }
    }

    /// Run `future` to completion from synchronous code.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}

fn strip_url(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    if let Some(url) = error.url() {
        message = message.replace(url.as_str(), "<maps request>");
    }
    message
}

/// Turn a directions payload into [`Directions`].
///
/// `REQUEST_DENIED` maps to [`MapsError::ApiConfiguration`]; every other
/// non-`OK` status, or `OK` without routes, maps to
/// [`MapsError::RouteNotFound`].
fn convert_directions(response: DirectionsResponse) -> Result<Directions, MapsError> {
    if response.status == STATUS_REQUEST_DENIED {
        return Err(MapsError::ApiConfiguration {
            message: response.error_message.unwrap_or_default(),
        });
    }
    if response.status != STATUS_OK {
        return Err(MapsError::RouteNotFound {
            status: response.status,
        });
    }
    let Some(payload) = response.routes.into_iter().next() else {
        return Err(MapsError::RouteNotFound {
            status: STATUS_ZERO_RESULTS.to_owned(),
        });
    };

    let route = polyline::decode(&payload.overview_polyline.points)?;
    let leg = payload.legs.into_iter().next();
    let (distance_text, duration_text) = leg.map_or_else(Default::default, |leg| {
        (
            leg.distance.map(|d| d.text).unwrap_or_default(),
            leg.duration.map(|d| d.text).unwrap_or_default(),
        )
    });
    let bounds = payload
        .bounds
        .map(|bounds| bounds.to_rect())
        .or_else(|| route.bounding_rect());
    Ok(Directions {
        route,
        distance_text,
        duration_text,
        bounds,
    })
}

/// First formatted address of an `OK` geocoding response.
fn convert_geocode(response: GeocodeResponse) -> Option<String> {
    if response.status != STATUS_OK {
        log::warn!(
            "reverse geocoding returned {}: {}",
            response.status,
            response.error_message.as_deref().unwrap_or("no details")
        );
        return None;
    }
    response
        .results
        .into_iter()
        .next()
        .map(|result| result.formatted_address)
}

impl DirectionsProvider for HttpMapsProvider {
    /// Fetch driving directions.
    ///
    /// # Runtime requirements
    ///
    /// Inside an existing Tokio runtime, the runtime must be multi-threaded;
    /// see the type-level documentation.
    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Directions, MapsError> {
        let url = self.directions_url(origin, destination, false);
        let display_url = self.directions_url(origin, destination, true);
        let response: DirectionsResponse =
            self.block_on(self.fetch_json(url, display_url.as_str()))?;
        let directions = convert_directions(response)?;
        log::debug!(
            "route from {origin} to {destination}: {} point(s), {}",
            directions.route.len(),
            directions.distance_text
        );
        Ok(directions)
    }
}

impl ReverseGeocoder for HttpMapsProvider {
    fn reverse_geocode(&self, at: Coordinate) -> Result<Option<String>, MapsError> {
        let url = self.geocode_url(at, false);
        let display_url = self.geocode_url(at, true);
        let response: GeocodeResponse = self.block_on(self.fetch_json(url, display_url.as_str()))?;
        Ok(convert_geocode(response))
    }
}
