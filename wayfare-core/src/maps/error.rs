use thiserror::Error;

use crate::PolylineError;

/// Failures talking to the maps service.
///
/// All of them are terminal for the request that raised them: nothing is
/// retried automatically.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapsError {
    /// The route geometry could not be decoded.
    #[error("failed to decode route polyline: {0}")]
    Decode(#[from] PolylineError),
    /// The service answered but found no usable route.
    #[error("no route found (status {status})")]
    RouteNotFound {
        /// Status reported by the service.
        status: String,
    },
    /// The service refused the API key (`REQUEST_DENIED`).
    #[error("maps API request denied: {message}")]
    ApiConfiguration {
        /// Explanation supplied by the service, if any.
        message: String,
    },
    /// The request could not be delivered.
    #[error("network error for {url}: {message}")]
    Network {
        /// Request URL with credentials removed.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL with credentials removed.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpStatus {
        /// Request URL with credentials removed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body was not the expected JSON.
    #[error("failed to parse maps response: {message}")]
    Parse {
        /// Parser error description.
        message: String,
    },
}

impl MapsError {
    /// Text to show the rider when this error ends a request.
    ///
    /// # Examples
    /// ```
    /// use wayfare_core::MapsError;
    ///
    /// let err = MapsError::RouteNotFound { status: "ZERO_RESULTS".into() };
    /// assert_eq!(err.user_message(), "Could not find route: ZERO_RESULTS");
    /// ```
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiConfiguration { .. } => "The directions service is not enabled for this \
                 API key. Enable it in the maps provider console and try again in a few \
                 minutes."
                .to_owned(),
            Self::RouteNotFound { status } => format!("Could not find route: {status}"),
            Self::Network { .. } | Self::Timeout { .. } | Self::HttpStatus { .. } => {
                "Failed to fetch route. Please check your internet connection.".to_owned()
            }
            Self::Decode(_) | Self::Parse { .. } => {
                "The route returned by the server could not be read.".to_owned()
            }
        }
    }

    /// Whether the failure points at service configuration rather than the
    /// rider's input or connectivity.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::ApiConfiguration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MapsError::Network { url: "u".into(), message: "refused".into() })]
    #[case(MapsError::Timeout { url: "u".into(), timeout_secs: 30 })]
    #[case(MapsError::HttpStatus { url: "u".into(), status: 502, message: "bad gateway".into() })]
    fn transport_failures_share_a_connectivity_message(#[case] err: MapsError) {
        assert!(err.user_message().contains("internet connection"));
        assert!(!err.is_configuration_error());
    }

    #[rstest]
    fn denied_requests_get_an_actionable_message() {
        let err = MapsError::ApiConfiguration {
            message: String::new(),
        };
        assert!(err.is_configuration_error());
        assert!(err.user_message().contains("not enabled"));
    }

    #[rstest]
    fn decode_errors_convert_from_polyline_errors() {
        let err: MapsError = PolylineError::Truncated { offset: 3 }.into();
        assert!(matches!(err, MapsError::Decode(_)));
    }
}
