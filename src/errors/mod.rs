/// Unified error handling module
use thiserror::Error;

/// Failure of a single call against the remote analysis service.
///
/// These never reach the presentation layer: the loaders convert them into
/// fallback lookups at the component boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Service error: upstream returned {status}")]
    Service { status: u16 },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Service returned an empty catalog")]
    EmptyCatalog,
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "NETWORK_ERROR",
            FetchError::Service { status } => match status {
                403 => "UPSTREAM_403",
                404 => "UPSTREAM_404",
                429 => "UPSTREAM_429",
                500..=599 => "UPSTREAM_5XX",
                _ => "UPSTREAM_ERROR",
            },
            FetchError::Parse(_) => "PARSE_ERROR",
            FetchError::EmptyCatalog => "EMPTY_CATALOG",
            FetchError::InvalidUrl(_) => "INVALID_URL",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Service {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Conditions that are allowed to propagate to the view-state controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("No data available for city '{city_id}'")]
    DataUnavailable { city_id: String },
    #[error("No city selected")]
    EmptySelection,
}

/// Type alias for remote call results
pub type FetchResult<T> = Result<T, FetchError>;
