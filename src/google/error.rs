use thiserror::Error;

/// Failure of a single Google Maps Platform call
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{service} API key is not configured (set GOOGLE_API_KEY)")]
    Unconfigured { service: &'static str },

    #[error("{service} API returned {status}: {message}")]
    Status {
        service: &'static str,
        status: String,
        message: String,
    },

    #[error("{service} API returned no data")]
    NoData { service: &'static str },

    #[error("Invalid {service} API response: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },

    #[error("Request error: {0:#}")]
    Request(#[from] reqwest::Error),

    #[error("Request error: {0:#}")]
    Middleware(#[from] reqwest_middleware::Error),
}

impl ApiError {
    /// Upstream answered but had nothing for the query
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NoData { .. })
    }

    /// Missing credentials rather than an upstream problem
    #[must_use]
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, ApiError::Unconfigured { .. })
    }
}
