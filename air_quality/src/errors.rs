use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::{
    pipeline::summary::SummaryError,
    providers::{ProviderError, ProviderInitError},
};

/// The unified error type for the `air_quality` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Reverse geocoding failed or returned nothing for the coordinates.
    #[error("Location not found: {0}")]
    LocationNotFound(#[source] ProviderError),

    /// The coordinates resolved to a country outside the allow-list.
    #[error("Location not supported (country: {country:?})")]
    LocationUnsupported { country: Option<String> },

    /// The lookup upstream failed; the aggregation was abandoned.
    #[error("Upstream error: {0}")]
    Upstream(#[from] ProviderError),

    /// The upstream returned no buckets while history was still owed.
    #[error("Upstream returned an empty page with {remaining} hours still requested")]
    EmptyPage { remaining: i64 },

    /// The window could not be summarized.
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// A provider could not be constructed.
    #[error("Provider initialization failed: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller's overall deadline passed.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// A response payload could not be encoded.
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`], stable for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    LocationNotFound,
    LocationUnsupported,
    UpstreamError,
    NoData,
    DivisionByZero,
    Config,
    Timeout,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::LocationNotFound(_) => ErrorKind::LocationNotFound,
            Error::LocationUnsupported { .. } => ErrorKind::LocationUnsupported,
            Error::Upstream(_) | Error::EmptyPage { .. } => ErrorKind::UpstreamError,
            Error::Summary(SummaryError::NoData) => ErrorKind::NoData,
            Error::Summary(SummaryError::ZeroBaseline) => ErrorKind::DivisionByZero,
            Error::ProviderInit(_) | Error::Config(_) => ErrorKind::Config,
            Error::Timeout(_) => ErrorKind::Timeout,
            Error::Encode(_) => ErrorKind::Internal,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// What a failed request returns to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}
