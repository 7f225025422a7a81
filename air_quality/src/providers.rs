//! Provider abstraction for the external capabilities the pipeline consumes.
//!
//! This module defines two traits:
//!
//! - [`LookupProvider`]: air-quality readings, either one page of hourly history or the
//!   current conditions at a point.
//! - [`GeocodingProvider`]: reverse geocoding of a coordinate to a display address and a
//!   country code.
//!
//! Each concrete upstream (currently Google, see [`google_rest`]) implements these traits
//! to handle vendor-specific API details. Both traits are async and object safe, so the
//! service holds them as `Arc<dyn LookupProvider>` and tests substitute fakes.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use air_quality::models::current::CurrentReading;
//! use air_quality::providers::{
//!     CurrentQuery, HistoryPage, HistoryQuery, LookupProvider, ProviderError,
//! };
//!
//! struct NoHistory;
//!
//! #[async_trait]
//! impl LookupProvider for NoHistory {
//!     async fn lookup_history(&self, _query: &HistoryQuery) -> Result<HistoryPage, ProviderError> {
//!         Ok(HistoryPage::default())
//!     }
//!
//!     async fn lookup_current(&self, _query: &CurrentQuery) -> Result<CurrentReading, ProviderError> {
//!         Err(ProviderError::not_found("no readings here"))
//!     }
//! }
//! ```

pub mod google_rest;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{bucket::Bucket, current::CurrentReading};

/// Largest number of hourly buckets requested per history page.
pub const HISTORY_PAGE_SIZE: u32 = 72;

/// Optional values the upstream computes on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtraComputation {
    DominantPollutantConcentration,
    PollutantConcentration,
    PollutantAdditionalInfo,
}

/// One page of a history walk.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub extra_computations: Vec<ExtraComputation>,
    /// Hours of history still wanted, counting back from now.
    pub hours: u32,
    /// Size of the whole window the walk was started for. Stays the same on every page
    /// of one walk, since the upstream ties a page token to the original parameters.
    pub window_hours: u32,
    /// Cursor from the previous page; empty for the first page.
    pub page_token: String,
    pub page_size: u32,
}

/// A current-conditions lookup at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub extra_computations: Vec<ExtraComputation>,
}

/// Buckets returned by one history call plus the cursor for the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryPage {
    pub buckets: Vec<Bucket>,
    /// Empty when the upstream has nothing further.
    pub next_page_token: String,
}

/// Result of reverse geocoding a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub formatted_address: String,
    /// ISO 3166-1 alpha-2 code as reported upstream (any case), if the result had one.
    pub country_code: Option<String>,
}

/// Source of hourly air-quality readings.
///
/// Implement this for each concrete upstream. Calls are single-shot: implementations must
/// not retry internally, a failure is surfaced to the pipeline as-is.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Fetches one page of hourly history ending at "now".
    async fn lookup_history(&self, query: &HistoryQuery) -> Result<HistoryPage, ProviderError>;

    /// Fetches the latest reading at a point.
    async fn lookup_current(&self, query: &CurrentQuery) -> Result<CurrentReading, ProviderError>;
}

/// Reverse geocoding capability.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Resolves a coordinate to an address.
    ///
    /// Returns [`ProviderError::NotFound`] when the upstream has no result for the point.
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<GeocodedPlace, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("{source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// A configured value the provider needs is unusable.
    #[snafu(display("Invalid provider setting: {message}"))]
    InvalidSetting {
        message: String,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a provider implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// Transport failure, or a body that could not be decoded.
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The upstream answered with a non-success status.
    #[snafu(display("API error ({status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The upstream answered 2xx but reported a failure status in the body.
    #[snafu(display("API rejected the request ({status}): {message}"))]
    Rejected {
        status: String,
        message: String,
        backtrace: Backtrace,
    },

    /// The query parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// The upstream had no result for the query.
    #[snafu(display("Not found: {message}"))]
    NotFound {
        message: String,
        backtrace: Backtrace,
    },

    /// The upstream answered successfully but the payload is missing required parts.
    #[snafu(display("Malformed upstream response: {message}"))]
    Malformed {
        message: String,
        backtrace: Backtrace,
    },
}

impl ProviderError {
    pub fn not_found(message: impl Into<String>) -> Self {
        NotFoundSnafu {
            message: message.into(),
        }
        .build()
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ApiSnafu {
            status,
            message: message.into(),
        }
        .build()
    }

    pub fn rejected(status: impl Into<String>, message: impl Into<String>) -> Self {
        RejectedSnafu {
            status: status.into(),
            message: message.into(),
        }
        .build()
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        MalformedSnafu {
            message: message.into(),
        }
        .build()
    }
}
