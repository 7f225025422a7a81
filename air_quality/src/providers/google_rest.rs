//! Google Maps Platform implementations of the provider traits.
//!
//! - [`GoogleAirQualityProvider`]: Air Quality API (`history:lookup`, `currentConditions:lookup`).
//! - [`GoogleGeocoder`]: Geocoding API reverse lookups.
//!
//! Both read the API key from [`API_KEY_ENV`] and can be throttled client-side with a
//! requests-per-minute quota.

pub mod geocoding;
pub mod params;
pub mod provider;
pub mod response;

use std::num::NonZeroU32;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use secrecy::SecretString;
use shared_utils::env::get_env_var;
use snafu::ResultExt;

pub use geocoding::GoogleGeocoder;
pub use provider::GoogleAirQualityProvider;

use crate::providers::{InvalidSettingSnafu, MissingEnvVarSnafu, ProviderInitError};

/// Environment variable holding the Google Maps Platform API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Default Air Quality API base URL.
pub const DEFAULT_AIR_QUALITY_BASE_URL: &str = "https://airquality.googleapis.com/v1";

/// Default Geocoding API base URL.
pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode";

/// Reads the API key from [`API_KEY_ENV`].
pub fn api_key_from_env() -> Result<SecretString, ProviderInitError> {
    let key = get_env_var(API_KEY_ENV).context(MissingEnvVarSnafu)?;
    Ok(SecretString::new(key.into()))
}

/// Builds an evenly spaced limiter (no bursts) for `requests_per_minute`.
///
/// `None` disables throttling; `Some(0)` is rejected.
pub(crate) fn build_limiter(
    requests_per_minute: Option<u32>,
) -> Result<Option<DefaultDirectRateLimiter>, ProviderInitError> {
    let Some(rpm) = requests_per_minute else {
        return Ok(None);
    };
    let Some(rpm) = NonZeroU32::new(rpm) else {
        return InvalidSettingSnafu {
            message: "requests_per_minute must be greater than zero".to_string(),
        }
        .fail();
    };
    let quota = Quota::per_minute(rpm).allow_burst(nonzero!(1u32));
    Ok(Some(RateLimiter::direct(quota)))
}

/// Waits for the limiter, if there is one.
pub(crate) async fn throttle(limiter: Option<&DefaultDirectRateLimiter>) {
    if let Some(limiter) = limiter {
        limiter.until_ready().await;
    }
}

/// Joins a base URL and a path segment without doubling or dropping the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
