//! Resolves where a request is for, and whether that place is supported.

use crate::{
    config::Settings,
    countries::SupportedCountries,
    errors::Error,
    models::location::RawLocationRequest,
    providers::GeocodingProvider,
};

/// A location that passed the allow-list (or is the default location).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Formatted address for display.
    pub address: String,
    /// Lowercased country code; `None` for the default location.
    pub country_code: Option<String>,
    pub is_default: bool,
}

/// Reverse-geocodes explicit coordinates and applies the country allow-list.
///
/// Requests with an unset coordinate get the configured default location, which is
/// neither geocoded nor checked against the allow-list.
///
/// Errors:
/// - [`Error::LocationNotFound`] when geocoding fails or has no result
/// - [`Error::LocationUnsupported`] when the result has no country or one not allowed
pub async fn resolve_location(
    geocoder: &dyn GeocodingProvider,
    countries: &SupportedCountries,
    settings: &Settings,
    raw: &RawLocationRequest,
) -> Result<ResolvedLocation, Error> {
    if raw.uses_default_location() {
        return Ok(ResolvedLocation {
            latitude: settings.default_latitude,
            longitude: settings.default_longitude,
            address: settings.default_address.clone(),
            country_code: None,
            is_default: true,
        });
    }

    let place = geocoder
        .reverse_geocode(raw.latitude, raw.longitude)
        .await
        .map_err(|e| {
            tracing::warn!("error decoding location: {e}");
            Error::LocationNotFound(e)
        })?;
    tracing::info!(address = %place.formatted_address, "resolved location");

    let country = place.country_code.map(|c| c.to_lowercase());
    match country {
        Some(code) if countries.is_supported(&code) => Ok(ResolvedLocation {
            latitude: raw.latitude,
            longitude: raw.longitude,
            address: place.formatted_address,
            country_code: Some(code),
            is_default: false,
        }),
        other => {
            tracing::info!(country = ?other, "unsupported location");
            Err(Error::LocationUnsupported { country: other })
        }
    }
}
