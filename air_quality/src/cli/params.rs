use std::path::Path;

use crate::{
    config::{Settings, load_settings_path},
    errors::Error,
    models::location::RawLocationRequest,
};

/// Builds an unvalidated request from command-line flags.
///
/// Unset flags map to the same "not supplied" values a client would send, so the
/// normalizer treats them identically.
pub fn raw_request(
    latitude: Option<f64>,
    longitude: Option<f64>,
    range: Option<&str>,
    time_zone: Option<&str>,
) -> RawLocationRequest {
    RawLocationRequest {
        latitude: latitude.unwrap_or_default(),
        longitude: longitude.unwrap_or_default(),
        chart_range: range.unwrap_or_default().to_string(),
        time_zone: time_zone.unwrap_or_default().to_string(),
    }
}

/// Loads settings from `path`, or the built-in defaults without one.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, Error> {
    match path {
        Some(p) => load_settings_path(p).map_err(|e| Error::Config(format!("{e:#}"))),
        None => Ok(Settings::default()),
    }
}
