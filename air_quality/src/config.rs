//! Service settings: parsing, defaults, and normalization.
//!
//! Settings live in a TOML file. Every key is optional; anything left out falls back to
//! the defaults below, which point at the public Google endpoints and a default
//! location in Mountain View, CA.
//!
//! ```toml
//! default_latitude = 51.5072
//! default_longitude = -0.1276
//! default_time_zone = "Europe/London"
//! default_address = "London, UK"
//! requests_per_minute = 120
//! supported_countries = ["GB", "ie", "fr"]
//! ```
//!
//! Normalization trims and lowercases the country list and drops duplicates while
//! keeping the first occurrence. The API key is never part of the file; it comes from
//! the environment (see [`crate::providers::google_rest::API_KEY_ENV`]).

use std::{collections::HashSet, path::Path};

use anyhow::{Context, bail};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::providers::{
    HISTORY_PAGE_SIZE,
    google_rest::{DEFAULT_AIR_QUALITY_BASE_URL, DEFAULT_GEOCODING_BASE_URL, params::MAX_PAGE_SIZE},
};

pub const DEFAULT_LATITUDE: f64 = 37.4125;
pub const DEFAULT_LONGITUDE: f64 = -122.0841;
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Los_Angeles;
pub const DEFAULT_ADDRESS: &str = "CW98+VV Mountain View, CA, USA";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub air_quality_base_url: String,
    pub geocoding_base_url: String,

    /// Used whenever a request leaves latitude or longitude unset.
    pub default_latitude: f64,
    pub default_longitude: f64,
    /// Zone for the default location, and the fallback for unresolvable zones.
    pub default_time_zone: Tz,
    /// Display address reported for the default location (it is never geocoded).
    pub default_address: String,

    /// Buckets requested per history page.
    pub page_size: u32,

    /// Client-side throttle applied to every upstream call. `None` disables it.
    pub requests_per_minute: Option<u32>,

    /// Overrides the built-in allow-list when present.
    pub supported_countries: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            air_quality_base_url: DEFAULT_AIR_QUALITY_BASE_URL.to_string(),
            geocoding_base_url: DEFAULT_GEOCODING_BASE_URL.to_string(),
            default_latitude: DEFAULT_LATITUDE,
            default_longitude: DEFAULT_LONGITUDE,
            default_time_zone: DEFAULT_TIME_ZONE,
            default_address: DEFAULT_ADDRESS.to_string(),
            page_size: HISTORY_PAGE_SIZE,
            requests_per_minute: None,
            supported_countries: None,
        }
    }
}

impl Settings {
    /// Validate and canonicalize in place.
    ///
    /// Errors:
    /// - default coordinates that are zero (they would read as "unset") or out of range
    /// - a page size outside 1..=168
    /// - a country code that is not two ASCII letters after trimming
    pub fn normalize(&mut self) -> anyhow::Result<()> {
        if self.default_latitude == 0.0 || self.default_longitude == 0.0 {
            bail!("default coordinates must be non-zero");
        }
        if !(-90.0..=90.0).contains(&self.default_latitude)
            || !(-180.0..=180.0).contains(&self.default_longitude)
        {
            bail!(
                "default coordinates out of range: {}, {}",
                self.default_latitude,
                self.default_longitude
            );
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            bail!("page_size must be between 1 and {MAX_PAGE_SIZE}");
        }
        if self.air_quality_base_url.trim().is_empty() || self.geocoding_base_url.trim().is_empty() {
            bail!("base urls cannot be empty");
        }

        if let Some(list) = self.supported_countries.take() {
            let mut seen = HashSet::new();
            let mut out = Vec::with_capacity(list.len());
            for raw in list {
                let code = raw.trim().to_lowercase();
                if code.len() != 2 || !code.chars().all(|c| c.is_ascii_lowercase()) {
                    bail!("invalid country code in supported_countries: {raw:?}");
                }
                if seen.insert(code.clone()) {
                    out.push(code);
                }
            }
            self.supported_countries = Some(out);
        }
        Ok(())
    }
}

/// Parse + normalize settings from a TOML string.
pub fn load_settings_str(s: &str) -> anyhow::Result<Settings> {
    let mut settings: Settings = toml::from_str(s).context("parse settings toml")?;
    settings.normalize()?;
    Ok(settings)
}

/// Parse + normalize settings from a file path.
pub fn load_settings_path(p: impl AsRef<Path>) -> anyhow::Result<Settings> {
    let path = p.as_ref();
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read settings file {}", path.display()))?;
    load_settings_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let s = load_settings_str("").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.default_time_zone, chrono_tz::America::Los_Angeles);
        assert_eq!(s.page_size, 72);
    }

    #[test]
    fn countries_are_lowercased_and_deduped() {
        let s = load_settings_str(r#"supported_countries = [" GB", "gb", "Fr", "ie"]"#).unwrap();
        assert_eq!(
            s.supported_countries.unwrap(),
            vec!["gb".to_string(), "fr".to_string(), "ie".to_string()]
        );
    }

    #[test]
    fn bad_country_code_errors() {
        let err = load_settings_str(r#"supported_countries = ["gb", ""]"#).unwrap_err();
        assert!(err.to_string().contains("invalid country code"));

        assert!(load_settings_str(r#"supported_countries = ["gbr"]"#).is_err());
    }

    #[test]
    fn bad_time_zone_is_a_parse_error() {
        assert!(load_settings_str(r#"default_time_zone = "Mars/Olympus_Mons""#).is_err());

        let s = load_settings_str(r#"default_time_zone = "Asia/Tokyo""#).unwrap();
        assert_eq!(s.default_time_zone, chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(load_settings_str("api_key = \"oops\"").is_err());
    }

    #[test]
    fn zero_default_coordinates_are_rejected() {
        assert!(load_settings_str("default_latitude = 0.0").is_err());
        assert!(load_settings_str("page_size = 0").is_err());
        assert!(load_settings_str("page_size = 169").is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "default_latitude = 51.5072\ndefault_longitude = -0.1276\nrequests_per_minute = 60\n",
        )
        .unwrap();

        let s = load_settings_path(&path).unwrap();
        assert_eq!(s.default_latitude, 51.5072);
        assert_eq!(s.requests_per_minute, Some(60));

        let missing = load_settings_path(dir.path().join("nope.toml")).unwrap_err();
        assert!(missing.to_string().contains("read settings file"));
    }
}
