//! Location + time-range requests, before and after normalization.

use std::{fmt, str::FromStr};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Coarse history range a chart can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartRange {
    /// Hours elapsed so far in the current local day.
    #[default]
    Day,
    /// The last 168 hours.
    Week,
}

impl ChartRange {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChartRange::Day => "day",
            ChartRange::Week => "week",
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised by [`ChartRange::from_str`] for anything but `day`/`week`.
#[derive(Debug, thiserror::Error)]
#[error("unknown chart range: {0}")]
pub struct UnknownChartRange(pub String);

impl FromStr for ChartRange {
    type Err = UnknownChartRange;

    /// Case-insensitive: `"Week"` and `"WEEK"` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(ChartRange::Day),
            "week" => Ok(ChartRange::Week),
            _ => Err(UnknownChartRange(s.to_string())),
        }
    }
}

/// A request as it arrives from a client. Nothing here has been validated.
///
/// A latitude or longitude of exactly `0.0` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub chart_range: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

impl RawLocationRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Default::default()
        }
    }

    pub fn with_range(mut self, chart_range: impl Into<String>) -> Self {
        self.chart_range = chart_range.into();
        self
    }

    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// True when either coordinate is the "unset" sentinel.
    pub fn uses_default_location(&self) -> bool {
        self.latitude == 0.0 || self.longitude == 0.0
    }
}

/// A normalized request: coordinates filled in, range and time zone resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub range: ChartRange,
    pub time_zone: Tz,
}
