//! Payload for the current-conditions lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::bucket::DisplayConcentration;

/// RGBA color the upstream attaches to an index category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexColor {
    #[serde(default)]
    pub red: f64,
    #[serde(default)]
    pub green: f64,
    #[serde(default)]
    pub blue: f64,
    #[serde(default)]
    pub alpha: f64,
}

/// Where a pollutant comes from and what it does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantInfo {
    #[serde(default)]
    pub sources: String,
    #[serde(default)]
    pub effects: String,
}

/// The latest air-quality reading at a point, as returned by a lookup provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentReading {
    pub date_time: DateTime<Utc>,
    pub region_code: String,
    pub aqi_code: String,
    pub aqi_display_name: String,
    pub aqi_value: i64,
    pub aqi_value_display: String,
    pub aqi_color: IndexColor,
    pub aqi_category: String,
    pub dominant_pollutant_code: String,
    pub dominant_pollutant_display_name: String,
    pub dominant_pollutant_full_name: String,
    pub dominant_pollutant_concentration: DisplayConcentration,
    pub dominant_pollutant_additional_info: PollutantInfo,
}

/// A [`CurrentReading`] together with the display address it was resolved for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    #[serde(flatten)]
    pub reading: CurrentReading,
    /// Formatted address of the resolved location.
    pub location: String,
}
