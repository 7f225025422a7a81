//! Running statistics over hourly buckets, folded one page at a time.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::bucket::{Bucket, DisplayConcentration};

/// One point of the AQI chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiRow {
    pub date_time: DateTime<Utc>,
    pub aqi_code: String,
    pub aqi_display_name: String,
    pub aqi_value: i64,
    pub aqi_display_value: String,
}

/// One point of the dominant-pollutant chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantRow {
    pub dominant_pollutant_code: String,
    pub dominant_pollutant_display_name: String,
    pub dominant_pollutant_concentration: DisplayConcentration,
}

impl From<&Bucket> for AqiRow {
    fn from(b: &Bucket) -> Self {
        Self {
            date_time: b.timestamp,
            aqi_code: b.aqi_code.clone(),
            aqi_display_name: b.aqi_display_name.clone(),
            aqi_value: b.aqi_value,
            aqi_display_value: b.aqi_display_value.clone(),
        }
    }
}

impl From<&Bucket> for PollutantRow {
    fn from(b: &Bucket) -> Self {
        Self {
            dominant_pollutant_code: b.dominant_pollutant_code.clone(),
            dominant_pollutant_display_name: b.dominant_pollutant_display_name.clone(),
            dominant_pollutant_concentration: DisplayConcentration::from(
                &b.dominant_pollutant_concentration,
            ),
        }
    }
}

/// Totals, first/last readings and chart rows accumulated across pages.
///
/// Only [`fold`](Self::fold) changes it, and only by adding: totals grow, rows are
/// appended in arrival order, nothing is reordered or deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningAggregate {
    total_aqi: i64,
    total_pollutant_concentration: f64,
    first_aqi_value: Option<f64>,
    last_aqi_value: Option<f64>,
    buckets_seen: usize,
    aqi_rows: Vec<AqiRow>,
    pollutant_rows: Vec<PollutantRow>,
}

impl RunningAggregate {
    /// Folds one page of buckets, in order, into the aggregate.
    ///
    /// The first AQI is taken from the first bucket of the first non-empty page and is
    /// never replaced, even when it is 0. The last AQI is the final bucket of this page.
    pub fn fold(mut self, page: &[Bucket]) -> Self {
        for bucket in page {
            self.total_aqi += bucket.aqi_value;
            self.total_pollutant_concentration += bucket.dominant_pollutant_concentration.value;
            self.buckets_seen += 1;
            self.aqi_rows.push(AqiRow::from(bucket));
            self.pollutant_rows.push(PollutantRow::from(bucket));
        }
        if let (None, Some(first)) = (self.first_aqi_value, page.first()) {
            self.first_aqi_value = Some(first.aqi_value as f64);
        }
        if let Some(last) = page.last() {
            self.last_aqi_value = Some(last.aqi_value as f64);
        }
        self
    }

    pub fn total_aqi(&self) -> i64 {
        self.total_aqi
    }

    pub fn total_pollutant_concentration(&self) -> f64 {
        self.total_pollutant_concentration
    }

    pub fn first_aqi_value(&self) -> Option<f64> {
        self.first_aqi_value
    }

    pub fn last_aqi_value(&self) -> Option<f64> {
        self.last_aqi_value
    }

    pub fn buckets_seen(&self) -> usize {
        self.buckets_seen
    }

    pub fn aqi_rows(&self) -> &[AqiRow] {
        &self.aqi_rows
    }

    pub fn pollutant_rows(&self) -> &[PollutantRow] {
        &self.pollutant_rows
    }

    pub(crate) fn into_rows(self) -> (Vec<AqiRow>, Vec<PollutantRow>) {
        (self.aqi_rows, self.pollutant_rows)
    }
}
