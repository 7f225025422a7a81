//! Final chart summary derived from a [`RunningAggregate`].

use serde::Serialize;
use thiserror::Error;

use crate::pipeline::aggregate::{AqiRow, PollutantRow, RunningAggregate};

/// Why a window could not be summarized.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SummaryError {
    /// No buckets were accumulated, so there is nothing to average.
    #[error("cannot summarize an empty window: no readings in the requested range")]
    NoData,

    /// The first reading is 0, so a percentage change against it is undefined.
    #[error("cannot summarize window: baseline AQI is zero, percentage change is undefined")]
    ZeroBaseline,
}

/// Chart-ready summary of a history window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub aqi_rows: Vec<AqiRow>,
    pub pollutant_rows: Vec<PollutantRow>,
    /// Mean AQI, truncated toward zero.
    #[serde(rename = "averageAqiValue")]
    pub average_aqi: i64,
    #[serde(rename = "averageDominantPollutantValue")]
    pub average_dominant_pollutant_concentration: f64,
    /// `(first - last) / first * 100`; positive means the air got cleaner.
    pub percentage_change_in_aqi: f64,
}

/// Turns the accumulated state into a [`SummaryResult`].
///
/// Errors:
/// - [`SummaryError::NoData`] when no bucket was folded
/// - [`SummaryError::ZeroBaseline`] when the first reading is 0
pub fn summarize(aggregate: RunningAggregate) -> Result<SummaryResult, SummaryError> {
    let count = aggregate.buckets_seen();
    let (Some(first), Some(last)) = (aggregate.first_aqi_value(), aggregate.last_aqi_value())
    else {
        return Err(SummaryError::NoData);
    };
    if count == 0 {
        return Err(SummaryError::NoData);
    }
    if first == 0.0 {
        return Err(SummaryError::ZeroBaseline);
    }

    // integer division truncates toward zero
    let average_aqi = aggregate.total_aqi() / count as i64;
    let average_dominant_pollutant_concentration =
        aggregate.total_pollutant_concentration() / count as f64;
    let percentage_change_in_aqi = (first - last) / first * 100.0;

    let (aqi_rows, pollutant_rows) = aggregate.into_rows();
    Ok(SummaryResult {
        aqi_rows,
        pollutant_rows,
        average_aqi,
        average_dominant_pollutant_concentration,
        percentage_change_in_aqi,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::bucket::{Bucket, Concentration};

    fn bucket(aqi: i64, conc: f64) -> Bucket {
        Bucket {
            timestamp: Utc::now(),
            aqi_code: "usa_epa".into(),
            aqi_display_name: "AQI (US)".into(),
            aqi_value: aqi,
            aqi_display_value: aqi.to_string(),
            dominant_pollutant_code: "o3".into(),
            dominant_pollutant_display_name: "O3".into(),
            dominant_pollutant_concentration: Concentration::new(conc, "PARTS_PER_BILLION"),
        }
    }

    #[test]
    fn three_bucket_window() {
        let agg = RunningAggregate::default().fold(&[
            bucket(10, 1.0),
            bucket(20, 2.0),
            bucket(30, 6.0),
        ]);
        let summary = summarize(agg).unwrap();

        assert_eq!(summary.average_aqi, 20);
        assert_eq!(summary.average_dominant_pollutant_concentration, 3.0);
        assert_eq!(summary.percentage_change_in_aqi, -200.0);
        assert_eq!(summary.aqi_rows.len(), 3);
    }

    #[test]
    fn average_truncates() {
        // 10 + 11 = 21, 21 / 2 = 10.5 -> 10
        let agg = RunningAggregate::default().fold(&[bucket(10, 0.0), bucket(11, 0.0)]);
        assert_eq!(summarize(agg).unwrap().average_aqi, 10);
    }

    #[test]
    fn improving_air_is_positive_change() {
        let agg = RunningAggregate::default().fold(&[bucket(80, 0.0), bucket(60, 0.0)]);
        assert_eq!(summarize(agg).unwrap().percentage_change_in_aqi, 25.0);
    }

    #[test]
    fn empty_window_is_no_data() {
        assert_eq!(
            summarize(RunningAggregate::default()).unwrap_err(),
            SummaryError::NoData
        );
    }

    #[test]
    fn zero_baseline_is_an_error_not_infinity() {
        let agg = RunningAggregate::default().fold(&[bucket(0, 1.0), bucket(25, 1.0)]);
        assert_eq!(summarize(agg).unwrap_err(), SummaryError::ZeroBaseline);
    }

    #[test]
    fn serializes_with_chart_field_names() {
        let agg = RunningAggregate::default().fold(&[bucket(42, 3.0)]);
        let json = serde_json::to_value(summarize(agg).unwrap()).unwrap();

        assert_eq!(json["averageAqiValue"], 42);
        assert_eq!(json["averageDominantPollutantValue"], 3.0);
        assert_eq!(json["percentageChangeInAqi"], 0.0);
        assert_eq!(json["aqiRows"][0]["aqiDisplayValue"], "42");
        assert_eq!(
            json["pollutantRows"][0]["dominantPollutantConcentration"]["symbol"],
            "ppb"
        );
    }
}
