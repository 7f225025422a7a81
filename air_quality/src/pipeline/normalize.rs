//! Request normalization: defaults, range coercion, time-zone repair, window size.
//!
//! Malformed input never fails a request. Each repair is recorded as a [`Correction`]
//! and logged, so callers and tests can see it happened without it affecting the
//! success path.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::{
    config::Settings,
    models::location::{ChartRange, LocationRequest, RawLocationRequest},
};

/// Length of the week window, in hours.
pub const WEEK_HOURS: u32 = 7 * 24;

/// A silent repair applied to a raw request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// Latitude or longitude was unset; the configured default location was used.
    DefaultLocation,
    /// The range selector was not `day`/`week`; `day` was used.
    RangeCoerced { supplied: String },
    /// The time zone did not resolve; the configured default zone was used.
    TimeZoneFallback { supplied: String },
}

/// A normalized request plus the repairs it needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub request: LocationRequest,
    pub corrections: Vec<Correction>,
}

pub fn normalize(raw: &RawLocationRequest, settings: &Settings) -> Normalized {
    let mut corrections = Vec::new();

    let (latitude, longitude, time_zone) = if raw.uses_default_location() {
        corrections.push(Correction::DefaultLocation);
        (
            settings.default_latitude,
            settings.default_longitude,
            settings.default_time_zone,
        )
    } else {
        let tz = match raw.time_zone.trim().parse::<Tz>() {
            Ok(tz) => tz,
            Err(e) => {
                tracing::warn!(
                    supplied = %raw.time_zone,
                    fallback = %settings.default_time_zone,
                    "could not load time zone ({e}), using fallback"
                );
                corrections.push(Correction::TimeZoneFallback {
                    supplied: raw.time_zone.clone(),
                });
                settings.default_time_zone
            }
        };
        (raw.latitude, raw.longitude, tz)
    };

    // an absent selector is simply the default, not a correction
    let range = if raw.chart_range.trim().is_empty() {
        ChartRange::Day
    } else {
        raw.chart_range.parse::<ChartRange>().unwrap_or_else(|e| {
            tracing::warn!("{e}, using {}", ChartRange::Day);
            corrections.push(Correction::RangeCoerced {
                supplied: raw.chart_range.clone(),
            });
            ChartRange::Day
        })
    };

    Normalized {
        request: LocationRequest {
            latitude,
            longitude,
            range,
            time_zone,
        },
        corrections,
    }
}

/// Hours of history the request covers at instant `now`.
///
/// `Day` is the local hour-of-day in the request's zone, so it is 0 right after local
/// midnight and nothing is fetched. `Week` is always [`WEEK_HOURS`].
pub fn hours_for(request: &LocationRequest, now: DateTime<Utc>) -> u32 {
    match request.range {
        ChartRange::Day => now.with_timezone(&request.time_zone).hour(),
        ChartRange::Week => WEEK_HOURS,
    }
}
