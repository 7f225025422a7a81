use serde::Serialize;

use crate::providers::{
    CurrentQuery, ExtraComputation, HistoryQuery, ProviderError, ValidationSnafu,
};

/// Most hours of history the Air Quality API serves (30 days).
pub const MAX_HISTORY_HOURS: u32 = 720;
/// Largest page the Air Quality API accepts.
pub const MAX_PAGE_SIZE: u32 = 168;

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of a `history:lookup` call.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryLookupBody {
    pub location: LatLng,
    pub extra_computations: Vec<ExtraComputation>,
    pub hours: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub page_token: String,
    pub page_size: u32,
}

/// Body of a `currentConditions:lookup` call.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentLookupBody {
    pub location: LatLng,
    pub extra_computations: Vec<ExtraComputation>,
}

/// Rejects history queries the API would refuse anyway.
pub fn validate_history_query(query: &HistoryQuery) -> Result<(), ProviderError> {
    if query.window_hours == 0 || query.window_hours > MAX_HISTORY_HOURS {
        return ValidationSnafu {
            message: format!(
                "hours must be between 1 and {MAX_HISTORY_HOURS}, got {}",
                query.window_hours
            ),
        }
        .fail();
    }
    if query.hours == 0 || query.hours > query.window_hours {
        return ValidationSnafu {
            message: format!(
                "remaining hours {} outside the {}-hour window",
                query.hours, query.window_hours
            ),
        }
        .fail();
    }
    if query.page_size == 0 || query.page_size > MAX_PAGE_SIZE {
        return ValidationSnafu {
            message: format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                query.page_size
            ),
        }
        .fail();
    }
    validate_coordinates(query.latitude, query.longitude)
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ProviderError> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return ValidationSnafu {
            message: format!("coordinates out of range: {latitude}, {longitude}"),
        }
        .fail();
    }
    Ok(())
}

pub fn construct_history_body(query: &HistoryQuery) -> HistoryLookupBody {
    HistoryLookupBody {
        location: LatLng {
            latitude: query.latitude,
            longitude: query.longitude,
        },
        extra_computations: query.extra_computations.clone(),
        // a page token is only valid with the parameters of the call that issued it
        hours: query.window_hours,
        page_token: query.page_token.clone(),
        page_size: query.page_size,
    }
}

pub fn construct_current_body(query: &CurrentQuery) -> CurrentLookupBody {
    CurrentLookupBody {
        location: LatLng {
            latitude: query.latitude,
            longitude: query.longitude,
        },
        extra_computations: query.extra_computations.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::providers::HISTORY_PAGE_SIZE;

    fn query(hours: u32, page_token: &str) -> HistoryQuery {
        HistoryQuery {
            latitude: 37.41,
            longitude: -122.08,
            extra_computations: vec![
                ExtraComputation::DominantPollutantConcentration,
                ExtraComputation::PollutantConcentration,
            ],
            hours,
            window_hours: hours,
            page_token: page_token.to_string(),
            page_size: HISTORY_PAGE_SIZE,
        }
    }

    #[test]
    fn history_body_matches_wire_shape() {
        let body = serde_json::to_value(construct_history_body(&query(40, "abc"))).unwrap();
        assert_eq!(
            body,
            json!({
                "location": {"latitude": 37.41, "longitude": -122.08},
                "extraComputations": ["DOMINANT_POLLUTANT_CONCENTRATION", "POLLUTANT_CONCENTRATION"],
                "hours": 40,
                "pageToken": "abc",
                "pageSize": 72
            })
        );
    }

    #[test]
    fn first_page_omits_token() {
        let body = serde_json::to_value(construct_history_body(&query(3, ""))).unwrap();
        assert!(body.get("pageToken").is_none());
    }

    #[test]
    fn later_pages_send_the_window_not_the_remainder() {
        let mut q = query(168, "page-2");
        q.hours = 24;
        let body = serde_json::to_value(construct_history_body(&q)).unwrap();
        assert_eq!(body["hours"], 168);
        assert!(validate_history_query(&q).is_ok());

        q.hours = 169;
        assert!(validate_history_query(&q).is_err());
    }

    #[test]
    fn validation_bounds() {
        assert!(validate_history_query(&query(168, "")).is_ok());
        assert!(validate_history_query(&query(0, "")).is_err());
        assert!(validate_history_query(&query(721, "")).is_err());

        let mut q = query(10, "");
        q.latitude = 91.0;
        assert!(matches!(
            validate_history_query(&q),
            Err(ProviderError::Validation { .. })
        ));
    }
}
