#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use air_quality::{
    models::{
        bucket::{Bucket, Concentration, DisplayConcentration},
        current::{CurrentReading, IndexColor, PollutantInfo},
    },
    providers::{
        CurrentQuery, GeocodedPlace, GeocodingProvider, HistoryPage, HistoryQuery, LookupProvider,
        ProviderError,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

pub fn bucket(hour: i64, aqi: i64, concentration: f64) -> Bucket {
    Bucket {
        timestamp: t0() + Duration::hours(hour),
        aqi_code: "uaqi".into(),
        aqi_display_name: "Universal AQI".into(),
        aqi_value: aqi,
        aqi_display_value: aqi.to_string(),
        dominant_pollutant_code: "pm25".into(),
        dominant_pollutant_display_name: "PM2.5".into(),
        dominant_pollutant_concentration: Concentration::new(
            concentration,
            "MICROGRAMS_PER_CUBIC_METER",
        ),
    }
}

pub fn page(aqi: &[i64], next_page_token: &str) -> HistoryPage {
    HistoryPage {
        buckets: aqi
            .iter()
            .enumerate()
            .map(|(i, &v)| bucket(i as i64, v, v as f64 / 2.0))
            .collect(),
        next_page_token: next_page_token.to_string(),
    }
}

pub fn reading() -> CurrentReading {
    CurrentReading {
        date_time: t0(),
        region_code: "us".into(),
        aqi_code: "uaqi".into(),
        aqi_display_name: "Universal AQI".into(),
        aqi_value: 74,
        aqi_value_display: "74".into(),
        aqi_color: IndexColor {
            red: 0.4,
            green: 0.8,
            blue: 0.2,
            alpha: 0.0,
        },
        aqi_category: "Good air quality".into(),
        dominant_pollutant_code: "o3".into(),
        dominant_pollutant_display_name: "O3".into(),
        dominant_pollutant_full_name: "Ozone".into(),
        dominant_pollutant_concentration: DisplayConcentration::from(&Concentration::new(
            31.2,
            "PARTS_PER_BILLION",
        )),
        dominant_pollutant_additional_info: PollutantInfo {
            sources: "Formed from other pollutants in sunlight.".into(),
            effects: "Irritates the airways.".into(),
        },
    }
}

/// Serves history pages from a queue, in order, and records every query.
///
/// Once the queue is drained it answers with empty pages.
#[derive(Default)]
pub struct ScriptedLookup {
    pages: Mutex<VecDeque<Result<HistoryPage, ProviderError>>>,
    history_queries: Mutex<Vec<HistoryQuery>>,
    current_queries: Mutex<Vec<CurrentQuery>>,
}

impl ScriptedLookup {
    pub fn new(pages: Vec<Result<HistoryPage, ProviderError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    pub fn history_queries(&self) -> Vec<HistoryQuery> {
        self.history_queries.lock().unwrap().clone()
    }

    pub fn current_queries(&self) -> Vec<CurrentQuery> {
        self.current_queries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.history_queries.lock().unwrap().len() + self.current_queries.lock().unwrap().len()
    }
}

#[async_trait]
impl LookupProvider for ScriptedLookup {
    async fn lookup_history(&self, query: &HistoryQuery) -> Result<HistoryPage, ProviderError> {
        self.history_queries.lock().unwrap().push(query.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HistoryPage::default()))
    }

    async fn lookup_current(&self, query: &CurrentQuery) -> Result<CurrentReading, ProviderError> {
        self.current_queries.lock().unwrap().push(query.clone());
        Ok(reading())
    }
}

/// Always has more history: every page is as full as the query allows.
#[derive(Default)]
pub struct EndlessLookup {
    history_queries: Mutex<Vec<HistoryQuery>>,
}

impl EndlessLookup {
    pub fn history_queries(&self) -> Vec<HistoryQuery> {
        self.history_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LookupProvider for EndlessLookup {
    async fn lookup_history(&self, query: &HistoryQuery) -> Result<HistoryPage, ProviderError> {
        self.history_queries.lock().unwrap().push(query.clone());
        let n = query.hours.min(query.page_size) as i64;
        Ok(HistoryPage {
            buckets: (0..n).map(|h| bucket(h, 40 + h, 12.0)).collect(),
            next_page_token: format!("page-{}", self.history_queries.lock().unwrap().len()),
        })
    }

    async fn lookup_current(&self, _query: &CurrentQuery) -> Result<CurrentReading, ProviderError> {
        Ok(reading())
    }
}

/// Answers every reverse lookup the same way and counts the calls.
pub struct FixedGeocoder {
    outcome: Option<(String, Option<String>)>,
    calls: AtomicUsize,
}

impl FixedGeocoder {
    pub fn found(address: &str, country_code: Option<&str>) -> Self {
        Self {
            outcome: Some((address.to_string(), country_code.map(str::to_string))),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn not_found() -> Self {
        Self {
            outcome: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingProvider for FixedGeocoder {
    async fn reverse_geocode(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<GeocodedPlace, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Some((address, country_code)) => Ok(GeocodedPlace {
                formatted_address: address.clone(),
                country_code: country_code.clone(),
            }),
            None => Err(ProviderError::not_found("no results for coordinates")),
        }
    }
}

/// Never answers.
pub struct HangingLookup;

#[async_trait]
impl LookupProvider for HangingLookup {
    async fn lookup_history(&self, _query: &HistoryQuery) -> Result<HistoryPage, ProviderError> {
        std::future::pending().await
    }

    async fn lookup_current(&self, _query: &CurrentQuery) -> Result<CurrentReading, ProviderError> {
        std::future::pending().await
    }
}
