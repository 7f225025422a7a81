//! Request-level operations: chart summaries and current conditions.

use std::{future::Future, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};

use crate::{
    config::Settings,
    countries::SupportedCountries,
    errors::Error,
    models::{
        current::CurrentConditions,
        location::{LocationRequest, RawLocationRequest},
    },
    pipeline::{
        aggregate_history,
        location::{ResolvedLocation, resolve_location},
        normalize::{Correction, hours_for, normalize},
        summary::{SummaryResult, summarize},
    },
    providers::{
        CurrentQuery, ExtraComputation, GeocodingProvider, LookupProvider,
        google_rest::{GoogleAirQualityProvider, GoogleGeocoder},
    },
};

/// Runs `operation` under an overall deadline.
///
/// Nothing inside the pipeline has its own timeout; when the deadline passes the
/// operation is dropped and [`Error::Timeout`] is returned.
pub async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    tokio::time::timeout(deadline, operation)
        .await
        .map_err(|_| Error::Timeout(deadline))?
}

/// Everything a chart request produced, for callers that want more than the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOutcome {
    pub summary: SummaryResult,
    pub location: ResolvedLocation,
    pub request: LocationRequest,
    /// Window size the history was fetched for.
    pub hours: u32,
    pub corrections: Vec<Correction>,
}

/// Holds the read-only configuration and the upstream providers.
///
/// Cheap to clone; clones share settings, allow-list and providers. Each call owns its
/// own aggregation state, so concurrent calls do not interact.
#[derive(Clone)]
pub struct AirQualityService {
    settings: Arc<Settings>,
    countries: Arc<SupportedCountries>,
    lookup: Arc<dyn LookupProvider>,
    geocoder: Arc<dyn GeocodingProvider>,
}

impl AirQualityService {
    pub fn new(
        settings: Settings,
        lookup: Arc<dyn LookupProvider>,
        geocoder: Arc<dyn GeocodingProvider>,
    ) -> Self {
        let countries = SupportedCountries::from_settings(&settings);
        Self {
            settings: Arc::new(settings),
            countries: Arc::new(countries),
            lookup,
            geocoder,
        }
    }

    /// Wires the Google providers, reading the API key from the environment.
    pub fn from_settings(settings: Settings) -> Result<Self, Error> {
        let lookup = GoogleAirQualityProvider::new(&settings)?;
        let geocoder = GoogleGeocoder::new(&settings)?;
        Ok(Self::new(settings, Arc::new(lookup), Arc::new(geocoder)))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Summarizes the history window for a request, as of `now`.
    ///
    /// The location gate runs first; a rejected location never reaches the lookup
    /// provider.
    pub async fn chart(
        &self,
        raw: &RawLocationRequest,
        now: DateTime<Utc>,
    ) -> Result<ChartOutcome, Error> {
        let location = resolve_location(
            self.geocoder.as_ref(),
            &self.countries,
            &self.settings,
            raw,
        )
        .await?;

        let normalized = normalize(raw, &self.settings);
        let request = normalized.request;
        let hours = hours_for(&request, now);
        tracing::info!(
            range = %request.range,
            time_zone = %request.time_zone,
            hours,
            "fetching history"
        );

        let aggregate = aggregate_history(
            self.lookup.as_ref(),
            &request,
            hours,
            self.settings.page_size,
        )
        .await?;
        let summary = summarize(aggregate)?;

        Ok(ChartOutcome {
            summary,
            location,
            request,
            hours,
            corrections: normalized.corrections,
        })
    }

    /// Latest reading for a request's location.
    pub async fn current_conditions(
        &self,
        raw: &RawLocationRequest,
    ) -> Result<CurrentConditions, Error> {
        let location = resolve_location(
            self.geocoder.as_ref(),
            &self.countries,
            &self.settings,
            raw,
        )
        .await?;

        let query = CurrentQuery {
            latitude: location.latitude,
            longitude: location.longitude,
            extra_computations: vec![
                ExtraComputation::DominantPollutantConcentration,
                ExtraComputation::PollutantAdditionalInfo,
            ],
        };
        let reading = self.lookup.lookup_current(&query).await?;

        Ok(CurrentConditions {
            reading,
            location: location.address,
        })
    }
}
