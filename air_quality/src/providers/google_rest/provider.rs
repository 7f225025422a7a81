use async_trait::async_trait;
use governor::DefaultDirectRateLimiter;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use snafu::ResultExt;

use crate::{
    config::Settings,
    models::current::CurrentReading,
    providers::{
        ApiSnafu, ClientBuildSnafu, CurrentQuery, HistoryPage, HistoryQuery, LookupProvider,
        ProviderError, ProviderInitError, ReqwestSnafu,
        google_rest::{
            api_key_from_env, build_limiter, endpoint,
            params::{
                construct_current_body, construct_history_body, validate_coordinates,
                validate_history_query,
            },
            response::{CurrentResponse, HistoryResponse},
            throttle,
        },
    },
};

pub struct GoogleAirQualityProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl GoogleAirQualityProvider {
    /// Creates a provider from loaded settings.
    ///
    /// Reads the API key from the `GOOGLE_MAPS_API_KEY` environment variable.
    pub fn new(settings: &Settings) -> Result<Self, ProviderInitError> {
        Self::with_api_key(
            &settings.air_quality_base_url,
            api_key_from_env()?,
            settings.requests_per_minute,
        )
    }

    pub fn with_api_key(
        base_url: &str,
        api_key: SecretString,
        requests_per_minute: Option<u32>,
    ) -> Result<Self, ProviderInitError> {
        let client = Client::builder().build().context(ClientBuildSnafu)?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key,
            limiter: build_limiter(requests_per_minute)?,
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        throttle(self.limiter.as_ref()).await;

        let response = self
            .client
            .post(endpoint(&self.base_url, path))
            .query(&[("key", self.api_key.expose_secret())])
            .json(body)
            .send()
            .await
            .context(ReqwestSnafu)?;

        let response = ensure_success(response).await?;
        response.json::<R>().await.context(ReqwestSnafu)
    }
}

/// Turns a non-2xx response into [`ProviderError::Api`] carrying the body text.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown API error".to_string());
    ApiSnafu {
        status: status.as_u16(),
        message,
    }
    .fail()
}

#[async_trait]
impl LookupProvider for GoogleAirQualityProvider {
    async fn lookup_history(&self, query: &HistoryQuery) -> Result<HistoryPage, ProviderError> {
        validate_history_query(query)?;
        tracing::debug!(
            hours = query.hours,
            page_size = query.page_size,
            first_page = query.page_token.is_empty(),
            "history lookup"
        );

        let body = construct_history_body(query);
        let response: HistoryResponse = self.post("history:lookup", &body).await?;
        response.into_page()
    }

    async fn lookup_current(&self, query: &CurrentQuery) -> Result<CurrentReading, ProviderError> {
        validate_coordinates(query.latitude, query.longitude)?;
        tracing::debug!("current conditions lookup");

        let body = construct_current_body(query);
        let response: CurrentResponse = self.post("currentConditions:lookup", &body).await?;
        response.into_reading()
    }
}
