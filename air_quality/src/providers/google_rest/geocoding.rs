use async_trait::async_trait;
use governor::DefaultDirectRateLimiter;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use snafu::ResultExt;

use crate::{
    config::Settings,
    providers::{
        ClientBuildSnafu, GeocodedPlace, GeocodingProvider, ProviderError, ProviderInitError,
        ReqwestSnafu,
        google_rest::{
            api_key_from_env, build_limiter, endpoint, params::validate_coordinates,
            provider::ensure_success, throttle,
        },
    },
};

#[derive(Deserialize, Debug)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Deserialize, Debug)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub status: String,
    pub error_message: Option<String>,
}

impl GeocodeResult {
    /// Short name of the first component typed `country`.
    pub fn country_code(&self) -> Option<&str> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == "country"))
            .map(|c| c.short_name.as_str())
            .filter(|code| !code.is_empty())
    }
}

impl GeocodeResponse {
    pub fn into_place(self) -> Result<GeocodedPlace, ProviderError> {
        match self.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(ProviderError::not_found("no geocoding results")),
            other => {
                return Err(ProviderError::rejected(
                    other,
                    self.error_message.unwrap_or_default(),
                ));
            }
        }
        let first = self
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::not_found("no geocoding results"))?;
        Ok(GeocodedPlace {
            country_code: first.country_code().map(str::to_string),
            formatted_address: first.formatted_address,
        })
    }
}

pub struct GoogleGeocoder {
    client: Client,
    base_url: String,
    api_key: SecretString,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl GoogleGeocoder {
    /// Creates a geocoder from loaded settings, reading the API key from the environment.
    pub fn new(settings: &Settings) -> Result<Self, ProviderInitError> {
        Self::with_api_key(
            &settings.geocoding_base_url,
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
}

#[async_trait]
impl GeocodingProvider for GoogleGeocoder {
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<GeocodedPlace, ProviderError> {
        validate_coordinates(latitude, longitude)?;
        throttle(self.limiter.as_ref()).await;

        let latlng = format!("{latitude},{longitude}");
        let response = self
            .client
            .get(endpoint(&self.base_url, "json"))
            .query(&[("latlng", latlng.as_str()), ("key", self.api_key.expose_secret())])
            .send()
            .await
            .context(ReqwestSnafu)?;

        let response = ensure_success(response).await?;
        let body: GeocodeResponse = response.json().await.context(ReqwestSnafu)?;
        body.into_place()
    }
}
