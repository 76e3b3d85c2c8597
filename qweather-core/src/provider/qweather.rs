use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_CHARSET};
use serde::Deserialize;
use tracing::debug;

use crate::{
    decode,
    error::{Result, WeatherError},
    model::{LocationId, WeatherAlert, WeatherNow},
};

use super::{STATUS_OK, WeatherSource};

const GEO_BASE_URL: &str = "https://geoapi.qweather.com/v2";
const API_BASE_URL: &str = "https://api.qweather.com/v7";

/// HTTP client for the QWeather REST API.
///
/// Holds one long-lived `reqwest::Client`; individual calls share it
/// without extra locking. Every response body is a gzip stream and goes
/// through [`crate::decode`] before the envelope code is checked.
#[derive(Debug, Clone)]
pub struct QWeatherClient {
    api_key: String,
    geo_base: String,
    api_base: String,
    http: Client,
}

impl QWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geo_base: GEO_BASE_URL.to_string(),
            api_base: API_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the geocoding endpoint at a different host (tests).
    pub fn with_geo_base_url(mut self, url: impl Into<String>) -> Self {
        self.geo_base = url.into();
        self
    }

    /// Point the weather/warning endpoints at a different host (tests).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// GET an endpoint with the standard `key`/`location` parameters and
    /// return the raw, still-compressed body.
    async fn get_raw(&self, url: &str, location: &str) -> Result<Vec<u8>> {
        let res = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("location", location)])
            .header(ACCEPT, "application/json")
            .header(ACCEPT_CHARSET, "UTF-8")
            .send()
            .await?
            .error_for_status()?;

        Ok(res.bytes().await?.to_vec())
    }

    /// GET `/city/lookup` and pull the first location id out of the reply.
    async fn lookup_city(&self, city: &str) -> Result<Option<LocationId>> {
        debug!(%city, "qweather city lookup");

        let url = format!("{}/city/lookup", self.geo_base);
        let body = self.get_raw(&url, city).await?;
        let envelope: GeoEnvelope = decode::decode_json(&body)?;

        if envelope.code != STATUS_OK {
            debug!(code = %envelope.code, %city, "city lookup returned non-success code");
            return Ok(None);
        }

        let first = envelope.location.unwrap_or_default().into_iter().next();
        Ok(first.map(|location| LocationId::new(location.id)))
    }

    /// GET `/weather/now` for a resolved location.
    async fn weather_now(&self, location: &LocationId) -> Result<WeatherNow> {
        debug!(%location, "qweather realtime fetch");

        let url = format!("{}/weather/now", self.api_base);
        let body = self.get_raw(&url, location.as_str()).await?;
        let envelope: NowEnvelope = decode::decode_json(&body)?;

        if envelope.code != STATUS_OK {
            return Err(WeatherError::ProviderStatus { code: envelope.code });
        }

        envelope.now.ok_or(WeatherError::MissingPayload("now"))
    }

    /// GET `/warning/now` for a resolved location.
    async fn warning_now(&self, location: &LocationId) -> Result<Vec<WeatherAlert>> {
        debug!(%location, "qweather warning fetch");

        let url = format!("{}/warning/now", self.api_base);
        let body = self.get_raw(&url, location.as_str()).await?;
        let envelope: WarningEnvelope = decode::decode_json(&body)?;

        if envelope.code != STATUS_OK {
            return Err(WeatherError::ProviderStatus { code: envelope.code });
        }

        // An absent array and an empty array both mean "no active warnings".
        Ok(envelope.warning.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct GeoEnvelope {
    code: String,
    location: Option<Vec<GeoLocation>>,
}

#[derive(Debug, Deserialize)]
struct GeoLocation {
    id: String,
}

#[derive(Debug, Deserialize)]
struct NowEnvelope {
    code: String,
    now: Option<WeatherNow>,
}

#[derive(Debug, Deserialize)]
struct WarningEnvelope {
    code: String,
    warning: Option<Vec<WeatherAlert>>,
}

#[async_trait]
impl WeatherSource for QWeatherClient {
    async fn resolve_city(&self, city: &str) -> Result<Option<LocationId>> {
        self.lookup_city(city).await
    }

    async fn current_weather(&self, location: &LocationId) -> Result<WeatherNow> {
        self.weather_now(location).await
    }

    async fn active_warnings(&self, location: &LocationId) -> Result<Vec<WeatherAlert>> {
        self.warning_now(location).await
    }
}
