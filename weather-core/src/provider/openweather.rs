use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::UNITS,
    error::FetchError,
    model::{UNKNOWN, WeatherRecord},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self { api_key, base_url, http })
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        debug!(city, url = %self.base_url, "requesting current weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", UNITS)])
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(FetchError::CityNotFound { city: city.to_string() });
            }
            StatusCode::UNAUTHORIZED => return Err(FetchError::InvalidCredential),
            StatusCode::TOO_MANY_REQUESTS => return Err(FetchError::RateLimited),
            other => return Err(FetchError::UnexpectedStatus(other.as_u16())),
        }

        let body = res.text().await?;
        parse_current(&body)
    }
}

/// Map a current-weather JSON body into a [`WeatherRecord`].
///
/// Each field is looked up on its own: an absent or wrongly typed value at any level
/// becomes its default. Only a body that is not JSON fails.
pub fn parse_current(body: &str) -> Result<WeatherRecord, FetchError> {
    let json: Value = serde_json::from_str(body).map_err(|err| {
        FetchError::TransportError(format!("invalid weather payload: {}", err))
    })?;

    let number = |object: &str, field: &str| {
        json.get(object).and_then(|o| o.get(field)).and_then(Value::as_f64)
    };

    let description = json
        .get("weather")
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(|w| w.get("description"))
        .and_then(Value::as_str);

    Ok(WeatherRecord {
        city: text_or_unknown(json.get("name").and_then(Value::as_str)),
        country: text_or_unknown(json.get("sys").and_then(|s| s.get("country")).and_then(Value::as_str)),
        temperature: number("main", "temp"),
        feels_like: number("main", "feels_like"),
        humidity: number("main", "humidity"),
        description: text_or_unknown(description),
        wind_speed: number("wind", "speed"),
    })
}

fn text_or_unknown(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        let result = self.fetch_current(city).await;

        if let Err(err) = &result {
            warn!(city, error = %err, "weather fetch failed");
        }

        result
    }
}
