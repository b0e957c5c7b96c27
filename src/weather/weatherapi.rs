//! Weather API client for WeatherAPI-style providers
//!
//! Talks to the `search.json`, `current.json` and `forecast.json` endpoints.
//! Every non-success status, transport failure or undecodable body becomes a
//! [`TravelChatError::Api`]; an empty search result is a normal, successful
//! answer. Requests are never retried here; the resolver's alias retry is the
//! only retry in a chat request.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::{CurrentConditions, DailyForecast, Forecast, LocationCandidate};
use crate::{Result, TravelChatError};

const USER_AGENT: &str = concat!("TravelChat/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the weather provider
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    /// Create a client from configuration. Fails when no API key is configured.
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| TravelChatError::config("Weather API key is not configured"))?;

        Self::with_base_url(
            &config.base_url,
            api_key,
            Duration::from_secs(config.timeout_seconds.into()),
        )
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(base_url: &str, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TravelChatError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{}?key={}",
            self.base_url,
            endpoint,
            urlencoding::encode(&self.api_key)
        );
        for (name, value) in params {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// Issue a GET and decode the JSON body. The API key never reaches the logs.
    #[instrument(name = "weather_request", skip(self, params))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let start_time = Instant::now();
        debug!("Requesting {} with params {:?}", endpoint, params);

        let response = self
            .client
            .get(self.endpoint_url(endpoint, params))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!("Network error calling {}: {}", endpoint, e);
                TravelChatError::api(format!("Request to {endpoint} failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = wire::provider_error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
            warn!("{} returned HTTP {}: {}", endpoint, status.as_u16(), reason);
            return Err(TravelChatError::api_status(
                format!("{endpoint} returned {status}: {reason}"),
                status.as_u16(),
            ));
        }

        let data = response.json::<T>().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to parse {} response: {}", endpoint, e);
            TravelChatError::api(format!("Invalid data received from {endpoint}: {e}"))
        })?;

        let duration = start_time.elapsed();
        debug!("{} answered in {:.3}s", endpoint, duration.as_secs_f64());
        if duration.as_secs() > 5 {
            warn!("Slow weather API response: {:.3}s", duration.as_secs_f64());
        }

        Ok(data)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>> {
        let candidates: Vec<LocationCandidate> =
            self.get_json("search.json", &[("q", query)]).await?;

        if candidates.is_empty() {
            info!("No search results for '{}'", query);
        } else {
            debug!(
                "Search results for '{}': {:?}",
                query,
                candidates.iter().map(LocationCandidate::label).collect::<Vec<_>>()
            );
        }
        Ok(candidates)
    }

    async fn current(&self, query_key: &str) -> Result<CurrentConditions> {
        let response: wire::CurrentResponse =
            self.get_json("current.json", &[("q", query_key)]).await?;
        Ok(response.current.into())
    }

    async fn forecast(&self, query_key: &str, days: u8) -> Result<Forecast> {
        let days = days.to_string();
        let response: wire::ForecastResponse = self
            .get_json("forecast.json", &[("q", query_key), ("days", &days)])
            .await?;

        Ok(Forecast {
            days: response
                .forecast
                .forecastday
                .into_iter()
                .map(DailyForecast::from)
                .collect(),
        })
    }
}

/// Provider response structures and conversion utilities
mod wire {
    use super::{CurrentConditions, DailyForecast};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub text: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub current: CurrentData,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        pub temp_c: f32,
        pub feelslike_c: f32,
        pub condition: Condition,
        #[serde(deserialize_with = "percent")]
        pub humidity: u8,
        pub wind_kph: f32,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub forecast: ForecastBlock,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastBlock {
        pub forecastday: Vec<ForecastDay>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastDay {
        pub date: NaiveDate,
        pub day: DayData,
    }

    #[derive(Debug, Deserialize)]
    pub struct DayData {
        pub maxtemp_c: f32,
        pub mintemp_c: f32,
        pub avgtemp_c: f32,
        pub maxwind_kph: f32,
        #[serde(deserialize_with = "percent")]
        pub avghumidity: u8,
        #[serde(deserialize_with = "percent")]
        pub daily_chance_of_rain: u8,
        pub condition: Condition,
    }

    #[derive(Debug, Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(Debug, Deserialize)]
    struct ErrorBody {
        message: String,
    }

    /// Extract the provider's `{"error": {"message": ..}}` text, if present
    pub fn provider_error_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error.message)
    }

    /// Percentages arrive as integers, floats or numeric strings depending on the field
    fn percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrString {
            Number(f64),
            Text(String),
        }

        let value = match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => n,
            NumberOrString::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom)?,
        };
        // clamped to 0..=100 so the cast cannot truncate
        Ok(value.round().clamp(0.0, 100.0) as u8)
    }

    impl From<CurrentData> for CurrentConditions {
        fn from(data: CurrentData) -> Self {
            Self {
                temperature_c: data.temp_c,
                feels_like_c: data.feelslike_c,
                condition: data.condition.text,
                humidity: data.humidity,
                wind_kph: data.wind_kph,
            }
        }
    }

    impl From<ForecastDay> for DailyForecast {
        fn from(forecast_day: ForecastDay) -> Self {
            let day = forecast_day.day;
            Self {
                date: forecast_day.date,
                max_c: day.maxtemp_c,
                min_c: day.mintemp_c,
                avg_c: day.avgtemp_c,
                condition: day.condition.text,
                chance_of_rain: day.daily_chance_of_rain,
                avg_humidity: day.avghumidity,
                max_wind_kph: day.maxwind_kph,
            }
        }
    }
}
