use crate::config::OpenWeatherMapConfig;
use crate::error::{FarmError, Result};
use crate::models::WeatherSummary;
use serde::Deserialize;

const API_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    #[serde(default)]
    name: Option<String>,
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    #[allow(dead_code)]
    main: String,
    description: String,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current conditions for the configured city (metric units)
    pub async fn fetch_current(&self) -> Result<WeatherSummary> {
        let response = self
            .client
            .get(format!("{}/weather", API_BASE_URL))
            .query(&[
                ("q", self.config.city.as_str()),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.config.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FarmError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        self.parse_current(&body)
    }

    fn parse_current(&self, body: &str) -> Result<WeatherSummary> {
        let owm: OwmCurrentResponse = serde_json::from_str(body).map_err(|e| {
            FarmError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        let description = owm
            .weather
            .first()
            .map(|w| w.description.clone())
            .ok_or_else(|| {
                FarmError::DataSourceUnavailable(
                    "OpenWeatherMap response has no weather description".into(),
                )
            })?;

        Ok(WeatherSummary {
            city: owm.name.unwrap_or_else(|| self.config.city.clone()),
            temperature_c: owm.main.temp,
            humidity_percent: owm.main.humidity,
            ..WeatherSummary::from_description(description)
        })
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/weather", API_BASE_URL))
            .query(&[
                ("q", self.config.city.as_str()),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FarmError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }
}
