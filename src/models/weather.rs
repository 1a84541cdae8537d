use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for the configured city.
///
/// `description` is free text in whatever language the weather service was
/// asked for; the advisory engine only looks for "rain" and "sun" in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub fetched_at: DateTime<Utc>,
    pub city: String,
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub description: String,
}

impl WeatherSummary {
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            fetched_at: Utc::now(),
            city: String::new(),
            temperature_c: None,
            humidity_percent: None,
            description: description.into(),
        }
    }

    pub fn mentions(&self, keyword: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }

    pub fn headline(&self) -> String {
        let temp = self
            .temperature_c
            .map(|t| format!("{:.1}°C", t))
            .unwrap_or_else(|| "--".to_string());
        let humidity = self
            .humidity_percent
            .map(|h| format!("{:.0}%", h))
            .unwrap_or_else(|| "--".to_string());
        format!(
            "Weather: {}, {} (Humidity: {})",
            temp, self.description, humidity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_is_case_insensitive() {
        let weather = WeatherSummary::from_description("Light RAIN showers");
        assert!(weather.mentions("rain"));
        assert!(!weather.mentions("sun"));
    }

    #[test]
    fn headline_handles_missing_values() {
        let weather = WeatherSummary::from_description("haze");
        assert_eq!(weather.headline(), "Weather: --, haze (Humidity: --)");

        let weather = WeatherSummary {
            temperature_c: Some(31.46),
            humidity_percent: Some(70.0),
            ..WeatherSummary::from_description("clear sky")
        };
        assert_eq!(
            weather.headline(),
            "Weather: 31.5°C, clear sky (Humidity: 70%)"
        );
    }
}
