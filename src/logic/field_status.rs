use crate::models::{SensorSnapshot, WeatherSummary};
use ratatui::style::Color;

const WATERING_MOISTURE_BELOW: f64 = 40.0;
const WATERING_HUMIDITY_BELOW: f64 = 50.0;
const POOR_AIR_ABOVE: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrrigationStatus {
    WateringRecommended,
    Sufficient,
}

impl IrrigationStatus {
    pub fn evaluate(snapshot: &SensorSnapshot, weather: Option<&WeatherSummary>) -> Self {
        let weather_dry = weather
            .and_then(|w| w.humidity_percent)
            .is_some_and(|h| h < WATERING_HUMIDITY_BELOW);

        if snapshot.soil_moisture_percent() < WATERING_MOISTURE_BELOW
            || snapshot.humidity_percent() < WATERING_HUMIDITY_BELOW
            || weather_dry
        {
            IrrigationStatus::WateringRecommended
        } else {
            IrrigationStatus::Sufficient
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            IrrigationStatus::WateringRecommended => "Watering recommended",
            IrrigationStatus::Sufficient => "Soil moisture sufficient",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            IrrigationStatus::WateringRecommended => Color::Yellow,
            IrrigationStatus::Sufficient => Color::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQualityStatus {
    Poor,
    Good,
}

impl AirQualityStatus {
    pub fn evaluate(snapshot: &SensorSnapshot) -> Self {
        if snapshot.air_quality_ppm() > POOR_AIR_ABOVE {
            AirQualityStatus::Poor
        } else {
            AirQualityStatus::Good
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AirQualityStatus::Poor => "Air quality poor",
            AirQualityStatus::Good => "Air quality good",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AirQualityStatus::Poor => Color::Red,
            AirQualityStatus::Good => Color::Green,
        }
    }
}
