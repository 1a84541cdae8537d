use super::{
    air_quality::AirQualityRule, catalog::AdvisoryCatalog, humidity::HumidityRule,
    soil_moisture::SoilMoistureRule, temperature::TemperatureRule, weather::WeatherRule,
    DimensionRule,
};
use crate::models::{
    Advice, AdvisoryMessage, Band, Language, SensorSnapshot, WeatherSummary,
};

/// Turns a sensor snapshot and optional weather into localized advice.
///
/// Rules run in a fixed order (moisture, air quality, temperature, humidity,
/// weather), so the message order never changes. Holds no mutable state.
pub struct AdvisoryEngine {
    rules: Vec<Box<dyn DimensionRule>>,
}

impl AdvisoryEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn DimensionRule>> = vec![
            Box::new(SoilMoistureRule),
            Box::new(AirQualityRule),
            Box::new(TemperatureRule),
            Box::new(HumidityRule),
            Box::new(WeatherRule),
        ];

        Self { rules }
    }

    pub fn generate(
        &self,
        snapshot: &SensorSnapshot,
        weather: Option<&WeatherSummary>,
        language: Language,
    ) -> AdvisoryMessage {
        let mut message = AdvisoryMessage::new(language);
        for band in self.classify(snapshot, weather) {
            message.push(Advice {
                band,
                text: AdvisoryCatalog::sentence(band, language),
            });
        }
        message
    }

    /// Bands only, without choosing a language.
    pub fn classify(
        &self,
        snapshot: &SensorSnapshot,
        weather: Option<&WeatherSummary>,
    ) -> Vec<Band> {
        self.rules
            .iter()
            .filter_map(|rule| rule.classify(snapshot, weather))
            .collect()
    }
}

impl Default for AdvisoryEngine {
    fn default() -> Self {
        Self::new()
    }
}
