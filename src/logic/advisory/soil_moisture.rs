use super::DimensionRule;
use crate::models::{Band, SensorSnapshot, WeatherSummary};

/// Soil moisture rule
///
/// - below 30%: water immediately
/// - 30% up to (not including) 40%: plan watering soon
/// - 40% and above: sufficient
pub struct SoilMoistureRule;

impl DimensionRule for SoilMoistureRule {
    fn classify(&self, snapshot: &SensorSnapshot, _weather: Option<&WeatherSummary>) -> Option<Band> {
        let moisture = snapshot.soil_moisture_percent();
        let band = if moisture < 30.0 {
            Band::SoilVeryDry
        } else if moisture < 40.0 {
            Band::SoilDrying
        } else {
            Band::SoilMoist
        };
        Some(band)
    }
}
