use super::DimensionRule;
use crate::models::{Band, SensorSnapshot, WeatherSummary};

/// Relative humidity rule (%)
///
/// - below 40: water more often
/// - above 80: fungal disease risk
/// - 40 to 80 inclusive: healthy
pub struct HumidityRule;

impl DimensionRule for HumidityRule {
    fn classify(&self, snapshot: &SensorSnapshot, _weather: Option<&WeatherSummary>) -> Option<Band> {
        let humidity = snapshot.humidity_percent();
        let band = if humidity < 40.0 {
            Band::HumidityLow
        } else if humidity > 80.0 {
            Band::HumidityHigh
        } else {
            Band::HumidityHealthy
        };
        Some(band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(humidity: f64) -> Band {
        let snapshot = SensorSnapshot::new(50.0, 500.0, 25.0, humidity).unwrap();
        HumidityRule.classify(&snapshot, None).unwrap()
    }

    #[test]
    fn bands() {
        assert_eq!(classify(39.9), Band::HumidityLow);
        assert_eq!(classify(40.0), Band::HumidityHealthy);
        assert_eq!(classify(80.0), Band::HumidityHealthy);
        assert_eq!(classify(80.1), Band::HumidityHigh);
    }
}
