use super::DimensionRule;
use crate::models::{Band, SensorSnapshot, WeatherSummary};

/// Air temperature rule (°C)
///
/// - above 35: water in the cool of the day
/// - below 15: protect from cold
/// - 15 to 35 inclusive: optimal
pub struct TemperatureRule;

impl DimensionRule for TemperatureRule {
    fn classify(&self, snapshot: &SensorSnapshot, _weather: Option<&WeatherSummary>) -> Option<Band> {
        let temp = snapshot.temperature_c();
        let band = if temp > 35.0 {
            Band::TemperatureHigh
        } else if temp < 15.0 {
            Band::TemperatureLow
        } else {
            Band::TemperatureOptimal
        };
        Some(band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(temp: f64) -> Band {
        let snapshot = SensorSnapshot::new(50.0, 500.0, temp, 60.0).unwrap();
        TemperatureRule.classify(&snapshot, None).unwrap()
    }

    #[test]
    fn bands() {
        assert_eq!(classify(-2.0), Band::TemperatureLow);
        assert_eq!(classify(14.9), Band::TemperatureLow);
        assert_eq!(classify(15.0), Band::TemperatureOptimal);
        assert_eq!(classify(35.0), Band::TemperatureOptimal);
        assert_eq!(classify(35.1), Band::TemperatureHigh);
    }
}
