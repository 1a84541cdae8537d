use super::DimensionRule;
use crate::models::{Band, SensorSnapshot, WeatherSummary};

/// Air quality rule (gas sensor ppm)
///
/// - above 2000: dangerous
/// - above 1000 up to 2000: poor
/// - 1000 and below: good
pub struct AirQualityRule;

impl DimensionRule for AirQualityRule {
    fn classify(&self, snapshot: &SensorSnapshot, _weather: Option<&WeatherSummary>) -> Option<Band> {
        let ppm = snapshot.air_quality_ppm();
        let band = if ppm > 2000.0 {
            Band::AirDangerous
        } else if ppm > 1000.0 {
            Band::AirPoor
        } else {
            Band::AirGood
        };
        Some(band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(ppm: f64) -> Band {
        let snapshot = SensorSnapshot::new(50.0, ppm, 25.0, 60.0).unwrap();
        AirQualityRule.classify(&snapshot, None).unwrap()
    }

    #[test]
    fn bands() {
        assert_eq!(classify(400.0), Band::AirGood);
        assert_eq!(classify(1000.0), Band::AirGood);
        assert_eq!(classify(1000.5), Band::AirPoor);
        assert_eq!(classify(2000.0), Band::AirPoor);
        assert_eq!(classify(2000.1), Band::AirDangerous);
    }
}
