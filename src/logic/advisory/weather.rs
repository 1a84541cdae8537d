use super::DimensionRule;
use crate::models::{Band, SensorSnapshot, WeatherSummary};

/// Weather description rule
///
/// Case-insensitive substring match on the free-text description. "rain" is
/// checked before "sun", so "sunny with rain" reads as rain. A description
/// with neither keyword, or no weather at all, adds nothing.
pub struct WeatherRule;

impl DimensionRule for WeatherRule {
    fn classify(&self, _snapshot: &SensorSnapshot, weather: Option<&WeatherSummary>) -> Option<Band> {
        let weather = weather?;
        if weather.mentions("rain") {
            Some(Band::RainExpected)
        } else if weather.mentions("sun") {
            Some(Band::Sunny)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(description: Option<&str>) -> Option<Band> {
        let snapshot = SensorSnapshot::new(50.0, 500.0, 25.0, 60.0).unwrap();
        let weather = description.map(WeatherSummary::from_description);
        WeatherRule.classify(&snapshot, weather.as_ref())
    }

    #[test]
    fn keywords() {
        assert_eq!(classify(Some("light rain")), Some(Band::RainExpected));
        assert_eq!(classify(Some("Heavy Intensity RAIN")), Some(Band::RainExpected));
        assert_eq!(classify(Some("Sunny")), Some(Band::Sunny));
        assert_eq!(classify(Some("clear sun")), Some(Band::Sunny));
    }

    #[test]
    fn rain_wins_over_sun() {
        assert_eq!(classify(Some("sunny with rain")), Some(Band::RainExpected));
    }

    #[test]
    fn no_match_or_no_weather() {
        assert_eq!(classify(Some("overcast clouds")), None);
        assert_eq!(classify(Some("")), None);
        assert_eq!(classify(None), None);
    }

    #[test]
    fn substring_match_is_literal() {
        // "brain" contains "rain"; the heuristic does not look at word boundaries
        assert_eq!(classify(Some("brainstorm")), Some(Band::RainExpected));
        assert_eq!(classify(Some("sunset haze")), Some(Band::Sunny));
    }
}
