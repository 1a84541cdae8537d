use crate::error::{FarmError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One set of simultaneous readings from the field station.
///
/// Construct through [`SensorSnapshot::new`] so every field is known to be
/// finite. Out-of-range but finite values (negative moisture, 60°C) are kept
/// as-is; the advisory bands are open-ended on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorSnapshot {
    soil_moisture_percent: f64,
    air_quality_ppm: f64,
    temperature_c: f64,
    humidity_percent: f64,
}

impl SensorSnapshot {
    pub fn new(
        soil_moisture_percent: f64,
        air_quality_ppm: f64,
        temperature_c: f64,
        humidity_percent: f64,
    ) -> Result<Self> {
        for (label, value) in [
            ("soil moisture", soil_moisture_percent),
            ("air quality", air_quality_ppm),
            ("temperature", temperature_c),
            ("humidity", humidity_percent),
        ] {
            if !value.is_finite() {
                return Err(FarmError::InvalidData(format!(
                    "{} reading is not a finite number: {}",
                    label, value
                )));
            }
        }

        Ok(Self {
            soil_moisture_percent,
            air_quality_ppm,
            temperature_c,
            humidity_percent,
        })
    }

    pub fn soil_moisture_percent(&self) -> f64 {
        self.soil_moisture_percent
    }

    pub fn air_quality_ppm(&self) -> f64 {
        self.air_quality_ppm
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn humidity_percent(&self) -> f64 {
        self.humidity_percent
    }

    /// Sentence used to give language models the current field context.
    /// Readings always keep a decimal point (`25.0`, not `25`).
    pub fn describe(&self) -> String {
        format!(
            "Current sensor readings: Soil Moisture: {:?}%, Air Quality: {:?} ppm, Temperature: {:?}°C, Humidity: {:?}%.",
            self.soil_moisture_percent,
            self.air_quality_ppm,
            self.temperature_c,
            self.humidity_percent
        )
    }
}

/// A single row of the ThingSpeak channel feed.
///
/// Channel fields arrive as strings (or null); anything that does not parse
/// as a number is treated as missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub entry_id: Option<u64>,
    #[serde(rename = "field1", default, deserialize_with = "lenient_f64")]
    pub soil_moisture_percent: Option<f64>,
    #[serde(rename = "field2", default, deserialize_with = "lenient_f64")]
    pub air_quality_ppm: Option<f64>,
    #[serde(rename = "field3", default, deserialize_with = "lenient_f64")]
    pub temperature_c: Option<f64>,
    #[serde(rename = "field4", default, deserialize_with = "lenient_f64")]
    pub humidity_percent: Option<f64>,
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|v| v.is_finite()))
}

impl FeedEntry {
    /// Validate this row into a snapshot; fails when any field is missing.
    pub fn snapshot(&self) -> Result<SensorSnapshot> {
        let missing = |label: &str| {
            FarmError::InvalidData(format!(
                "feed entry {} has no usable {} reading",
                self.created_at.format("%Y-%m-%d %H:%M:%S"),
                label
            ))
        };

        SensorSnapshot::new(
            self.soil_moisture_percent
                .ok_or_else(|| missing("soil moisture"))?,
            self.air_quality_ppm.ok_or_else(|| missing("air quality"))?,
            self.temperature_c.ok_or_else(|| missing("temperature"))?,
            self.humidity_percent.ok_or_else(|| missing("humidity"))?,
        )
    }
}

/// Ordered (oldest first) rows returned by one feed fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorFeed {
    pub fetched_at: Option<DateTime<Utc>>,
    pub entries: Vec<FeedEntry>,
}

impl SensorFeed {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&FeedEntry> {
        self.entries.last()
    }

    pub fn latest_snapshot(&self) -> Result<SensorSnapshot> {
        self.latest()
            .ok_or_else(|| FarmError::NotFound("sensor feed has no entries".into()))?
            .snapshot()
    }

    /// Series for one channel field, skipping rows where it is missing.
    pub fn series(&self, field: SensorField) -> Vec<f64> {
        self.entries
            .iter()
            .filter_map(|e| match field {
                SensorField::SoilMoisture => e.soil_moisture_percent,
                SensorField::AirQuality => e.air_quality_ppm,
                SensorField::Temperature => e.temperature_c,
                SensorField::Humidity => e.humidity_percent,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorField {
    SoilMoisture,
    AirQuality,
    Temperature,
    Humidity,
}

impl SensorField {
    pub const ALL: [SensorField; 4] = [
        SensorField::SoilMoisture,
        SensorField::AirQuality,
        SensorField::Temperature,
        SensorField::Humidity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorField::SoilMoisture => "Soil Moisture",
            SensorField::AirQuality => "Air Quality",
            SensorField::Temperature => "Temperature",
            SensorField::Humidity => "Humidity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SensorField::SoilMoisture => "%",
            SensorField::AirQuality => " ppm",
            SensorField::Temperature => "°C",
            SensorField::Humidity => "%",
        }
    }
}

impl std::fmt::Display for SensorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_entry(json: &str) -> FeedEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn snapshot_rejects_non_finite_values() {
        assert!(SensorSnapshot::new(f64::NAN, 500.0, 25.0, 60.0).is_err());
        assert!(SensorSnapshot::new(35.0, f64::INFINITY, 25.0, 60.0).is_err());
        assert!(SensorSnapshot::new(35.0, 500.0, f64::NEG_INFINITY, 60.0).is_err());
        assert!(SensorSnapshot::new(35.0, 500.0, 25.0, f64::NAN).is_err());
    }

    #[test]
    fn snapshot_keeps_out_of_range_values() {
        let snapshot = SensorSnapshot::new(-5.0, 0.0, 80.0, 140.0).unwrap();
        assert_eq!(snapshot.soil_moisture_percent(), -5.0);
        assert_eq!(snapshot.temperature_c(), 80.0);
        assert_eq!(snapshot.humidity_percent(), 140.0);
    }

    #[test]
    fn feed_entry_parses_string_fields() {
        let entry = parse_entry(
            r#"{"created_at":"2025-03-01T10:15:00Z","entry_id":42,
                "field1":"27.5","field2":"812","field3":"31.2","field4":"64"}"#,
        );
        assert_eq!(entry.entry_id, Some(42));
        assert_eq!(entry.soil_moisture_percent, Some(27.5));
        assert_eq!(entry.air_quality_ppm, Some(812.0));

        let snapshot = entry.snapshot().unwrap();
        assert_eq!(snapshot.temperature_c(), 31.2);
        assert_eq!(snapshot.humidity_percent(), 64.0);
    }

    #[test]
    fn feed_entry_coerces_garbage_to_missing() {
        let entry = parse_entry(
            r#"{"created_at":"2025-03-01T10:15:00Z",
                "field1":"n/a","field2":null,"field3":30.5,"field4":"nan"}"#,
        );
        assert_eq!(entry.soil_moisture_percent, None);
        assert_eq!(entry.air_quality_ppm, None);
        assert_eq!(entry.temperature_c, Some(30.5));
        assert_eq!(entry.humidity_percent, None);
        assert!(matches!(entry.snapshot(), Err(FarmError::InvalidData(_))));
    }

    #[test]
    fn feed_entry_tolerates_absent_fields() {
        let entry = parse_entry(r#"{"created_at":"2025-03-01T10:15:00Z","field1":"40"}"#);
        assert_eq!(entry.soil_moisture_percent, Some(40.0));
        assert!(entry.snapshot().is_err());
    }

    #[test]
    fn empty_feed_has_no_snapshot() {
        let feed = SensorFeed::default();
        assert!(matches!(feed.latest_snapshot(), Err(FarmError::NotFound(_))));
    }

    #[test]
    fn series_skips_missing_values() {
        let feed = SensorFeed {
            fetched_at: None,
            entries: vec![
                parse_entry(r#"{"created_at":"2025-03-01T10:00:00Z","field1":"20"}"#),
                parse_entry(r#"{"created_at":"2025-03-01T10:05:00Z","field1":"x"}"#),
                parse_entry(r#"{"created_at":"2025-03-01T10:10:00Z","field1":"22"}"#),
            ],
        };
        assert_eq!(feed.series(SensorField::SoilMoisture), vec![20.0, 22.0]);
        assert!(feed.series(SensorField::Humidity).is_empty());
    }

    #[test]
    fn describe_lists_all_readings() {
        let snapshot = SensorSnapshot::new(25.0, 1500.0, 38.0, 35.0).unwrap();
        assert_eq!(
            snapshot.describe(),
            "Current sensor readings: Soil Moisture: 25.0%, Air Quality: 1500.0 ppm, Temperature: 38.0°C, Humidity: 35.0%."
        );
    }
}
