use super::Language;
use serde::{Deserialize, Serialize};

/// The quantity a piece of advice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    SoilMoisture,
    AirQuality,
    Temperature,
    Humidity,
    Weather,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::SoilMoisture => "Soil Moisture",
            Dimension::AirQuality => "Air Quality",
            Dimension::Temperature => "Temperature",
            Dimension::Humidity => "Humidity",
            Dimension::Weather => "Weather",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Dimension::SoilMoisture => Color::Blue,
            Dimension::AirQuality => Color::Magenta,
            Dimension::Temperature => Color::Red,
            Dimension::Humidity => Color::Cyan,
            Dimension::Weather => Color::Yellow,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Advisory,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Advisory => "Advisory",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Severity::Info => Color::Green,
            Severity::Advisory => Color::Blue,
            Severity::Warning => Color::Yellow,
            Severity::Critical => Color::Red,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "✓",
            Severity::Advisory => "→",
            Severity::Warning => "⚠",
            Severity::Critical => "!",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A contiguous range of one dimension that maps to one fixed sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    SoilVeryDry,
    SoilDrying,
    SoilMoist,
    AirDangerous,
    AirPoor,
    AirGood,
    TemperatureHigh,
    TemperatureLow,
    TemperatureOptimal,
    HumidityLow,
    HumidityHigh,
    HumidityHealthy,
    RainExpected,
    Sunny,
}

impl Band {
    pub const COUNT: usize = 14;

    pub const ALL: [Band; Band::COUNT] = [
        Band::SoilVeryDry,
        Band::SoilDrying,
        Band::SoilMoist,
        Band::AirDangerous,
        Band::AirPoor,
        Band::AirGood,
        Band::TemperatureHigh,
        Band::TemperatureLow,
        Band::TemperatureOptimal,
        Band::HumidityLow,
        Band::HumidityHigh,
        Band::HumidityHealthy,
        Band::RainExpected,
        Band::Sunny,
    ];

    /// Row of this band in the sentence catalog; matches the order of `ALL`.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Band::SoilVeryDry | Band::SoilDrying | Band::SoilMoist => Dimension::SoilMoisture,
            Band::AirDangerous | Band::AirPoor | Band::AirGood => Dimension::AirQuality,
            Band::TemperatureHigh | Band::TemperatureLow | Band::TemperatureOptimal => {
                Dimension::Temperature
            }
            Band::HumidityLow | Band::HumidityHigh | Band::HumidityHealthy => Dimension::Humidity,
            Band::RainExpected | Band::Sunny => Dimension::Weather,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Band::SoilVeryDry | Band::AirDangerous => Severity::Critical,
            Band::AirPoor | Band::TemperatureHigh | Band::TemperatureLow => Severity::Warning,
            Band::SoilDrying
            | Band::HumidityLow
            | Band::HumidityHigh
            | Band::RainExpected
            | Band::Sunny => Severity::Advisory,
            Band::SoilMoist | Band::AirGood | Band::TemperatureOptimal | Band::HumidityHealthy => {
                Severity::Info
            }
        }
    }
}

/// One localized sentence of an advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub band: Band,
    pub text: &'static str,
}

impl Advice {
    pub fn dimension(&self) -> Dimension {
        self.band.dimension()
    }

    pub fn severity(&self) -> Severity {
        self.band.severity()
    }
}

/// Ordered advice for one reading, in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisoryMessage {
    pub language: Language,
    pub advice: Vec<Advice>,
}

impl AdvisoryMessage {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            advice: Vec::new(),
        }
    }

    pub fn push(&mut self, advice: Advice) {
        self.advice.push(advice);
    }

    pub fn lines(&self) -> Vec<&'static str> {
        self.advice.iter().map(|a| a.text).collect()
    }

    /// Display text: one sentence per line.
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn bands(&self) -> Vec<Band> {
        self.advice.iter().map(|a| a.band).collect()
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.advice.iter().map(|a| a.severity()).max()
    }
}

impl std::fmt::Display for AdvisoryMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_indices_follow_all() {
        for (i, band) in Band::ALL.iter().enumerate() {
            assert_eq!(band.index(), i);
        }
    }

    #[test]
    fn every_numeric_dimension_has_three_bands() {
        for dim in [
            Dimension::SoilMoisture,
            Dimension::AirQuality,
            Dimension::Temperature,
            Dimension::Humidity,
        ] {
            let count = Band::ALL.iter().filter(|b| b.dimension() == dim).count();
            assert_eq!(count, 3, "{} should have three bands", dim);
        }
        let weather = Band::ALL
            .iter()
            .filter(|b| b.dimension() == Dimension::Weather)
            .count();
        assert_eq!(weather, 2);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Advisory);
        assert!(Severity::Advisory > Severity::Info);
    }

    #[test]
    fn message_text_joins_lines() {
        let mut message = AdvisoryMessage::new(Language::English);
        assert_eq!(message.to_text(), "");
        assert_eq!(message.highest_severity(), None);

        message.push(Advice {
            band: Band::AirGood,
            text: "Air quality is good.",
        });
        message.push(Advice {
            band: Band::SoilVeryDry,
            text: "Soil moisture is very low. Water the crops immediately.",
        });

        assert_eq!(
            message.to_text(),
            "Air quality is good.\nSoil moisture is very low. Water the crops immediately."
        );
        assert_eq!(message.highest_severity(), Some(Severity::Critical));
        assert_eq!(message.bands(), vec![Band::AirGood, Band::SoilVeryDry]);
    }
}
