use crate::error::{FarmError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crop {
    #[default]
    Wheat,
    Rice,
    Maize,
    Cotton,
    Soybean,
    Other,
}

impl Crop {
    pub const ALL: [Crop; 6] = [
        Crop::Wheat,
        Crop::Rice,
        Crop::Maize,
        Crop::Cotton,
        Crop::Soybean,
        Crop::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Wheat => "Wheat",
            Crop::Rice => "Rice",
            Crop::Maize => "Maize",
            Crop::Cotton => "Cotton",
            Crop::Soybean => "Soybean",
            Crop::Other => "Other",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn parse(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == lower)
            .ok_or_else(|| FarmError::InvalidData(format!("unknown crop '{}'", s)))
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthStage {
    #[default]
    Sowing,
    Vegetative,
    Flowering,
    Fruiting,
    Harvest,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Sowing,
        GrowthStage::Vegetative,
        GrowthStage::Flowering,
        GrowthStage::Fruiting,
        GrowthStage::Harvest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Sowing => "Sowing",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Flowering => "Flowering",
            GrowthStage::Fruiting => "Fruiting",
            GrowthStage::Harvest => "Harvest",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn parse(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().to_lowercase() == lower)
            .ok_or_else(|| FarmError::InvalidData(format!("unknown growth stage '{}'", s)))
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_parse_is_case_insensitive() {
        assert_eq!(Crop::parse("rice").unwrap(), Crop::Rice);
        assert_eq!(Crop::parse(" SOYBEAN ").unwrap(), Crop::Soybean);
        assert!(Crop::parse("banana").is_err());
    }

    #[test]
    fn stage_parse() {
        assert_eq!(GrowthStage::parse("flowering").unwrap(), GrowthStage::Flowering);
        assert!(GrowthStage::parse("dormant").is_err());
    }

    #[test]
    fn next_wraps_around() {
        assert_eq!(Crop::Other.next(), Crop::Wheat);
        assert_eq!(GrowthStage::Harvest.next(), GrowthStage::Sowing);
        assert_eq!(GrowthStage::Sowing.next(), GrowthStage::Vegetative);
    }

    #[test]
    fn prev_undoes_next() {
        assert_eq!(Crop::Wheat.prev(), Crop::Other);
        assert_eq!(GrowthStage::Sowing.prev(), GrowthStage::Harvest);
        for crop in Crop::ALL {
            assert_eq!(crop.next().prev(), crop);
        }
        for stage in GrowthStage::ALL {
            assert_eq!(stage.next().prev(), stage);
        }
    }
}
