pub mod air_quality;
pub mod catalog;
pub mod engine;
pub mod humidity;
pub mod soil_moisture;
pub mod temperature;
pub mod weather;

pub use catalog::AdvisoryCatalog;
pub use engine::AdvisoryEngine;

use crate::models::{Band, SensorSnapshot, WeatherSummary};

/// Trait for one advisory dimension
pub trait DimensionRule: Send + Sync {
    /// Pick the band the inputs fall into, or `None` when the dimension has
    /// nothing to say
    fn classify(&self, snapshot: &SensorSnapshot, weather: Option<&WeatherSummary>)
        -> Option<Band>;
}
