use crate::models::{Crop, GrowthStage, Language, SensorSnapshot};

const NO_SENSOR_DATA: &str = "Sensor data is not available right now.";
const IMAGE_NOTE: &str =
    "The farmer has uploaded a crop/field image. Consider this while giving advice.";

/// Prompt for the voice assistant. The language is named by its two-letter code.
pub fn assistant_prompt(question: &str, language: Language) -> String {
    format!(
        "You are an agricultural expert helping Indian farmers.\nRespond in {}.\nQuestion: {}\nProvide 3 practical suggestions:",
        language.code(),
        question
    )
}

pub fn sensor_description(snapshot: Option<&SensorSnapshot>) -> String {
    snapshot
        .map(|s| s.describe())
        .unwrap_or_else(|| NO_SENSOR_DATA.to_string())
}

#[derive(Debug, Clone)]
pub struct CropAdvisoryRequest {
    pub crop: Crop,
    pub stage: GrowthStage,
    pub location: String,
    pub language: Language,
    pub has_image: bool,
}

/// Prompt for the crop advisory. The language is named by its locale tag.
pub fn crop_advisory_prompt(
    request: &CropAdvisoryRequest,
    snapshot: Option<&SensorSnapshot>,
) -> String {
    let image_desc = if request.has_image { IMAGE_NOTE } else { "" };
    format!(
        "Give detailed, practical farming advice for {} at the {} stage in {}. \
         Include watering, fertilizer, pest/disease management, and weather tips. \
         {} {} Respond in the language code: {}.",
        request.crop,
        request.stage,
        request.location.trim(),
        sensor_description(snapshot),
        image_desc,
        request.language.locale()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_prompt_uses_language_code() {
        assert_eq!(
            assistant_prompt("When should I sow wheat?", Language::Marathi),
            "You are an agricultural expert helping Indian farmers.\nRespond in mr.\nQuestion: When should I sow wheat?\nProvide 3 practical suggestions:"
        );
    }

    #[test]
    fn crop_prompt_with_sensors_and_image() {
        let request = CropAdvisoryRequest {
            crop: Crop::Rice,
            stage: GrowthStage::Flowering,
            location: " Nashik ".into(),
            language: Language::Hindi,
            has_image: true,
        };
        let snapshot = SensorSnapshot::new(32.0, 640.0, 29.5, 71.0).unwrap();
        assert_eq!(
            crop_advisory_prompt(&request, Some(&snapshot)),
            "Give detailed, practical farming advice for Rice at the Flowering stage in Nashik. \
             Include watering, fertilizer, pest/disease management, and weather tips. \
             Current sensor readings: Soil Moisture: 32.0%, Air Quality: 640.0 ppm, Temperature: 29.5°C, Humidity: 71.0%. \
             The farmer has uploaded a crop/field image. Consider this while giving advice. \
             Respond in the language code: hi-IN."
        );
    }

    #[test]
    fn crop_prompt_without_sensors_or_image() {
        let request = CropAdvisoryRequest {
            crop: Crop::Wheat,
            stage: GrowthStage::Sowing,
            location: "Pune".into(),
            language: Language::English,
            has_image: false,
        };
        let prompt = crop_advisory_prompt(&request, None);
        assert!(prompt.contains("Sensor data is not available right now.  Respond in the language code: en-IN."));
        assert!(!prompt.contains("uploaded"));
    }
}
