use crate::error::{FarmError, Result};
use crate::models::{Band, Language};
use std::collections::HashSet;

const LANGUAGE_COUNT: usize = Language::ALL.len();

/// Sentence table: one row per band (in `Band::ALL` order), one column per
/// language (in `Language::ALL` order: English, Hindi, Marathi).
const SENTENCES: [[&str; LANGUAGE_COUNT]; Band::COUNT] = [
    // SoilVeryDry
    [
        "Soil moisture is very low. Water the crops immediately.",
        "मिट्टी की नमी बहुत कम है। तुरंत फसलों को पानी दें।",
        "मातीतील आर्द्रता खूप कमी आहे. त्वरित पिकांना पाणी द्या.",
    ],
    // SoilDrying
    [
        "Soil is getting dry. Plan watering soon.",
        "मिट्टी सूखने लगी है। जल्द पानी देने की योजना बनाएं।",
        "माती कोरडी होत आहे. लवकरच पाणी देण्याची योजना करा.",
    ],
    // SoilMoist
    [
        "Soil moisture is good. No watering needed.",
        "मिट्टी की नमी अच्छी है। पानी देने की आवश्यकता नहीं है।",
        "मातीतील आर्द्रता चांगली आहे. पाणी देण्याची गरज नाही.",
    ],
    // AirDangerous
    [
        "Air quality is dangerous. Avoid staying outside for long.",
        "हवा की गुणवत्ता खतरनाक है। लंबे समय तक बाहर रहने से बचें।",
        "हवेची गुणवत्ता धोकादायक आहे. जास्त वेळ बाहेर राहणे टाळा.",
    ],
    // AirPoor
    [
        "Air quality is poor. Take precautions.",
        "हवा की गुणवत्ता खराब है। सावधान रहें।",
        "हवेची गुणवत्ता खराब आहे. काळजी घ्या.",
    ],
    // AirGood
    [
        "Air quality is good.",
        "हवा की गुणवत्ता अच्छी है।",
        "हवेची गुणवत्ता चांगली आहे.",
    ],
    // TemperatureHigh
    [
        "High temperature detected. Water crops early morning or late evening.",
        "उच्च तापमान है। फसलों को सुबह जल्दी या शाम को पानी दें।",
        "जास्त तापमान आहे. सकाळी लवकर किंवा संध्याकाळी पिकांना पाणी द्या.",
    ],
    // TemperatureLow
    [
        "Low temperature detected. Protect crops from cold.",
        "कम तापमान है। फसलों को ठंड से बचाएं।",
        "कमी तापमान आहे. पिकांना थंडीपासून वाचा.",
    ],
    // TemperatureOptimal
    [
        "Temperature is optimal for crops.",
        "तापमान फसलों के लिए अनुकूल है।",
        "तापमान पिकांसाठी योग्य आहे.",
    ],
    // HumidityLow
    [
        "Humidity is low. Increase watering frequency.",
        "नमी कम है। पानी देने की आवृत्ति बढ़ाएं।",
        "आर्द्रता कमी आहे. पाणी देण्याची वारंवारता वाढवा.",
    ],
    // HumidityHigh
    [
        "Humidity is high. Watch for fungal diseases.",
        "नमी अधिक है। फफूंद रोगों के लिए सावधान रहें।",
        "आर्द्रता जास्त आहे. बुरशीजन्य रोगांपासून सावध रहा.",
    ],
    // HumidityHealthy
    [
        "Humidity is within a healthy range.",
        "नमी स्वस्थ सीमा में है।",
        "आर्द्रता योग्य पातळीवर आहे.",
    ],
    // RainExpected
    [
        "Rain expected. Reduce irrigation.",
        "बारिश की संभावना है। सिंचाई कम करें।",
        "पावसाची शक्यता आहे. सिंचन कमी करा.",
    ],
    // Sunny
    [
        "Sunny weather. Monitor soil dryness.",
        "धूप का मौसम है। मिट्टी की नमी पर नज़र रखें।",
        "उन्हाळे हवामान आहे. मातीच्या आर्द्रतेवर लक्ष ठेवा.",
    ],
];

/// Band × language sentence lookup.
pub struct AdvisoryCatalog;

impl AdvisoryCatalog {
    pub fn sentence(band: Band, language: Language) -> &'static str {
        SENTENCES[band.index()][language.index()]
    }

    /// Check every cell is populated and no two bands share a sentence
    /// within one language. Run once at startup.
    pub fn validate() -> Result<()> {
        for language in Language::ALL {
            let mut seen = HashSet::new();
            for band in Band::ALL {
                let sentence = Self::sentence(band, language);
                if sentence.trim().is_empty() {
                    return Err(FarmError::Config(format!(
                        "advisory catalog has no {} sentence for {:?}",
                        language, band
                    )));
                }
                if sentence != sentence.trim() {
                    return Err(FarmError::Config(format!(
                        "advisory catalog {} sentence for {:?} has stray whitespace",
                        language, band
                    )));
                }
                if !seen.insert(sentence) {
                    return Err(FarmError::Config(format!(
                        "advisory catalog {} sentence for {:?} duplicates another band",
                        language, band
                    )));
                }
            }
        }
        Ok(())
    }
}
