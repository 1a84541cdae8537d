use crate::config::PlantIdConfig;
use crate::error::{FarmError, Result};
use crate::models::DiseaseDiagnosis;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const HEALTH_ASSESSMENT_URL: &str = "https://api.plant.id/v2/health_assessment";

const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub struct PlantIdClient {
    client: reqwest::Client,
    config: PlantIdConfig,
}

#[derive(Debug, Serialize)]
struct HealthAssessmentRequest<'a> {
    api_key: &'a str,
    images: Vec<String>,
    modifiers: [&'static str; 1],
    plant_details: [&'static str; 4],
}

#[derive(Debug, Deserialize)]
struct HealthAssessmentResponse {
    health_assessment: Option<HealthAssessment>,
}

#[derive(Debug, Deserialize)]
struct HealthAssessment {
    #[serde(default)]
    diseases: Vec<Disease>,
}

#[derive(Debug, Deserialize)]
struct Disease {
    name: Option<String>,
    description: Option<String>,
    treatment: Option<Treatment>,
    disease_details: Option<DiseaseDetails>,
}

#[derive(Debug, Deserialize)]
struct DiseaseDetails {
    description: Option<String>,
    treatment: Option<Treatment>,
}

#[derive(Debug, Clone, Deserialize)]
struct Treatment {
    biological: Option<serde_json::Value>,
}

impl Treatment {
    /// Biological treatment arrives either as a string or a list of steps.
    fn biological_text(&self) -> Option<String> {
        match self.biological.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let steps: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
                (!steps.is_empty()).then(|| steps.join(" "))
            }
            _ => None,
        }
    }
}

impl PlantIdClient {
    pub fn new(config: PlantIdConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, config }
    }

    /// Load a crop photo from disk and run a health assessment on it.
    pub async fn diagnose_file(&self, path: &Path) -> Result<DiseaseDiagnosis> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(FarmError::InvalidData(format!(
                "{} is not a jpg, jpeg or png image",
                path.display()
            )));
        }

        let bytes = tokio::fs::read(path).await?;
        self.diagnose(&bytes).await
    }

    pub async fn diagnose(&self, image: &[u8]) -> Result<DiseaseDiagnosis> {
        if image.is_empty() {
            return Err(FarmError::InvalidData("image is empty".into()));
        }

        let request = HealthAssessmentRequest {
            api_key: &self.config.api_key,
            images: vec![base64::engine::general_purpose::STANDARD.encode(image)],
            modifiers: ["crops_simple"],
            plant_details: ["disease", "common_names", "url", "description"],
        };

        tracing::debug!(bytes = image.len(), "Sending image to Plant.id");

        let response = self
            .client
            .post(HEALTH_ASSESSMENT_URL)
            .json(&request)
            .send()
            .await
            .map_err(|e| FarmError::DataSourceUnavailable(format!("Plant.id: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmError::DataSourceUnavailable(format!(
                "Plant.id returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        Self::parse_diagnosis(&body)
    }

    fn parse_diagnosis(body: &str) -> Result<DiseaseDiagnosis> {
        let parsed: HealthAssessmentResponse = serde_json::from_str(body).map_err(|e| {
            FarmError::DataSourceUnavailable(format!("Failed to parse Plant.id response: {}", e))
        })?;

        let disease = parsed
            .health_assessment
            .and_then(|h| h.diseases.into_iter().next())
            .ok_or_else(|| FarmError::NotFound("No disease detected".into()))?;

        let details = disease.disease_details.as_ref();
        let description = disease
            .description
            .clone()
            .or_else(|| details.and_then(|d| d.description.clone()))
            .unwrap_or_else(|| "No description available.".to_string());
        let treatment = disease
            .treatment
            .as_ref()
            .or_else(|| details.and_then(|d| d.treatment.as_ref()))
            .and_then(|t| t.biological_text())
            .unwrap_or_else(|| "No treatment info.".to_string());

        Ok(DiseaseDiagnosis {
            name: disease
                .name
                .unwrap_or_else(|| "Unknown Disease".to_string()),
            description,
            treatment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_disease() {
        let body = r#"{
            "health_assessment": {
                "is_healthy": false,
                "diseases": [
                    {"name": "leaf rust", "description": "Orange pustules.",
                     "treatment": {"biological": "Remove infected leaves."}},
                    {"name": "powdery mildew"}
                ]
            }
        }"#;
        let diagnosis = PlantIdClient::parse_diagnosis(body).unwrap();
        assert_eq!(diagnosis.name, "leaf rust");
        assert_eq!(diagnosis.description, "Orange pustules.");
        assert_eq!(diagnosis.treatment, "Remove infected leaves.");
    }

    #[test]
    fn fills_defaults() {
        let body = r#"{"health_assessment": {"diseases": [{}]}}"#;
        let diagnosis = PlantIdClient::parse_diagnosis(body).unwrap();
        assert_eq!(diagnosis.name, "Unknown Disease");
        assert_eq!(diagnosis.description, "No description available.");
        assert_eq!(diagnosis.treatment, "No treatment info.");
    }

    #[test]
    fn reads_nested_details() {
        let body = r#"{"health_assessment": {"diseases": [{
            "name": "blight",
            "disease_details": {
                "description": "Brown lesions.",
                "treatment": {"biological": ["Prune.", "Improve airflow."]}
            }
        }]}}"#;
        let diagnosis = PlantIdClient::parse_diagnosis(body).unwrap();
        assert_eq!(diagnosis.description, "Brown lesions.");
        assert_eq!(diagnosis.treatment, "Prune. Improve airflow.");
    }

    #[test]
    fn no_disease_is_not_found() {
        let body = r#"{"health_assessment": {"diseases": []}}"#;
        assert!(matches!(
            PlantIdClient::parse_diagnosis(body),
            Err(FarmError::NotFound(_))
        ));
        assert!(matches!(
            PlantIdClient::parse_diagnosis("{}"),
            Err(FarmError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn rejects_unsupported_files() {
        let client = PlantIdClient::new(PlantIdConfig {
            api_key: "test".into(),
        });
        let err = client
            .diagnose_file(Path::new("field_notes.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, FarmError::InvalidData(_)));
    }

    #[tokio::test]
    async fn rejects_empty_images() {
        let client = PlantIdClient::new(PlantIdConfig {
            api_key: "test".into(),
        });
        assert!(matches!(
            client.diagnose(&[]).await,
            Err(FarmError::InvalidData(_))
        ));
    }
}
