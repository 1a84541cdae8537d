use crate::config::OllamaConfig;
use crate::error::{FarmError, Result};
use crate::logic::prompts;
use crate::models::Language;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const FIRST_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(15);
const RETRY_TIMEOUT: Duration = Duration::from_secs(25);

const MIN_QUESTION_CHARS: usize = 3;

/// Local language model used by the voice assistant.
pub struct OllamaClient {
    client: reqwest::Client,
    config: OllamaConfig,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn troubleshooting(&self, cause: &str) -> FarmError {
        FarmError::DataSourceUnavailable(format!(
            "Ollama is not reachable at {} ({}). Start it with `ollama serve` and make sure the model is installed with `ollama pull {}`",
            self.config.url, cause, self.config.model
        ))
    }

    /// Confirm the server is up before sending a question.
    pub async fn health_check(&self) -> Result<()> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url()))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| self.troubleshooting(&e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.troubleshooting(&format!("status {}", response.status())));
        }
        Ok(())
    }

    /// Answer a farmer's question in the requested language.
    pub async fn ask(&self, question: &str, language: Language) -> Result<String> {
        let question = validate_question(question)?;
        self.health_check().await?;

        let prompt = prompts::assistant_prompt(question, language);
        tracing::debug!(model = %self.config.model, language = %language, "Asking Ollama");
        self.generate(&prompt).await
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions { temperature: 0.5 },
        };

        let mut response = self.post_generate(&request, FIRST_ATTEMPT_TIMEOUT).await?;
        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                "Ollama generate failed, retrying with a longer timeout"
            );
            response = self.post_generate(&request, RETRY_TIMEOUT).await?;
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmError::DataSourceUnavailable(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        parse_answer(&body)
    }

    async fn post_generate(
        &self,
        request: &GenerateRequest<'_>,
        timeout: Duration,
    ) -> Result<reqwest::Response> {
        self.client
            .post(format!("{}/api/generate", self.base_url()))
            .json(request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FarmError::AssistantTimeout(format!(
                        "no answer from {} within {}s",
                        self.config.model,
                        timeout.as_secs()
                    ))
                } else {
                    FarmError::DataSourceUnavailable(format!("Ollama: {}", e))
                }
            })
    }

    pub async fn test_connection(&self) -> Result<bool> {
        Ok(self.health_check().await.is_ok())
    }
}

fn validate_question(question: &str) -> Result<&str> {
    let trimmed = question.trim();
    if trimmed.chars().count() < MIN_QUESTION_CHARS {
        return Err(FarmError::InvalidData(
            "Please ask a longer question".into(),
        ));
    }
    Ok(trimmed)
}

fn parse_answer(body: &str) -> Result<String> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        FarmError::DataSourceUnavailable(format!("Failed to parse Ollama response: {}", e))
    })?;

    parsed
        .response
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .ok_or_else(|| FarmError::InvalidData("Empty response from AI".into()))
}
