use crate::config::SpeechConfig;
use crate::error::{FarmError, Result};
use crate::models::Language;
use std::path::{Path, PathBuf};

const MAX_CHUNK_CHARS: usize = 100;

/// Where a synthesized clip is written inside the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechClip {
    FarmerAdvice,
    AssistantAnswer,
    CropAdvisory,
}

impl SpeechClip {
    pub fn file_name(&self) -> &'static str {
        match self {
            SpeechClip::FarmerAdvice => "farmer_advice.mp3",
            SpeechClip::AssistantAnswer => "assistant_answer.mp3",
            SpeechClip::CropAdvisory => "advisory.mp3",
        }
    }
}

/// Text-to-speech through the Google Translate voice endpoint.
pub struct SpeechClient {
    client: reqwest::Client,
    config: SpeechConfig,
}

impl SpeechClient {
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn tts_url(&self) -> String {
        format!(
            "https://translate.google.{}/translate_tts",
            self.config.tld
        )
    }

    /// Synthesize `text` as MP3 bytes.
    pub async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>> {
        if !self.config.enabled {
            return Err(FarmError::Config("speech synthesis is disabled".into()));
        }

        let chunks = split_text(text);
        if chunks.is_empty() {
            return Err(FarmError::InvalidData("No text to speak".into()));
        }

        let mut audio = Vec::new();
        for chunk in &chunks {
            let response = self
                .client
                .get(self.tts_url())
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", language.code()),
                    ("q", chunk.as_str()),
                ])
                .send()
                .await
                .map_err(|e| FarmError::DataSourceUnavailable(format!("Speech: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(FarmError::DataSourceUnavailable(format!(
                    "Speech returned {}: {}",
                    status, body
                )));
            }

            audio.extend_from_slice(&response.bytes().await?);
        }

        tracing::debug!(chunks = chunks.len(), bytes = audio.len(), "Synthesized speech");
        Ok(audio)
    }

    /// Synthesize and write the clip under `data_dir`, returning its path.
    pub async fn save(
        &self,
        text: &str,
        language: Language,
        data_dir: &Path,
        clip: SpeechClip,
    ) -> Result<PathBuf> {
        let audio = self.synthesize(text, language).await?;
        tokio::fs::create_dir_all(data_dir).await?;
        let path = data_dir.join(clip.file_name());
        tokio::fs::write(&path, audio).await?;
        tracing::info!(path = %path.display(), "Saved speech clip");
        Ok(path)
    }
}

/// Pack words into chunks of at most 100 characters.
///
/// A single word longer than the limit is cut at character boundaries.
fn split_text(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > MAX_CHUNK_CHARS {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(MAX_CHUNK_CHARS) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { word_len + 1 };
        if current_len + needed > MAX_CHUNK_CHARS {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(
            split_text("Air quality is good."),
            vec!["Air quality is good.".to_string()]
        );
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(split_text("").is_empty());
        assert!(split_text(" \n\t ").is_empty());
    }

    #[test]
    fn newlines_become_spaces() {
        let chunks = split_text("Air quality is good.\nTemperature is optimal for crops.");
        assert_eq!(
            chunks,
            vec!["Air quality is good. Temperature is optimal for crops.".to_string()]
        );
    }

    #[test]
    fn long_words_are_cut() {
        let word = "a".repeat(250);
        let chunks = split_text(&word);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 50);
    }

    #[test]
    fn devanagari_counts_characters() {
        let text = "मिट्टी में नमी बहुत कम है। तुरंत फसलों को पानी दें। ".repeat(5);
        for chunk in split_text(&text) {
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS);
        }
    }

    #[test]
    fn clip_file_names() {
        assert_eq!(SpeechClip::FarmerAdvice.file_name(), "farmer_advice.mp3");
        assert_eq!(SpeechClip::AssistantAnswer.file_name(), "assistant_answer.mp3");
        assert_eq!(SpeechClip::CropAdvisory.file_name(), "advisory.mp3");
    }

    #[tokio::test]
    async fn empty_text_is_rejected_before_any_request() {
        let client = SpeechClient::new(SpeechConfig::default());
        let err = client.synthesize("   ", Language::Hindi).await.unwrap_err();
        assert!(matches!(err, FarmError::InvalidData(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn chunks_respect_limit_and_keep_words(words in prop::collection::vec("[a-zA-Z]{1,30}", 0..60)) {
            let text = words.join(" ");
            let chunks = split_text(&text);
            for chunk in &chunks {
                prop_assert!(chunk.chars().count() <= MAX_CHUNK_CHARS);
                prop_assert!(!chunk.is_empty());
            }
            prop_assert_eq!(chunks.join(" "), text);
        }
    }
}
