use crate::config::ThingSpeakConfig;
use crate::error::{FarmError, Result};
use crate::models::{FeedEntry, SensorFeed};
use chrono::Utc;
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.thingspeak.com";

pub struct ThingSpeakClient {
    client: reqwest::Client,
    config: ThingSpeakConfig,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    feeds: Vec<FeedEntry>,
}

impl ThingSpeakClient {
    pub fn new(config: ThingSpeakConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn feed_url(&self) -> String {
        format!(
            "{}/channels/{}/feeds.json",
            API_BASE_URL, self.config.channel_id
        )
    }

    /// Fetch the last `results` rows of the channel, oldest first.
    pub async fn fetch_feed(&self, results: u32) -> Result<SensorFeed> {
        let results = results.to_string();
        let response = self
            .client
            .get(self.feed_url())
            .query(&[
                ("api_key", self.config.read_api_key.as_str()),
                ("results", results.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FarmError::DataSourceUnavailable(format!("ThingSpeak: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmError::DataSourceUnavailable(format!(
                "ThingSpeak returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        Self::parse_feed(&body)
    }

    fn parse_feed(body: &str) -> Result<SensorFeed> {
        let parsed: FeedResponse = serde_json::from_str(body).map_err(|e| {
            FarmError::DataSourceUnavailable(format!("Failed to parse ThingSpeak response: {}", e))
        })?;

        let mut entries = parsed.feeds;
        entries.sort_by_key(|e| e.created_at);

        Ok(SensorFeed {
            fetched_at: Some(Utc::now()),
            entries,
        })
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.feed_url())
            .query(&[
                ("api_key", self.config.read_api_key.as_str()),
                ("results", "1"),
            ])
            .send()
            .await
            .map_err(|e| FarmError::DataSourceUnavailable(format!("ThingSpeak: {}", e)))?;

        Ok(response.status().is_success())
    }
}
