use crate::config::{is_credential_set, Config};
use crate::datasources::{
    BlynkClient, OllamaClient, OpenAiClient, OpenWeatherMapClient, PlantIdClient, SpeechClient,
    SpeechClip, ThingSpeakClient,
};
use crate::error::{FarmError, Result};
use crate::logic::field_status::{AirQualityStatus, IrrigationStatus};
use crate::logic::prompts::{self, CropAdvisoryRequest};
use crate::models::{
    DiseaseDiagnosis, Language, MotorState, SensorFeed, SensorSnapshot,
    WeatherSummary,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Feed responses memoized per `results` count.
#[derive(Debug)]
pub struct FeedCache {
    ttl: Duration,
    entries: HashMap<u32, (Instant, SensorFeed)>,
}

impl FeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, results: u32, now: Instant) -> Option<&SensorFeed> {
        self.entries
            .get(&results)
            .filter(|(stored, _)| now.saturating_duration_since(*stored) < self.ttl)
            .map(|(_, feed)| feed)
    }

    pub fn insert(&mut self, results: u32, feed: SensorFeed, now: Instant) {
        self.entries.insert(results, (now, feed));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Everything the dashboard shows after one refresh.
#[derive(Debug, Clone, Default)]
pub struct FieldSummary {
    pub feed: SensorFeed,
    pub snapshot: Option<SensorSnapshot>,
    pub weather: Option<WeatherSummary>,
    pub motor: Option<MotorState>,
    pub sensor_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl FieldSummary {
    pub fn irrigation_status(&self) -> Option<IrrigationStatus> {
        self.snapshot
            .as_ref()
            .map(|s| IrrigationStatus::evaluate(s, self.weather.as_ref()))
    }

    pub fn air_quality_status(&self) -> Option<AirQualityStatus> {
        self.snapshot.as_ref().map(AirQualityStatus::evaluate)
    }
}

pub struct DataSyncService {
    config: Config,
    data_dir: PathBuf,
    thingspeak_client: ThingSpeakClient,
    openweathermap_client: Option<OpenWeatherMapClient>,
    plantid_client: Option<PlantIdClient>,
    blynk_client: Option<BlynkClient>,
    ollama_client: OllamaClient,
    openai_client: Option<OpenAiClient>,
    speech_client: SpeechClient,
    feed_cache: Arc<RwLock<FeedCache>>,
}

impl DataSyncService {
    pub fn new(config: Config, data_dir: PathBuf) -> Self {
        let openweathermap_client = config
            .openweathermap
            .as_ref()
            .filter(|c| c.enabled && is_credential_set(&c.api_key))
            .map(|c| {
                tracing::info!(city = %c.city, "OpenWeatherMap client configured");
                OpenWeatherMapClient::new(c.clone())
            });
        if openweathermap_client.is_none() {
            tracing::info!("OpenWeatherMap not configured - weather advice will be skipped");
        }

        let plantid_client = config
            .plant_id
            .as_ref()
            .filter(|c| is_credential_set(&c.api_key))
            .map(|c| PlantIdClient::new(c.clone()));

        let blynk_client = config
            .blynk
            .as_ref()
            .filter(|c| is_credential_set(&c.token))
            .map(|c| BlynkClient::new(c.clone()));
        if blynk_client.is_none() {
            tracing::warn!("Blynk token not configured - motor control will be unavailable");
        }

        let openai_client = config
            .openai
            .as_ref()
            .filter(|c| is_credential_set(&c.api_key))
            .map(|c| OpenAiClient::new(c.clone()));

        let ttl = Duration::from_secs(config.thingspeak.cache_ttl_secs);

        Self {
            thingspeak_client: ThingSpeakClient::new(config.thingspeak.clone()),
            ollama_client: OllamaClient::new(config.ollama.clone()),
            speech_client: SpeechClient::new(config.speech.clone()),
            openweathermap_client,
            plantid_client,
            blynk_client,
            openai_client,
            feed_cache: Arc::new(RwLock::new(FeedCache::new(ttl))),
            data_dir,
            config,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn default_language(&self) -> Language {
        self.config.dashboard.language
    }

    pub fn has_motor(&self) -> bool {
        self.blynk_client.is_some()
    }

    /// Fetch the feed, serving from the cache while it is fresh.
    pub async fn fetch_feed(&self, results: u32) -> Result<SensorFeed> {
        let now = Instant::now();
        if let Some(feed) = self.feed_cache.read().await.get(results, now) {
            tracing::debug!(results, "Serving sensor feed from cache");
            return Ok(feed.clone());
        }

        let feed = self.thingspeak_client.fetch_feed(results).await?;
        self.feed_cache
            .write()
            .await
            .insert(results, feed.clone(), now);
        Ok(feed)
    }

    pub async fn latest_snapshot(&self) -> Result<SensorSnapshot> {
        self.fetch_feed(1).await?.latest_snapshot()
    }

    /// Current weather, or `None` when unconfigured or unavailable.
    pub async fn fetch_weather(&self) -> Option<WeatherSummary> {
        let client = self.openweathermap_client.as_ref()?;
        match client.fetch_current().await {
            Ok(weather) => Some(weather),
            Err(e) => {
                tracing::warn!("Failed to fetch weather: {}", e);
                None
            }
        }
    }

    pub async fn refresh(&self, force: bool) -> FieldSummary {
        if force {
            self.feed_cache.write().await.clear();
        }

        let mut summary = FieldSummary::default();

        match self.fetch_feed(self.config.thingspeak.results).await {
            Ok(feed) => {
                match feed.latest_snapshot() {
                    Ok(snapshot) => summary.snapshot = Some(snapshot),
                    Err(e) => {
                        tracing::warn!("Latest sensor entry unusable: {}", e);
                        summary.sensor_error = Some(e.to_string());
                    }
                }
                summary.feed = feed;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch sensor feed: {}", e);
                summary.sensor_error = Some(e.to_string());
            }
        }

        summary.weather = self.fetch_weather().await;

        if let Some(ref client) = self.blynk_client {
            match client.motor_status().await {
                Ok(state) => summary.motor = Some(state),
                Err(e) => tracing::warn!("Failed to read motor state: {}", e),
            }
        }

        summary.last_updated = Some(Utc::now());
        summary
    }

    fn motor_client(&self) -> Result<&BlynkClient> {
        self.blynk_client
            .as_ref()
            .ok_or_else(|| FarmError::Config("blynk token is not configured".into()))
    }

    pub async fn motor_status(&self) -> Result<MotorState> {
        self.motor_client()?.motor_status().await
    }

    pub async fn set_motor(&self, state: MotorState) -> Result<MotorState> {
        self.motor_client()?.set_motor(state).await
    }

    pub async fn toggle_motor(&self) -> Result<MotorState> {
        self.motor_client()?.toggle_motor().await
    }

    pub async fn ask(&self, question: &str, language: Language) -> Result<String> {
        self.ollama_client.ask(question, language).await
    }

    pub async fn diagnose(&self, image: &Path) -> Result<DiseaseDiagnosis> {
        let client = self
            .plantid_client
            .as_ref()
            .ok_or_else(|| FarmError::Config("plant_id api_key is not configured".into()))?;
        client.diagnose_file(image).await
    }

    /// Ask the cloud model for crop advice using the latest reading as context.
    pub async fn crop_advisory(&self, request: &CropAdvisoryRequest) -> Result<String> {
        if request.location.trim().is_empty() {
            return Err(FarmError::InvalidData("Please enter your location".into()));
        }
        let client = self
            .openai_client
            .as_ref()
            .ok_or_else(|| FarmError::Config("openai api_key is not configured".into()))?;

        let snapshot = match self.latest_snapshot().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Crop advisory without sensor context: {}", e);
                None
            }
        };

        let prompt = prompts::crop_advisory_prompt(request, snapshot.as_ref());
        client.complete(&prompt).await
    }

    pub async fn speak(&self, text: &str, language: Language, clip: SpeechClip) -> Result<PathBuf> {
        self.speech_client
            .save(text, language, &self.data_dir, clip)
            .await
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        let mut status = ConnectionStatus {
            thingspeak: self
                .thingspeak_client
                .test_connection()
                .await
                .unwrap_or(false),
            ollama: self.ollama_client.test_connection().await.unwrap_or(false),
            ..ConnectionStatus::default()
        };

        if let Some(ref client) = self.openweathermap_client {
            status.openweathermap = Some(client.test_connection().await.unwrap_or(false));
        }

        if let Some(ref client) = self.blynk_client {
            status.blynk = Some(client.test_connection().await.unwrap_or(false));
        }

        status
    }
}

/// Reachability of each service; `None` means not configured.
#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub thingspeak: bool,
    pub ollama: bool,
    pub openweathermap: Option<bool>,
    pub blynk: Option<bool>,
}

impl ConnectionStatus {
    pub fn core_connected(&self) -> bool {
        self.thingspeak
    }

    pub fn all_connected(&self) -> bool {
        self.thingspeak
            && self.ollama
            && self.openweathermap.unwrap_or(true)
            && self.blynk.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedEntry;

    fn feed_with_moisture(value: &str) -> SensorFeed {
        let entry: FeedEntry = serde_json::from_str(&format!(
            r#"{{"created_at":"2025-03-01T10:00:00Z","field1":"{}","field2":"500","field3":"25","field4":"60"}}"#,
            value
        ))
        .unwrap();
        SensorFeed {
            fetched_at: None,
            entries: vec![entry],
        }
    }

    #[test]
    fn cache_serves_until_ttl() {
        let start = Instant::now();
        let mut cache = FeedCache::new(Duration::from_secs(30));
        cache.insert(50, feed_with_moisture("20"), start);

        assert!(cache.get(50, start + Duration::from_secs(29)).is_some());
        assert!(cache.get(50, start + Duration::from_secs(30)).is_none());
    }

    #[test]
    fn cache_is_keyed_by_results() {
        let now = Instant::now();
        let mut cache = FeedCache::new(Duration::from_secs(30));
        cache.insert(1, feed_with_moisture("20"), now);
        cache.insert(50, feed_with_moisture("45"), now);

        let one = cache.get(1, now).unwrap();
        assert_eq!(one.latest().unwrap().soil_moisture_percent, Some(20.0));
        let fifty = cache.get(50, now).unwrap();
        assert_eq!(fifty.latest().unwrap().soil_moisture_percent, Some(45.0));
        assert!(cache.get(10, now).is_none());

        cache.clear();
        assert!(cache.get(1, now).is_none());
    }

    #[test]
    fn summary_statuses_need_a_snapshot() {
        let mut summary = FieldSummary::default();
        assert!(summary.irrigation_status().is_none());
        assert!(summary.air_quality_status().is_none());

        summary.snapshot = Some(SensorSnapshot::new(25.0, 1500.0, 30.0, 60.0).unwrap());
        assert_eq!(
            summary.irrigation_status(),
            Some(IrrigationStatus::WateringRecommended)
        );
        assert_eq!(summary.air_quality_status(), Some(AirQualityStatus::Poor));
    }

    #[test]
    fn connection_status_treats_unconfigured_as_ok() {
        let status = ConnectionStatus {
            thingspeak: true,
            ollama: true,
            openweathermap: None,
            blynk: Some(true),
        };
        assert!(status.all_connected());

        let status = ConnectionStatus {
            blynk: Some(false),
            ..status
        };
        assert!(!status.all_connected());
        assert!(status.core_connected());
    }

    #[tokio::test]
    async fn motor_commands_need_blynk() {
        let service = DataSyncService::new(Config::default(), std::env::temp_dir());
        assert!(!service.has_motor());
        assert!(matches!(
            service.toggle_motor().await,
            Err(FarmError::Config(_))
        ));
    }

    #[test]
    fn unresolved_placeholders_leave_clients_unconfigured() {
        let mut config = Config::default();
        config.dashboard.language = Language::Marathi;
        config.blynk = Some(crate::config::BlynkConfig {
            token: "${SMARTFARM_TEST_UNSET_TOKEN}".into(),
            pin: "V1".into(),
        });
        config.plant_id = Some(crate::config::PlantIdConfig {
            api_key: "${SMARTFARM_TEST_UNSET_KEY}".into(),
        });
        let service = DataSyncService::new(config.clone(), std::env::temp_dir());
        assert!(!service.has_motor());
        assert!(service.plantid_client.is_none());
        assert_eq!(service.default_language(), Language::Marathi);

        config.blynk = Some(crate::config::BlynkConfig {
            token: "real-token".into(),
            pin: "V1".into(),
        });
        let service = DataSyncService::new(config, std::env::temp_dir());
        assert!(service.has_motor());
    }

    #[tokio::test]
    async fn crop_advisory_requires_location() {
        let service = DataSyncService::new(Config::default(), std::env::temp_dir());
        let request = CropAdvisoryRequest {
            crop: Default::default(),
            stage: Default::default(),
            location: "   ".into(),
            language: Language::English,
            has_image: false,
        };
        assert!(matches!(
            service.crop_advisory(&request).await,
            Err(FarmError::InvalidData(_))
        ));
    }
}
