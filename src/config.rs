use crate::error::{FarmError, Result};
use crate::models::Language;
use dialoguer::{Input, Password, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `SMARTFARM__OPENAI__API_KEY`.
const ENV_PREFIX: &str = "SMARTFARM";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub thingspeak: ThingSpeakConfig,
    pub openweathermap: Option<OpenWeatherMapConfig>,
    pub plant_id: Option<PlantIdConfig>,
    pub blynk: Option<BlynkConfig>,
    #[serde(default)]
    pub ollama: OllamaConfig,
    pub openai: Option<OpenAiConfig>,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct ThingSpeakConfig {
    pub channel_id: String,
    pub read_api_key: String,
    /// Rows fetched for the dashboard trend view
    #[serde(default = "default_results")]
    pub results: u32,
    /// How long a fetched feed is reused before hitting the API again
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_results() -> u32 {
    50
}

fn default_cache_ttl_secs() -> u64 {
    30
}

impl std::fmt::Debug for ThingSpeakConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThingSpeakConfig")
            .field("channel_id", &self.channel_id)
            .field("read_api_key", &"[REDACTED]")
            .field("results", &self.results)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    pub city: String,
    /// Language of the weather description. Keyword matching for rain/sun
    /// only works with English descriptions.
    #[serde(default = "default_weather_lang")]
    pub lang: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_weather_lang() -> String {
    "en".into()
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("city", &self.city)
            .field("lang", &self.lang)
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct PlantIdConfig {
    pub api_key: String,
}

impl std::fmt::Debug for PlantIdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlantIdConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct BlynkConfig {
    pub token: String,
    /// Virtual pin wired to the pump relay
    #[serde(default = "default_motor_pin")]
    pub pin: String,
}

fn default_motor_pin() -> String {
    "V1".into()
}

impl std::fmt::Debug for BlynkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlynkConfig")
            .field("token", &"[REDACTED]")
            .field("pin", &self.pin)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_url() -> String {
    "http://127.0.0.1:11434".into()
}

fn default_ollama_model() -> String {
    "deepseek-r1:8b".into()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_ollama_model(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".into()
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpeechConfig {
    /// Top-level domain of the translate host used for speech synthesis
    #[serde(default = "default_tld")]
    pub tld: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_tld() -> String {
    "com".into()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            tld: default_tld(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub language: Language,
}

impl Config {
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(FarmError::Config(format!(
                "Config file not found at {:?}. Run `smartfarm init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FarmError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse YAML text, substituting `${VAR}` placeholders and applying
    /// `SMARTFARM__SECTION__KEY` environment overrides on top.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(&content, config::FileFormat::Yaml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.thingspeak.channel_id.trim().is_empty() {
            return Err(FarmError::Config("thingspeak.channel_id is empty".into()));
        }
        if self.thingspeak.results == 0 {
            return Err(FarmError::Config(
                "thingspeak.results must be at least 1".into(),
            ));
        }
        if let Some(ref blynk) = self.blynk {
            if blynk.pin.trim().is_empty() {
                return Err(FarmError::Config("blynk.pin is empty".into()));
            }
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("smartfarm").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/smartfarm/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FarmError::Config("Cannot determine config directory".into()))?
            .join("smartfarm");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up SmartFarm!");
        println!();

        // --- ThingSpeak ---
        println!("ThingSpeak sensor channel");
        let channel_id: String = Input::new()
            .with_prompt("  Channel ID")
            .interact_text()
            .map_err(input_error)?;

        let read_api_key: String = Password::new()
            .with_prompt("  Read API key")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;

        println!();

        // --- OpenWeatherMap (optional) ---
        println!("OpenWeatherMap (leave API key blank to skip)");
        let owm_api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        let openweathermap = if owm_api_key.is_empty() {
            None
        } else {
            let city: String = Input::new()
                .with_prompt("  City")
                .default("Mumbai".into())
                .interact_text()
                .map_err(input_error)?;

            Some(OpenWeatherMapConfig {
                api_key: owm_api_key,
                city,
                lang: default_weather_lang(),
                enabled: true,
            })
        };

        println!();

        // --- Blynk (optional) ---
        println!("Blynk motor relay (leave token blank to skip)");
        let blynk_token: String = Password::new()
            .with_prompt("  Device token")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;

        let blynk = if blynk_token.is_empty() {
            None
        } else {
            let pin: String = Input::new()
                .with_prompt("  Virtual pin")
                .default(default_motor_pin())
                .interact_text()
                .map_err(input_error)?;
            Some(BlynkConfig {
                token: blynk_token,
                pin,
            })
        };

        println!();

        // --- Plant.id (optional) ---
        println!("Plant.id disease detection (leave API key blank to skip)");
        let plant_id_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;
        let plant_id = (!plant_id_key.is_empty()).then(|| PlantIdConfig {
            api_key: plant_id_key,
        });

        println!();

        // --- OpenAI (optional) ---
        println!("OpenAI crop advisory (leave API key blank to skip)");
        let openai_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;
        let openai = (!openai_key.is_empty()).then(|| OpenAiConfig {
            api_key: openai_key,
            model: default_openai_model(),
        });

        println!();

        // --- Dashboard ---
        let names: Vec<&str> = Language::ALL.iter().map(|l| l.as_str()).collect();
        let language_idx = Select::new()
            .with_prompt("Advice language")
            .items(&names)
            .default(0)
            .interact()
            .map_err(input_error)?;

        let config = Config {
            thingspeak: ThingSpeakConfig {
                channel_id,
                read_api_key,
                results: default_results(),
                cache_ttl_secs: default_cache_ttl_secs(),
            },
            openweathermap,
            plant_id,
            blynk,
            ollama: OllamaConfig::default(),
            openai,
            speech: SpeechConfig::default(),
            dashboard: DashboardConfig {
                language: Language::ALL[language_idx],
            },
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FarmError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# SmartFarm Configuration\n# Generated by `smartfarm init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("SMARTFARM_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| FarmError::Config("Cannot determine data directory".into()))?
            .join("smartfarm");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }
}

/// True when a credential holds a real value. A `${VAR}` placeholder whose
/// variable was never set survives substitution verbatim and counts as unset.
pub fn is_credential_set(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    match regex_lite::Regex::new(r"^\$\{[A-Z0-9_]+\}$") {
        Ok(re) => !re.is_match(value),
        Err(_) => true,
    }
}

fn input_error(e: dialoguer::Error) -> FarmError {
    FarmError::Config(format!("Input error: {}", e))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thingspeak: ThingSpeakConfig {
                channel_id: "2888465".into(),
                read_api_key: "".into(),
                results: default_results(),
                cache_ttl_secs: default_cache_ttl_secs(),
            },
            openweathermap: None,
            plant_id: None,
            blynk: None,
            ollama: OllamaConfig::default(),
            openai: None,
            speech: SpeechConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_gets_defaults() {
        let config = Config::from_yaml(
            r#"
thingspeak:
  channel_id: "2888465"
  read_api_key: abc
"#,
        )
        .unwrap();

        assert_eq!(config.thingspeak.results, 50);
        assert_eq!(config.thingspeak.cache_ttl_secs, 30);
        assert_eq!(config.ollama.url, "http://127.0.0.1:11434");
        assert_eq!(config.ollama.model, "deepseek-r1:8b");
        assert_eq!(config.speech.tld, "com");
        assert_eq!(config.dashboard.language, Language::English);
        assert!(config.openweathermap.is_none());
        assert!(config.blynk.is_none());
    }

    #[test]
    fn optional_sections_parse() {
        let config = Config::from_yaml(
            r#"
thingspeak:
  channel_id: "42"
  read_api_key: abc
  results: 10
openweathermap:
  api_key: owm
  city: Pune
blynk:
  token: tok
openai:
  api_key: sk
dashboard:
  language: Marathi
"#,
        )
        .unwrap();

        let owm = config.openweathermap.unwrap();
        assert_eq!(owm.city, "Pune");
        assert_eq!(owm.lang, "en");
        assert!(owm.enabled);
        assert_eq!(config.blynk.unwrap().pin, "V1");
        assert_eq!(config.openai.unwrap().model, "gpt-3.5-turbo");
        assert_eq!(config.dashboard.language, Language::Marathi);
        assert_eq!(config.thingspeak.results, 10);
    }

    #[test]
    fn env_placeholders_are_substituted() {
        std::env::set_var("SMARTFARM_TEST_READ_KEY", "from-env");
        let config = Config::from_yaml(
            r#"
thingspeak:
  channel_id: "42"
  read_api_key: ${SMARTFARM_TEST_READ_KEY}
"#,
        )
        .unwrap();
        assert_eq!(config.thingspeak.read_api_key, "from-env");
    }

    #[test]
    fn unresolved_placeholder_is_not_a_credential() {
        std::env::remove_var("SMARTFARM_TEST_UNSET_KEY");
        let config = Config::from_yaml(
            r#"
thingspeak:
  channel_id: "42"
  read_api_key: abc
plant_id:
  api_key: ${SMARTFARM_TEST_UNSET_KEY}
"#,
        )
        .unwrap();
        let key = config.plant_id.unwrap().api_key;
        assert_eq!(key, "${SMARTFARM_TEST_UNSET_KEY}");
        assert!(!is_credential_set(&key));

        assert!(!is_credential_set(""));
        assert!(!is_credential_set("   "));
        assert!(is_credential_set("sk-live-123"));
        assert!(is_credential_set("prefix-${NOT_WHOLE}"));
    }

    #[test]
    fn empty_channel_is_rejected() {
        let err = Config::from_yaml(
            r#"
thingspeak:
  channel_id: ""
  read_api_key: abc
"#,
        )
        .unwrap_err();
        assert!(matches!(err, FarmError::Config(_)));
    }

    #[test]
    fn missing_thingspeak_is_rejected() {
        assert!(Config::from_yaml("openai:\n  api_key: sk\n").is_err());
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut config = Config::default();
        config.thingspeak.read_api_key = "super-secret".into();
        config.openai = Some(OpenAiConfig {
            api_key: "sk-secret".into(),
            model: default_openai_model(),
        });
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_config_is_valid() {
        Config::default().validate().unwrap();
    }
}
