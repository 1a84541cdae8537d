pub mod blynk;
pub mod ollama;
pub mod openai;
pub mod openweathermap;
pub mod plantid;
pub mod speech;
pub mod thingspeak;

pub use blynk::BlynkClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use openweathermap::OpenWeatherMapClient;
pub use plantid::PlantIdClient;
pub use speech::{SpeechClient, SpeechClip};
pub use thingspeak::ThingSpeakClient;
