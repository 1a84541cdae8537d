use crate::config::BlynkConfig;
use crate::error::{FarmError, Result};
use crate::models::MotorState;

const API_BASE_URL: &str = "https://blynk.cloud/external/api";

/// Reads and drives the irrigation motor through a Blynk virtual pin.
pub struct BlynkClient {
    client: reqwest::Client,
    config: BlynkConfig,
}

impl BlynkClient {
    pub fn new(config: BlynkConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn get_url(&self) -> String {
        format!(
            "{}/get?token={}&{}",
            API_BASE_URL, self.config.token, self.config.pin
        )
    }

    fn update_url(&self, state: MotorState) -> String {
        format!(
            "{}/update?token={}&{}={}",
            API_BASE_URL,
            self.config.token,
            self.config.pin,
            state.pin_value()
        )
    }

    pub async fn motor_status(&self) -> Result<MotorState> {
        let response = self
            .client
            .get(self.get_url())
            .send()
            .await
            .map_err(|e| FarmError::DataSourceUnavailable(format!("Blynk: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmError::DataSourceUnavailable(format!(
                "Blynk returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        Ok(MotorState::from_pin_value(&body))
    }

    pub async fn set_motor(&self, state: MotorState) -> Result<MotorState> {
        let response = self
            .client
            .get(self.update_url(state))
            .send()
            .await
            .map_err(|e| FarmError::DataSourceUnavailable(format!("Blynk: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmError::DataSourceUnavailable(format!(
                "Blynk returned {}: {}",
                status, body
            )));
        }

        tracing::info!(pin = %self.config.pin, state = state.as_str(), "Motor updated");
        Ok(state)
    }

    /// Flip the motor relative to its current reported state.
    pub async fn toggle_motor(&self) -> Result<MotorState> {
        let current = self.motor_status().await?;
        self.set_motor(current.toggled()).await
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.get_url())
            .send()
            .await
            .map_err(|e| FarmError::DataSourceUnavailable(format!("Blynk: {}", e)))?;

        Ok(response.status().is_success())
    }
}
