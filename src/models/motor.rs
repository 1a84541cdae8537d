use crate::error::{FarmError, Result};
use serde::{Deserialize, Serialize};

/// State of the irrigation pump relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorState {
    On,
    Off,
}

impl MotorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotorState::On => "ON",
            MotorState::Off => "OFF",
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, MotorState::On)
    }

    pub fn toggled(&self) -> Self {
        match self {
            MotorState::On => MotorState::Off,
            MotorState::Off => MotorState::On,
        }
    }

    /// Virtual pin value written to the relay service.
    pub fn pin_value(&self) -> &'static str {
        match self {
            MotorState::On => "1",
            MotorState::Off => "0",
        }
    }

    /// Anything other than "1" reads as off.
    pub fn from_pin_value(value: &str) -> Self {
        if value.trim() == "1" {
            MotorState::On
        } else {
            MotorState::Off
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "on" | "1" => Ok(MotorState::On),
            "off" | "0" => Ok(MotorState::Off),
            _ => Err(FarmError::InvalidData(format!("unknown motor state '{}'", s))),
        }
    }
}

impl std::fmt::Display for MotorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
