//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    display::{DisplayUpdate, Font},
    state::{Minutes, TimerSnapshot},
};

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: DisplayUpdate,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, display: DisplayUpdate) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            display,
        }
    }

    /// The command took effect
    pub fn ok(message: String, display: DisplayUpdate) -> Self {
        Self::new("ok", message, display)
    }

    /// The command was understood but changed nothing
    pub fn unchanged(message: String, display: DisplayUpdate) -> Self {
        Self::new("unchanged", message, display)
    }

    /// The command was rejected
    pub fn error(message: String, display: DisplayUpdate) -> Self {
        Self::new("error", message, display)
    }
}

/// Minute value as typed into an input field: a number or its text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MinutesInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl MinutesInput {
    pub fn validate(&self) -> Result<Minutes, String> {
        match self {
            MinutesInput::Number(n) => {
                let minutes = u64::try_from(*n)
                    .map_err(|_| format!("Invalid duration {}: must be positive", n))?;
                Minutes::new(minutes)
            }
            MinutesInput::Text(text) => Minutes::parse(text),
            MinutesInput::Other(value) => Err(format!(
                "Invalid duration {}: expected a whole number of minutes",
                value
            )),
        }
    }
}

/// Body of PUT /duration/work and PUT /duration/break
#[derive(Debug, Clone, Deserialize)]
pub struct DurationRequest {
    pub minutes: MinutesInput,
}

/// Body of PUT /font
#[derive(Debug, Clone, Deserialize)]
pub struct FontRequest {
    pub font: String,
}

/// Full status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub work_minutes: u64,
    pub break_minutes: u64,
    pub font: Font,
    pub display: DisplayUpdate,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(body: &str) -> Result<u64, String> {
        let request: DurationRequest = serde_json::from_str(body).unwrap();
        request.minutes.validate().map(|m| m.get())
    }

    #[test]
    fn test_minutes_input_forms() {
        assert_eq!(minutes(r#"{"minutes": 25}"#), Ok(25));
        assert_eq!(minutes(r#"{"minutes": "10"}"#), Ok(10));
        assert!(minutes(r#"{"minutes": 0}"#).is_err());
        assert!(minutes(r#"{"minutes": -5}"#).is_err());
        assert!(minutes(r#"{"minutes": 2.5}"#).is_err());
        assert!(minutes(r#"{"minutes": "ten"}"#).is_err());
        assert!(minutes(r#"{"minutes": null}"#).is_err());
    }
}
