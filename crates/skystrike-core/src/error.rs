//! Errors at the fallible edges of the simulation: config loading and mission setup.
//!
//! Nothing inside the frame loop returns an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid flight parameters for {aircraft}: {reason}")]
    InvalidFlightParams { aircraft: String, reason: String },
    #[error("aircraft {aircraft} has non-positive max health {max_health}")]
    InvalidMaxHealth { aircraft: String, max_health: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    #[error("unknown aircraft type `{0}`")]
    UnknownAircraftType(String),
    #[error("AI difficulty must be 1, 2 or 3, got {0}")]
    InvalidDifficulty(u8),
    #[error("enemy references unknown formation group {0}")]
    UnknownFormationGroup(u32),
    #[error("player starts on a carrier but the mission places none")]
    CarrierStartWithoutCarrier,
}
