//! Simulation configuration: flight tuning, loadouts and the aircraft catalog.
//!
//! Type-specific tuning is always handed to an aircraft when it is built;
//! nothing in the simulation looks it up globally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Per-type flight tuning. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightParams {
    pub max_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    /// Turn rate at zero speed (rad/s).
    pub turn_rate: f64,
    pub stall_threshold: f64,
    pub stall_recovery_rate: f64,
    pub stall_nose_drop_rate: f64,
    /// Altitude floor applied after integration.
    pub min_altitude: f64,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            acceleration: DEFAULT_ACCELERATION,
            deceleration: DEFAULT_DECELERATION,
            turn_rate: DEFAULT_TURN_RATE,
            stall_threshold: DEFAULT_STALL_THRESHOLD,
            stall_recovery_rate: DEFAULT_STALL_RECOVERY_RATE,
            stall_nose_drop_rate: DEFAULT_STALL_NOSE_DROP_RATE,
            min_altitude: DEFAULT_MIN_ALTITUDE,
        }
    }
}

impl FlightParams {
    /// Check internal consistency. Returns a reason on failure.
    pub fn check(&self) -> Result<(), String> {
        if self.max_speed <= 0.0 {
            return Err(format!("max_speed must be positive, got {}", self.max_speed));
        }
        if self.stall_threshold >= self.max_speed {
            return Err(format!(
                "stall_threshold {} must be below max_speed {}",
                self.stall_threshold, self.max_speed
            ));
        }
        if self.acceleration < 0.0 || self.deceleration < 0.0 || self.turn_rate < 0.0 {
            return Err("acceleration, deceleration and turn_rate must be non-negative".into());
        }
        Ok(())
    }
}

/// Starting ammunition for one aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    pub gun_rounds: u32,
    pub rockets: u32,
    pub bombs: u32,
    pub heat_missiles: u32,
    pub radar_missiles: u32,
    pub flares: u32,
    pub chaff: u32,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            gun_rounds: 500,
            rockets: 16,
            bombs: 4,
            heat_missiles: 4,
            radar_missiles: 2,
            flares: 12,
            chaff: 12,
        }
    }
}

/// Catalog entry for one aircraft type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftSpec {
    pub max_health: f64,
    /// Overrides `SimConfig::default_flight` when present.
    #[serde(default)]
    pub flight: Option<FlightParams>,
    #[serde(default)]
    pub loadout: Loadout,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for AI and countermeasure draws. Same seed = same run.
    pub seed: u64,
    pub ground_level: f64,
    pub default_flight: FlightParams,
    pub aircraft: BTreeMap<String, AircraftSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ground_level: GROUND_LEVEL,
            default_flight: FlightParams::default(),
            aircraft: default_catalog(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_flight
            .check()
            .map_err(|reason| ConfigError::InvalidFlightParams {
                aircraft: "<default>".into(),
                reason,
            })?;
        for (name, spec) in &self.aircraft {
            if spec.max_health <= 0.0 {
                return Err(ConfigError::InvalidMaxHealth {
                    aircraft: name.clone(),
                    max_health: spec.max_health,
                });
            }
            if let Some(flight) = &spec.flight {
                flight
                    .check()
                    .map_err(|reason| ConfigError::InvalidFlightParams {
                        aircraft: name.clone(),
                        reason,
                    })?;
            }
        }
        Ok(())
    }

    /// Flight parameters for a catalog entry, falling back to the defaults.
    pub fn flight_params_for(&self, spec: &AircraftSpec) -> FlightParams {
        spec.flight.unwrap_or(self.default_flight)
    }
}

/// Built-in aircraft types.
fn default_catalog() -> BTreeMap<String, AircraftSpec> {
    let mut catalog = BTreeMap::new();
    catalog.insert(
        "f16".to_string(),
        AircraftSpec {
            max_health: 100.0,
            flight: None,
            loadout: Loadout::default(),
        },
    );
    catalog.insert(
        "mig21".to_string(),
        AircraftSpec {
            max_health: 60.0,
            flight: Some(FlightParams {
                max_speed: 190.0,
                turn_rate: 1.4,
                ..FlightParams::default()
            }),
            loadout: Loadout {
                gun_rounds: 300,
                rockets: 0,
                bombs: 0,
                heat_missiles: 0,
                radar_missiles: 0,
                flares: 4,
                chaff: 0,
            },
        },
    );
    catalog.insert(
        "mig29".to_string(),
        AircraftSpec {
            max_health: 80.0,
            flight: Some(FlightParams {
                max_speed: 210.0,
                turn_rate: 1.7,
                ..FlightParams::default()
            }),
            loadout: Loadout {
                gun_rounds: 400,
                rockets: 0,
                bombs: 0,
                heat_missiles: 2,
                radar_missiles: 0,
                flares: 8,
                chaff: 4,
            },
        },
    );
    catalog.insert(
        "su47".to_string(),
        AircraftSpec {
            max_health: 400.0,
            flight: Some(FlightParams {
                max_speed: 240.0,
                acceleration: 55.0,
                turn_rate: 1.9,
                ..FlightParams::default()
            }),
            loadout: Loadout {
                gun_rounds: 2000,
                rockets: 60,
                bombs: 0,
                heat_missiles: 6,
                radar_missiles: 4,
                flares: 30,
                chaff: 30,
            },
        },
    );
    catalog
}
