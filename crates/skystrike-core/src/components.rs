//! ECS components for hecs entities.
//!
//! Components are plain data with at most small helpers.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::GroundTargetKind;

/// Airframe state of any aircraft, player or AI.
///
/// `alive` is false iff health reached zero or the aircraft was destroyed
/// outright (ground impact, carrier crash). Dead aircraft are never revived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    /// Catalog key this aircraft was built from.
    pub type_name: String,
    pub speed: f64,
    pub health: f64,
    pub max_health: f64,
    pub alive: bool,
}

impl Aircraft {
    pub fn new(type_name: impl Into<String>, max_health: f64, speed: f64) -> Self {
        Self {
            type_name: type_name.into(),
            speed,
            health: max_health,
            max_health,
            alive: true,
        }
    }

    /// Subtract damage (floored at zero). Returns true if this call killed the aircraft.
    pub fn apply_damage(&mut self, damage: f64) -> bool {
        if !self.alive {
            return false;
        }
        self.health = (self.health - damage).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Destroy outright regardless of remaining health. Returns true if it was alive.
    pub fn destroy(&mut self) -> bool {
        let was_alive = self.alive;
        self.health = 0.0;
        self.alive = false;
        was_alive
    }

    pub fn health_ratio(&self) -> f64 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }
}

/// Marks the aircraft flown by the human player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks a hostile aircraft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// SAM launcher state attached to `Sam` ground targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SamBattery {
    pub missiles: u32,
    /// Seconds until the next launch is allowed.
    pub cooldown: f64,
}

impl Default for SamBattery {
    fn default() -> Self {
        Self {
            missiles: SAM_MISSILE_AMMO,
            cooldown: 0.0,
        }
    }
}

/// Stationary ground target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTarget {
    /// Index in the mission's ground-target list.
    pub index: u32,
    pub kind: GroundTargetKind,
    pub health: f64,
    pub max_health: f64,
    pub alive: bool,
    pub sam: Option<SamBattery>,
}

impl GroundTarget {
    pub fn new(index: u32, kind: GroundTargetKind) -> Self {
        let max_health = match kind {
            GroundTargetKind::Sam => SAM_MAX_HEALTH,
            GroundTargetKind::Bunker => BUNKER_MAX_HEALTH,
            GroundTargetKind::Vehicle => VEHICLE_MAX_HEALTH,
            GroundTargetKind::Radar => RADAR_SITE_MAX_HEALTH,
        };
        let sam = (kind == GroundTargetKind::Sam).then(SamBattery::default);
        Self {
            index,
            kind,
            health: max_health,
            max_health,
            alive: true,
            sam,
        }
    }

    /// Subtract damage. Returns true if this call destroyed the target.
    pub fn apply_damage(&mut self, damage: f64) -> bool {
        if !self.alive {
            return false;
        }
        self.health = (self.health - damage).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Aircraft carrier. Its `Position` component is the deck center at sea level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Carrier {
    /// Bow direction (same convention as yaw).
    pub heading: f64,
    pub deck_height: f64,
    pub deck_length: f64,
    pub deck_width: f64,
}

impl Carrier {
    pub fn new(heading: f64) -> Self {
        Self {
            heading,
            deck_height: DECK_HEIGHT,
            deck_length: DECK_LENGTH,
            deck_width: DECK_WIDTH,
        }
    }
}
