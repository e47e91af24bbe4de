//! Mission record consumed once at mission start.
//!
//! The core never parses mission files; a loader hands over an already
//! deserialized `MissionData`.

use serde::{Deserialize, Serialize};

use crate::enums::{FormationKind, GroundTargetKind};
use crate::types::Position;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionData {
    pub name: String,
    pub player: PlayerStart,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub formations: Vec<FormationGroup>,
    #[serde(default)]
    pub ground_targets: Vec<GroundTargetSpawn>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub carrier: Option<CarrierPlacement>,
    /// Difficulty for enemies that do not set their own (1..=3).
    #[serde(default)]
    pub ai_difficulty: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStart {
    pub aircraft_type: String,
    pub position: Position,
    pub heading: f64,
    /// Spawn parked on the carrier deck instead of in the air.
    #[serde(default)]
    pub on_carrier: bool,
    /// Initial airspeed for airborne starts.
    #[serde(default)]
    pub speed: f64,
}

impl Default for PlayerStart {
    fn default() -> Self {
        Self {
            aircraft_type: "f16".to_string(),
            position: Position::new(0.0, 300.0, 0.0),
            heading: 0.0,
            on_carrier: false,
            speed: 150.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub aircraft_type: String,
    pub position: Position,
    pub heading: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub boss: bool,
    /// Formation group id; the first member listed leads.
    #[serde(default)]
    pub formation: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FormationGroup {
    pub id: u32,
    pub kind: FormationKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroundTargetSpawn {
    pub kind: GroundTargetKind,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CarrierPlacement {
    pub position: Position,
    pub heading: f64,
}

/// Mission objective evaluated against `MissionStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Objective {
    DestroyAllEnemies,
    /// Destroy every ground target, or only those of one kind.
    DestroyGroundTargets { kind: Option<GroundTargetKind> },
    DestroyBoss,
    LandOnCarrier,
}

/// Running mission outcome counters, owned by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionStatus {
    pub enemies_total: u32,
    pub enemies_destroyed: u32,
    /// Totals per ground target kind: (kind, total, destroyed).
    pub ground_targets: Vec<(GroundTargetKind, u32, u32)>,
    /// Mission indices of destroyed ground targets, in destruction order.
    pub destroyed_ground_targets: Vec<u32>,
    pub boss_destroyed: bool,
    pub landed: bool,
}

impl MissionStatus {
    pub fn record_ground_kill(&mut self, index: u32, kind: GroundTargetKind) {
        self.destroyed_ground_targets.push(index);
        if let Some(entry) = self.ground_targets.iter_mut().find(|(k, _, _)| *k == kind) {
            entry.2 += 1;
        }
    }

    pub fn register_ground_target(&mut self, kind: GroundTargetKind) {
        match self.ground_targets.iter_mut().find(|(k, _, _)| *k == kind) {
            Some(entry) => entry.1 += 1,
            None => self.ground_targets.push((kind, 1, 0)),
        }
    }
}

impl Objective {
    pub fn is_complete(&self, status: &MissionStatus) -> bool {
        match self {
            Objective::DestroyAllEnemies => status.enemies_destroyed >= status.enemies_total,
            Objective::DestroyGroundTargets { kind } => status
                .ground_targets
                .iter()
                .filter(|(k, _, _)| kind.map_or(true, |wanted| wanted == *k))
                .all(|(_, total, destroyed)| destroyed >= total),
            Objective::DestroyBoss => status.boss_destroyed,
            Objective::LandOnCarrier => status.landed,
        }
    }
}
