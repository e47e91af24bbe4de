//! Combat snapshot: the per-frame readable state for HUD, radar and mission logic.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::mission::MissionStatus;
use crate::types::{SimTime, Transform};

/// Complete visible state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub time: SimTime,
    pub phase: MissionPhase,
    pub player: Option<PlayerView>,
    pub aircraft: Vec<AircraftView>,
    pub ground_targets: Vec<GroundTargetView>,
    pub carrier: Option<CarrierView>,
    pub boss: Option<BossView>,
    pub mission_failed: bool,
    pub player_hit_this_frame: bool,
    pub status: MissionStatus,
    pub events: Vec<SimEvent>,
}

/// One aircraft as seen by HUD/radar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftView {
    pub id: u64,
    pub type_name: String,
    pub transform: Transform,
    pub speed: f64,
    pub health: f64,
    pub alive: bool,
    pub is_player: bool,
}

/// Player-only HUD data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub aircraft: AircraftView,
    pub weapon: WeaponKind,
    pub ammo: AmmoView,
    pub lock_state: LockState,
    /// Lock progress in [0, 1].
    pub lock_progress: f64,
    pub target_id: Option<u64>,
    pub flares: u32,
    pub chaff: u32,
    pub incoming_missiles: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AmmoView {
    pub gun: u32,
    pub rockets: u32,
    pub bombs: u32,
    pub heat_missiles: u32,
    pub radar_missiles: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTargetView {
    pub index: u32,
    pub kind: GroundTargetKind,
    pub health: f64,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CarrierView {
    pub state: CarrierState,
    pub landed: bool,
    pub crashed: bool,
    /// Positive above the ideal glideslope, negative below.
    pub glideslope_error: f64,
    /// Lateral offset from the deck centerline.
    pub lineup_error: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossView {
    pub phase: BossPhase,
    pub health_ratio: f64,
    pub aggression: f64,
}
