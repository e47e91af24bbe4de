//! One-shot events emitted by the simulation for effects, audio and UI feedback.
//!
//! The renderer/audio collaborators drain these each frame. Nothing in the
//! simulation reads them back.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Aircraft or ground target destroyed.
    Explosion { position: Position },
    /// Gun or rocket fired.
    MuzzleFlash {
        position: Position,
        weapon: WeaponKind,
    },
    BombReleased { position: Position },
    /// Bomb reached the ground.
    BombImpact { position: Position },
    MissileLaunch {
        position: Position,
        mode: GuidanceMode,
    },
    /// Projectile or missile reached end of life; its mesh can be disposed.
    ProjectileExpired { position: Position },
    /// Damage landed on an aircraft or ground target.
    Hit {
        position: Position,
        damage: f64,
        on_player: bool,
    },
    CountermeasureDeployed {
        position: Position,
        kind: CountermeasureKind,
    },
    MissileDiverted {
        position: Position,
        kind: CountermeasureKind,
    },
    CatapultLaunch { position: Position },
    CarrierTrap { position: Position },
    CarrierCrash { position: Position },
    Bolter { position: Position },
    BossPhaseChanged { phase: BossPhase },
    BossSpecialAttack { position: Position },
    MissionFailed,
    MissionComplete,
}
