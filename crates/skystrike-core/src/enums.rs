//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Selectable weapon, in cycling order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Gun,
    Rockets,
    Bombs,
    HeatMissile,
    RadarMissile,
}

impl WeaponKind {
    /// Cycling order for `cycle_weapon`.
    pub const ALL: [WeaponKind; 5] = [
        WeaponKind::Gun,
        WeaponKind::Rockets,
        WeaponKind::Bombs,
        WeaponKind::HeatMissile,
        WeaponKind::RadarMissile,
    ];

    /// The weapon after this one, wrapping around.
    pub fn next(self) -> WeaponKind {
        let idx = Self::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Guidance mode if this weapon is a missile.
    pub fn guidance(self) -> Option<GuidanceMode> {
        match self {
            WeaponKind::HeatMissile => Some(GuidanceMode::Heat),
            WeaponKind::RadarMissile => Some(GuidanceMode::Radar),
            _ => None,
        }
    }
}

/// Unguided projectile movement law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Tracer,
    Rocket,
    Bomb,
}

/// Missile seeker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuidanceMode {
    /// Short-range infrared seeker, fooled by flares.
    Heat,
    /// Fire-and-forget radar seeker, fooled by chaff.
    Radar,
}

/// Decoy type released by the countermeasure system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountermeasureKind {
    Flare,
    Chaff,
}

impl CountermeasureKind {
    pub fn other(self) -> CountermeasureKind {
        match self {
            CountermeasureKind::Flare => CountermeasureKind::Chaff,
            CountermeasureKind::Chaff => CountermeasureKind::Flare,
        }
    }

    /// Whether this decoy can seduce a seeker of the given mode.
    pub fn fools(self, mode: GuidanceMode) -> bool {
        matches!(
            (self, mode),
            (CountermeasureKind::Flare, GuidanceMode::Heat)
                | (CountermeasureKind::Chaff, GuidanceMode::Radar)
        )
    }
}

/// Missile lock progression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
    #[default]
    Idle,
    Locking,
    Locked,
}

/// Evasive maneuvers available to AI pilots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManeuverKind {
    BreakTurn,
    BarrelRoll,
    SplitS,
}

/// Formation shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationKind {
    #[default]
    Wing,
    Diamond,
}

/// Carrier launch/recovery state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarrierState {
    #[default]
    OnDeck,
    Launching,
    Airborne,
    Approaching,
    Trapped,
    Bolter,
}

/// Boss escalation phase, ordered by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    #[default]
    Normal,
    Enraged,
    Desperate,
}

/// Stationary target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroundTargetKind {
    Sam,
    Bunker,
    Vehicle,
    Radar,
}

/// Top-level mission state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPhase {
    #[default]
    NotStarted,
    Active,
    Failed,
    Complete,
}
