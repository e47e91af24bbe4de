//! Difficulty-tier behavioral profiles.
//!
//! Consolidates per-tier parameters for the pilot FSM.

use skystrike_core::enums::ManeuverKind;

/// Behavioral profile for a difficulty tier.
pub struct DifficultyProfile {
    /// Proportional gain from angular error (rad) to stick deflection.
    pub steer_gain: f64,
    /// Maneuvers this tier may draw from when under fire.
    pub maneuvers: &'static [ManeuverKind],
}

const LOW_MANEUVERS: &[ManeuverKind] = &[ManeuverKind::BreakTurn];
const MEDIUM_MANEUVERS: &[ManeuverKind] = &[ManeuverKind::BreakTurn, ManeuverKind::BarrelRoll];
const HIGH_MANEUVERS: &[ManeuverKind] = &[
    ManeuverKind::BreakTurn,
    ManeuverKind::BarrelRoll,
    ManeuverKind::SplitS,
];

/// Get the profile for a difficulty tier. Out-of-range tiers clamp to 1..=3.
pub fn get_profile(difficulty: u8) -> DifficultyProfile {
    match difficulty.clamp(1, 3) {
        1 => DifficultyProfile {
            steer_gain: 1.2,
            maneuvers: LOW_MANEUVERS,
        },
        2 => DifficultyProfile {
            steer_gain: 2.0,
            maneuvers: MEDIUM_MANEUVERS,
        },
        _ => DifficultyProfile {
            steer_gain: 3.0,
            maneuvers: HIGH_MANEUVERS,
        },
    }
}
