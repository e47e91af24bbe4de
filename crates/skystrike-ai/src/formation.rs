//! Formation keeping.
//!
//! A formation holds its wingmen in fixed slots relative to the leader's
//! heading until the leader closes on a target, then releases them to their
//! own AI. Engage/disengage use two distances so the flight does not flicker
//! between states at a single boundary.

use glam::DVec3;

use skystrike_core::constants::*;
use skystrike_core::controls::ControlValues;
use skystrike_core::enums::FormationKind;
use skystrike_core::types::{Position, Transform};

use crate::steering::{level_wings, steer_toward};

/// How far ahead of the slot wingmen aim, so they settle parallel to the leader.
const SLOT_LOOKAHEAD: f64 = 80.0;

/// Stick gain used while holding a slot.
const SLOT_STEER_GAIN: f64 = 2.0;

/// Speed error (units/s) that maps to full throttle correction.
const SPEED_MATCH_BAND: f64 = 20.0;

/// A leader and its ordered wingmen. `Id` is whatever handle the caller uses.
#[derive(Debug, Clone)]
pub struct Formation<Id> {
    pub leader: Id,
    pub wingmen: Vec<Id>,
    pub kind: FormationKind,
    pub engaged: bool,
    /// Set once the leader is lost; a broken formation never reforms.
    pub broken: bool,
}

impl<Id: Copy> Formation<Id> {
    pub fn new(leader: Id, wingmen: Vec<Id>, kind: FormationKind) -> Self {
        Self {
            leader,
            wingmen,
            kind,
            engaged: false,
            broken: false,
        }
    }

    /// Update the engaged flag from the leader-to-target distance.
    /// Returns whether the formation is engaged after the update.
    pub fn update_engagement(&mut self, leader: &Position, target: Option<&Position>) -> bool {
        if self.broken {
            self.engaged = true;
            return true;
        }
        self.engaged = match target {
            None => false,
            Some(target) => {
                let distance = leader.range_to(target);
                if self.engaged {
                    distance <= FORMATION_DISENGAGE_DISTANCE
                } else {
                    distance < FORMATION_ENGAGE_DISTANCE
                }
            }
        };
        self.engaged
    }

    /// Release every wingman permanently (leader destroyed).
    pub fn break_formation(&mut self) {
        if !self.broken {
            log::debug!("formation broken: leader lost");
        }
        self.broken = true;
        self.engaged = true;
    }

    /// Whether wingmen should currently be steered by the formation.
    pub fn holds_wingmen(&self) -> bool {
        !self.engaged && !self.broken
    }

    /// World-space slot for the wingman at `index`.
    pub fn slot_position(&self, leader: &Transform, index: usize) -> Position {
        slot_world_position(leader, slot_offset(self.kind, index))
    }
}

/// Slot offset in the leader's frame: x = right, y = up, z = forward.
pub fn slot_offset(kind: FormationKind, index: usize) -> DVec3 {
    match kind {
        FormationKind::Wing => {
            let rank = (index / 2 + 1) as f64;
            let side = if index % 2 == 0 { 1.0 } else { -1.0 };
            DVec3::new(
                side * FORMATION_SPACING_LATERAL * rank,
                0.0,
                -FORMATION_SPACING_TRAIL * rank,
            )
        }
        FormationKind::Diamond => match index {
            0 => DVec3::new(-FORMATION_SPACING_LATERAL, 0.0, -FORMATION_SPACING_TRAIL),
            1 => DVec3::new(FORMATION_SPACING_LATERAL, 0.0, -FORMATION_SPACING_TRAIL),
            2 => DVec3::new(0.0, 0.0, -2.0 * FORMATION_SPACING_TRAIL),
            n => DVec3::new(0.0, 0.0, -2.0 * FORMATION_SPACING_TRAIL * (n as f64 - 1.0)),
        },
    }
}

/// Rotate a leader-frame offset by the leader's heading (yaw only; slots stay level).
pub fn slot_world_position(leader: &Transform, offset: DVec3) -> Position {
    let yaw = leader.rotation.yaw;
    let forward = DVec3::new(yaw.sin(), 0.0, yaw.cos());
    let right = DVec3::new(yaw.cos(), 0.0, -yaw.sin());
    leader
        .position
        .offset(right * offset.x + DVec3::Y * offset.y + forward * offset.z)
}

/// Controls that fly a wingman into `slot` and hold the leader's speed.
pub fn steer_to_slot(
    wingman: &Transform,
    wingman_speed: f64,
    leader: &Transform,
    leader_speed: f64,
    slot: &Position,
) -> ControlValues {
    let yaw = leader.rotation.yaw;
    let leader_forward = DVec3::new(yaw.sin(), 0.0, yaw.cos());
    let aim = slot.offset(leader_forward * SLOT_LOOKAHEAD);
    let (yaw_input, pitch_input) = steer_toward(wingman, &aim, SLOT_STEER_GAIN);

    // Positive when the slot is ahead of us along the leader's track.
    let along_track = (slot.to_vec() - wingman.position.to_vec()).dot(leader_forward);
    let throttle = ((leader_speed - wingman_speed) / SPEED_MATCH_BAND
        + along_track / FORMATION_THROTTLE_BAND)
        .clamp(-1.0, 1.0);

    ControlValues {
        yaw: yaw_input,
        pitch: pitch_input,
        roll: level_wings(wingman, SLOT_STEER_GAIN),
        throttle,
        ..Default::default()
    }
}
