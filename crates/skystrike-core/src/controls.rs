//! Control values written by a producer (player input, AI, formation) and
//! read by the flight model and weapon systems.
//!
//! Any aircraft's behavior is determined entirely by which producer writes
//! its `ControlValues`; consumers never know who that was.

use serde::{Deserialize, Serialize};

/// Per-aircraft control record. Axes are in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlValues {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    pub throttle: f64,
    pub fire: bool,
    pub lock_on: bool,
    pub cycle_target: bool,
    pub cycle_weapon: bool,
    pub deploy_countermeasure: bool,
}

impl ControlValues {
    /// Copy of these controls with every axis clamped to [-1, 1].
    pub fn clamped(&self) -> ControlValues {
        ControlValues {
            pitch: self.pitch.clamp(-1.0, 1.0),
            roll: self.roll.clamp(-1.0, 1.0),
            yaw: self.yaw.clamp(-1.0, 1.0),
            throttle: self.throttle.clamp(-1.0, 1.0),
            ..*self
        }
    }
}

/// Rising-edge detector for held buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeTrigger {
    held: bool,
}

impl EdgeTrigger {
    /// Returns true only on the frame the button goes from released to held.
    pub fn rising(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.held;
        self.held = pressed;
        edge
    }
}
