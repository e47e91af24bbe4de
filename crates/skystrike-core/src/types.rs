//! Fundamental geometric and simulation types.

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position in world units.
/// x = East, y = Up (altitude), z = North.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Orientation in radians.
/// Pitch is positive nose-up, yaw 0 faces +Z and grows toward +X.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Mutable transform shared with the rendering collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Position,
    pub rotation: Rotation,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_vec(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Range to another position (3D distance).
    pub fn range_to(&self, other: &Position) -> f64 {
        (other.to_vec() - self.to_vec()).length()
    }

    /// Horizontal range (ignoring altitude).
    pub fn horizontal_range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Bearing to another position in radians, in the same convention as yaw.
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        dx.atan2(dz)
    }

    /// Elevation angle to another position (positive = above).
    pub fn elevation_to(&self, other: &Position) -> f64 {
        let dy = other.y - self.y;
        dy.atan2(self.horizontal_range_to(other))
    }

    /// This position moved by `offset`.
    pub fn offset(&self, offset: DVec3) -> Position {
        Position::from(self.to_vec() + offset)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Rotation {
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Unit vector along the nose.
    pub fn forward(&self) -> DVec3 {
        forward_vector(self.pitch, self.yaw)
    }
}

impl Transform {
    pub fn new(position: Position, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// Level transform at `position` facing `heading`.
    pub fn with_heading(position: Position, heading: f64) -> Self {
        Self {
            position,
            rotation: Rotation::new(0.0, heading, 0.0),
        }
    }

    pub fn forward(&self) -> DVec3 {
        self.rotation.forward()
    }

    /// Angle between the nose and the line of sight to `target`.
    /// Zero when the target is (numerically) on top of us.
    pub fn angle_off_nose(&self, target: &Position) -> f64 {
        let los = target.to_vec() - self.position.to_vec();
        let dist = los.length();
        if dist < 1e-6 {
            return 0.0;
        }
        let cos = self.forward().dot(los / dist);
        cos.clamp(-1.0, 1.0).acos()
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Unit vector for a pitch/yaw pair.
pub fn forward_vector(pitch: f64, yaw: f64) -> DVec3 {
    DVec3::new(
        yaw.sin() * pitch.cos(),
        pitch.sin(),
        yaw.cos() * pitch.cos(),
    )
}

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Move `current` toward `target` by at most `max_step`, taking the short way round.
pub fn step_angle(current: f64, target: f64, max_step: f64) -> f64 {
    let diff = wrap_angle(target - current);
    current + diff.clamp(-max_step, max_step)
}
