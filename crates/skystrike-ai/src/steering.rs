//! Shared steering helpers: turn angular error toward a point into stick inputs.

use skystrike_core::types::{wrap_angle, Position, Transform};

/// Yaw and pitch stick inputs that point the nose at `target`, clamped to [-1, 1].
pub fn steer_toward(transform: &Transform, target: &Position, gain: f64) -> (f64, f64) {
    let pos = transform.position;
    let rot = transform.rotation;
    let yaw_error = wrap_angle(pos.bearing_to(target) - rot.yaw);
    let pitch_error = pos.elevation_to(target) - rot.pitch;
    (
        (yaw_error * gain).clamp(-1.0, 1.0),
        (pitch_error * gain).clamp(-1.0, 1.0),
    )
}

/// Roll input that brings the wings back to level.
pub fn level_wings(transform: &Transform, gain: f64) -> f64 {
    (-wrap_angle(transform.rotation.roll) * gain).clamp(-1.0, 1.0)
}

/// Pitch input that brings the nose back to the horizon.
pub fn level_nose(transform: &Transform, gain: f64) -> f64 {
    (-transform.rotation.pitch * gain).clamp(-1.0, 1.0)
}
