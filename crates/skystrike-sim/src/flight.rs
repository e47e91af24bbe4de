//! Arcade flight model.
//!
//! Speed is a scalar driven by throttle; attitude changes at a turn rate that
//! falls off with speed; position moves along the nose with no sideslip. Below
//! the stall threshold the aircraft ignores throttle and pitch input and
//! drops its nose until it has flying speed again.

use skystrike_core::components::Aircraft;
use skystrike_core::config::FlightParams;
use skystrike_core::constants::{MAX_PITCH, TURN_DAMPING_AT_MAX_SPEED};
use skystrike_core::controls::ControlValues;
use skystrike_core::types::{wrap_angle, Transform};

/// Turn rate available at `speed`, strictly decreasing toward `max_speed`.
pub fn effective_turn_rate(params: &FlightParams, speed: f64) -> f64 {
    let fraction = (speed / params.max_speed).clamp(0.0, 1.0);
    params.turn_rate * (1.0 - TURN_DAMPING_AT_MAX_SPEED * fraction)
}

/// Integrate one frame. Dead aircraft are left untouched.
/// Returns true if the aircraft was stalled this frame.
pub fn integrate(
    transform: &mut Transform,
    aircraft: &mut Aircraft,
    controls: &ControlValues,
    params: &FlightParams,
    dt: f64,
) -> bool {
    if !aircraft.alive {
        return false;
    }
    let controls = controls.clamped();

    // Decided on the speed we entered the frame with.
    let stalled = aircraft.speed < params.stall_threshold;

    if stalled {
        transform.rotation.pitch -= params.stall_nose_drop_rate * dt;
        aircraft.speed += params.stall_recovery_rate * dt;
    } else if controls.throttle > 0.0 {
        aircraft.speed += controls.throttle * params.acceleration * dt;
    } else if controls.throttle < 0.0 {
        aircraft.speed -= controls.throttle.abs() * params.deceleration * dt;
    }
    aircraft.speed = aircraft.speed.clamp(0.0, params.max_speed);

    let turn = effective_turn_rate(params, aircraft.speed) * dt;
    let rotation = &mut transform.rotation;
    if !stalled {
        rotation.pitch += controls.pitch * turn;
    }
    rotation.yaw += controls.yaw * turn;
    rotation.roll += controls.roll * turn;

    rotation.pitch = rotation.pitch.clamp(-MAX_PITCH, MAX_PITCH);
    rotation.yaw = wrap_angle(rotation.yaw);
    rotation.roll = wrap_angle(rotation.roll);

    let step = transform.forward() * aircraft.speed * dt;
    transform.position = transform.position.offset(step);
    transform.position.y = transform.position.y.max(params.min_altitude);

    stalled
}

#[cfg(test)]
mod tests {
    use super::*;
    use skystrike_core::constants::DT;
    use skystrike_core::types::Position;

    fn level_at(speed: f64) -> (Transform, Aircraft) {
        (
            Transform::with_heading(Position::new(0.0, 500.0, 0.0), 0.0),
            Aircraft::new("f16", 100.0, speed),
        )
    }

    #[test]
    fn test_speed_clamped_for_all_throttles() {
        let params = FlightParams::default();
        for throttle in [-1.0, -0.5, 0.0, 0.5, 1.0, 5.0] {
            for dt in [DT, 0.5, 3.0] {
                for start in [0.0, 41.0, 219.0, 220.0] {
                    let (mut t, mut a) = level_at(start);
                    let controls = ControlValues {
                        throttle,
                        ..Default::default()
                    };
                    integrate(&mut t, &mut a, &controls, &params, dt);
                    assert!(
                        (0.0..=params.max_speed).contains(&a.speed),
                        "speed {} out of range (throttle {throttle}, dt {dt})",
                        a.speed
                    );
                }
            }
        }
    }

    #[test]
    fn test_turn_rate_falls_with_speed() {
        let params = FlightParams::default();
        let mut last = f64::INFINITY;
        for step in 0..=22 {
            let rate = effective_turn_rate(&params, step as f64 * 10.0);
            assert!(rate < last);
            last = rate;
        }
        assert!((effective_turn_rate(&params, params.max_speed) - params.turn_rate * 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_stall_drops_nose_and_gains_speed() {
        let params = FlightParams::default();
        let (mut t, mut a) = level_at(20.0);
        // Full back stick and idle throttle are both ignored while stalled.
        let controls = ControlValues {
            pitch: 1.0,
            throttle: -1.0,
            ..Default::default()
        };
        let mut last_speed = a.speed;
        let mut last_pitch = t.rotation.pitch;
        while a.speed < params.stall_threshold {
            assert!(integrate(&mut t, &mut a, &controls, &params, DT));
            assert!(a.speed > last_speed);
            assert!(t.rotation.pitch < last_pitch);
            last_speed = a.speed;
            last_pitch = t.rotation.pitch;
        }
        assert!(!integrate(&mut t, &mut a, &controls, &params, DT), "recovered");
    }

    #[test]
    fn test_moves_along_nose() {
        let params = FlightParams::default();
        let (mut t, mut a) = level_at(100.0);
        integrate(&mut t, &mut a, &ControlValues::default(), &params, 1.0);
        assert!((t.position.z - 100.0).abs() < 1e-9);
        assert!(t.position.x.abs() < 1e-9);
        assert!((t.position.y - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_pitch_clamped_and_yaw_wrapped() {
        let params = FlightParams::default();
        let (mut t, mut a) = level_at(100.0);
        t.rotation.yaw = 3.1;
        let controls = ControlValues {
            pitch: 1.0,
            yaw: 1.0,
            ..Default::default()
        };
        for _ in 0..600 {
            integrate(&mut t, &mut a, &controls, &params, DT);
        }
        assert!(t.rotation.pitch <= MAX_PITCH);
        assert!(t.rotation.yaw > -std::f64::consts::PI && t.rotation.yaw <= std::f64::consts::PI);
    }

    #[test]
    fn test_altitude_floor() {
        let params = FlightParams {
            min_altitude: 50.0,
            ..Default::default()
        };
        let (mut t, mut a) = level_at(200.0);
        t.position.y = 51.0;
        t.rotation.pitch = -1.0;
        integrate(&mut t, &mut a, &ControlValues::default(), &params, 1.0);
        assert_eq!(t.position.y, 50.0);
    }

    #[test]
    fn test_dead_aircraft_frozen() {
        let params = FlightParams::default();
        let (mut t, mut a) = level_at(150.0);
        a.destroy();
        let before = t;
        integrate(&mut t, &mut a, &ControlValues::default(), &params, 1.0);
        assert_eq!(t, before);
    }
}
