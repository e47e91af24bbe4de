//! Homing missile guidance.
//!
//! Missiles fly at constant speed and turn toward their tracked point by at
//! most `MISSILE_TURN_RATE` per second on each of yaw and pitch. The tracked
//! point is either a target aircraft (resolved by the caller each frame) or a
//! static decoy position after a countermeasure diverted the seeker.

use hecs::Entity;

use skystrike_core::constants::*;
use skystrike_core::enums::GuidanceMode;
use skystrike_core::events::SimEvent;
use skystrike_core::types::{step_angle, wrap_angle, Position, Rotation, Transform};

use crate::projectile::Hittable;

/// What the seeker is following.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seeker {
    Target(Entity),
    /// Static decoy point. The original target is gone for good.
    Decoy(Position),
    /// Nothing to follow; fly straight.
    Lost,
}

#[derive(Debug, Clone)]
pub struct Missile {
    pub mode: GuidanceMode,
    pub transform: Transform,
    pub speed: f64,
    pub damage: f64,
    pub age: f64,
    pub lifetime: f64,
    pub alive: bool,
    pub seeker: Seeker,
}

impl Missile {
    pub fn launch(mode: GuidanceMode, launch: Transform, target: Option<Entity>) -> Self {
        let lifetime = match mode {
            GuidanceMode::Heat => HEAT_MISSILE_LIFETIME,
            GuidanceMode::Radar => RADAR_MISSILE_LIFETIME,
        };
        Self {
            mode,
            transform: launch,
            speed: MISSILE_SPEED,
            damage: MISSILE_DAMAGE,
            age: 0.0,
            lifetime,
            alive: true,
            seeker: target.map_or(Seeker::Lost, Seeker::Target),
        }
    }

    /// Aircraft this missile is still homing on.
    pub fn target(&self) -> Option<Entity> {
        match self.seeker {
            Seeker::Target(entity) => Some(entity),
            _ => None,
        }
    }

    /// Replace whatever the seeker follows with a static point.
    pub fn divert_to_flare(&mut self, point: Position) {
        self.seeker = Seeker::Decoy(point);
    }

    /// Advance one frame. `target_position` is the live position of
    /// `self.target()`, or `None` if that aircraft is gone or dead.
    pub fn update(&mut self, target_position: Option<Position>, dt: f64, events: &mut Vec<SimEvent>) {
        if !self.alive {
            return;
        }
        self.age += dt;

        let tracked = match self.seeker {
            Seeker::Target(_) => target_position,
            Seeker::Decoy(point) => {
                if self.transform.position.range_to(&point) <= DECOY_CONSUME_RADIUS {
                    self.seeker = Seeker::Lost;
                    None
                } else {
                    Some(point)
                }
            }
            Seeker::Lost => None,
        };

        if let Some(point) = tracked {
            steer_rotation(
                &mut self.transform.rotation,
                &self.transform.position,
                &point,
                MISSILE_TURN_RATE * dt,
            );
        }

        let step = self.transform.forward() * self.speed * dt;
        self.transform.position = self.transform.position.offset(step);

        if self.age >= self.lifetime {
            self.alive = false;
            events.push(SimEvent::ProjectileExpired {
                position: self.transform.position,
            });
        }
    }
}

impl Hittable for Missile {
    fn position(&self) -> Position {
        self.transform.position
    }

    fn damage(&self) -> f64 {
        self.damage
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

/// Turn `rotation` toward `to` by at most `max_step` radians on yaw and on pitch.
pub fn steer_rotation(rotation: &mut Rotation, from: &Position, to: &Position, max_step: f64) {
    let desired_yaw = from.bearing_to(to);
    let desired_pitch = from.elevation_to(to);
    rotation.yaw = wrap_angle(step_angle(rotation.yaw, desired_yaw, max_step));
    let pitch_error = (desired_pitch - rotation.pitch).clamp(-max_step, max_step);
    rotation.pitch += pitch_error;
}

/// Rotation that points straight at `to` from `from`.
pub fn aim_at(from: &Position, to: &Position) -> Rotation {
    Rotation::new(from.elevation_to(to), from.bearing_to(to), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    fn missile_at_origin(target: Option<Entity>) -> Missile {
        Missile::launch(
            GuidanceMode::Heat,
            Transform::with_heading(Position::new(0.0, 300.0, 0.0), 0.0),
            target,
        )
    }

    #[test]
    fn test_yaw_change_rate_limited() {
        let mut world = World::new();
        let target = world.spawn(());
        let mut missile = missile_at_origin(Some(target));
        let mut events = Vec::new();
        // Target hard right: desired yaw is PI/2, far beyond one frame of turn.
        let beside = Position::new(500.0, 300.0, 0.0);
        for _ in 0..10 {
            let before = missile.transform.rotation.yaw;
            missile.update(Some(beside), DT, &mut events);
            let change = wrap_angle(missile.transform.rotation.yaw - before).abs();
            assert!(change <= MISSILE_TURN_RATE * DT + 1e-12);
        }
        assert!(missile.transform.rotation.yaw > 0.0, "turned toward the target");
    }

    #[test]
    fn test_homes_onto_stationary_target() {
        let mut world = World::new();
        let target = world.spawn(());
        let mut missile = missile_at_origin(Some(target));
        let mut events = Vec::new();
        let point = Position::new(400.0, 350.0, 600.0);
        let mut closest = f64::MAX;
        for _ in 0..300 {
            missile.update(Some(point), DT, &mut events);
            closest = closest.min(missile.transform.position.range_to(&point));
        }
        assert!(closest < MISSILE_SPEED * DT, "closest approach {closest:.1}");
    }

    #[test]
    fn test_lost_target_flies_straight() {
        let mut world = World::new();
        let target = world.spawn(());
        let mut missile = missile_at_origin(Some(target));
        let mut events = Vec::new();
        missile.update(None, 1.0, &mut events);
        assert_eq!(missile.transform.rotation.yaw, 0.0);
        assert!((missile.transform.position.z - MISSILE_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_divert_drops_original_target() {
        let mut world = World::new();
        let target = world.spawn(());
        let mut missile = missile_at_origin(Some(target));
        let flare = Position::new(-50.0, 280.0, 200.0);
        missile.divert_to_flare(flare);
        assert_eq!(missile.seeker, Seeker::Decoy(flare));
        assert_eq!(missile.target(), None);

        // Offering the old target's position changes nothing.
        let mut events = Vec::new();
        missile.update(Some(Position::new(500.0, 300.0, 0.0)), DT, &mut events);
        assert!(missile.transform.rotation.yaw < 0.0, "steers toward the flare");

        let second = Position::new(60.0, 300.0, 300.0);
        missile.divert_to_flare(second);
        assert_eq!(missile.seeker, Seeker::Decoy(second));
    }

    #[test]
    fn test_decoy_consumed_on_pass() {
        let mut missile = missile_at_origin(None);
        let flare = Position::new(0.0, 300.0, 2.0);
        missile.divert_to_flare(flare);
        let mut events = Vec::new();
        missile.update(None, DT, &mut events);
        assert_eq!(missile.seeker, Seeker::Lost);
    }

    #[test]
    fn test_expires_at_lifetime() {
        let mut radar = Missile::launch(
            GuidanceMode::Radar,
            Transform::with_heading(Position::new(0.0, 300.0, 0.0), 0.0),
            None,
        );
        let mut events = Vec::new();
        radar.update(None, HEAT_MISSILE_LIFETIME, &mut events);
        assert!(radar.alive, "radar seekers outlast heat seekers");
        radar.update(None, RADAR_MISSILE_LIFETIME, &mut events);
        assert!(!radar.alive);
        radar.update(None, 1.0, &mut events);
        assert_eq!(events.len(), 1);
    }
}
