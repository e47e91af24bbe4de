//! Unguided ordnance: tracers, rockets and bombs.
//!
//! Every damage source (these, missiles, bomb blasts) implements `Hittable`
//! so the collision system can treat them uniformly.

use glam::DVec3;

use skystrike_core::constants::*;
use skystrike_core::enums::ProjectileKind;
use skystrike_core::events::SimEvent;
use skystrike_core::types::{Position, Transform};

/// Anything that can land damage on contact.
pub trait Hittable {
    fn position(&self) -> Position;
    fn damage(&self) -> f64;
    fn is_alive(&self) -> bool;
    /// Take the source out of play. Returns true only for the call that did it.
    fn deactivate(&mut self) -> bool;
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub transform: Transform,
    pub velocity: DVec3,
    pub damage: f64,
    pub age: f64,
    pub lifetime: f64,
    pub alive: bool,
}

impl Projectile {
    /// Straight-flying round along the launch heading.
    fn straight(kind: ProjectileKind, launch: Transform, speed: f64, damage: f64, lifetime: f64) -> Self {
        Self {
            kind,
            transform: launch,
            velocity: launch.forward() * speed,
            damage,
            age: 0.0,
            lifetime,
            alive: true,
        }
    }

    pub fn tracer(launch: Transform, damage_multiplier: f64) -> Self {
        Self::straight(
            ProjectileKind::Tracer,
            launch,
            TRACER_SPEED,
            TRACER_DAMAGE * damage_multiplier,
            TRACER_LIFETIME,
        )
    }

    pub fn rocket(launch: Transform, damage_multiplier: f64) -> Self {
        Self::straight(
            ProjectileKind::Rocket,
            launch,
            ROCKET_SPEED,
            ROCKET_DAMAGE * damage_multiplier,
            ROCKET_LIFETIME,
        )
    }

    /// Bomb released at `launch`, carrying the firer's speed along its yaw.
    pub fn bomb(launch: Transform, firer_speed: f64) -> Self {
        let yaw = launch.rotation.yaw;
        Self {
            kind: ProjectileKind::Bomb,
            transform: launch,
            velocity: DVec3::new(yaw.sin(), 0.0, yaw.cos()) * firer_speed,
            damage: BOMB_DAMAGE,
            age: 0.0,
            lifetime: BOMB_LIFETIME,
            alive: true,
        }
    }

    /// Advance one frame. Returns a blast if a bomb reached the ground this frame.
    pub fn update(&mut self, ground_level: f64, dt: f64, events: &mut Vec<SimEvent>) -> Option<Blast> {
        if !self.alive {
            return None;
        }
        self.age += dt;

        if self.kind == ProjectileKind::Bomb {
            self.velocity.y -= GRAVITY * dt;
        }
        self.transform.position = self.transform.position.offset(self.velocity * dt);

        if self.kind == ProjectileKind::Bomb && self.transform.position.y <= ground_level {
            self.transform.position.y = ground_level;
            self.alive = false;
            let position = self.transform.position;
            events.push(SimEvent::BombImpact { position });
            return Some(Blast::new(position, self.damage));
        }

        if self.age >= self.lifetime {
            self.alive = false;
            events.push(SimEvent::ProjectileExpired {
                position: self.transform.position,
            });
        }
        None
    }
}

impl Hittable for Projectile {
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

/// A bomb detonation, live for the single frame it is checked against ground targets.
#[derive(Debug, Clone, Copy)]
pub struct Blast {
    pub position: Position,
    pub damage: f64,
    pub alive: bool,
}

impl Blast {
    pub fn new(position: Position, damage: f64) -> Self {
        Self {
            position,
            damage,
            alive: true,
        }
    }
}

impl Hittable for Blast {
    fn position(&self) -> Position {
        self.position
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
