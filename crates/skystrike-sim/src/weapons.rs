//! Per-aircraft weapon selection, ammunition and unguided ordnance.
//!
//! Missiles are only counted here; launching them is the missile lock's job.

use skystrike_core::config::Loadout;
use skystrike_core::constants::*;
use skystrike_core::controls::{ControlValues, EdgeTrigger};
use skystrike_core::enums::{GuidanceMode, WeaponKind};
use skystrike_core::events::SimEvent;
use skystrike_core::state::AmmoView;
use skystrike_core::types::Transform;

use crate::projectile::{Blast, Projectile};

#[derive(Debug, Clone)]
pub struct WeaponManager {
    pub selected: WeaponKind,
    pub gun_rounds: u32,
    pub rockets: u32,
    pub bombs: u32,
    pub heat_missiles: u32,
    pub radar_missiles: u32,
    /// Scales damage of projectiles spawned from now on.
    pub damage_multiplier: f64,
    pub projectiles: Vec<Projectile>,
    /// Seconds until the selected weapon may fire again.
    cooldown: f64,
    cycle_edge: EdgeTrigger,
    release_edge: EdgeTrigger,
}

impl WeaponManager {
    pub fn new(loadout: &Loadout) -> Self {
        Self {
            selected: WeaponKind::Gun,
            gun_rounds: loadout.gun_rounds,
            rockets: loadout.rockets,
            bombs: loadout.bombs,
            heat_missiles: loadout.heat_missiles,
            radar_missiles: loadout.radar_missiles,
            damage_multiplier: 1.0,
            projectiles: Vec::new(),
            cooldown: 0.0,
            cycle_edge: EdgeTrigger::default(),
            release_edge: EdgeTrigger::default(),
        }
    }

    pub fn ammo(&self) -> AmmoView {
        AmmoView {
            gun: self.gun_rounds,
            rockets: self.rockets,
            bombs: self.bombs,
            heat_missiles: self.heat_missiles,
            radar_missiles: self.radar_missiles,
        }
    }

    /// Missile counter for a seeker type, for the missile lock to draw from.
    pub fn missile_ammo_mut(&mut self, mode: GuidanceMode) -> &mut u32 {
        match mode {
            GuidanceMode::Heat => &mut self.heat_missiles,
            GuidanceMode::Radar => &mut self.radar_missiles,
        }
    }

    /// Seeker of the selected weapon, if a missile is selected.
    pub fn selected_guidance(&self) -> Option<GuidanceMode> {
        self.selected.guidance()
    }

    /// Handle selection and trigger for one frame, then advance everything in flight.
    /// Returns the blasts of bombs that reached the ground this frame.
    pub fn update(
        &mut self,
        shooter: &Transform,
        speed: f64,
        controls: &ControlValues,
        ground_level: f64,
        dt: f64,
        events: &mut Vec<SimEvent>,
    ) -> Vec<Blast> {
        if self.cycle_edge.rising(controls.cycle_weapon) {
            self.selected = self.selected.next();
            self.cooldown = 0.0;
        }
        self.cooldown = (self.cooldown - dt).max(0.0);

        let released = self.release_edge.rising(controls.fire);
        match self.selected {
            WeaponKind::Gun if controls.fire => self.fire_gun(shooter, events),
            WeaponKind::Rockets if controls.fire => self.fire_rocket(shooter, events),
            WeaponKind::Bombs if released => self.release_bomb(shooter, speed, events),
            _ => {}
        }

        let mut blasts = Vec::new();
        for projectile in &mut self.projectiles {
            if let Some(blast) = projectile.update(ground_level, dt, events) {
                blasts.push(blast);
            }
        }
        self.projectiles.retain(|p| p.alive);
        blasts
    }

    /// Fire one salvo of rockets fanned about the shooter's heading.
    /// Ignores ammunition and cooldown.
    pub fn fire_salvo(&mut self, shooter: &Transform, count: usize, spread: f64, events: &mut Vec<SimEvent>) {
        let launch = muzzle(shooter);
        let center = (count.saturating_sub(1)) as f64 / 2.0;
        for i in 0..count {
            let mut transform = launch;
            transform.rotation.yaw += (i as f64 - center) * spread;
            self.projectiles
                .push(Projectile::rocket(transform, self.damage_multiplier));
        }
        events.push(SimEvent::MuzzleFlash {
            position: launch.position,
            weapon: WeaponKind::Rockets,
        });
    }

    fn fire_gun(&mut self, shooter: &Transform, events: &mut Vec<SimEvent>) {
        if self.cooldown > 0.0 || self.gun_rounds == 0 {
            return;
        }
        self.gun_rounds -= 1;
        self.cooldown = GUN_FIRE_INTERVAL;
        let launch = muzzle(shooter);
        self.projectiles
            .push(Projectile::tracer(launch, self.damage_multiplier));
        events.push(SimEvent::MuzzleFlash {
            position: launch.position,
            weapon: WeaponKind::Gun,
        });
    }

    fn fire_rocket(&mut self, shooter: &Transform, events: &mut Vec<SimEvent>) {
        if self.cooldown > 0.0 || self.rockets == 0 {
            return;
        }
        self.rockets -= 1;
        self.cooldown = ROCKET_FIRE_INTERVAL;
        let launch = muzzle(shooter);
        self.projectiles
            .push(Projectile::rocket(launch, self.damage_multiplier));
        events.push(SimEvent::MuzzleFlash {
            position: launch.position,
            weapon: WeaponKind::Rockets,
        });
    }

    fn release_bomb(&mut self, shooter: &Transform, speed: f64, events: &mut Vec<SimEvent>) {
        if self.cooldown > 0.0 || self.bombs == 0 {
            return;
        }
        self.bombs -= 1;
        self.cooldown = BOMB_RELEASE_INTERVAL;
        self.projectiles.push(Projectile::bomb(*shooter, speed));
        events.push(SimEvent::BombReleased {
            position: shooter.position,
        });
    }
}

/// Launch transform just ahead of the nose, so rounds clear the firer's hit radius.
pub fn muzzle(shooter: &Transform) -> Transform {
    Transform::new(
        shooter.position.offset(shooter.forward() * MUZZLE_OFFSET),
        shooter.rotation,
    )
}
