//! Missile lock-on and the missiles an aircraft has fired.
//!
//! Lock builds while the lock input is held on a live target inside the
//! seeker cone and range. Any break resets to `Idle`. A fire press while
//! `Locked` launches one missile at the locked target.

use hecs::Entity;

use skystrike_core::constants::*;
use skystrike_core::controls::EdgeTrigger;
use skystrike_core::enums::{GuidanceMode, LockState};
use skystrike_core::events::SimEvent;
use skystrike_core::types::{Position, Transform};

use crate::guidance::Missile;
use crate::weapons::{muzzle, WeaponManager};

#[derive(Debug, Clone, Default)]
pub struct MissileLock {
    pub state: LockState,
    /// Seconds of continuous lock so far.
    pub progress: f64,
    pub target: Option<Entity>,
    /// Missiles fired by this aircraft, still in flight.
    pub missiles: Vec<Missile>,
    fire_edge: EdgeTrigger,
}

impl MissileLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock progress in [0, 1].
    pub fn progress_ratio(&self) -> f64 {
        if self.state == LockState::Locked {
            return 1.0;
        }
        (self.progress / LOCK_TIME).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.state = LockState::Idle;
        self.progress = 0.0;
        self.target = None;
    }

    /// Advance the lock state machine. `target` is the shooter's current
    /// target and its position, or `None` if it has none or it is dead.
    pub fn update(
        &mut self,
        shooter: &Transform,
        target: Option<(Entity, Position)>,
        lock_held: bool,
        dt: f64,
    ) {
        let Some((entity, position)) = target else {
            self.reset();
            return;
        };
        if self.target != Some(entity) {
            self.reset();
            self.target = Some(entity);
        }

        let in_cone = shooter.angle_off_nose(&position) <= LOCK_CONE;
        let in_range = shooter.position.range_to(&position) <= LOCK_MAX_RANGE;
        if !(lock_held && in_cone && in_range) {
            self.state = LockState::Idle;
            self.progress = 0.0;
            return;
        }

        self.progress += dt;
        self.state = if self.progress + TIME_EPSILON >= LOCK_TIME {
            LockState::Locked
        } else {
            LockState::Locking
        };
    }

    /// Launch on a fire press while locked, drawing from the missile
    /// counter of the selected weapon. Returns true on launch.
    pub fn fire(
        &mut self,
        shooter: &Transform,
        fire_pressed: bool,
        weapons: &mut WeaponManager,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        if !self.fire_edge.rising(fire_pressed) || self.state != LockState::Locked {
            return false;
        }
        let Some(mode) = weapons.selected_guidance() else {
            return false;
        };
        self.launch(shooter, mode, weapons, events)
    }

    /// AI variant of `fire`: launches as soon as the lock completes, using
    /// heat missiles first and radar missiles once those run out.
    pub fn launch_on_lock(&mut self, shooter: &Transform, weapons: &mut WeaponManager, events: &mut Vec<SimEvent>) -> bool {
        if self.state != LockState::Locked {
            return false;
        }
        let mode = if weapons.heat_missiles > 0 {
            GuidanceMode::Heat
        } else {
            GuidanceMode::Radar
        };
        self.launch(shooter, mode, weapons, events)
    }

    fn launch(
        &mut self,
        shooter: &Transform,
        mode: GuidanceMode,
        weapons: &mut WeaponManager,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        let ammo = weapons.missile_ammo_mut(mode);
        if *ammo == 0 {
            return false;
        }
        *ammo -= 1;

        let launch = muzzle(shooter);
        self.missiles.push(Missile::launch(mode, launch, self.target));
        events.push(SimEvent::MissileLaunch {
            position: launch.position,
            mode,
        });
        self.state = LockState::Idle;
        self.progress = 0.0;
        true
    }

    /// Advance fired missiles. `resolve` maps a target entity to its live position.
    pub fn update_missiles(
        &mut self,
        resolve: impl Fn(Entity) -> Option<Position>,
        dt: f64,
        events: &mut Vec<SimEvent>,
    ) {
        for missile in &mut self.missiles {
            let target_position = missile.target().and_then(&resolve);
            missile.update(target_position, dt, events);
        }
        self.missiles.retain(|m| m.alive);
    }
}
