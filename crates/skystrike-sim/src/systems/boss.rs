//! Boss system: feeds the boss's health into its phase machine and acts on
//! phase changes and special attacks.

use hecs::{Entity, World};

use skystrike_ai::boss::BossState;
use skystrike_core::components::Aircraft;
use skystrike_core::constants::{BOSS_SALVO_SIZE, BOSS_SALVO_SPREAD};
use skystrike_core::events::SimEvent;
use skystrike_core::types::Transform;

use crate::weapons::WeaponManager;

/// Returns true once the tracked boss is dead.
pub fn run(world: &mut World, boss: Option<Entity>, dt: f64, events: &mut Vec<SimEvent>) -> bool {
    let Some(boss) = boss else {
        return false;
    };
    let Ok((transform, aircraft, state, weapons)) =
        world.query_one_mut::<(&Transform, &Aircraft, &mut BossState, &mut WeaponManager)>(boss)
    else {
        return false;
    };
    if !aircraft.alive {
        return true;
    }

    let update = state.update(aircraft.health, dt);
    weapons.damage_multiplier = state.aggression;
    if update.phase_changed {
        events.push(SimEvent::BossPhaseChanged { phase: state.phase });
    }
    if update.special_attack {
        log::debug!("boss special attack in {:?}", state.phase);
        weapons.fire_salvo(transform, BOSS_SALVO_SIZE, BOSS_SALVO_SPREAD, events);
        events.push(SimEvent::BossSpecialAttack {
            position: transform.position,
        });
    }
    false
}
