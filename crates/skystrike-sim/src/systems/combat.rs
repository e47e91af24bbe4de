//! Combat system: weapons, missile locks and countermeasures for every aircraft,
//! plus free-standing SAM missiles and decoy resolution.
//!
//! Target positions are sampled once, after flight, so every shooter sees
//! the same picture regardless of query order.

use std::collections::HashMap;

use hecs::{Entity, World};
use rand::Rng;

use skystrike_core::components::Aircraft;
use skystrike_core::controls::ControlValues;
use skystrike_core::events::SimEvent;
use skystrike_core::types::{Position, Transform};

use crate::countermeasures::{divert_missiles, CountermeasureSystem, Decoy};
use crate::guidance::Missile;
use crate::lock::MissileLock;
use crate::projectile::Blast;
use crate::systems::pilots::Incoming;
use crate::weapons::WeaponManager;

/// Who is shooting at whom this frame.
#[derive(Debug, Clone, Copy)]
pub struct Targeting {
    pub player: Option<Entity>,
    /// The player's selected target.
    pub player_target: Option<Entity>,
}

/// Positions of every live aircraft.
pub fn live_positions(world: &World) -> HashMap<Entity, Position> {
    world
        .query::<(&Transform, &Aircraft)>()
        .iter()
        .filter(|(_, (_, aircraft))| aircraft.alive)
        .map(|(entity, (transform, _))| (entity, transform.position))
        .collect()
}

/// Every live missile that is tracking an aircraft.
pub fn incoming(world: &World, sam_missiles: &[Missile]) -> Vec<Incoming> {
    let tracking = |missile: &Missile| {
        let target = missile.target().filter(|_| missile.alive)?;
        Some(Incoming {
            target,
            position: missile.transform.position,
        })
    };
    let mut incoming: Vec<Incoming> = world
        .query::<&MissileLock>()
        .iter()
        .flat_map(|(_, lock)| lock.missiles.iter().filter_map(tracking))
        .collect();
    incoming.extend(sam_missiles.iter().filter_map(tracking));
    incoming
}

/// Run one frame of weapons for every aircraft.
/// Returns blasts from the player's bombs, the only ordnance that damages ground targets.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    targeting: Targeting,
    sam_missiles: &mut Vec<Missile>,
    ground_level: f64,
    rng: &mut R,
    dt: f64,
    events: &mut Vec<SimEvent>,
) -> Vec<Blast> {
    let positions = live_positions(world);
    let resolve = |entity: Entity| positions.get(&entity).map(|position| (entity, *position));

    let mut ground_blasts = Vec::new();
    let mut decoys: Vec<(Entity, Decoy)> = Vec::new();

    for (entity, (transform, aircraft, controls, weapons, lock, countermeasures)) in world.query_mut::<(
        &Transform,
        &Aircraft,
        &ControlValues,
        &mut WeaponManager,
        &mut MissileLock,
        &mut CountermeasureSystem,
    )>() {
        let is_player = targeting.player == Some(entity);
        let controls = if aircraft.alive {
            *controls
        } else {
            ControlValues::default()
        };

        let blasts = weapons.update(transform, aircraft.speed, &controls, ground_level, dt, events);
        if is_player {
            ground_blasts.extend(blasts);
        }

        let target = if is_player {
            targeting.player_target.and_then(resolve)
        } else {
            targeting.player.and_then(resolve)
        };
        lock.update(transform, target, controls.lock_on, dt);
        if aircraft.alive {
            if is_player {
                lock.fire(transform, controls.fire, weapons, events);
            } else {
                lock.launch_on_lock(transform, weapons, events);
            }
        }

        if let Some(decoy) = countermeasures.update(
            transform,
            aircraft.speed,
            controls.deploy_countermeasure,
            dt,
            events,
        ) {
            decoys.push((entity, decoy));
        }

        lock.update_missiles(|e| positions.get(&e).copied(), dt, events);
    }

    for missile in sam_missiles.iter_mut() {
        let target_position = missile.target().and_then(|e| positions.get(&e).copied());
        missile.update(target_position, dt, events);
    }
    sam_missiles.retain(|m| m.alive);

    for (owner, decoy) in &decoys {
        for (entity, lock) in world.query_mut::<&mut MissileLock>() {
            if entity != *owner {
                divert_missiles(decoy, &mut lock.missiles, rng, events);
            }
        }
        divert_missiles(decoy, sam_missiles.iter_mut(), rng, events);
    }

    ground_blasts
}
