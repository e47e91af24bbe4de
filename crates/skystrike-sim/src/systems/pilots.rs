//! Pilot system: writes every enemy's `ControlValues` for this frame.
//!
//! Wingmen held by an unengaged formation fly their slot; everyone else runs
//! the pursuit/evasion FSM from skystrike-ai against the player.

use std::collections::HashMap;

use hecs::{Entity, World};
use rand::Rng;

use skystrike_ai::formation::{steer_to_slot, Formation};
use skystrike_ai::fsm::{evaluate, AiPilot, PilotContext};
use skystrike_core::components::Aircraft;
use skystrike_core::constants::UNDER_FIRE_RANGE;
use skystrike_core::controls::ControlValues;
use skystrike_core::types::{Position, Transform};

/// A hostile missile in flight: who it tracks and where it is.
#[derive(Debug, Clone, Copy)]
pub struct Incoming {
    pub target: Entity,
    pub position: Position,
}

/// Whether an aircraft at `position` should be flying defensively.
pub fn under_fire(entity: Entity, position: &Position, incoming: &[Incoming], recently_hit: &[Entity]) -> bool {
    recently_hit.contains(&entity)
        || incoming
            .iter()
            .any(|m| m.target == entity && m.position.range_to(position) <= UNDER_FIRE_RANGE)
}

/// Live position of an aircraft, or `None` if it is gone or dead.
pub fn live_position(world: &World, entity: Entity) -> Option<Position> {
    let transform = world.get::<&Transform>(entity).ok()?;
    let aircraft = world.get::<&Aircraft>(entity).ok()?;
    aircraft.alive.then_some(transform.position)
}

fn live_state(world: &World, entity: Entity) -> Option<(Transform, f64)> {
    let transform = world.get::<&Transform>(entity).ok()?;
    let aircraft = world.get::<&Aircraft>(entity).ok()?;
    aircraft.alive.then_some((*transform, aircraft.speed))
}

/// Update formation engagement and work out which wingmen fly a slot this frame.
/// Returns wingman -> (leader transform, leader speed, slot position).
pub fn update_formations(
    world: &World,
    formations: &mut [Formation<Entity>],
    player: Option<Entity>,
) -> HashMap<Entity, (Transform, f64, Position)> {
    let target = player.and_then(|p| live_position(world, p));
    let mut slots = HashMap::new();

    for formation in formations.iter_mut() {
        let Some((leader, leader_speed)) = live_state(world, formation.leader) else {
            formation.break_formation();
            continue;
        };
        formation.update_engagement(&leader.position, target.as_ref());
        if !formation.holds_wingmen() {
            continue;
        }
        for (index, wingman) in formation.wingmen.iter().enumerate() {
            slots.insert(*wingman, (leader, leader_speed, formation.slot_position(&leader, index)));
        }
    }
    slots
}

/// Run every AI pilot for one frame.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    formations: &mut [Formation<Entity>],
    player: Option<Entity>,
    incoming: &[Incoming],
    recently_hit: &[Entity],
    rng: &mut R,
    dt: f64,
) {
    let slots = update_formations(world, formations, player);
    let target = player.and_then(|p| live_position(world, p));

    for (entity, (transform, aircraft, pilot, controls)) in
        world.query_mut::<(&Transform, &Aircraft, &mut AiPilot, &mut ControlValues)>()
    {
        if !aircraft.alive {
            *controls = ControlValues::default();
            continue;
        }

        if let Some((leader, leader_speed, slot)) = slots.get(&entity) {
            *controls = steer_to_slot(transform, aircraft.speed, leader, *leader_speed, slot);
            continue;
        }

        let ctx = PilotContext {
            transform: *transform,
            speed: aircraft.speed,
            target,
            under_fire: under_fire(entity, &transform.position, incoming, recently_hit),
        };
        *controls = evaluate(&ctx, pilot, rng, dt);
    }
}
