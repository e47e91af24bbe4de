//! Carrier operations system: runs the deck state machine for every
//! aircraft that carries `CarrierOps`, after the flight model has moved it.

use hecs::{Entity, World};

use skystrike_core::components::{Aircraft, Carrier};
use skystrike_core::controls::ControlValues;
use skystrike_core::events::SimEvent;
use skystrike_core::types::{Position, Transform};

use crate::carrier::CarrierOps;
use crate::collision::CollisionSystem;

/// Apply deck overrides. Aircraft that crashed on the deck this frame are
/// reported to `collision` as losses.
pub fn run(
    world: &mut World,
    carrier: Option<Entity>,
    collision: &mut CollisionSystem,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let Some(carrier) = carrier else {
        return;
    };
    let deck = {
        let Ok(position) = world.get::<&Position>(carrier) else {
            return;
        };
        let Ok(ship) = world.get::<&Carrier>(carrier) else {
            return;
        };
        (*position, *ship)
    };
    let (carrier_position, ship) = deck;

    let mut crashed = Vec::new();
    for (entity, (transform, aircraft, controls, ops)) in
        world.query_mut::<(&mut Transform, &mut Aircraft, &ControlValues, &mut CarrierOps)>()
    {
        let was_crashed = ops.crashed;
        ops.update(transform, aircraft, controls.throttle, &carrier_position, &ship, dt, events);
        if ops.crashed && !was_crashed {
            crashed.push(entity);
        }
    }

    for entity in crashed {
        collision.record_loss(world, entity);
    }
}
