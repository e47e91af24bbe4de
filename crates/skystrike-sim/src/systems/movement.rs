//! Flight integration system.
//!
//! Steps every live aircraft through the flight model using whatever
//! `ControlValues` were written for it this frame.

use hecs::World;

use skystrike_core::components::Aircraft;
use skystrike_core::config::FlightParams;
use skystrike_core::controls::ControlValues;
use skystrike_core::types::Transform;

use crate::flight;

/// Integrate all aircraft. Returns how many were stalled this frame.
pub fn run(world: &mut World, dt: f64) -> usize {
    let mut stalled = 0;
    for (_entity, (transform, aircraft, controls, params)) in
        world.query_mut::<(&mut Transform, &mut Aircraft, &ControlValues, &FlightParams)>()
    {
        if flight::integrate(transform, aircraft, controls, params, dt) {
            stalled += 1;
        }
    }
    stalled
}
