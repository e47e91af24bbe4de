//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Per-aircraft state lives in components; cross-entity state the engine
//! owns is passed in.

pub mod boss;
pub mod carrier_ops;
pub mod combat;
pub mod movement;
pub mod pilots;
pub mod sam;
pub mod snapshot;
