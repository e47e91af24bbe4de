//! Combat simulation for SKYSTRIKE.
//!
//! Owns the hecs ECS world, runs the flight model, weapons, collision and
//! carrier systems each frame, and produces `CombatSnapshot`s for the
//! renderer, HUD and mission logic.

pub mod carrier;
pub mod collision;
pub mod countermeasures;
pub mod engine;
pub mod flight;
pub mod guidance;
pub mod lock;
pub mod projectile;
pub mod scenario;
pub mod systems;
pub mod weapons;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use skystrike_core as core;

#[cfg(test)]
mod tests;
