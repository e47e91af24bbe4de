//! AI for SKYSTRIKE.
//!
//! Pure decision logic on plain data: pursuit steering and the evasive
//! maneuver state machine, difficulty profiles, formation keeping and the
//! boss phase machine. No ECS dependency.

pub mod boss;
pub mod formation;
pub mod fsm;
pub mod profiles;
pub mod steering;

pub use skystrike_core as core;
