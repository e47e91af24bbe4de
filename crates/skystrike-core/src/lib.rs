//! Core types and definitions for the SKYSTRIKE combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, control values, configuration, the mission record,
//! events, snapshot views and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod controls;
pub mod enums;
pub mod error;
pub mod events;
pub mod mission;
pub mod state;
pub mod types;
