//! Entity spawn factories for setting up the simulation world.
//!
//! Builds aircraft, ground targets and the carrier from a `MissionData`
//! record. The whole record is validated before anything is spawned, so a
//! failed setup leaves the world untouched.

use std::collections::BTreeMap;

use glam::DVec3;
use hecs::{Entity, EntityBuilder, World};

use skystrike_ai::boss::BossState;
use skystrike_ai::formation::Formation;
use skystrike_ai::fsm::AiPilot;
use skystrike_core::components::*;
use skystrike_core::config::{AircraftSpec, SimConfig};
use skystrike_core::constants::{DECK_HEIGHT, DECK_LENGTH};
use skystrike_core::controls::ControlValues;
use skystrike_core::error::SetupError;
use skystrike_core::mission::{MissionData, MissionStatus};
use skystrike_core::types::{Position, Transform};

use crate::carrier::CarrierOps;
use crate::countermeasures::CountermeasureSystem;
use crate::lock::MissileLock;
use crate::weapons::WeaponManager;

/// Difficulty used when neither the enemy nor the mission sets one.
pub const DEFAULT_AI_DIFFICULTY: u8 = 2;

/// Handles to the entities the engine tracks by role.
#[derive(Debug)]
pub struct MissionWorld {
    pub player: Entity,
    pub boss: Option<Entity>,
    pub carrier: Option<Entity>,
    pub formations: Vec<Formation<Entity>>,
    pub status: MissionStatus,
}

/// Check every reference in the mission against the config.
pub fn validate_mission(config: &SimConfig, mission: &MissionData) -> Result<(), SetupError> {
    let known = |name: &str| -> Result<(), SetupError> {
        if config.aircraft.contains_key(name) {
            Ok(())
        } else {
            Err(SetupError::UnknownAircraftType(name.to_string()))
        }
    };

    known(&mission.player.aircraft_type)?;
    if mission.player.on_carrier && mission.carrier.is_none() {
        return Err(SetupError::CarrierStartWithoutCarrier);
    }
    if let Some(d) = mission.ai_difficulty {
        check_difficulty(d)?;
    }
    for enemy in &mission.enemies {
        known(&enemy.aircraft_type)?;
        if let Some(d) = enemy.difficulty {
            check_difficulty(d)?;
        }
        if let Some(group) = enemy.formation {
            if !mission.formations.iter().any(|f| f.id == group) {
                return Err(SetupError::UnknownFormationGroup(group));
            }
        }
    }
    Ok(())
}

fn check_difficulty(difficulty: u8) -> Result<(), SetupError> {
    if (1..=3).contains(&difficulty) {
        Ok(())
    } else {
        Err(SetupError::InvalidDifficulty(difficulty))
    }
}

/// Validate and spawn everything in `mission`.
pub fn setup_mission(
    world: &mut World,
    config: &SimConfig,
    mission: &MissionData,
) -> Result<MissionWorld, SetupError> {
    validate_mission(config, mission)?;

    let carrier = mission.carrier.map(|placement| {
        world.spawn((placement.position, Carrier::new(placement.heading)))
    });

    let player = spawn_player(world, config, mission)?;

    let mut status = MissionStatus::default();
    let mut boss = None;
    let mut groups: BTreeMap<u32, Vec<Entity>> = BTreeMap::new();
    for enemy in &mission.enemies {
        let difficulty = enemy
            .difficulty
            .or(mission.ai_difficulty)
            .unwrap_or(DEFAULT_AI_DIFFICULTY);
        let transform = Transform::with_heading(enemy.position, enemy.heading);
        let mut builder = aircraft_builder(config, &enemy.aircraft_type, transform, enemy.speed)?;
        builder.add(Enemy).add(AiPilot::new(difficulty));

        if enemy.boss {
            let mut state = BossState::new();
            state.init(spec_for(config, &enemy.aircraft_type)?.max_health);
            builder.add(state);
        }

        let entity = world.spawn(builder.build());
        status.enemies_total += 1;

        if enemy.boss {
            if boss.is_some() {
                log::warn!("mission `{}` has more than one boss; tracking the first", mission.name);
            } else {
                boss = Some(entity);
            }
        }
        if let Some(group) = enemy.formation {
            groups.entry(group).or_default().push(entity);
        }
    }

    let formations = mission
        .formations
        .iter()
        .filter_map(|group| {
            let mut members = groups.remove(&group.id)?.into_iter();
            let leader = members.next()?;
            Some(Formation::new(leader, members.collect(), group.kind))
        })
        .collect();

    for (index, spawn) in mission.ground_targets.iter().enumerate() {
        world.spawn((spawn.position, GroundTarget::new(index as u32, spawn.kind)));
        status.register_ground_target(spawn.kind);
    }

    log::info!(
        "mission `{}` started: {} enemies, {} ground targets",
        mission.name,
        status.enemies_total,
        mission.ground_targets.len()
    );

    Ok(MissionWorld {
        player,
        boss,
        carrier,
        formations,
        status,
    })
}

fn spawn_player(world: &mut World, config: &SimConfig, mission: &MissionData) -> Result<Entity, SetupError> {
    let start = &mission.player;
    let parked = mission.carrier.filter(|_| start.on_carrier);

    let (transform, speed) = match parked {
        Some(placement) => (
            Transform::with_heading(
                catapult_spot(&placement.position, placement.heading),
                placement.heading,
            ),
            0.0,
        ),
        None => (Transform::with_heading(start.position, start.heading), start.speed),
    };

    let mut builder = aircraft_builder(config, &start.aircraft_type, transform, speed)?;
    builder.add(Player);
    if parked.is_some() {
        builder.add(CarrierOps::on_deck(transform.position));
    } else if mission.carrier.is_some() {
        builder.add(CarrierOps::airborne());
    }
    Ok(world.spawn(builder.build()))
}

/// Catapult position on the deck, a quarter deck length aft of center.
pub fn catapult_spot(carrier_position: &Position, heading: f64) -> Position {
    let bow = DVec3::new(heading.sin(), 0.0, heading.cos());
    carrier_position.offset(-bow * (DECK_LENGTH / 4.0) + DVec3::Y * DECK_HEIGHT)
}

fn spec_for<'a>(config: &'a SimConfig, type_name: &str) -> Result<&'a AircraftSpec, SetupError> {
    config
        .aircraft
        .get(type_name)
        .ok_or_else(|| SetupError::UnknownAircraftType(type_name.to_string()))
}

/// Component bundle shared by every aircraft.
pub fn aircraft_builder(
    config: &SimConfig,
    type_name: &str,
    transform: Transform,
    speed: f64,
) -> Result<EntityBuilder, SetupError> {
    let spec = spec_for(config, type_name)?;

    let mut builder = EntityBuilder::new();
    builder
        .add(transform)
        .add(Aircraft::new(type_name, spec.max_health, speed))
        .add(config.flight_params_for(spec))
        .add(ControlValues::default())
        .add(WeaponManager::new(&spec.loadout))
        .add(MissileLock::new())
        .add(CountermeasureSystem::new(spec.loadout.flares, spec.loadout.chaff));
    Ok(builder)
}
