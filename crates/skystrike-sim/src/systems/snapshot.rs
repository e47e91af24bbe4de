//! Snapshot system: queries the ECS world and builds a complete CombatSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use skystrike_ai::boss::BossState;
use skystrike_core::components::*;
use skystrike_core::enums::MissionPhase;
use skystrike_core::events::SimEvent;
use skystrike_core::mission::MissionStatus;
use skystrike_core::state::*;
use skystrike_core::types::{SimTime, Transform};

use crate::carrier::CarrierOps;
use crate::collision::CollisionSystem;
use crate::countermeasures::CountermeasureSystem;
use crate::lock::MissileLock;
use crate::systems::pilots::Incoming;
use crate::weapons::WeaponManager;

/// Engine-side state the snapshot reports alongside the world.
pub struct SnapshotInput<'a> {
    pub time: SimTime,
    pub phase: MissionPhase,
    pub player: Option<Entity>,
    pub player_target: Option<Entity>,
    pub boss: Option<Entity>,
    pub collision: &'a CollisionSystem,
    pub status: &'a MissionStatus,
    pub incoming: &'a [Incoming],
}

/// Stable external id for an entity.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Build a complete CombatSnapshot from the current world state.
pub fn build_snapshot(world: &World, input: SnapshotInput<'_>, events: Vec<SimEvent>) -> CombatSnapshot {
    let player = input.player;
    CombatSnapshot {
        time: input.time,
        phase: input.phase,
        player: player.and_then(|p| build_player(world, p, input.player_target, input.incoming)),
        aircraft: build_aircraft(world, player),
        ground_targets: build_ground_targets(world),
        carrier: player.and_then(|p| build_carrier(world, p)),
        boss: input.boss.and_then(|b| build_boss(world, b)),
        mission_failed: input.collision.mission_failed,
        player_hit_this_frame: input.collision.player_hit_this_frame,
        status: input.status.clone(),
        events,
    }
}

fn aircraft_view(entity: Entity, transform: &Transform, aircraft: &Aircraft, is_player: bool) -> AircraftView {
    AircraftView {
        id: entity_id(entity),
        type_name: aircraft.type_name.clone(),
        transform: *transform,
        speed: aircraft.speed,
        health: aircraft.health,
        alive: aircraft.alive,
        is_player,
    }
}

fn build_aircraft(world: &World, player: Option<Entity>) -> Vec<AircraftView> {
    let mut views: Vec<AircraftView> = world
        .query::<(&Transform, &Aircraft)>()
        .iter()
        .map(|(entity, (transform, aircraft))| {
            aircraft_view(entity, transform, aircraft, player == Some(entity))
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_player(
    world: &World,
    player: Entity,
    target: Option<Entity>,
    incoming: &[Incoming],
) -> Option<PlayerView> {
    let mut query = world
        .query_one::<(&Transform, &Aircraft, &WeaponManager, &MissileLock, &CountermeasureSystem)>(player)
        .ok()?;
    let (transform, aircraft, weapons, lock, countermeasures) = query.get()?;

    Some(PlayerView {
        aircraft: aircraft_view(player, transform, aircraft, true),
        weapon: weapons.selected,
        ammo: weapons.ammo(),
        lock_state: lock.state,
        lock_progress: lock.progress_ratio(),
        target_id: target.map(entity_id),
        flares: countermeasures.flares,
        chaff: countermeasures.chaff,
        incoming_missiles: incoming.iter().filter(|m| m.target == player).count() as u32,
    })
}

fn build_ground_targets(world: &World) -> Vec<GroundTargetView> {
    let mut views: Vec<GroundTargetView> = world
        .query::<&GroundTarget>()
        .iter()
        .map(|(_, target)| GroundTargetView {
            index: target.index,
            kind: target.kind,
            health: target.health,
            alive: target.alive,
        })
        .collect();
    views.sort_by_key(|v| v.index);
    views
}

fn build_carrier(world: &World, player: Entity) -> Option<CarrierView> {
    let ops = world.get::<&CarrierOps>(player).ok()?;
    Some(CarrierView {
        state: ops.state,
        landed: ops.landed,
        crashed: ops.crashed,
        glideslope_error: ops.glideslope_error,
        lineup_error: ops.lineup_error,
    })
}

fn build_boss(world: &World, boss: Entity) -> Option<BossView> {
    let mut query = world.query_one::<(&Aircraft, &BossState)>(boss).ok()?;
    let (aircraft, state) = query.get()?;
    Some(BossView {
        phase: state.phase,
        health_ratio: state.health_ratio(aircraft.health),
        aggression: state.aggression,
    })
}
