//! Simulation engine: the frame loop of the combat core.
//!
//! `SimulationEngine` owns the hecs ECS world, takes the player's control
//! values, runs all systems in a fixed order, and produces `CombatSnapshot`s.
//! Completely headless, enabling deterministic testing.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skystrike_ai::boss::BossState;
use skystrike_ai::formation::Formation;
use skystrike_core::components::{Enemy, GroundTarget};
use skystrike_core::config::SimConfig;
use skystrike_core::controls::{ControlValues, EdgeTrigger};
use skystrike_core::enums::MissionPhase;
use skystrike_core::error::SetupError;
use skystrike_core::events::SimEvent;
use skystrike_core::mission::{MissionData, MissionStatus, Objective};
use skystrike_core::state::CombatSnapshot;
use skystrike_core::types::{Position, SimTime};

use crate::carrier::CarrierOps;
use crate::collision::CollisionSystem;
use crate::guidance::Missile;
use crate::systems;
use crate::systems::combat::Targeting;
use crate::systems::pilots::live_position;
use crate::systems::snapshot::SnapshotInput;
use crate::weapons::WeaponManager;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    time: SimTime,
    phase: MissionPhase,
    rng: ChaCha8Rng,

    player: Option<Entity>,
    player_controls: ControlValues,
    player_target: Option<Entity>,
    target_cycle: EdgeTrigger,

    boss: Option<Entity>,
    carrier: Option<Entity>,
    formations: Vec<Formation<Entity>>,
    /// SAM missiles in flight. They belong to no aircraft.
    sam_missiles: Vec<Missile>,
    collision: CollisionSystem,
    objectives: Vec<Objective>,
    status: MissionStatus,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine with an empty world. Call `start_mission` to populate it.
    pub fn new(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            world: World::new(),
            time: SimTime::default(),
            phase: MissionPhase::default(),
            rng,
            player: None,
            player_controls: ControlValues::default(),
            player_target: None,
            target_cycle: EdgeTrigger::default(),
            boss: None,
            carrier: None,
            formations: Vec::new(),
            sam_missiles: Vec::new(),
            collision: CollisionSystem::default(),
            objectives: Vec::new(),
            status: MissionStatus::default(),
            events: Vec::new(),
        }
    }

    /// Replace the world with a fresh mission. On error the current state is kept.
    pub fn start_mission(&mut self, mission: &MissionData) -> Result<(), SetupError> {
        let mut world = World::new();
        let setup = world_setup::setup_mission(&mut world, &self.config, mission)?;

        self.world = world;
        self.time = SimTime::default();
        self.phase = MissionPhase::Active;
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.player = Some(setup.player);
        self.player_controls = ControlValues::default();
        self.player_target = None;
        self.target_cycle = EdgeTrigger::default();
        self.boss = setup.boss;
        self.carrier = setup.carrier;
        self.formations = setup.formations;
        self.sam_missiles.clear();
        self.collision = CollisionSystem::new(Some(setup.player));
        self.objectives = mission.objectives.clone();
        self.status = setup.status;
        self.events.clear();
        Ok(())
    }

    /// Controls applied to the player aircraft on the next tick.
    pub fn set_player_controls(&mut self, controls: ControlValues) {
        self.player_controls = controls;
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    /// Once the mission is failed or complete the world stops advancing.
    pub fn tick(&mut self, dt: f64) -> CombatSnapshot {
        if self.phase == MissionPhase::Active {
            self.run_systems(dt);
            self.evaluate_mission();
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        let incoming = systems::combat::incoming(&self.world, &self.sam_missiles);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInput {
                time: self.time,
                phase: self.phase,
                player: self.player,
                player_target: self.player_target,
                boss: self.boss,
                collision: &self.collision,
                status: &self.status,
                incoming: &incoming,
            },
            events,
        )
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn player_target(&self) -> Option<Entity> {
        self.player_target
    }

    pub fn collision(&self) -> &CollisionSystem {
        &self.collision
    }

    pub fn status(&self) -> &MissionStatus {
        &self.status
    }

    pub fn formations(&self) -> &[Formation<Entity>] {
        &self.formations
    }

    pub fn sam_missiles(&self) -> &[Missile] {
        &self.sam_missiles
    }

    /// Phase state of the tracked boss, if the mission has one.
    pub fn boss(&self) -> Option<BossState> {
        let boss = self.boss?;
        self.world.get::<&BossState>(boss).ok().map(|state| (*state).clone())
    }

    /// Carrier state machine of the player aircraft, if the mission has a carrier.
    pub fn carrier_ops(&self) -> Option<CarrierOps> {
        let player = self.player?;
        self.world.get::<&CarrierOps>(player).ok().map(|ops| (*ops).clone())
    }

    /// Mutable world access for tests that stage a situation directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn run_systems(&mut self, dt: f64) {
        let ground_level = self.config.ground_level;

        // 1. Control producers.
        self.update_player_target();
        if let Some(player) = self.player {
            if let Ok(mut controls) = self.world.get::<&mut ControlValues>(player) {
                *controls = self.player_controls;
            }
        }
        let incoming = systems::combat::incoming(&self.world, &self.sam_missiles);
        let recently_hit = self.collision.hit_this_frame.clone();
        systems::pilots::run(
            &mut self.world,
            &mut self.formations,
            self.player,
            &incoming,
            &recently_hit,
            &mut self.rng,
            dt,
        );

        // 2. Flight.
        systems::movement::run(&mut self.world, dt);

        // 3. Carrier overrides.
        systems::carrier_ops::run(
            &mut self.world,
            self.carrier,
            &mut self.collision,
            dt,
            &mut self.events,
        );

        // 4. Weapons, locks, countermeasures, SAM sites.
        let targeting = Targeting {
            player: self.player,
            player_target: self.player_target,
        };
        let mut blasts = systems::combat::run(
            &mut self.world,
            targeting,
            &mut self.sam_missiles,
            ground_level,
            &mut self.rng,
            dt,
            &mut self.events,
        );
        let player_position = self
            .player
            .and_then(|p| live_position(&self.world, p).map(|position| (p, position)));
        systems::sam::run(
            &mut self.world,
            player_position,
            &mut self.sam_missiles,
            dt,
            &mut self.events,
        );

        // 5. Collision.
        self.collision.update(&mut self.world, &mut self.events);
        self.collision
            .check_hittables(&mut self.world, &mut self.sam_missiles, &mut self.events);
        let mut destroyed =
            self.collision
                .check_ground_targets(&mut self.world, &mut blasts, &mut self.events);
        destroyed.extend(self.player_rounds_vs_ground());
        self.record_ground_kills(&destroyed);
        self.collision
            .check_ground_collision(&mut self.world, ground_level, &mut self.events);
        self.status.enemies_destroyed = self.collision.kills.min(self.status.enemies_total);

        // 6. Boss.
        if systems::boss::run(&mut self.world, self.boss, dt, &mut self.events) {
            self.status.boss_destroyed = true;
        }

        if let Some(ops) = self.carrier_ops() {
            self.status.landed = ops.landed;
        }
    }

    /// The player's gun rounds and rockets against ground targets.
    fn player_rounds_vs_ground(&mut self) -> Vec<u32> {
        let Some(player) = self.player else {
            return Vec::new();
        };
        let mut rounds = match self.world.get::<&mut WeaponManager>(player) {
            Ok(mut weapons) => std::mem::take(&mut weapons.projectiles),
            Err(_) => return Vec::new(),
        };
        let destroyed =
            self.collision
                .check_ground_targets(&mut self.world, &mut rounds, &mut self.events);
        rounds.retain(|r| r.alive);
        if let Ok(mut weapons) = self.world.get::<&mut WeaponManager>(player) {
            weapons.projectiles = rounds;
        }
        destroyed
    }

    fn record_ground_kills(&mut self, destroyed: &[u32]) {
        for index in destroyed {
            let kind = self
                .world
                .query::<&GroundTarget>()
                .iter()
                .find(|(_, target)| target.index == *index)
                .map(|(_, target)| target.kind);
            if let Some(kind) = kind {
                self.status.record_ground_kill(*index, kind);
            }
        }
    }

    /// Drop a dead target and handle the target-cycle button.
    fn update_player_target(&mut self) {
        if let Some(target) = self.player_target {
            if live_position(&self.world, target).is_none() {
                self.player_target = None;
            }
        }
        if !self.target_cycle.rising(self.player_controls.cycle_target) {
            return;
        }
        let Some(origin) = self.player.and_then(|p| live_position(&self.world, p)) else {
            return;
        };
        self.player_target = next_target(&self.world, &origin, self.player_target);
    }

    fn evaluate_mission(&mut self) {
        if self.collision.mission_failed {
            self.phase = MissionPhase::Failed;
            self.events.push(SimEvent::MissionFailed);
            log::info!("mission failed at {:.1}s", self.time.elapsed_secs);
            return;
        }
        if !self.objectives.is_empty()
            && self.objectives.iter().all(|o| o.is_complete(&self.status))
        {
            self.phase = MissionPhase::Complete;
            self.events.push(SimEvent::MissionComplete);
            log::info!("mission complete at {:.1}s", self.time.elapsed_secs);
        }
    }
}

/// Next target in entity order after `current`, or the nearest live enemy
/// when there is no current target.
pub fn next_target(world: &World, origin: &Position, current: Option<Entity>) -> Option<Entity> {
    let mut candidates: Vec<(Entity, f64)> = world
        .query::<&Enemy>()
        .iter()
        .filter_map(|(entity, _)| {
            live_position(world, entity).map(|position| (entity, origin.range_to(&position)))
        })
        .collect();
    candidates.sort_by_key(|(entity, _)| entity.to_bits());

    let current_index = current.and_then(|c| candidates.iter().position(|(e, _)| *e == c));
    match current_index {
        Some(i) => candidates.get((i + 1) % candidates.len()).map(|(e, _)| *e),
        None => candidates
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(e, _)| *e),
    }
}
