//! Tests for the simulation engine, world setup, and the combat systems wired together.

#[cfg(test)]
mod tests {
    use hecs::{Entity, World};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use skystrike_ai::boss::BossState;
    use skystrike_ai::fsm::{evaluate, ActiveManeuver, AiPilot, PilotContext};
    use skystrike_core::components::{Aircraft, GroundTarget};
    use skystrike_core::config::{FlightParams, SimConfig};
    use skystrike_core::constants::*;
    use skystrike_core::controls::ControlValues;
    use skystrike_core::enums::*;
    use skystrike_core::error::SetupError;
    use skystrike_core::events::SimEvent;
    use skystrike_core::mission::*;
    use skystrike_core::state::CombatSnapshot;
    use skystrike_core::types::{Position, Rotation, Transform};

    use crate::carrier::CarrierOps;
    use crate::collision::CollisionSystem;
    use crate::countermeasures::CountermeasureSystem;
    use crate::engine::{next_target, SimulationEngine};
    use crate::flight;
    use crate::guidance::{Missile, Seeker};
    use crate::lock::MissileLock;
    use crate::projectile::{Blast, Projectile};
    use crate::scenario::{build_mission, ScenarioId};
    use crate::systems;
    use crate::systems::combat::Targeting;
    use crate::systems::pilots::{under_fire, Incoming};
    use crate::weapons::WeaponManager;
    use crate::world_setup::{aircraft_builder, catapult_spot};

    fn started(mission: &MissionData) -> SimulationEngine {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.start_mission(mission).unwrap();
        engine
    }

    fn airborne_player(position: Position, heading: f64) -> PlayerStart {
        PlayerStart {
            aircraft_type: "f16".into(),
            position,
            heading,
            on_carrier: false,
            speed: 150.0,
        }
    }

    fn spawn_aircraft(world: &mut World, position: Position) -> Entity {
        let mut builder =
            aircraft_builder(&SimConfig::default(), "f16", Transform::with_heading(position, 0.0), 150.0)
                .unwrap();
        world.spawn(builder.build())
    }

    fn press(engine: &mut SimulationEngine, controls: ControlValues) -> CombatSnapshot {
        engine.set_player_controls(controls);
        let snapshot = engine.tick(DT);
        engine.set_player_controls(ControlValues::default());
        engine.tick(DT);
        snapshot
    }

    fn count_events(snapshots: &[CombatSnapshot], wanted: impl Fn(&SimEvent) -> bool) -> usize {
        snapshots
            .iter()
            .flat_map(|s| s.events.iter())
            .filter(|e| wanted(e))
            .count()
    }

    // ---- Determinism ----

    #[test]
    fn test_determinism_same_seed() {
        let mission = build_mission(ScenarioId::Dogfight);
        let mut engine_a = started(&mission);
        let mut engine_b = started(&mission);

        for i in 0..600 {
            let controls = ControlValues {
                throttle: 0.5,
                roll: if i % 120 < 60 { 0.3 } else { -0.3 },
                fire: i % 30 == 0,
                deploy_countermeasure: i % 90 == 0,
                ..Default::default()
            };
            engine_a.set_player_controls(controls);
            engine_b.set_player_controls(controls);

            let json_a = serde_json::to_string(&engine_a.tick(DT)).unwrap();
            let json_b = serde_json::to_string(&engine_b.tick(DT)).unwrap();
            assert_eq!(json_a, json_b, "snapshots diverged at tick {i}");
        }
    }

    #[test]
    fn test_tick_before_start_is_inert() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let snapshot = engine.tick(DT);
        assert_eq!(snapshot.phase, MissionPhase::NotStarted);
        assert!(snapshot.aircraft.is_empty());
        assert!(snapshot.player.is_none());
        assert_eq!(engine.time().tick, 0);
    }

    // ---- World setup ----

    #[test]
    fn test_every_scenario_starts() {
        for id in ScenarioId::ALL {
            let mut engine = started(&build_mission(id));
            let snapshot = engine.tick(DT);
            assert_eq!(snapshot.phase, MissionPhase::Active, "{id}");
            assert!(snapshot.player.is_some(), "{id}");
        }
    }

    #[test]
    fn test_setup_errors_leave_engine_untouched() {
        let base = build_mission(ScenarioId::Dogfight);
        let mut engine = SimulationEngine::new(SimConfig::default());

        let mut unknown = base.clone();
        unknown.enemies[0].aircraft_type = "zeppelin".into();
        assert!(matches!(
            engine.start_mission(&unknown),
            Err(SetupError::UnknownAircraftType(name)) if name == "zeppelin"
        ));

        let mut difficulty = base.clone();
        difficulty.enemies[1].difficulty = Some(4);
        assert!(matches!(
            engine.start_mission(&difficulty),
            Err(SetupError::InvalidDifficulty(4))
        ));

        let mut group = base.clone();
        group.enemies[2].formation = Some(99);
        assert!(matches!(
            engine.start_mission(&group),
            Err(SetupError::UnknownFormationGroup(99))
        ));

        let mut deck = base;
        deck.player.on_carrier = true;
        assert!(matches!(
            engine.start_mission(&deck),
            Err(SetupError::CarrierStartWithoutCarrier)
        ));

        assert_eq!(engine.phase(), MissionPhase::NotStarted);
        assert_eq!(engine.world().len(), 0);
    }

    #[test]
    fn test_setup_counts_and_formations() {
        let engine = started(&build_mission(ScenarioId::Boss));
        assert_eq!(engine.status().enemies_total, 5);
        assert_eq!(engine.formations().len(), 1);
        assert_eq!(engine.formations()[0].wingmen.len(), 3);
        let boss = engine.boss().unwrap();
        assert_eq!(boss.phase, BossPhase::Normal);
        assert_eq!(boss.max_health, Some(400.0));
    }

    #[test]
    fn test_carrier_start_parks_on_catapult() {
        let mission = build_mission(ScenarioId::CarrierQual);
        let mut engine = started(&mission);
        let snapshot = engine.tick(DT);

        let placement = mission.carrier.unwrap();
        let spot = catapult_spot(&placement.position, placement.heading);
        let player = snapshot.player.unwrap();
        assert!(player.aircraft.transform.position.range_to(&spot) < 1e-9);
        assert_eq!(player.aircraft.speed, 0.0);
        assert_eq!(snapshot.carrier.unwrap().state, CarrierState::OnDeck);
    }

    // ---- Controls ----

    #[test]
    fn test_five_weapon_cycles_return_to_gun() {
        let mut engine = started(&build_mission(ScenarioId::Dogfight));
        let cycle = ControlValues {
            cycle_weapon: true,
            ..Default::default()
        };
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(press(&mut engine, cycle).player.unwrap().weapon);
        }
        assert_eq!(seen, WeaponKind::ALL[1..].iter().copied().chain([WeaponKind::Gun]).collect::<Vec<_>>());
    }

    #[test]
    fn test_target_cycle_picks_nearest_then_walks() {
        let mut engine = started(&build_mission(ScenarioId::Dogfight));
        let cycle = ControlValues {
            cycle_target: true,
            ..Default::default()
        };

        let snapshot = press(&mut engine, cycle);
        let player = snapshot.player.as_ref().unwrap();
        let origin = player.aircraft.transform.position;
        let nearest = snapshot
            .aircraft
            .iter()
            .filter(|a| !a.is_player)
            .min_by(|a, b| {
                origin
                    .range_to(&a.transform.position)
                    .total_cmp(&origin.range_to(&b.transform.position))
            })
            .map(|a| a.id);
        assert_eq!(player.target_id, nearest);

        engine.set_player_controls(cycle);
        let second = engine.tick(DT).player.unwrap().target_id;
        assert!(second.is_some());
        assert_ne!(second, nearest);

        // Holding the button does not cycle again.
        let held = engine.tick(DT).player.unwrap().target_id;
        assert_eq!(held, second);
    }

    #[test]
    fn test_next_target_wraps_in_entity_order() {
        let mut engine = started(&build_mission(ScenarioId::Dogfight));
        engine.tick(DT);
        let world = engine.world();
        let origin = Position::new(0.0, 400.0, 0.0);

        let first = next_target(world, &origin, None).unwrap();
        let mut current = first;
        for _ in 0..3 {
            current = next_target(world, &origin, Some(current)).unwrap();
        }
        assert_eq!(current, first, "three enemies cycle back after three steps");
    }

    // ---- Collision ----

    #[test]
    fn test_hit_applies_damage_exactly_once() {
        let mut world = World::new();
        let shooter = spawn_aircraft(&mut world, Position::new(0.0, 300.0, 0.0));
        let target = spawn_aircraft(&mut world, Position::new(0.0, 300.0, 200.0));

        let round = Projectile::rocket(
            Transform::with_heading(Position::new(0.0, 300.0, 199.0), 0.0),
            1.0,
        );
        world
            .get::<&mut WeaponManager>(shooter)
            .unwrap()
            .projectiles
            .push(round);

        let mut collision = CollisionSystem::new(Some(shooter));
        let mut events = Vec::new();
        collision.update(&mut world, &mut events);
        collision.update(&mut world, &mut events);

        let health = world.get::<&Aircraft>(target).unwrap().health;
        assert_eq!(health, 100.0 - ROCKET_DAMAGE);
        assert_eq!(collision.hit_this_frame, Vec::<Entity>::new(), "cleared on the second pass");
        let hits = events.iter().filter(|e| matches!(e, SimEvent::Hit { .. })).count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_rounds_are_not_spent_on_a_wreck() {
        let mut world = World::new();
        let shooter = spawn_aircraft(&mut world, Position::new(0.0, 300.0, 0.0));
        let target = spawn_aircraft(&mut world, Position::new(0.0, 300.0, 200.0));
        world.get::<&mut Aircraft>(target).unwrap().health = ROCKET_DAMAGE;

        {
            let mut weapons = world.get::<&mut WeaponManager>(shooter).unwrap();
            for _ in 0..2 {
                let at = Transform::with_heading(Position::new(0.0, 300.0, 199.0), 0.0);
                weapons.projectiles.push(Projectile::rocket(at, 1.0));
            }
        }

        let mut collision = CollisionSystem::new(Some(shooter));
        let mut events = Vec::new();
        collision.update(&mut world, &mut events);

        assert!(!world.get::<&Aircraft>(target).unwrap().alive);
        assert_eq!(collision.kills, 1);
        let live_rounds = world
            .get::<&WeaponManager>(shooter)
            .unwrap()
            .projectiles
            .iter()
            .filter(|p| p.alive)
            .count();
        assert_eq!(live_rounds, 1, "the second rocket flies on");
        let hits = events.iter().filter(|e| matches!(e, SimEvent::Hit { .. })).count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_own_rounds_never_hit_the_shooter() {
        let mut world = World::new();
        let shooter = spawn_aircraft(&mut world, Position::new(0.0, 300.0, 0.0));
        let round = Projectile::tracer(Transform::with_heading(Position::new(0.0, 300.0, 0.5), 0.0), 1.0);
        world
            .get::<&mut WeaponManager>(shooter)
            .unwrap()
            .projectiles
            .push(round);

        let mut collision = CollisionSystem::new(Some(shooter));
        let mut events = Vec::new();
        collision.update(&mut world, &mut events);

        assert_eq!(world.get::<&Aircraft>(shooter).unwrap().health, 100.0);
        assert!(world.get::<&WeaponManager>(shooter).unwrap().projectiles[0].alive);
        assert!(!collision.player_hit_this_frame);
    }

    #[test]
    fn test_blast_destroys_ground_target_and_reports_index() {
        let mut world = World::new();
        world.spawn((Position::new(0.0, 0.0, 0.0), GroundTarget::new(3, GroundTargetKind::Vehicle)));
        world.spawn((Position::new(500.0, 0.0, 0.0), GroundTarget::new(4, GroundTargetKind::Bunker)));

        let mut collision = CollisionSystem::default();
        let mut events = Vec::new();
        let mut blasts = vec![Blast::new(Position::new(1.0, GROUND_LEVEL, 0.0), BOMB_DAMAGE)];
        assert_eq!(collision.check_ground_targets(&mut world, &mut blasts, &mut events), vec![3]);

        let mut again = vec![Blast::new(Position::new(1.0, GROUND_LEVEL, 0.0), BOMB_DAMAGE)];
        assert!(collision
            .check_ground_targets(&mut world, &mut again, &mut events)
            .is_empty());
        assert!(again[0].alive, "dead targets do not absorb blasts");
    }

    #[test]
    fn test_ground_impact_fails_mission_once() {
        let mission = MissionData {
            name: "Lawn Dart".into(),
            player: airborne_player(Position::new(0.0, 10.0, 0.0), 0.0),
            ..Default::default()
        };
        let mut engine = started(&mission);
        let player = engine.player().unwrap();
        engine.world_mut().get::<&mut Transform>(player).unwrap().rotation = Rotation::new(-0.5, 0.0, 0.0);

        let snapshots: Vec<CombatSnapshot> = (0..60).map(|_| engine.tick(DT)).collect();
        let last = snapshots.last().unwrap();
        assert_eq!(last.phase, MissionPhase::Failed);
        assert!(last.mission_failed);
        assert_eq!(count_events(&snapshots, |e| *e == SimEvent::MissionFailed), 1);

        let frozen = engine.time();
        engine.tick(DT);
        assert_eq!(engine.time().tick, frozen.tick);
    }

    #[test]
    fn test_player_rocket_completes_strike() {
        let target = Position::new(0.0, 0.0, 0.0);
        let start = Position::new(0.0, 40.0, -200.0);
        let mission = MissionData {
            name: "Plink".into(),
            player: airborne_player(start, 0.0),
            ground_targets: vec![
                GroundTargetSpawn {
                    kind: GroundTargetKind::Bunker,
                    position: Position::new(300.0, 0.0, 300.0),
                },
                GroundTargetSpawn {
                    kind: GroundTargetKind::Vehicle,
                    position: target,
                },
            ],
            objectives: vec![Objective::DestroyGroundTargets {
                kind: Some(GroundTargetKind::Vehicle),
            }],
            ..Default::default()
        };
        let mut engine = started(&mission);
        let player = engine.player().unwrap();
        {
            let world = engine.world_mut();
            world.get::<&mut Transform>(player).unwrap().rotation =
                Rotation::new(-(40.0f64).atan2(200.0), 0.0, 0.0);
            world.get::<&mut WeaponManager>(player).unwrap().selected = WeaponKind::Rockets;
            for (_, ground) in world.query_mut::<&mut GroundTarget>() {
                if ground.kind == GroundTargetKind::Vehicle {
                    ground.health = 10.0;
                }
            }
        }

        engine.set_player_controls(ControlValues {
            fire: true,
            ..Default::default()
        });
        let mut last = engine.tick(DT);
        for _ in 0..60 {
            if last.phase != MissionPhase::Active {
                break;
            }
            last = engine.tick(DT);
        }

        assert_eq!(last.phase, MissionPhase::Complete);
        assert_eq!(last.status.destroyed_ground_targets, vec![1]);
        assert!(!last.ground_targets[1].alive);
        assert!(last.ground_targets[0].alive);
    }

    // ---- Carrier ----

    #[test]
    fn test_catapult_launch_from_deck() {
        let mut engine = started(&build_mission(ScenarioId::CarrierQual));
        let mut snapshots = Vec::new();
        for _ in 0..30 {
            snapshots.push(engine.tick(DT));
        }
        assert_eq!(engine.carrier_ops().unwrap().state, CarrierState::OnDeck);

        engine.set_player_controls(ControlValues {
            throttle: 1.0,
            ..Default::default()
        });
        let frames = (LAUNCH_DURATION / DT).ceil() as usize + 2;
        for _ in 0..frames {
            snapshots.push(engine.tick(DT));
        }

        // Still inside the approach envelope, so it may already be tracking the deck.
        let ops: CarrierOps = engine.carrier_ops().unwrap();
        assert!(matches!(ops.state, CarrierState::Airborne | CarrierState::Approaching));
        assert!(!ops.crashed);
        assert_eq!(count_events(&snapshots, |e| matches!(e, SimEvent::CatapultLaunch { .. })), 1);
        let player = snapshots.last().unwrap().player.as_ref().unwrap();
        assert!(player.aircraft.speed >= LAUNCH_SPEED - 1e-9);
        assert_eq!(engine.phase(), MissionPhase::Active);
    }

    // ---- Boss ----

    #[test]
    fn test_boss_phase_change_raises_aggression() {
        let mut engine = started(&build_mission(ScenarioId::Boss));
        let boss = engine
            .world()
            .query::<&BossState>()
            .iter()
            .map(|(e, _)| e)
            .next()
            .unwrap();
        engine.world_mut().get::<&mut Aircraft>(boss).unwrap().health = 160.0;

        let snapshot = engine.tick(DT);
        assert!(snapshot.events.contains(&SimEvent::BossPhaseChanged {
            phase: BossPhase::Enraged
        }));
        let view = snapshot.boss.unwrap();
        assert_eq!(view.phase, BossPhase::Enraged);
        assert_eq!(view.aggression, 1.5);
        assert_eq!(engine.world().get::<&WeaponManager>(boss).unwrap().damage_multiplier, 1.5);
    }

    #[test]
    fn test_boss_special_attack_fires_salvo() {
        let mut world = World::new();
        let boss = spawn_aircraft(&mut world, Position::new(0.0, 500.0, 0.0));
        let mut state = BossState::new();
        state.init(100.0);
        world.insert_one(boss, state).unwrap();
        world.get::<&mut Aircraft>(boss).unwrap().health = 20.0;

        let mut events = Vec::new();
        assert!(!systems::boss::run(&mut world, Some(boss), DT, &mut events));
        assert!(world.get::<&WeaponManager>(boss).unwrap().projectiles.is_empty());

        assert!(!systems::boss::run(&mut world, Some(boss), BOSS_DESPERATE_COOLDOWN, &mut events));
        let weapons = world.get::<&WeaponManager>(boss).unwrap();
        assert_eq!(weapons.projectiles.len(), BOSS_SALVO_SIZE);
        assert!(weapons.projectiles.iter().all(|p| p.damage == ROCKET_DAMAGE * 2.0));
        assert!(events.iter().any(|e| matches!(e, SimEvent::BossSpecialAttack { .. })));
    }

    #[test]
    fn test_dead_boss_marks_objective() {
        let mut engine = started(&build_mission(ScenarioId::Boss));
        let boss = engine
            .world()
            .query::<&BossState>()
            .iter()
            .map(|(e, _)| e)
            .next()
            .unwrap();
        engine.world_mut().get::<&mut Aircraft>(boss).unwrap().destroy();

        let snapshot = engine.tick(DT);
        assert!(snapshot.status.boss_destroyed);
        assert_eq!(snapshot.phase, MissionPhase::Complete);
        assert!(snapshot.events.contains(&SimEvent::MissionComplete));
    }

    // ---- SAM sites ----

    #[test]
    fn test_sam_site_fires_once_per_cooldown() {
        let mission = MissionData {
            name: "Flak Alley".into(),
            player: airborne_player(Position::new(0.0, 300.0, -500.0), 0.0),
            ground_targets: vec![GroundTargetSpawn {
                kind: GroundTargetKind::Sam,
                position: Position::new(0.0, 0.0, 0.0),
            }],
            ..Default::default()
        };
        let mut engine = started(&mission);

        let first = engine.tick(DT);
        assert_eq!(engine.sam_missiles().len(), 1);
        assert!(first.events.contains(&SimEvent::MissileLaunch {
            position: Position::new(0.0, SAM_LAUNCH_HEIGHT, 0.0),
            mode: GuidanceMode::Radar,
        }));
        assert_eq!(first.player.unwrap().incoming_missiles, 1);

        let second = engine.tick(DT);
        assert_eq!(engine.sam_missiles().len(), 1);
        assert!(!second
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::MissileLaunch { .. })));
    }

    #[test]
    fn test_sam_ignores_player_out_of_range() {
        let mission = MissionData {
            name: "Standoff".into(),
            player: airborne_player(Position::new(0.0, 300.0, -2000.0), 0.0),
            ground_targets: vec![GroundTargetSpawn {
                kind: GroundTargetKind::Sam,
                position: Position::new(0.0, 0.0, 0.0),
            }],
            ..Default::default()
        };
        let mut engine = started(&mission);
        engine.tick(DT);
        assert!(engine.sam_missiles().is_empty());
    }

    // ---- Countermeasures ----

    struct Staged {
        world: World,
        player: Entity,
        enemy: Entity,
        sams: Vec<Missile>,
    }

    /// Player at (0,300,0) heading +Z with an enemy ahead. The enemy has a
    /// heat missile closing from behind the player, the player has its own
    /// heat missile in flight, and a SAM radar missile also tracks the player.
    fn staged_decoy_fight(flares: u32, chaff: u32) -> Staged {
        let mut world = World::new();
        let player = spawn_aircraft(&mut world, Position::new(0.0, 300.0, 0.0));
        let enemy = spawn_aircraft(&mut world, Position::new(0.0, 300.0, 800.0));
        *world.get::<&mut CountermeasureSystem>(player).unwrap() = CountermeasureSystem::new(flares, chaff);

        let behind = Transform::with_heading(Position::new(0.0, 300.0, -60.0), 0.0);
        world
            .get::<&mut MissileLock>(enemy)
            .unwrap()
            .missiles
            .push(Missile::launch(GuidanceMode::Heat, behind, Some(player)));
        let ahead = Transform::with_heading(Position::new(0.0, 300.0, 20.0), 0.0);
        world
            .get::<&mut MissileLock>(player)
            .unwrap()
            .missiles
            .push(Missile::launch(GuidanceMode::Heat, ahead, Some(enemy)));

        let sam = Transform::with_heading(Position::new(10.0, 300.0, -80.0), 0.0);
        let sams = vec![Missile::launch(GuidanceMode::Radar, sam, Some(player))];
        Staged {
            world,
            player,
            enemy,
            sams,
        }
    }

    fn combat_frame(staged: &mut Staged, deploy: bool, rng: &mut StepRng, events: &mut Vec<SimEvent>) {
        staged
            .world
            .get::<&mut ControlValues>(staged.player)
            .unwrap()
            .deploy_countermeasure = deploy;
        let targeting = Targeting {
            player: Some(staged.player),
            player_target: None,
        };
        systems::combat::run(&mut staged.world, targeting, &mut staged.sams, GROUND_LEVEL, rng, DT, events);
    }

    fn seekers(world: &World, owner: Entity) -> Vec<Seeker> {
        let lock = world.get::<&MissileLock>(owner).unwrap();
        lock.missiles.iter().map(|m| m.seeker).collect()
    }

    #[test]
    fn test_flare_pulls_enemy_missile_but_not_own() {
        let mut staged = staged_decoy_fight(2, 0);
        // A zero draw always passes the divert roll.
        let mut rng = StepRng::new(0, 0);
        let mut events = Vec::new();
        combat_frame(&mut staged, true, &mut rng, &mut events);

        assert!(matches!(seekers(&staged.world, staged.enemy)[..], [Seeker::Decoy(_)]));
        assert_eq!(seekers(&staged.world, staged.player), vec![Seeker::Target(staged.enemy)]);
        assert_eq!(staged.sams[0].seeker, Seeker::Target(staged.player), "flares do not fool radar");
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, SimEvent::MissileDiverted { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_chaff_pulls_sam_missile() {
        let mut staged = staged_decoy_fight(0, 2);
        let mut rng = StepRng::new(0, 0);
        let mut events = Vec::new();
        combat_frame(&mut staged, true, &mut rng, &mut events);

        assert!(matches!(staged.sams[0].seeker, Seeker::Decoy(_)));
        assert_eq!(
            seekers(&staged.world, staged.enemy),
            vec![Seeker::Target(staged.player)],
            "chaff does not fool heat seekers"
        );
    }

    #[test]
    fn test_divert_draw_only_on_deploy_frame() {
        let mut staged = staged_decoy_fight(2, 0);
        let mut rng = StepRng::new(0, 0);
        let mut events = Vec::new();
        combat_frame(&mut staged, true, &mut rng, &mut events);

        // A fresh missile near the still-live flare, with the input held.
        let late = Transform::with_heading(Position::new(0.0, 300.0, -40.0), 0.0);
        staged
            .world
            .get::<&mut MissileLock>(staged.enemy)
            .unwrap()
            .missiles
            .push(Missile::launch(GuidanceMode::Heat, late, Some(staged.player)));
        for _ in 0..10 {
            combat_frame(&mut staged, true, &mut rng, &mut events);
        }
        assert_eq!(
            seekers(&staged.world, staged.enemy).last(),
            Some(&Seeker::Target(staged.player))
        );
    }

    // ---- AI wiring ----

    #[test]
    fn test_under_fire_sources() {
        let mut world = World::new();
        let me = world.spawn(());
        let other = world.spawn(());
        let here = Position::new(0.0, 300.0, 0.0);
        let near = Incoming {
            target: me,
            position: Position::new(0.0, 300.0, 400.0),
        };
        let far = Incoming {
            target: me,
            position: Position::new(0.0, 300.0, 900.0),
        };
        let elsewhere = Incoming {
            target: other,
            position: here,
        };

        assert!(under_fire(me, &here, &[near], &[]));
        assert!(!under_fire(me, &here, &[far, elsewhere], &[]));
        assert!(under_fire(me, &here, &[], &[me]));
    }

    #[test]
    fn test_split_s_pulls_through_at_combat_speed() {
        let params = FlightParams::default();
        let mut transform = Transform::with_heading(Position::new(0.0, 2000.0, 0.0), 0.0);
        let mut aircraft = Aircraft::new("f16", 100.0, 200.0);
        let mut pilot = AiPilot::new(3);
        pilot.maneuver = Some(ActiveManeuver {
            kind: ManeuverKind::SplitS,
            remaining_secs: SPLIT_S_PULL_DURATION,
            direction: 1.0,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let mut pulled_through = false;
        let mut frames = 0;
        while pilot.is_evading() && frames < 1200 {
            let ctx = PilotContext {
                transform,
                speed: aircraft.speed,
                target: None,
                under_fire: false,
            };
            let controls = evaluate(&ctx, &mut pilot, &mut rng, DT);
            flight::integrate(&mut transform, &mut aircraft, &controls, &params, DT);
            pulled_through |= transform.rotation.pitch < 0.0;
            frames += 1;
        }
        assert!(pulled_through, "nose never came down");
        assert!(!pilot.is_evading(), "maneuver ends after the pull");
    }

    #[test]
    fn test_formation_holds_until_player_closes() {
        let mut engine = started(&build_mission(ScenarioId::Dogfight));
        engine.tick(DT);
        assert!(!engine.formations()[0].engaged);
        assert!(!engine.formations()[0].broken);
    }
}
