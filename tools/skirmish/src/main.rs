//! skirmish: headless driver for the SKYSTRIKE combat core.
//!
//! Usage:
//!   skirmish list
//!   skirmish run dogfight --seconds 90 --seed 7
//!   skirmish run strike --config aircraft.json --json
//!
//! The player aircraft is flown by the same pursuit pilot the enemies use.
//! Set `RUST_LOG=debug` for per-kill and per-launch logging.

use std::process;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skystrike_ai::fsm::{evaluate, AiPilot, PilotContext};
use skystrike_core::config::SimConfig;
use skystrike_core::constants::DT;
use skystrike_core::controls::ControlValues;
use skystrike_core::enums::{CarrierState, MissionPhase};
use skystrike_core::events::SimEvent;
use skystrike_core::state::CombatSnapshot;
use skystrike_sim::scenario::{build_mission, ScenarioId};
use skystrike_sim::SimulationEngine;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "list" => {
            for id in ScenarioId::ALL {
                println!("{id}");
            }
        }
        "run" => cmd_run(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "skirmish: SKYSTRIKE headless mission runner\n\
         \n\
         Commands:\n\
         \n\
         list      Print the built-in scenarios\n\
         \n\
         run <scenario>\n\
         \n\
           --seconds <N>      Simulated seconds to run (default: 120)\n\
           --seed <N>         RNG seed (default: from config)\n\
           --config <path>    JSON SimConfig to load instead of the defaults\n\
           --json             Print the final snapshot as JSON\n\
         \n\
         Examples:\n\
         \n\
           skirmish run dogfight --seconds 90 --seed 7\n\
           RUST_LOG=debug skirmish run boss\n"
    );
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let i = args.iter().position(|a| a == flag)?;
    let value = args.get(i + 1)?;
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("Error: invalid value for {flag}: {value}");
            process::exit(1);
        }
    }
}

fn load_config(args: &[String]) -> SimConfig {
    let Some(path) = parse_flag::<String>(args, "--config") else {
        return SimConfig::default();
    };
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: cannot read {path}: {e}");
            process::exit(1);
        }
    };
    match SimConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {path}: {e}");
            process::exit(1);
        }
    }
}

fn cmd_run(args: &[String]) {
    let Some(scenario) = args.first() else {
        eprintln!("Error: run needs a scenario name");
        print_usage();
        process::exit(1);
    };
    let scenario: ScenarioId = match scenario.parse() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let seconds: f64 = parse_flag(args, "--seconds").unwrap_or(120.0);
    let mut config = load_config(args);
    if let Some(seed) = parse_flag(args, "--seed") {
        config.seed = seed;
    }
    let seed = config.seed;

    let mission = build_mission(scenario);
    let mut engine = SimulationEngine::new(config);
    if let Err(e) = engine.start_mission(&mission) {
        eprintln!("Error: mission `{}` failed to load: {e}", mission.name);
        process::exit(1);
    }
    println!("=== {} ({scenario}), seed {seed} ===", mission.name);
    log::info!("running `{}` for up to {seconds:.0}s", mission.name);

    let mut autopilot = Autopilot::new(seed);
    let mut snapshot = engine.tick(DT);
    let mut tally = Tally::default();
    let frames = (seconds / DT).ceil() as u64;

    for _ in 0..frames {
        if snapshot.phase != MissionPhase::Active {
            break;
        }
        engine.set_player_controls(autopilot.fly(&snapshot));
        snapshot = engine.tick(DT);
        tally.record(&snapshot);
    }
    if snapshot.phase == MissionPhase::Active {
        log::info!("time limit reached with the mission still active");
    } else {
        log::info!(
            "mission ended {:?} at {:.1}s",
            snapshot.phase,
            snapshot.time.elapsed_secs
        );
    }

    tally.print(&snapshot);
    if args.iter().any(|a| a == "--json") {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: cannot serialize snapshot: {e}"),
        }
    }
}

/// Flies the player: catapult off the deck if parked, otherwise pursue the
/// nearest live enemy.
struct Autopilot {
    pilot: AiPilot,
    rng: ChaCha8Rng,
    /// Hits taken last frame; a hit makes the pilot fly defensively.
    hit_last_frame: bool,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            pilot: AiPilot::new(3),
            rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            hit_last_frame: false,
        }
    }

    fn fly(&mut self, snapshot: &CombatSnapshot) -> ControlValues {
        let Some(player) = &snapshot.player else {
            return ControlValues::default();
        };
        if let Some(carrier) = &snapshot.carrier {
            if carrier.state == CarrierState::OnDeck {
                return ControlValues {
                    throttle: 1.0,
                    ..Default::default()
                };
            }
        }

        let me = &player.aircraft;
        let target = snapshot
            .aircraft
            .iter()
            .filter(|a| a.alive && !a.is_player)
            .map(|a| a.transform.position)
            .min_by(|a, b| {
                me.transform
                    .position
                    .range_to(a)
                    .total_cmp(&me.transform.position.range_to(b))
            });

        let ctx = PilotContext {
            transform: me.transform,
            speed: me.speed,
            target,
            under_fire: self.hit_last_frame || player.incoming_missiles > 0,
        };
        self.hit_last_frame = snapshot.player_hit_this_frame;
        evaluate(&ctx, &mut self.pilot, &mut self.rng, DT)
    }
}

#[derive(Default)]
struct Tally {
    shots: u32,
    missiles: u32,
    hits_taken: u32,
    decoys: u32,
    diversions: u32,
}

impl Tally {
    fn record(&mut self, snapshot: &CombatSnapshot) {
        for event in &snapshot.events {
            match event {
                SimEvent::MuzzleFlash { .. } => self.shots += 1,
                SimEvent::MissileLaunch { .. } => self.missiles += 1,
                SimEvent::Hit { on_player: true, damage, .. } => {
                    log::debug!("player hit for {damage:.0}");
                    self.hits_taken += 1;
                }
                SimEvent::CountermeasureDeployed { .. } => self.decoys += 1,
                SimEvent::MissileDiverted { .. } => self.diversions += 1,
                _ => {}
            }
        }
    }

    fn print(&self, snapshot: &CombatSnapshot) {
        let status = &snapshot.status;
        println!("Outcome:        {:?}", snapshot.phase);
        println!("Sim time:       {:.1}s", snapshot.time.elapsed_secs);
        println!(
            "Enemies:        {}/{} destroyed",
            status.enemies_destroyed, status.enemies_total
        );
        println!("Ground kills:   {:?}", status.destroyed_ground_targets);
        if let Some(player) = &snapshot.player {
            println!(
                "Player health:  {:.0} ({})",
                player.aircraft.health,
                if player.aircraft.alive { "alive" } else { "lost" }
            );
        }
        if let Some(boss) = &snapshot.boss {
            println!("Boss:           {:?} at {:.0}%", boss.phase, boss.health_ratio * 100.0);
        }
        if let Some(carrier) = &snapshot.carrier {
            println!(
                "Carrier:        {:?} (landed: {}, crashed: {})",
                carrier.state, carrier.landed, carrier.crashed
            );
        }
        println!(
            "Shots: {}  Missiles: {}  Hits taken: {}  Decoys: {}  Diverted: {}",
            self.shots, self.missiles, self.hits_taken, self.decoys, self.diversions
        );
    }
}
