//! Scenario definitions: built-in missions for the headless driver and tests.
//!
//! Each scenario lays out the player start, enemy composition, ground
//! targets and objectives of one mission.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use skystrike_core::enums::{FormationKind, GroundTargetKind};
use skystrike_core::mission::*;
use skystrike_core::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    Dogfight,
    Strike,
    CarrierQual,
    Boss,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 4] = [
        ScenarioId::Dogfight,
        ScenarioId::Strike,
        ScenarioId::CarrierQual,
        ScenarioId::Boss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenarioId::Dogfight => "dogfight",
            ScenarioId::Strike => "strike",
            ScenarioId::CarrierQual => "carrier-qual",
            ScenarioId::Boss => "boss",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| format!("unknown scenario `{s}`"))
    }
}

/// Build the mission record for a scenario.
pub fn build_mission(scenario: ScenarioId) -> MissionData {
    match scenario {
        ScenarioId::Dogfight => build_dogfight(),
        ScenarioId::Strike => build_strike(),
        ScenarioId::CarrierQual => build_carrier_qual(),
        ScenarioId::Boss => build_boss(),
    }
}

fn airborne(position: Position, heading: f64) -> PlayerStart {
    PlayerStart {
        aircraft_type: "f16".into(),
        position,
        heading,
        on_carrier: false,
        speed: 150.0,
    }
}

fn enemy(aircraft_type: &str, position: Position, heading: f64) -> EnemySpawn {
    EnemySpawn {
        aircraft_type: aircraft_type.into(),
        position,
        heading,
        speed: 140.0,
        difficulty: None,
        boss: false,
        formation: None,
    }
}

/// "Furball": a MiG-29 pair in wing formation plus a lone MiG-21, head-on.
fn build_dogfight() -> MissionData {
    let mut lead = enemy("mig29", Position::new(0.0, 400.0, 1500.0), PI);
    lead.formation = Some(1);
    let mut wing = enemy("mig29", Position::new(-25.0, 400.0, 1520.0), PI);
    wing.formation = Some(1);
    let mut straggler = enemy("mig21", Position::new(600.0, 350.0, 1800.0), PI);
    straggler.difficulty = Some(1);

    MissionData {
        name: "Furball".into(),
        player: airborne(Position::new(0.0, 400.0, 0.0), 0.0),
        enemies: vec![lead, wing, straggler],
        formations: vec![FormationGroup {
            id: 1,
            kind: FormationKind::Wing,
        }],
        objectives: vec![Objective::DestroyAllEnemies],
        ai_difficulty: Some(2),
        ..Default::default()
    }
}

/// "Iron Hand": destroy the SAM belt and the radar behind it.
fn build_strike() -> MissionData {
    let site = |kind, x, z| GroundTargetSpawn {
        kind,
        position: Position::new(x, 0.0, z),
    };
    MissionData {
        name: "Iron Hand".into(),
        player: airborne(Position::new(0.0, 600.0, -2000.0), 0.0),
        enemies: vec![enemy("mig21", Position::new(300.0, 500.0, 1500.0), PI)],
        ground_targets: vec![
            site(GroundTargetKind::Sam, -200.0, 0.0),
            site(GroundTargetKind::Sam, 200.0, 0.0),
            site(GroundTargetKind::Radar, 0.0, 300.0),
            site(GroundTargetKind::Bunker, 0.0, 500.0),
            site(GroundTargetKind::Vehicle, 60.0, 520.0),
        ],
        objectives: vec![
            Objective::DestroyGroundTargets {
                kind: Some(GroundTargetKind::Sam),
            },
            Objective::DestroyGroundTargets {
                kind: Some(GroundTargetKind::Radar),
            },
        ],
        ai_difficulty: Some(1),
        ..Default::default()
    }
}

/// "Blue Water": launch off the catapult and trap back aboard.
fn build_carrier_qual() -> MissionData {
    MissionData {
        name: "Blue Water".into(),
        player: PlayerStart {
            aircraft_type: "f16".into(),
            position: Position::default(),
            heading: 0.0,
            on_carrier: true,
            speed: 0.0,
        },
        carrier: Some(CarrierPlacement {
            position: Position::new(0.0, 0.0, 0.0),
            heading: 0.0,
        }),
        objectives: vec![Objective::LandOnCarrier],
        ..Default::default()
    }
}

/// "Last Flanker": a Su-47 boss escorted by a MiG-29 diamond.
fn build_boss() -> MissionData {
    let mut boss = enemy("su47", Position::new(0.0, 700.0, 2500.0), PI);
    boss.boss = true;
    boss.difficulty = Some(3);

    let escort: Vec<EnemySpawn> = [(400.0, 2400.0), (380.0, 2380.0), (420.0, 2380.0), (400.0, 2360.0)]
        .into_iter()
        .map(|(x, z)| {
            let mut e = enemy("mig29", Position::new(x, 650.0, z), PI);
            e.formation = Some(7);
            e
        })
        .collect();

    let mut enemies = vec![boss];
    enemies.extend(escort);

    MissionData {
        name: "Last Flanker".into(),
        player: airborne(Position::new(0.0, 600.0, 0.0), 0.0),
        enemies,
        formations: vec![FormationGroup {
            id: 7,
            kind: FormationKind::Diamond,
        }],
        objectives: vec![Objective::DestroyBoss],
        ai_difficulty: Some(2),
        ..Default::default()
    }
}
