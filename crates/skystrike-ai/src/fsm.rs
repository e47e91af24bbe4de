//! Enemy pilot decision logic and evasive maneuver state machine.
//!
//! Pure functions that turn relative geometry into control values. Each frame
//! an AI pilot either pursues its target or, when under fire, flies one of the
//! evasive maneuvers its difficulty tier allows. A chosen maneuver runs for a
//! fixed duration before pursuit can resume; a split-S first rolls inverted,
//! then pulls for its own fixed time. No ECS dependency.

use rand::Rng;

use skystrike_core::constants::*;
use skystrike_core::controls::ControlValues;
use skystrike_core::enums::ManeuverKind;
use skystrike_core::types::{wrap_angle, Position, Transform};

use crate::profiles::{get_profile, DifficultyProfile};
use crate::steering::{level_nose, level_wings, steer_toward};

/// Input to the pilot FSM for a single aircraft.
pub struct PilotContext {
    pub transform: Transform,
    pub speed: f64,
    /// Position of the pursued aircraft; `None` if it is missing or dead.
    pub target: Option<Position>,
    pub under_fire: bool,
}

/// An evasive maneuver in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveManeuver {
    pub kind: ManeuverKind,
    pub remaining_secs: f64,
    /// +1 or -1: which way a break turn goes.
    pub direction: f64,
}

/// Per-aircraft AI state.
#[derive(Debug, Clone)]
pub struct AiPilot {
    pub difficulty: u8,
    pub maneuver: Option<ActiveManeuver>,
}

impl AiPilot {
    pub fn new(difficulty: u8) -> Self {
        Self {
            difficulty: difficulty.clamp(1, 3),
            maneuver: None,
        }
    }

    pub fn is_evading(&self) -> bool {
        self.maneuver.is_some()
    }
}

/// Evaluate the FSM for one pilot and return the controls for this frame.
pub fn evaluate<R: Rng + ?Sized>(
    ctx: &PilotContext,
    pilot: &mut AiPilot,
    rng: &mut R,
    dt: f64,
) -> ControlValues {
    let profile = get_profile(pilot.difficulty);

    // A running maneuver finishes regardless of what happens this frame.
    if let Some(maneuver) = pilot.maneuver {
        let controls = maneuver_controls(&maneuver, ctx);
        pilot.maneuver = advance(maneuver, ctx, dt);
        return controls;
    }

    if ctx.under_fire {
        let maneuver = choose_maneuver(&profile, ctx.transform.position.y, rng);
        let mut controls = maneuver_controls(&maneuver, ctx);
        controls.deploy_countermeasure = true;
        pilot.maneuver = advance(maneuver, ctx, dt);
        return controls;
    }

    match ctx.target {
        Some(target) => pursue(ctx, &target, &profile),
        None => cruise(ctx, &profile),
    }
}

/// Maneuvers available at this altitude for a tier.
/// Split-S needs room to pull through and is dropped when low.
pub fn available_maneuvers(profile: &DifficultyProfile, altitude: f64) -> Vec<ManeuverKind> {
    profile
        .maneuvers
        .iter()
        .copied()
        .filter(|m| *m != ManeuverKind::SplitS || altitude >= SPLIT_S_MIN_ALTITUDE)
        .collect()
}

fn choose_maneuver<R: Rng + ?Sized>(
    profile: &DifficultyProfile,
    altitude: f64,
    rng: &mut R,
) -> ActiveManeuver {
    let options = available_maneuvers(profile, altitude);
    let kind = if options.is_empty() {
        ManeuverKind::BreakTurn
    } else {
        options[rng.gen_range(0..options.len())]
    };
    let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    log::debug!("AI pilot starting {kind:?} at altitude {altitude:.0}");
    let remaining_secs = match kind {
        ManeuverKind::SplitS => SPLIT_S_PULL_DURATION,
        _ => MANEUVER_DURATION,
    };
    ActiveManeuver {
        kind,
        remaining_secs,
        direction,
    }
}

/// Count a frame off the maneuver timer. A split-S still rolling to
/// inverted does not consume time. Returns `None` once the maneuver ends.
fn advance(mut maneuver: ActiveManeuver, ctx: &PilotContext, dt: f64) -> Option<ActiveManeuver> {
    if maneuver.kind == ManeuverKind::SplitS && !is_inverted(&ctx.transform) {
        return Some(maneuver);
    }
    maneuver.remaining_secs -= dt;
    (maneuver.remaining_secs > TIME_EPSILON).then_some(maneuver)
}

fn is_inverted(transform: &Transform) -> bool {
    wrap_angle(transform.rotation.roll).abs() >= SPLIT_S_INVERTED_ROLL
}

fn maneuver_controls(maneuver: &ActiveManeuver, ctx: &PilotContext) -> ControlValues {
    match maneuver.kind {
        ManeuverKind::BreakTurn => ControlValues {
            yaw: maneuver.direction,
            pitch: 1.0,
            roll: 0.5 * maneuver.direction,
            throttle: 1.0,
            ..Default::default()
        },
        ManeuverKind::BarrelRoll => ControlValues {
            roll: 1.0,
            pitch: 0.3,
            throttle: 1.0,
            ..Default::default()
        },
        ManeuverKind::SplitS => {
            if is_inverted(&ctx.transform) {
                // Pulling while inverted drives the nose toward the ground.
                ControlValues {
                    pitch: -1.0,
                    throttle: 0.5,
                    ..Default::default()
                }
            } else {
                ControlValues {
                    roll: 1.0,
                    throttle: 0.5,
                    ..Default::default()
                }
            }
        }
    }
}

/// Pure pursuit: point the nose at the target, full throttle, fire inside the gun envelope.
fn pursue(ctx: &PilotContext, target: &Position, profile: &DifficultyProfile) -> ControlValues {
    let (yaw, pitch) = steer_toward(&ctx.transform, target, profile.steer_gain);
    let distance = ctx.transform.position.range_to(target);
    let off_nose = ctx.transform.angle_off_nose(target);
    let in_cone = off_nose <= AI_FIRE_CONE;

    ControlValues {
        yaw,
        pitch,
        roll: level_wings(&ctx.transform, profile.steer_gain),
        throttle: 1.0,
        fire: in_cone && distance < AI_FIRE_RANGE,
        lock_on: in_cone && distance < AI_LOCK_RANGE,
        ..Default::default()
    }
}

/// No target: fly straight and level at cruise power.
fn cruise(ctx: &PilotContext, profile: &DifficultyProfile) -> ControlValues {
    ControlValues {
        pitch: level_nose(&ctx.transform, profile.steer_gain),
        roll: level_wings(&ctx.transform, profile.steer_gain),
        throttle: 0.6,
        ..Default::default()
    }
}
