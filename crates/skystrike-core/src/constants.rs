//! Simulation constants and tuning parameters.

/// Nominal frame rate the driver loop runs at (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds per nominal frame.
pub const DT: f64 = 1.0 / FRAME_RATE as f64;

/// Slack for timers that accumulate `dt`; 120 frames of `DT` sum to just
/// under 2.0 in f64.
pub const TIME_EPSILON: f64 = 1e-9;

/// Altitude at or below which aircraft crash and bombs detonate.
pub const GROUND_LEVEL: f64 = 2.0;

/// Downward acceleration applied to bombs (units/s²).
pub const GRAVITY: f64 = 9.81;

// --- Flight model defaults ---

pub const DEFAULT_MAX_SPEED: f64 = 220.0;
pub const DEFAULT_ACCELERATION: f64 = 45.0;
pub const DEFAULT_DECELERATION: f64 = 35.0;

/// Turn rate at zero speed (rad/s).
pub const DEFAULT_TURN_RATE: f64 = 1.6;

pub const DEFAULT_STALL_THRESHOLD: f64 = 40.0;

/// Speed regained per second while stalled.
pub const DEFAULT_STALL_RECOVERY_RATE: f64 = 30.0;

/// Nose-down rotation per second while stalled (rad/s).
pub const DEFAULT_STALL_NOSE_DROP_RATE: f64 = 0.9;

pub const DEFAULT_MIN_ALTITUDE: f64 = 0.0;

/// Fraction of turn authority lost at max speed.
pub const TURN_DAMPING_AT_MAX_SPEED: f64 = 0.7;

/// Pitch limit (rad), just short of vertical.
pub const MAX_PITCH: f64 = 1.4;

// --- Projectiles ---

pub const TRACER_SPEED: f64 = 400.0;
pub const TRACER_LIFETIME: f64 = 2.0;
pub const TRACER_DAMAGE: f64 = 10.0;

pub const ROCKET_SPEED: f64 = 520.0;
pub const ROCKET_LIFETIME: f64 = 1.5;
pub const ROCKET_DAMAGE: f64 = 45.0;

pub const BOMB_LIFETIME: f64 = 20.0;
pub const BOMB_DAMAGE: f64 = 120.0;

// --- Missiles ---

pub const MISSILE_SPEED: f64 = 300.0;
pub const MISSILE_DAMAGE: f64 = 60.0;

/// Maximum yaw/pitch correction per second (rad/s).
pub const MISSILE_TURN_RATE: f64 = 2.5;

pub const HEAT_MISSILE_LIFETIME: f64 = 5.0;
pub const RADAR_MISSILE_LIFETIME: f64 = 9.0;

/// Distance at which a diverted missile is considered to have passed its decoy.
pub const DECOY_CONSUME_RADIUS: f64 = 4.0;

// --- Weapon manager ---

pub const GUN_FIRE_INTERVAL: f64 = 0.08;
pub const ROCKET_FIRE_INTERVAL: f64 = 0.4;
pub const BOMB_RELEASE_INTERVAL: f64 = 1.0;

/// Distance ahead of the nose at which projectiles spawn.
pub const MUZZLE_OFFSET: f64 = 6.0;

// --- Missile lock ---

/// Lock cone half-angle (rad), 30°.
pub const LOCK_CONE: f64 = std::f64::consts::PI / 6.0;

/// Seconds of continuous tracking needed to lock.
pub const LOCK_TIME: f64 = 2.0;

pub const LOCK_MAX_RANGE: f64 = 1200.0;

// --- Countermeasures ---

pub const COUNTERMEASURE_COOLDOWN: f64 = 1.0;
pub const DECOY_RANGE: f64 = 200.0;
pub const FLARE_DIVERT_CHANCE: f64 = 0.70;
pub const CHAFF_DIVERT_CHANCE: f64 = 0.60;
pub const FLARE_LIFETIME: f64 = 3.0;
pub const CHAFF_LIFETIME: f64 = 4.0;
pub const FLARE_SINK_RATE: f64 = 6.0;

/// Decoys spawn this far behind the tail.
pub const DECOY_SPAWN_OFFSET: f64 = 5.0;

/// Fraction of the launch aircraft's speed a decoy keeps.
pub const FLARE_DRIFT_FACTOR: f64 = 0.2;
pub const CHAFF_DRIFT_FACTOR: f64 = 0.1;

// --- Collision ---

pub const HIT_RADIUS: f64 = 3.0;
pub const GROUND_HIT_RADIUS: f64 = 6.0;

// --- AI ---

/// Gun cone half-angle (rad), 30°.
pub const AI_FIRE_CONE: f64 = std::f64::consts::PI / 6.0;
pub const AI_FIRE_RANGE: f64 = 300.0;
pub const AI_LOCK_RANGE: f64 = 700.0;
pub const MANEUVER_DURATION: f64 = 2.5;

/// Nose-down pull time of a split-S once inverted. The roll to inverted is
/// untimed since roll authority falls off with speed.
pub const SPLIT_S_PULL_DURATION: f64 = 1.5;
pub const SPLIT_S_MIN_ALTITUDE: f64 = 150.0;

/// Roll magnitude at which a split-S counts as inverted (rad).
pub const SPLIT_S_INVERTED_ROLL: f64 = 2.8;

/// Distance within which a tracking missile puts an aircraft under fire.
pub const UNDER_FIRE_RANGE: f64 = 500.0;

// --- Formation ---

pub const FORMATION_ENGAGE_DISTANCE: f64 = 450.0;
pub const FORMATION_DISENGAGE_DISTANCE: f64 = 650.0;
pub const FORMATION_SPACING_LATERAL: f64 = 25.0;
pub const FORMATION_SPACING_TRAIL: f64 = 20.0;

/// Along-track error (units) that maps to full throttle correction.
pub const FORMATION_THROTTLE_BAND: f64 = 30.0;

// --- Carrier operations ---

pub const DECK_HEIGHT: f64 = 20.0;
pub const DECK_LENGTH: f64 = 180.0;
pub const DECK_WIDTH: f64 = 30.0;
pub const CATAPULT_ACCEL: f64 = 70.0;
pub const LAUNCH_SPEED: f64 = 120.0;
pub const LAUNCH_DURATION: f64 = 2.0;

/// Ideal approach angle (rad), 3.5°.
pub const GLIDESLOPE_ANGLE: f64 = 3.5 * std::f64::consts::PI / 180.0;

pub const APPROACH_MAX_DISTANCE: f64 = 1500.0;
pub const APPROACH_MAX_HEIGHT: f64 = 400.0;
pub const APPROACH_MAX_SPEED: f64 = 170.0;
pub const APPROACH_ABORT_DISTANCE: f64 = 2000.0;
pub const APPROACH_ABORT_HEIGHT: f64 = 500.0;
pub const APPROACH_ABORT_SPEED: f64 = 190.0;

/// Height above the deck that counts as touching down.
pub const TOUCHDOWN_HEIGHT: f64 = 3.0;
pub const MAX_TRAP_SPEED: f64 = 110.0;

/// Max nose attitude for a trap (rad), 15°.
pub const MAX_TRAP_PITCH: f64 = 15.0 * std::f64::consts::PI / 180.0;

/// Overshoot past the bow that counts as a bolter.
pub const BOLTER_OVERRUN: f64 = 60.0;
pub const BOLTER_CLEAR_DISTANCE: f64 = 600.0;
pub const ARREST_DECEL: f64 = 45.0;

// --- Boss ---

pub const BOSS_ENRAGED_RATIO: f64 = 0.5;
pub const BOSS_DESPERATE_RATIO: f64 = 0.25;
pub const BOSS_ENRAGED_COOLDOWN: f64 = 8.0;
pub const BOSS_DESPERATE_COOLDOWN: f64 = 5.0;
pub const BOSS_SALVO_SIZE: usize = 3;

/// Angular spread between salvo rockets (rad), 6°.
pub const BOSS_SALVO_SPREAD: f64 = 6.0 * std::f64::consts::PI / 180.0;

// --- Ground targets ---

pub const SAM_MAX_HEALTH: f64 = 80.0;
pub const BUNKER_MAX_HEALTH: f64 = 200.0;
pub const VEHICLE_MAX_HEALTH: f64 = 60.0;
pub const RADAR_SITE_MAX_HEALTH: f64 = 100.0;
pub const SAM_MISSILE_AMMO: u32 = 4;
pub const SAM_RANGE: f64 = 900.0;
pub const SAM_FIRE_COOLDOWN: f64 = 6.0;

/// Height above the site at which SAM missiles leave the rail.
pub const SAM_LAUNCH_HEIGHT: f64 = 4.0;
