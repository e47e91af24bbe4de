//! Boss phase escalation.
//!
//! Tracks a boss's health ratio and escalates through Normal, Enraged and
//! Desperate. Each phase carries an aggression multiplier and, past Normal,
//! a periodic special attack.

use skystrike_core::constants::*;
use skystrike_core::enums::BossPhase;

/// What changed during one `BossState::update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BossUpdate {
    pub phase_changed: bool,
    pub special_attack: bool,
}

/// Per-boss phase state.
#[derive(Debug, Clone)]
pub struct BossState {
    pub phase: BossPhase,
    pub aggression: f64,
    /// Seconds until the next special attack; `None` in `Normal`.
    pub special_cooldown: Option<f64>,
    /// Captured by `init`. Updates are ignored until it is set.
    pub max_health: Option<f64>,
}

impl Default for BossState {
    fn default() -> Self {
        Self {
            phase: BossPhase::Normal,
            aggression: aggression_for(BossPhase::Normal),
            special_cooldown: None,
            max_health: None,
        }
    }
}

impl BossState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the boss's full health. Call once when the boss spawns.
    pub fn init(&mut self, max_health: f64) {
        self.max_health = (max_health > 0.0).then_some(max_health);
        self.phase = BossPhase::Normal;
        self.aggression = aggression_for(BossPhase::Normal);
        self.special_cooldown = cooldown_for(BossPhase::Normal);
    }

    pub fn health_ratio(&self, health: f64) -> f64 {
        match self.max_health {
            Some(max) => (health / max).clamp(0.0, 1.0),
            None => 1.0,
        }
    }

    /// Re-evaluate the phase from current health and tick the special-attack timer.
    pub fn update(&mut self, health: f64, dt: f64) -> BossUpdate {
        let mut result = BossUpdate::default();
        if self.max_health.is_none() {
            return result;
        }

        let phase = phase_for_ratio(self.health_ratio(health));
        if phase != self.phase {
            log::info!(
                "boss phase {:?} -> {:?} (health {:.0})",
                self.phase,
                phase,
                health
            );
            self.phase = phase;
            self.aggression = aggression_for(phase);
            self.special_cooldown = cooldown_for(phase);
            result.phase_changed = true;
            return result;
        }

        if let (Some(remaining), Some(period)) = (self.special_cooldown, cooldown_for(phase)) {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.special_cooldown = Some(period);
                result.special_attack = true;
            } else {
                self.special_cooldown = Some(remaining);
            }
        }
        result
    }
}

pub fn phase_for_ratio(ratio: f64) -> BossPhase {
    if ratio <= BOSS_DESPERATE_RATIO {
        BossPhase::Desperate
    } else if ratio <= BOSS_ENRAGED_RATIO {
        BossPhase::Enraged
    } else {
        BossPhase::Normal
    }
}

pub fn aggression_for(phase: BossPhase) -> f64 {
    match phase {
        BossPhase::Normal => 1.0,
        BossPhase::Enraged => 1.5,
        BossPhase::Desperate => 2.0,
    }
}

/// Special-attack period for a phase. Normal has none.
pub fn cooldown_for(phase: BossPhase) -> Option<f64> {
    match phase {
        BossPhase::Normal => None,
        BossPhase::Enraged => Some(BOSS_ENRAGED_COOLDOWN),
        BossPhase::Desperate => Some(BOSS_DESPERATE_COOLDOWN),
    }
}
