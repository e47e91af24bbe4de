//! Flares and chaff.
//!
//! A deploy press releases one decoy behind the aircraft, alternating between
//! flare and chaff and falling back to whichever type is left. Matching
//! seekers near the decoy may be pulled off onto it.

use glam::DVec3;
use rand::Rng;

use skystrike_core::constants::*;
use skystrike_core::controls::EdgeTrigger;
use skystrike_core::enums::CountermeasureKind;
use skystrike_core::events::SimEvent;
use skystrike_core::types::{Position, Transform};

use crate::guidance::Missile;

/// A released flare or chaff cloud.
#[derive(Debug, Clone, Copy)]
pub struct Decoy {
    pub kind: CountermeasureKind,
    pub position: Position,
    pub velocity: DVec3,
    pub age: f64,
    pub lifetime: f64,
    pub alive: bool,
}

impl Decoy {
    /// Spawn behind `launcher`, drifting with a fraction of its speed.
    pub fn release(kind: CountermeasureKind, launcher: &Transform, speed: f64) -> Self {
        let forward = launcher.forward();
        let position = launcher.position.offset(-forward * DECOY_SPAWN_OFFSET);
        let (velocity, lifetime) = match kind {
            CountermeasureKind::Flare => (
                forward * speed * FLARE_DRIFT_FACTOR - DVec3::Y * FLARE_SINK_RATE,
                FLARE_LIFETIME,
            ),
            CountermeasureKind::Chaff => (forward * speed * CHAFF_DRIFT_FACTOR, CHAFF_LIFETIME),
        };
        Self {
            kind,
            position,
            velocity,
            age: 0.0,
            lifetime,
            alive: true,
        }
    }

    pub fn update(&mut self, dt: f64) {
        if !self.alive {
            return;
        }
        self.age += dt;
        self.position = self.position.offset(self.velocity * dt);
        if self.age >= self.lifetime {
            self.alive = false;
        }
    }

    fn divert_chance(&self) -> f64 {
        match self.kind {
            CountermeasureKind::Flare => FLARE_DIVERT_CHANCE,
            CountermeasureKind::Chaff => CHAFF_DIVERT_CHANCE,
        }
    }
}

/// Per-aircraft dispenser.
#[derive(Debug, Clone)]
pub struct CountermeasureSystem {
    pub flares: u32,
    pub chaff: u32,
    /// Type preferred by the next deploy.
    pub next: CountermeasureKind,
    pub cooldown: f64,
    pub decoys: Vec<Decoy>,
    deploy_edge: EdgeTrigger,
}

impl CountermeasureSystem {
    pub fn new(flares: u32, chaff: u32) -> Self {
        Self {
            flares,
            chaff,
            next: CountermeasureKind::Flare,
            cooldown: 0.0,
            decoys: Vec::new(),
            deploy_edge: EdgeTrigger::default(),
        }
    }

    pub fn remaining(&self, kind: CountermeasureKind) -> u32 {
        match kind {
            CountermeasureKind::Flare => self.flares,
            CountermeasureKind::Chaff => self.chaff,
        }
    }

    fn count_mut(&mut self, kind: CountermeasureKind) -> &mut u32 {
        match kind {
            CountermeasureKind::Flare => &mut self.flares,
            CountermeasureKind::Chaff => &mut self.chaff,
        }
    }

    /// Advance decoys and handle the deploy input.
    /// Returns the decoy released this frame, if any.
    pub fn update(
        &mut self,
        launcher: &Transform,
        speed: f64,
        deploy_pressed: bool,
        dt: f64,
        events: &mut Vec<SimEvent>,
    ) -> Option<Decoy> {
        self.cooldown = (self.cooldown - dt).max(0.0);
        for decoy in &mut self.decoys {
            decoy.update(dt);
        }
        self.decoys.retain(|d| d.alive);

        if !self.deploy_edge.rising(deploy_pressed) || self.cooldown > 0.0 {
            return None;
        }

        let preferred = self.next;
        let kind = [preferred, preferred.other()]
            .into_iter()
            .find(|kind| self.remaining(*kind) > 0)?;
        *self.count_mut(kind) -= 1;
        self.next = kind.other();
        self.cooldown = COUNTERMEASURE_COOLDOWN;

        let decoy = Decoy::release(kind, launcher, speed);
        self.decoys.push(decoy);
        events.push(SimEvent::CountermeasureDeployed {
            position: decoy.position,
            kind,
        });
        Some(decoy)
    }
}

/// Give each live, matching missile near `decoy` its chance to be pulled off.
/// Returns how many were diverted.
pub fn divert_missiles<'a, R: Rng + ?Sized>(
    decoy: &Decoy,
    missiles: impl IntoIterator<Item = &'a mut Missile>,
    rng: &mut R,
    events: &mut Vec<SimEvent>,
) -> usize {
    let mut diverted = 0;
    for missile in missiles {
        if !missile.alive || !decoy.kind.fools(missile.mode) {
            continue;
        }
        if missile.transform.position.range_to(&decoy.position) > DECOY_RANGE {
            continue;
        }
        if rng.gen_bool(decoy.divert_chance()) {
            missile.divert_to_flare(decoy.position);
            events.push(SimEvent::MissileDiverted {
                position: missile.transform.position,
                kind: decoy.kind,
            });
            diverted += 1;
        }
    }
    if diverted > 0 {
        log::debug!("{diverted} missile(s) diverted by {:?}", decoy.kind);
    }
    diverted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use skystrike_core::enums::GuidanceMode;

    use crate::guidance::Seeker;

    fn launcher() -> Transform {
        Transform::with_heading(Position::new(0.0, 300.0, 0.0), 0.0)
    }

    fn tap(system: &mut CountermeasureSystem, events: &mut Vec<SimEvent>) -> Option<Decoy> {
        let decoy = system.update(&launcher(), 150.0, true, DT, events);
        system.update(&launcher(), 150.0, false, COUNTERMEASURE_COOLDOWN, events);
        decoy
    }

    #[test]
    fn test_alternates_and_falls_through() {
        let mut system = CountermeasureSystem::new(1, 2);
        let mut events = Vec::new();
        let kinds: Vec<_> = (0..4)
            .map(|_| tap(&mut system, &mut events).map(|d| d.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(CountermeasureKind::Flare),
                Some(CountermeasureKind::Chaff),
                Some(CountermeasureKind::Chaff),
                None,
            ]
        );
    }

    #[test]
    fn test_held_input_deploys_once() {
        let mut system = CountermeasureSystem::new(5, 5);
        let mut events = Vec::new();
        for _ in 0..200 {
            system.update(&launcher(), 150.0, true, DT, &mut events);
        }
        assert_eq!(system.flares + system.chaff, 9);
    }

    #[test]
    fn test_cooldown_blocks_rapid_presses() {
        let mut system = CountermeasureSystem::new(5, 5);
        let mut events = Vec::new();
        assert!(system.update(&launcher(), 150.0, true, DT, &mut events).is_some());
        system.update(&launcher(), 150.0, false, DT, &mut events);
        assert!(system.update(&launcher(), 150.0, true, DT, &mut events).is_none());
    }

    #[test]
    fn test_decoy_spawns_behind_and_expires() {
        let mut system = CountermeasureSystem::new(1, 0);
        let mut events = Vec::new();
        let decoy = system.update(&launcher(), 150.0, true, DT, &mut events).unwrap();
        assert!((decoy.position.z + DECOY_SPAWN_OFFSET).abs() < 1e-9);

        system.update(&launcher(), 150.0, false, 1.0, &mut events);
        let flare = system.decoys[0];
        assert!(flare.position.y < 300.0, "flares sink");
        assert!(flare.position.z > decoy.position.z, "drifts along the launch track");

        system.update(&launcher(), 150.0, false, FLARE_LIFETIME, &mut events);
        assert!(system.decoys.is_empty());
    }

    #[test]
    fn test_divert_only_matching_seekers_in_range() {
        let decoy = Decoy::release(CountermeasureKind::Flare, &launcher(), 150.0);
        let near = Transform::with_heading(Position::new(0.0, 300.0, -100.0), 0.0);
        let far = Transform::with_heading(Position::new(0.0, 300.0, -500.0), 0.0);
        let mut missiles = vec![
            Missile::launch(GuidanceMode::Heat, near, None),
            Missile::launch(GuidanceMode::Radar, near, None),
            Missile::launch(GuidanceMode::Heat, far, None),
        ];
        let mut events = Vec::new();
        // A zero draw always passes the probability check.
        let diverted = divert_missiles(&decoy, &mut missiles, &mut StepRng::new(0, 0), &mut events);
        assert_eq!(diverted, 1);
        assert_eq!(missiles[0].seeker, Seeker::Decoy(decoy.position));
        assert_eq!(missiles[1].seeker, Seeker::Lost);
        assert_eq!(missiles[2].seeker, Seeker::Lost);
    }

    #[test]
    fn test_divert_can_fail() {
        let decoy = Decoy::release(CountermeasureKind::Chaff, &launcher(), 150.0);
        let near = Transform::with_heading(Position::new(0.0, 300.0, -50.0), 0.0);
        let mut missiles = vec![Missile::launch(GuidanceMode::Radar, near, None)];
        let mut events = Vec::new();
        // A maximal draw never passes.
        let diverted = divert_missiles(&decoy, &mut missiles, &mut StepRng::new(u64::MAX, 0), &mut events);
        assert_eq!(diverted, 0);
        assert!(events.is_empty());
    }
}
