//! Collision and damage: the only place aircraft and ground targets lose health.
//!
//! Damage sources are found, hits are collected against a snapshot of live
//! aircraft, then damage is applied in one pass.

use hecs::{Entity, World};

use skystrike_core::components::{Aircraft, GroundTarget, Player};
use skystrike_core::constants::{GROUND_HIT_RADIUS, HIT_RADIUS};
use skystrike_core::events::SimEvent;
use skystrike_core::types::{Position, Transform};

use crate::lock::MissileLock;
use crate::projectile::Hittable;
use crate::weapons::WeaponManager;

#[derive(Debug, Default)]
pub struct CollisionSystem {
    pub player: Option<Entity>,
    /// Latched once the player is destroyed.
    pub mission_failed: bool,
    /// Reset at the start of every `update`.
    pub player_hit_this_frame: bool,
    pub kills: u32,
    /// Aircraft damaged since the last `update` began.
    pub hit_this_frame: Vec<Entity>,
}

struct PendingHit {
    target: Entity,
    damage: f64,
    position: Position,
}

impl CollisionSystem {
    pub fn new(player: Option<Entity>) -> Self {
        Self {
            player,
            ..Default::default()
        }
    }

    /// Weapon-system projectiles and missiles against every aircraft but their owner.
    pub fn update(&mut self, world: &mut World, events: &mut Vec<SimEvent>) {
        self.player_hit_this_frame = false;
        self.hit_this_frame.clear();

        let mut targets = live_aircraft(world);
        let mut hits = Vec::new();

        for (owner, weapons) in world.query_mut::<&mut WeaponManager>() {
            for projectile in &mut weapons.projectiles {
                collect_hit(projectile, &mut targets, Some(owner), &mut hits);
            }
        }
        for (owner, lock) in world.query_mut::<&mut MissileLock>() {
            for missile in &mut lock.missiles {
                collect_hit(missile, &mut targets, Some(owner), &mut hits);
            }
        }

        self.apply_hits(world, hits, events);
    }

    /// Free-standing damage sources against all live aircraft.
    pub fn check_hittables<S: Hittable>(
        &mut self,
        world: &mut World,
        sources: &mut [S],
        events: &mut Vec<SimEvent>,
    ) {
        let mut targets = live_aircraft(world);
        let mut hits = Vec::new();
        for source in sources.iter_mut() {
            collect_hit(source, &mut targets, None, &mut hits);
        }
        self.apply_hits(world, hits, events);
    }

    /// Damage sources against live ground targets.
    /// Returns the mission indices of targets destroyed by this call.
    pub fn check_ground_targets<S: Hittable>(
        &mut self,
        world: &mut World,
        sources: &mut [S],
        events: &mut Vec<SimEvent>,
    ) -> Vec<u32> {
        let mut destroyed = Vec::new();
        for (_entity, (position, target)) in world.query_mut::<(&Position, &mut GroundTarget)>() {
            for source in sources.iter_mut() {
                if !target.alive || !source.is_alive() {
                    continue;
                }
                if source.position().range_to(position) >= GROUND_HIT_RADIUS {
                    continue;
                }
                let damage = source.damage();
                if !source.deactivate() {
                    continue;
                }
                events.push(SimEvent::Hit {
                    position: *position,
                    damage,
                    on_player: false,
                });
                if target.apply_damage(damage) {
                    log::debug!("ground target {} ({:?}) destroyed", target.index, target.kind);
                    events.push(SimEvent::Explosion {
                        position: *position,
                    });
                    destroyed.push(target.index);
                }
            }
        }
        destroyed
    }

    /// Any live aircraft at or below `ground_level` is destroyed.
    pub fn check_ground_collision(
        &mut self,
        world: &mut World,
        ground_level: f64,
        events: &mut Vec<SimEvent>,
    ) {
        let mut crashed = Vec::new();
        for (entity, (transform, aircraft)) in world.query_mut::<(&Transform, &mut Aircraft)>() {
            if aircraft.alive && transform.position.y <= ground_level {
                aircraft.destroy();
                crashed.push((entity, transform.position));
            }
        }
        for (entity, position) in crashed {
            log::debug!("aircraft {entity:?} hit the ground");
            events.push(SimEvent::Explosion { position });
            self.record_loss(world, entity);
        }
    }

    /// Bookkeeping for an aircraft destroyed outside of weapon hits.
    pub fn record_loss(&mut self, world: &World, entity: Entity) {
        if world.get::<&Player>(entity).is_ok() {
            self.fail_mission();
        } else {
            self.kills += 1;
        }
    }

    fn fail_mission(&mut self) {
        if !self.mission_failed {
            log::info!("player destroyed: mission failed");
        }
        self.mission_failed = true;
    }

    fn apply_hits(&mut self, world: &mut World, hits: Vec<PendingHit>, events: &mut Vec<SimEvent>) {
        for hit in hits {
            let is_player = self.player == Some(hit.target);
            let Ok(mut aircraft) = world.get::<&mut Aircraft>(hit.target) else {
                continue;
            };
            if !aircraft.alive {
                continue;
            }
            let killed = aircraft.apply_damage(hit.damage);
            drop(aircraft);

            events.push(SimEvent::Hit {
                position: hit.position,
                damage: hit.damage,
                on_player: is_player,
            });
            if is_player {
                self.player_hit_this_frame = true;
            }
            if !self.hit_this_frame.contains(&hit.target) {
                self.hit_this_frame.push(hit.target);
            }
            if killed {
                events.push(SimEvent::Explosion {
                    position: hit.position,
                });
                if is_player {
                    self.fail_mission();
                } else {
                    log::debug!("aircraft {:?} shot down", hit.target);
                    self.kills += 1;
                }
            }
        }
    }
}

/// A live aircraft as seen by one collision pass.
struct HitTarget {
    entity: Entity,
    position: Position,
    /// Health left once the hits collected so far land.
    health: f64,
}

fn live_aircraft(world: &World) -> Vec<HitTarget> {
    world
        .query::<(&Transform, &Aircraft)>()
        .iter()
        .filter(|(_, (_, aircraft))| aircraft.alive)
        .map(|(entity, (transform, aircraft))| HitTarget {
            entity,
            position: transform.position,
            health: aircraft.health,
        })
        .collect()
}

/// Record the first target `source` touches, deactivating it.
/// Targets already doomed by earlier hits in the pass are passed over, so
/// the round stays live instead of being spent on a wreck.
fn collect_hit<S: Hittable>(
    source: &mut S,
    targets: &mut [HitTarget],
    owner: Option<Entity>,
    hits: &mut Vec<PendingHit>,
) {
    if !source.is_alive() {
        return;
    }
    let position = source.position();
    let struck = targets.iter_mut().find(|target| {
        Some(target.entity) != owner && target.health > 0.0 && position.range_to(&target.position) < HIT_RADIUS
    });
    if let Some(target) = struck {
        let damage = source.damage();
        if source.deactivate() {
            target.health -= damage;
            hits.push(PendingHit {
                target: target.entity,
                damage,
                position: target.position,
            });
        }
    }
}
