//! SAM site system: live SAM batteries fire radar missiles at the player.

use hecs::{Entity, World};

use skystrike_core::components::GroundTarget;
use skystrike_core::constants::{SAM_FIRE_COOLDOWN, SAM_LAUNCH_HEIGHT, SAM_RANGE};
use skystrike_core::enums::GuidanceMode;
use skystrike_core::events::SimEvent;
use skystrike_core::types::{Position, Transform};

use crate::guidance::{aim_at, Missile};

/// Tick battery cooldowns and launch at the player when in range.
/// New missiles are appended to `missiles`.
pub fn run(
    world: &mut World,
    player: Option<(Entity, Position)>,
    missiles: &mut Vec<Missile>,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    for (_entity, (site, target)) in world.query_mut::<(&Position, &mut GroundTarget)>() {
        if !target.alive {
            continue;
        }
        let index = target.index;
        let Some(battery) = target.sam.as_mut() else {
            continue;
        };
        battery.cooldown = (battery.cooldown - dt).max(0.0);

        let Some((player, player_position)) = player else {
            continue;
        };
        if battery.missiles == 0
            || battery.cooldown > 0.0
            || site.range_to(&player_position) > SAM_RANGE
        {
            continue;
        }

        let rail = Position::new(site.x, site.y + SAM_LAUNCH_HEIGHT, site.z);
        let launch = Transform {
            position: rail,
            rotation: aim_at(&rail, &player_position),
        };
        battery.missiles -= 1;
        battery.cooldown = SAM_FIRE_COOLDOWN;
        missiles.push(Missile::launch(GuidanceMode::Radar, launch, Some(player)));
        events.push(SimEvent::MissileLaunch {
            position: rail,
            mode: GuidanceMode::Radar,
        });
        log::debug!("SAM site {index} launched, {} left", battery.missiles);
    }
}
