//! Carrier launch and recovery.
//!
//! Runs after the flight model each frame and overrides its output while the
//! aircraft is on the deck, on the catapult or in the wires.

use glam::DVec3;

use skystrike_core::components::{Aircraft, Carrier};
use skystrike_core::constants::*;
use skystrike_core::enums::CarrierState;
use skystrike_core::events::SimEvent;
use skystrike_core::types::{Position, Transform};

/// Aircraft position expressed in the carrier's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckOffset {
    /// Toward the bow.
    pub along: f64,
    /// Toward starboard.
    pub lateral: f64,
    pub height: f64,
    pub horizontal_distance: f64,
}

impl DeckOffset {
    pub fn of(position: &Position, carrier_position: &Position, carrier: &Carrier) -> Self {
        let rel = position.to_vec() - carrier_position.to_vec();
        let h = carrier.heading;
        let bow = DVec3::new(h.sin(), 0.0, h.cos());
        let starboard = DVec3::new(h.cos(), 0.0, -h.sin());
        Self {
            along: rel.dot(bow),
            lateral: rel.dot(starboard),
            height: position.y - carrier_position.y - carrier.deck_height,
            horizontal_distance: position.horizontal_range_to(carrier_position),
        }
    }

    pub fn over_deck(&self, carrier: &Carrier) -> bool {
        self.along.abs() <= carrier.deck_length / 2.0 && self.lateral.abs() <= carrier.deck_width / 2.0
    }
}

/// Altitude error against the ideal glideslope: positive high, negative low.
pub fn glideslope_error(altitude: f64, deck_height: f64, horizontal_distance: f64) -> f64 {
    altitude - (deck_height + GLIDESLOPE_ANGLE.tan() * horizontal_distance)
}

#[derive(Debug, Clone)]
pub struct CarrierOps {
    pub state: CarrierState,
    pub landed: bool,
    pub crashed: bool,
    pub launch_timer: f64,
    pub glideslope_error: f64,
    pub lineup_error: f64,
    /// Catapult or arrestor speed while the carrier is in control.
    deck_speed: f64,
    /// Parking spot held while `OnDeck`.
    spot: Position,
}

impl CarrierOps {
    /// Parked on the deck at `spot`.
    pub fn on_deck(spot: Position) -> Self {
        Self {
            state: CarrierState::OnDeck,
            landed: false,
            crashed: false,
            launch_timer: 0.0,
            glideslope_error: 0.0,
            lineup_error: 0.0,
            deck_speed: 0.0,
            spot,
        }
    }

    /// Already flying; the carrier is only a landing option.
    pub fn airborne() -> Self {
        Self {
            state: CarrierState::Airborne,
            ..Self::on_deck(Position::default())
        }
    }

    /// Step the state machine and apply any deck overrides to the aircraft.
    pub fn update(
        &mut self,
        transform: &mut Transform,
        aircraft: &mut Aircraft,
        throttle: f64,
        carrier_position: &Position,
        carrier: &Carrier,
        dt: f64,
        events: &mut Vec<SimEvent>,
    ) {
        if !aircraft.alive {
            return;
        }
        let deck_y = carrier_position.y + carrier.deck_height;

        match self.state {
            CarrierState::OnDeck => {
                transform.position = self.spot;
                transform.position.y = deck_y;
                transform.rotation.pitch = 0.0;
                transform.rotation.roll = 0.0;
                transform.rotation.yaw = carrier.heading;
                aircraft.speed = 0.0;
                if throttle > 0.0 {
                    self.state = CarrierState::Launching;
                    self.launch_timer = 0.0;
                    self.deck_speed = 0.0;
                    events.push(SimEvent::CatapultLaunch {
                        position: transform.position,
                    });
                }
            }
            CarrierState::Launching => {
                self.deck_speed = (self.deck_speed + CATAPULT_ACCEL * dt).min(LAUNCH_SPEED);
                aircraft.speed = self.deck_speed;
                transform.position.y = deck_y;
                transform.rotation.pitch = 0.0;
                transform.rotation.roll = 0.0;
                transform.rotation.yaw = carrier.heading;
                self.launch_timer += dt;
                if self.launch_timer + TIME_EPSILON >= LAUNCH_DURATION {
                    log::info!("catapult launch complete at {:.0} u/s", aircraft.speed);
                    self.state = CarrierState::Airborne;
                }
            }
            CarrierState::Airborne => {
                let offset = DeckOffset::of(&transform.position, carrier_position, carrier);
                if offset.horizontal_distance < APPROACH_MAX_DISTANCE
                    && offset.height < APPROACH_MAX_HEIGHT
                    && aircraft.speed < APPROACH_MAX_SPEED
                {
                    log::debug!("entering carrier approach");
                    self.state = CarrierState::Approaching;
                    self.track_errors(&offset, transform, carrier_position, carrier);
                }
            }
            CarrierState::Approaching => {
                let offset = DeckOffset::of(&transform.position, carrier_position, carrier);
                self.track_errors(&offset, transform, carrier_position, carrier);
                self.approach(offset, transform, aircraft, deck_y, carrier, events);
            }
            CarrierState::Trapped => {
                self.deck_speed = (self.deck_speed - ARREST_DECEL * dt).max(0.0);
                aircraft.speed = self.deck_speed;
                transform.position.y = deck_y;
                transform.rotation.pitch = 0.0;
                transform.rotation.roll = 0.0;
            }
            CarrierState::Bolter => {
                let distance = transform.position.horizontal_range_to(carrier_position);
                if distance > BOLTER_CLEAR_DISTANCE {
                    self.state = CarrierState::Airborne;
                }
            }
        }
    }

    fn track_errors(
        &mut self,
        offset: &DeckOffset,
        transform: &Transform,
        carrier_position: &Position,
        carrier: &Carrier,
    ) {
        self.glideslope_error = glideslope_error(
            transform.position.y - carrier_position.y,
            carrier.deck_height,
            offset.horizontal_distance,
        );
        self.lineup_error = offset.lateral;
    }

    fn approach(
        &mut self,
        offset: DeckOffset,
        transform: &mut Transform,
        aircraft: &mut Aircraft,
        deck_y: f64,
        carrier: &Carrier,
        events: &mut Vec<SimEvent>,
    ) {
        if offset.over_deck(carrier) && offset.height <= TOUCHDOWN_HEIGHT {
            let too_fast = aircraft.speed > MAX_TRAP_SPEED;
            let too_steep = transform.rotation.pitch.abs() > MAX_TRAP_PITCH;
            if too_fast && too_steep {
                log::info!(
                    "carrier crash: {:.0} u/s, pitch {:.2} rad",
                    aircraft.speed,
                    transform.rotation.pitch
                );
                aircraft.destroy();
                self.crashed = true;
                self.state = CarrierState::Airborne;
                events.push(SimEvent::CarrierCrash {
                    position: transform.position,
                });
            } else if !too_fast && !too_steep {
                log::info!("trap at {:.0} u/s", aircraft.speed);
                self.state = CarrierState::Trapped;
                self.landed = true;
                self.deck_speed = aircraft.speed;
                transform.position.y = deck_y;
                transform.rotation.pitch = 0.0;
                events.push(SimEvent::CarrierTrap {
                    position: transform.position,
                });
            }
            // Otherwise the hook skipped; keep flying the approach.
            return;
        }

        if offset.along > carrier.deck_length / 2.0 + BOLTER_OVERRUN {
            log::info!("bolter");
            self.state = CarrierState::Bolter;
            events.push(SimEvent::Bolter {
                position: transform.position,
            });
            return;
        }

        if offset.horizontal_distance > APPROACH_ABORT_DISTANCE
            || offset.height > APPROACH_ABORT_HEIGHT
            || aircraft.speed > APPROACH_ABORT_SPEED
        {
            log::debug!("carrier approach abandoned");
            self.state = CarrierState::Airborne;
        }
    }
}
