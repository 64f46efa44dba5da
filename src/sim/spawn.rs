//! Stochastic entity generation
//!
//! Three independent draws per tick, always in the same order (obstacle,
//! power-up, coin) so a seeded run replays exactly.

use rand::Rng;

use super::powerup::PowerUpKind;
use super::state::{Coin, GameState, Obstacle, ObstacleKind, PowerUp};
use crate::consts::LANE_COUNT;
use crate::tuning::Tuning;

/// Roll for new entities at the right edge of the field
pub fn spawn_entities(state: &mut GameState, tuning: &Tuning) {
    if state.rng.random_bool(tuning.obstacle_chance) {
        let lane = state.rng.random_range(0..LANE_COUNT);
        let kind = if state.rng.random_bool(0.5) {
            ObstacleKind::RequiresJump
        } else {
            ObstacleKind::RequiresSlide
        };
        let id = state.next_entity_id();
        log::debug!("Spawned {:?} obstacle in lane {}", kind, lane);
        state.obstacles.push(Obstacle::new(id, kind, lane));
    }

    if state.rng.random_bool(tuning.powerup_chance) {
        let lane = state.rng.random_range(0..LANE_COUNT);
        let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
        let id = state.next_entity_id();
        log::debug!("Spawned {:?} power-up in lane {}", kind, lane);
        state.power_ups.push(PowerUp::new(id, kind, lane));
    }

    if state.rng.random_bool(tuning.coin_chance) {
        let lane = state.rng.random_range(0..LANE_COUNT);
        let id = state.next_entity_id();
        state.coins.push(Coin::new(id, lane));
    }
}
