//! Fixed-step simulation tick
//!
//! Core game loop that advances the run by exactly one frame. The step order
//! below is part of the contract: tests replay seeded runs against it.

use super::collision::{collectible_hit, obstacle_hit};
use super::events::{GameEvent, GameOverCause};
use super::powerup::{self, Catalog};
use super::spawn::spawn_entities;
use super::state::{GamePhase, GameState};
use super::timers::TimerSlot;
use crate::lane_y;
use crate::tuning::Tuning;

/// Advance the game state by one frame. No-op unless running.
pub fn tick(state: &mut GameState, catalog: &Catalog, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    // Timers are tick-driven, so a paused game never reaches this point
    for slot in state.timers.fire_due(now) {
        match slot {
            TimerSlot::Effect(kind) => {
                powerup::expire(&mut state.player.effects, catalog, kind, events);
            }
            TimerSlot::SlideRevert => state.player.end_slide(),
        }
    }

    // Seat on the lane, then this tick's jump lift
    let player = &mut state.player;
    player.pos.y = lane_y(player.lane);
    player.step_jump();

    // Effective speed
    let boosted = player.effects.speed_boost;
    player.speed = if boosted {
        player.base_speed * tuning.speed_boost_multiplier
    } else {
        player.base_speed
    };

    // Pursuer
    let (player_speed, player_x) = (player.speed, player.pos.x);
    state.pursuer.advance(
        player_speed,
        player_x,
        tuning.pursuer_lane_switch_chance,
        &mut state.rng,
    );

    spawn_entities(state, tuning);

    // Scroll everything left and drop what has fully left the field
    let scroll = tuning.scroll_speed * if boosted { tuning.boost_scroll_factor } else { 1.0 };
    state.obstacles.retain_mut(|o| {
        o.pos.x -= scroll;
        o.pos.x > -o.rect().size.x
    });
    state.power_ups.retain_mut(|p| {
        p.pos.x -= scroll;
        p.pos.x > -p.rect().size.x
    });
    state.coins.retain_mut(|c| {
        c.pos.x -= scroll;
        c.pos.x > -c.rect().size.x
    });

    // Obstacles: any hit ends the run, the rest of the tick still plays out
    let hit = state
        .obstacles
        .iter()
        .filter(|o| obstacle_hit(&state.player, o))
        .count();
    if hit > 0 {
        log::info!("Hit an obstacle at score {}", state.display_score());
        state.end_run(GameOverCause::Collision);
    }

    // Power-ups, back to front so removal doesn't skip anything
    for i in (0..state.power_ups.len()).rev() {
        if collectible_hit(&state.player, &state.power_ups[i].rect()) {
            let picked = state.power_ups.remove(i);
            powerup::activate(
                &mut state.player.effects,
                &mut state.timers,
                catalog,
                picked.kind,
                now,
                events,
            );
        }
    }

    // Coins: each instance counts once
    for i in (0..state.coins.len()).rev() {
        let coin = &mut state.coins[i];
        if coin.collected || !collectible_hit(&state.player, &coin.rect()) {
            continue;
        }
        coin.collected = true;
        state.player.coins = state.player.coins.saturating_add(coin.value);
        events.push(GameEvent::CoinCollected {
            value: coin.value,
            total: state.player.coins,
        });
    }
    state.coins.retain(|c| !c.collected);

    // Score
    state.raw_score += if state.player.effects.score_multiplier { 2 } else { 1 };

    if state.pursuer.caught() {
        log::info!("Caught by the pursuer at score {}", state.display_score());
        state.end_run(GameOverCause::Caught);
    }

    if state.phase == GamePhase::GameOver {
        if let Some(cause) = state.game_over_cause {
            events.push(GameEvent::GameOver {
                cause,
                score: state.display_score(),
            });
        }
    }
}
