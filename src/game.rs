//! Top-level game session
//!
//! Owns the run state, the power-up catalog and the persisted profile, and
//! maps host commands (start, pause, intents, shop) onto them. Hosts call
//! `tick()` once per animation frame and hand `snapshot()` to a renderer.

use serde::Serialize;

use crate::characters::CharacterId;
use crate::consts::*;
use crate::ms_to_ticks;
use crate::persistence::{KeyValueStore, Profile};
use crate::sim::{
    self, Catalog, Coin, GameEvent, GamePhase, GameState, Obstacle, Player, PowerUp, PowerUpKind,
    Pursuer, TimerSlot, powerup,
};
use crate::tuning::{Tuning, TuningError};

/// Discrete player inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intent {
    /// Move one lane toward lane 0 (top of the screen)
    LaneUp,
    /// Move one lane toward lane 2
    LaneDown,
    Jump,
    Slide,
}

/// An active effect as the HUD shows it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectIndicator {
    pub kind: PowerUpKind,
    pub label: &'static str,
    pub color: &'static str,
    /// Time left on the effect
    pub remaining_ms: u64,
}

/// Read-only view of one frame for the renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub pursuer: &'a Pursuer,
    pub obstacles: &'a [Obstacle],
    pub power_ups: &'a [PowerUp],
    pub coins: &'a [Coin],
    /// Displayed score (`raw / 10`)
    pub score: u64,
    /// Coin balance
    pub coin_balance: u32,
    pub effects: Vec<EffectIndicator>,
}

/// Anything that turns snapshots into pixels
pub trait RenderSink {
    fn present(&mut self, snapshot: &Snapshot<'_>);
}

pub struct Game<S: KeyValueStore> {
    pub(crate) state: GameState,
    pub(crate) tuning: Tuning,
    pub(crate) catalog: Catalog,
    pub(crate) profile: Profile<S>,
    pub(crate) events: Vec<GameEvent>,
}

impl<S: KeyValueStore> Game<S> {
    /// Create an idle game, loading the profile from `store`
    ///
    /// Fails if `tuning` holds values the simulation can't draw from (a spawn
    /// chance outside `0..=1`, a non-positive speed).
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let profile = Profile::load(store);
        let mut state = GameState::new(seed, &tuning);
        state.player.coins = profile.coins();
        state.player.character = profile.selected();

        log::info!(
            "Game created (seed {}, {} coins, {})",
            seed,
            profile.coins(),
            profile.selected().as_str()
        );

        Ok(Self {
            state,
            tuning,
            catalog: Catalog::default(),
            profile,
            events: Vec::new(),
        })
    }

    /// Begin a fresh run from any phase
    pub fn start(&mut self) {
        // Clearing timers first means nothing from the old run can fire later
        let coins = self.profile.reload_coins();
        let character = self.profile.selected();
        self.state.reset(&self.tuning, coins, character);
        self.state.phase = GamePhase::Running;
        log::info!("Run started with {} coins", coins);
    }

    /// Running -> Paused. Returns true if the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        self.state.phase = GamePhase::Paused;
        log::info!("Paused");
        true
    }

    /// Paused -> Running. Returns true if the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.state.phase != GamePhase::Paused {
            return false;
        }
        self.state.phase = GamePhase::Running;
        log::info!("Resumed");
        true
    }

    /// Flip between Running and Paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }

        sim::tick(&mut self.state, &self.catalog, &self.tuning, &mut self.events);

        if self.state.player.coins != self.profile.coins() {
            self.profile.set_coins(self.state.player.coins);
        }
    }

    /// Apply a player input. Ignored unless running.
    pub fn intent(&mut self, intent: Intent) {
        if self.state.phase != GamePhase::Running {
            return;
        }

        let player = &mut self.state.player;
        match intent {
            Intent::LaneUp => player.lane = player.lane.saturating_sub(1),
            Intent::LaneDown => player.lane = (player.lane + 1).min(LANE_COUNT - 1),
            Intent::Jump => {
                player.begin_jump();
            }
            Intent::Slide => {
                if player.begin_slide() {
                    self.state.timers.schedule(
                        TimerSlot::SlideRevert,
                        self.state.time_ticks,
                        ms_to_ticks(SLIDE_DURATION_MS),
                    );
                }
            }
        }
    }

    /// Activate an effect directly, as if its pickup had been collected
    pub fn grant_power_up(&mut self, kind: PowerUpKind) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        powerup::activate(
            &mut self.state.player.effects,
            &mut self.state.timers,
            &self.catalog,
            kind,
            self.state.time_ticks,
            &mut self.events,
        );
    }

    /// Current frame for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        let now = self.state.time_ticks;
        let effects = self
            .state
            .player
            .effects
            .active_kinds()
            .map(|kind| {
                let ticks = self
                    .state
                    .timers
                    .remaining(TimerSlot::Effect(kind), now)
                    .unwrap_or(0);
                EffectIndicator {
                    kind,
                    label: self.catalog.get(kind).label,
                    color: kind.color(),
                    remaining_ms: ticks * 1000 / TICKS_PER_SECOND as u64,
                }
            })
            .collect();

        Snapshot {
            phase: self.state.phase,
            player: &self.state.player,
            pursuer: &self.state.pursuer,
            obstacles: &self.state.obstacles,
            power_ups: &self.state.power_ups,
            coins: &self.state.coins,
            score: self.state.display_score(),
            coin_balance: self.state.player.coins,
            effects,
        }
    }

    /// Hand the current frame to a renderer
    pub fn render(&self, sink: &mut impl RenderSink) {
        sink.present(&self.snapshot());
    }

    /// Take every notification since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        self.state.display_score()
    }

    pub fn coins(&self) -> u32 {
        self.state.player.coins
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn profile(&self) -> &Profile<S> {
        &self.profile
    }

    pub fn selected_character(&self) -> CharacterId {
        self.profile.selected()
    }
}
