//! Lane Runner - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, power-ups, pursuit)
//! - `game`: Top-level state machine and input intents
//! - `persistence`: Key-value store contract and the persisted player profile
//! - `characters`: Unlockable character catalog
//! - `shop`: Purchase commands and the shop view projection
//! - `tuning`: Data-driven game balance

pub mod characters;
pub mod game;
pub mod persistence;
pub mod shop;
pub mod sim;
pub mod tuning;

pub use characters::{Character, CharacterId, Palette};
pub use game::{Game, Intent, RenderSink, Snapshot};
pub use persistence::{KeyValueStore, MemoryStore, Profile, StorageError};
pub use shop::ShopView;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate: one tick per animation frame
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    pub const LANE_COUNT: usize = 3;

    /// Player defaults - x never changes, only the lane and vertical offset do
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SLIDE_HEIGHT: f32 = 30.0;
    pub const PLAYER_START_LANE: usize = 1;

    /// Hurtbox tweaks for obstacle tests
    pub const HURTBOX_PADDING: f32 = 5.0;
    pub const HURTBOX_SLIDE_HEIGHT: f32 = 10.0;

    /// Jump physics (pixels/tick, pixels/tick²)
    pub const JUMP_VELOCITY: f32 = 15.0;
    pub const GRAVITY: f32 = 0.5;
    /// Slide self-reverts after this long
    pub const SLIDE_DURATION_MS: u32 = 1000;

    /// Pursuer is drawn this far behind the player at distance zero
    pub const PURSUER_SCREEN_GAP: f32 = 200.0;
    pub const PURSUER_WIDTH: f32 = 50.0;
    pub const PURSUER_HEIGHT: f32 = 70.0;

    /// Entity sizes
    pub const OBSTACLE_WIDTH: f32 = 30.0;
    pub const OBSTACLE_JUMP_HEIGHT: f32 = 40.0;
    pub const OBSTACLE_SLIDE_HEIGHT: f32 = 20.0;
    pub const POWERUP_SIZE: f32 = 40.0;
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_VALUE: u32 = 1;

    /// Raw score points per displayed point
    pub const SCORE_DIVISOR: u64 = 10;
}

/// Resting y of each lane (top edge of anything standing in it)
#[inline]
pub fn lane_y(lane: usize) -> f32 {
    use consts::*;
    let lane = lane.min(LANE_COUNT - 1);
    FIELD_HEIGHT / 4.0 * (lane as f32 + 1.0)
}

/// Convert a millisecond duration to simulation ticks, rounding up
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    let ticks_per_second = consts::TICKS_PER_SECOND as u64;
    (ms as u64 * ticks_per_second).div_ceil(1000)
}
