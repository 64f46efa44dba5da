//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no wall-clock reads
//! - Seeded RNG only
//! - Timers run on the tick counter, so pausing freezes them
//! - No rendering, DOM or storage dependencies

pub mod collision;
pub mod events;
pub mod powerup;
pub mod pursuit;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{Rect, collectible_hit, hurtbox, obstacle_hit};
pub use events::{GameEvent, GameOverCause};
pub use powerup::{ActiveEffects, Catalog, PowerUpKind, PowerUpSpec};
pub use pursuit::Pursuer;
pub use state::{Coin, GamePhase, GameState, Obstacle, ObstacleKind, Player, PowerUp, Stance};
pub use tick::tick;
pub use timers::{TickTimers, TimerSlot};
