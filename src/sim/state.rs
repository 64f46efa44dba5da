//! Game state and core simulation types
//!
//! Positions are top-left corners in playfield pixels; y grows downward.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::events::GameOverCause;
use super::powerup::{ActiveEffects, PowerUpKind};
use super::pursuit::Pursuer;
use super::timers::TickTimers;
use crate::characters::CharacterId;
use crate::consts::*;
use crate::lane_y;
use crate::tuning::Tuning;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused (ticks are ignored, timers frozen)
    Paused,
    /// Run ended
    GameOver,
}

/// Player posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Running,
    Jumping,
    Sliding,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x is fixed, y is re-seated on the lane every tick
    pub pos: Vec2,
    pub lane: usize,
    pub width: f32,
    /// Shrinks while sliding
    pub height: f32,
    /// Lift applied this tick (negative = up)
    pub jump_velocity: f32,
    pub base_speed: f32,
    /// Effective speed this tick
    pub speed: f32,
    pub stance: Stance,
    pub effects: ActiveEffects,
    pub coins: u32,
    pub character: CharacterId,
}

impl Player {
    pub fn new(base_speed: f32, coins: u32, character: CharacterId) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, lane_y(PLAYER_START_LANE)),
            lane: PLAYER_START_LANE,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            jump_velocity: 0.0,
            base_speed,
            speed: base_speed,
            stance: Stance::Running,
            effects: ActiveEffects::default(),
            coins,
            character,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// Start a jump if standing. Returns true if the jump began.
    pub fn begin_jump(&mut self) -> bool {
        if self.stance != Stance::Running {
            return false;
        }
        self.stance = Stance::Jumping;
        self.jump_velocity = -JUMP_VELOCITY;
        true
    }

    /// Start a slide if standing. Returns true if the slide began.
    pub fn begin_slide(&mut self) -> bool {
        if self.stance != Stance::Running {
            return false;
        }
        self.stance = Stance::Sliding;
        self.height = PLAYER_SLIDE_HEIGHT;
        true
    }

    /// Stand back up after a slide
    pub fn end_slide(&mut self) {
        if self.stance == Stance::Sliding {
            self.stance = Stance::Running;
            self.height = PLAYER_HEIGHT;
        }
    }

    /// Apply one tick of jump lift on top of the lane's resting y
    ///
    /// Expects `pos.y` to already sit on the lane. Height doesn't build up
    /// across ticks: the lift is just this tick's velocity, and the jump ends
    /// once gravity has turned it downward.
    pub fn step_jump(&mut self) {
        if self.stance != Stance::Jumping {
            return;
        }
        let ground = lane_y(self.lane);
        self.jump_velocity += GRAVITY;
        self.pos.y += self.jump_velocity;
        if self.pos.y >= ground {
            self.pos.y = ground;
            self.jump_velocity = 0.0;
            self.stance = Stance::Running;
        }
    }
}

/// Obstacle types - the stance that gets you past them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Tall barrier, jump over it
    RequiresJump,
    /// Low bar, slide under it
    RequiresSlide,
}

impl ObstacleKind {
    pub fn height(self) -> f32 {
        match self {
            ObstacleKind::RequiresJump => OBSTACLE_JUMP_HEIGHT,
            ObstacleKind::RequiresSlide => OBSTACLE_SLIDE_HEIGHT,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ObstacleKind::RequiresJump => "#FF0000",
            ObstacleKind::RequiresSlide => "#00FF00",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: usize,
    pub pos: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, lane: usize) -> Self {
        Self {
            id,
            kind,
            lane,
            pos: Vec2::new(FIELD_WIDTH, lane_y(lane)),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(OBSTACLE_WIDTH, self.kind.height()))
    }
}

/// A power-up pickup scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub lane: usize,
    pub pos: Vec2,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, lane: usize) -> Self {
        Self {
            id,
            kind,
            lane,
            pos: Vec2::new(FIELD_WIDTH, lane_y(lane)),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(POWERUP_SIZE))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub lane: usize,
    pub pos: Vec2,
    pub value: u32,
    pub collected: bool,
}

impl Coin {
    pub fn new(id: u32, lane: usize) -> Self {
        Self {
            id,
            lane,
            pos: Vec2::new(FIELD_WIDTH, lane_y(lane)),
            value: COIN_VALUE,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(COIN_SIZE))
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Why the run ended (set together with `GamePhase::GameOver`)
    pub game_over_cause: Option<GameOverCause>,
    /// Simulation tick counter (only advances while running)
    pub time_ticks: u64,
    /// Raw score; the displayed score is `raw_score / SCORE_DIVISOR`
    pub raw_score: u64,
    pub player: Player,
    pub pursuer: Pursuer,
    /// Active entities (in spawn order)
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub coins: Vec<Coin>,
    /// Pending effect expiries and slide revert
    pub timers: TickTimers,
    /// Uniform source for every random draw
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle state seeded for reproducibility
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), tuning)
    }

    /// Create an idle state drawing from an existing generator
    pub fn with_rng(rng: Pcg32, tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Idle,
            game_over_cause: None,
            time_ticks: 0,
            raw_score: 0,
            player: Player::new(tuning.base_speed, 0, CharacterId::Default),
            pursuer: Pursuer::new(tuning),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            coins: Vec::new(),
            timers: TickTimers::new(),
            rng,
            next_id: 1,
        }
    }

    /// Wipe the run for a fresh start. Keeps the RNG stream going.
    pub fn reset(&mut self, tuning: &Tuning, coins: u32, character: CharacterId) {
        self.timers.clear();
        self.phase = GamePhase::Idle;
        self.game_over_cause = None;
        self.time_ticks = 0;
        self.raw_score = 0;
        self.player = Player::new(tuning.base_speed, coins, character);
        self.pursuer = Pursuer::new(tuning);
        self.obstacles.clear();
        self.power_ups.clear();
        self.coins.clear();
        self.next_id = 1;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Score as shown on the HUD
    pub fn display_score(&self) -> u64 {
        self.raw_score / SCORE_DIVISOR
    }

    /// End the run; the first cause sticks
    pub fn end_run(&mut self, cause: GameOverCause) {
        if self.game_over_cause.is_none() {
            self.game_over_cause = Some(cause);
        }
        self.phase = GamePhase::GameOver;
    }
}
