//! Collision predicates
//!
//! Obstacles use an axis-aligned box against a stance-adjusted hurtbox.
//! Pickups use a circular proximity test on entity centres.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, ObstacleKind, Player, Stance};
use crate::consts::*;

/// Axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap; touching edges don't count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// The box obstacles are tested against
///
/// Sliding: flat box at the player's full width with no padding.
/// Otherwise: full height, padded on both sides.
pub fn hurtbox(player: &Player) -> Rect {
    if player.stance == Stance::Sliding {
        Rect::new(player.pos, Vec2::new(player.width, HURTBOX_SLIDE_HEIGHT))
    } else {
        Rect::new(
            Vec2::new(player.pos.x - HURTBOX_PADDING, player.pos.y),
            Vec2::new(player.width + HURTBOX_PADDING * 2.0, player.height),
        )
    }
}

/// Does `obstacle` hurt `player` this tick?
pub fn obstacle_hit(player: &Player, obstacle: &Obstacle) -> bool {
    if player.effects.shield {
        return false;
    }

    let dodged = match obstacle.kind {
        ObstacleKind::RequiresJump => player.stance == Stance::Jumping,
        ObstacleKind::RequiresSlide => player.stance == Stance::Sliding,
    };
    if dodged {
        return false;
    }

    hurtbox(player).overlaps(&obstacle.rect())
}

/// Circle test between player and a pickup: centre distance under the sum of
/// half-widths
pub fn collectible_hit(player: &Player, item: &Rect) -> bool {
    let player_rect = player.rect();
    let reach = player_rect.size.x / 2.0 + item.size.x / 2.0;
    player_rect.center().distance(item.center()) < reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::CharacterId;
    use crate::lane_y;
    use crate::sim::state::{Coin, PowerUp};
    use crate::sim::PowerUpKind;
    use proptest::prelude::*;

    fn player_in_lane(lane: usize) -> Player {
        let mut player = Player::new(5.0, 0, CharacterId::Default);
        player.lane = lane;
        player.pos.y = lane_y(lane);
        player
    }

    fn obstacle_at(kind: ObstacleKind, lane: usize, x: f32) -> Obstacle {
        let mut obstacle = Obstacle::new(1, kind, lane);
        obstacle.pos.x = x;
        obstacle
    }

    #[test]
    fn test_rect_overlap_excludes_touching() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let c = Rect::new(Vec2::new(9.0, 9.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_hurtbox_shapes() {
        let mut player = player_in_lane(1);
        let standing = hurtbox(&player);
        assert_eq!(standing.pos.x, PLAYER_X - HURTBOX_PADDING);
        assert_eq!(standing.size, Vec2::new(PLAYER_WIDTH + 10.0, PLAYER_HEIGHT));

        player.begin_slide();
        let sliding = hurtbox(&player);
        assert_eq!(sliding.pos.x, PLAYER_X);
        assert_eq!(sliding.size, Vec2::new(PLAYER_WIDTH, HURTBOX_SLIDE_HEIGHT));
    }

    #[test]
    fn test_jump_obstacle_needs_jump() {
        let obstacle = obstacle_at(ObstacleKind::RequiresJump, 1, PLAYER_X);
        let mut player = player_in_lane(1);
        assert!(obstacle_hit(&player, &obstacle));

        player.begin_jump();
        assert!(!obstacle_hit(&player, &obstacle));
    }

    #[test]
    fn test_slide_obstacle_needs_slide() {
        let obstacle = obstacle_at(ObstacleKind::RequiresSlide, 1, PLAYER_X);
        let mut player = player_in_lane(1);
        assert!(obstacle_hit(&player, &obstacle));

        player.begin_slide();
        assert!(!obstacle_hit(&player, &obstacle));
    }

    #[test]
    fn test_sliding_into_jump_obstacle_still_hurts() {
        let obstacle = obstacle_at(ObstacleKind::RequiresJump, 1, PLAYER_X);
        let mut player = player_in_lane(1);
        player.begin_slide();
        assert!(obstacle_hit(&player, &obstacle));
    }

    #[test]
    fn test_padding_catches_near_miss() {
        // Obstacle ends 3px before the player's sprite, inside the 5px padding
        let obstacle = obstacle_at(ObstacleKind::RequiresJump, 1, PLAYER_X - OBSTACLE_WIDTH - 3.0);
        let mut player = player_in_lane(1);
        assert!(obstacle_hit(&player, &obstacle));

        // Sliding drops the padding
        player.begin_slide();
        assert!(!hurtbox(&player).overlaps(&obstacle.rect()));
    }

    #[test]
    fn test_other_lane_misses() {
        let obstacle = obstacle_at(ObstacleKind::RequiresJump, 0, PLAYER_X);
        let player = player_in_lane(2);
        assert!(!obstacle_hit(&player, &obstacle));
    }

    #[test]
    fn test_collectible_circle_test() {
        let player = player_in_lane(1);

        let mut coin = Coin::new(1, 1);
        coin.pos.x = PLAYER_X + 10.0;
        assert!(collectible_hit(&player, &coin.rect()));

        // Far to the right
        coin.pos.x = PLAYER_X + 100.0;
        assert!(!collectible_hit(&player, &coin.rect()));

        // Adjacent lane: 150px apart vertically
        let mut power_up = PowerUp::new(2, PowerUpKind::Shield, 0);
        power_up.pos.x = PLAYER_X;
        assert!(!collectible_hit(&player, &power_up.rect()));
    }

    fn stance_strategy() -> impl Strategy<Value = Stance> {
        prop_oneof![
            Just(Stance::Running),
            Just(Stance::Jumping),
            Just(Stance::Sliding),
        ]
    }

    fn kind_strategy() -> impl Strategy<Value = ObstacleKind> {
        prop_oneof![
            Just(ObstacleKind::RequiresJump),
            Just(ObstacleKind::RequiresSlide),
        ]
    }

    proptest! {
        #[test]
        fn prop_shield_dominates(
            stance in stance_strategy(),
            kind in kind_strategy(),
            lane in 0usize..3,
            x in -40.0f32..800.0,
            offset in -120.0f32..0.0,
        ) {
            let mut player = player_in_lane(1);
            player.stance = stance;
            player.pos.y += offset;
            player.effects.shield = true;
            let obstacle = obstacle_at(kind, lane, x);
            prop_assert!(!obstacle_hit(&player, &obstacle));
        }

        #[test]
        fn prop_correct_stance_always_dodges(x in -40.0f32..800.0) {
            let mut player = player_in_lane(1);
            player.stance = Stance::Jumping;
            prop_assert!(!obstacle_hit(&player, &obstacle_at(ObstacleKind::RequiresJump, 1, x)));
            player.stance = Stance::Sliding;
            prop_assert!(!obstacle_hit(&player, &obstacle_at(ObstacleKind::RequiresSlide, 1, x)));
        }
    }
}
