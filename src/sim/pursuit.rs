//! The chasing pursuer
//!
//! The gap to the player grows by the speed difference every tick. When it
//! reaches zero the player is caught, regardless of obstacles.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lane_y;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub lane: usize,
    /// Gap behind the player; `<= 0` means caught
    pub distance: f32,
    pub speed: f32,
    /// Top-left corner, derived from the player's x and `distance`
    pub pos: Vec2,
}

impl Pursuer {
    pub fn new(tuning: &Tuning) -> Self {
        let distance = tuning.pursuer_start_distance;
        Self {
            lane: PLAYER_START_LANE,
            distance,
            speed: tuning.pursuer_speed,
            pos: Vec2::new(PLAYER_X - PURSUER_SCREEN_GAP - distance, lane_y(PLAYER_START_LANE)),
        }
    }

    /// One tick of chase: close or open the gap, reposition, maybe switch lane
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        player_speed: f32,
        player_x: f32,
        lane_switch_chance: f64,
        rng: &mut R,
    ) {
        self.distance += player_speed - self.speed;
        self.pos = Vec2::new(
            player_x - PURSUER_SCREEN_GAP - self.distance,
            lane_y(self.lane),
        );

        if rng.random_bool(lane_switch_chance) {
            self.lane = rng.random_range(0..LANE_COUNT);
            log::debug!("Pursuer moved to lane {}", self.lane);
        }
    }

    pub fn caught(&self) -> bool {
        self.distance <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_gap_grows_when_player_is_faster() {
        let mut pursuer = Pursuer::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(pursuer.caught(), "starts level with the player");

        pursuer.advance(5.0, PLAYER_X, 0.0, &mut rng);
        assert_eq!(pursuer.distance, 1.0);
        assert!(!pursuer.caught());
        assert_eq!(pursuer.pos.x, PLAYER_X - PURSUER_SCREEN_GAP - 1.0);
    }

    #[test]
    fn test_slower_player_gets_caught() {
        let tuning = Tuning {
            pursuer_start_distance: 3.0,
            ..Tuning::default()
        };
        let mut pursuer = Pursuer::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(1);

        pursuer.advance(3.0, PLAYER_X, 0.0, &mut rng);
        pursuer.advance(3.0, PLAYER_X, 0.0, &mut rng);
        assert!(!pursuer.caught());
        pursuer.advance(3.0, PLAYER_X, 0.0, &mut rng);
        assert!(pursuer.caught());
    }

    #[test]
    fn test_lane_switch_stays_in_bounds() {
        let mut pursuer = Pursuer::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; LANE_COUNT];
        for _ in 0..200 {
            pursuer.advance(5.0, PLAYER_X, 1.0, &mut rng);
            assert!(pursuer.lane < LANE_COUNT);
            seen[pursuer.lane] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_no_switch_at_zero_chance() {
        let mut pursuer = Pursuer::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            pursuer.advance(5.0, PLAYER_X, 0.0, &mut rng);
        }
        assert_eq!(pursuer.lane, PLAYER_START_LANE);
    }

    proptest! {
        #[test]
        fn prop_distance_shrinks_iff_slower(
            player_speed in 0u8..20,
            pursuer_speed in 0u8..20,
            start in 0u16..500,
            seed in any::<u64>(),
        ) {
            // Whole-pixel speeds keep the comparison free of rounding noise
            let (player_speed, pursuer_speed) = (player_speed as f32, pursuer_speed as f32);
            let start = start as f32;
            let tuning = Tuning {
                pursuer_speed,
                pursuer_start_distance: start,
                ..Tuning::default()
            };
            let mut pursuer = Pursuer::new(&tuning);
            let mut rng = Pcg32::seed_from_u64(seed);
            let before = pursuer.distance;
            pursuer.advance(player_speed, PLAYER_X, 0.01, &mut rng);

            prop_assert_eq!(pursuer.distance < before, player_speed < pursuer_speed);
            prop_assert_eq!(pursuer.distance > before, player_speed > pursuer_speed);
        }
    }
}
