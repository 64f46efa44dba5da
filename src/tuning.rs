//! Data-driven game balance
//!
//! Everything a designer might want to tweak without touching the simulation.
//! Loaded from JSON; any missing field falls back to the shipped default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a probability between 0 and 1, got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player speed with no boost (pixels/tick)
    pub base_speed: f32,
    /// Multiplier applied to `base_speed` while SpeedBoost is active
    pub speed_boost_multiplier: f32,
    /// Extra scroll factor applied to entities while SpeedBoost is active
    pub boost_scroll_factor: f32,
    /// Leftward entity speed (pixels/tick)
    pub scroll_speed: f32,
    /// Pursuer speed (pixels/tick)
    pub pursuer_speed: f32,
    /// Gap between pursuer and player at the start of a run
    pub pursuer_start_distance: f32,
    /// Per-tick chance the pursuer jumps to a random lane
    pub pursuer_lane_switch_chance: f64,
    /// Per-tick spawn chances
    pub obstacle_chance: f64,
    pub powerup_chance: f64,
    pub coin_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 5.0,
            speed_boost_multiplier: 3.0,
            boost_scroll_factor: 1.5,
            scroll_speed: 7.0,
            pursuer_speed: 4.0,
            pursuer_start_distance: 0.0,
            pursuer_lane_switch_chance: 0.01,
            obstacle_chance: 0.02,
            powerup_chance: 0.01,
            coin_chance: 0.05,
        }
    }
}

impl Tuning {
    /// Tuning with every random spawn disabled (handy for scripted runs)
    pub fn without_spawns() -> Self {
        Self {
            obstacle_chance: 0.0,
            powerup_chance: 0.0,
            coin_chance: 0.0,
            pursuer_lane_switch_chance: 0.0,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a template file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot use
    pub fn validate(&self) -> Result<(), TuningError> {
        let chances = [
            ("pursuer_lane_switch_chance", self.pursuer_lane_switch_chance),
            ("obstacle_chance", self.obstacle_chance),
            ("powerup_chance", self.powerup_chance),
            ("coin_chance", self.coin_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Probability { field, value });
            }
        }

        let positives = [
            ("base_speed", self.base_speed),
            ("speed_boost_multiplier", self.speed_boost_multiplier),
            ("boost_scroll_factor", self.boost_scroll_factor),
            ("scroll_speed", self.scroll_speed),
        ];
        for (field, value) in positives {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert!(Tuning::without_spawns().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "speed_boost_multiplier": 1.5 }"#).unwrap();
        assert_eq!(tuning.speed_boost_multiplier, 1.5);
        assert_eq!(tuning.base_speed, 5.0);
        assert_eq!(tuning.coin_chance, 0.05);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "coin_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Probability {
                field: "coin_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
