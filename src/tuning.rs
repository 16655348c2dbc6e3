//! Data-driven game balance and rule policies
//!
//! Loaded from JSON; every field falls back to the classic arcade values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ARENA_WIDTH, MAX_SUBSTEP_ITERATIONS, PADDLE_WIDTH};
use crate::sim::{Difficulty, Wall};

/// Error type for tuning loads.
#[derive(Debug, Error)]
pub enum TuningError {
    /// I/O error while reading the file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The JSON did not match the tuning schema.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside the range the simulation can handle.
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay balance values and policy switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ball target speeds, lowest tier first (units/s)
    pub ball_speed_tiers: [f32; 4],
    /// Rate at which the ball eases toward its target speed (units/s²)
    pub ball_acceleration: f32,
    /// Gain of the damped seek used by paddle control and reset animations
    pub seek_gain: f32,
    /// Gain of the brick fade-in during a game reset
    pub fade_gain: f32,
    /// Points per brick type, before difficulty scaling
    pub brick_points: [u32; 4],
    /// Hit counts that promote the ball to tier 2 and tier 3
    pub promotion_hits: [u32; 2],
    /// Balls per game
    pub starting_balls: u32,
    /// Hard cap on collision sub-steps per frame
    pub max_substep_iterations: u32,
    /// Wall whose contact ends the current life
    pub losing_wall: Wall,
    /// Wall whose contact halves the paddle, once per life
    pub shrink_wall: Wall,
    /// Paddle width is divided by the difficulty factor
    pub scale_paddle_with_difficulty: bool,
    /// Clearing a brick wall grants an extra ball
    pub bonus_life_on_clear: bool,
    /// Cleared brick walls needed to win
    pub walls_to_win: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_speed_tiers: [50.0, 75.0, 100.0, 125.0],
            ball_acceleration: 100.0,
            seek_gain: 20.0,
            fade_gain: 5.0,
            brick_points: [1, 3, 5, 7],
            promotion_hits: [4, 12],
            starting_balls: 3,
            max_substep_iterations: MAX_SUBSTEP_ITERATIONS,
            losing_wall: Wall::Bottom,
            shrink_wall: Wall::Top,
            scale_paddle_with_difficulty: true,
            bonus_life_on_clear: false,
            walls_to_win: 2,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the solver's assumptions
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid(format!("{name} must be positive and finite, got {v}")))
            }
        };

        for (i, speed) in self.ball_speed_tiers.iter().enumerate() {
            positive(&format!("ball_speed_tiers[{i}]"), *speed)?;
        }
        if self.ball_speed_tiers.windows(2).any(|w| w[0] > w[1]) {
            return Err(TuningError::Invalid(
                "ball_speed_tiers must be non-decreasing".into(),
            ));
        }
        positive("ball_acceleration", self.ball_acceleration)?;
        positive("seek_gain", self.seek_gain)?;
        positive("fade_gain", self.fade_gain)?;
        if self.max_substep_iterations == 0 {
            return Err(TuningError::Invalid(
                "max_substep_iterations must be at least 1".into(),
            ));
        }
        if self.starting_balls == 0 {
            return Err(TuningError::Invalid("starting_balls must be at least 1".into()));
        }
        if self.walls_to_win == 0 {
            return Err(TuningError::Invalid("walls_to_win must be at least 1".into()));
        }
        if self.losing_wall.is_side() {
            return Err(TuningError::Invalid(format!(
                "losing_wall must be Top or Bottom, got {:?}",
                self.losing_wall
            )));
        }
        Ok(())
    }

    /// Ball speed for a 1-based tier
    pub fn tier_speed(&self, tier: usize) -> f32 {
        self.ball_speed_tiers[tier.clamp(1, 4) - 1]
    }

    /// Full (unshrunk) paddle width at a difficulty
    pub fn paddle_width(&self, difficulty: Difficulty) -> f32 {
        if self.scale_paddle_with_difficulty {
            (PADDLE_WIDTH / difficulty.factor()).min(ARENA_WIDTH)
        } else {
            PADDLE_WIDTH
        }
    }

    /// Points awarded for a brick type at a difficulty, rounded
    pub fn brick_score(&self, kind_index: usize, difficulty: Difficulty) -> u32 {
        let base = self.brick_points[kind_index.min(3)] as f32;
        (base * difficulty.factor()).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "bonus_life_on_clear": true, "losing_wall": "Top" }"#)
            .unwrap();
        assert!(tuning.bonus_life_on_clear);
        assert_eq!(tuning.losing_wall, Wall::Top);
        assert_eq!(tuning.ball_speed_tiers, Tuning::default().ball_speed_tiers);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning {
            walls_to_win: 1,
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "seek_gain": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "max_substep_iterations": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "losing_wall": "Left" }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }

    #[test]
    fn test_difficulty_scaling() {
        let tuning = Tuning::default();
        assert_eq!(tuning.paddle_width(Difficulty::Normal), PADDLE_WIDTH);
        assert_eq!(tuning.paddle_width(Difficulty::Hard), PADDLE_WIDTH / 2.0);
        assert_eq!(tuning.brick_score(0, Difficulty::Normal), 1);
        assert_eq!(tuning.brick_score(3, Difficulty::Hard), 14);
        // 3 * 0.5 = 1.5 rounds away from zero
        assert_eq!(tuning.brick_score(1, Difficulty::Easy), 2);

        let fixed = Tuning {
            scale_paddle_with_difficulty: false,
            ..Default::default()
        };
        assert_eq!(fixed.paddle_width(Difficulty::Easy), PADDLE_WIDTH);
    }
}
