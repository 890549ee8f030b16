//! Scoring weights.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance used when checking that weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum WeightsError {
    #[error("Weight {name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("Weights must sum to 1.0, got {0}")]
    BadSum(f64),
}

/// Relative importance of each scoring component.
///
/// Passed explicitly into the generator; by convention the five weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub level_balance: f64,
    pub gender_balance: f64,
    pub game_count_fairness: f64,
    pub opponent_diversity: f64,
    pub partner_diversity: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            level_balance: 0.30,
            gender_balance: 0.25,
            game_count_fairness: 0.25,
            opponent_diversity: 0.10,
            partner_diversity: 0.10,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.level_balance
            + self.gender_balance
            + self.game_count_fairness
            + self.opponent_diversity
            + self.partner_diversity
    }

    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("level_balance", self.level_balance),
            ("gender_balance", self.gender_balance),
            ("game_count_fairness", self.game_count_fairness),
            ("opponent_diversity", self.opponent_diversity),
            ("partner_diversity", self.partner_diversity),
        ]
    }

    /// Check the non-negative and sum-to-one conventions.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, value) in self.named() {
            if value.is_nan() || value < 0.0 {
                return Err(WeightsError::Negative { name, value });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightsError::BadSum(sum));
        }

        Ok(())
    }
}
