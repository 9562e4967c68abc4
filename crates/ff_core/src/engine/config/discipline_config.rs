//! Foul & Card Configuration

use serde::{Deserialize, Serialize};

use super::{check_percent, Clamp};
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisciplineConfig {
    // === Foul zone (single 1..=100 roll) ===
    /// Rolls up to this value are penalty-area fouls (기본: 1)
    pub penalty_area_roll: u8,
    /// Rolls up to this value (above penalty_area_roll) are dangerous (기본: 26)
    pub dangerous_roll: u8,

    // === Red card ===
    /// Straight red base, percent (기본: 0.15)
    pub red_base: f32,
    /// Aggression at or above this raises the red chance
    pub red_aggression_threshold: u8,
    /// Extra percent per aggression point at or above the threshold
    pub red_aggression_step: f32,

    // === Yellow card ===
    pub yellow_base: f32,
    /// Percent per aggression point away from neutral 10
    pub yellow_aggression_scale: f32,
    pub yellow_per_aggressive_flag: f32,
    pub yellow_stay_on_feet: f32,
    pub yellow_bravery_threshold: u8,
    pub yellow_bravery_reduction: f32,
    pub yellow_clamp: Clamp,

    // === Set-piece chaining ===
    /// Dangerous-zone fouls that become a direct free-kick shot
    pub direct_free_kick_chance: f32,
}

impl Default for DisciplineConfig {
    fn default() -> Self {
        Self {
            penalty_area_roll: 1,
            dangerous_roll: 26,

            red_base: 0.15,
            red_aggression_threshold: 15,
            red_aggression_step: 0.1,

            yellow_base: 13.0,
            yellow_aggression_scale: 0.5,
            yellow_per_aggressive_flag: 2.0,
            yellow_stay_on_feet: 3.0,
            yellow_bravery_threshold: 15,
            yellow_bravery_reduction: 2.0,
            yellow_clamp: Clamp::new(3.0, 30.0),

            direct_free_kick_chance: 20.0,
        }
    }
}

impl DisciplineConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.penalty_area_roll > self.dangerous_roll || self.dangerous_roll > 100 {
            return Err(MatchError::InvalidConfig(format!(
                "discipline: foul zone rolls {} / {} out of order",
                self.penalty_area_roll, self.dangerous_roll
            )));
        }
        check_percent("discipline.red_base", self.red_base)?;
        check_percent("discipline.yellow_base", self.yellow_base)?;
        check_percent("discipline.direct_free_kick_chance", self.direct_free_kick_chance)?;
        self.yellow_clamp.check("discipline.yellow_clamp")
    }
}
