//! Shot Resolution Configuration

use serde::{Deserialize, Serialize};

use super::{check_percent, Clamp};
use crate::error::Result;

/// Block → off target → goal → save chain. All values are percentages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShotConfig {
    // === Block before release ===
    pub block_base: f32,
    pub block_clamp: Clamp,
    pub block_corner_chance: f32,
    /// Recognized defenders below this count weaken blocking
    pub min_recognized_defenders: usize,
    /// Penalty per missing recognized defender
    pub structural_penalty: f32,

    // === Off target ===
    pub off_target_base: f32,
    /// Added when the shot comes from outside the attacking third
    pub off_target_distance_penalty: f32,
    pub off_target_clamp: Clamp,

    // === On target ===
    pub goal_base: f32,
    pub goal_clamp: Clamp,
    pub save_base: f32,
    pub save_clamp: Clamp,
    /// Share of saves that go behind for a corner
    pub save_corner_chance: f32,
    /// Corner chance after a late block by a covering defender
    pub late_block_corner_chance: f32,

    // === Assists ===
    /// Chance an open-play goal carries an assist
    pub assist_chance: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            block_base: 25.0,
            block_clamp: Clamp::new(5.0, 45.0),
            block_corner_chance: 50.0,
            min_recognized_defenders: 3,
            structural_penalty: 5.0,

            off_target_base: 40.0,
            off_target_distance_penalty: 15.0,
            off_target_clamp: Clamp::new(15.0, 60.0),

            goal_base: 25.0,
            goal_clamp: Clamp::new(10.0, 45.0),
            save_base: 50.0,
            save_clamp: Clamp::new(30.0, 75.0),
            save_corner_chance: 35.0,
            late_block_corner_chance: 50.0,

            assist_chance: 70.0,
        }
    }
}

impl ShotConfig {
    pub(super) fn validate(&self) -> Result<()> {
        self.block_clamp.check("shot.block_clamp")?;
        self.off_target_clamp.check("shot.off_target_clamp")?;
        self.goal_clamp.check("shot.goal_clamp")?;
        self.save_clamp.check("shot.save_clamp")?;
        check_percent("shot.block_corner_chance", self.block_corner_chance)?;
        check_percent("shot.save_corner_chance", self.save_corner_chance)?;
        check_percent("shot.late_block_corner_chance", self.late_block_corner_chance)?;
        check_percent("shot.assist_chance", self.assist_chance)?;
        Ok(())
    }
}
