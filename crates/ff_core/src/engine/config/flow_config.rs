//! Possession & Micro-Action Selector Configuration

use serde::{Deserialize, Serialize};

use super::check_percent;
use crate::error::{MatchError, Result};

/// Possession keep-rate and selector range widths.
///
/// Five-entry tables are indexed by tactic level + 2 (very low .. very high).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlowConfig {
    // === Possession ===
    /// 점유 유지 기본 확률 (기본: 80)
    pub keep_rate_base: f32,
    /// 홈 팀 보너스 (기본: +3)
    pub home_keep_bonus: f32,
    /// Tempo very_slow..very_fast (기본: +10, +5, 0, -5, -10)
    pub tempo_keep: [f32; 5],
    /// Passing very_short..very_direct (기본: +8, +3, 0, -3, -8)
    pub directness_keep: [f32; 5],
    /// Mentality very_defensive..very_attacking (기본: +8, +3, 0, -3, -8)
    pub mentality_keep: [f32; 5],
    /// Opponent pressing never..always (기본: +5, +3, 0, -3, -5)
    pub opponent_pressing_keep: [f32; 5],

    // === Selector ===
    pub min_actions: u8,
    pub max_actions: u8,
    /// Background passes credited per minute to the side in possession
    pub background_passes_holder: u32,
    /// Background passes credited per minute to the other side
    pub background_passes_other: u32,
    /// Home attacking third starts here; away mirrors it (100 - x)
    pub attacking_third_x: f32,
    pub shot_range_base: f32,
    pub shot_range_per_mentality: f32,
    pub foul_range_base: f32,
    pub foul_range_per_aggressive_flag: f32,
    pub foul_range_stay_on_feet: f32,
    pub turnover_range_base: f32,
    pub turnover_range_per_pressing: f32,
    pub offside_range: f32,
    /// Share of non-terminal actions resolved as passes (rest are carries)
    pub pass_share: f32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            keep_rate_base: 80.0,
            home_keep_bonus: 3.0,
            tempo_keep: [10.0, 5.0, 0.0, -5.0, -10.0],
            directness_keep: [8.0, 3.0, 0.0, -3.0, -8.0],
            mentality_keep: [8.0, 3.0, 0.0, -3.0, -8.0],
            opponent_pressing_keep: [5.0, 3.0, 0.0, -3.0, -5.0],

            min_actions: 3,
            max_actions: 8,
            background_passes_holder: 4,
            background_passes_other: 2,
            attacking_third_x: 66.7,
            shot_range_base: 12.0,
            shot_range_per_mentality: 3.0,
            foul_range_base: 4.0,
            foul_range_per_aggressive_flag: 2.0,
            foul_range_stay_on_feet: 2.0,
            turnover_range_base: 10.0,
            turnover_range_per_pressing: 3.0,
            offside_range: 6.0,
            pass_share: 75.0,
        }
    }
}

impl FlowConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.min_actions == 0 || self.min_actions > self.max_actions {
            return Err(MatchError::InvalidConfig(format!(
                "flow: action count range {}..={} is empty",
                self.min_actions, self.max_actions
            )));
        }
        check_percent("flow.keep_rate_base", self.keep_rate_base)?;
        check_percent("flow.pass_share", self.pass_share)?;
        check_percent("flow.offside_range", self.offside_range)?;
        check_percent("flow.attacking_third_x", self.attacking_third_x)?;
        Ok(())
    }
}
