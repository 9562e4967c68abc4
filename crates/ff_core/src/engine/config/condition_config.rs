//! Fatigue & Morale Configuration

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Event-driven morale deltas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MoraleDeltas {
    pub goal: f32,
    pub assist: f32,
    pub team_scored: f32,
    pub conceded: f32,
    pub yellow: f32,
    pub red: f32,
    pub penalty_missed: f32,
    pub penalty_saved: f32,
    pub subbed_off: f32,
}

impl Default for MoraleDeltas {
    fn default() -> Self {
        Self {
            goal: 1.5,
            assist: 1.0,
            team_scored: 0.5,
            conceded: -0.3,
            yellow: -0.8,
            red: -2.0,
            penalty_missed: -2.0,
            penalty_saved: 2.0,
            subbed_off: -0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConditionConfig {
    // === Fatigue accumulation ===
    /// Per-minute fatigue for an effective stamina of 1 (기본: 0.075)
    pub fatigue_base_rate: f32,
    /// Weight of stamina in effective stamina; natural fitness takes the rest
    pub stamina_weight: f32,
    pub high_attribute_threshold: u8,
    pub work_rate_multiplier: f32,
    pub determination_multiplier: f32,
    /// Extra fatigue per positive pressing level
    pub pressing_per_level: f32,
    /// Extra fatigue per positive tempo level
    pub tempo_per_level: f32,

    // === Fatigue effect ===
    /// Fatigue only degrades attributes after this minute
    pub fatigue_active_after: u8,
    /// Multiplier is 1 - fatigue * penalty
    pub fatigue_attribute_penalty: f32,

    // === Morale ===
    pub morale_neutral: f32,
    /// Share of the gap to neutral closed each minute
    pub morale_decay: f32,
    pub leadership_threshold: u8,
    /// Team-wide deltas are scaled by 1 - dampening for leaders
    pub leadership_dampening: f32,
    pub deltas: MoraleDeltas,
}

impl Default for ConditionConfig {
    fn default() -> Self {
        Self {
            fatigue_base_rate: 0.075,
            stamina_weight: 0.7,
            high_attribute_threshold: 15,
            work_rate_multiplier: 1.15,
            determination_multiplier: 0.9,
            pressing_per_level: 0.05,
            tempo_per_level: 0.05,

            fatigue_active_after: 60,
            fatigue_attribute_penalty: 0.25,

            morale_neutral: 7.0,
            morale_decay: 0.02,
            leadership_threshold: 15,
            leadership_dampening: 0.15,
            deltas: MoraleDeltas::default(),
        }
    }
}

impl ConditionConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.stamina_weight)
            || !(0.0..=1.0).contains(&self.morale_decay)
            || !(0.0..=1.0).contains(&self.leadership_dampening)
            || !(0.0..=1.0).contains(&self.fatigue_attribute_penalty)
        {
            return Err(MatchError::InvalidConfig(
                "condition: weights and decay must lie within 0..=1".to_string(),
            ));
        }
        if !(1.0..=10.0).contains(&self.morale_neutral) {
            return Err(MatchError::InvalidConfig(format!(
                "condition: neutral morale {} outside 1..=10",
                self.morale_neutral
            )));
        }
        if self.fatigue_base_rate < 0.0 {
            return Err(MatchError::InvalidConfig(
                "condition: fatigue_base_rate must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
