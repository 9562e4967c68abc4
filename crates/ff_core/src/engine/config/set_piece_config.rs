//! Set-Piece Configuration

use serde::{Deserialize, Serialize};

use super::{check_percent, Clamp};
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SetPieceConfig {
    // === Penalty ===
    pub penalty_base: f32,
    pub penalty_clamp: Clamp,

    // === Corner ===
    /// Keeper claim chance for an average (10) keeper
    pub corner_claim_base: f32,
    pub header_chance: f32,
    pub header_on_target_base: f32,
    /// Goal chance of an on-target header
    pub header_goal_base: f32,

    // === Goal kick ===
    pub goal_kick_base: f32,
    pub goal_kick_short_bonus: f32,
    pub goal_kick_clamp: Clamp,
}

impl Default for SetPieceConfig {
    fn default() -> Self {
        Self {
            penalty_base: 75.0,
            penalty_clamp: Clamp::new(55.0, 90.0),

            corner_claim_base: 20.0,
            header_chance: 60.0,
            header_on_target_base: 40.0,
            header_goal_base: 20.0,

            goal_kick_base: 60.0,
            goal_kick_short_bonus: 10.0,
            goal_kick_clamp: Clamp::new(40.0, 85.0),
        }
    }
}

impl SetPieceConfig {
    pub(super) fn validate(&self) -> Result<()> {
        self.penalty_clamp.check("set_piece.penalty_clamp")?;
        self.goal_kick_clamp.check("set_piece.goal_kick_clamp")?;
        check_percent("set_piece.corner_claim_base", self.corner_claim_base)?;
        check_percent("set_piece.header_chance", self.header_chance)?;
        check_percent("set_piece.header_on_target_base", self.header_on_target_base)?;
        check_percent("set_piece.header_goal_base", self.header_goal_base)?;
        Ok(())
    }
}
