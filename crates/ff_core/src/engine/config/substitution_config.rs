//! Substitution Configuration

use serde::{Deserialize, Serialize};

use super::check_percent;
use crate::error::{MatchError, Result};

/// Hard ceiling on substitutions per side.
pub const MAX_SUBSTITUTIONS: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubstitutionConfig {
    /// First minute substitutions may happen (기본: 60)
    pub earliest_minute: u8,
    /// Per-side, per-minute trigger chance in percent (기본: 8)
    pub chance_per_minute: f32,
    /// At most MAX_SUBSTITUTIONS
    pub max_per_side: u8,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self { earliest_minute: 60, chance_per_minute: 8.0, max_per_side: MAX_SUBSTITUTIONS }
    }
}

impl SubstitutionConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.max_per_side > MAX_SUBSTITUTIONS {
            return Err(MatchError::InvalidConfig(format!(
                "substitution: max_per_side {} exceeds {}",
                self.max_per_side, MAX_SUBSTITUTIONS
            )));
        }
        check_percent("substitution.chance_per_minute", self.chance_per_minute)
    }
}
