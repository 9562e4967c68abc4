//! # Engine Configuration Module
//!
//! 모든 튜닝 상수를 중앙에서 관리하는 설정 시스템.
//!
//! ## 목적
//! - 확률 상수(기본값, clamp 범위)를 코드 밖에서 조정
//! - 부분 설정 파일 지원 (명시한 값만 덮어씀)
//! - 프리셋 지원 (Realistic, Arcade, Cautious)
//!
//! ## 사용법
//! ```rust
//! use ff_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.validate().is_ok());
//! ```

mod condition_config;
mod discipline_config;
mod flow_config;
mod set_piece_config;
mod shot_config;
mod substitution_config;

pub use condition_config::{ConditionConfig, MoraleDeltas};
pub use discipline_config::DisciplineConfig;
pub use flow_config::FlowConfig;
pub use set_piece_config::SetPieceConfig;
pub use shot_config::ShotConfig;
pub use substitution_config::SubstitutionConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MatchError, Result};

/// Inclusive percentage bounds applied to a computed probability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Clamp {
    pub min: f32,
    pub max: f32,
}

impl Clamp {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn apply(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    fn check(&self, name: &str) -> Result<()> {
        if !(0.0..=100.0).contains(&self.min) || !(0.0..=100.0).contains(&self.max) {
            return Err(MatchError::InvalidConfig(format!(
                "{}: bounds must lie within 0..=100 (got {}..={})",
                name, self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(MatchError::InvalidConfig(format!(
                "{}: min {} exceeds max {}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_percent(name: &str, value: f32) -> Result<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(MatchError::InvalidConfig(format!("{}: {} is not a percentage", name, value)))
    }
}

/// Complete engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EngineConfig {
    /// Possession and micro-action selector
    #[serde(default)]
    pub flow: FlowConfig,
    /// Shot resolution chain
    #[serde(default)]
    pub shot: ShotConfig,
    /// Fouls and cards
    #[serde(default)]
    pub discipline: DisciplineConfig,
    /// Penalties, corners, goal kicks
    #[serde(default)]
    pub set_piece: SetPieceConfig,
    /// Fatigue and morale
    #[serde(default)]
    pub condition: ConditionConfig,
    /// Substitution manager
    #[serde(default)]
    pub substitution: SubstitutionConfig,
}

impl EngineConfig {
    /// 현실적인 시뮬레이션 (기본)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// 아케이드 스타일 (더 많은 슛, 더 많은 골, 더 적은 카드)
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.flow.shot_range_base = 16.0;
        cfg.shot.goal_base = 30.0;
        cfg.shot.goal_clamp = Clamp::new(12.0, 50.0);
        cfg.discipline.yellow_base = 9.0;
        cfg.set_piece.penalty_base = 80.0;
        cfg
    }

    /// 신중한 스타일 (더 적은 슛, 더 좁은 골 확률)
    pub fn cautious() -> Self {
        let mut cfg = Self::default();
        cfg.flow.shot_range_base = 9.0;
        cfg.shot.off_target_base = 45.0;
        cfg.shot.goal_clamp = Clamp::new(8.0, 40.0);
        cfg.substitution.chance_per_minute = 6.0;
        cfg
    }

    /// Preset by name (`realistic`, `arcade`, `cautious`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "realistic" | "default" => Some(Self::realistic()),
            "arcade" => Some(Self::arcade()),
            "cautious" => Some(Self::cautious()),
            _ => None,
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
            Some(ext) if ext == "json" => Self::from_json_str(&text),
            Some(ext) if ext == "yaml" || ext == "yml" => Self::from_yaml_str(&text),
            other => Err(MatchError::InvalidConfig(format!(
                "unsupported config extension: {}",
                other.unwrap_or_default()
            ))),
        }
    }

    /// Reject inverted clamps, out-of-range probabilities and impossible counts.
    pub fn validate(&self) -> Result<()> {
        self.flow.validate()?;
        self.shot.validate()?;
        self.discipline.validate()?;
        self.set_piece.validate()?;
        self.condition.validate()?;
        self.substitution.validate()?;
        Ok(())
    }
}

// ========== Tests ==========
