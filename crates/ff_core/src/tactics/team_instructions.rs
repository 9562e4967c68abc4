//! Team-wide Tactical Instructions
//!
//! Five-step option scales plus boolean flags. Every scale maps to a signed
//! level in `-2..=2` (0 = the neutral middle option); the engine only ever
//! reads levels and flags, never the option names.

use serde::{Deserialize, Serialize};

/// Signed step of a five-option tactical scale.
pub trait TacticLevel {
    fn level(&self) -> i8;

    fn level_f32(&self) -> f32 {
        f32::from(self.level())
    }
}

/// Team tactic as supplied with the match input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tactic {
    pub mentality: Mentality,
    pub pressing: Pressing,
    pub tempo: Tempo,
    pub width: Width,
    #[serde(alias = "passing")]
    pub passing_directness: PassingDirectness,
    pub creative_freedom: CreativeFreedom,
    pub defensive_line: DefensiveLine,
    pub tackle_harder: bool,
    pub get_stuck_in: bool,
    pub stay_on_feet: bool,
    pub play_out_of_defence: bool,
    pub offside_trap: bool,
    pub short_goal_kicks: bool,
}

impl Default for Tactic {
    fn default() -> Self {
        Self {
            mentality: Mentality::Balanced,
            pressing: Pressing::Sometimes,
            tempo: Tempo::Standard,
            width: Width::Standard,
            passing_directness: PassingDirectness::Mixed,
            creative_freedom: CreativeFreedom::Normal,
            defensive_line: DefensiveLine::Normal,
            tackle_harder: false,
            get_stuck_in: false,
            stay_on_feet: false,
            play_out_of_defence: false,
            offside_trap: false,
            short_goal_kicks: false,
        }
    }
}

impl Tactic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of aggressive tackling flags set (tackle harder, get stuck in).
    pub fn aggressive_tackling_flags(&self) -> i32 {
        i32::from(self.tackle_harder) + i32::from(self.get_stuck_in)
    }

    /// Create a tactic for a named tactical style.
    pub fn for_style(style: TacticalPreset) -> Self {
        match style {
            TacticalPreset::HighPressing => Self {
                mentality: Mentality::Attacking,
                pressing: Pressing::Always,
                tempo: Tempo::VeryFast,
                width: Width::Wide,
                passing_directness: PassingDirectness::Short,
                defensive_line: DefensiveLine::VeryHigh,
                get_stuck_in: true,
                offside_trap: true,
                ..Self::default()
            },
            TacticalPreset::Counterattack => Self {
                mentality: Mentality::Defensive,
                pressing: Pressing::Rarely,
                tempo: Tempo::Fast,
                width: Width::Narrow,
                passing_directness: PassingDirectness::VeryDirect,
                defensive_line: DefensiveLine::Deep,
                ..Self::default()
            },
            TacticalPreset::Possession => Self {
                mentality: Mentality::Balanced,
                pressing: Pressing::Often,
                tempo: Tempo::Slow,
                width: Width::Wide,
                passing_directness: PassingDirectness::VeryShort,
                creative_freedom: CreativeFreedom::High,
                play_out_of_defence: true,
                short_goal_kicks: true,
                ..Self::default()
            },
            TacticalPreset::ParkTheBus => Self {
                mentality: Mentality::VeryDefensive,
                pressing: Pressing::Never,
                tempo: Tempo::VerySlow,
                width: Width::VeryNarrow,
                passing_directness: PassingDirectness::Direct,
                creative_freedom: CreativeFreedom::VeryLow,
                defensive_line: DefensiveLine::VeryDeep,
                stay_on_feet: true,
                ..Self::default()
            },
            TacticalPreset::Balanced => Self::default(),
        }
    }
}

/// Named tactical styles used by fixtures and the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticalPreset {
    HighPressing,
    Counterattack,
    Possession,
    ParkTheBus,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mentality {
    VeryDefensive,
    Defensive,
    #[default]
    #[serde(alias = "standard", alias = "normal")]
    Balanced,
    Attacking,
    VeryAttacking,
}

impl TacticLevel for Mentality {
    fn level(&self) -> i8 {
        match self {
            Mentality::VeryDefensive => -2,
            Mentality::Defensive => -1,
            Mentality::Balanced => 0,
            Mentality::Attacking => 1,
            Mentality::VeryAttacking => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Pressing {
    Never,
    Rarely,
    #[default]
    #[serde(alias = "standard", alias = "normal")]
    Sometimes,
    Often,
    Always,
}

impl TacticLevel for Pressing {
    fn level(&self) -> i8 {
        match self {
            Pressing::Never => -2,
            Pressing::Rarely => -1,
            Pressing::Sometimes => 0,
            Pressing::Often => 1,
            Pressing::Always => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tempo {
    VerySlow,
    Slow,
    #[default]
    #[serde(alias = "normal")]
    Standard,
    Fast,
    VeryFast,
}

impl TacticLevel for Tempo {
    fn level(&self) -> i8 {
        match self {
            Tempo::VerySlow => -2,
            Tempo::Slow => -1,
            Tempo::Standard => 0,
            Tempo::Fast => 1,
            Tempo::VeryFast => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Width {
    VeryNarrow,
    Narrow,
    #[default]
    #[serde(alias = "normal")]
    Standard,
    Wide,
    VeryWide,
}

impl TacticLevel for Width {
    fn level(&self) -> i8 {
        match self {
            Width::VeryNarrow => -2,
            Width::Narrow => -1,
            Width::Standard => 0,
            Width::Wide => 1,
            Width::VeryWide => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PassingDirectness {
    VeryShort,
    Short,
    #[default]
    #[serde(alias = "standard", alias = "normal")]
    Mixed,
    Direct,
    VeryDirect,
}

impl TacticLevel for PassingDirectness {
    fn level(&self) -> i8 {
        match self {
            PassingDirectness::VeryShort => -2,
            PassingDirectness::Short => -1,
            PassingDirectness::Mixed => 0,
            PassingDirectness::Direct => 1,
            PassingDirectness::VeryDirect => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CreativeFreedom {
    VeryLow,
    Low,
    #[default]
    #[serde(alias = "standard", alias = "balanced")]
    Normal,
    High,
    VeryHigh,
}

impl TacticLevel for CreativeFreedom {
    fn level(&self) -> i8 {
        match self {
            CreativeFreedom::VeryLow => -2,
            CreativeFreedom::Low => -1,
            CreativeFreedom::Normal => 0,
            CreativeFreedom::High => 1,
            CreativeFreedom::VeryHigh => 2,
        }
    }
}

/// Recognized and carried through the input; no engine formula reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefensiveLine {
    VeryDeep,
    Deep,
    #[default]
    #[serde(alias = "standard")]
    Normal,
    High,
    VeryHigh,
}

impl TacticLevel for DefensiveLine {
    fn level(&self) -> i8 {
        match self {
            DefensiveLine::VeryDeep => -2,
            DefensiveLine::Deep => -1,
            DefensiveLine::Normal => 0,
            DefensiveLine::High => 1,
            DefensiveLine::VeryHigh => 2,
        }
    }
}
