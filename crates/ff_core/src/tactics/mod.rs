// Tactical settings consumed by the match engine

pub mod team_instructions;

pub use team_instructions::{
    CreativeFreedom, DefensiveLine, Mentality, PassingDirectness, Pressing, Tactic,
    TacticLevel, TacticalPreset, Tempo, Width,
};
