//! Test Fixtures Module
//!
//! Centralized test helpers for the match engine.
//!
//! ## Usage
//! ```rust,ignore
//! #[cfg(test)]
//! use crate::engine::match_sim::test_fixtures::*;
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::match_state::MatchState;
use super::{MatchEngine, MatchOptions};
use crate::engine::config::EngineConfig;
use crate::models::{
    Formation, MatchInput, Player, PlayerAttributes, PlayerId, Position, Side, Team, TeamSheet,
};
use crate::tactics::Tactic;

/// Natural positions of an 18-man squad: a 4-4-2 XI followed by seven substitutes.
pub const FOUR_FOUR_TWO_SQUAD: [Position; 18] = [
    Position::GK,
    Position::LB,
    Position::CB,
    Position::CB,
    Position::RB,
    Position::LM,
    Position::CM,
    Position::CM,
    Position::RM,
    Position::ST,
    Position::ST,
    // bench
    Position::GK,
    Position::CB,
    Position::RB,
    Position::CM,
    Position::CDM,
    Position::ST,
    Position::RW,
];

pub const HOME_FIRST_ID: PlayerId = 1;
pub const AWAY_FIRST_ID: PlayerId = 101;

/// Squad where every attribute equals `value`.
pub fn uniform_team(name: &str, first_id: PlayerId, value: u8) -> Team {
    Team {
        name: name.to_string(),
        players: FOUR_FOUR_TWO_SQUAD
            .iter()
            .enumerate()
            .map(|(i, &position)| Player {
                id: first_id + i as PlayerId,
                name: format!("{} {}", name, i + 1),
                position,
                shirt_number: Some(i as u8 + 1),
                attributes: PlayerAttributes::uniform(value),
            })
            .collect(),
    }
}

/// Two uniform squads, both 4-4-2 with default tactics.
pub fn uniform_input(value: u8) -> MatchInput {
    MatchInput::new(
        TeamSheet::new(
            uniform_team("Home", HOME_FIRST_ID, value),
            Formation::default_442(),
            Tactic::default(),
        ),
        TeamSheet::new(
            uniform_team("Away", AWAY_FIRST_ID, value),
            Formation::default_442(),
            Tactic::default(),
        ),
    )
}

/// Initialized state over [`uniform_input`], injury time 2 + 3.
pub fn uniform_state(value: u8) -> MatchState {
    MatchState::from_source(&uniform_input(value), EngineConfig::default(), [2, 3])
}

/// Engine over `input` with a fixed seed and injury time 2 + 3.
pub fn engine_for(input: &MatchInput, seed: u64) -> MatchEngine<ChaCha8Rng> {
    let options = MatchOptions { injury_time: Some([2, 3]), ..MatchOptions::default() };
    MatchEngine::with_rng(input, options, ChaCha8Rng::seed_from_u64(seed))
        .expect("fixture input is valid")
}

/// Engine over [`uniform_input`] positioned at `minute` with `side` in possession.
pub fn engine_at(value: u8, seed: u64, minute: u8, side: Side) -> MatchEngine<ChaCha8Rng> {
    let mut engine = engine_for(&uniform_input(value), seed);
    engine.state.minute = minute;
    engine.state.possession = side;
    engine
}
