//! Match Phase
//!
//! Coarse per-minute label. Kickoff, half time and full time are structural
//! and set by the orchestrator; every other minute is classified from its
//! events alone.

use serde::{Deserialize, Serialize};

use crate::models::{MatchEvent, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Kickoff,
    OpenPlay,
    AttackHome,
    AttackAway,
    SetPiece,
    HalfTime,
    FullTime,
}

impl MatchPhase {
    pub fn attack(side: Side) -> MatchPhase {
        match side {
            Side::Home => MatchPhase::AttackHome,
            Side::Away => MatchPhase::AttackAway,
        }
    }

    pub fn is_structural(self) -> bool {
        matches!(self, MatchPhase::Kickoff | MatchPhase::HalfTime | MatchPhase::FullTime)
    }
}

/// Set piece beats attack; attack beats open play.
pub fn classify(events: &[MatchEvent]) -> MatchPhase {
    if events.iter().any(|e| e.kind.is_set_piece()) {
        return MatchPhase::SetPiece;
    }
    if let Some(event) = events.iter().find(|e| e.kind.is_attacking()) {
        return MatchPhase::attack(event.side);
    }
    MatchPhase::OpenPlay
}
