//! Match Setup - 경기 입력 계약
//!
//! 경기 시작 전 양 팀의 스쿼드/포메이션/전술/저장된 라인업을 한 곳에서 제공.
//! 경기 중에는 읽기 전용으로만 참조된다.
//!
//! The engine depends on the [`MatchSource`] trait, not on a concrete
//! data-access mechanism. [`MatchInput`] is the in-memory implementation
//! used by the JSON API, the CLI and tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::player::{PlayerId, Position};
use super::team::{Formation, Side, Team, FORMATION_SIZE};
use crate::error::{MatchError, Result};
use crate::tactics::Tactic;

/// One entry of a previously stored starting lineup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineupEntry {
    pub player_id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Read-only match input, one accessor per concern.
pub trait MatchSource {
    fn team(&self, side: Side) -> &Team;
    fn formation(&self, side: Side) -> &Formation;
    fn tactic(&self, side: Side) -> &Tactic;
    /// Stored starting lineup; empty when none was saved.
    fn stored_lineup(&self, side: Side) -> &[LineupEntry];
}

/// Everything one side brings to a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSheet {
    pub team: Team,
    #[serde(default)]
    pub formation: Formation,
    #[serde(default)]
    pub tactic: Tactic,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lineup: Vec<LineupEntry>,
}

impl TeamSheet {
    pub fn new(team: Team, formation: Formation, tactic: Tactic) -> Self {
        Self { team, formation, tactic, lineup: Vec::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInput {
    pub home: TeamSheet,
    pub away: TeamSheet,
}

impl MatchInput {
    pub fn new(home: TeamSheet, away: TeamSheet) -> Self {
        Self { home, away }
    }

    pub fn sheet(&self, side: Side) -> &TeamSheet {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn sheet_mut(&mut self, side: Side) -> &mut TeamSheet {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}

impl MatchSource for MatchInput {
    fn team(&self, side: Side) -> &Team {
        &self.sheet(side).team
    }

    fn formation(&self, side: Side) -> &Formation {
        &self.sheet(side).formation
    }

    fn tactic(&self, side: Side) -> &Tactic {
        &self.sheet(side).tactic
    }

    fn stored_lineup(&self, side: Side) -> &[LineupEntry] {
        &self.sheet(side).lineup
    }
}

/// Structural preconditions checked before the engine starts.
///
/// Formations and stored lineups are not validated here; both degrade
/// gracefully at lineup resolution time.
pub fn validate_source(source: &dyn MatchSource) -> Result<()> {
    let mut seen = BTreeSet::new();
    for side in Side::BOTH {
        let players = &source.team(side).players;
        if players.is_empty() {
            return Err(MatchError::EmptySquad(side));
        }
        if players.len() < FORMATION_SIZE {
            return Err(MatchError::InvalidTeamSize {
                side,
                expected: FORMATION_SIZE,
                found: players.len(),
            });
        }
        for player in players {
            if !seen.insert(player.id) {
                return Err(MatchError::DuplicatePlayer(player.id));
            }
        }
    }
    Ok(())
}
