//! Tick & Report Records
//!
//! - [`MatchTick`]: 분 단위 출력 레코드 (이벤트, 스코어, 누적 통계, 해설)
//! - [`MatchReport`]: 전체 경기 결과 (`run_to_completion`)
//! - [`LineupData`]: 킥오프 전 선발 라인업 (원정팀 좌표는 x 반전)

use serde::{Deserialize, Serialize};

use super::match_phase::MatchPhase;
use super::match_state::{MatchState, PlayerState, SubstitutionRecord};
use super::pitch_zone::Zone;
use crate::models::{Coordinates, MatchEvent, MatchStats, PlayerId, Position, Score, Side};

/// One produced minute (or structural half-time/full-time record).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchTick {
    /// Zero-based, +1 per produced tick across the whole match
    pub index: u32,
    pub minute: u8,
    pub phase: MatchPhase,
    pub possession: Side,
    pub zone: Zone,
    pub ball: Coordinates,
    pub events: Vec<MatchEvent>,
    pub score: Score,
    pub stats: MatchStats,
    pub commentary: String,
}

impl MatchTick {
    pub fn is_structural(&self) -> bool {
        matches!(self.phase, MatchPhase::HalfTime | MatchPhase::FullTime)
    }

    pub fn goals(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(|e| e.is_goal())
    }
}

/// Everything a finished match produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub ticks: Vec<MatchTick>,
    pub score: Score,
    pub stats: MatchStats,
    pub player_states: Vec<PlayerState>,
    pub substitutions: Vec<(Side, SubstitutionRecord)>,
    pub injury_time: [u8; 2],
}

impl MatchReport {
    pub(crate) fn new(ticks: Vec<MatchTick>, state: &MatchState) -> Self {
        let substitutions = Side::BOTH
            .iter()
            .flat_map(|&side| state.side(side).substitutions.iter().map(move |r| (side, *r)))
            .collect();
        Self {
            ticks,
            score: state.score,
            stats: state.stats.clone(),
            player_states: state.player_states.values().cloned().collect(),
            substitutions,
            injury_time: state.injury_time,
        }
    }

    /// Goals, cards, fouls, corners and substitutions in match order.
    pub fn key_events(&self) -> impl Iterator<Item = (u8, &MatchEvent)> {
        self.ticks
            .iter()
            .flat_map(|t| t.events.iter())
            .filter(|e| e.kind.is_key_event())
            .map(|e| (e.minute, e))
    }

    pub fn player_state(&self, id: PlayerId) -> Option<&PlayerState> {
        self.player_states.iter().find(|s| s.player_id == id)
    }

    pub fn winner(&self) -> Option<Side> {
        self.score.winner()
    }
}

/// One starter as exported before kickoff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineupPlayer {
    pub id: PlayerId,
    pub name: String,
    pub shirt_number: u8,
    pub position: Position,
    pub x: f32,
    pub y: f32,
    pub side: Side,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineupData {
    pub home: Vec<LineupPlayer>,
    pub away: Vec<LineupPlayer>,
}

impl LineupData {
    pub(crate) fn from_state(state: &MatchState) -> Self {
        let export = |side: Side| -> Vec<LineupPlayer> {
            let side_state = state.side(side);
            side_state
                .starting_lineup
                .iter()
                .zip(side_state.slots.iter())
                .enumerate()
                .map(|(i, (&id, slot))| {
                    let player = state.player(id);
                    LineupPlayer {
                        id,
                        name: state.player_name(id).to_string(),
                        shirt_number: player.and_then(|p| p.shirt_number).unwrap_or(i as u8 + 1),
                        position: slot.position,
                        x: match side {
                            Side::Home => slot.x,
                            Side::Away => 100.0 - slot.x,
                        },
                        y: slot.y,
                        side,
                    }
                })
                .collect()
        };
        Self { home: export(Side::Home), away: export(Side::Away) }
    }

    pub fn side(&self, side: Side) -> &[LineupPlayer] {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}
