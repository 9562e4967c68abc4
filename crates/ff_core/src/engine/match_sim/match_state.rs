//! Match State
//!
//! The single mutable aggregate of one simulated match: clock, score,
//! possession/zone/ball, per-side lineups and bench, per-player runtime state,
//! cumulative stats, set-piece takers and injury time.
//!
//! Owned exclusively by one [`MatchEngine`](super::MatchEngine). Per-player maps
//! are `BTreeMap`s so that every iteration order is stable across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::match_phase::MatchPhase;
use super::pitch_zone::Zone;
use crate::engine::config::EngineConfig;
use crate::models::{
    Coordinates, FormationSlot, MatchStats, Player, PlayerId, Position, Score, Side,
};
use crate::tactics::Tactic;

/// Runtime state of one player. `sent_off` and `subbed_off` are terminal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub player_id: PlayerId,
    pub side: Side,
    /// 0.0 (fresh) ..= 1.0 (exhausted)
    pub fatigue: f32,
    pub yellow_cards: u8,
    pub sent_off: bool,
    pub subbed_off: bool,
    pub goals: u8,
    pub assists: u8,
    /// 1.0 ..= 10.0, neutral 7.0
    pub morale: f32,
    /// Currently assigned position (natural position for unused substitutes)
    pub position: Position,
}

impl PlayerState {
    pub fn new(player_id: PlayerId, side: Side, position: Position, morale: f32) -> Self {
        Self {
            player_id,
            side,
            fatigue: 0.0,
            yellow_cards: 0,
            sent_off: false,
            subbed_off: false,
            goals: 0,
            assists: 0,
            morale,
            position,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.sent_off || self.subbed_off
    }
}

/// Designated set-piece specialists for one side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SetPieceTakers {
    pub corners: Option<PlayerId>,
    pub free_kicks: Option<PlayerId>,
    pub penalties: Option<PlayerId>,
}

impl SetPieceTakers {
    pub fn holds_role(&self, id: PlayerId) -> bool {
        [self.corners, self.free_kicks, self.penalties].contains(&Some(id))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubstitutionRecord {
    pub minute: u8,
    pub player_off: PlayerId,
    pub player_on: PlayerId,
    pub position: Position,
}

/// Everything the state tracks for one side.
#[derive(Debug, Clone)]
pub struct SideState {
    pub name: String,
    pub tactic: Tactic,
    /// Resolved formation slots (always eleven)
    pub slots: Vec<FormationSlot>,
    /// Current occupant of each formation slot, slot order
    pub lineup: Vec<PlayerId>,
    /// Starting XI as kicked off, slot order
    pub starting_lineup: Vec<PlayerId>,
    /// Unused substitutes in squad order
    pub bench: Vec<PlayerId>,
    pub set_piece_takers: SetPieceTakers,
    pub substitutions: Vec<SubstitutionRecord>,
    /// Played minutes this side held the ball
    pub possession_minutes: u32,
}

/// The match aggregate.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub minute: u8,
    pub phase: MatchPhase,
    pub score: Score,
    pub possession: Side,
    pub zone: Zone,
    pub ball: Coordinates,
    pub home: SideState,
    pub away: SideState,
    /// Read-only player records for both squads
    pub players: BTreeMap<PlayerId, Player>,
    pub player_states: BTreeMap<PlayerId, PlayerState>,
    pub stats: MatchStats,
    /// Injury time for [first half, second half]; fixed at initialization
    pub injury_time: [u8; 2],
    pub config: EngineConfig,
}

impl MatchState {
    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    pub fn tactic(&self, side: Side) -> &Tactic {
        &self.side(side).tactic
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_state(&self, id: PlayerId) -> Option<&PlayerState> {
        self.player_states.get(&id)
    }

    pub fn player_name(&self, id: PlayerId) -> &str {
        self.players.get(&id).map(|p| p.name.as_str()).unwrap_or("Unknown")
    }

    pub fn is_available(&self, id: PlayerId) -> bool {
        self.player_states.get(&id).map(|s| !s.is_terminal()).unwrap_or(false)
    }

    /// Players of `side` currently on the pitch and eligible for selection.
    pub fn available_players(&self, side: Side) -> Vec<PlayerId> {
        self.side(side).lineup.iter().copied().filter(|&id| self.is_available(id)).collect()
    }

    pub fn available_outfield(&self, side: Side) -> Vec<PlayerId> {
        self.available_players(side)
            .into_iter()
            .filter(|&id| !self.assigned_position(id).is_goalkeeper())
            .collect()
    }

    pub fn assigned_position(&self, id: PlayerId) -> Position {
        self.player_states
            .get(&id)
            .map(|s| s.position)
            .or_else(|| self.players.get(&id).map(|p| p.position))
            .unwrap_or(Position::CM)
    }

    /// Available player currently assigned in goal, if any.
    pub fn goalkeeper(&self, side: Side) -> Option<PlayerId> {
        self.available_players(side)
            .into_iter()
            .find(|&id| self.assigned_position(id).is_goalkeeper())
    }

    /// Available players assigned to a defensive position.
    pub fn recognized_defenders(&self, side: Side) -> Vec<PlayerId> {
        self.available_players(side)
            .into_iter()
            .filter(|&id| self.assigned_position(id).is_defender())
            .collect()
    }

    /// Candidates matching `filter`, degrading to all outfield players and
    /// then to every available player when the filtered pool is empty.
    pub fn candidate_pool(&self, side: Side, filter: impl Fn(Position) -> bool) -> Vec<PlayerId> {
        let available = self.available_players(side);
        let filtered: Vec<PlayerId> =
            available.iter().copied().filter(|&id| filter(self.assigned_position(id))).collect();
        if !filtered.is_empty() {
            return filtered;
        }
        let outfield: Vec<PlayerId> = available
            .iter()
            .copied()
            .filter(|&id| !self.assigned_position(id).is_goalkeeper())
            .collect();
        if !outfield.is_empty() {
            return outfield;
        }
        available
    }

    /// Depth of the ball measured from `side`'s own goal line (0 = own goal, 100 = opponent goal).
    pub fn ball_depth(&self, side: Side) -> f32 {
        match side {
            Side::Home => self.ball.x,
            Side::Away => 100.0 - self.ball.x,
        }
    }

    /// True when the ball sits in the attacking third of the side in possession.
    pub fn in_attacking_third(&self) -> bool {
        self.ball_depth(self.possession) >= self.config.flow.attacking_third_x
    }

    pub fn substitutions_made(&self, side: Side) -> usize {
        self.side(side).substitutions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::uniform_state;

    #[test]
    fn test_available_excludes_terminal_players() {
        let mut state = uniform_state(10);
        let lineup = state.home.lineup.clone();
        state.player_states.get_mut(&lineup[3]).unwrap().sent_off = true;
        state.player_states.get_mut(&lineup[5]).unwrap().subbed_off = true;
        let available = state.available_players(Side::Home);
        assert_eq!(available.len(), 9);
        assert!(!available.contains(&lineup[3]));
        assert!(!available.contains(&lineup[5]));
    }

    #[test]
    fn test_goalkeeper_and_defenders() {
        let mut state = uniform_state(10);
        let keeper = state.goalkeeper(Side::Away).unwrap();
        assert_eq!(state.assigned_position(keeper), Position::GK);
        assert_eq!(state.recognized_defenders(Side::Away).len(), 4);

        state.player_states.get_mut(&keeper).unwrap().sent_off = true;
        assert!(state.goalkeeper(Side::Away).is_none());
    }

    #[test]
    fn test_candidate_pool_falls_back() {
        let mut state = uniform_state(10);
        let forwards = state.candidate_pool(Side::Home, |p| p.is_forward());
        assert_eq!(forwards.len(), 2);

        for id in forwards {
            state.player_states.get_mut(&id).unwrap().sent_off = true;
        }
        let fallback = state.candidate_pool(Side::Home, |p| p.is_forward());
        assert_eq!(fallback.len(), 8, "falls back to every available outfield player");
    }

    #[test]
    fn test_attacking_third_is_mirrored() {
        let mut state = uniform_state(10);
        state.ball = Coordinates::new(80.0, 50.0);
        state.possession = Side::Home;
        assert!(state.in_attacking_third());
        state.possession = Side::Away;
        assert!(!state.in_attacking_third());
        state.ball = Coordinates::new(20.0, 50.0);
        assert!(state.in_attacking_third());
    }
}
