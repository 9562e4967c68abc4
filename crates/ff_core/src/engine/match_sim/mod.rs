//! Match Simulation Engine
//!
//! 분 단위 확률 상태 기계. [`MatchEngine`]은 [`MatchState`]를 한 번 초기화한 뒤
//! 매 분 고정된 순서로 resolver들을 호출하고 [`MatchTick`]을 하나씩 내보낸다.
//!
//! ## 분 단위 실행 순서
//!
//! ```text
//! kickoff 또는 possession roll
//!   → micro-actions (3-8회, cumulative-range selector)
//!       → shot / foul / turnover / offside resolver 체인
//!   → substitutions (팀별)
//!   → fatigue 누적, morale decay
//!   → possession %, zone, phase
//!   → commentary
//! ```
//!
//! ## Clock
//!
//! | Tick | minute | phase |
//! |------|--------|-------|
//! | first half | 1 ..= 45 + it1 | played |
//! | half time | 45 | `half_time` |
//! | second half | 46 ..= 90 + it2 | played |
//! | full time | 90 | `full_time` |
//!
//! `MatchTick::index` is the monotonic counter across the whole sequence.
//!
//! ## Sub-modules
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `attribute_calc` | Five-layer effective attribute chain |
//! | `lineup_selection` | Starting XI / bench, state initialization |
//! | `possession` | Per-minute possession roll |
//! | `action_decision` | Micro-action selector |
//! | `shooting` | Shot chain (block → miss → goal → save) |
//! | `card_system` | Fouls and cards |
//! | `set_pieces` | Penalties, corners, goal kicks, throw-ins, free kicks |
//! | `defending` | Tackles, interceptions, clearances |
//! | `offside` | Offside calls |
//! | `substitutions` | Substitution manager |
//! | `stamina` / `momentum` | Fatigue and morale |
//! | `pitch_zone` / `match_phase` | Zone and phase labels |
//! | `tick` | Output records |

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

pub mod action_decision;
pub mod attribute_calc;
pub mod ball_helpers;
pub mod card_system;
pub mod defending;
pub mod lineup_selection;
pub mod match_phase;
pub mod match_state;
pub mod momentum;
pub mod offside;
pub mod pitch_zone;
pub mod player_selection;
pub mod possession;
pub mod set_pieces;
pub mod shooting;
pub mod stamina;
pub mod substitutions;
pub mod tick;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use action_decision::{build_action_ranges, select_action, MicroAction};
pub use lineup_selection::{resolve_lineup, ResolvedLineup};
pub use match_phase::{classify, MatchPhase};
pub use match_state::{MatchState, PlayerState, SetPieceTakers, SideState, SubstitutionRecord};
pub use pitch_zone::{Third, Zone};
pub use tick::{LineupData, LineupPlayer, MatchReport, MatchTick};

use crate::commentary::{Commentator, PlainCommentator};
use crate::engine::config::EngineConfig;
use crate::error::{MatchError, Result};
use crate::models::{
    validate_source, Coordinates, EventKind, MatchEvent, MatchSource, SequenceAction, Side,
};

/// Longest injury time accepted for either half.
pub const MAX_INJURY_TIME: u8 = 15;

/// Per-match options beyond the input rosters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchOptions {
    #[serde(default)]
    pub config: EngineConfig,
    /// Fixed injury time `[first half, second half]`; drawn when `None`
    #[serde(default)]
    pub injury_time: Option<[u8; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    FirstHalf(u8),
    HalfTime,
    SecondHalf(u8),
    FullTime,
    Done,
}

/// One match run. Forward-only: iterate it (or call
/// [`run_to_completion`](Self::run_to_completion)) to produce ticks; replaying
/// requires a new engine.
pub struct MatchEngine<R: Rng = ChaCha8Rng> {
    state: MatchState,
    rng: R,
    commentator: Box<dyn Commentator + Send>,
    stage: Stage,
    /// Events of the minute being played
    events: Vec<MatchEvent>,
    /// Sub-motions not yet attached to an event
    pending: Vec<SequenceAction>,
    /// Side kicking off at the start of the next played minute
    kickoff_pending: Option<Side>,
    next_index: u32,
}

impl MatchEngine<ChaCha8Rng> {
    /// Engine seeded from a `u64` with default options.
    pub fn new(source: &dyn MatchSource, seed: u64) -> Result<Self> {
        Self::with_options(source, seed, MatchOptions::default())
    }

    pub fn with_options(source: &dyn MatchSource, seed: u64, options: MatchOptions) -> Result<Self> {
        Self::with_rng(source, options, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> MatchEngine<R> {
    /// Validate input and config, fix injury time and initialize the state.
    pub fn with_rng(source: &dyn MatchSource, options: MatchOptions, mut rng: R) -> Result<Self> {
        validate_source(source)?;
        options.config.validate()?;

        let injury_time = match options.injury_time {
            Some(fixed) => {
                if fixed.iter().any(|&m| m > MAX_INJURY_TIME) {
                    return Err(MatchError::InvalidConfig(format!(
                        "injury time {:?} exceeds {} minutes",
                        fixed, MAX_INJURY_TIME
                    )));
                }
                fixed
            }
            None => [rng.gen_range(1..=4), rng.gen_range(1..=5)],
        };

        let state = MatchState::from_source(source, options.config, injury_time);
        log::debug!(
            "match initialized: {} vs {}, injury time {}+{}",
            state.home.name, state.away.name, injury_time[0], injury_time[1]
        );

        Ok(Self {
            state,
            rng,
            commentator: Box::new(PlainCommentator),
            stage: Stage::FirstHalf(1),
            events: Vec::new(),
            pending: Vec::new(),
            kickoff_pending: Some(Side::Home),
            next_index: 0,
        })
    }

    /// Replace the default commentary collaborator.
    pub fn with_commentator(mut self, commentator: impl Commentator + Send + 'static) -> Self {
        self.commentator = Box::new(commentator);
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn injury_time(&self) -> [u8; 2] {
        self.state.injury_time
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Both starting XIs with formation coordinates (away mirrored).
    pub fn lineup(&self) -> LineupData {
        LineupData::from_state(&self.state)
    }

    /// Consume the remaining ticks and package the final state.
    pub fn run_to_completion(mut self) -> MatchReport {
        let ticks: Vec<MatchTick> = self.by_ref().collect();
        MatchReport::new(ticks, &self.state)
    }

    /// Percentage roll.
    pub(crate) fn chance(&mut self, pct: f32) -> bool {
        self.rng.gen::<f32>() * 100.0 < pct
    }

    // ===========================================
    // Clock
    // ===========================================

    fn next_tick(&mut self) -> Option<MatchTick> {
        let [first, second] = self.state.injury_time;
        let tick = match self.stage {
            Stage::FirstHalf(minute) => {
                self.stage =
                    if minute >= 45 + first { Stage::HalfTime } else { Stage::FirstHalf(minute + 1) };
                self.play_minute(minute)
            }
            Stage::HalfTime => {
                self.stage = Stage::SecondHalf(46);
                self.kickoff_pending = Some(Side::Away);
                self.structural_tick(45, MatchPhase::HalfTime)
            }
            Stage::SecondHalf(minute) => {
                self.stage =
                    if minute >= 90 + second { Stage::FullTime } else { Stage::SecondHalf(minute + 1) };
                self.play_minute(minute)
            }
            Stage::FullTime => {
                self.stage = Stage::Done;
                self.structural_tick(90, MatchPhase::FullTime)
            }
            Stage::Done => return None,
        };
        Some(tick)
    }

    fn play_minute(&mut self, minute: u8) -> MatchTick {
        self.state.minute = minute;
        self.events.clear();
        self.pending.clear();

        let kickoff = self.kickoff_pending.take();
        match kickoff {
            Some(side) => self.kick_off(side),
            None => self.resolve_possession(),
        }
        let holder = self.state.possession;
        self.state.side_mut(holder).possession_minutes += 1;

        self.run_micro_actions();

        for side in Side::BOTH {
            self.consider_substitution(side);
        }

        self.state.accumulate_fatigue();
        self.state.decay_morale();

        let (home, away) = (self.state.home.possession_minutes, self.state.away.possession_minutes);
        self.state.stats.update_possession(home, away);
        self.state.zone = Zone::from_ball(self.state.ball.x, self.state.possession);
        self.state.phase = match kickoff {
            Some(_) => MatchPhase::Kickoff,
            None => classify(&self.events),
        };

        let commentary = if self.events.is_empty() {
            self.commentator.render_quiet(&self.state)
        } else {
            self.commentator.render_minute(&self.events, &self.state)
        };

        log::trace!(
            "{}' {:?} {} {}-{} events={} ball=({:.1}, {:.1})",
            minute,
            self.state.phase,
            self.state.zone,
            self.state.score.home,
            self.state.score.away,
            self.events.len(),
            self.state.ball.x,
            self.state.ball.y
        );
        self.package(commentary)
    }

    fn kick_off(&mut self, side: Side) {
        self.state.possession = side;
        self.place_ball(Coordinates::CENTRE);
        let event = self.event(side, EventKind::KickOff);
        self.emit(event);
    }

    /// Half-time / full-time record: no events, no state progression.
    fn structural_tick(&mut self, minute: u8, phase: MatchPhase) -> MatchTick {
        self.state.minute = minute;
        self.state.phase = phase;
        self.events.clear();
        self.pending.clear();
        if phase == MatchPhase::HalfTime {
            self.place_ball(Coordinates::CENTRE);
        }

        let commentary = self.commentator.render_quiet(&self.state);
        log::debug!("{}", commentary);
        self.package(commentary)
    }

    fn package(&mut self, commentary: String) -> MatchTick {
        let s = &self.state;
        let tick = MatchTick {
            index: self.next_index,
            minute: s.minute,
            phase: s.phase,
            possession: s.possession,
            zone: s.zone,
            ball: s.ball,
            events: std::mem::take(&mut self.events),
            score: s.score,
            stats: s.stats.clone(),
            commentary,
        };
        self.next_index += 1;
        tick
    }
}

impl<R: Rng> Iterator for MatchEngine<R> {
    type Item = MatchTick;

    fn next(&mut self) -> Option<MatchTick> {
        self.next_tick()
    }
}

impl<R: Rng> FusedIterator for MatchEngine<R> {}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchInput, Team};
    use super::test_fixtures::{engine_for, uniform_input};

    struct Silent;

    impl Commentator for Silent {
        fn render_event(&self, _: &MatchEvent, _: &MatchState) -> String {
            String::new()
        }

        fn render_quiet(&self, _: &MatchState) -> String {
            "-".to_string()
        }
    }

    #[test]
    fn test_tick_count_and_clock() {
        let ticks: Vec<MatchTick> = engine_for(&uniform_input(12), 3).collect();
        assert_eq!(ticks.len(), 97);

        assert_eq!(ticks[0].minute, 1);
        assert_eq!(ticks[0].phase, MatchPhase::Kickoff);
        assert_eq!(ticks[0].events[0].kind, EventKind::KickOff);
        assert_eq!(ticks[0].events[0].side, Side::Home);

        let half_time = &ticks[47];
        assert_eq!(half_time.minute, 45);
        assert_eq!(half_time.phase, MatchPhase::HalfTime);
        assert!(half_time.events.is_empty());
        assert!(half_time.commentary.starts_with("Half time!"));

        assert_eq!(ticks[48].minute, 46);
        assert_eq!(ticks[48].phase, MatchPhase::Kickoff);
        assert_eq!(ticks[48].events[0].side, Side::Away);

        let full_time = ticks.last().unwrap();
        assert_eq!(full_time.minute, 90);
        assert_eq!(full_time.phase, MatchPhase::FullTime);
        assert_eq!(ticks[95].minute, 93);

        for (i, tick) in ticks.iter().enumerate() {
            assert_eq!(tick.index as usize, i);
        }
    }

    #[test]
    fn test_engine_is_fused() {
        let mut engine = engine_for(&uniform_input(10), 1);
        assert_eq!(engine.by_ref().count(), 97);
        assert!(engine.is_finished());
        assert!(engine.next().is_none());
        assert!(engine.next().is_none());
    }

    #[test]
    fn test_kickoff_follows_goal() {
        let mut checked = 0;
        for seed in 0..40 {
            let ticks: Vec<MatchTick> = engine_for(&uniform_input(14), seed).collect();
            for pair in ticks.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let Some(goal) = a.goals().last() else { continue };
                if b.is_structural() || a.is_structural() {
                    continue;
                }
                assert_eq!(b.phase, MatchPhase::Kickoff);
                assert_eq!(b.events[0].kind, EventKind::KickOff);
                assert_eq!(b.events[0].side, goal.side.opponent());
                checked += 1;
            }
        }
        assert!(checked > 0, "expected at least one goal across 40 matches");
    }

    #[test]
    fn test_drawn_injury_time_in_range() {
        let input = uniform_input(10);
        for seed in 0..50 {
            let engine = MatchEngine::new(&input, seed).unwrap();
            let [first, second] = engine.injury_time();
            assert!((1..=4).contains(&first));
            assert!((1..=5).contains(&second));
        }
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut input: MatchInput = uniform_input(10);
        input.away.team = Team { name: "Empty".to_string(), players: Vec::new() };
        assert!(matches!(MatchEngine::new(&input, 1), Err(MatchError::EmptySquad(Side::Away))));

        let mut input = uniform_input(10);
        input.home.team.players.truncate(9);
        assert!(matches!(
            MatchEngine::new(&input, 1),
            Err(MatchError::InvalidTeamSize { side: Side::Home, expected: 11, found: 9 })
        ));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let input = uniform_input(10);
        let options = MatchOptions { injury_time: Some([2, 40]), ..MatchOptions::default() };
        assert!(MatchEngine::with_options(&input, 1, options).is_err());

        let mut config = EngineConfig::default();
        config.flow.min_actions = 9;
        config.flow.max_actions = 3;
        let options = MatchOptions { config, ..MatchOptions::default() };
        assert!(matches!(
            MatchEngine::with_options(&input, 1, options),
            Err(MatchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_custom_commentator() {
        let engine = engine_for(&uniform_input(10), 9).with_commentator(Silent);
        let report = engine.run_to_completion();
        assert!(report.ticks.iter().filter(|t| t.events.is_empty()).all(|t| t.commentary == "-"));
    }

    #[test]
    fn test_report_matches_last_tick() {
        let report = engine_for(&uniform_input(12), 21).run_to_completion();
        let last = report.ticks.last().unwrap();
        assert_eq!(report.score, last.score);
        assert_eq!(report.stats, last.stats);
        assert_eq!(report.injury_time, [2, 3]);
        assert_eq!(report.player_states.len(), 36);
        let total = report.stats.home.possession + report.stats.away.possession;
        assert!((total - 100.0).abs() < 0.05);
    }

    #[test]
    fn test_same_seed_same_ticks() {
        let input = uniform_input(11);
        let a: Vec<MatchTick> = engine_for(&input, 77).collect();
        let b: Vec<MatchTick> = engine_for(&input, 77).collect();
        assert_eq!(a, b);
        let c: Vec<MatchTick> = engine_for(&input, 78).collect();
        assert_ne!(a, c);
    }
}
