//! Commentary - 이벤트 → 한 줄 해설
//!
//! The engine only calls the [`Commentator`] trait; template wording lives
//! entirely in the implementation. [`PlainCommentator`] is the default.
//!
//! - `render_event`: 이벤트 하나
//! - `render_minute`: 한 분의 이벤트 목록 (기본: "{m}' - {desc}" 를 공백으로 연결)
//! - `render_quiet`: 이벤트 없는 분, 하프타임, 풀타임

use crate::engine::match_sim::{MatchPhase, MatchState};
use crate::models::{CornerOutcome, EventKind, MatchEvent, ShotOutcome};

pub trait Commentator {
    /// Single event description, without the minute prefix.
    fn render_event(&self, event: &MatchEvent, state: &MatchState) -> String;

    /// Whole-minute line.
    fn render_minute(&self, events: &[MatchEvent], state: &MatchState) -> String {
        events
            .iter()
            .map(|e| format!("{}' - {}", e.minute, self.render_event(e, state)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Quiet minutes plus the half-time and full-time records.
    fn render_quiet(&self, state: &MatchState) -> String;
}

/// Plain single-line English descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCommentator;

impl PlainCommentator {
    fn scoreline(state: &MatchState) -> String {
        format!(
            "{} {} - {} {}",
            state.home.name, state.score.home, state.score.away, state.away.name
        )
    }
}

impl Commentator for PlainCommentator {
    fn render_event(&self, event: &MatchEvent, state: &MatchState) -> String {
        let who = event.primary.map(|id| state.player_name(id)).unwrap_or("Unknown");
        let team = state.side(event.side).name.as_str();

        match &event.kind {
            EventKind::KickOff => format!("{} kick off.", team),
            EventKind::Shot { outcome, free_kick } => {
                let prefix = if *free_kick { "Free kick: " } else { "" };
                match outcome {
                    ShotOutcome::Goal => format!("{}GOAL! {} scores!", prefix, who),
                    ShotOutcome::OffTarget => format!("{}{} fires wide!", prefix, who),
                    ShotOutcome::Blocked | ShotOutcome::BlockedOnLine => {
                        format!("{}{}'s shot is blocked!", prefix, who)
                    }
                    ShotOutcome::Saved | ShotOutcome::TippedOver | ShotOutcome::ParriedWide => {
                        let keeper = event.secondary.map(|id| state.player_name(id)).unwrap_or("the keeper");
                        format!("{}Great save by {}!", prefix, keeper)
                    }
                }
            }
            EventKind::Header { outcome } => match outcome {
                ShotOutcome::Goal => format!("GOAL! {} scores with a header!", who),
                ShotOutcome::OffTarget => format!("{} heads over.", who),
                _ => format!("{}'s header is saved.", who),
            },
            EventKind::Penalty { outcome } => match outcome {
                ShotOutcome::Goal => format!("GOAL! {} scores from the spot!", who),
                ShotOutcome::Saved => format!("Penalty saved! {} is denied.", who),
                _ => format!("{} misses the penalty!", who),
            },
            EventKind::Corner { outcome } => match outcome {
                CornerOutcome::ClaimedByKeeper => format!("Corner kick to {}, claimed by the keeper.", team),
                CornerOutcome::HeaderAttempt => format!("Corner kick to {}", team),
                CornerOutcome::Cleared => format!("Corner kick to {}, cleared.", team),
            },
            EventKind::Foul { .. } => format!("Foul by {}", who),
            EventKind::YellowCard => format!("Yellow card for {}", who),
            EventKind::SecondYellow => format!("Second yellow card for {}!", who),
            EventKind::RedCard => format!("Red card! {} is sent off.", who),
            EventKind::FreeKick => format!("Free kick to {}", team),
            EventKind::GoalKick { .. } => format!("Goal kick for {}", team),
            EventKind::ThrowIn => format!("Throw-in to {}", team),
            EventKind::Offside => "Offside! The flag is up.".to_string(),
            EventKind::Tackle => format!("Good tackle by {}", who),
            EventKind::Interception => format!("{} reads it and intercepts.", who),
            EventKind::Clearance { corner_conceded } => {
                if *corner_conceded {
                    format!("{} clears it behind for a corner.", who)
                } else {
                    format!("{} clears the danger.", who)
                }
            }
            EventKind::Dribble => format!("{} drives forward with the ball.", who),
            EventKind::Substitution => {
                let off = event.secondary.map(|id| state.player_name(id)).unwrap_or("Unknown");
                format!("Substitution for {}: {} replaces {}.", team, who, off)
            }
            EventKind::Possession => format!("{} work the ball around.", team),
        }
    }

    fn render_quiet(&self, state: &MatchState) -> String {
        match state.phase {
            MatchPhase::HalfTime => format!("Half time! {}", Self::scoreline(state)),
            MatchPhase::FullTime => format!("Full time! {}", Self::scoreline(state)),
            _ => format!(
                "{}' - {} keep possession in {}.",
                state.minute,
                state.side(state.possession).name,
                state.zone.describe()
            ),
        }
    }
}
