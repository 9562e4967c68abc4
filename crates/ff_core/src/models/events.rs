//! Match Events - 경기 이벤트 모델
//!
//! 공 좌표 ([2, 98] 범위로 고정), 이벤트 종류와 결과, 이벤트에 붙는 공 이동 시퀀스.

use serde::{Deserialize, Serialize};

use super::{PlayerId, Side};

pub const PITCH_MIN: f32 = 2.0;
pub const PITCH_MAX: f32 = 98.0;

/// Ball/event position on the 0-100 pitch frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub x: f32,
    pub y: f32,
}

impl Coordinates {
    pub const CENTRE: Coordinates = Coordinates { x: 50.0, y: 50.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same point, kept inside the playable `[2, 98]` box.
    pub fn clamped(self) -> Self {
        Self { x: self.x.clamp(PITCH_MIN, PITCH_MAX), y: self.y.clamp(PITCH_MIN, PITCH_MAX) }
    }

    pub fn in_bounds(&self) -> bool {
        (PITCH_MIN..=PITCH_MAX).contains(&self.x) && (PITCH_MIN..=PITCH_MAX).contains(&self.y)
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::CENTRE
    }
}

/// Sub-motion kinds composing an event (consumed by animation/commentary only).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SequenceKind {
    Pass,
    Carry,
    Dribble,
    Shot,
    Header,
    Block,
    Save,
    Cross,
    Tackle,
    Interception,
    Clearance,
    Foul,
    SetPiece,
    Restart,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SequenceAction {
    pub action: SequenceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<PlayerId>,
    pub ball_start: Coordinates,
    pub ball_end: Coordinates,
    pub duration_ms: u32,
}

/// Result of a shot-like attempt (open play, header, free kick, penalty).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShotOutcome {
    Goal,
    /// Held by the keeper.
    Saved,
    /// Saved over the bar, corner.
    TippedOver,
    /// Saved wide of the post, corner.
    ParriedWide,
    OffTarget,
    /// Charged down before release.
    Blocked,
    /// Blocked by a covering defender after release.
    BlockedOnLine,
}

impl ShotOutcome {
    pub fn is_on_target(self) -> bool {
        matches!(
            self,
            ShotOutcome::Goal | ShotOutcome::Saved | ShotOutcome::TippedOver | ShotOutcome::ParriedWide
        )
    }

    pub fn is_save(self) -> bool {
        matches!(self, ShotOutcome::Saved | ShotOutcome::TippedOver | ShotOutcome::ParriedWide)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FoulZone {
    PenaltyArea,
    Dangerous,
    Elsewhere,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CornerOutcome {
    ClaimedByKeeper,
    HeaderAttempt,
    Cleared,
}

/// Event type plus its typed outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    KickOff,
    Shot {
        outcome: ShotOutcome,
        #[serde(default)]
        free_kick: bool,
    },
    Header {
        outcome: ShotOutcome,
    },
    Penalty {
        outcome: ShotOutcome,
    },
    Corner {
        outcome: CornerOutcome,
    },
    Foul {
        zone: FoulZone,
    },
    YellowCard,
    SecondYellow,
    RedCard,
    FreeKick,
    GoalKick {
        retained: bool,
        short: bool,
    },
    ThrowIn,
    Offside,
    Tackle,
    Interception,
    Clearance {
        corner_conceded: bool,
    },
    Dribble,
    Substitution,
    Possession,
}

impl EventKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            EventKind::KickOff => "kick_off",
            EventKind::Shot { .. } => "shot",
            EventKind::Header { .. } => "header",
            EventKind::Penalty { .. } => "penalty",
            EventKind::Corner { .. } => "corner",
            EventKind::Foul { .. } => "foul",
            EventKind::YellowCard => "yellow_card",
            EventKind::SecondYellow => "second_yellow",
            EventKind::RedCard => "red_card",
            EventKind::FreeKick => "free_kick",
            EventKind::GoalKick { .. } => "goal_kick",
            EventKind::ThrowIn => "throw_in",
            EventKind::Offside => "offside",
            EventKind::Tackle => "tackle",
            EventKind::Interception => "interception",
            EventKind::Clearance { .. } => "clearance",
            EventKind::Dribble => "dribble",
            EventKind::Substitution => "substitution",
            EventKind::Possession => "possession",
        }
    }

    pub fn shot_outcome(&self) -> Option<ShotOutcome> {
        match self {
            EventKind::Shot { outcome, .. }
            | EventKind::Header { outcome }
            | EventKind::Penalty { outcome } => Some(*outcome),
            _ => None,
        }
    }

    pub fn is_goal(&self) -> bool {
        self.shot_outcome() == Some(ShotOutcome::Goal)
    }

    /// Dead-ball restarts; any of these forces the `set_piece` phase.
    pub fn is_set_piece(&self) -> bool {
        matches!(
            self,
            EventKind::Penalty { .. }
                | EventKind::Corner { .. }
                | EventKind::FreeKick
                | EventKind::GoalKick { .. }
                | EventKind::ThrowIn
        ) || matches!(self, EventKind::Shot { free_kick: true, .. })
    }

    /// Shot/cross/dribble-class events; these force the `attack_<side>` phase.
    pub fn is_attacking(&self) -> bool {
        matches!(self, EventKind::Shot { .. } | EventKind::Header { .. } | EventKind::Dribble)
    }

    pub fn is_card(&self) -> bool {
        matches!(self, EventKind::YellowCard | EventKind::SecondYellow | EventKind::RedCard)
    }

    /// Event types kept in persisted match timelines.
    pub fn is_key_event(&self) -> bool {
        self.is_goal()
            || self.is_card()
            || matches!(
                self,
                EventKind::Foul { .. } | EventKind::Corner { .. } | EventKind::Substitution
            )
    }
}

/// One discrete, immutable event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u8,
    #[serde(rename = "team")]
    pub side: Side,
    #[serde(flatten)]
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<PlayerId>,
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sequence: Vec<SequenceAction>,
}

impl MatchEvent {
    pub fn new(minute: u8, side: Side, kind: EventKind, coordinates: Coordinates) -> Self {
        Self { minute, side, kind, primary: None, secondary: None, coordinates, sequence: Vec::new() }
    }

    pub fn with_primary(mut self, player: Option<PlayerId>) -> Self {
        self.primary = player;
        self
    }

    pub fn with_secondary(mut self, player: Option<PlayerId>) -> Self {
        self.secondary = player;
        self
    }

    pub fn with_sequence(mut self, sequence: Vec<SequenceAction>) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn is_goal(&self) -> bool {
        self.kind.is_goal()
    }

    /// Every player id this event mentions, primary first.
    pub fn involved_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.primary
            .into_iter()
            .chain(self.secondary)
            .chain(self.sequence.iter().filter_map(|s| s.actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_flat_type_tag() {
        let event = MatchEvent::new(
            12,
            Side::Home,
            EventKind::Shot { outcome: ShotOutcome::Goal, free_kick: false },
            Coordinates::new(90.0, 48.0),
        )
        .with_primary(Some(9));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "shot");
        assert_eq!(value["outcome"], "goal");
        assert_eq!(value["team"], "home");
        assert_eq!(value["primary"], 9);
        assert!(value.get("sequence").is_none());

        let back: MatchEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_goal_detection() {
        assert!(EventKind::Penalty { outcome: ShotOutcome::Goal }.is_goal());
        assert!(EventKind::Header { outcome: ShotOutcome::Goal }.is_goal());
        assert!(!EventKind::Shot { outcome: ShotOutcome::Saved, free_kick: false }.is_goal());
        assert!(!EventKind::Corner { outcome: CornerOutcome::Cleared }.is_goal());
    }

    #[test]
    fn test_phase_classes() {
        assert!(EventKind::ThrowIn.is_set_piece());
        assert!(EventKind::Shot { outcome: ShotOutcome::OffTarget, free_kick: true }.is_set_piece());
        assert!(!EventKind::Shot { outcome: ShotOutcome::OffTarget, free_kick: false }.is_set_piece());
        assert!(EventKind::Dribble.is_attacking());
        assert!(!EventKind::Tackle.is_attacking());
    }

    #[test]
    fn test_key_event_filter() {
        assert!(EventKind::SecondYellow.is_key_event());
        assert!(EventKind::Substitution.is_key_event());
        assert!(EventKind::Foul { zone: FoulZone::Elsewhere }.is_key_event());
        assert!(!EventKind::Possession.is_key_event());
        assert!(!EventKind::Shot { outcome: ShotOutcome::Saved, free_kick: false }.is_key_event());
    }

    #[test]
    fn test_clamp() {
        let c = Coordinates::new(-4.0, 140.0).clamped();
        assert_eq!(c, Coordinates::new(2.0, 98.0));
        assert!(c.in_bounds());
    }
}
