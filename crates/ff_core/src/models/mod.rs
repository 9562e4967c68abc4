pub mod events;
pub mod match_setup;
pub mod match_statistics;
pub mod player;
pub mod team;

pub use events::{
    Coordinates, CornerOutcome, EventKind, FoulZone, MatchEvent, SequenceAction, SequenceKind,
    ShotOutcome, PITCH_MAX, PITCH_MIN,
};
pub use match_setup::{validate_source, LineupEntry, MatchInput, MatchSource, TeamSheet};
pub use match_statistics::{MatchStats, Score, TeamStats};
pub use player::{
    Attribute, AttributeClass, MismatchTier, Player, PlayerAttributes, PlayerId, Position,
    NEUTRAL_ATTRIBUTE,
};
pub use team::{Formation, FormationSlot, Side, Team, FORMATION_SIZE};
