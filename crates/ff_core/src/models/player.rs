use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable player identifier, unique across both squads of a match.
pub type PlayerId = u32;

/// Neutral attribute value used whenever a lookup cannot be resolved.
pub const NEUTRAL_ATTRIBUTE: f32 = 10.0;

/// Player data consumed by the match engine (read-only during a match).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Natural (primary) position.
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shirt_number: Option<u8>,
    #[serde(default)]
    pub attributes: PlayerAttributes,
}

impl Player {
    /// Single "current ability" score used for lineup auto-selection and
    /// substitute ranking.
    pub fn current_ability(&self) -> f32 {
        self.attributes.current_ability
    }
}

// ===========================================
// Attributes
// ===========================================

/// Static 1-20 skill ratings, grouped technical / mental / physical /
/// goalkeeping. Missing fields deserialize to the neutral value 10.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerAttributes {
    // Technical
    pub corners: u8,
    pub crossing: u8,
    pub dribbling: u8,
    pub finishing: u8,
    pub first_touch: u8,
    pub free_kick_taking: u8,
    pub heading: u8,
    pub long_shots: u8,
    pub long_throws: u8,
    pub marking: u8,
    pub passing: u8,
    pub penalty_taking: u8,
    pub tackling: u8,
    pub technique: u8,
    // Mental
    pub aggression: u8,
    pub anticipation: u8,
    pub bravery: u8,
    pub composure: u8,
    pub concentration: u8,
    pub decisions: u8,
    pub determination: u8,
    pub flair: u8,
    pub leadership: u8,
    pub off_the_ball: u8,
    pub positioning: u8,
    pub teamwork: u8,
    pub vision: u8,
    pub work_rate: u8,
    // Physical
    pub acceleration: u8,
    pub agility: u8,
    pub balance: u8,
    pub jumping_reach: u8,
    pub natural_fitness: u8,
    pub pace: u8,
    pub stamina: u8,
    pub strength: u8,
    // Goalkeeping
    pub aerial_reach: u8,
    pub command_of_area: u8,
    pub communication: u8,
    pub eccentricity: u8,
    pub handling: u8,
    pub kicking: u8,
    pub one_on_ones: u8,
    pub reflexes: u8,
    pub rushing_out: u8,
    pub throwing: u8,
    /// Overall ability (1-200 scale).
    pub current_ability: f32,
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl PlayerAttributes {
    /// Every rating set to `value`, current ability scaled to match.
    pub fn uniform(value: u8) -> Self {
        let v = value;
        Self {
            corners: v,
            crossing: v,
            dribbling: v,
            finishing: v,
            first_touch: v,
            free_kick_taking: v,
            heading: v,
            long_shots: v,
            long_throws: v,
            marking: v,
            passing: v,
            penalty_taking: v,
            tackling: v,
            technique: v,
            aggression: v,
            anticipation: v,
            bravery: v,
            composure: v,
            concentration: v,
            decisions: v,
            determination: v,
            flair: v,
            leadership: v,
            off_the_ball: v,
            positioning: v,
            teamwork: v,
            vision: v,
            work_rate: v,
            acceleration: v,
            agility: v,
            balance: v,
            jumping_reach: v,
            natural_fitness: v,
            pace: v,
            stamina: v,
            strength: v,
            aerial_reach: v,
            command_of_area: v,
            communication: v,
            eccentricity: v,
            handling: v,
            kicking: v,
            one_on_ones: v,
            reflexes: v,
            rushing_out: v,
            throwing: v,
            current_ability: f32::from(v) * 10.0,
        }
    }

    /// Raw rating for a typed attribute.
    pub fn get(&self, attr: Attribute) -> u8 {
        use Attribute::*;
        match attr {
            Corners => self.corners,
            Crossing => self.crossing,
            Dribbling => self.dribbling,
            Finishing => self.finishing,
            FirstTouch => self.first_touch,
            FreeKickTaking => self.free_kick_taking,
            Heading => self.heading,
            LongShots => self.long_shots,
            LongThrows => self.long_throws,
            Marking => self.marking,
            Passing => self.passing,
            PenaltyTaking => self.penalty_taking,
            Tackling => self.tackling,
            Technique => self.technique,
            Aggression => self.aggression,
            Anticipation => self.anticipation,
            Bravery => self.bravery,
            Composure => self.composure,
            Concentration => self.concentration,
            Decisions => self.decisions,
            Determination => self.determination,
            Flair => self.flair,
            Leadership => self.leadership,
            OffTheBall => self.off_the_ball,
            Positioning => self.positioning,
            Teamwork => self.teamwork,
            Vision => self.vision,
            WorkRate => self.work_rate,
            Acceleration => self.acceleration,
            Agility => self.agility,
            Balance => self.balance,
            JumpingReach => self.jumping_reach,
            NaturalFitness => self.natural_fitness,
            Pace => self.pace,
            Stamina => self.stamina,
            Strength => self.strength,
            AerialReach => self.aerial_reach,
            CommandOfArea => self.command_of_area,
            Communication => self.communication,
            Eccentricity => self.eccentricity,
            Handling => self.handling,
            Kicking => self.kicking,
            OneOnOnes => self.one_on_ones,
            Reflexes => self.reflexes,
            RushingOut => self.rushing_out,
            Throwing => self.throwing,
        }
    }

    /// Lookup by snake_case name. Unknown names resolve to the neutral 10.0.
    pub fn value_by_name(&self, name: &str) -> f32 {
        name.parse::<Attribute>()
            .map(|attr| f32::from(self.get(attr)))
            .unwrap_or(NEUTRAL_ATTRIBUTE)
    }
}

/// Attribute family; drives how strongly a position mismatch bites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeClass {
    Technical,
    Mental,
    Physical,
    Goalkeeping,
}

/// Typed attribute key. Replaces string lookups inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Corners,
    Crossing,
    Dribbling,
    Finishing,
    FirstTouch,
    FreeKickTaking,
    Heading,
    LongShots,
    LongThrows,
    Marking,
    Passing,
    PenaltyTaking,
    Tackling,
    Technique,
    Aggression,
    Anticipation,
    Bravery,
    Composure,
    Concentration,
    Decisions,
    Determination,
    Flair,
    Leadership,
    OffTheBall,
    Positioning,
    Teamwork,
    Vision,
    WorkRate,
    Acceleration,
    Agility,
    Balance,
    JumpingReach,
    NaturalFitness,
    Pace,
    Stamina,
    Strength,
    AerialReach,
    CommandOfArea,
    Communication,
    Eccentricity,
    Handling,
    Kicking,
    OneOnOnes,
    Reflexes,
    RushingOut,
    Throwing,
}

impl Attribute {
    pub const ALL: [Attribute; 46] = {
        use Attribute::*;
        [
            Corners, Crossing, Dribbling, Finishing, FirstTouch, FreeKickTaking, Heading,
            LongShots, LongThrows, Marking, Passing, PenaltyTaking, Tackling, Technique,
            Aggression, Anticipation, Bravery, Composure, Concentration, Decisions,
            Determination, Flair, Leadership, OffTheBall, Positioning, Teamwork, Vision,
            WorkRate, Acceleration, Agility, Balance, JumpingReach, NaturalFitness, Pace,
            Stamina, Strength, AerialReach, CommandOfArea, Communication, Eccentricity,
            Handling, Kicking, OneOnOnes, Reflexes, RushingOut, Throwing,
        ]
    };

    pub fn class(self) -> AttributeClass {
        use Attribute::*;
        match self {
            Corners | Crossing | Dribbling | Finishing | FirstTouch | FreeKickTaking | Heading
            | LongShots | LongThrows | Marking | Passing | PenaltyTaking | Tackling
            | Technique => AttributeClass::Technical,
            Aggression | Anticipation | Bravery | Composure | Concentration | Decisions
            | Determination | Flair | Leadership | OffTheBall | Positioning | Teamwork | Vision
            | WorkRate => AttributeClass::Mental,
            Acceleration | Agility | Balance | JumpingReach | NaturalFitness | Pace | Stamina
            | Strength => AttributeClass::Physical,
            AerialReach | CommandOfArea | Communication | Eccentricity | Handling | Kicking
            | OneOnOnes | Reflexes | RushingOut | Throwing => AttributeClass::Goalkeeping,
        }
    }

    pub fn as_str(self) -> &'static str {
        use Attribute::*;
        match self {
            Corners => "corners",
            Crossing => "crossing",
            Dribbling => "dribbling",
            Finishing => "finishing",
            FirstTouch => "first_touch",
            FreeKickTaking => "free_kick_taking",
            Heading => "heading",
            LongShots => "long_shots",
            LongThrows => "long_throws",
            Marking => "marking",
            Passing => "passing",
            PenaltyTaking => "penalty_taking",
            Tackling => "tackling",
            Technique => "technique",
            Aggression => "aggression",
            Anticipation => "anticipation",
            Bravery => "bravery",
            Composure => "composure",
            Concentration => "concentration",
            Decisions => "decisions",
            Determination => "determination",
            Flair => "flair",
            Leadership => "leadership",
            OffTheBall => "off_the_ball",
            Positioning => "positioning",
            Teamwork => "teamwork",
            Vision => "vision",
            WorkRate => "work_rate",
            Acceleration => "acceleration",
            Agility => "agility",
            Balance => "balance",
            JumpingReach => "jumping_reach",
            NaturalFitness => "natural_fitness",
            Pace => "pace",
            Stamina => "stamina",
            Strength => "strength",
            AerialReach => "aerial_reach",
            CommandOfArea => "command_of_area",
            Communication => "communication",
            Eccentricity => "eccentricity",
            Handling => "handling",
            Kicking => "kicking",
            OneOnOnes => "one_on_ones",
            Reflexes => "reflexes",
            RushingOut => "rushing_out",
            Throwing => "throwing",
        }
    }

    /// Attributes that suffer the away-side composure penalty.
    pub fn is_away_sensitive(self) -> bool {
        matches!(
            self,
            Attribute::Composure
                | Attribute::Concentration
                | Attribute::Decisions
                | Attribute::Teamwork
                | Attribute::Determination
        )
    }

    /// Boosted by attacking mentality, dampened by defensive mentality.
    pub fn is_attacking(self) -> bool {
        matches!(
            self,
            Attribute::Finishing
                | Attribute::LongShots
                | Attribute::Dribbling
                | Attribute::Crossing
                | Attribute::OffTheBall
                | Attribute::Flair
        )
    }

    /// Boosted by defensive mentality, dampened by attacking mentality.
    pub fn is_defensive(self) -> bool {
        matches!(
            self,
            Attribute::Tackling
                | Attribute::Marking
                | Attribute::Positioning
                | Attribute::Concentration
        )
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Attribute::ALL
            .iter()
            .copied()
            .find(|attr| attr.as_str() == key)
            .ok_or_else(|| format!("unknown attribute: {}", s))
    }
}

// ===========================================
// Positions
// ===========================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    LB,
    CB,
    RB,
    LWB,
    RWB,
    #[serde(alias = "DM")]
    CDM,
    CM,
    #[serde(alias = "AM")]
    CAM,
    LM,
    RM,
    LW,
    RW,
    CF,
    ST,
}

/// How far an assigned slot is from a player's natural position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MismatchTier {
    Natural,
    Compatible,
    Stretched,
    Major,
    Goalkeeper,
}

impl MismatchTier {
    /// Base penalty before the attribute-class scale is applied.
    pub fn base_penalty(self) -> f32 {
        match self {
            MismatchTier::Natural => 0.0,
            MismatchTier::Compatible => 0.05,
            MismatchTier::Stretched => 0.15,
            MismatchTier::Major => 0.30,
            MismatchTier::Goalkeeper => 0.50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Goal,
    Defence,
    Midfield,
    Attack,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    pub fn is_defender(&self) -> bool {
        matches!(
            self,
            Position::LB | Position::CB | Position::RB | Position::LWB | Position::RWB
        )
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(
            self,
            Position::CDM | Position::CM | Position::CAM | Position::LM | Position::RM
        )
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::LW | Position::RW | Position::CF | Position::ST)
    }

    /// Flank positions, the only ones affected by tactical width.
    pub fn is_wide(&self) -> bool {
        matches!(
            self,
            Position::LB
                | Position::RB
                | Position::LWB
                | Position::RWB
                | Position::LM
                | Position::RM
                | Position::LW
                | Position::RW
        )
    }

    fn line(&self) -> Line {
        if self.is_goalkeeper() {
            Line::Goal
        } else if self.is_defender() {
            Line::Defence
        } else if self.is_midfielder() {
            Line::Midfield
        } else {
            Line::Attack
        }
    }

    /// Adjacent roles that a player can cover without a real drop-off.
    pub fn is_compatible_position(&self, target: Position) -> bool {
        match (self, target) {
            (a, b) if *a == b => true,
            (Position::GK, _) | (_, Position::GK) => false,

            (Position::CB, Position::CDM) | (Position::CDM, Position::CB) => true,
            (Position::LB, Position::LWB) | (Position::LWB, Position::LB) => true,
            (Position::RB, Position::RWB) | (Position::RWB, Position::RB) => true,
            (Position::LB, Position::LM) | (Position::LM, Position::LB) => true,
            (Position::RB, Position::RM) | (Position::RM, Position::RB) => true,
            (Position::LWB, Position::LM) | (Position::LM, Position::LWB) => true,
            (Position::RWB, Position::RM) | (Position::RM, Position::RWB) => true,

            (Position::CDM, Position::CM) | (Position::CM, Position::CDM) => true,
            (Position::CM, Position::CAM) | (Position::CAM, Position::CM) => true,
            (Position::CAM, Position::CF) | (Position::CF, Position::CAM) => true,
            (Position::LM, Position::LW) | (Position::LW, Position::LM) => true,
            (Position::RM, Position::RW) | (Position::RW, Position::RM) => true,

            (Position::CF, Position::ST) | (Position::ST, Position::CF) => true,
            _ => false,
        }
    }

    /// Tier of mismatch when a player with this natural position plays `assigned`.
    pub fn mismatch_tier(&self, assigned: Position) -> MismatchTier {
        if *self == assigned {
            return MismatchTier::Natural;
        }
        if self.is_goalkeeper() != assigned.is_goalkeeper() {
            return MismatchTier::Goalkeeper;
        }
        if self.is_compatible_position(assigned) {
            return MismatchTier::Compatible;
        }
        let gap = (self.line() as i8 - assigned.line() as i8).abs();
        if gap <= 1 {
            MismatchTier::Stretched
        } else {
            MismatchTier::Major
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::LB => "LB",
            Position::CB => "CB",
            Position::RB => "RB",
            Position::LWB => "LWB",
            Position::RWB => "RWB",
            Position::CDM => "CDM",
            Position::CM => "CM",
            Position::CAM => "CAM",
            Position::LM => "LM",
            Position::RM => "RM",
            Position::LW => "LW",
            Position::RW => "RW",
            Position::CF => "CF",
            Position::ST => "ST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GK" | "G" => Ok(Position::GK),
            "LB" | "DL" => Ok(Position::LB),
            "CB" | "DC" => Ok(Position::CB),
            "RB" | "DR" => Ok(Position::RB),
            "LWB" | "WBL" => Ok(Position::LWB),
            "RWB" | "WBR" => Ok(Position::RWB),
            "CDM" | "DM" | "DMC" => Ok(Position::CDM),
            "CM" | "MC" => Ok(Position::CM),
            "CAM" | "AM" | "AMC" => Ok(Position::CAM),
            "LM" | "ML" => Ok(Position::LM),
            "RM" | "MR" => Ok(Position::RM),
            "LW" | "AML" => Ok(Position::LW),
            "RW" | "AMR" => Ok(Position::RW),
            "CF" => Ok(Position::CF),
            "ST" | "STC" | "FW" => Ok(Position::ST),
            _ => Err(format!("Unknown position: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_attribute_is_neutral() {
        let attrs = PlayerAttributes::uniform(17);
        assert_eq!(attrs.value_by_name("finishing"), 17.0);
        assert_eq!(attrs.value_by_name("Off_The_Ball"), 17.0);
        assert_eq!(attrs.value_by_name("shooting_power"), NEUTRAL_ATTRIBUTE);
    }

    #[test]
    fn test_attribute_names_round_trip() {
        for attr in Attribute::ALL {
            assert_eq!(attr.as_str().parse::<Attribute>(), Ok(attr));
        }
    }

    #[test]
    fn test_missing_fields_default_to_ten() {
        let attrs: PlayerAttributes = serde_json::from_str(r#"{"finishing": 18}"#).unwrap();
        assert_eq!(attrs.finishing, 18);
        assert_eq!(attrs.reflexes, 10);
    }

    #[test]
    fn test_attribute_classes() {
        assert_eq!(Attribute::Finishing.class(), AttributeClass::Technical);
        assert_eq!(Attribute::Decisions.class(), AttributeClass::Mental);
        assert_eq!(Attribute::Pace.class(), AttributeClass::Physical);
        assert_eq!(Attribute::Reflexes.class(), AttributeClass::Goalkeeping);
    }

    #[test]
    fn test_mismatch_tiers() {
        assert_eq!(Position::CB.mismatch_tier(Position::CB), MismatchTier::Natural);
        assert_eq!(Position::CB.mismatch_tier(Position::CDM), MismatchTier::Compatible);
        assert_eq!(Position::CB.mismatch_tier(Position::CM), MismatchTier::Stretched);
        assert_eq!(Position::CB.mismatch_tier(Position::ST), MismatchTier::Major);
        assert_eq!(Position::ST.mismatch_tier(Position::GK), MismatchTier::Goalkeeper);
        assert_eq!(Position::GK.mismatch_tier(Position::CB), MismatchTier::Goalkeeper);
    }

    #[test]
    fn test_position_aliases() {
        assert_eq!("dm".parse::<Position>(), Ok(Position::CDM));
        assert_eq!("AMC".parse::<Position>(), Ok(Position::CAM));
        assert!("XX".parse::<Position>().is_err());
        let pos: Position = serde_json::from_str("\"AM\"").unwrap();
        assert_eq!(pos, Position::CAM);
    }

    #[test]
    fn test_wide_positions() {
        assert!(Position::LW.is_wide());
        assert!(Position::RB.is_wide());
        assert!(!Position::CM.is_wide());
        assert!(!Position::GK.is_wide());
    }
}
