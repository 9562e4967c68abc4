//! Pitch Zone
//!
//! Coarse thirds of the pitch, measured along the attacking direction of the
//! side in possession. Serialized as `"<third>_<side>"`, e.g. `"att_home"`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Third {
    Def,
    Mid,
    Att,
}

impl Third {
    fn as_str(self) -> &'static str {
        match self {
            Third::Def => "def",
            Third::Mid => "mid",
            Third::Att => "att",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Zone {
    pub third: Third,
    pub side: Side,
}

impl Zone {
    pub const KICKOFF: Zone = Zone { third: Third::Mid, side: Side::Home };

    /// Classify `ball_x` for the possessing side (home attacks toward x = 100).
    pub fn from_ball(ball_x: f32, possession: Side) -> Zone {
        let depth = match possession {
            Side::Home => ball_x,
            Side::Away => 100.0 - ball_x,
        };
        let third = if depth < 100.0 / 3.0 {
            Third::Def
        } else if depth < 200.0 / 3.0 {
            Third::Mid
        } else {
            Third::Att
        };
        Zone { third, side: possession }
    }

    /// "defence", "midfield" or "attack", for commentary.
    pub fn describe(&self) -> &'static str {
        match self.third {
            Third::Def => "defence",
            Third::Mid => "midfield",
            Third::Att => "attack",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.third.as_str(), self.side)
    }
}

impl From<Zone> for String {
    fn from(zone: Zone) -> Self {
        zone.to_string()
    }
}

impl TryFrom<String> for Zone {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (third, side) =
            value.split_once('_').ok_or_else(|| format!("invalid zone: {}", value))?;
        let third = match third {
            "def" => Third::Def,
            "mid" => Third::Mid,
            "att" => Third::Att,
            _ => return Err(format!("invalid zone third: {}", value)),
        };
        let side = match side {
            "home" => Side::Home,
            "away" => Side::Away,
            _ => return Err(format!("invalid zone side: {}", value)),
        };
        Ok(Zone { third, side })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_is_mirrored_by_side() {
        assert_eq!(Zone::from_ball(80.0, Side::Home).third, Third::Att);
        assert_eq!(Zone::from_ball(80.0, Side::Away).third, Third::Def);
        assert_eq!(Zone::from_ball(50.0, Side::Away).third, Third::Mid);
        assert_eq!(Zone::from_ball(10.0, Side::Away).third, Third::Att);
    }

    #[test]
    fn test_zone_string_form() {
        let zone = Zone::from_ball(90.0, Side::Home);
        assert_eq!(serde_json::to_string(&zone).unwrap(), "\"att_home\"");
        let back: Zone = serde_json::from_str("\"def_away\"").unwrap();
        assert_eq!(back, Zone { third: Third::Def, side: Side::Away });
        assert!(serde_json::from_str::<Zone>("\"box_home\"").is_err());
    }
}
