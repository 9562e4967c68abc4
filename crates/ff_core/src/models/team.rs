use super::{Player, Position};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Home or away. Home attacks toward `x = 100` for the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Home => 0,
            Side::Away => 1,
        }
    }

    pub fn is_home(self) -> bool {
        self == Side::Home
    }

    /// +1 when attacking toward x = 100, -1 otherwise.
    pub fn attack_direction(self) -> f32 {
        match self {
            Side::Home => 1.0,
            Side::Away => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A squad as supplied by the data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>, // 18-28 players
}

impl Team {
    pub fn player(&self, id: super::PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// One formation slot: a role label and its pitch coordinates (home frame, 0-100).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FormationSlot {
    pub position: Position,
    pub x: f32,
    pub y: f32,
}

impl FormationSlot {
    pub const fn new(position: Position, x: f32, y: f32) -> Self {
        Self { position, x, y }
    }
}

/// Named shape with eleven slots.
///
/// `slots` may be omitted in input; the shape is then resolved from `name`
/// against the built-in presets ("4-4-2", "4-3-3", "4-2-3-1", "3-5-2", "5-3-2").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Formation {
    pub name: String,
    #[serde(default)]
    pub slots: Vec<FormationSlot>,
}

pub const FORMATION_SIZE: usize = 11;

static DEFAULT_442: Lazy<Formation> = Lazy::new(|| {
    use Position::*;
    Formation {
        name: "4-4-2".to_string(),
        slots: vec![
            FormationSlot::new(GK, 5.0, 50.0),
            FormationSlot::new(LB, 20.0, 12.0),
            FormationSlot::new(CB, 20.0, 35.0),
            FormationSlot::new(CB, 20.0, 65.0),
            FormationSlot::new(RB, 20.0, 88.0),
            FormationSlot::new(LM, 45.0, 12.0),
            FormationSlot::new(CM, 45.0, 35.0),
            FormationSlot::new(CM, 45.0, 65.0),
            FormationSlot::new(RM, 45.0, 88.0),
            FormationSlot::new(ST, 75.0, 35.0),
            FormationSlot::new(ST, 75.0, 65.0),
        ],
    }
});

impl Formation {
    /// Built-in 4-4-2, used whenever a supplied shape is unusable.
    pub fn default_442() -> Formation {
        DEFAULT_442.clone()
    }

    /// Preset shape by name, `None` for unknown names.
    pub fn preset(name: &str) -> Option<Formation> {
        use Position::*;
        let slots = match name.trim() {
            "4-4-2" => return Some(Self::default_442()),
            "4-3-3" => vec![
                FormationSlot::new(GK, 5.0, 50.0),
                FormationSlot::new(LB, 20.0, 12.0),
                FormationSlot::new(CB, 20.0, 35.0),
                FormationSlot::new(CB, 20.0, 65.0),
                FormationSlot::new(RB, 20.0, 88.0),
                FormationSlot::new(CM, 42.0, 25.0),
                FormationSlot::new(CDM, 38.0, 50.0),
                FormationSlot::new(CM, 42.0, 75.0),
                FormationSlot::new(LW, 70.0, 15.0),
                FormationSlot::new(ST, 78.0, 50.0),
                FormationSlot::new(RW, 70.0, 85.0),
            ],
            "4-2-3-1" => vec![
                FormationSlot::new(GK, 5.0, 50.0),
                FormationSlot::new(LB, 20.0, 12.0),
                FormationSlot::new(CB, 20.0, 35.0),
                FormationSlot::new(CB, 20.0, 65.0),
                FormationSlot::new(RB, 20.0, 88.0),
                FormationSlot::new(CDM, 36.0, 38.0),
                FormationSlot::new(CDM, 36.0, 62.0),
                FormationSlot::new(LM, 58.0, 15.0),
                FormationSlot::new(CAM, 58.0, 50.0),
                FormationSlot::new(RM, 58.0, 85.0),
                FormationSlot::new(ST, 78.0, 50.0),
            ],
            "3-5-2" => vec![
                FormationSlot::new(GK, 5.0, 50.0),
                FormationSlot::new(CB, 20.0, 25.0),
                FormationSlot::new(CB, 18.0, 50.0),
                FormationSlot::new(CB, 20.0, 75.0),
                FormationSlot::new(LWB, 42.0, 8.0),
                FormationSlot::new(CM, 42.0, 32.0),
                FormationSlot::new(CDM, 36.0, 50.0),
                FormationSlot::new(CM, 42.0, 68.0),
                FormationSlot::new(RWB, 42.0, 92.0),
                FormationSlot::new(ST, 75.0, 35.0),
                FormationSlot::new(ST, 75.0, 65.0),
            ],
            "5-3-2" => vec![
                FormationSlot::new(GK, 5.0, 50.0),
                FormationSlot::new(LWB, 25.0, 8.0),
                FormationSlot::new(CB, 18.0, 28.0),
                FormationSlot::new(CB, 16.0, 50.0),
                FormationSlot::new(CB, 18.0, 72.0),
                FormationSlot::new(RWB, 25.0, 92.0),
                FormationSlot::new(CM, 42.0, 28.0),
                FormationSlot::new(CM, 42.0, 50.0),
                FormationSlot::new(CM, 42.0, 72.0),
                FormationSlot::new(ST, 75.0, 35.0),
                FormationSlot::new(ST, 75.0, 65.0),
            ],
            _ => return None,
        };
        Some(Formation { name: name.trim().to_string(), slots })
    }

    /// Eleven usable slots, either as supplied or from the named preset.
    pub fn resolved_slots(&self) -> Option<Vec<FormationSlot>> {
        if self.slots.len() == FORMATION_SIZE {
            return Some(self.slots.clone());
        }
        if self.slots.is_empty() {
            return Formation::preset(&self.name).map(|f| f.slots);
        }
        None
    }

    /// Count of (defenders, midfielders, forwards).
    pub fn get_positions(&self) -> (u8, u8, u8) {
        let slots = self.resolved_slots().unwrap_or_else(|| DEFAULT_442.slots.clone());
        slots.iter().fold((0, 0, 0), |(d, m, f), slot| {
            if slot.position.is_defender() {
                (d + 1, m, f)
            } else if slot.position.is_midfielder() {
                (d, m + 1, f)
            } else if slot.position.is_forward() {
                (d, m, f + 1)
            } else {
                (d, m, f)
            }
        })
    }
}

impl Default for Formation {
    fn default() -> Self {
        Self::default_442()
    }
}
