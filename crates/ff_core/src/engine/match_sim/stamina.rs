//! Fatigue Tracker
//!
//! 분당 피로 누적: base / effective stamina (stamina·0.7 + natural fitness·0.3)
//! - work rate 15 이상: ×1.15
//! - determination 15 이상: ×0.9
//! - 높은 pressing / tempo: 단계당 +5%
//!
//! Fatigue only rises (to a ceiling of 1.0); the only reset is a substitute
//! coming on fresh.

use super::match_state::MatchState;
use crate::engine::config::ConditionConfig;
use crate::models::{PlayerAttributes, PlayerId, Side};
use crate::tactics::{Tactic, TacticLevel};

pub const FATIGUE_MAX: f32 = 1.0;

/// Fatigue gained in one minute.
pub fn fatigue_rate(cfg: &ConditionConfig, attributes: &PlayerAttributes, tactic: &Tactic) -> f32 {
    let stamina = f32::from(attributes.stamina);
    let fitness = f32::from(attributes.natural_fitness);
    let effective = (stamina * cfg.stamina_weight + fitness * (1.0 - cfg.stamina_weight)).max(1.0);

    let mut rate = cfg.fatigue_base_rate / effective;
    if attributes.work_rate >= cfg.high_attribute_threshold {
        rate *= cfg.work_rate_multiplier;
    }
    if attributes.determination >= cfg.high_attribute_threshold {
        rate *= cfg.determination_multiplier;
    }

    let pressing = tactic.pressing.level_f32();
    if pressing > 0.0 {
        rate *= 1.0 + cfg.pressing_per_level * pressing;
    }
    let tempo = tactic.tempo.level_f32();
    if tempo > 0.0 {
        rate *= 1.0 + cfg.tempo_per_level * tempo;
    }
    rate
}

impl MatchState {
    /// One minute of fatigue for every player on the pitch.
    pub fn accumulate_fatigue(&mut self) {
        let mut gains: Vec<(PlayerId, f32)> = Vec::with_capacity(22);
        for side in Side::BOTH {
            let tactic = self.tactic(side);
            for id in self.available_players(side) {
                if let Some(player) = self.players.get(&id) {
                    gains.push((id, fatigue_rate(&self.config.condition, &player.attributes, tactic)));
                }
            }
        }
        for (id, gain) in gains {
            if let Some(ps) = self.player_states.get_mut(&id) {
                ps.fatigue = (ps.fatigue + gain).clamp(0.0, FATIGUE_MAX);
            }
        }
    }
}
