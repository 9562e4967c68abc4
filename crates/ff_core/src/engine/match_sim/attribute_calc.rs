//! Effective Attribute Resolver
//!
//! 선수의 기본 능력치에 다섯 단계 보정을 순서대로 곱한다:
//! 1. **Fatigue** - 60분 이후에만 `1 - fatigue * 0.25`
//! 2. **Morale** - 5.0 미만 5%→12% 페널티, 7.0 초과 0%→9% 보너스
//! 3. **Home/Away** - 홈 +3%, 원정은 정신 능력치 일부 -2%
//! 4. **Position mismatch** - tier 페널티 × 능력치 분류 스케일
//! 5. **Tactic** - mentality / pressing / tempo / width / flags / creative freedom
//!
//! Result is floored at 1.0. Everything here is a pure read of [`MatchState`].

use super::match_state::MatchState;
use crate::engine::config::ConditionConfig;
use crate::models::{
    Attribute, AttributeClass, PlayerId, Position, Side, NEUTRAL_ATTRIBUTE,
};
use crate::tactics::{Tactic, TacticLevel};

pub const ATTRIBUTE_FLOOR: f32 = 1.0;

const HOME_BONUS: f32 = 1.03;
const AWAY_MENTAL_PENALTY: f32 = 0.98;

// ============================================================================
// Layer functions
// ============================================================================

/// Fatigue layer; inactive until `fatigue_active_after`.
pub fn fatigue_multiplier(cfg: &ConditionConfig, minute: u8, fatigue: f32) -> f32 {
    if minute <= cfg.fatigue_active_after {
        return 1.0;
    }
    1.0 - fatigue.clamp(0.0, 1.0) * cfg.fatigue_attribute_penalty
}

/// Morale layer. 7.0 is neutral; 5.0..=7.0 is a dead band.
pub fn morale_multiplier(morale: f32) -> f32 {
    let m = morale.clamp(1.0, 10.0);
    if m < 5.0 {
        1.0 - (0.05 + (5.0 - m) / 4.0 * 0.07)
    } else if m > 7.0 {
        1.0 + (m - 7.0) / 3.0 * 0.09
    } else {
        1.0
    }
}

pub fn venue_multiplier(side: Side, attr: Attribute) -> f32 {
    match side {
        Side::Home => HOME_BONUS,
        Side::Away if attr.is_away_sensitive() => AWAY_MENTAL_PENALTY,
        Side::Away => 1.0,
    }
}

pub fn mismatch_multiplier(natural: Position, assigned: Position, attr: Attribute) -> f32 {
    let scale = match attr.class() {
        AttributeClass::Physical => 0.3,
        AttributeClass::Mental => 0.6,
        AttributeClass::Technical | AttributeClass::Goalkeeping => 1.0,
    };
    1.0 - natural.mismatch_tier(assigned).base_penalty() * scale
}

/// Tactic layer for a player assigned to `position`.
pub fn tactic_multiplier(tactic: &Tactic, position: Position, attr: Attribute) -> f32 {
    let mut m = 1.0;

    let mentality = tactic.mentality.level_f32();
    if attr.is_attacking() {
        m *= 1.0 + 0.03 * mentality;
    }
    if attr.is_defensive() {
        m *= 1.0 - 0.03 * mentality;
    }

    let pressing = tactic.pressing.level_f32();
    if matches!(attr, Attribute::Aggression | Attribute::WorkRate) {
        m *= 1.0 + 0.02 * pressing;
    }

    let tempo = tactic.tempo.level_f32();
    match attr {
        Attribute::Pace | Attribute::Acceleration => m *= 1.0 + 0.02 * tempo,
        Attribute::Passing => m *= 1.0 - 0.015 * tempo,
        _ => {}
    }

    if position.is_wide()
        && matches!(attr, Attribute::Crossing | Attribute::Dribbling | Attribute::Pace)
    {
        m *= 1.0 + 0.03 * tactic.width.level_f32();
    }

    if tactic.tackle_harder {
        match attr {
            Attribute::Tackling => m *= 1.05,
            Attribute::Aggression => m *= 1.10,
            _ => {}
        }
    }
    if tactic.stay_on_feet {
        match attr {
            Attribute::Tackling => m *= 0.95,
            Attribute::Aggression => m *= 0.85,
            _ => {}
        }
    }
    if tactic.play_out_of_defence
        && (position.is_defender() || position.is_goalkeeper())
        && matches!(attr, Attribute::Passing | Attribute::FirstTouch | Attribute::Composure)
    {
        m *= 1.05;
    }

    let freedom = tactic.creative_freedom.level_f32();
    match attr {
        Attribute::Flair => m *= 1.0 + 0.05 * freedom,
        Attribute::Vision => m *= 1.0 + 0.02 * freedom,
        _ => {}
    }

    m
}

// ============================================================================
// MatchState API
// ============================================================================

impl MatchState {
    /// Effective value of `attr` for `id` after the five modifier layers.
    ///
    /// Unknown players resolve to the neutral 10.0.
    pub fn effective(&self, id: PlayerId, attr: Attribute) -> f32 {
        let (Some(player), Some(ps)) = (self.players.get(&id), self.player_states.get(&id)) else {
            return NEUTRAL_ATTRIBUTE;
        };
        let base = f32::from(player.attributes.get(attr));

        let value = base
            * fatigue_multiplier(&self.config.condition, self.minute, ps.fatigue)
            * morale_multiplier(ps.morale)
            * venue_multiplier(ps.side, attr)
            * mismatch_multiplier(player.position, ps.position, attr)
            * tactic_multiplier(self.tactic(ps.side), ps.position, attr);

        value.max(ATTRIBUTE_FLOOR)
    }

    /// Name-keyed variant of [`effective`](Self::effective); unknown names give 10.0.
    pub fn effective_by_name(&self, id: PlayerId, name: &str) -> f32 {
        match name.parse::<Attribute>() {
            Ok(attr) => self.effective(id, attr),
            Err(_) => NEUTRAL_ATTRIBUTE,
        }
    }

    /// Mean of several effective attributes.
    pub fn effective_avg(&self, id: PlayerId, attrs: &[Attribute]) -> f32 {
        if attrs.is_empty() {
            return NEUTRAL_ATTRIBUTE;
        }
        attrs.iter().map(|&a| self.effective(id, a)).sum::<f32>() / attrs.len() as f32
    }

    /// Goalkeeper attribute for `side`, neutral when no keeper is on the pitch.
    pub fn keeper_effective(&self, side: Side, attr: Attribute) -> f32 {
        self.goalkeeper(side).map(|gk| self.effective(gk, attr)).unwrap_or(NEUTRAL_ATTRIBUTE)
    }
}
