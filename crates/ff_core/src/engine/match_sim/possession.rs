//! Possession Resolver
//!
//! 매 분(킥오프 제외) 점유 팀을 결정한다.
//! 1. 현재 점유 팀의 keep rate = 80 + tempo + directness + mentality
//!    + 상대 pressing + 홈 보너스
//! 2. 1..=100 롤이 keep rate 이하이면 점유 유지
//! 3. 아니면 양 팀 possession quality 비율로 재배정 (같은 팀이 다시 가져갈 수 있음)

use rand::Rng;

use super::match_state::MatchState;
use super::MatchEngine;
use crate::engine::config::FlowConfig;
use crate::models::{Attribute, Side, NEUTRAL_ATTRIBUTE};
use crate::tactics::{Tactic, TacticLevel};

/// Attribute weights of the possession-quality figure.
pub const POSSESSION_QUALITY_WEIGHTS: [(Attribute, f32); 6] = [
    (Attribute::Passing, 0.25),
    (Attribute::Technique, 0.20),
    (Attribute::Vision, 0.15),
    (Attribute::FirstTouch, 0.15),
    (Attribute::Composure, 0.15),
    (Attribute::Decisions, 0.10),
];

fn table(values: &[f32; 5], level: i8) -> f32 {
    values[(i32::from(level) + 2).clamp(0, 4) as usize]
}

/// Keep rate (percent) of the side currently holding the ball.
pub fn keep_rate(flow: &FlowConfig, holder: &Tactic, opponent: &Tactic, holder_is_home: bool) -> f32 {
    let mut rate = flow.keep_rate_base;
    rate += table(&flow.tempo_keep, holder.tempo.level());
    rate += table(&flow.directness_keep, holder.passing_directness.level());
    rate += table(&flow.mentality_keep, holder.mentality.level());
    rate += table(&flow.opponent_pressing_keep, opponent.pressing.level());
    if holder_is_home {
        rate += flow.home_keep_bonus;
    }
    rate.clamp(0.0, 100.0)
}

impl MatchState {
    /// Weighted ball-retention quality averaged over the available players of `side`.
    pub fn possession_quality(&self, side: Side) -> f32 {
        let players = self.available_players(side);
        if players.is_empty() {
            return NEUTRAL_ATTRIBUTE;
        }
        let total: f32 = players
            .iter()
            .map(|&id| {
                POSSESSION_QUALITY_WEIGHTS
                    .iter()
                    .map(|&(attr, w)| self.effective(id, attr) * w)
                    .sum::<f32>()
            })
            .sum();
        total / players.len() as f32
    }
}

impl<R: Rng> MatchEngine<R> {
    /// Keep-or-reassign roll for the current minute.
    pub(crate) fn resolve_possession(&mut self) {
        let holder = self.state.possession;
        let rate = keep_rate(
            &self.state.config.flow,
            self.state.tactic(holder),
            self.state.tactic(holder.opponent()),
            holder.is_home(),
        );

        let roll = self.rng.gen_range(1..=100) as f32;
        if roll <= rate {
            return;
        }

        let home = self.state.possession_quality(Side::Home);
        let away = self.state.possession_quality(Side::Away);
        let p_home = if home + away > 0.0 { home / (home + away) } else { 0.5 };
        let next = if self.rng.gen::<f32>() < p_home { Side::Home } else { Side::Away };

        if next != holder {
            log::trace!("{}' possession {} -> {}", self.state.minute, holder, next);
        }
        self.state.possession = next;
    }
}
