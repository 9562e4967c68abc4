//! Substitution Manager
//!
//! 60분 이후, 팀별로 매 분 8% 확률, 최대 5회.
//! - OUT: 가장 지친 출전 가능 필드 플레이어 (동률이면 라인업 순서)
//! - IN: 배정 포지션과 호환되는 벤치 선수 중 current ability 최고,
//!   없으면 벤치 전체에서 최고
//! - 교체 투입 선수 피로 0, 교체 아웃은 terminal + 사기 -0.3
//! - 세트피스 키커였다면 키커 재지정

use rand::Rng;

use super::match_state::{MatchState, SubstitutionRecord};
use super::MatchEngine;
use crate::models::{EventKind, PlayerId, Side};

impl MatchState {
    /// Most fatigued available outfield player; earliest in lineup order on ties.
    pub fn substitution_candidate(&self, side: Side) -> Option<PlayerId> {
        self.available_outfield(side)
            .into_iter()
            .filter_map(|id| self.player_state(id).map(|ps| (id, ps.fatigue)))
            .fold(None, |acc: Option<(PlayerId, f32)>, (id, f)| match acc {
                Some((_, best)) if best >= f => acc,
                _ => Some((id, f)),
            })
            .map(|(id, _)| id)
    }

    /// Best bench replacement for a player assigned to `outgoing`'s position.
    pub fn best_replacement(&self, side: Side, outgoing: PlayerId) -> Option<PlayerId> {
        let position = self.assigned_position(outgoing);
        let bench: Vec<PlayerId> =
            self.side(side).bench.iter().copied().filter(|&id| self.is_available(id)).collect();

        let best = |ids: &mut dyn Iterator<Item = PlayerId>| -> Option<PlayerId> {
            ids.filter_map(|id| self.player(id).map(|p| (id, p.current_ability())))
                .fold(None, |acc: Option<(PlayerId, f32)>, (id, ca)| match acc {
                    Some((_, b)) if b >= ca => acc,
                    _ => Some((id, ca)),
                })
                .map(|(id, _)| id)
        };

        let natural = |id: PlayerId| self.player(id).map(|p| p.position);
        let mut compatible = bench
            .iter()
            .copied()
            .filter(|&id| natural(id).is_some_and(|p| p.is_compatible_position(position)));
        // Outfield slots only fall back to a keeper when nobody else is left
        let mut same_line = bench
            .iter()
            .copied()
            .filter(|&id| natural(id).is_some_and(|p| p.is_goalkeeper() == position.is_goalkeeper()));
        best(&mut compatible)
            .or_else(|| best(&mut same_line))
            .or_else(|| best(&mut bench.iter().copied()))
    }

    /// Swap `off` for `on` in `off`'s lineup slot and record it.
    pub fn apply_substitution(&mut self, side: Side, off: PlayerId, on: PlayerId) -> Option<SubstitutionRecord> {
        let slot = self.side(side).lineup.iter().position(|&id| id == off)?;
        let position = self.assigned_position(off);
        let penalty = self.config.condition.deltas.subbed_off;
        let minute = self.minute;

        if let Some(ps) = self.player_states.get_mut(&off) {
            ps.subbed_off = true;
        }
        self.adjust_morale(off, penalty);
        if let Some(ps) = self.player_states.get_mut(&on) {
            ps.fatigue = 0.0;
            ps.position = position;
        }

        let record = SubstitutionRecord { minute, player_off: off, player_on: on, position };
        let side_state = self.side_mut(side);
        side_state.lineup[slot] = on;
        side_state.bench.retain(|&id| id != on);
        side_state.substitutions.push(record);

        if self.side(side).set_piece_takers.holds_role(off) {
            self.refresh_set_piece_takers(side);
        }
        Some(record)
    }
}

impl<R: Rng> MatchEngine<R> {
    /// Per-minute substitution check for `side`.
    pub(crate) fn consider_substitution(&mut self, side: Side) {
        let cfg = self.state.config.substitution.clone();
        if self.state.minute < cfg.earliest_minute
            || self.state.substitutions_made(side) >= usize::from(cfg.max_per_side)
        {
            return;
        }
        if !self.chance(cfg.chance_per_minute) {
            return;
        }

        let Some(off) = self.state.substitution_candidate(side) else {
            return;
        };
        let Some(on) = self.state.best_replacement(side, off) else {
            return;
        };
        let Some(record) = self.state.apply_substitution(side, off, on) else {
            return;
        };

        log::debug!(
            "{}' substitution {}: {} -> {} ({})",
            record.minute,
            side,
            self.state.player_name(off),
            self.state.player_name(on),
            record.position.as_str()
        );
        let event = self
            .event(side, EventKind::Substitution)
            .with_primary(Some(on))
            .with_secondary(Some(off));
        self.emit(event);
    }
}
