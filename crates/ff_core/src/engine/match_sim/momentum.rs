//! Morale Tracker
//!
//! 사기(morale)는 1.0..=10.0, 중립 7.0.
//! - 이벤트 기반 변화: 골 +1.5, 도움 +1.0, 실점 -0.3, 경고 -0.8, 퇴장 -2.0 ...
//! - 팀 단위 변화는 leadership 15 이상인 선수에게 15% 감쇠
//! - 매 분 중립값 쪽으로 2% 회귀 (경기장 위 선수만)

use super::match_state::MatchState;
use crate::models::{Attribute, PlayerId, Side};

pub const MORALE_MIN: f32 = 1.0;
pub const MORALE_MAX: f32 = 10.0;

/// One decay step toward `neutral`.
pub fn decay_toward(morale: f32, neutral: f32, rate: f32) -> f32 {
    (morale + (neutral - morale) * rate).clamp(MORALE_MIN, MORALE_MAX)
}

impl MatchState {
    /// Apply `delta` to one player's morale, clamped to `[1, 10]`.
    pub fn adjust_morale(&mut self, id: PlayerId, delta: f32) {
        if let Some(ps) = self.player_states.get_mut(&id) {
            ps.morale = (ps.morale + delta).clamp(MORALE_MIN, MORALE_MAX);
        }
    }

    /// Team-wide morale change for everyone on the pitch; leaders feel it less.
    pub fn adjust_team_morale(&mut self, side: Side, delta: f32) {
        let cfg = &self.config.condition;
        let threshold = cfg.leadership_threshold;
        let damped = delta * (1.0 - cfg.leadership_dampening);

        let changes: Vec<(PlayerId, f32)> = self
            .available_players(side)
            .into_iter()
            .map(|id| {
                let leader = self
                    .player(id)
                    .map(|p| p.attributes.get(Attribute::Leadership) >= threshold)
                    .unwrap_or(false);
                (id, if leader { damped } else { delta })
            })
            .collect();

        for (id, d) in changes {
            self.adjust_morale(id, d);
        }
    }

    /// Per-minute regression toward neutral for every player on the pitch.
    pub fn decay_morale(&mut self) {
        let neutral = self.config.condition.morale_neutral;
        let rate = self.config.condition.morale_decay;
        let on_pitch: Vec<PlayerId> =
            Side::BOTH.iter().flat_map(|&s| self.available_players(s)).collect();
        for id in on_pitch {
            if let Some(ps) = self.player_states.get_mut(&id) {
                ps.morale = decay_toward(ps.morale, neutral, rate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::uniform_state;

    #[test]
    fn test_morale_clamped() {
        let mut state = uniform_state(10);
        let id = state.home.lineup[4];
        state.adjust_morale(id, 50.0);
        assert_eq!(state.player_state(id).unwrap().morale, 10.0);
        state.adjust_morale(id, -50.0);
        assert_eq!(state.player_state(id).unwrap().morale, 1.0);
    }

    #[test]
    fn test_leaders_are_dampened() {
        let mut state = uniform_state(10);
        let leader = state.away.lineup[2];
        let other = state.away.lineup[3];
        state.players.get_mut(&leader).unwrap().attributes.leadership = 18;
        state.adjust_team_morale(Side::Away, -1.0);
        assert!((state.player_state(leader).unwrap().morale - 6.15).abs() < 1e-5);
        assert!((state.player_state(other).unwrap().morale - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_decay_moves_toward_neutral() {
        assert!((decay_toward(10.0, 7.0, 0.02) - 9.94).abs() < 1e-5);
        assert!((decay_toward(1.0, 7.0, 0.02) - 1.12).abs() < 1e-5);
        assert_eq!(decay_toward(7.0, 7.0, 0.02), 7.0);
    }

    #[test]
    fn test_decay_skips_benched_players() {
        let mut state = uniform_state(10);
        let sub = state.home.bench[0];
        state.player_states.get_mut(&sub).unwrap().morale = 9.0;
        state.decay_morale();
        assert_eq!(state.player_state(sub).unwrap().morale, 9.0);
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decay_stays_in_range(m in 1.0f32..=10.0, steps in 0usize..200) {
                let mut v = m;
                for _ in 0..steps {
                    v = decay_toward(v, 7.0, 0.02);
                }
                prop_assert!((MORALE_MIN..=MORALE_MAX).contains(&v));
                prop_assert!((v - 7.0).abs() <= (m - 7.0).abs() + 1e-4);
            }
        }
    }
}
