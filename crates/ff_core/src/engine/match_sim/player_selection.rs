//! Player Selection System
//!
//! This module contains player selection logic for MatchEngine:
//! - Weighted selection over a candidate pool (subtract until <= 0)
//! - Shooter selection (weighted by position and finishing)
//! - Assister selection (weighted by passing + vision, excludes scorer)
//! - Uniform selection for incidental actors
//!
//! Every pool is built from lineup order, so selection is reproducible per seed.

use rand::Rng;

use super::match_state::MatchState;
use super::MatchEngine;
use crate::models::{Attribute, PlayerId, Position, Side};

/// Position weight for shot selection.
pub fn shooter_position_weight(position: Position) -> f32 {
    if position.is_forward() {
        3.0
    } else if position.is_midfielder() {
        2.0
    } else if position.is_defender() {
        0.5
    } else {
        0.1 // Goalkeeper
    }
}

impl<R: Rng> MatchEngine<R> {
    // ===========================================
    // Generic selection
    // ===========================================

    /// Weighted pick from `candidates`. Non-positive totals degrade to a uniform pick.
    pub(crate) fn pick_weighted(
        &mut self,
        candidates: &[PlayerId],
        weight: impl Fn(&MatchState, PlayerId) -> f32,
    ) -> Option<PlayerId> {
        if candidates.is_empty() {
            return None;
        }
        let weights: Vec<f32> =
            candidates.iter().map(|&id| weight(&self.state, id).max(0.0)).collect();
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return self.pick_uniform(candidates);
        }

        let mut random = self.rng.gen::<f32>() * total;
        for (i, w) in weights.iter().enumerate() {
            random -= w;
            if random <= 0.0 {
                return Some(candidates[i]);
            }
        }
        candidates.last().copied()
    }

    pub(crate) fn pick_uniform(&mut self, candidates: &[PlayerId]) -> Option<PlayerId> {
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.gen_range(0..candidates.len())])
    }

    // ===========================================
    // Role-specific selection
    // ===========================================

    /// Shooter for `side`, weighted by position and finishing.
    pub(crate) fn select_shooter(&mut self, side: Side) -> Option<PlayerId> {
        let pool = self.state.available_players(side);
        self.pick_weighted(&pool, |s, id| {
            shooter_position_weight(s.assigned_position(id)) * s.effective(id, Attribute::Finishing)
        })
    }

    /// Assist provider for a goal by `scorer`; never the scorer.
    pub(crate) fn select_assister(&mut self, side: Side, scorer: PlayerId) -> Option<PlayerId> {
        let pool: Vec<PlayerId> =
            self.state.available_players(side).into_iter().filter(|&id| id != scorer).collect();
        self.pick_weighted(&pool, |s, id| {
            s.effective(id, Attribute::Passing) + s.effective(id, Attribute::Vision)
        })
    }

    /// Any available outfield player of `side` (ball carriers, passers).
    pub(crate) fn select_outfield(&mut self, side: Side) -> Option<PlayerId> {
        let pool = self.state.candidate_pool(side, |p| !p.is_goalkeeper());
        self.pick_uniform(&pool)
    }

    /// Defender for blocks/tackles, weighted by the given attributes.
    pub(crate) fn select_defender(&mut self, side: Side, attrs: &[Attribute]) -> Option<PlayerId> {
        let pool = self.state.candidate_pool(side, |p| p.is_defender() || p == Position::CDM);
        self.pick_weighted(&pool, |s, id| s.effective_avg(id, attrs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::engine_at;

    #[test]
    fn test_shooter_weights_by_line() {
        assert!(shooter_position_weight(Position::ST) > shooter_position_weight(Position::CM));
        assert!(shooter_position_weight(Position::CM) > shooter_position_weight(Position::CB));
        assert!(shooter_position_weight(Position::CB) > shooter_position_weight(Position::GK));
    }

    #[test]
    fn test_assister_never_scorer() {
        let mut engine = engine_at(12, 3, 20, Side::Home);
        let scorer = engine.state.home.lineup[10];
        for _ in 0..200 {
            assert_ne!(engine.select_assister(Side::Home, scorer), Some(scorer));
        }
    }

    #[test]
    fn test_sent_off_players_never_selected() {
        let mut engine = engine_at(12, 9, 20, Side::Away);
        let lineup = engine.state.away.lineup.clone();
        for id in &lineup[1..10] {
            engine.state.player_states.get_mut(id).unwrap().sent_off = true;
        }
        for _ in 0..100 {
            let pick = engine.select_shooter(Side::Away).unwrap();
            assert!(pick == lineup[0] || pick == lineup[10]);
        }
    }

    #[test]
    fn test_zero_weights_fall_back_to_uniform() {
        let mut engine = engine_at(12, 1, 20, Side::Home);
        let pool = engine.state.available_players(Side::Home);
        let pick = engine.pick_weighted(&pool, |_, _| 0.0);
        assert!(pick.is_some_and(|id| pool.contains(&id)));
        assert_eq!(engine.pick_weighted(&[], |_, _| 1.0), None);
    }
}
