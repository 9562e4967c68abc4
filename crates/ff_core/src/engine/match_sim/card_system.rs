//! Foul & Card System
//!
//! - Fouler weighted toward poor tacklers and aggressive players
//! - Foul zone from a single roll: penalty area / dangerous / elsewhere
//! - Straight red checked independently of yellow
//! - Second yellow → `second_yellow` + `red_card`, player leaves the pitch
//! - Set-piece chaining: penalty / direct free-kick shot / standing free kick

use rand::Rng;

use super::ball_helpers::depth_to_x;
use super::MatchEngine;
use crate::engine::config::DisciplineConfig;
use crate::models::{Attribute, Coordinates, EventKind, FoulZone, PlayerId, SequenceKind, Side};
use crate::tactics::Tactic;

/// Zone for a foul-zone roll in `1..=100`.
pub fn foul_zone(cfg: &DisciplineConfig, roll: u32) -> FoulZone {
    if roll <= u32::from(cfg.penalty_area_roll) {
        FoulZone::PenaltyArea
    } else if roll <= u32::from(cfg.dangerous_roll) {
        FoulZone::Dangerous
    } else {
        FoulZone::Elsewhere
    }
}

/// Depth band (from the fouled side's own goal) where the ball is placed.
pub fn zone_depth_range(zone: FoulZone) -> (f32, f32) {
    match zone {
        FoulZone::PenaltyArea => (88.0, 94.0),
        FoulZone::Dangerous => (70.0, 84.0),
        FoulZone::Elsewhere => (20.0, 65.0),
    }
}

/// Straight red chance in percent.
pub fn red_card_chance(cfg: &DisciplineConfig, aggression: f32) -> f32 {
    let threshold = f32::from(cfg.red_aggression_threshold);
    if aggression >= threshold {
        cfg.red_base + (aggression - threshold + 1.0) * cfg.red_aggression_step
    } else {
        cfg.red_base
    }
}

/// Yellow chance in percent for the fouler's aggression/bravery under `tactic`.
pub fn yellow_card_chance(cfg: &DisciplineConfig, aggression: f32, bravery: f32, tactic: &Tactic) -> f32 {
    let mut chance = cfg.yellow_base + (aggression - 10.0) * cfg.yellow_aggression_scale;
    chance += cfg.yellow_per_aggressive_flag * tactic.aggressive_tackling_flags() as f32;
    if tactic.stay_on_feet {
        chance -= cfg.yellow_stay_on_feet;
    }
    if bravery >= f32::from(cfg.yellow_bravery_threshold) {
        chance -= cfg.yellow_bravery_reduction;
    }
    cfg.yellow_clamp.apply(chance)
}

impl<R: Rng> MatchEngine<R> {
    /// Foul committed by `fouling` against the side in possession.
    pub(crate) fn resolve_foul(&mut self, fouling: Side) {
        let fouled_side = fouling.opponent();
        let cfg = self.state.config.discipline.clone();

        let pool = self.state.candidate_pool(fouling, |p| !p.is_goalkeeper());
        let Some(fouler) = self.pick_weighted(&pool, |s, id| {
            (21.0 - s.effective(id, Attribute::Tackling)).max(1.0)
                + s.effective(id, Attribute::Aggression) / 2.0
        }) else {
            return;
        };
        let fouled = self.select_outfield(fouled_side);

        let zone = foul_zone(&cfg, self.rng.gen_range(1..=100));
        let (lo, hi) = zone_depth_range(zone);
        let depth = self.rng.gen_range(lo..=hi);
        let spot = Coordinates::new(depth_to_x(fouled_side, depth), self.rng.gen_range(20.0..80.0));
        self.move_ball(SequenceKind::Foul, Some(fouler), spot, 400);

        self.state.stats.side_mut(fouling).fouls += 1;
        let event = self
            .event_with_pending(fouling, EventKind::Foul { zone })
            .with_primary(Some(fouler))
            .with_secondary(fouled);
        self.emit(event);

        self.resolve_cards(fouling, fouler, &cfg);
        self.state.possession = fouled_side;

        match zone {
            FoulZone::PenaltyArea => self.resolve_penalty(fouled_side),
            FoulZone::Dangerous if self.chance(cfg.direct_free_kick_chance) => {
                self.resolve_direct_free_kick(fouled_side)
            }
            _ => self.resolve_free_kick(fouled_side),
        }
    }

    fn resolve_cards(&mut self, side: Side, fouler: PlayerId, cfg: &DisciplineConfig) {
        let aggression = self.state.effective(fouler, Attribute::Aggression);
        let bravery = self.state.effective(fouler, Attribute::Bravery);

        if self.chance(red_card_chance(cfg, aggression)) {
            let event = self.event(side, EventKind::RedCard).with_primary(Some(fouler));
            self.emit(event);
            self.state.stats.side_mut(side).red_cards += 1;
            self.send_off(fouler);
            return;
        }

        let yellow = yellow_card_chance(cfg, aggression, bravery, self.state.tactic(side));
        if !self.chance(yellow) {
            return;
        }

        let deltas = self.state.config.condition.deltas.clone();
        let count = match self.state.player_states.get_mut(&fouler) {
            Some(ps) => {
                ps.yellow_cards += 1;
                ps.yellow_cards
            }
            None => return,
        };
        self.state.stats.side_mut(side).yellow_cards += 1;

        if count >= 2 {
            let second = self.event(side, EventKind::SecondYellow).with_primary(Some(fouler));
            self.emit(second);
            let red = self.event(side, EventKind::RedCard).with_primary(Some(fouler));
            self.emit(red);
            self.state.stats.side_mut(side).red_cards += 1;
            self.send_off(fouler);
        } else {
            let event = self.event(side, EventKind::YellowCard).with_primary(Some(fouler));
            self.emit(event);
            self.state.adjust_morale(fouler, deltas.yellow);
            log::debug!("{}' yellow card {}", self.state.minute, self.state.player_name(fouler));
        }
    }

    /// Remove a player for the rest of the match.
    pub(crate) fn send_off(&mut self, id: PlayerId) {
        let red = self.state.config.condition.deltas.red;
        let Some(ps) = self.state.player_states.get_mut(&id) else {
            return;
        };
        ps.sent_off = true;
        let side = ps.side;
        self.state.adjust_morale(id, red);
        log::debug!("{}' {} sent off ({})", self.state.minute, self.state.player_name(id), side);

        if self.state.side(side).set_piece_takers.holds_role(id) {
            self.state.refresh_set_piece_takers(side);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::Clamp;
    use crate::engine::match_sim::test_fixtures::engine_at;

    #[test]
    fn test_foul_zone_split() {
        let cfg = DisciplineConfig::default();
        assert_eq!(foul_zone(&cfg, 1), FoulZone::PenaltyArea);
        assert_eq!(foul_zone(&cfg, 2), FoulZone::Dangerous);
        assert_eq!(foul_zone(&cfg, 26), FoulZone::Dangerous);
        assert_eq!(foul_zone(&cfg, 27), FoulZone::Elsewhere);
        assert_eq!(foul_zone(&cfg, 100), FoulZone::Elsewhere);
    }

    #[test]
    fn test_red_card_rises_with_aggression() {
        let cfg = DisciplineConfig::default();
        assert_eq!(red_card_chance(&cfg, 10.0), 0.15);
        assert!((red_card_chance(&cfg, 15.0) - 0.25).abs() < 1e-6);
        assert!((red_card_chance(&cfg, 20.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_yellow_card_modifiers() {
        let cfg = DisciplineConfig::default();
        let neutral = Tactic::default();
        assert_eq!(yellow_card_chance(&cfg, 10.0, 10.0, &neutral), 13.0);
        assert_eq!(yellow_card_chance(&cfg, 10.0, 16.0, &neutral), 11.0);

        let hard = Tactic { tackle_harder: true, get_stuck_in: true, ..Tactic::default() };
        assert_eq!(yellow_card_chance(&cfg, 20.0, 10.0, &hard), 22.0);

        let soft = Tactic { stay_on_feet: true, ..Tactic::default() };
        assert_eq!(yellow_card_chance(&cfg, 10.0, 10.0, &soft), 10.0);

        assert_eq!(yellow_card_chance(&cfg, 80.0, 10.0, &hard), 30.0);
        assert_eq!(yellow_card_chance(&cfg, 1.0, 20.0, &soft), 3.5);
        assert_eq!(yellow_card_chance(&cfg, -20.0, 20.0, &soft), 3.0);
    }

    #[test]
    fn test_foul_event_and_restart() {
        for seed in 0..30 {
            let mut engine = engine_at(12, seed, 20, Side::Home);
            engine.resolve_foul(Side::Away);
            let foul = &engine.events[0];
            assert!(matches!(foul.kind, EventKind::Foul { .. }));
            assert_eq!(foul.side, Side::Away);
            assert_eq!(engine.state.stats.away.fouls, 1);
            assert!(engine.state.ball.in_bounds());
            assert!(engine.events.len() >= 2, "every foul chains into a restart");
        }
    }

    #[test]
    fn test_second_yellow_sends_off() {
        let mut engine = engine_at(12, 11, 50, Side::Away);
        let mut cfg = DisciplineConfig { red_base: 0.0, red_aggression_step: 0.0, ..Default::default() };
        cfg.yellow_clamp = Clamp::new(100.0, 100.0);
        let fouler = engine.state.home.lineup[3];
        engine.state.player_states.get_mut(&fouler).unwrap().yellow_cards = 1;

        engine.resolve_cards(Side::Home, fouler, &cfg);

        let kinds: Vec<_> = engine.events.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds, vec![EventKind::SecondYellow, EventKind::RedCard]);
        assert!(engine.state.player_state(fouler).unwrap().sent_off);
        assert_eq!(engine.state.available_players(Side::Home).len(), 10);
        assert_eq!(engine.state.stats.home.red_cards, 1);
    }

    #[test]
    fn test_sent_off_taker_is_replaced() {
        let mut engine = engine_at(12, 2, 50, Side::Home);
        let taker = engine.state.home.set_piece_takers.penalties.unwrap();
        engine.send_off(taker);
        let takers = engine.state.home.set_piece_takers;
        assert!(!takers.holds_role(taker));
        assert!(takers.penalties.is_some());
    }
}
