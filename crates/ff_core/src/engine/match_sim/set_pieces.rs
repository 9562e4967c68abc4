//! Set Piece Resolvers
//!
//! This module contains dead-ball restarts for MatchEngine:
//! - Set-piece taker designation (corners / free kicks / penalties)
//! - Penalty kick
//! - Corner: keeper claim → header attempt → cleared
//! - Goal kick with short/long distribution
//! - Throw-in and standing free kick (no probability gate)
//! - Direct free-kick shot (routes into the shot chain)

use rand::Rng;

use super::ball_helpers::depth_to_x;
use super::match_state::{MatchState, SetPieceTakers};
use super::MatchEngine;
use crate::engine::config::SetPieceConfig;
use crate::models::{
    Attribute, Coordinates, CornerOutcome, EventKind, PlayerId, SequenceKind, ShotOutcome, Side,
};

const HEADER_ON_TARGET_CLAMP: (f32, f32) = (10.0, 80.0);
const HEADER_GOAL_CLAMP: (f32, f32) = (5.0, 50.0);
/// Share of missed penalties that the keeper saves (the rest go wide).
const PENALTY_SAVE_SHARE: f32 = 60.0;

// ============================================================================
// Probability gates (percent)
// ============================================================================

pub fn penalty_chance(
    cfg: &SetPieceConfig,
    penalty_taking: f32,
    composure: f32,
    reflexes: f32,
    one_on_ones: f32,
) -> f32 {
    let chance = cfg.penalty_base + (penalty_taking - 10.0) * 1.5 + (composure - 10.0)
        - (reflexes - 10.0)
        - (one_on_ones - 10.0);
    cfg.penalty_clamp.apply(chance)
}

pub fn corner_claim_chance(cfg: &SetPieceConfig, aerial_reach: f32, command_of_area: f32) -> f32 {
    (cfg.corner_claim_base * (aerial_reach + command_of_area) / 2.0 / 10.0).clamp(0.0, 100.0)
}

pub fn header_on_target_chance(cfg: &SetPieceConfig, heading: f32, jumping: f32) -> f32 {
    let chance = cfg.header_on_target_base + (heading - 10.0) * 1.5 + (jumping - 10.0) * 0.5;
    chance.clamp(HEADER_ON_TARGET_CLAMP.0, HEADER_ON_TARGET_CLAMP.1)
}

pub fn header_goal_chance(cfg: &SetPieceConfig, heading: f32, reflexes: f32) -> f32 {
    let chance = cfg.header_goal_base + (heading - 10.0) - (reflexes - 10.0);
    chance.clamp(HEADER_GOAL_CLAMP.0, HEADER_GOAL_CLAMP.1)
}

pub fn goal_kick_retention(cfg: &SetPieceConfig, kicking: f32, short: bool) -> f32 {
    let bonus = if short { cfg.goal_kick_short_bonus } else { 0.0 };
    cfg.goal_kick_clamp.apply(cfg.goal_kick_base + (kicking - 10.0) * 1.5 + bonus)
}

// ============================================================================
// Set-piece takers
// ============================================================================

impl MatchState {
    /// Re-derive `side`'s takers from the players currently on the pitch.
    pub fn refresh_set_piece_takers(&mut self, side: Side) {
        let mut pool = self.available_outfield(side);
        if pool.is_empty() {
            pool = self.available_players(side);
        }

        let best = |score: &dyn Fn(PlayerId) -> f32| -> Option<PlayerId> {
            pool.iter()
                .copied()
                .fold(None, |acc: Option<(PlayerId, f32)>, id| {
                    let s = score(id);
                    match acc {
                        Some((_, b)) if b >= s => acc,
                        _ => Some((id, s)),
                    }
                })
                .map(|(id, _)| id)
        };

        let takers = SetPieceTakers {
            corners: best(&|id| {
                self.effective(id, Attribute::Corners) + self.effective(id, Attribute::Crossing)
            }),
            free_kicks: best(&|id| self.effective(id, Attribute::FreeKickTaking)),
            penalties: best(&|id| self.effective(id, Attribute::PenaltyTaking)),
        };

        if takers != self.side(side).set_piece_takers {
            log::debug!("{} set-piece takers: {:?}", side, takers);
        }
        self.side_mut(side).set_piece_takers = takers;
    }
}

impl<R: Rng> MatchEngine<R> {
    fn designated(&mut self, side: Side, pick: fn(&SetPieceTakers) -> Option<PlayerId>) -> Option<PlayerId> {
        match pick(&self.state.side(side).set_piece_takers) {
            Some(id) if self.state.is_available(id) => Some(id),
            _ => self.select_outfield(side),
        }
    }

    // ===========================================
    // Penalty
    // ===========================================

    pub(crate) fn resolve_penalty(&mut self, side: Side) {
        let defending = side.opponent();
        let Some(taker) = self.designated(side, |t| t.penalties) else {
            return;
        };
        let cfg = self.state.config.set_piece.clone();
        let deltas = self.state.config.condition.deltas.clone();
        let keeper = self.state.goalkeeper(defending);

        let chance = penalty_chance(
            &cfg,
            self.state.effective(taker, Attribute::PenaltyTaking),
            self.state.effective(taker, Attribute::Composure),
            self.state.keeper_effective(defending, Attribute::Reflexes),
            self.state.keeper_effective(defending, Attribute::OneOnOnes),
        );

        self.place_ball(Coordinates::new(depth_to_x(side, 89.0), 50.0));
        self.state.stats.side_mut(side).shots += 1;

        if self.chance(chance) {
            let target = Coordinates::new(depth_to_x(side, 100.0), self.rng.gen_range(44.0..56.0));
            self.move_ball(SequenceKind::Shot, Some(taker), target, 500);
            self.state.stats.side_mut(side).shots_on_target += 1;
            let event = self
                .event_with_pending(side, EventKind::Penalty { outcome: ShotOutcome::Goal })
                .with_primary(Some(taker));
            self.emit(event);
            self.register_goal(side, taker, None);
            return;
        }

        self.state.adjust_morale(taker, deltas.penalty_missed);
        if self.chance(PENALTY_SAVE_SHARE) {
            let target = Coordinates::new(depth_to_x(side, 97.0), self.rng.gen_range(40.0..60.0));
            self.move_ball(SequenceKind::Shot, Some(taker), target, 500);
            self.move_ball(SequenceKind::Save, keeper, target, 300);
            self.state.stats.side_mut(side).shots_on_target += 1;
            self.state.stats.side_mut(defending).saves += 1;
            if let Some(gk) = keeper {
                self.state.adjust_morale(gk, deltas.penalty_saved);
            }
            let event = self
                .event_with_pending(side, EventKind::Penalty { outcome: ShotOutcome::Saved })
                .with_primary(Some(taker))
                .with_secondary(keeper);
            self.emit(event);
            self.state.possession = defending;
            self.place_ball_at_depth(defending, 6.0);
        } else {
            let target = Coordinates::new(depth_to_x(side, 100.0), self.rng.gen_range(30.0..38.0));
            self.move_ball(SequenceKind::Shot, Some(taker), target, 500);
            let event = self
                .event_with_pending(side, EventKind::Penalty { outcome: ShotOutcome::OffTarget })
                .with_primary(Some(taker));
            self.emit(event);
            self.resolve_goal_kick(defending);
        }
        log::debug!("{}' penalty missed by {}", self.state.minute, self.state.player_name(taker));
    }

    // ===========================================
    // Corner
    // ===========================================

    pub(crate) fn resolve_corner(&mut self, side: Side) {
        let defending = side.opponent();
        let cfg = self.state.config.set_piece.clone();
        let taker = self.designated(side, |t| t.corners);
        let keeper = self.state.goalkeeper(defending);

        self.state.stats.side_mut(side).corners += 1;
        self.state.possession = side;
        let flag_y = if self.rng.gen::<bool>() { 2.0 } else { 98.0 };
        self.place_ball(Coordinates::new(depth_to_x(side, 100.0), flag_y));
        let box_spot = Coordinates::new(depth_to_x(side, 93.0), self.rng.gen_range(38.0..62.0));
        self.move_ball(SequenceKind::Cross, taker, box_spot, 1200);

        // 1. Keeper claim
        let claim = corner_claim_chance(
            &cfg,
            self.state.keeper_effective(defending, Attribute::AerialReach),
            self.state.keeper_effective(defending, Attribute::CommandOfArea),
        );
        if self.chance(claim) {
            let event = self
                .event_with_pending(side, EventKind::Corner { outcome: CornerOutcome::ClaimedByKeeper })
                .with_primary(taker)
                .with_secondary(keeper);
            self.emit(event);
            self.state.possession = defending;
            return;
        }

        // 2. Header attempt
        if self.chance(cfg.header_chance) {
            let pool: Vec<PlayerId> = self
                .state
                .available_outfield(side)
                .into_iter()
                .filter(|&id| Some(id) != taker)
                .collect();
            if let Some(header) = self.pick_weighted(&pool, |s, id| {
                s.effective(id, Attribute::Heading) + s.effective(id, Attribute::JumpingReach)
            }) {
                let event = self
                    .event_with_pending(side, EventKind::Corner { outcome: CornerOutcome::HeaderAttempt })
                    .with_primary(taker)
                    .with_secondary(Some(header));
                self.emit(event);
                self.resolve_header(side, header, taker, &cfg);
                return;
            }
        }

        // 3. Cleared
        let clearer = self.select_defender(defending, &[Attribute::Heading, Attribute::JumpingReach]);
        let out = Coordinates::new(depth_to_x(defending, self.rng.gen_range(25.0..40.0)), box_spot.y);
        self.move_ball(SequenceKind::Clearance, clearer, out, 900);
        let event = self
            .event_with_pending(side, EventKind::Corner { outcome: CornerOutcome::Cleared })
            .with_primary(taker)
            .with_secondary(clearer);
        self.emit(event);
        self.state.stats.side_mut(defending).clearances += 1;
        self.state.possession = defending;
    }

    fn resolve_header(&mut self, side: Side, header: PlayerId, taker: Option<PlayerId>, cfg: &SetPieceConfig) {
        let defending = side.opponent();
        let keeper = self.state.goalkeeper(defending);
        let heading = self.state.effective(header, Attribute::Heading);
        let jumping = self.state.effective(header, Attribute::JumpingReach);
        let reflexes = self.state.keeper_effective(defending, Attribute::Reflexes);

        self.state.stats.side_mut(side).shots += 1;

        if !self.chance(header_on_target_chance(cfg, heading, jumping)) {
            let target = Coordinates::new(depth_to_x(side, 100.0), self.rng.gen_range(30.0..40.0));
            self.move_ball(SequenceKind::Header, Some(header), target, 400);
            let event = self
                .event_with_pending(side, EventKind::Header { outcome: ShotOutcome::OffTarget })
                .with_primary(Some(header));
            self.emit(event);
            self.resolve_goal_kick(defending);
            return;
        }

        self.state.stats.side_mut(side).shots_on_target += 1;
        if self.chance(header_goal_chance(cfg, heading, reflexes)) {
            let target = Coordinates::new(depth_to_x(side, 100.0), self.rng.gen_range(45.0..55.0));
            self.move_ball(SequenceKind::Header, Some(header), target, 400);
            let event = self
                .event_with_pending(side, EventKind::Header { outcome: ShotOutcome::Goal })
                .with_primary(Some(header))
                .with_secondary(taker);
            self.emit(event);
            self.register_goal(side, header, taker.filter(|&t| t != header));
        } else {
            let target = Coordinates::new(depth_to_x(side, 96.0), self.rng.gen_range(42.0..58.0));
            self.move_ball(SequenceKind::Header, Some(header), target, 400);
            self.move_ball(SequenceKind::Save, keeper, target, 300);
            self.state.stats.side_mut(defending).saves += 1;
            let event = self
                .event_with_pending(side, EventKind::Header { outcome: ShotOutcome::Saved })
                .with_primary(Some(header))
                .with_secondary(keeper);
            self.emit(event);
            self.state.possession = defending;
            self.place_ball_at_depth(defending, 6.0);
        }
    }

    // ===========================================
    // Restarts
    // ===========================================

    /// Goal kick taken by `side`'s keeper (or any player when none is left).
    pub(crate) fn resolve_goal_kick(&mut self, side: Side) {
        let cfg = self.state.config.set_piece.clone();
        let short = self.state.tactic(side).short_goal_kicks;
        let kicker = match self.state.goalkeeper(side) {
            Some(gk) => Some(gk),
            None => self.select_outfield(side),
        };
        let kicking = self.state.keeper_effective(side, Attribute::Kicking);

        self.pending.clear();
        self.place_ball(Coordinates::new(depth_to_x(side, 6.0), 50.0));
        let landing = if short {
            self.rng.gen_range(15.0..25.0)
        } else {
            self.rng.gen_range(45.0..65.0)
        };
        let y = self.rng.gen_range(15.0..85.0);
        self.move_ball(SequenceKind::Restart, kicker, Coordinates::new(depth_to_x(side, landing), y), 1500);

        let retained = self.chance(goal_kick_retention(&cfg, kicking, short));
        self.state.possession = if retained { side } else { side.opponent() };
        let event = self
            .event_with_pending(side, EventKind::GoalKick { retained, short })
            .with_primary(kicker);
        self.emit(event);
    }

    /// Throw-in to `side` from the nearest touchline.
    pub(crate) fn resolve_throw_in(&mut self, side: Side) {
        let pool = self.state.candidate_pool(side, |p| p.is_defender() || p.is_wide());
        let thrower = self.pick_weighted(&pool, |s, id| s.effective(id, Attribute::LongThrows));
        let touchline = if self.state.ball.y < 50.0 { 2.0 } else { 98.0 };
        self.place_ball(Coordinates::new(self.state.ball.x, touchline));
        let target = self.ball_ahead(side, 5.0, if touchline < 50.0 { 10.0 } else { -10.0 });
        self.move_ball(SequenceKind::Restart, thrower, target, 900);

        self.state.possession = side;
        let event = self.event_with_pending(side, EventKind::ThrowIn).with_primary(thrower);
        self.emit(event);
    }

    /// Standing free kick: possession restarts with `side`.
    pub(crate) fn resolve_free_kick(&mut self, side: Side) {
        let taker = self.designated(side, |t| t.free_kicks);
        let dy = self.rng.gen_range(-10.0..10.0);
        let target = self.ball_ahead(side, 8.0, dy);
        self.move_ball(SequenceKind::SetPiece, taker, target, 900);
        self.state.possession = side;
        let event = self.event_with_pending(side, EventKind::FreeKick).with_primary(taker);
        self.emit(event);
    }

    /// Direct free-kick shot by the designated taker.
    pub(crate) fn resolve_direct_free_kick(&mut self, side: Side) {
        self.state.possession = side;
        if let Some(taker) = self.designated(side, |t| t.free_kicks) {
            self.resolve_shot(side, taker, true);
        }
    }
}
