//! Action Decision System
//!
//! Micro-action selector for one played minute:
//! - 3..=8 micro-actions, each consuming a single 1..=100 roll
//! - ordered, non-overlapping ranges recomputed per action from tactics:
//!   shot → foul → defensive turnover → offside
//! - first matching range interrupts play and ends the minute's loop
//! - no match: pass (75%) or carry (25%), loop continues
//!
//! The range builder and selector are pure; only [`MatchEngine::run_micro_actions`]
//! touches state.

use rand::Rng;

use super::MatchEngine;
use crate::engine::config::FlowConfig;
use crate::models::{EventKind, SequenceKind, Side};
use crate::tactics::{Tactic, TacticLevel};

/// Interrupting outcome of a micro-action roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicroAction {
    Shot,
    Foul,
    Turnover,
    Offside,
}

/// Ordered `(action, width)` ranges for the attacking side's next roll.
///
/// Shot and offside only exist in the attacking third. Widths never go below
/// their floors (shot 2, foul 1, turnover 0).
pub fn build_action_ranges(
    flow: &FlowConfig,
    attacking: &Tactic,
    defending: &Tactic,
    in_attacking_third: bool,
) -> Vec<(MicroAction, f32)> {
    let mut ranges = Vec::with_capacity(4);

    if in_attacking_third {
        let shot = flow.shot_range_base
            + flow.shot_range_per_mentality * attacking.mentality.level_f32();
        ranges.push((MicroAction::Shot, shot.max(2.0)));
    }

    let stay_on_feet = if defending.stay_on_feet { 1.0 } else { 0.0 };
    let foul = flow.foul_range_base
        + flow.foul_range_per_aggressive_flag * defending.aggressive_tackling_flags() as f32
        - flow.foul_range_stay_on_feet * stay_on_feet;
    ranges.push((MicroAction::Foul, foul.max(1.0)));

    let turnover = flow.turnover_range_base
        + flow.turnover_range_per_pressing * defending.pressing.level_f32();
    ranges.push((MicroAction::Turnover, turnover.max(0.0)));

    if in_attacking_third {
        ranges.push((MicroAction::Offside, flow.offside_range));
    }

    ranges
}

/// Walk the cumulative ranges with one roll in `1..=100`.
pub fn select_action(ranges: &[(MicroAction, f32)], roll: u32) -> Option<MicroAction> {
    let roll = roll as f32;
    let mut upper = 0.0;
    for &(action, width) in ranges {
        upper += width;
        if roll <= upper {
            return Some(action);
        }
    }
    None
}

impl<R: Rng> MatchEngine<R> {
    /// Run the minute's micro-actions for the side in possession.
    pub(crate) fn run_micro_actions(&mut self) {
        self.state.ball = self.state.ball.clamped();
        let flow = self.state.config.flow.clone();

        let holder = self.state.possession;
        self.state.stats.side_mut(holder).passes += flow.background_passes_holder;
        self.state.stats.side_mut(holder.opponent()).passes += flow.background_passes_other;

        let count = self.rng.gen_range(flow.min_actions..=flow.max_actions);
        // side whose passes and carries are still pending
        let mut mover = holder;

        for _ in 0..count {
            let attacking = self.state.possession;
            let ranges = build_action_ranges(
                &flow,
                self.state.tactic(attacking),
                self.state.tactic(attacking.opponent()),
                self.state.in_attacking_third(),
            );
            let roll = self.rng.gen_range(1..=100);

            match select_action(&ranges, roll) {
                Some(action) => {
                    self.resolve_micro_action(action);
                    break;
                }
                None => {
                    mover = attacking;
                    self.advance_ball(&flow);
                }
            }
        }

        // failed tackles and interceptions emit nothing
        if !self.pending.is_empty() {
            self.anchor_pending(mover);
        }
    }

    /// Attach uncommitted motions to a `possession` event for `side`.
    fn anchor_pending(&mut self, side: Side) {
        let event = self.event_with_pending(side, EventKind::Possession);
        let primary = event.sequence.last().and_then(|s| s.actor);
        self.emit(event.with_primary(primary));
    }

    fn resolve_micro_action(&mut self, action: MicroAction) {
        let attacking = self.state.possession;
        match action {
            MicroAction::Shot => self.resolve_open_play_shot(attacking),
            MicroAction::Foul => self.resolve_foul(attacking.opponent()),
            MicroAction::Turnover => self.resolve_defensive_action(attacking.opponent()),
            MicroAction::Offside => self.resolve_offside(attacking),
        }
    }

    /// Uninterrupted progress: pass or carry toward the opponent goal.
    fn advance_ball(&mut self, flow: &FlowConfig) {
        let side = self.state.possession;
        let actor = self.select_outfield(side);

        if self.rng.gen::<f32>() * 100.0 < flow.pass_share {
            let dx = self.rng.gen_range(5.0..15.0);
            let dy = self.rng.gen_range(-15.0..15.0);
            let target = self.ball_ahead(side, dx, dy);
            let ms = self.rng.gen_range(600..1400);
            self.move_ball(SequenceKind::Pass, actor, target, ms);
            self.state.stats.side_mut(side).passes += 1;
        } else {
            let dx = self.rng.gen_range(3.0..8.0);
            let dy = self.rng.gen_range(-5.0..5.0);
            let target = self.ball_ahead(side, dx, dy);
            let ms = self.rng.gen_range(1000..2000);
            self.move_ball(SequenceKind::Carry, actor, target, ms);

            if self.state.in_attacking_third() {
                let event = self.event_with_pending(side, EventKind::Dribble).with_primary(actor);
                self.emit(event);
            }
        }
    }
}
