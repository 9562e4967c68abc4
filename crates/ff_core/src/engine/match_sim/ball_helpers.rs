//! Ball Movement Helpers
//!
//! This module contains helper functions for moving the ball and recording events:
//! - Depth ↔ x conversion per attacking direction
//! - Ball moves that append to the minute's pending sub-motion sequence
//! - Event construction at the current ball position and emission
//!
//! Every ball mutation goes through [`Coordinates::clamped`], so the ball never
//! leaves the playable `[2, 98]` box.

use rand::Rng;

use super::MatchEngine;
use crate::models::{
    Coordinates, EventKind, MatchEvent, PlayerId, SequenceAction, SequenceKind, Side,
};

/// x coordinate for a depth measured from `side`'s own goal line.
pub fn depth_to_x(side: Side, depth: f32) -> f32 {
    match side {
        Side::Home => depth,
        Side::Away => 100.0 - depth,
    }
}

/// Sub-motion from `from` to `to`, both clamped to the pitch.
pub fn step_ball(
    action: SequenceKind,
    actor: Option<PlayerId>,
    from: Coordinates,
    to: Coordinates,
    duration_ms: u32,
) -> SequenceAction {
    SequenceAction {
        action,
        actor,
        ball_start: from.clamped(),
        ball_end: to.clamped(),
        duration_ms,
    }
}

impl<R: Rng> MatchEngine<R> {
    // ===========================================
    // Ball placement
    // ===========================================

    /// Move the ball and record the motion in the pending sequence.
    pub(crate) fn move_ball(
        &mut self,
        action: SequenceKind,
        actor: Option<PlayerId>,
        to: Coordinates,
        duration_ms: u32,
    ) {
        let step = step_ball(action, actor, self.state.ball, to, duration_ms);
        self.state.ball = step.ball_end;
        self.pending.push(step);
    }

    /// Place the ball without a recorded motion (restarts, resets).
    pub(crate) fn place_ball(&mut self, to: Coordinates) {
        self.state.ball = to.clamped();
    }

    /// Place the ball at `depth` from `side`'s own goal, random width.
    pub(crate) fn place_ball_at_depth(&mut self, side: Side, depth: f32) {
        let y = self.rng.gen_range(10.0..90.0);
        self.place_ball(Coordinates::new(depth_to_x(side, depth), y));
    }

    /// Ball target `dx` forward along `side`'s attacking direction, `dy` across.
    pub(crate) fn ball_ahead(&self, side: Side, dx: f32, dy: f32) -> Coordinates {
        Coordinates::new(
            self.state.ball.x + dx * side.attack_direction(),
            self.state.ball.y + dy,
        )
        .clamped()
    }

    pub(crate) fn take_pending(&mut self) -> Vec<SequenceAction> {
        std::mem::take(&mut self.pending)
    }

    // ===========================================
    // Events
    // ===========================================

    /// Event at the current minute and ball position.
    pub(crate) fn event(&self, side: Side, kind: EventKind) -> MatchEvent {
        MatchEvent::new(self.state.minute, side, kind, self.state.ball)
    }

    /// Event carrying every pending sub-motion.
    pub(crate) fn event_with_pending(&mut self, side: Side, kind: EventKind) -> MatchEvent {
        let sequence = self.take_pending();
        self.event(side, kind).with_sequence(sequence)
    }

    pub(crate) fn emit(&mut self, event: MatchEvent) {
        log::trace!(
            "{}' {} {} {:?}",
            event.minute,
            event.side,
            event.kind.type_name(),
            event.primary
        );
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::engine_at;

    #[test]
    fn test_depth_mirrors_for_away() {
        assert_eq!(depth_to_x(Side::Home, 80.0), 80.0);
        assert_eq!(depth_to_x(Side::Away, 80.0), 20.0);
    }

    #[test]
    fn test_move_ball_clamps_and_records() {
        let mut engine = engine_at(10, 1, 10, Side::Home);
        engine.place_ball(Coordinates::new(95.0, 50.0));
        let target = engine.ball_ahead(Side::Home, 20.0, 60.0);
        engine.move_ball(SequenceKind::Pass, None, target, 600);
        assert_eq!(engine.state.ball, Coordinates::new(98.0, 98.0));
        assert_eq!(engine.pending.len(), 1);
        assert_eq!(engine.pending[0].ball_start, Coordinates::new(95.0, 50.0));

        let event = engine.event_with_pending(Side::Home, EventKind::Dribble);
        assert_eq!(event.sequence.len(), 1);
        assert!(engine.pending.is_empty());
    }

    #[test]
    fn test_place_ball_clamps() {
        let mut engine = engine_at(10, 1, 10, Side::Away);
        engine.place_ball(Coordinates::new(-5.0, 140.0));
        assert!(engine.state.ball.in_bounds());
    }
}
