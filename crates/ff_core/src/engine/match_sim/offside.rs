//! Offside
//!
//! 공격 3분의 1 지역에서만 발생. 오프사이드에 걸린 선수는 off the ball
//! 능력치 가중으로 공격수 중에서 고른다 (공격수가 없으면 필드 플레이어).
//! 공은 반칙 지점에서 수비 팀에게 넘어간다.

use rand::Rng;

use super::MatchEngine;
use crate::models::{Attribute, EventKind, SequenceKind, Side};

impl<R: Rng> MatchEngine<R> {
    pub(crate) fn resolve_offside(&mut self, attacking: Side) {
        let pool = self.state.candidate_pool(attacking, |p| p.is_forward());
        let flagged = self.pick_weighted(&pool, |s, id| s.effective(id, Attribute::OffTheBall));

        let dx = self.rng.gen_range(4.0..12.0);
        let dy = self.rng.gen_range(-10.0..10.0);
        let target = self.ball_ahead(attacking, dx, dy);
        self.move_ball(SequenceKind::Pass, None, target, 900);

        self.state.stats.side_mut(attacking).offsides += 1;
        let event = self.event_with_pending(attacking, EventKind::Offside).with_primary(flagged);
        self.emit(event);
        self.state.possession = attacking.opponent();
    }
}
