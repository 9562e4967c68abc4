//! Defensive Action Resolution
//!
//! 수비 턴오버 한 번의 롤로 세 가지 중 하나를 고른다:
//! - 태클 (40%): tackling+strength vs dribbling+agility, [30, 85]
//! - 인터셉트 (30%): anticipation+concentration+teamwork, [50, 90]
//! - 클리어링 (30%): heading+strength로 거리 결정, 10% 코너 허용
//!
//! 실패한 태클/인터셉트는 이벤트 없이 공격 팀이 공을 유지한다.

use rand::Rng;

use super::MatchEngine;
use crate::models::{Attribute, EventKind, SequenceKind, Side};

const TACKLE_SHARE: u32 = 40;
const INTERCEPTION_SHARE: u32 = 30;

const TACKLE_CLAMP: (f32, f32) = (30.0, 85.0);
const INTERCEPTION_CLAMP: (f32, f32) = (50.0, 90.0);
const CLEARANCE_CORNER_CHANCE: f32 = 10.0;
/// Of the clearances that do not concede a corner
const CLEARANCE_THROW_IN_CHANCE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefensiveAction {
    Tackle,
    Interception,
    Clearance,
}

/// Sub-action for a roll in `1..=100`.
pub fn defensive_action(roll: u32) -> DefensiveAction {
    if roll <= TACKLE_SHARE {
        DefensiveAction::Tackle
    } else if roll <= TACKLE_SHARE + INTERCEPTION_SHARE {
        DefensiveAction::Interception
    } else {
        DefensiveAction::Clearance
    }
}

pub fn tackle_success(tackling: f32, strength: f32, dribbling: f32, agility: f32) -> f32 {
    let chance = 55.0 + ((tackling + strength) / 2.0 - (dribbling + agility) / 2.0) * 2.5;
    chance.clamp(TACKLE_CLAMP.0, TACKLE_CLAMP.1)
}

pub fn interception_success(anticipation: f32, concentration: f32, teamwork: f32) -> f32 {
    let read = (anticipation + concentration + teamwork) / 3.0;
    (70.0 + (read - 10.0) * 2.0).clamp(INTERCEPTION_CLAMP.0, INTERCEPTION_CLAMP.1)
}

/// Clearance distance along the pitch.
pub fn clearance_distance(heading: f32, strength: f32) -> f32 {
    20.0 + (heading + strength) / 2.0 * 1.5
}

impl<R: Rng> MatchEngine<R> {
    /// Turnover attempt by `defending` against the side in possession.
    pub(crate) fn resolve_defensive_action(&mut self, defending: Side) {
        match defensive_action(self.rng.gen_range(1..=100)) {
            DefensiveAction::Tackle => self.resolve_tackle(defending),
            DefensiveAction::Interception => self.resolve_interception(defending),
            DefensiveAction::Clearance => self.resolve_clearance(defending),
        }
    }

    fn resolve_tackle(&mut self, defending: Side) {
        let attacking = defending.opponent();
        let Some(tackler) = self.select_defender(defending, &[Attribute::Tackling, Attribute::Strength])
        else {
            return;
        };
        let Some(carrier) = self.select_outfield(attacking) else {
            return;
        };

        let s = &self.state;
        let chance = tackle_success(
            s.effective(tackler, Attribute::Tackling),
            s.effective(tackler, Attribute::Strength),
            s.effective(carrier, Attribute::Dribbling),
            s.effective(carrier, Attribute::Agility),
        );
        if !self.chance(chance) {
            return;
        }

        let dy = self.rng.gen_range(-4.0..4.0);
        let spot = self.ball_ahead(attacking, 1.0, dy);
        self.move_ball(SequenceKind::Tackle, Some(tackler), spot, 500);
        self.state.stats.side_mut(defending).tackles += 1;
        self.state.possession = defending;
        let event = self
            .event_with_pending(defending, EventKind::Tackle)
            .with_primary(Some(tackler))
            .with_secondary(Some(carrier));
        self.emit(event);
    }

    fn resolve_interception(&mut self, defending: Side) {
        let pool = self.state.candidate_pool(defending, |p| !p.is_goalkeeper());
        let Some(interceptor) = self.pick_weighted(&pool, |s, id| {
            s.effective_avg(id, &[Attribute::Anticipation, Attribute::Positioning])
        }) else {
            return;
        };

        let s = &self.state;
        let chance = interception_success(
            s.effective(interceptor, Attribute::Anticipation),
            s.effective(interceptor, Attribute::Concentration),
            s.effective(interceptor, Attribute::Teamwork),
        );
        if !self.chance(chance) {
            return;
        }

        let dx = self.rng.gen_range(2.0..6.0);
        let dy = self.rng.gen_range(-8.0..8.0);
        let spot = self.ball_ahead(defending, dx, dy);
        self.move_ball(SequenceKind::Interception, Some(interceptor), spot, 400);
        self.state.stats.side_mut(defending).interceptions += 1;
        self.state.possession = defending;
        let event = self
            .event_with_pending(defending, EventKind::Interception)
            .with_primary(Some(interceptor));
        self.emit(event);
    }

    fn resolve_clearance(&mut self, defending: Side) {
        let attacking = defending.opponent();
        let clearer = self.select_defender(defending, &[Attribute::Heading, Attribute::Strength]);
        let distance = clearer
            .map(|id| {
                clearance_distance(
                    self.state.effective(id, Attribute::Heading),
                    self.state.effective(id, Attribute::Strength),
                )
            })
            .unwrap_or_else(|| clearance_distance(10.0, 10.0));

        self.state.stats.side_mut(defending).clearances += 1;

        if self.chance(CLEARANCE_CORNER_CHANCE) {
            let event = self
                .event_with_pending(defending, EventKind::Clearance { corner_conceded: true })
                .with_primary(clearer);
            self.emit(event);
            self.resolve_corner(attacking);
            return;
        }

        let dy = self.rng.gen_range(-25.0..25.0);
        let target = self.ball_ahead(defending, distance, dy);
        self.move_ball(SequenceKind::Clearance, clearer, target, 1500);
        let event = self
            .event_with_pending(defending, EventKind::Clearance { corner_conceded: false })
            .with_primary(clearer);
        self.emit(event);

        if self.chance(CLEARANCE_THROW_IN_CHANCE) {
            self.resolve_throw_in(attacking);
        } else {
            // Loose ball
            self.state.possession = if self.rng.gen::<bool>() { defending } else { attacking };
        }
    }
}
