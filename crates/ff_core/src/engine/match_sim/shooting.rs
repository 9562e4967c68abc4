//! Shot Resolution
//!
//! 슈팅 판정 체인 (각 단계는 독립 확률 게이트):
//! 1. 슈팅 전 블록 (수비수 평균 능력치, 수비 인원 부족 시 구조적 페널티)
//! 2. 유효 슈팅 실패 (거리 페널티는 long shots로 상쇄)
//! 3. 골 (슈터 vs 골키퍼)
//! 4. 선방 (35%는 코너: 크로스바 위 / 포스트 옆)
//! 5. 나머지: 라인 위 수비수 블록
//!
//! Each branch emits exactly one shot event, followed by a corner or goal-kick
//! restart where the branch calls for one.

use rand::Rng;

use super::ball_helpers::depth_to_x;
use super::match_state::MatchState;
use super::MatchEngine;
use crate::engine::config::ShotConfig;
use crate::models::{
    Attribute, Coordinates, EventKind, PlayerId, SequenceKind, ShotOutcome, Side,
    NEUTRAL_ATTRIBUTE,
};

/// Effective shooting attributes of one attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShooterProfile {
    pub finishing: f32,
    pub composure: f32,
    pub technique: f32,
    pub decisions: f32,
    pub first_touch: f32,
    pub long_shots: f32,
}

impl ShooterProfile {
    pub fn uniform(v: f32) -> Self {
        Self {
            finishing: v,
            composure: v,
            technique: v,
            decisions: v,
            first_touch: v,
            long_shots: v,
        }
    }

    /// Blend used by the off-target gate.
    pub fn accuracy(&self) -> f32 {
        0.4 * self.finishing + 0.25 * self.composure + 0.2 * self.technique + 0.15 * self.decisions
    }
}

/// Effective goalkeeping attributes; neutral when no keeper is on the pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeeperProfile {
    pub reflexes: f32,
    pub one_on_ones: f32,
    pub positioning: f32,
    pub handling: f32,
}

impl KeeperProfile {
    pub fn uniform(v: f32) -> Self {
        Self { reflexes: v, one_on_ones: v, positioning: v, handling: v }
    }
}

// ============================================================================
// Probability gates (percent)
// ============================================================================

pub fn block_chance(cfg: &ShotConfig, defender_avg: f32, recognized_defenders: usize) -> f32 {
    let missing = cfg.min_recognized_defenders.saturating_sub(recognized_defenders);
    let chance = cfg.block_base + (defender_avg - 10.0) - cfg.structural_penalty * missing as f32;
    cfg.block_clamp.apply(chance)
}

pub fn off_target_chance(cfg: &ShotConfig, shooter: &ShooterProfile, in_attacking_third: bool) -> f32 {
    let mut chance = cfg.off_target_base - (shooter.accuracy() - 10.0) * 1.5;
    if !in_attacking_third {
        chance += cfg.off_target_distance_penalty - (shooter.long_shots - 10.0);
    }
    cfg.off_target_clamp.apply(chance)
}

pub fn goal_chance(cfg: &ShotConfig, shooter: &ShooterProfile, keeper: &KeeperProfile) -> f32 {
    let attack = 0.5 * shooter.finishing + 0.3 * shooter.composure + 0.2 * shooter.first_touch;
    let guard = 0.5 * keeper.reflexes + 0.3 * keeper.one_on_ones + 0.2 * keeper.positioning;
    cfg.goal_clamp.apply(cfg.goal_base + (attack - 10.0) * 2.0 - (guard - 10.0) * 2.0)
}

pub fn save_chance(cfg: &ShotConfig, shooter: &ShooterProfile, keeper: &KeeperProfile) -> f32 {
    let guard = (keeper.reflexes + keeper.handling + keeper.positioning) / 3.0;
    let attack = (shooter.finishing + shooter.technique) / 2.0;
    cfg.save_clamp.apply(cfg.save_base + (guard - 10.0) * 2.0 - (attack - 10.0))
}

impl MatchState {
    pub fn shooter_profile(&self, id: PlayerId) -> ShooterProfile {
        ShooterProfile {
            finishing: self.effective(id, Attribute::Finishing),
            composure: self.effective(id, Attribute::Composure),
            technique: self.effective(id, Attribute::Technique),
            decisions: self.effective(id, Attribute::Decisions),
            first_touch: self.effective(id, Attribute::FirstTouch),
            long_shots: self.effective(id, Attribute::LongShots),
        }
    }

    pub fn keeper_profile(&self, side: Side) -> KeeperProfile {
        KeeperProfile {
            reflexes: self.keeper_effective(side, Attribute::Reflexes),
            one_on_ones: self.keeper_effective(side, Attribute::OneOnOnes),
            positioning: self.keeper_effective(side, Attribute::Positioning),
            handling: self.keeper_effective(side, Attribute::Handling),
        }
    }

    /// Mean blocking quality of `side`'s recognized defenders.
    pub fn defensive_wall(&self, side: Side) -> (f32, usize) {
        const ATTRS: [Attribute; 4] = [
            Attribute::Positioning,
            Attribute::Marking,
            Attribute::Concentration,
            Attribute::Strength,
        ];
        let defenders = self.recognized_defenders(side);
        if defenders.is_empty() {
            return (NEUTRAL_ATTRIBUTE, 0);
        }
        let avg = defenders.iter().map(|&id| self.effective_avg(id, &ATTRS)).sum::<f32>()
            / defenders.len() as f32;
        (avg, defenders.len())
    }
}

impl<R: Rng> MatchEngine<R> {
    /// Shot triggered by the micro-action selector.
    pub(crate) fn resolve_open_play_shot(&mut self, side: Side) {
        if let Some(shooter) = self.select_shooter(side) {
            self.resolve_shot(side, shooter, false);
        }
    }

    /// Full shot chain for `shooter`. Free kicks name the taker as the nominal
    /// assist provider without crediting an assist.
    pub(crate) fn resolve_shot(&mut self, side: Side, shooter: PlayerId, free_kick: bool) {
        let defending = side.opponent();
        let cfg = self.state.config.shot.clone();
        let in_third = self.state.in_attacking_third();
        let profile = self.state.shooter_profile(shooter);
        let keeper = self.state.keeper_profile(defending);
        let shot = |outcome| EventKind::Shot { outcome, free_kick };

        self.state.stats.side_mut(side).shots += 1;

        // 1. Blocked before release
        let (wall, defenders) = self.state.defensive_wall(defending);
        if self.chance(block_chance(&cfg, wall, defenders)) {
            let blocker = self
                .select_defender(defending, &[Attribute::Positioning, Attribute::Marking]);
            let deflection = self.ball_ahead(side, 2.0, 0.0);
            self.move_ball(SequenceKind::Shot, Some(shooter), deflection, 300);
            self.move_ball(SequenceKind::Block, blocker, deflection, 200);
            let event = self
                .event_with_pending(side, shot(ShotOutcome::Blocked))
                .with_primary(Some(shooter))
                .with_secondary(blocker);
            self.emit(event);
            self.after_block(side, cfg.block_corner_chance);
            return;
        }

        // 2. Off target
        if self.chance(off_target_chance(&cfg, &profile, in_third)) {
            let wide = if self.rng.gen::<bool>() { self.rng.gen_range(30.0..42.0) } else { self.rng.gen_range(58.0..70.0) };
            let target = Coordinates::new(depth_to_x(side, 100.0), wide);
            self.move_ball(SequenceKind::Shot, Some(shooter), target, 700);
            let event =
                self.event_with_pending(side, shot(ShotOutcome::OffTarget)).with_primary(Some(shooter));
            self.emit(event);
            self.resolve_goal_kick(defending);
            return;
        }

        // 3. Goal
        if self.chance(goal_chance(&cfg, &profile, &keeper)) {
            let assister = if free_kick {
                Some(shooter)
            } else if self.chance(cfg.assist_chance) {
                self.select_assister(side, shooter)
            } else {
                None
            };
            let y = self.rng.gen_range(45.0..55.0);
            self.move_ball(SequenceKind::Shot, Some(shooter), Coordinates::new(depth_to_x(side, 100.0), y), 600);
            self.state.stats.side_mut(side).shots_on_target += 1;
            let event = self
                .event_with_pending(side, shot(ShotOutcome::Goal))
                .with_primary(Some(shooter))
                .with_secondary(assister);
            self.emit(event);
            let credited = assister.filter(|&a| a != shooter);
            self.register_goal(side, shooter, credited);
            return;
        }

        // 4. Saved
        let keeper_id = self.state.goalkeeper(defending);
        if self.chance(save_chance(&cfg, &profile, &keeper)) {
            let y = self.rng.gen_range(40.0..60.0);
            self.move_ball(SequenceKind::Shot, Some(shooter), Coordinates::new(depth_to_x(side, 96.0), y), 600);
            self.move_ball(SequenceKind::Save, keeper_id, self.state.ball, 300);
            self.state.stats.side_mut(side).shots_on_target += 1;
            self.state.stats.side_mut(defending).saves += 1;

            let outcome = if self.chance(cfg.save_corner_chance) {
                if self.rng.gen::<bool>() {
                    ShotOutcome::TippedOver
                } else {
                    ShotOutcome::ParriedWide
                }
            } else {
                ShotOutcome::Saved
            };
            let event = self
                .event_with_pending(side, shot(outcome))
                .with_primary(Some(shooter))
                .with_secondary(keeper_id);
            self.emit(event);

            if outcome == ShotOutcome::Saved {
                self.state.possession = defending;
                self.place_ball_at_depth(defending, 6.0);
            } else {
                self.resolve_corner(side);
            }
            return;
        }

        // 5. Blocked on the line
        let blocker = self.select_defender(defending, &[Attribute::Positioning, Attribute::Bravery]);
        let line = Coordinates::new(depth_to_x(side, 98.0), self.rng.gen_range(44.0..56.0));
        self.move_ball(SequenceKind::Shot, Some(shooter), line, 600);
        self.move_ball(SequenceKind::Block, blocker, line, 200);
        let event = self
            .event_with_pending(side, shot(ShotOutcome::BlockedOnLine))
            .with_primary(Some(shooter))
            .with_secondary(blocker);
        self.emit(event);
        self.after_block(side, cfg.late_block_corner_chance);
    }

    /// Block aftermath: corner to the attackers or a loose ball to the defence.
    fn after_block(&mut self, side: Side, corner_chance: f32) {
        if self.chance(corner_chance) {
            self.resolve_corner(side);
        } else {
            self.state.possession = side.opponent();
        }
    }

    /// Score, scorer/assist stats and morale, then reset for the restart.
    pub(crate) fn register_goal(&mut self, side: Side, scorer: PlayerId, assister: Option<PlayerId>) {
        let deltas = self.state.config.condition.deltas.clone();
        self.state.score.increment(side);

        if let Some(ps) = self.state.player_states.get_mut(&scorer) {
            ps.goals += 1;
        }
        self.state.adjust_morale(scorer, deltas.goal);
        if let Some(a) = assister {
            if let Some(ps) = self.state.player_states.get_mut(&a) {
                ps.assists += 1;
            }
            self.state.adjust_morale(a, deltas.assist);
        }
        self.state.adjust_team_morale(side, deltas.team_scored);
        self.state.adjust_team_morale(side.opponent(), deltas.conceded);

        log::debug!(
            "{}' GOAL {} ({}) {}-{}",
            self.state.minute,
            self.state.player_name(scorer),
            side,
            self.state.score.home,
            self.state.score.away
        );

        let conceding = side.opponent();
        self.state.possession = conceding;
        self.place_ball(Coordinates::CENTRE);
        self.kickoff_pending = Some(conceding);
    }
}
