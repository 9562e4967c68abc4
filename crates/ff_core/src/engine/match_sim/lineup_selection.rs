//! Lineup Selection & State Initialization
//!
//! Builds the [`MatchState`] from a [`MatchSource`]:
//! - formation 슬롯 해석 (11개가 아니면 기본 4-4-2로 대체)
//! - 저장된 라인업이 유효 11명 이상이면 그대로 사용
//! - 아니면 슬롯마다 current ability 기준 greedy 자동 선발
//! - 남은 선수는 벤치

use std::collections::{BTreeMap, BTreeSet};

use super::match_phase::MatchPhase;
use super::match_state::{MatchState, PlayerState, SideState};
use super::pitch_zone::Zone;
use crate::engine::config::EngineConfig;
use crate::models::{
    Coordinates, Formation, FormationSlot, MatchSource, MatchStats, Player, PlayerId, Position,
    Score, Side, Team, FORMATION_SIZE,
};

/// Resolved starting XI (slot order, with assigned positions) and bench.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLineup {
    pub slots: Vec<FormationSlot>,
    pub starters: Vec<(PlayerId, Position)>,
    pub bench: Vec<PlayerId>,
}

/// Formation slots, degrading to the built-in 4-4-2.
pub fn resolve_slots(formation: &Formation, side: Side) -> Vec<FormationSlot> {
    match formation.resolved_slots() {
        Some(slots) => slots,
        None => {
            log::warn!(
                "{} formation '{}' has {} slots; using default 4-4-2",
                side,
                formation.name,
                formation.slots.len()
            );
            Formation::default_442().slots
        }
    }
}

/// Resolve one side's starting XI and bench.
pub fn resolve_lineup(source: &dyn MatchSource, side: Side) -> ResolvedLineup {
    let team = source.team(side);
    let slots = resolve_slots(source.formation(side), side);

    let starters = match stored_starters(team, source, side, &slots) {
        Some(starters) => starters,
        None => auto_select(team, &slots),
    };

    let used: BTreeSet<PlayerId> = starters.iter().map(|(id, _)| *id).collect();
    let bench = team.players.iter().map(|p| p.id).filter(|id| !used.contains(id)).collect();

    ResolvedLineup { slots, starters, bench }
}

/// Stored lineup if it has at least eleven valid entries.
fn stored_starters(
    team: &Team,
    source: &dyn MatchSource,
    side: Side,
    slots: &[FormationSlot],
) -> Option<Vec<(PlayerId, Position)>> {
    let stored = source.stored_lineup(side);
    if stored.is_empty() {
        return None;
    }

    let mut seen = BTreeSet::new();
    let valid: Vec<_> = stored
        .iter()
        .filter(|entry| team.player(entry.player_id).is_some() && seen.insert(entry.player_id))
        .take(FORMATION_SIZE)
        .collect();

    if valid.len() < FORMATION_SIZE {
        log::warn!(
            "{} stored lineup has {} valid entries; falling back to auto-selection",
            side,
            valid.len()
        );
        return None;
    }

    log::debug!("{} using stored lineup", side);
    Some(
        valid
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.player_id, entry.position.unwrap_or(slots[i].position)))
            .collect(),
    )
}

/// Greedy per-slot selection by current ability: natural fit first, then
/// compatible, then anyone left (outfielders before keepers for outfield slots).
pub fn auto_select(team: &Team, slots: &[FormationSlot]) -> Vec<(PlayerId, Position)> {
    let mut used = BTreeSet::new();
    let mut starters = Vec::with_capacity(slots.len());

    for slot in slots {
        let tiers: [&dyn Fn(&Player) -> bool; 4] = [
            &|p: &Player| p.position == slot.position,
            &|p: &Player| p.position.is_compatible_position(slot.position),
            &|p: &Player| p.position.is_goalkeeper() == slot.position.is_goalkeeper(),
            &|_: &Player| true,
        ];

        let pick = tiers.iter().find_map(|tier| {
            best_by_ability(team.players.iter().filter(|p| !used.contains(&p.id) && tier(*p)))
        });

        if let Some(player) = pick {
            used.insert(player.id);
            starters.push((player.id, slot.position));
        }
    }

    starters
}

/// Highest current ability; earliest in squad order on ties.
fn best_by_ability<'a>(players: impl Iterator<Item = &'a Player>) -> Option<&'a Player> {
    players.fold(None, |best: Option<&Player>, p| match best {
        Some(b) if b.current_ability() >= p.current_ability() => Some(b),
        _ => Some(p),
    })
}

// ============================================================================
// State initialization
// ============================================================================

impl MatchState {
    /// Fully initialized state, ready for the first tick.
    pub fn from_source(
        source: &dyn MatchSource,
        config: EngineConfig,
        injury_time: [u8; 2],
    ) -> MatchState {
        let neutral = config.condition.morale_neutral;
        let mut players = BTreeMap::new();
        let mut player_states = BTreeMap::new();

        let mut build_side = |side: Side| -> SideState {
            let team = source.team(side);
            let resolved = resolve_lineup(source, side);

            for player in &team.players {
                players.insert(player.id, player.clone());
                player_states
                    .insert(player.id, PlayerState::new(player.id, side, player.position, neutral));
            }
            for (id, position) in &resolved.starters {
                if let Some(ps) = player_states.get_mut(id) {
                    ps.position = *position;
                }
            }

            let lineup: Vec<PlayerId> = resolved.starters.iter().map(|(id, _)| *id).collect();
            SideState {
                name: team.name.clone(),
                tactic: source.tactic(side).clone(),
                slots: resolved.slots,
                starting_lineup: lineup.clone(),
                lineup,
                bench: resolved.bench,
                set_piece_takers: Default::default(),
                substitutions: Vec::new(),
                possession_minutes: 0,
            }
        };

        let home = build_side(Side::Home);
        let away = build_side(Side::Away);

        let mut state = MatchState {
            minute: 0,
            phase: MatchPhase::Kickoff,
            score: Score::default(),
            possession: Side::Home,
            zone: Zone::KICKOFF,
            ball: Coordinates::CENTRE,
            home,
            away,
            players,
            player_states,
            stats: MatchStats::default(),
            injury_time,
            config,
        };
        for side in Side::BOTH {
            state.refresh_set_piece_takers(side);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::{uniform_input, FOUR_FOUR_TWO_SQUAD};
    use crate::models::{LineupEntry, MatchInput};

    #[test]
    fn test_auto_select_fills_every_slot_by_position() {
        let input = uniform_input(12);
        let resolved = resolve_lineup(&input, Side::Home);
        assert_eq!(resolved.starters.len(), 11);
        assert_eq!(resolved.bench.len(), 7);
        for (i, (id, assigned)) in resolved.starters.iter().enumerate() {
            assert_eq!(*assigned, resolved.slots[i].position);
            let natural = input.home.team.player(*id).unwrap().position;
            assert_eq!(natural, *assigned, "slot {} should get a natural fit", i);
        }
    }

    #[test]
    fn test_auto_select_prefers_higher_ability() {
        let mut input = uniform_input(12);
        // Bench striker (squad index 16) is better than both starting strikers
        input.home.team.players[16].attributes.current_ability = 190.0;
        let resolved = resolve_lineup(&input, Side::Home);
        let bench_star = input.home.team.players[16].id;
        assert!(resolved.starters.iter().any(|(id, _)| *id == bench_star));
        assert!(!resolved.bench.contains(&bench_star));
    }

    #[test]
    fn test_stored_lineup_used_verbatim() {
        let mut input = uniform_input(12);
        let ids: Vec<PlayerId> = input.home.team.players.iter().rev().take(11).map(|p| p.id).collect();
        input.home.lineup =
            ids.iter().map(|&player_id| LineupEntry { player_id, position: None }).collect();
        let resolved = resolve_lineup(&input, Side::Home);
        let starters: Vec<PlayerId> = resolved.starters.iter().map(|(id, _)| *id).collect();
        assert_eq!(starters, ids);
        assert_eq!(resolved.starters[0].1, Position::GK, "slot position when entry has none");
    }

    #[test]
    fn test_short_stored_lineup_rejected() {
        let mut input = uniform_input(12);
        input.home.lineup = input.home.team.players[..10]
            .iter()
            .map(|p| LineupEntry { player_id: p.id, position: Some(p.position) })
            .chain(std::iter::once(LineupEntry { player_id: 9_999, position: None }))
            .collect();
        let resolved = resolve_lineup(&input, Side::Home);
        assert_eq!(resolved.starters, auto_select(&input.home.team, &resolved.slots));
    }

    #[test]
    fn test_broken_formation_uses_default() {
        let mut input = uniform_input(12);
        input.away.formation.slots = Formation::default_442().slots[..7].to_vec();
        let resolved = resolve_lineup(&input, Side::Away);
        assert_eq!(resolved.slots, Formation::default_442().slots);
    }

    #[test]
    fn test_thin_squad_still_gets_eleven() {
        // Eleven strikers: every slot after the first falls through to "anyone"
        let mut input: MatchInput = uniform_input(12);
        for p in input.home.team.players.iter_mut() {
            p.position = Position::ST;
        }
        let resolved = resolve_lineup(&input, Side::Home);
        assert_eq!(resolved.starters.len(), 11);
        assert_eq!(resolved.starters[0].1, Position::GK);
    }

    #[test]
    fn test_state_initialization() {
        let state = MatchState::from_source(&uniform_input(11), EngineConfig::default(), [2, 3]);
        assert_eq!(state.players.len(), 2 * FOUR_FOUR_TWO_SQUAD.len());
        assert_eq!(state.player_states.len(), state.players.len());
        assert_eq!(state.home.lineup.len(), 11);
        assert_eq!(state.away.bench.len(), 7);
        assert!(state.player_states.values().all(|s| s.morale == 7.0 && s.fatigue == 0.0));
        assert!(state.home.set_piece_takers.penalties.is_some());
        assert_eq!(state.injury_time, [2, 3]);
    }
}
