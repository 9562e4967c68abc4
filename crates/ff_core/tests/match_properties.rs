//! Whole-match property tests
//!
//! 여러 시드로 전체 경기를 돌려 불변식을 검사한다:
//! 공 좌표 범위, 시계, 스코어 = 골 이벤트 수, 퇴장 선수 미등장,
//! 교체 상한, 피로/사기 범위, 결정론.

use std::collections::BTreeMap;

use ff_core::demo::demo_match;
use ff_core::engine::config::EngineConfig;
use ff_core::engine::match_sim::shooting::{goal_chance, KeeperProfile, ShooterProfile};
use ff_core::engine::match_sim::{MatchEngine, MatchOptions, MatchPhase, MatchState, MatchTick};
use ff_core::models::{
    Formation, MatchInput, Player, PlayerAttributes, PlayerId, Position, Side, Team, TeamSheet,
};
use ff_core::tactics::{Tactic, TacticalPreset};
use sha2::{Digest, Sha256};

const SQUAD: [Position; 18] = [
    Position::GK,
    Position::LB,
    Position::CB,
    Position::CB,
    Position::RB,
    Position::LM,
    Position::CM,
    Position::CM,
    Position::RM,
    Position::ST,
    Position::ST,
    Position::GK,
    Position::CB,
    Position::RB,
    Position::CM,
    Position::CDM,
    Position::ST,
    Position::RW,
];

fn team(name: &str, first_id: PlayerId, value: u8) -> Team {
    Team {
        name: name.to_string(),
        players: SQUAD
            .iter()
            .enumerate()
            .map(|(i, &position)| Player {
                id: first_id + i as PlayerId,
                name: format!("{} {}", name, i + 1),
                position,
                shirt_number: Some(i as u8 + 1),
                attributes: PlayerAttributes::uniform(value),
            })
            .collect(),
    }
}

fn uniform_match(home: u8, away: u8) -> MatchInput {
    MatchInput::new(
        TeamSheet::new(team("Home", 1, home), Formation::default_442(), Tactic::default()),
        TeamSheet::new(team("Away", 101, away), Formation::default_442(), Tactic::default()),
    )
}

/// Aggressive sides so that cards and send-offs actually happen.
fn rough_match() -> MatchInput {
    let mut input = uniform_match(12, 12);
    for side in Side::BOTH {
        let sheet = input.sheet_mut(side);
        sheet.tactic = Tactic::for_style(TacticalPreset::HighPressing);
        sheet.tactic.tackle_harder = true;
        sheet.tactic.get_stuck_in = true;
        for player in &mut sheet.team.players {
            player.attributes.aggression = 20;
            player.attributes.bravery = 20;
        }
    }
    input
}

fn options(injury_time: [u8; 2]) -> MatchOptions {
    MatchOptions { injury_time: Some(injury_time), ..MatchOptions::default() }
}

/// Runs a match, checking per-minute player bounds against the live state.
fn run_checked(input: &MatchInput, seed: u64) -> (Vec<MatchTick>, MatchState) {
    let mut engine = MatchEngine::new(input, seed).unwrap();
    let mut ticks = Vec::new();
    while let Some(tick) = engine.next() {
        for ps in engine.state().player_states.values() {
            assert!(
                (0.0..=1.0).contains(&ps.fatigue),
                "seed {seed} minute {}: fatigue {} out of range",
                tick.minute,
                ps.fatigue
            );
            assert!(
                (1.0..=10.0).contains(&ps.morale),
                "seed {seed} minute {}: morale {} out of range",
                tick.minute,
                ps.morale
            );
        }
        ticks.push(tick);
    }
    let state = engine.state().clone();
    (ticks, state)
}

fn seeds() -> impl Iterator<Item = u64> {
    (0..24u64).map(|s| s * 7919 + 11)
}

#[test]
fn test_ball_stays_on_pitch() {
    for seed in seeds() {
        let (ticks, _) = run_checked(&demo_match(), seed);
        for tick in &ticks {
            assert!((2.0..=98.0).contains(&tick.ball.x), "seed {seed}: ball.x {}", tick.ball.x);
            assert!((2.0..=98.0).contains(&tick.ball.y), "seed {seed}: ball.y {}", tick.ball.y);
            for event in &tick.events {
                assert!(event.coordinates.in_bounds(), "seed {seed}: {:?}", event);
            }
        }
    }
}

#[test]
fn test_clock_advances_one_minute_at_a_time() {
    for seed in seeds() {
        let (ticks, state) = run_checked(&uniform_match(12, 11), seed);
        let [it1, it2] = state.injury_time;
        assert!((1..=4).contains(&it1));
        assert!((1..=5).contains(&it2));

        let played: Vec<&MatchTick> = ticks.iter().filter(|t| !t.is_structural()).collect();
        assert_eq!(played.first().map(|t| t.minute), Some(1));
        assert_eq!(played.last().map(|t| t.minute), Some(90 + it2));

        for window in played.windows(2) {
            let (a, b) = (window[0].minute, window[1].minute);
            assert!(b == a + 1 || (a == 45 + it1 && b == 46), "seed {seed}: {a} -> {b}");
        }
        for tick in &played {
            assert!(tick.minute >= 1 && tick.minute <= 90 + it2);
        }
        for (i, tick) in ticks.iter().enumerate() {
            assert_eq!(tick.index as usize, i);
        }
        assert_eq!(ticks.len(), 45 + it1 as usize + 1 + 45 + it2 as usize + 1);
    }
}

#[test]
fn test_fixed_injury_time_gives_97_ticks() {
    let engine = MatchEngine::with_options(&demo_match(), 2024, options([2, 3])).unwrap();
    let ticks: Vec<MatchTick> = engine.collect();
    assert_eq!(ticks.len(), 97);
    assert_eq!(ticks[47].phase, MatchPhase::HalfTime);
    assert_eq!(ticks[47].minute, 45);
    assert_eq!(ticks[48].minute, 46);
    assert_eq!(ticks[96].phase, MatchPhase::FullTime);
    assert_eq!(ticks[96].minute, 90);
    assert_eq!(ticks[95].minute, 93);
}

#[test]
fn test_goal_events_match_score() {
    for seed in seeds() {
        let (ticks, state) = run_checked(&demo_match(), seed);
        for side in Side::BOTH {
            let goals = ticks
                .iter()
                .flat_map(|t| t.goals())
                .filter(|e| e.side == side)
                .count();
            assert_eq!(goals, usize::from(state.score.get(side)), "seed {seed} side {side}");
        }
        let last = ticks.last().unwrap();
        assert_eq!(last.score, state.score);
        assert_eq!(last.stats, state.stats);
    }
}

#[test]
fn test_sent_off_players_disappear() {
    let input = rough_match();
    let mut send_offs = 0;
    for seed in seeds() {
        let (ticks, state) = run_checked(&input, seed);

        // tick index at which each player was sent off
        let mut sent_off_at: BTreeMap<PlayerId, u32> = BTreeMap::new();
        for tick in &ticks {
            for event in &tick.events {
                let terminal = matches!(
                    event.kind,
                    ff_core::models::EventKind::RedCard | ff_core::models::EventKind::SecondYellow
                );
                if terminal {
                    if let Some(id) = event.primary {
                        sent_off_at.entry(id).or_insert(tick.index);
                    }
                }
            }
        }

        for (&id, &at) in &sent_off_at {
            assert!(state.player_states[&id].sent_off, "seed {seed}: {id} not marked sent off");
            for tick in ticks.iter().filter(|t| t.index > at) {
                for event in &tick.events {
                    assert!(
                        !event.involved_players().any(|p| p == id),
                        "seed {seed}: sent-off player {id} appears in {:?}",
                        event
                    );
                }
            }
        }
        for side in Side::BOTH {
            let off = state
                .player_states
                .values()
                .filter(|ps| ps.side == side && ps.sent_off)
                .count();
            assert_eq!(state.available_players(side).len(), 11 - off);
        }
        send_offs += sent_off_at.len();
    }
    assert!(send_offs > 0, "rough matches should produce at least one send-off");
}

#[test]
fn test_substitutions_capped_at_five() {
    for seed in seeds() {
        let (ticks, state) = run_checked(&demo_match(), seed);
        for side in Side::BOTH {
            let records = &state.side(side).substitutions;
            assert!(records.len() <= 5, "seed {seed}: {} subs", records.len());
            assert!(records.iter().all(|r| r.minute >= 60));
            let events = ticks
                .iter()
                .flat_map(|t| t.events.iter())
                .filter(|e| e.side == side && e.kind == ff_core::models::EventKind::Substitution)
                .count();
            assert_eq!(events, records.len());
        }
    }
}

#[test]
fn test_nine_men_never_field_more_than_nine() {
    let input = uniform_match(12, 12);
    let mut state = MatchState::from_source(&input, EngineConfig::default(), [2, 3]);
    let lineup = state.home.lineup.clone();
    for id in [lineup[2], lineup[7]] {
        state.player_states.get_mut(&id).unwrap().sent_off = true;
    }
    assert_eq!(state.available_players(Side::Home).len(), 9);

    state.minute = 70;
    for p in state.player_states.values_mut() {
        p.fatigue = 0.8;
    }
    for _ in 0..5 {
        let Some(off) = state.substitution_candidate(Side::Home) else { break };
        let Some(on) = state.best_replacement(Side::Home, off) else { break };
        state.apply_substitution(Side::Home, off, on);
        assert!(state.available_players(Side::Home).len() <= 9);
        assert!(!state.available_players(Side::Home).contains(&lineup[2]));
        assert!(!state.available_players(Side::Home).contains(&lineup[7]));
    }
}

#[test]
fn test_elite_finisher_against_weak_keeper() {
    let cfg = EngineConfig::default();
    let shooter = ShooterProfile { finishing: 20.0, composure: 20.0, ..ShooterProfile::uniform(10.0) };
    let keeper = KeeperProfile { reflexes: 1.0, ..KeeperProfile::uniform(10.0) };
    let chance = goal_chance(&cfg.shot, &shooter, &keeper);
    assert!(chance >= 44.0, "goal chance {chance}");
    assert_eq!(chance, cfg.shot.goal_clamp.max);
}

#[test]
fn test_same_seed_same_digest() {
    fn digest(input: &MatchInput, seed: u64) -> String {
        let report = MatchEngine::new(input, seed).unwrap().run_to_completion();
        let bytes = serde_json::to_vec(&report.ticks).unwrap();
        Sha256::digest(&bytes).iter().map(|b| format!("{:02x}", b)).collect()
    }

    let input = demo_match();
    for seed in [1, 77, 4096] {
        assert_eq!(digest(&input, seed), digest(&input, seed), "seed {seed}");
    }
    assert_ne!(digest(&input, 1), digest(&input, 2));
}
