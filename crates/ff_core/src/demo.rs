//! Demo Fixture
//!
//! 결정론적 데모 경기: 22명 스쿼드 두 팀, 포지션에 맞는 능력치,
//! 4-4-2 (high pressing) vs 4-3-3 (counterattack).
//! CLI `demo` 명령, 벤치마크, 통합 테스트에서 사용.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::{
    Formation, MatchInput, Player, PlayerAttributes, PlayerId, Position, Team, TeamSheet,
};
use crate::tactics::{Tactic, TacticalPreset};

const HOME_SQUAD: [(&str, Position); 22] = [
    ("Tomas Vrba", Position::GK),
    ("Luis Arantes", Position::LB),
    ("Mark Ellery", Position::CB),
    ("Jonas Lind", Position::CB),
    ("Kofi Mensah", Position::RB),
    ("Davide Russo", Position::LM),
    ("Sean Doyle", Position::CM),
    ("Ilya Petrov", Position::CM),
    ("Hugo Marchand", Position::RM),
    ("Bruno Costa", Position::ST),
    ("Owen Price", Position::ST),
    ("Pieter Smit", Position::GK),
    ("Aaron Kelly", Position::CB),
    ("Nils Berg", Position::LB),
    ("Yusuf Demir", Position::RB),
    ("Marco Neri", Position::CDM),
    ("Theo Laurent", Position::CM),
    ("Ryan Walsh", Position::CAM),
    ("Samir Haddad", Position::LW),
    ("Jakub Novak", Position::RW),
    ("Diego Ruiz", Position::ST),
    ("Erik Holm", Position::CF),
];

const AWAY_SQUAD: [(&str, Position); 22] = [
    ("Andrea Conti", Position::GK),
    ("Felix Braun", Position::LB),
    ("Oscar Lund", Position::CB),
    ("Tiago Reis", Position::CB),
    ("Callum Reid", Position::RB),
    ("Mateo Silva", Position::CM),
    ("Karim Saidi", Position::CDM),
    ("Lukas Weber", Position::CM),
    ("Adam Kowalski", Position::LW),
    ("Victor Dumas", Position::ST),
    ("Jamal Okafor", Position::RW),
    ("Rui Almeida", Position::GK),
    ("Stefan Ilic", Position::CB),
    ("Noah Fischer", Position::CB),
    ("Leon Hartmann", Position::LWB),
    ("Daniel Moreno", Position::RWB),
    ("Emil Strand", Position::CM),
    ("Paulo Gomes", Position::CAM),
    ("Finn Murphy", Position::LM),
    ("Ivan Horvat", Position::RM),
    ("Kenji Sato", Position::ST),
    ("Mattia Greco", Position::CF),
];

fn clamp_rating(value: i16) -> u8 {
    value.clamp(1, 20) as u8
}

fn adjust(rating: &mut u8, delta: i16) {
    *rating = clamp_rating(i16::from(*rating) + delta);
}

/// Ratings around `base`, shaped by the natural position.
pub fn demo_attributes(position: Position, base: u8, rng: &mut impl Rng) -> PlayerAttributes {
    let mut a = PlayerAttributes::uniform(base);

    // 개인차: 모든 능력치 ±2
    macro_rules! jitter {
        ($($field:ident),* $(,)?) => {
            $( adjust(&mut a.$field, rng.gen_range(-2..=2)); )*
        };
    }
    jitter!(
        corners, crossing, dribbling, finishing, first_touch, free_kick_taking, heading,
        long_shots, long_throws, marking, passing, penalty_taking, tackling, technique,
        aggression, anticipation, bravery, composure, concentration, decisions, determination,
        flair, leadership, off_the_ball, positioning, teamwork, vision, work_rate,
        acceleration, agility, balance, jumping_reach, natural_fitness, pace, stamina, strength,
        aerial_reach, command_of_area, communication, eccentricity, handling, kicking,
        one_on_ones, reflexes, rushing_out, throwing,
    );

    if position.is_goalkeeper() {
        for r in [
            &mut a.reflexes,
            &mut a.handling,
            &mut a.one_on_ones,
            &mut a.aerial_reach,
            &mut a.command_of_area,
            &mut a.positioning,
        ] {
            adjust(r, 5);
        }
        for r in [&mut a.finishing, &mut a.dribbling, &mut a.long_shots, &mut a.crossing] {
            adjust(r, -5);
        }
    } else if position.is_defender() {
        for r in [&mut a.tackling, &mut a.marking, &mut a.heading, &mut a.strength, &mut a.positioning] {
            adjust(r, 4);
        }
        for r in [&mut a.finishing, &mut a.flair, &mut a.long_shots] {
            adjust(r, -3);
        }
        for r in [&mut a.reflexes, &mut a.handling, &mut a.one_on_ones] {
            adjust(r, -6);
        }
    } else if position.is_midfielder() {
        for r in [
            &mut a.passing,
            &mut a.vision,
            &mut a.technique,
            &mut a.first_touch,
            &mut a.teamwork,
            &mut a.stamina,
        ] {
            adjust(r, 3);
        }
        for r in [&mut a.reflexes, &mut a.handling, &mut a.one_on_ones] {
            adjust(r, -6);
        }
    } else {
        for r in [
            &mut a.finishing,
            &mut a.composure,
            &mut a.off_the_ball,
            &mut a.dribbling,
            &mut a.pace,
        ] {
            adjust(r, 4);
        }
        for r in [&mut a.tackling, &mut a.marking, &mut a.reflexes, &mut a.handling] {
            adjust(r, -4);
        }
    }
    if position.is_wide() {
        adjust(&mut a.crossing, 3);
        adjust(&mut a.pace, 2);
    }

    a.current_ability = (f32::from(base) * 10.0 + rng.gen_range(-8.0..8.0)).clamp(1.0, 200.0);
    a
}

/// Squad with ids `first_id..`, shirt numbers in squad order.
pub fn demo_team(
    name: &str,
    first_id: PlayerId,
    base: u8,
    squad: &[(&str, Position)],
    seed: u64,
) -> Team {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let players = squad
        .iter()
        .enumerate()
        .map(|(i, &(player_name, position))| Player {
            id: first_id + i as PlayerId,
            name: player_name.to_string(),
            position,
            shirt_number: Some(i as u8 + 1),
            attributes: demo_attributes(position, base, &mut rng),
        })
        .collect();
    Team { name: name.to_string(), players }
}

/// Harbor City (4-4-2, high pressing) vs Ridgeway Athletic (4-3-3, counterattack).
pub fn demo_match() -> MatchInput {
    let home = TeamSheet::new(
        demo_team("Harbor City", 1, 13, &HOME_SQUAD, 0x4843),
        Formation::default_442(),
        Tactic::for_style(TacticalPreset::HighPressing),
    );
    let away = TeamSheet::new(
        demo_team("Ridgeway Athletic", 101, 12, &AWAY_SQUAD, 0x5241),
        Formation::preset("4-3-3").unwrap_or_default(),
        Tactic::for_style(TacticalPreset::Counterattack),
    );
    MatchInput::new(home, away)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{validate_source, FORMATION_SIZE};

    #[test]
    fn test_demo_is_valid_and_deterministic() {
        let input = demo_match();
        assert!(validate_source(&input).is_ok());
        assert_eq!(input.home.team.players.len(), 22);
        assert_eq!(input.away.team.players.len(), 22);
        assert_eq!(input.away.formation.slots.len(), FORMATION_SIZE);

        let again = demo_match();
        assert_eq!(input.home.team.players, again.home.team.players);
        assert_eq!(input.away.team.players, again.away.team.players);
    }

    #[test]
    fn test_keepers_keep_goal() {
        let input = demo_match();
        let keeper = &input.home.team.players[0];
        let striker = &input.home.team.players[9];
        assert!(keeper.attributes.reflexes > striker.attributes.reflexes);
        assert!(striker.attributes.finishing > keeper.attributes.finishing);
    }

    #[test]
    fn test_ratings_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for position in [Position::GK, Position::CB, Position::CM, Position::ST, Position::RW] {
            for base in [1, 10, 20] {
                let a = demo_attributes(position, base, &mut rng);
                assert!((1..=20).contains(&a.finishing));
                assert!((1..=20).contains(&a.reflexes));
                assert!((1..=20).contains(&a.crossing));
                assert!((1.0..=200.0).contains(&a.current_ability));
            }
        }
    }
}
