//! Batch Simulation
//!
//! 시드마다 독립된 경기를 rayon으로 병렬 실행. 경기 간 공유 상태 없음.
//! 결과는 입력 시드 순서를 유지한다.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::config::EngineConfig;
use crate::engine::match_sim::{MatchEngine, MatchOptions};
use crate::error::Result;
use crate::models::{MatchInput, MatchStats, Score, Side, TeamStats};

/// Final score and stats of one seeded run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSummary {
    pub seed: u64,
    pub score: Score,
    pub stats: MatchStats,
}

/// Averages over a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BatchSummary {
    pub matches: usize,
    pub avg_goals: f32,
    pub avg_shots: f32,
    pub avg_shots_on_target: f32,
    pub avg_cards: f32,
    pub avg_corners: f32,
    pub home_win_rate: f32,
    pub draw_rate: f32,
    pub away_win_rate: f32,
}

impl BatchSummary {
    pub fn from_summaries(summaries: &[MatchSummary]) -> Self {
        if summaries.is_empty() {
            return Self::default();
        }
        let n = summaries.len() as f32;
        let per_match = |f: &dyn Fn(&MatchSummary) -> f32| summaries.iter().map(f).sum::<f32>() / n;
        let both = |f: fn(&TeamStats) -> u16| {
            move |m: &MatchSummary| f32::from(f(&m.stats.home) + f(&m.stats.away))
        };
        let rate = |w: Option<Side>| summaries.iter().filter(|m| m.score.winner() == w).count() as f32 / n;

        Self {
            matches: summaries.len(),
            avg_goals: per_match(&|m| f32::from(m.score.home) + f32::from(m.score.away)),
            avg_shots: per_match(&both(|s| s.shots)),
            avg_shots_on_target: per_match(&both(|s| s.shots_on_target)),
            avg_cards: per_match(&both(|s| s.cards())),
            avg_corners: per_match(&both(|s| s.corners)),
            home_win_rate: rate(Some(Side::Home)),
            draw_rate: rate(None),
            away_win_rate: rate(Some(Side::Away)),
        }
    }
}

/// One full match per seed, in parallel.
pub fn simulate_batch(input: &MatchInput, seeds: &[u64], config: &EngineConfig) -> Result<Vec<MatchSummary>> {
    info!(runs = seeds.len(), "batch simulation started");

    let summaries = seeds
        .par_iter()
        .map(|&seed| {
            let options = MatchOptions { config: config.clone(), injury_time: None };
            let report = MatchEngine::with_options(input, seed, options)?.run_to_completion();
            Ok(MatchSummary { seed, score: report.score, stats: report.stats })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(runs = summaries.len(), "batch simulation finished");
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::uniform_input;

    #[test]
    fn test_batch_preserves_seed_order() {
        let seeds: Vec<u64> = (100..116).rev().collect();
        let summaries = simulate_batch(&uniform_input(12), &seeds, &EngineConfig::default()).unwrap();
        assert_eq!(summaries.len(), seeds.len());
        for (summary, seed) in summaries.iter().zip(&seeds) {
            assert_eq!(summary.seed, *seed);
        }
    }

    #[test]
    fn test_batch_matches_sequential_runs() {
        let input = uniform_input(11);
        let seeds = [3, 4, 5];
        let batch = simulate_batch(&input, &seeds, &EngineConfig::default()).unwrap();
        for summary in &batch {
            let report = MatchEngine::new(&input, summary.seed).unwrap().run_to_completion();
            assert_eq!(report.score, summary.score);
            assert_eq!(report.stats, summary.stats);
        }
    }

    #[test]
    fn test_summary_rates() {
        let stats = MatchStats::default();
        let summaries = vec![
            MatchSummary { seed: 1, score: Score { home: 2, away: 0 }, stats: stats.clone() },
            MatchSummary { seed: 2, score: Score { home: 1, away: 1 }, stats: stats.clone() },
            MatchSummary { seed: 3, score: Score { home: 0, away: 1 }, stats: stats.clone() },
            MatchSummary { seed: 4, score: Score { home: 3, away: 1 }, stats },
        ];
        let agg = BatchSummary::from_summaries(&summaries);
        assert_eq!(agg.matches, 4);
        assert_eq!(agg.avg_goals, 2.25);
        assert_eq!(agg.home_win_rate, 0.5);
        assert_eq!(agg.draw_rate, 0.25);
        assert_eq!(agg.away_win_rate, 0.25);
        assert_eq!(BatchSummary::from_summaries(&[]), BatchSummary::default());
    }

    #[test]
    fn test_invalid_config_fails_batch() {
        let mut config = EngineConfig::default();
        config.substitution.max_per_side = 9;
        assert!(simulate_batch(&uniform_input(10), &[1, 2], &config).is_err());
    }
}
