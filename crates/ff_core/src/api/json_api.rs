//! JSON API - 경기 시뮬레이션 요청/응답
//!
//! `schema_version = 1` 만 지원. 요청은 양 팀 [`TeamSheet`] + seed,
//! 응답은 라인업과 전체 tick 목록.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::config::EngineConfig;
use crate::engine::match_sim::{LineupData, MatchEngine, MatchOptions, MatchTick};
use crate::error::{MatchError, Result};
use crate::models::{MatchInput, TeamSheet};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home: TeamSheet,
    pub away: TeamSheet,
    /// Full or partial tuning; defaults when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EngineConfig>,
    /// Fixed `[first half, second half]` injury time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury_time: Option<[u8; 2]>,
}

impl MatchRequest {
    pub fn new(seed: u64, input: MatchInput) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            home: input.home,
            away: input.away,
            config: None,
            injury_time: None,
        }
    }

    pub fn input(&self) -> MatchInput {
        MatchInput::new(self.home.clone(), self.away.clone())
    }

    fn options(&self) -> MatchOptions {
        MatchOptions { config: self.config.clone().unwrap_or_default(), injury_time: self.injury_time }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub score_home: u8,
    pub score_away: u8,
    pub injury_time: [u8; 2],
    pub lineup: LineupData,
    pub ticks: Vec<MatchTick>,
}

/// Run one match described by `request`.
pub fn simulate_match(request: &MatchRequest) -> Result<MatchResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(MatchError::InvalidConfig(format!(
            "unsupported schema version: {}",
            request.schema_version
        )));
    }

    info!(
        seed = request.seed,
        "simulating {} vs {}", request.home.team.name, request.away.team.name
    );

    let input = request.input();
    let engine = MatchEngine::with_options(&input, request.seed, request.options())?;
    let lineup = engine.lineup();
    let report = engine.run_to_completion();

    info!(
        seed = request.seed,
        "full time: {} {} - {} {}",
        request.home.team.name,
        report.score.home,
        report.score.away,
        request.away.team.name
    );
    debug!(ticks = report.ticks.len(), "match report ready");

    Ok(MatchResponse {
        schema_version: SCHEMA_VERSION,
        score_home: report.score.home,
        score_away: report.score.away,
        injury_time: report.injury_time,
        lineup,
        ticks: report.ticks,
    })
}

/// JSON in, JSON out.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = simulate_match(&request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::uniform_input;

    fn request_json(seed: u64) -> String {
        let mut request = MatchRequest::new(seed, uniform_input(12));
        request.injury_time = Some([2, 3]);
        serde_json::to_string(&request).unwrap()
    }

    #[test]
    fn test_simulate_match_json() {
        let out = simulate_match_json(&request_json(42)).unwrap();
        let response: MatchResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(response.schema_version, 1);
        assert_eq!(response.ticks.len(), 97);
        assert_eq!(response.lineup.home.len(), 11);
        let last = response.ticks.last().unwrap();
        assert_eq!((response.score_home, response.score_away), (last.score.home, last.score.away));
    }

    #[test]
    fn test_same_request_same_response() {
        let a = simulate_match_json(&request_json(5)).unwrap();
        let b = simulate_match_json(&request_json(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unsupported_schema_version() {
        let mut request = MatchRequest::new(1, uniform_input(10));
        request.schema_version = 2;
        let json = serde_json::to_string(&request).unwrap();
        assert!(matches!(simulate_match_json(&json), Err(MatchError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(simulate_match_json("{not json"), Err(MatchError::Serialization(_))));
    }

    #[test]
    fn test_partial_config_in_request() {
        let mut value: serde_json::Value = serde_json::from_str(&request_json(8)).unwrap();
        value["config"] = serde_json::json!({ "substitution": { "max_per_side": 0 } });
        let out = simulate_match_json(&value.to_string()).unwrap();
        let response: MatchResponse = serde_json::from_str(&out).unwrap();
        let subs = response
            .ticks
            .iter()
            .flat_map(|t| t.events.iter())
            .filter(|e| e.kind == crate::models::EventKind::Substitution)
            .count();
        assert_eq!(subs, 0);
    }
}
