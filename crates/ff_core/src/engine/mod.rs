pub mod config; // 튜닝 상수 (presets, YAML/JSON 로딩)
pub mod match_sim; // 분 단위 시뮬레이션 엔진

pub use config::EngineConfig;
pub use match_sim::{
    LineupData, LineupPlayer, MatchEngine, MatchOptions, MatchPhase, MatchReport, MatchState,
    MatchTick, Zone,
};
