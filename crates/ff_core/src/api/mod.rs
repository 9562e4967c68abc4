pub mod batch;
pub mod json_api;

pub use batch::{simulate_batch, BatchSummary, MatchSummary};
pub use json_api::{simulate_match, simulate_match_json, MatchRequest, MatchResponse, SCHEMA_VERSION};
