use crate::models::{PlayerId, Side};
use thiserror::Error;

/// Precondition, configuration and API failures.
///
/// A running simulation never produces one of these; every variant is raised
/// either before the first tick or at the JSON/config boundary.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid team size for {side}: expected at least {expected}, found {found}")]
    InvalidTeamSize { side: Side, expected: usize, found: usize },

    #[error("Squad for {0} has no players")]
    EmptySquad(Side),

    #[error("Player id {0} appears more than once")]
    DuplicatePlayer(PlayerId),

    #[error("Invalid formation: {0}")]
    InvalidFormation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatchError {
    /// True for errors caused by the caller's match input rather than by
    /// configuration or transport.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MatchError::InvalidTeamSize { .. }
                | MatchError::EmptySquad(_)
                | MatchError::DuplicatePlayer(_)
                | MatchError::InvalidFormation(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_side() {
        let err = MatchError::InvalidTeamSize { side: Side::Away, expected: 11, found: 9 };
        assert_eq!(err.to_string(), "Invalid team size for away: expected at least 11, found 9");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: MatchError = parse.unwrap_err().into();
        assert!(matches!(err, MatchError::Serialization(_)));
        assert!(!err.is_input_error());
    }
}
