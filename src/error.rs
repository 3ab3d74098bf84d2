use std::path::PathBuf;

use crate::game::{MoveError, Player};

/// Errors that can occur while saving or loading a Q table.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("table file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read table from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse table from {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unsupported table format version {found} in {path} (expected {expected})")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while playing or training.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("{agent} proposed no move for {} although one exists", .side.name())]
    NoMoveProposed { agent: String, side: Player },

    #[error("{agent} proposed an illegal move: {source}")]
    IllegalMove {
        agent: String,
        #[source]
        source: MoveError,
    },

    #[error("{agent} is seated as {} but plays the other side", .expected.name())]
    SideMismatch { agent: String, expected: Player },

    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Move;

    #[test]
    fn test_checkpoint_error_display() {
        let err = CheckpointError::NotFound(PathBuf::from("q_table.json"));
        assert_eq!(err.to_string(), "table file not found: q_table.json");

        let err = CheckpointError::UnsupportedVersion {
            path: PathBuf::from("t.json"),
            found: 9,
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "unsupported table format version 9 in t.json (expected 1)"
        );
    }

    #[test]
    fn test_training_error_display() {
        let err = TrainingError::NoMoveProposed {
            agent: "Minimax".to_string(),
            side: Player::Light,
        };
        assert_eq!(
            err.to_string(),
            "Minimax proposed no move for Light although one exists"
        );

        let err = TrainingError::IllegalMove {
            agent: "Random".to_string(),
            source: MoveError::Occupied(Move::new(3, 3)),
        };
        assert!(err.to_string().starts_with("Random proposed an illegal move"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("depth must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: depth must be at least 1"
        );
    }
}
