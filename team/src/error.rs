use std::path::PathBuf;

use tactician_battle::BattleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: {message}")]
    Export { line: usize, message: String },

    #[error("Packed team entry {entry}: {message}")]
    Packed { entry: usize, message: String },

    #[error("Invalid team JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {pokemon}: {source}")]
    Invalid {
        pokemon: String,
        #[source]
        source: BattleError,
    },

    #[error("{0} has no moves")]
    NoMoves(String),

    #[error("Team has no Pokemon")]
    EmptyTeam,

    #[error("No team files in {}", .0.display())]
    NoTeamFiles(PathBuf),

    #[error(transparent)]
    Battle(#[from] BattleError),
}
