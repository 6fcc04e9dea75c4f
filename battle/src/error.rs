//! Errors raised when observed battle data disagrees with the engine

use thiserror::Error;

use crate::generation::Generation;

#[derive(Debug, Error, PartialEq)]
pub enum BattleError {
    #[error("Server reports weather {reported} but the simulation expects {expected}")]
    WeatherMismatch { reported: String, expected: String },

    #[error("No Pokemon named {0} on this team")]
    UnknownPokemon(String),

    #[error("Unknown {kind}: {value}")]
    UnknownName { kind: &'static str, value: String },

    #[error("{0} is not the active Pokemon")]
    NotActive(String),

    #[error("Battle is {expected} but the data is for {actual}")]
    GenerationMismatch {
        expected: Generation,
        actual: Generation,
    },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Team has more than {max} Pokemon")]
    TeamFull { max: usize },

    #[error("{pokemon} has more than {max} moves")]
    TooManyMoves { pokemon: String, max: usize },

    #[error("{0} is not available in {1}")]
    NotAvailable(String, Generation),

    #[error("Received {0} before the battle started")]
    NotStarted(&'static str),
}
