use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board size must be at least 1")]
    InvalidBoardSize,
    #[error("Malformed board config: {0}")]
    MalformedConfig(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
