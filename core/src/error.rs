use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum GameError {
    #[error("coordinates outside the board")]
    InvalidCoordinate,
    #[error("board size must be at least 1")]
    InvalidSize,
    #[error("mine probability {0} is not in [0, 1]")]
    InvalidProbability(f64),
    #[error("mine mask is not square")]
    InvalidBoardShape,
    #[error("mine placement outside the board")]
    InvalidMinePlacement,
}

pub type Result<T> = std::result::Result<T, GameError>;
