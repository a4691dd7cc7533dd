use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("The start cell cannot hold a mine")]
    MineOnStart,
    #[error("Grid is larger than 255 cells on an axis")]
    GridTooLarge,
    #[error("Game already ended, no new reveals are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
