use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board size {0:?} has an empty axis")]
    InvalidSize(Coord2),
    #[error("Mine count {mines} out of range, expected 1..={max}")]
    InvalidMineCount { mines: CellCount, max: CellCount },
    #[error("Mine layout does not match the board configuration")]
    LayoutMismatch,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
