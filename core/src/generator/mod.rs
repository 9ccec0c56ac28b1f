use core::fmt::Debug;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Decides where the mines go once the first tile of a game is revealed.
pub trait MinefieldGenerator: Debug {
    /// Produces a layout for `config`; `start` is the tile that triggered placement.
    fn generate(&mut self, config: GameConfig, start: Coord2) -> Result<MineLayout>;
}

/// How much of the board around the first revealed tile is kept free of mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartTile {
    /// Only the revealed tile itself.
    #[default]
    SimpleSafe,
    /// The revealed tile and its neighbors, so the first reveal always opens an area.
    AlwaysZero,
}
